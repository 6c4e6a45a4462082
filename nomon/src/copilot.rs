//! Canned copilot responder over a message transcript. A real deployment
//! would call an assistant backend here.

use chrono::{DateTime, Utc};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Message {
    pub role: Role,
    pub content: String,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub struct CopilotChat {
    messages: Vec<Message>,
}

impl CopilotChat {
    /// Start a transcript with the greeting for the given project.
    pub fn new(project_name: &str) -> Self {
        let greeting = format!(
            "Hello! I'm your project Copilot for **{project_name}**. I have access to \
             your project documents and the applied library bundles. How can I help \
             you today?"
        );
        Self {
            messages: vec![Message {
                role: Role::Assistant,
                content: greeting,
                timestamp: Utc::now(),
            }],
        }
    }

    pub fn messages(&self) -> &[Message] {
        &self.messages
    }

    /// Record a user message and the demo-mode reply. Blank input is
    /// ignored, matching the send button being disabled.
    pub fn send(&mut self, input: &str) -> Option<&Message> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.messages.push(Message {
            role: Role::User,
            content: input.to_string(),
            timestamp: Utc::now(),
        });
        self.messages.push(Message {
            role: Role::Assistant,
            content: "I'm currently in demo mode. In the full version, I would analyze \
                      your project documents and library bundles to provide relevant \
                      answers based on your role filter settings."
                .to_string(),
            timestamp: Utc::now(),
        });
        self.messages.last()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn transcript_opens_with_project_greeting() {
        let chat = CopilotChat::new("Riverside Tower");
        assert_eq!(chat.messages().len(), 1);
        assert_eq!(chat.messages()[0].role, Role::Assistant);
        assert!(chat.messages()[0].content.contains("Riverside Tower"));
    }

    #[test]
    fn send_appends_user_message_and_reply() {
        let mut chat = CopilotChat::new("Riverside Tower");
        let reply = chat.send("What bundles are applied?").unwrap();
        assert_eq!(reply.role, Role::Assistant);
        assert!(reply.content.contains("demo mode"));
        assert_eq!(chat.messages().len(), 3);
    }

    #[test]
    fn blank_input_is_ignored() {
        let mut chat = CopilotChat::new("Riverside Tower");
        assert!(chat.send("   ").is_none());
        assert_eq!(chat.messages().len(), 1);
    }
}
