//! Compliance review: uploads files, picks review context from applied
//! bundles and project folders, and drives a canned review transcript.
//! Responses are synchronous; delayed delivery is a rendering concern.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use nomon_core::catalog::{Breadcrumb, Catalog, Node, NodeId};
use nomon_core::error::CatalogError;
use nomon_core::picker::PickerSession;
use nomon_core::project::Project;

const PROJECT_ROOT_LABEL: &str = "Project Root";

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Role {
    User,
    System,
    Assistant,
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ReviewMessage {
    pub role: Role,
    pub content: String,
    pub files: Vec<String>,
    pub timestamp: DateTime<Utc>,
}

#[derive(Debug)]
pub struct ComplianceReview {
    session: PickerSession,
    uploaded_files: Vec<String>,
    selected_bundles: HashSet<String>,
    /// Folder ids included as review context. Plain toggles, no subtree
    /// aggregation.
    selected_folders: HashSet<NodeId>,
    messages: Vec<ReviewMessage>,
    reviewing: bool,
    upload_seq: u64,
}

impl Default for ComplianceReview {
    fn default() -> Self {
        Self::new()
    }
}

impl ComplianceReview {
    pub fn new() -> Self {
        let mut session = PickerSession::new();
        session.open();
        Self {
            session,
            uploaded_files: Vec::new(),
            selected_bundles: HashSet::new(),
            selected_folders: HashSet::new(),
            messages: Vec::new(),
            reviewing: false,
            upload_seq: 0,
        }
    }

    pub fn uploaded_files(&self) -> &[String] {
        &self.uploaded_files
    }

    pub fn messages(&self) -> &[ReviewMessage] {
        &self.messages
    }

    pub fn is_reviewing(&self) -> bool {
        self.reviewing
    }

    /// Mock upload: adds a document and report pair to the review list.
    pub fn upload_files(&mut self) -> &[String] {
        self.upload_seq += 1;
        self.uploaded_files.push(format!("Document-{}.pdf", self.upload_seq));
        self.uploaded_files.push(format!("Report-{}.pdf", self.upload_seq));
        &self.uploaded_files
    }

    pub fn remove_file(&mut self, name: &str) {
        self.uploaded_files.retain(|f| f != name);
    }

    /// Folders of the current directory, the only rows this screen shows.
    pub fn folder_rows<'a>(&self, files: &'a Catalog) -> Vec<&'a Node> {
        files
            .children_of(self.session.cursor())
            .into_iter()
            .filter(|n| n.is_folder())
            .collect()
    }

    pub fn breadcrumbs(&self, files: &Catalog) -> Result<Vec<Breadcrumb>, CatalogError> {
        let mut crumbs = self.session.breadcrumbs(files)?;
        if let Some(root) = crumbs.first_mut() {
            root.name = PROJECT_ROOT_LABEL.to_string();
        }
        Ok(crumbs)
    }

    pub fn navigate(&mut self, files: &Catalog, target: &NodeId) -> Result<(), CatalogError> {
        self.session.navigate(files, target)
    }

    pub fn navigate_up(&mut self, files: &Catalog) -> Result<(), CatalogError> {
        self.session.navigate_up(files)
    }

    /// Include or exclude an applied bundle from the review context.
    pub fn toggle_bundle(&mut self, bundle_id: &str) -> bool {
        if self.selected_bundles.remove(bundle_id) {
            false
        } else {
            self.selected_bundles.insert(bundle_id.to_string());
            true
        }
    }

    pub fn is_bundle_selected(&self, bundle_id: &str) -> bool {
        self.selected_bundles.contains(bundle_id)
    }

    /// Include or exclude a project folder from the review context.
    pub fn toggle_folder(&mut self, folder: &NodeId) -> bool {
        if self.selected_folders.remove(folder) {
            false
        } else {
            self.selected_folders.insert(folder.clone());
            true
        }
    }

    pub fn is_folder_selected(&self, folder: &NodeId) -> bool {
        self.selected_folders.contains(folder)
    }

    /// Kick off a review. Requires at least one uploaded file; emits the
    /// user, system and canned assistant messages.
    pub fn start_review(&mut self, project: &Project) -> bool {
        if self.uploaded_files.is_empty() {
            return false;
        }
        tracing::debug!(
            project = project.id,
            files = self.uploaded_files.len(),
            bundles = self.selected_bundles.len(),
            folders = self.selected_folders.len(),
            "starting compliance review"
        );
        self.reviewing = true;
        self.messages.clear();
        self.messages.push(ReviewMessage {
            role: Role::User,
            content: "Starting compliance review".to_string(),
            files: self.uploaded_files.clone(),
            timestamp: Utc::now(),
        });
        self.messages.push(ReviewMessage {
            role: Role::System,
            content: format!(
                "Reviewing against: {} library documents, {} project folders",
                self.selected_bundles.len(),
                self.selected_folders.len()
            ),
            files: Vec::new(),
            timestamp: Utc::now(),
        });
        self.messages.push(ReviewMessage {
            role: Role::Assistant,
            content: format!(
                "## Compliance Review Summary\n\n**Documents Reviewed:** {}\n\n\
                 ### Findings:\n\n\
                 1. **Section 4.2 - Fire Compartmentation**\n   \
                 - Missing reference to BS 9991 clause 6.4\n   \
                 - Recommendation: Add explicit reference to travel distance calculations\n\n\
                 2. **Section 5.1 - Smoke Control**\n   \
                 - Compliant with ADB Volume 2\n   \
                 - Note: Consider adding CIBSE Guide E reference\n\n\
                 3. **General**\n   \
                 - Document version control: Current\n   \
                 - Cross-references: 85% complete\n\n\
                 *Feel free to ask follow-up questions to refine this review.*",
                self.uploaded_files.len()
            ),
            files: Vec::new(),
            timestamp: Utc::now(),
        });
        true
    }

    /// Follow-up question after a review has started.
    pub fn send_message(&mut self, input: &str) -> Option<&ReviewMessage> {
        let input = input.trim();
        if input.is_empty() {
            return None;
        }
        self.messages.push(ReviewMessage {
            role: Role::User,
            content: input.to_string(),
            files: Vec::new(),
            timestamp: Utc::now(),
        });
        let excerpt: String = input.chars().take(30).collect();
        self.messages.push(ReviewMessage {
            role: Role::Assistant,
            content: format!(
                "Thanks for your question about \"{excerpt}...\"\n\n\
                 Based on my review of the documents, here's additional context:\n\n\
                 - The relevant section references BS EN 1991-1-2 for fire loading calculations\n\
                 - Cross-referencing with your project specifications, I recommend reviewing Section 3.4\n\
                 - For detailed guidance, consider consulting CIBSE TM19\n\n\
                 Would you like me to elaborate on any specific aspect?"
            ),
            files: Vec::new(),
            timestamp: Utc::now(),
        });
        self.messages.last()
    }
}
