//! Project domain model and the in-memory store screens operate on.
//!
//! Projects live entirely in memory; a real deployment would sync them
//! against a backend, which is out of scope here.

use std::collections::HashSet;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, NodeId};


#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoStatus {
    Pending,
    Completed,
}

impl Default for TodoStatus {
    fn default() -> Self {
        Self::Pending
    }
}

/// Personal todos belong to the current user; global todos are shared
/// across the project team.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum TodoScope {
    Personal,
    Global,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Todo {
    pub id: u64,
    pub text: String,
    pub priority: Priority,
    pub due: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub assignee: Option<String>,
    #[serde(default)]
    pub status: TodoStatus,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub notes: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

/// Fields a screen supplies when creating a todo.
#[derive(Debug, Clone)]
pub struct NewTodo {
    pub text: String,
    pub priority: Priority,
    pub due: String,
    pub assignee: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Collaborator {
    pub id: u64,
    pub name: String,
    pub initials: String,
    pub color: String,
    pub role: String,
    pub permission: String,
    #[serde(default)]
    pub is_owner: bool,
    pub role_filter_enabled: bool,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ProjectDocument {
    pub id: u64,
    pub name: String,
    #[serde(rename = "type")]
    pub doc_type: String,
    pub status: String,
    pub version: String,
    pub author: String,
}

/// A library bundle applied to a project.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Bundle {
    pub id: String,
    pub name: String,
    pub documents: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub country: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub region: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Stage {
    pub id: String,
    pub name: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StageFramework {
    pub name: String,
    pub stages: Vec<Stage>,
}

/// A user known to the platform, eligible to join projects.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlatformUser {
    pub id: u64,
    pub name: String,
    pub email: String,
    pub initials: String,
    pub color: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Project {
    pub id: u64,
    pub name: String,
    pub building_type: String,
    pub building_subtype: Vec<String>,
    pub location: String,
    pub address: String,
    pub gia: String,
    pub completion_date: String,
    pub stage_framework: String,
    pub current_stage: String,
    pub collaborators: Vec<Collaborator>,
    pub project_documents: Vec<ProjectDocument>,
    pub applied_bundles: Vec<Bundle>,
    pub personal_todos: Vec<Todo>,
    pub global_todos: Vec<Todo>,
    /// The project's file tree, browsed by the document screens.
    pub files: Catalog,
}

impl Project {
    fn todos(&self, scope: TodoScope) -> &Vec<Todo> {
        match scope {
            TodoScope::Personal => &self.personal_todos,
            TodoScope::Global => &self.global_todos,
        }
    }

    fn todos_mut(&mut self, scope: TodoScope) -> &mut Vec<Todo> {
        match scope {
            TodoScope::Personal => &mut self.personal_todos,
            TodoScope::Global => &mut self.global_todos,
        }
    }

    fn next_todo_id(&self) -> u64 {
        self.personal_todos
            .iter()
            .chain(self.global_todos.iter())
            .map(|t| t.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    pub fn add_todo(&mut self, scope: TodoScope, todo: NewTodo) -> u64 {
        let id = self.next_todo_id();
        tracing::debug!(project = self.id, todo = id, ?scope, "adding todo");
        self.todos_mut(scope).push(Todo {
            id,
            text: todo.text,
            priority: todo.priority,
            due: todo.due,
            assignee: todo.assignee,
            status: TodoStatus::Pending,
            notes: None,
            created_at: Some(Utc::now()),
        });
        id
    }

    pub fn todo(&self, scope: TodoScope, id: u64) -> Option<&Todo> {
        self.todos(scope).iter().find(|t| t.id == id)
    }

    /// Flip a todo between pending and completed. Returns false when the
    /// todo does not exist in that scope.
    pub fn toggle_todo(&mut self, scope: TodoScope, id: u64) -> bool {
        let Some(todo) = self.todos_mut(scope).iter_mut().find(|t| t.id == id) else {
            return false;
        };
        todo.status = match todo.status {
            TodoStatus::Pending => TodoStatus::Completed,
            TodoStatus::Completed => TodoStatus::Pending,
        };
        true
    }

    pub fn set_todo_notes(&mut self, scope: TodoScope, id: u64, notes: impl Into<String>) -> bool {
        let Some(todo) = self.todos_mut(scope).iter_mut().find(|t| t.id == id) else {
            return false;
        };
        todo.notes = Some(notes.into());
        true
    }

    /// Add a platform user as a collaborator with viewer defaults. Returns
    /// false when they are already on the project.
    pub fn add_collaborator(&mut self, user: &PlatformUser) -> bool {
        if self.collaborators.iter().any(|c| c.id == user.id) {
            return false;
        }
        self.collaborators.push(Collaborator {
            id: user.id,
            name: user.name.clone(),
            initials: user.initials.clone(),
            color: user.color.clone(),
            role: "architect".to_string(),
            permission: "view".to_string(),
            is_owner: false,
            role_filter_enabled: true,
        });
        true
    }

    /// Remove a collaborator. The project owner cannot be removed.
    pub fn remove_collaborator(&mut self, id: u64) -> bool {
        let before = self.collaborators.len();
        self.collaborators.retain(|c| c.id != id || c.is_owner);
        before != self.collaborators.len()
    }

    /// Apply a bundle unless one with the same id already is.
    pub fn apply_bundle(&mut self, bundle: Bundle) -> bool {
        if self.applied_bundles.iter().any(|b| b.id == bundle.id) {
            return false;
        }
        tracing::debug!(project = self.id, bundle = %bundle.id, "applying bundle");
        self.applied_bundles.push(bundle);
        true
    }

    pub fn remove_bundle(&mut self, id: &str) -> bool {
        let before = self.applied_bundles.len();
        self.applied_bundles.retain(|b| b.id != id);
        before != self.applied_bundles.len()
    }

    /// Applied bundle ids as a selection set for the library picker.
    pub fn applied_bundle_ids(&self) -> HashSet<NodeId> {
        self.applied_bundles
            .iter()
            .map(|b| NodeId::new(b.id.clone()))
            .collect()
    }

    fn next_document_id(&self) -> u64 {
        self.project_documents
            .iter()
            .map(|d| d.id)
            .max()
            .unwrap_or(0)
            + 1
    }

    /// Add documents to the project register, skipping names already
    /// present. Returns how many were added.
    pub fn add_documents(&mut self, docs: Vec<NewProjectDocument>) -> usize {
        let mut next_id = self.next_document_id();
        let mut added = 0;
        for doc in docs {
            if self
                .project_documents
                .iter()
                .any(|existing| existing.name == doc.name)
            {
                continue;
            }
            self.project_documents.push(ProjectDocument {
                id: next_id,
                name: doc.name,
                doc_type: doc.doc_type,
                status: doc.status,
                version: doc.version,
                author: doc.author,
            });
            next_id += 1;
            added += 1;
        }
        added
    }
}

/// Fields for a document register entry before an id is assigned.
#[derive(Debug, Clone)]
pub struct NewProjectDocument {
    pub name: String,
    pub doc_type: String,
    pub status: String,
    pub version: String,
    pub author: String,
}

/// Fields a screen supplies when creating a project.
#[derive(Debug, Clone)]
pub struct NewProject {
    pub name: String,
    pub building_type: String,
    pub building_subtype: Vec<String>,
    pub location: String,
    pub address: String,
    pub gia: String,
    pub completion_date: String,
    pub stage_framework: String,
    pub current_stage: String,
}

/// In-memory project collection.
#[derive(Debug, Clone, Default)]
pub struct ProjectStore {
    projects: Vec<Project>,
    next_id: u64,
}

impl ProjectStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed the store (sample data, a future backend fetch).
    pub fn seed(projects: Vec<Project>) -> Self {
        let next_id = projects.iter().map(|p| p.id).max().unwrap_or(0) + 1;
        Self { projects, next_id }
    }

    pub fn projects(&self) -> &[Project] {
        &self.projects
    }

    pub fn get(&self, id: u64) -> Option<&Project> {
        self.projects.iter().find(|p| p.id == id)
    }

    pub fn get_mut(&mut self, id: u64) -> Option<&mut Project> {
        self.projects.iter_mut().find(|p| p.id == id)
    }

    /// Create a project with the given owner as its first collaborator and
    /// an empty file tree.
    pub fn create(&mut self, fields: NewProject, owner: Collaborator) -> u64 {
        let id = self.next_id;
        self.next_id += 1;
        tracing::info!(project = id, name = %fields.name, "creating project");
        self.projects.push(Project {
            id,
            name: fields.name,
            building_type: fields.building_type,
            building_subtype: fields.building_subtype,
            location: fields.location,
            address: fields.address,
            gia: fields.gia,
            completion_date: fields.completion_date,
            stage_framework: fields.stage_framework,
            current_stage: fields.current_stage,
            collaborators: vec![Collaborator {
                is_owner: true,
                ..owner
            }],
            project_documents: Vec::new(),
            applied_bundles: Vec::new(),
            personal_todos: Vec::new(),
            global_todos: Vec::new(),
            files: Catalog::new(),
        });
        id
    }
}
