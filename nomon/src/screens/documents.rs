//! Document browser: navigates a project's file catalog, multi-selects
//! leaves with tri-state folder checkboxes, and feeds selections into the
//! project document register.

use std::collections::HashSet;

use chrono::Utc;
use nomon_core::catalog::{Catalog, LeafInfo, NodeId, ROOT_LABEL};
use nomon_core::error::CatalogError;
use nomon_core::picker::{PickerSession, PickerView};
use nomon_core::project::{NewProjectDocument, Project};
use nomon_core::selection::{self, SelectionStatus};

#[derive(Debug)]
pub struct DocumentBrowser {
    session: PickerSession,
    selection_mode: bool,
    selection: HashSet<NodeId>,
}

impl Default for DocumentBrowser {
    fn default() -> Self {
        Self::new()
    }
}

impl DocumentBrowser {
    pub fn new() -> Self {
        let mut session = PickerSession::new();
        session.open();
        Self {
            session,
            selection_mode: false,
            selection: HashSet::new(),
        }
    }

    pub fn cursor(&self) -> Option<&NodeId> {
        self.session.cursor()
    }

    pub fn selection(&self) -> &HashSet<NodeId> {
        &self.selection
    }

    pub fn selection_mode(&self) -> bool {
        self.selection_mode
    }

    /// Leaving selection mode discards the pending selection.
    pub fn set_selection_mode(&mut self, enabled: bool) {
        self.selection_mode = enabled;
        if !enabled {
            self.selection.clear();
        }
    }

    /// Navigate into a folder. A target that no longer exists sends the
    /// cursor back to the root with a warning; other failures leave it
    /// where it was.
    pub fn navigate(&mut self, files: &Catalog, target: &NodeId) -> Result<(), CatalogError> {
        match self.session.navigate(files, target) {
            Err(CatalogError::NotFound { id }) => {
                tracing::warn!(%id, "navigation target vanished, returning to root");
                self.session.navigate_root();
                Ok(())
            }
            other => other,
        }
    }

    pub fn navigate_up(&mut self, files: &Catalog) -> Result<(), CatalogError> {
        match self.session.navigate_up(files) {
            Err(CatalogError::NotFound { id }) => {
                tracing::warn!(%id, "current folder vanished, returning to root");
                self.session.navigate_root();
                Ok(())
            }
            other => other,
        }
    }

    pub fn breadcrumb_click(
        &mut self,
        files: &Catalog,
        target: Option<&NodeId>,
    ) -> Result<(), CatalogError> {
        match target {
            Some(id) => self.navigate(files, id),
            None => {
                self.session.navigate_root();
                Ok(())
            }
        }
    }

    /// Current folder contents with per-row selection state. The root
    /// breadcrumb keeps the generic label here. A catalog malformed under
    /// the cursor (dangling parent, parent cycle) sends the view back to
    /// the root with a warning rather than failing the screen.
    pub fn view(&mut self, files: &Catalog) -> Result<PickerView, CatalogError> {
        match self.render(files) {
            Err(CatalogError::BrokenChain { id, missing }) => {
                tracing::warn!(%id, %missing, "dangling parent under cursor, returning to root");
                self.session.navigate_root();
                self.render(files)
            }
            Err(CatalogError::CycleDetected { id }) => {
                tracing::warn!(%id, "parent cycle under cursor, returning to root");
                self.session.navigate_root();
                self.render(files)
            }
            other => other,
        }
    }

    fn render(&self, files: &Catalog) -> Result<PickerView, CatalogError> {
        let mut view = self.session.view(files, &self.selection)?;
        if let Some(root) = view.breadcrumbs.first_mut() {
            root.name = ROOT_LABEL.to_string();
        }
        Ok(view)
    }

    pub fn toggle_leaf(&mut self, leaf: &NodeId) {
        selection::toggle_leaf(&self.selection, leaf).apply(&mut self.selection);
    }

    pub fn toggle_folder(&mut self, files: &Catalog, folder: &NodeId) -> Result<(), CatalogError> {
        selection::toggle_folder(files, &self.selection, folder)?.apply(&mut self.selection);
        Ok(())
    }

    /// Header checkbox: toggle everything under the current folder.
    pub fn toggle_all(&mut self, files: &Catalog) -> Result<(), CatalogError> {
        selection::toggle_under(files, &self.selection, self.session.cursor())?
            .apply(&mut self.selection);
        Ok(())
    }

    pub fn status_here(&self, files: &Catalog) -> Result<SelectionStatus, CatalogError> {
        selection::status_under(files, &self.selection, self.session.cursor())
    }

    /// Add the selected files to the project's document register, skipping
    /// names already present, then clear the selection.
    pub fn add_selected_to_documents(&mut self, project: &mut Project) -> usize {
        let mut docs = Vec::new();
        for id in &self.selection {
            let Some(node) = project.files.node(id) else {
                continue;
            };
            docs.push(NewProjectDocument {
                name: node.name.clone(),
                doc_type: node
                    .info
                    .file_type
                    .clone()
                    .unwrap_or_else(|| "document".to_string()),
                status: "current".to_string(),
                version: node.info.version.clone().unwrap_or_else(|| "Rev A".to_string()),
                author: node.info.author.clone().unwrap_or_else(|| "Unknown".to_string()),
            });
        }
        docs.sort_by(|a, b| a.name.cmp(&b.name));
        let added = project.add_documents(docs);
        self.set_selection_mode(false);
        added
    }

    /// Delete everything selected, recursively for folders, pruning the
    /// removed ids from the selection.
    pub fn delete_selected(&mut self, files: &mut Catalog) -> Result<Vec<NodeId>, CatalogError> {
        let targets: Vec<NodeId> = self.selection.iter().cloned().collect();
        let mut removed = Vec::new();
        for id in targets {
            // an earlier removal may have taken this id with it
            if !files.contains(&id) {
                continue;
            }
            removed.extend(files.remove_recursive(&id)?);
        }
        self.prune_after_removal(files, &removed);
        self.set_selection_mode(false);
        Ok(removed)
    }

    /// Delete a single item and its subtree.
    pub fn delete_item(&mut self, files: &mut Catalog, id: &NodeId) -> Result<Vec<NodeId>, CatalogError> {
        let removed = files.remove_recursive(id)?;
        self.prune_after_removal(files, &removed);
        Ok(removed)
    }

    fn prune_after_removal(&mut self, files: &Catalog, removed: &[NodeId]) {
        for id in removed {
            self.selection.remove(id);
        }
        if let Some(cursor) = self.session.cursor() {
            if !files.contains(cursor) {
                tracing::warn!(%cursor, "current folder deleted, returning to root");
                self.session.navigate_root();
            }
        }
    }

    /// Create a folder in the current one.
    pub fn create_folder(&mut self, files: &mut Catalog, name: &str) -> Result<NodeId, CatalogError> {
        files.create_folder(self.session.cursor(), name)
    }

    /// Mock upload: drop a placeholder pdf into the current folder.
    pub fn upload(&mut self, files: &mut Catalog) -> Result<NodeId, CatalogError> {
        let name = format!("Document-{}.pdf", Utc::now().timestamp_millis());
        let info = LeafInfo {
            file_type: Some("pdf".to_string()),
            size: Some("1.2 MB".to_string()),
            modified: Some(Utc::now().date_naive()),
            author: Some("You".to_string()),
            version: Some("Rev A".to_string()),
            ..LeafInfo::default()
        };
        files.add_leaf(self.session.cursor(), name, info)
    }

    pub fn move_item(
        &mut self,
        files: &mut Catalog,
        id: &NodeId,
        target: Option<&NodeId>,
    ) -> Result<(), CatalogError> {
        files.move_node(id, target)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use nomon_core::catalog::Node;
    use nomon_core::picker::RowState;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    fn files() -> Catalog {
        let pdf = LeafInfo {
            file_type: Some("pdf".to_string()),
            author: Some("Architect".to_string()),
            version: Some("Rev B".to_string()),
            ..LeafInfo::default()
        };
        Catalog::from_nodes(vec![
            Node::folder("drawings", "Drawings", None),
            Node::folder("reports", "Reports", None),
            Node::leaf("ga-101", "GA-101.pdf", Some(id("drawings")), pdf.clone()),
            Node::leaf("ga-102", "GA-102.pdf", Some(id("drawings")), pdf.clone()),
            Node::leaf("fire", "Fire Strategy.pdf", Some(id("reports")), pdf),
        ])
    }

    fn project() -> Project {
        let mut projects = crate::data::sample_projects();
        let mut project = projects.remove(0);
        project.files = files();
        project.project_documents.clear();
        project
    }

    #[test]
    fn vanished_navigation_target_falls_back_to_root() {
        let files = files();
        let mut browser = DocumentBrowser::new();
        browser.navigate(&files, &id("drawings")).unwrap();
        browser.navigate(&files, &id("ghost")).unwrap();
        assert_eq!(browser.cursor(), None);
    }

    #[test]
    fn view_over_dangling_parent_recovers_to_root() {
        // "lost" exists but its parent chain is broken
        let files = Catalog::from_nodes(vec![
            Node::folder("drawings", "Drawings", None),
            Node::folder("lost", "Lost", Some(id("gone"))),
        ]);
        let mut browser = DocumentBrowser::new();
        browser.navigate(&files, &id("lost")).unwrap();

        let view = browser.view(&files).unwrap();
        assert_eq!(browser.cursor(), None);
        assert_eq!(view.breadcrumbs.len(), 1);
        // only "Drawings" hangs off the root
        assert_eq!(view.rows.len(), 1);
    }

    #[test]
    fn view_over_parent_cycle_recovers_to_root() {
        let files = Catalog::from_nodes(vec![
            Node::folder("x", "X", Some(id("y"))),
            Node::folder("y", "Y", Some(id("x"))),
        ]);
        let mut browser = DocumentBrowser::new();
        browser.navigate(&files, &id("x")).unwrap();

        let view = browser.view(&files).unwrap();
        assert_eq!(browser.cursor(), None);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn folder_toggle_selects_leaves_and_view_shows_tristate() {
        let files = files();
        let mut browser = DocumentBrowser::new();
        browser.set_selection_mode(true);
        browser.toggle_folder(&files, &id("drawings")).unwrap();
        assert_eq!(browser.selection().len(), 2);

        let view = browser.view(&files).unwrap();
        let drawings = view.rows.iter().find(|r| r.id == id("drawings")).unwrap();
        assert_eq!(
            drawings.state,
            RowState::Folder {
                status: SelectionStatus::Full
            }
        );
        assert_eq!(browser.status_here(&files).unwrap(), SelectionStatus::Partial);
    }

    #[test]
    fn toggle_all_selects_every_leaf_in_view_scope() {
        let files = files();
        let mut browser = DocumentBrowser::new();
        browser.set_selection_mode(true);
        browser.toggle_all(&files).unwrap();
        assert_eq!(browser.selection().len(), 3);
        assert_eq!(browser.status_here(&files).unwrap(), SelectionStatus::Full);
    }

    #[test]
    fn leaving_selection_mode_clears_selection() {
        let mut browser = DocumentBrowser::new();
        browser.set_selection_mode(true);
        browser.toggle_leaf(&id("ga-101"));
        browser.set_selection_mode(false);
        assert!(browser.selection().is_empty());
    }

    #[test]
    fn add_selected_dedupes_against_register_and_clears() {
        let mut project = project();
        let mut browser = DocumentBrowser::new();
        browser.set_selection_mode(true);
        browser.toggle_leaf(&id("ga-101"));
        browser.toggle_leaf(&id("fire"));

        assert_eq!(browser.add_selected_to_documents(&mut project), 2);
        assert!(browser.selection().is_empty());
        assert!(!browser.selection_mode());

        // same names again add nothing
        browser.set_selection_mode(true);
        browser.toggle_leaf(&id("ga-101"));
        assert_eq!(browser.add_selected_to_documents(&mut project), 0);
        assert_eq!(project.project_documents.len(), 2);

        let ga = project
            .project_documents
            .iter()
            .find(|d| d.name == "GA-101.pdf")
            .unwrap();
        assert_eq!(ga.doc_type, "pdf");
        assert_eq!(ga.version, "Rev B");
    }

    #[test]
    fn delete_selected_prunes_selection_and_cursor() {
        let mut files = files();
        let mut browser = DocumentBrowser::new();
        browser.navigate(&files, &id("drawings")).unwrap();
        browser.set_selection_mode(true);
        browser.toggle_leaf(&id("ga-101"));

        let removed = browser.delete_selected(&mut files).unwrap();
        assert_eq!(removed, vec![id("ga-101")]);
        assert!(browser.selection().is_empty());
        // cursor survives, its folder still exists
        assert_eq!(browser.cursor(), Some(&id("drawings")));

        browser.delete_item(&mut files, &id("drawings")).unwrap();
        assert_eq!(browser.cursor(), None);
        assert!(!files.contains(&id("ga-102")));
    }

    #[test]
    fn create_upload_and_move_land_in_the_current_folder() {
        let mut files = files();
        let mut browser = DocumentBrowser::new();
        browser.navigate(&files, &id("reports")).unwrap();

        let folder = browser.create_folder(&mut files, "Stage 3").unwrap();
        let upload = browser.upload(&mut files).unwrap();
        assert_eq!(files.node(&folder).unwrap().parent, Some(id("reports")));
        assert_eq!(files.node(&upload).unwrap().parent, Some(id("reports")));

        browser.move_item(&mut files, &upload, Some(&folder)).unwrap();
        assert_eq!(files.node(&upload).unwrap().parent, Some(folder));
    }
}
