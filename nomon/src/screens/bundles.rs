//! Library bundle picker: browses the standards library and applies or
//! removes bundles on a project. Folder checkboxes aggregate against the
//! project's applied-bundle ids, so the picker itself holds no selection.

use nomon_core::catalog::{Catalog, Node, NodeId};
use nomon_core::error::CatalogError;
use nomon_core::picker::{PickerSession, PickerView};
use nomon_core::project::{Bundle, Project};
use nomon_core::selection::{self, SelectionStatus};

const LIBRARY_ROOT_LABEL: &str = "Library";

#[derive(Debug)]
pub struct BundlePicker {
    session: PickerSession,
    search: String,
}

impl Default for BundlePicker {
    fn default() -> Self {
        Self::new()
    }
}

impl BundlePicker {
    pub fn new() -> Self {
        Self {
            session: PickerSession::new(),
            search: String::new(),
        }
    }

    /// Opening resets the cursor and the search box.
    pub fn open(&mut self) {
        self.session.open();
        self.search.clear();
    }

    pub fn close(&mut self) {
        self.session.close();
        self.search.clear();
    }

    pub fn is_open(&self) -> bool {
        self.session.is_open()
    }

    pub fn set_search(&mut self, query: impl Into<String>) {
        self.search = query.into();
    }

    pub fn navigate(&mut self, library: &Catalog, target: &NodeId) -> Result<(), CatalogError> {
        self.session.navigate(library, target)
    }

    pub fn navigate_up(&mut self, library: &Catalog) -> Result<(), CatalogError> {
        self.session.navigate_up(library)
    }

    pub fn breadcrumb_click(
        &mut self,
        library: &Catalog,
        target: Option<&NodeId>,
    ) -> Result<(), CatalogError> {
        self.session.breadcrumb_click(library, target)
    }

    /// Current folder rendered against the project's applied bundles, with
    /// the search filter applied case-insensitively to row names.
    pub fn view(&self, library: &Catalog, project: &Project) -> Result<PickerView, CatalogError> {
        let applied = project.applied_bundle_ids();
        let mut view = self.session.view(library, &applied)?;
        if let Some(root) = view.breadcrumbs.first_mut() {
            root.name = LIBRARY_ROOT_LABEL.to_string();
        }
        if !self.search.is_empty() {
            let needle = self.search.to_lowercase();
            view.rows.retain(|row| row.name.to_lowercase().contains(&needle));
        }
        Ok(view)
    }

    /// Toggle a single library document on the project: applied documents
    /// are removed, others applied as single-document bundles.
    pub fn toggle_document(
        &mut self,
        library: &Catalog,
        project: &mut Project,
        id: &NodeId,
    ) -> Result<(), CatalogError> {
        let node = library
            .node(id)
            .ok_or_else(|| CatalogError::NotFound { id: id.clone() })?;
        if node.is_folder() {
            return Err(CatalogError::NotALeaf { id: id.clone() });
        }
        if !project.remove_bundle(id.as_str()) {
            project.apply_bundle(bundle_from_node(node));
        }
        Ok(())
    }

    /// Toggle every document beneath a folder: a fully applied folder is
    /// cleared, anything else applies the missing documents.
    pub fn toggle_folder(
        &mut self,
        library: &Catalog,
        project: &mut Project,
        folder: &NodeId,
    ) -> Result<(), CatalogError> {
        let applied = project.applied_bundle_ids();
        let delta = selection::toggle_folder(library, &applied, folder)?;
        for id in &delta.remove {
            project.remove_bundle(id.as_str());
        }
        for id in &delta.add {
            if let Some(node) = library.node(id) {
                project.apply_bundle(bundle_from_node(node));
            }
        }
        Ok(())
    }

    pub fn folder_status(
        &self,
        library: &Catalog,
        project: &Project,
        folder: &NodeId,
    ) -> Result<SelectionStatus, CatalogError> {
        selection::status_of(library, &project.applied_bundle_ids(), folder)
    }
}

fn bundle_from_node(node: &Node) -> Bundle {
    Bundle {
        id: node.id.as_str().to_string(),
        name: node.name.clone(),
        documents: 1,
        country: node.info.country.clone(),
        region: node.info.region.clone(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::data;
    use nomon_core::picker::RowState;

    fn id(s: &str) -> NodeId {
        NodeId::new(s)
    }

    fn project() -> Project {
        let mut projects = data::sample_projects();
        let mut project = projects.remove(0);
        project.applied_bundles.clear();
        project
    }

    #[test]
    fn toggle_document_applies_then_removes() {
        let library = data::library_catalog();
        let mut project = project();
        let mut picker = BundlePicker::new();
        picker.open();

        picker.toggle_document(&library, &mut project, &id("part-b")).unwrap();
        assert_eq!(project.applied_bundles.len(), 1);
        let bundle = &project.applied_bundles[0];
        assert_eq!(bundle.name, "Part B - Fire Safety");
        assert_eq!(bundle.documents, 1);
        assert_eq!(bundle.country.as_deref(), Some("UK"));

        picker.toggle_document(&library, &mut project, &id("part-b")).unwrap();
        assert!(project.applied_bundles.is_empty());
    }

    #[test]
    fn toggle_folder_bulk_applies_and_clears() {
        let library = data::library_catalog();
        let mut project = project();
        let mut picker = BundlePicker::new();
        picker.open();

        picker.toggle_folder(&library, &mut project, &id("uk-fire-safety")).unwrap();
        assert_eq!(project.applied_bundles.len(), 2);
        assert_eq!(
            picker.folder_status(&library, &project, &id("uk-fire-safety")).unwrap(),
            SelectionStatus::Full
        );

        // partial folder fills in the rest
        project.remove_bundle("bs-9991");
        picker.toggle_folder(&library, &mut project, &id("uk-fire-safety")).unwrap();
        assert_eq!(project.applied_bundles.len(), 2);

        // full folder clears
        picker.toggle_folder(&library, &mut project, &id("uk-fire-safety")).unwrap();
        assert!(project.applied_bundles.is_empty());
    }

    #[test]
    fn view_reflects_applied_state_and_relabels_root() {
        let library = data::library_catalog();
        let mut project = project();
        let mut picker = BundlePicker::new();
        picker.open();
        picker.navigate(&library, &id("uk")).unwrap();
        picker.toggle_folder(&library, &mut project, &id("uk-fire-safety")).unwrap();

        let view = picker.view(&library, &project).unwrap();
        assert_eq!(view.breadcrumbs[0].name, "Library");
        let fire = view.rows.iter().find(|r| r.id == id("uk-fire-safety")).unwrap();
        assert_eq!(
            fire.state,
            RowState::Folder {
                status: SelectionStatus::Full
            }
        );
        let regs = view.rows.iter().find(|r| r.id == id("uk-building-regs")).unwrap();
        assert_eq!(
            regs.state,
            RowState::Folder {
                status: SelectionStatus::Empty
            }
        );
    }

    #[test]
    fn search_filters_rows_case_insensitively() {
        let library = data::library_catalog();
        let project = project();
        let mut picker = BundlePicker::new();
        picker.open();
        picker.navigate(&library, &id("uk-building-regs")).unwrap();

        picker.set_search("fire");
        let view = picker.view(&library, &project).unwrap();
        assert_eq!(view.rows.len(), 1);
        assert_eq!(view.rows[0].id, id("part-b"));

        picker.set_search("");
        assert_eq!(picker.view(&library, &project).unwrap().rows.len(), 5);
    }

    #[test]
    fn reopening_resets_cursor_and_search() {
        let library = data::library_catalog();
        let mut picker = BundlePicker::new();
        picker.open();
        picker.navigate(&library, &id("uk")).unwrap();
        picker.set_search("part");
        picker.close();

        picker.open();
        let view = picker.view(&library, &project()).unwrap();
        assert_eq!(view.breadcrumbs.len(), 1);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn toggle_document_rejects_folders() {
        let library = data::library_catalog();
        let mut project = project();
        let mut picker = BundlePicker::new();
        picker.open();
        let err = picker
            .toggle_document(&library, &mut project, &id("uk"))
            .unwrap_err();
        assert_eq!(err, CatalogError::NotALeaf { id: id("uk") });
        // the surfaced message must not claim the folder is not a folder
        assert_eq!(err.to_string(), "node uk is a folder, not a document");
        assert!(project.applied_bundles.is_empty());
    }
}
