//! Picker session state machine and the derived view a screen renders.
//!
//! A session is `Closed` until opened, then browses with a cursor that
//! starts at the root. Navigation validates its target and leaves the
//! cursor untouched on failure; closing discards the cursor while the
//! owner's selection set lives on.

use std::collections::HashSet;

use crate::catalog::{Breadcrumb, Catalog, LeafInfo, NodeId};
use crate::error::CatalogError;
use crate::selection::{self, SelectionStatus};


#[derive(Debug, Clone, PartialEq, Eq)]
enum State {
    Closed,
    Browsing { cursor: Option<NodeId> },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerSession {
    state: State,
}

impl Default for PickerSession {
    fn default() -> Self {
        Self::new()
    }
}

impl PickerSession {
    /// A closed session. Call [`open`](Self::open) to start browsing.
    pub fn new() -> Self {
        Self {
            state: State::Closed,
        }
    }

    /// Open (or reopen) the session at the root.
    pub fn open(&mut self) {
        self.state = State::Browsing { cursor: None };
    }

    /// Close the session, discarding the cursor.
    pub fn close(&mut self) {
        self.state = State::Closed;
    }

    pub fn is_open(&self) -> bool {
        matches!(self.state, State::Browsing { .. })
    }

    /// Currently browsed folder; `None` at the root or while closed.
    pub fn cursor(&self) -> Option<&NodeId> {
        match &self.state {
            State::Browsing { cursor } => cursor.as_ref(),
            State::Closed => None,
        }
    }

    /// Move the cursor into a folder. The target must exist and be a
    /// folder; otherwise the cursor stays put and the error is returned for
    /// the screen to surface. Ignored while closed.
    pub fn navigate(&mut self, catalog: &Catalog, target: &NodeId) -> Result<(), CatalogError> {
        let State::Browsing { cursor } = &mut self.state else {
            tracing::debug!(%target, "navigate on closed picker session ignored");
            return Ok(());
        };
        let node = catalog
            .node(target)
            .ok_or_else(|| CatalogError::NotFound { id: target.clone() })?;
        if !node.is_folder() {
            return Err(CatalogError::NotAFolder { id: target.clone() });
        }
        *cursor = Some(target.clone());
        Ok(())
    }

    /// Jump straight back to the root.
    pub fn navigate_root(&mut self) {
        if let State::Browsing { cursor } = &mut self.state {
            *cursor = None;
        }
    }

    /// Step to the parent of the current folder; a root cursor stays at
    /// root. Fails (cursor unchanged) when the current folder has been
    /// removed from the catalog underneath the session.
    pub fn navigate_up(&mut self, catalog: &Catalog) -> Result<(), CatalogError> {
        let State::Browsing { cursor } = &mut self.state else {
            return Ok(());
        };
        let Some(current) = cursor.clone() else {
            return Ok(());
        };
        let node = catalog
            .node(&current)
            .ok_or(CatalogError::NotFound { id: current })?;
        *cursor = node.parent.clone();
        Ok(())
    }

    /// Breadcrumb click: `None` targets the synthetic root entry.
    pub fn breadcrumb_click(
        &mut self,
        catalog: &Catalog,
        target: Option<&NodeId>,
    ) -> Result<(), CatalogError> {
        match target {
            Some(id) => self.navigate(catalog, id),
            None => {
                self.navigate_root();
                Ok(())
            }
        }
    }

    /// Breadcrumb path for the current cursor.
    pub fn breadcrumbs(&self, catalog: &Catalog) -> Result<Vec<Breadcrumb>, CatalogError> {
        match &self.state {
            State::Browsing { cursor } => catalog.path_to(cursor.as_ref()),
            State::Closed => Ok(Vec::new()),
        }
    }

    /// Everything a screen needs to render the current folder: breadcrumbs
    /// plus one row per visible child, folders first, each folder carrying
    /// its tri-state and each leaf its checked flag. A closed session
    /// renders nothing.
    pub fn view(
        &self,
        catalog: &Catalog,
        selection: &HashSet<NodeId>,
    ) -> Result<PickerView, CatalogError> {
        let State::Browsing { cursor } = &self.state else {
            return Ok(PickerView::default());
        };
        let breadcrumbs = catalog.path_to(cursor.as_ref())?;
        let children = catalog.children_of(cursor.as_ref());

        let mut rows = Vec::with_capacity(children.len());
        for node in children.iter().filter(|n| n.is_folder()) {
            let status = selection::status_of(catalog, selection, &node.id)?;
            rows.push(PickerRow {
                id: node.id.clone(),
                name: node.name.clone(),
                info: node.info.clone(),
                state: RowState::Folder { status },
            });
        }
        for node in children.iter().filter(|n| !n.is_folder()) {
            rows.push(PickerRow {
                id: node.id.clone(),
                name: node.name.clone(),
                info: node.info.clone(),
                state: RowState::Leaf {
                    checked: selection.contains(&node.id),
                },
            });
        }
        Ok(PickerView { breadcrumbs, rows })
    }
}

/// Render state of one visible row.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum RowState {
    Folder { status: SelectionStatus },
    Leaf { checked: bool },
}

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct PickerRow {
    pub id: NodeId,
    pub name: String,
    pub info: LeafInfo,
    pub state: RowState,
}

impl PickerRow {
    pub fn is_folder(&self) -> bool {
        matches!(self.state, RowState::Folder { .. })
    }
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct PickerView {
    pub breadcrumbs: Vec<Breadcrumb>,
    pub rows: Vec<PickerRow>,
}
