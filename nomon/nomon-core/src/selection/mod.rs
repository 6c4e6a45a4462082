//! Tri-state selection aggregation over catalog subtrees.
//!
//! The selection set itself is owned by the consuming screen; every function
//! here is pure and reports a [`SelectionDelta`] for the owner to apply. A
//! folder with no leaves anywhere in its subtree is always `Empty`, never a
//! vacuous `Full`.

use std::collections::HashSet;

use serde::{Deserialize, Serialize};

use crate::catalog::{Catalog, NodeId};
use crate::error::CatalogError;

#[cfg(test)]
mod tests;

/// Aggregate selection status of a folder.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SelectionStatus {
    Empty,
    Partial,
    Full,
}

/// Leaf-id additions and removals for the owner to apply to its selection
/// set. Both lists are sorted so deltas compare and log deterministically.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct SelectionDelta {
    pub add: Vec<NodeId>,
    pub remove: Vec<NodeId>,
}

impl SelectionDelta {
    pub fn is_empty(&self) -> bool {
        self.add.is_empty() && self.remove.is_empty()
    }

    /// Apply the delta to an owned selection set.
    pub fn apply(&self, selection: &mut HashSet<NodeId>) {
        for id in &self.remove {
            selection.remove(id);
        }
        for id in &self.add {
            selection.insert(id.clone());
        }
    }
}

/// Tri-state status of a folder against the given selection set.
pub fn status_of(
    catalog: &Catalog,
    selection: &HashSet<NodeId>,
    folder: &NodeId,
) -> Result<SelectionStatus, CatalogError> {
    status_under(catalog, selection, Some(folder))
}

/// Like [`status_of`] but also accepts the root cursor (`None`), covering
/// the "select all in this view" header checkbox.
pub fn status_under(
    catalog: &Catalog,
    selection: &HashSet<NodeId>,
    folder: Option<&NodeId>,
) -> Result<SelectionStatus, CatalogError> {
    let leaves = catalog.leaves_under(folder)?;
    if leaves.is_empty() {
        return Ok(SelectionStatus::Empty);
    }
    let selected = leaves.iter().filter(|n| selection.contains(&n.id)).count();
    Ok(if selected == 0 {
        SelectionStatus::Empty
    } else if selected == leaves.len() {
        SelectionStatus::Full
    } else {
        SelectionStatus::Partial
    })
}

/// Delta toggling every leaf under a folder.
///
/// A `Full` folder empties; anything else fills in the leaves not yet
/// selected. The fill-on-partial policy is deliberate: clicking a partially
/// selected folder selects the rest rather than clearing it.
pub fn toggle_folder(
    catalog: &Catalog,
    selection: &HashSet<NodeId>,
    folder: &NodeId,
) -> Result<SelectionDelta, CatalogError> {
    toggle_under(catalog, selection, Some(folder))
}

/// [`toggle_folder`] generalized to the root cursor.
pub fn toggle_under(
    catalog: &Catalog,
    selection: &HashSet<NodeId>,
    folder: Option<&NodeId>,
) -> Result<SelectionDelta, CatalogError> {
    let leaves = catalog.leaves_under(folder)?;
    let mut delta = SelectionDelta::default();
    match status_under(catalog, selection, folder)? {
        SelectionStatus::Full => {
            delta.remove = leaves.iter().map(|n| n.id.clone()).collect();
            delta.remove.sort_unstable();
        }
        SelectionStatus::Empty | SelectionStatus::Partial => {
            delta.add = leaves
                .iter()
                .filter(|n| !selection.contains(&n.id))
                .map(|n| n.id.clone())
                .collect();
            delta.add.sort_unstable();
        }
    }
    Ok(delta)
}

/// Membership flip for a single leaf. No aggregation involved, so the
/// catalog is not consulted.
pub fn toggle_leaf(selection: &HashSet<NodeId>, leaf: &NodeId) -> SelectionDelta {
    let mut delta = SelectionDelta::default();
    if selection.contains(leaf) {
        delta.remove.push(leaf.clone());
    } else {
        delta.add.push(leaf.clone());
    }
    delta
}
