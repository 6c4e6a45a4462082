use thiserror::Error;

use crate::catalog::NodeId;

/// Failures surfaced by catalog walks and picker navigation.
///
/// None of these are fatal: the selection set is never touched by a failed
/// walk, and callers recover by leaving the cursor where it was (or falling
/// back to root) and surfacing a non-fatal notice.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CatalogError {
    #[error("node {id} not found in catalog")]
    NotFound { id: NodeId },

    #[error("node {id} is not a folder")]
    NotAFolder { id: NodeId },

    #[error("node {id} is a folder, not a document")]
    NotALeaf { id: NodeId },

    #[error("parent {missing} of node {id} is missing from the catalog")]
    BrokenChain { id: NodeId, missing: NodeId },

    #[error("walk from {id} exceeded the catalog depth bound")]
    CycleDetected { id: NodeId },

    #[error("cannot move {id} into its own subtree (target {target})")]
    InvalidMove { id: NodeId, target: NodeId },
}
