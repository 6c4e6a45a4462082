//! Core logic for the Nomon project hub: a flat folder/leaf catalog with
//! breadcrumb navigation, tri-state multi-select aggregation, picker
//! sessions, and the project domain model. Everything here is a pure
//! synchronous computation over owner-supplied state; screens own the
//! catalog, cursor, and selection set and apply the deltas returned here.

pub mod catalog;
pub mod error;
pub mod picker;
pub mod project;
pub mod selection;

pub use catalog::{Breadcrumb, Catalog, LeafInfo, Node, NodeId, NodeKind};
pub use error::CatalogError;
pub use picker::{PickerRow, PickerSession, PickerView, RowState};
pub use project::{
    Bundle, Collaborator, PlatformUser, Priority, Project, ProjectDocument, ProjectStore, Stage,
    StageFramework, Todo, TodoScope, TodoStatus,
};
pub use selection::{SelectionDelta, SelectionStatus};
