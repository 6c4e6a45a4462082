//! Nomon application layer: screen drivers that own cursor and selection
//! state and apply the deltas computed by `nomon-core`, plus sample data,
//! the file-backed preferences store, and the copilot responder.

pub mod copilot;
pub mod data;
pub mod prefs;
pub mod screens;
