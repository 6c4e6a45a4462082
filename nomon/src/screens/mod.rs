//! Screen drivers: stateful owners of cursor and selection that apply the
//! deltas computed by the core. One driver per selector call site; no
//! rendering happens here.

pub mod bundles;
pub mod documents;
pub mod review;

pub use bundles::BundlePicker;
pub use documents::DocumentBrowser;
pub use review::ComplianceReview;
