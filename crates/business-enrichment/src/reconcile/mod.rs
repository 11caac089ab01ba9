//! Merging a filled update template back into the listing table.

mod reconciler;

pub use reconciler::{apply_updates, reconcile};
