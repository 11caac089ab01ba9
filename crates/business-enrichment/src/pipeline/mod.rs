//! Run orchestration.
//!
//! This module sequences one enrichment run (load, correct, analyze and
//! export, reconcile, persist) and reports progress as it goes.

mod enricher;
pub mod progress;

pub use enricher::{Enricher, EnricherBuilder};
pub use progress::{ClosureProgressReporter, EnrichmentStage, ProgressReporter, ProgressUpdate};
