//! Progress reporting for an enrichment run.
//!
//! # Example
//!
//! ```rust,ignore
//! use business_enrichment::Enricher;
//!
//! let summary = Enricher::builder()
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//! ```

use serde::{Deserialize, Serialize};

/// Stages of an enrichment run.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum EnrichmentStage {
    /// Reading the base dataset
    Loading,
    /// Applying the manual correction set
    Correcting,
    /// Computing completeness statistics
    Analyzing,
    /// Writing the manual search worklist
    SearchList,
    /// Writing the update template
    Template,
    /// Merging a filled template
    Reconciling,
    /// Writing the updated table and statistics
    Saving,
    /// Run completed successfully
    Complete,
    /// Run failed with an error
    Failed,
}

impl EnrichmentStage {
    /// Returns a human-readable name for the stage.
    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Loading => "Loading Data",
            Self::Correcting => "Applying Corrections",
            Self::Analyzing => "Analyzing Quality",
            Self::SearchList => "Generating Search List",
            Self::Template => "Generating Template",
            Self::Reconciling => "Applying Template Updates",
            Self::Saving => "Saving Results",
            Self::Complete => "Complete",
            Self::Failed => "Failed",
        }
    }

    /// Returns the overall progress at the start of this stage.
    pub fn base_progress(&self) -> f32 {
        match self {
            Self::Loading => 0.0,
            Self::Correcting => 0.15,
            Self::Analyzing => 0.25,
            Self::SearchList => 0.40,
            Self::Template => 0.55,
            Self::Reconciling => 0.70,
            Self::Saving => 0.85,
            Self::Complete => 1.0,
            Self::Failed => 0.0,
        }
    }
}

/// A progress update emitted at each stage boundary.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProgressUpdate {
    /// Current stage
    pub stage: EnrichmentStage,

    /// Overall progress (0.0 - 1.0)
    pub progress: f32,

    /// Human-readable message describing current activity
    pub message: String,
}

impl ProgressUpdate {
    pub fn new(stage: EnrichmentStage, message: impl Into<String>) -> Self {
        Self {
            stage,
            progress: stage.base_progress(),
            message: message.into(),
        }
    }

    pub fn complete(message: impl Into<String>) -> Self {
        Self::new(EnrichmentStage::Complete, message)
    }

    pub fn failed(message: impl Into<String>) -> Self {
        Self::new(EnrichmentStage::Failed, message)
    }
}

/// Trait for receiving progress updates during a run.
pub trait ProgressReporter: Send + Sync {
    /// Called once per stage transition.
    fn report(&self, update: ProgressUpdate);
}

/// Wrapper that implements [`ProgressReporter`] using a closure.
pub struct ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    callback: F,
}

impl<F> ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    /// Creates a new closure-based progress reporter.
    pub fn new(callback: F) -> Self {
        Self { callback }
    }
}

impl<F> ProgressReporter for ClosureProgressReporter<F>
where
    F: Fn(ProgressUpdate) + Send + Sync,
{
    fn report(&self, update: ProgressUpdate) {
        (self.callback)(update);
    }
}

static_assertions::assert_impl_all!(ProgressUpdate: Send, Sync);

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::Mutex;

    #[test]
    fn test_progress_is_monotonic_over_stages() {
        let stages = [
            EnrichmentStage::Loading,
            EnrichmentStage::Correcting,
            EnrichmentStage::Analyzing,
            EnrichmentStage::SearchList,
            EnrichmentStage::Template,
            EnrichmentStage::Reconciling,
            EnrichmentStage::Saving,
            EnrichmentStage::Complete,
        ];

        for pair in stages.windows(2) {
            assert!(pair[0].base_progress() < pair[1].base_progress());
        }
    }

    #[test]
    fn test_closure_reporter_receives_updates() {
        let seen = Mutex::new(Vec::new());
        let reporter = ClosureProgressReporter::new(|update: ProgressUpdate| {
            seen.lock().unwrap().push(update.stage);
        });

        reporter.report(ProgressUpdate::new(EnrichmentStage::Loading, "Reading"));
        reporter.report(ProgressUpdate::complete("Done"));

        assert_eq!(
            *seen.lock().unwrap(),
            vec![EnrichmentStage::Loading, EnrichmentStage::Complete]
        );
    }

    #[test]
    fn test_stage_serialization() {
        let json = serde_json::to_string(&EnrichmentStage::SearchList).unwrap();
        assert_eq!(json, "\"search_list\"");
    }
}
