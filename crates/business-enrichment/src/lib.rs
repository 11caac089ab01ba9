//! Business Listing Enrichment Library
//!
//! Data completion workflow for a directory of local business listings,
//! built with Rust and Polars.
//!
//! # Overview
//!
//! One run of the workflow:
//!
//! - **Corrections**: Applies a curated set of verified contact details by record id
//! - **Quality Analysis**: Finds listings missing address, website or phone and
//!   computes completeness statistics
//! - **Search Worklist**: Writes a prioritized plain-text list of listings to look up
//! - **Update Template**: Writes a CSV with blank `NEW_*` columns for manual entry
//! - **Reconciliation**: Merges a filled template back into the table
//! - **Persistence**: Saves the updated table and a JSON statistics snapshot
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use business_enrichment::{Enricher, EnrichmentConfig};
//!
//! let config = EnrichmentConfig::builder()
//!     .data_dir("data")
//!     .search_limit(50)
//!     .build()?;
//!
//! let summary = Enricher::builder()
//!     .config(config)
//!     .on_progress(|update| {
//!         println!("[{:.0}%] {}", update.progress * 100.0, update.message);
//!     })
//!     .build()?
//!     .run()?;
//!
//! println!("Website completion: {}", summary.stats_after.website_completion);
//! ```
//!
//! # Working with a table directly
//!
//! Every stage is also usable on its own:
//!
//! ```rust,ignore
//! use business_enrichment::{Corrector, DataQualityAnalyzer, load_business_table, reconcile};
//!
//! let mut table = load_business_table(Path::new("data/businesses_rows.csv"))?;
//! Corrector::default().apply(&mut table);
//!
//! let stats = DataQualityAnalyzer::compute_statistics(&table);
//! let (updated, report) = reconcile(&table, &rows);
//! ```

pub mod config;
pub mod corrections;
pub mod error;
pub mod pipeline;
pub mod quality;
pub mod reconcile;
pub mod reporting;
pub mod storage;
pub mod types;
pub mod utils;

// Re-exports for convenient access
pub use config::{ConfigValidationError, EnrichmentConfig, EnrichmentConfigBuilder};
pub use corrections::{Corrector, known_corrections};
pub use error::{EnrichmentError, Result as EnrichmentResult, ResultExt};
pub use pipeline::{
    ClosureProgressReporter, Enricher, EnricherBuilder, EnrichmentStage, ProgressReporter,
    ProgressUpdate,
};
pub use quality::DataQualityAnalyzer;
pub use reconcile::{apply_updates, reconcile};
pub use reporting::{SearchListEntry, SearchListGenerator, TemplateGenerator, write_statistics};
pub use storage::{load_business_table, save_business_table};
pub use types::{
    BusinessRecord, BusinessTable, CorrectionEntry, DataQualityStats, EnrichmentSummary, Field,
    IncompleteRecord, ReconciliationReport, RecordChange, UpdateTemplateRow,
};
