//! The enrichment run and its builder.

use crate::config::{ConfigValidationError, EnrichmentConfig};
use crate::corrections::Corrector;
use crate::error::{Result, ResultExt};
use crate::pipeline::progress::{
    ClosureProgressReporter, EnrichmentStage, ProgressReporter, ProgressUpdate,
};
use crate::quality::DataQualityAnalyzer;
use crate::reconcile::reconcile;
use crate::reporting::{SearchListGenerator, TemplateGenerator, write_statistics};
use crate::storage::{load_business_table, save_business_table};
use crate::types::{BusinessTable, CorrectionEntry, EnrichmentSummary};
use std::sync::Arc;
use std::time::Instant;
use tracing::{error, info};

/// One enrichment run over the configured dataset.
///
/// Use [`Enricher::builder()`] to create a new enricher.
///
/// # Example
///
/// ```rust,ignore
/// use business_enrichment::{Enricher, EnrichmentConfig};
///
/// let summary = Enricher::builder()
///     .config(EnrichmentConfig::builder().data_dir("data").build()?)
///     .on_progress(|update| println!("{}", update.message))
///     .build()?
///     .run()?;
///
/// println!("{} businesses to look up", summary.search_list_count);
/// ```
pub struct Enricher {
    config: EnrichmentConfig,
    corrector: Corrector,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

static_assertions::assert_impl_all!(Enricher: Send);

impl Enricher {
    /// Create a new enricher builder.
    pub fn builder() -> EnricherBuilder {
        EnricherBuilder::default()
    }

    pub fn config(&self) -> &EnrichmentConfig {
        &self.config
    }

    /// Run the whole workflow against the configured files.
    ///
    /// Reads the base dataset, applies corrections, writes the worklist and
    /// template, merges a filled template when one is present, and persists
    /// the updated table with its statistics.
    pub fn run(&self) -> Result<EnrichmentSummary> {
        match self.run_internal() {
            Ok(summary) => {
                self.report_progress(ProgressUpdate::complete("Enrichment completed successfully"));
                Ok(summary)
            }
            Err(e) => {
                self.report_progress(ProgressUpdate::failed(e.to_string()));
                error!("Enrichment failed: {}", e);
                Err(e)
            }
        }
    }

    /// Report progress if a reporter is configured.
    fn report_progress(&self, update: ProgressUpdate) {
        if let Some(reporter) = &self.progress_reporter {
            reporter.report(update);
        }
    }

    fn run_internal(&self) -> Result<EnrichmentSummary> {
        let start_time = Instant::now();

        self.report_progress(ProgressUpdate::new(
            EnrichmentStage::Loading,
            format!("Reading {}", self.config.input_path.display()),
        ));
        let table = load_business_table(&self.config.input_path).context("Loading base dataset")?;

        let (table, mut summary) = self.process_table(table)?;

        if self.config.save_to_disk {
            self.report_progress(ProgressUpdate::new(
                EnrichmentStage::Saving,
                "Saving updated data and statistics",
            ));

            let table_path = self.config.updated_table_path();
            save_business_table(&table, &table_path).context("Saving updated data")?;
            summary.artifacts.push(table_path);

            let stats_path = self.config.stats_path();
            write_statistics(&summary.stats_after, &stats_path).context("Saving statistics")?;
            summary.artifacts.push(stats_path);
        }

        summary.duration_ms = start_time.elapsed().as_millis() as u64;
        Ok(summary)
    }

    /// Correct, analyze, export and reconcile an already loaded table.
    ///
    /// Exports are written only when `save_to_disk` is set; a filled template
    /// is merged whenever it exists. Returns the final table, which has not
    /// been persisted.
    pub fn process_table(&self, table: BusinessTable) -> Result<(BusinessTable, EnrichmentSummary)> {
        let mut table = table;
        let mut artifacts = Vec::new();
        let records_loaded = table.len();

        self.report_progress(ProgressUpdate::new(
            EnrichmentStage::Correcting,
            "Applying known corrections",
        ));
        let corrections_applied = self.corrector.apply(&mut table);

        self.report_progress(ProgressUpdate::new(
            EnrichmentStage::Analyzing,
            "Computing data quality statistics",
        ));
        let stats_before = DataQualityAnalyzer::compute_statistics(&table);

        self.report_progress(ProgressUpdate::new(
            EnrichmentStage::SearchList,
            format!("Generating search list (top {} businesses)", self.config.search_limit),
        ));
        let search_list = SearchListGenerator::new(self.config.search_limit);
        let search_list_count = if self.config.save_to_disk {
            let path = self.config.search_list_path();
            let count = search_list.write(&table, &path).context("Writing search list")?;
            artifacts.push(path);
            count
        } else {
            search_list.build_entries(&table).len()
        };

        self.report_progress(ProgressUpdate::new(
            EnrichmentStage::Template,
            "Generating update template",
        ));
        let template_rows = if self.config.save_to_disk {
            let path = self.config.template_path();
            let rows = TemplateGenerator::write(&table, &path).context("Writing update template")?;
            artifacts.push(path);
            rows
        } else {
            DataQualityAnalyzer::worklist_candidates(&table).len()
        };

        let filled_path = self.config.filled_template_path();
        let reconciliation = if filled_path.exists() {
            self.report_progress(ProgressUpdate::new(
                EnrichmentStage::Reconciling,
                format!("Applying updates from {}", filled_path.display()),
            ));
            let rows = TemplateGenerator::read_filled(&filled_path)
                .context("Reading filled template")?;
            let (updated, report) = reconcile(&table, &rows);
            table = updated;
            Some(report)
        } else {
            info!(
                "No filled template at {}, nothing to reconcile",
                filled_path.display()
            );
            None
        };

        let stats_after = DataQualityAnalyzer::compute_statistics(&table);

        let summary = EnrichmentSummary {
            records_loaded,
            corrections_applied,
            stats_before,
            search_list_count,
            template_rows,
            reconciliation,
            stats_after,
            artifacts,
            duration_ms: 0,
        };

        Ok((table, summary))
    }
}

/// Builder for [`Enricher`].
#[derive(Default)]
pub struct EnricherBuilder {
    config: Option<EnrichmentConfig>,
    corrections: Option<Vec<CorrectionEntry>>,
    progress_reporter: Option<Arc<dyn ProgressReporter>>,
}

impl EnricherBuilder {
    /// Set the run configuration.
    pub fn config(mut self, config: EnrichmentConfig) -> Self {
        self.config = Some(config);
        self
    }

    /// Replace the built-in correction set.
    pub fn corrections(mut self, entries: Vec<CorrectionEntry>) -> Self {
        self.corrections = Some(entries);
        self
    }

    /// Set a progress reporter for receiving updates during the run.
    pub fn progress_reporter(mut self, reporter: Arc<dyn ProgressReporter>) -> Self {
        self.progress_reporter = Some(reporter);
        self
    }

    /// Set a progress callback closure.
    pub fn on_progress<F>(mut self, callback: F) -> Self
    where
        F: Fn(ProgressUpdate) + Send + Sync + 'static,
    {
        self.progress_reporter = Some(Arc::new(ClosureProgressReporter::new(callback)));
        self
    }

    /// Build the enricher.
    ///
    /// Returns an error if the configuration is invalid.
    pub fn build(self) -> std::result::Result<Enricher, ConfigValidationError> {
        let config = self.config.unwrap_or_default();
        config.validate()?;

        let corrector = match self.corrections {
            Some(entries) => Corrector::new(entries),
            None => Corrector::default(),
        };

        Ok(Enricher {
            config,
            corrector,
            progress_reporter: self.progress_reporter,
        })
    }
}
