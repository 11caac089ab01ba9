//! Configuration types for the enrichment workflow.
//!
//! This module provides configuration options using the builder pattern.
//! Only paths and the worklist size are configurable; artifact file names
//! are fixed so the operator can find them between runs.

use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

/// Default base dataset file name inside the data directory.
pub const INPUT_FILE_NAME: &str = "businesses_rows.csv";
/// Updated table written after each run.
pub const UPDATED_TABLE_FILE_NAME: &str = "businesses_rows_updated.csv";
/// Manual search worklist.
pub const SEARCH_LIST_FILE_NAME: &str = "businesses_to_search.txt";
/// Blank update template for manual data entry.
pub const TEMPLATE_FILE_NAME: &str = "business_updates_template.csv";
/// Filled copy of the template, consumed on the next run when present.
pub const FILLED_TEMPLATE_FILE_NAME: &str = "business_updates_template_FILLED.csv";
/// Data quality statistics.
pub const STATS_FILE_NAME: &str = "data_quality_stats.json";

/// Default number of records in the search worklist.
pub const DEFAULT_SEARCH_LIMIT: usize = 50;

/// Configuration for an enrichment run.
///
/// Use [`EnrichmentConfig::builder()`] to create a new configuration
/// with fluent API.
///
/// # Example
///
/// ```rust,ignore
/// use business_enrichment::config::EnrichmentConfig;
///
/// let config = EnrichmentConfig::builder()
///     .data_dir("data")
///     .search_limit(25)
///     .build()?;
/// ```
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentConfig {
    /// Path of the base dataset.
    /// Default: "data/businesses_rows.csv"
    pub input_path: PathBuf,

    /// Directory receiving every generated artifact.
    /// Default: "data/output"
    pub output_dir: PathBuf,

    /// Maximum number of records in the search worklist.
    /// Default: 50
    pub search_limit: usize,

    /// Whether to write artifacts to disk.
    /// When false, the run only computes results in memory.
    /// Default: true
    pub save_to_disk: bool,
}

impl Default for EnrichmentConfig {
    fn default() -> Self {
        Self::for_data_dir("data")
    }
}

impl EnrichmentConfig {
    /// Create a new configuration builder.
    pub fn builder() -> EnrichmentConfigBuilder {
        EnrichmentConfigBuilder::default()
    }

    /// Conventional layout: `<dir>/businesses_rows.csv` in, `<dir>/output` out.
    pub fn for_data_dir(data_dir: impl AsRef<Path>) -> Self {
        let data_dir = data_dir.as_ref();
        Self {
            input_path: data_dir.join(INPUT_FILE_NAME),
            output_dir: data_dir.join("output"),
            search_limit: DEFAULT_SEARCH_LIMIT,
            save_to_disk: true,
        }
    }

    pub fn updated_table_path(&self) -> PathBuf {
        self.output_dir.join(UPDATED_TABLE_FILE_NAME)
    }

    pub fn search_list_path(&self) -> PathBuf {
        self.output_dir.join(SEARCH_LIST_FILE_NAME)
    }

    pub fn template_path(&self) -> PathBuf {
        self.output_dir.join(TEMPLATE_FILE_NAME)
    }

    pub fn filled_template_path(&self) -> PathBuf {
        self.output_dir.join(FILLED_TEMPLATE_FILE_NAME)
    }

    pub fn stats_path(&self) -> PathBuf {
        self.output_dir.join(STATS_FILE_NAME)
    }

    /// Validate the configuration and return errors if invalid.
    pub fn validate(&self) -> Result<(), ConfigValidationError> {
        if self.search_limit == 0 {
            return Err(ConfigValidationError::InvalidSearchLimit(self.search_limit));
        }

        if self.input_path.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("input_path".to_string()));
        }

        if self.output_dir.as_os_str().is_empty() {
            return Err(ConfigValidationError::EmptyPath("output_dir".to_string()));
        }

        Ok(())
    }
}

/// Errors that can occur during configuration validation.
#[derive(Debug, thiserror::Error)]
pub enum ConfigValidationError {
    #[error("Invalid search limit: {0} (must be at least 1)")]
    InvalidSearchLimit(usize),

    #[error("Path '{0}' must not be empty")]
    EmptyPath(String),
}

/// Builder for [`EnrichmentConfig`] with fluent API.
#[derive(Debug, Default)]
pub struct EnrichmentConfigBuilder {
    data_dir: Option<PathBuf>,
    input_path: Option<PathBuf>,
    output_dir: Option<PathBuf>,
    search_limit: Option<usize>,
    save_to_disk: Option<bool>,
}

impl EnrichmentConfigBuilder {
    /// Set the data directory the default input and output paths derive from.
    pub fn data_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.data_dir = Some(path.into());
        self
    }

    /// Override the base dataset path.
    pub fn input_path(mut self, path: impl Into<PathBuf>) -> Self {
        self.input_path = Some(path.into());
        self
    }

    /// Override the output directory.
    pub fn output_dir(mut self, path: impl Into<PathBuf>) -> Self {
        self.output_dir = Some(path.into());
        self
    }

    /// Set the maximum number of records in the search worklist.
    pub fn search_limit(mut self, limit: usize) -> Self {
        self.search_limit = Some(limit);
        self
    }

    /// Enable or disable writing artifacts to disk.
    pub fn save_to_disk(mut self, save: bool) -> Self {
        self.save_to_disk = Some(save);
        self
    }

    /// Build the configuration.
    ///
    /// Returns a validated `EnrichmentConfig` or an error if validation fails.
    pub fn build(self) -> Result<EnrichmentConfig, ConfigValidationError> {
        let defaults = match &self.data_dir {
            Some(dir) => EnrichmentConfig::for_data_dir(dir),
            None => EnrichmentConfig::default(),
        };

        let config = EnrichmentConfig {
            input_path: self.input_path.unwrap_or(defaults.input_path),
            output_dir: self.output_dir.unwrap_or(defaults.output_dir),
            search_limit: self.search_limit.unwrap_or(DEFAULT_SEARCH_LIMIT),
            save_to_disk: self.save_to_disk.unwrap_or(true),
        };

        config.validate()?;
        Ok(config)
    }
}
