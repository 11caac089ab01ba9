//! Custom error types for the enrichment workflow.
//!
//! This module provides the error hierarchy using `thiserror` so every
//! stage (loading, exporting, reconciling, saving) reports failures with
//! enough context for the operator to act on them.

use serde::Serialize;
use serde::ser::SerializeStruct;
use std::path::PathBuf;
use thiserror::Error;

/// The main error type for the enrichment workflow.
#[derive(Error, Debug)]
pub enum EnrichmentError {
    /// The base dataset does not exist at the configured location.
    #[error("CSV file not found: {}", .0.display())]
    InputNotFound(PathBuf),

    /// A required column is absent from an input table.
    #[error("Required column '{0}' not found in {1}")]
    MissingColumn(String, String),

    /// A column name that does not correspond to a known business field.
    #[error("Unknown business field '{0}'")]
    UnknownField(String),

    /// Invalid configuration provided.
    #[error("Invalid configuration: {0}")]
    InvalidConfig(String),

    /// IO error wrapper.
    #[error("IO error: {0}")]
    Io(#[from] std::io::Error),

    /// Polars error wrapper.
    #[error("Polars error: {0}")]
    Polars(#[from] polars::error::PolarsError),

    /// JSON serialization error.
    #[error("JSON error: {0}")]
    Json(#[from] serde_json::Error),

    /// Generic error with context.
    #[error("{context}: {source}")]
    WithContext {
        context: String,
        #[source]
        source: Box<EnrichmentError>,
    },
}

impl EnrichmentError {
    /// Add context to an error.
    pub fn with_context(self, context: impl Into<String>) -> Self {
        EnrichmentError::WithContext {
            context: context.into(),
            source: Box::new(self),
        }
    }

    /// Stable machine-readable code for the error kind.
    pub fn error_code(&self) -> &'static str {
        match self {
            Self::InputNotFound(_) => "INPUT_NOT_FOUND",
            Self::MissingColumn(..) => "MISSING_COLUMN",
            Self::UnknownField(_) => "UNKNOWN_FIELD",
            Self::InvalidConfig(_) => "INVALID_CONFIG",
            Self::Io(_) => "IO_ERROR",
            Self::Polars(_) => "POLARS_ERROR",
            Self::Json(_) => "JSON_ERROR",
            Self::WithContext { source, .. } => source.error_code(),
        }
    }

    /// Check if this error means the base dataset is missing.
    ///
    /// Looks through any context wrappers, so the CLI can print setup
    /// guidance regardless of where the error was raised.
    pub fn is_input_not_found(&self) -> bool {
        match self {
            Self::InputNotFound(_) => true,
            Self::WithContext { source, .. } => source.is_input_not_found(),
            _ => false,
        }
    }
}

/// Errors are serialized as a struct with `code` and `message` fields.
impl Serialize for EnrichmentError {
    fn serialize<S>(&self, serializer: S) -> std::result::Result<S::Ok, S::Error>
    where
        S: serde::Serializer,
    {
        let mut state = serializer.serialize_struct("EnrichmentError", 2)?;
        state.serialize_field("code", &self.error_code())?;
        state.serialize_field("message", &self.to_string())?;
        state.end()
    }
}

/// Result type alias for enrichment operations.
pub type Result<T> = std::result::Result<T, EnrichmentError>;

/// Extension trait for adding context to Results.
pub trait ResultExt<T> {
    /// Add context to an error result.
    fn context(self, context: impl Into<String>) -> Result<T>;
}

impl<T> ResultExt<T> for Result<T> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| e.with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, polars::error::PolarsError> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EnrichmentError::Polars(e).with_context(context))
    }
}

impl<T> ResultExt<T> for std::result::Result<T, std::io::Error> {
    fn context(self, context: impl Into<String>) -> Result<T> {
        self.map_err(|e| EnrichmentError::Io(e).with_context(context))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_code() {
        assert_eq!(
            EnrichmentError::InputNotFound(PathBuf::from("data/x.csv")).error_code(),
            "INPUT_NOT_FOUND"
        );
        assert_eq!(
            EnrichmentError::MissingColumn("id".to_string(), "template".to_string()).error_code(),
            "MISSING_COLUMN"
        );
    }

    #[test]
    fn test_input_not_found_through_context() {
        let error = EnrichmentError::InputNotFound(PathBuf::from("data/businesses_rows.csv"))
            .with_context("Loading base dataset");
        assert!(error.is_input_not_found());
        assert!(!EnrichmentError::InvalidConfig("x".to_string()).is_input_not_found());
    }

    #[test]
    fn test_error_serialization() {
        let error = EnrichmentError::UnknownField("fax".to_string());
        let json = serde_json::to_string(&error).unwrap();
        assert!(json.contains("UNKNOWN_FIELD"));
        assert!(json.contains("fax"));
    }

    #[test]
    fn test_with_context() {
        let error = EnrichmentError::MissingColumn("id".to_string(), "template".to_string())
            .with_context("Reading filled template");
        assert!(error.to_string().contains("Reading filled template"));
        assert_eq!(error.error_code(), "MISSING_COLUMN");
    }
}
