//! Completeness analysis module.
//!
//! This module finds records missing contact fields and computes the
//! aggregate data quality statistics.

mod analyzer;

pub use analyzer::DataQualityAnalyzer;
