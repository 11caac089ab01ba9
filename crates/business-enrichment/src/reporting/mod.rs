//! Report generation module.
//!
//! This module produces the operator-facing artifacts of a run:
//!
//! - the manual search worklist ([`SearchListGenerator`])
//! - the fill-in update template ([`TemplateGenerator`]), which is also read
//!   back once the operator has filled it
//! - the data quality statistics JSON ([`write_statistics`])
//!
//! # Example
//!
//! ```rust,ignore
//! use business_enrichment::reporting::{SearchListGenerator, TemplateGenerator};
//!
//! let count = SearchListGenerator::new(50).write(&table, &config.search_list_path())?;
//! let rows = TemplateGenerator::write(&table, &config.template_path())?;
//! ```

mod search_list;
mod stats;
mod template;

pub use search_list::{
    PRIORITY_CATEGORIES, SearchListEntry, SearchListGenerator, priority_tier, search_query,
};
pub use stats::write_statistics;
pub use template::{TEMPLATE_COLUMNS, TemplateGenerator, new_value_column};
