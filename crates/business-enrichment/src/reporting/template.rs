//! The fill-in update template.
//!
//! Written with the current contact data of every worklist candidate and
//! blank `NEW_` columns; the operator saves a filled copy that the next run
//! reads back with [`TemplateGenerator::read_filled`].

use crate::error::{EnrichmentError, Result};
use crate::quality::DataQualityAnalyzer;
use crate::storage::{column_values, read_text_csv, write_csv};
use crate::types::{BusinessTable, Field, IncompleteRecord, UpdateTemplateRow};
use polars::prelude::*;
use std::path::Path;
use tracing::{info, warn};

/// Template columns, in file order.
pub const TEMPLATE_COLUMNS: [&str; 12] = [
    "id",
    "name",
    "location",
    "category",
    "current_address",
    "current_phone",
    "current_website",
    "NEW_address",
    "NEW_phone",
    "NEW_website",
    "NEW_email",
    "notes",
];

/// Column carrying the operator-supplied value for `field`, e.g. `NEW_phone`.
pub fn new_value_column(field: Field) -> String {
    format!("NEW_{}", field.as_str())
}

fn field_values<'a>(candidates: &[IncompleteRecord<'a>], field: Field) -> Vec<Option<&'a str>> {
    candidates.iter().map(|entry| entry.record.get(field)).collect()
}

pub struct TemplateGenerator;

impl TemplateGenerator {
    /// Template rows for every worklist candidate (no limit).
    pub fn build_frame(table: &BusinessTable) -> Result<DataFrame> {
        let candidates = DataQualityAnalyzer::worklist_candidates(table);
        let height = candidates.len();

        let source = |field: Field| field_values(&candidates, field);

        let columns: Vec<Column> = TEMPLATE_COLUMNS
            .iter()
            .map(|&name| {
                let values = match name {
                    "id" => source(Field::Id),
                    "name" => source(Field::Name),
                    "location" => source(Field::Location),
                    "category" => source(Field::Category),
                    "current_address" => source(Field::Address),
                    "current_phone" => source(Field::Phone),
                    "current_website" => source(Field::Website),
                    _ => vec![None; height],
                };
                Column::new(name.into(), values)
            })
            .collect();

        Ok(DataFrame::new(columns)?)
    }

    /// Write the blank template and return its row count.
    pub fn write(table: &BusinessTable, path: &Path) -> Result<usize> {
        let mut df = Self::build_frame(table)?;
        write_csv(&mut df, path)?;
        info!("Template saved: {} ({} rows)", path.display(), df.height());
        Ok(df.height())
    }

    /// Read a filled template.
    ///
    /// The `id` column is required; absent `NEW_` columns count as blank.
    pub fn read_filled(path: &Path) -> Result<Vec<UpdateTemplateRow>> {
        let df = read_text_csv(path)?;

        let ids = column_values(&df, Field::Id.as_str())?.ok_or_else(|| {
            EnrichmentError::MissingColumn(
                Field::Id.as_str().to_string(),
                path.display().to_string(),
            )
        })?;

        let mut rows: Vec<UpdateTemplateRow> = ids
            .into_iter()
            .map(|id| UpdateTemplateRow::new(id.unwrap_or_default()))
            .collect();

        for field in Field::UPDATABLE {
            let column = new_value_column(field);
            let Some(values) = column_values(&df, &column)? else {
                warn!("Template {} has no {} column", path.display(), column);
                continue;
            };
            for (row, value) in rows.iter_mut().zip(values) {
                row.set(field, value);
            }
        }

        info!("Read {} template rows from {}", rows.len(), path.display());
        Ok(rows)
    }
}
