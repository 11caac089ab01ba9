//! Loading the base dataset into a [`BusinessTable`].

use crate::error::{EnrichmentError, Result, ResultExt};
use crate::types::{BusinessRecord, BusinessTable, Field};
use crate::utils::normalize_cell;
use polars::io::csv::read::CsvReadOptions;
use polars::prelude::*;
use std::path::Path;
use tracing::{debug, info};

/// Read a CSV file with every column typed as `String`.
pub fn read_text_csv(path: &Path) -> Result<DataFrame> {
    if !path.exists() {
        return Err(EnrichmentError::InputNotFound(path.to_path_buf()));
    }

    debug!("Reading CSV file: {}", path.display());

    // A zero-row inference window reads every column as String.
    CsvReadOptions::default()
        .with_has_header(true)
        .with_infer_schema_length(Some(0))
        .with_parse_options(CsvParseOptions::default().with_quote_char(Some(b'"')))
        .try_into_reader_with_file_path(Some(path.to_path_buf()))
        .context(format!("Opening {}", path.display()))?
        .finish()
        .context(format!("Parsing {}", path.display()))
}

/// Normalized values of a column, or `None` when the column is absent.
pub fn column_values(df: &DataFrame, name: &str) -> Result<Option<Vec<Option<String>>>> {
    let Ok(column) = df.column(name) else {
        return Ok(None);
    };

    let series = column.as_materialized_series().cast(&DataType::String)?;
    let values = series.str()?.into_iter().map(normalize_cell).collect();
    Ok(Some(values))
}

/// Load the base dataset.
///
/// Fails with [`EnrichmentError::InputNotFound`] when the file is absent and
/// [`EnrichmentError::MissingColumn`] when it has no `id` column. Other known
/// columns may be absent; their values are all missing.
pub fn load_business_table(path: &Path) -> Result<BusinessTable> {
    let df = read_text_csv(path)?;

    if df.column(Field::Id.as_str()).is_err() {
        return Err(EnrichmentError::MissingColumn(
            Field::Id.as_str().to_string(),
            path.display().to_string(),
        ));
    }

    let columns: Vec<String> = df
        .get_column_names()
        .into_iter()
        .map(|name| name.to_string())
        .collect();

    let mut records = vec![BusinessRecord::default(); df.height()];

    for column in &columns {
        let Some(values) = column_values(&df, column)? else {
            continue;
        };

        match column.parse::<Field>() {
            Ok(field) => {
                for (record, value) in records.iter_mut().zip(values) {
                    record.set(field, value);
                }
            }
            Err(_) => {
                for (record, value) in records.iter_mut().zip(values) {
                    record.extra.push((column.clone(), value));
                }
            }
        }
    }

    info!("Loaded {} businesses from {}", records.len(), path.display());

    Ok(BusinessTable::new(columns, records))
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn write_fixture(dir: &Path, content: &str) -> std::path::PathBuf {
        let path = dir.join("businesses_rows.csv");
        fs::write(&path, content).unwrap();
        path
    }

    #[test]
    fn test_missing_file_is_input_not_found() {
        let dir = tempfile::tempdir().unwrap();
        let err = load_business_table(&dir.path().join("absent.csv")).unwrap_err();
        assert!(err.is_input_not_found());
    }

    #[test]
    fn test_empty_cells_become_missing() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(
            dir.path(),
            "id,name,category,location,address,phone,website,email,verified,featured,status\n\
             a1,Bäckerei Müller,restaurants,\"Landstuhl, Germany\",,06371 1234,,,true,false,active\n",
        );

        let table = load_business_table(&path).unwrap();
        let record = &table.records()[0];

        assert_eq!(record.get(Field::Name), Some("Bäckerei Müller"));
        assert_eq!(record.get(Field::Location), Some("Landstuhl, Germany"));
        assert!(record.is_missing(Field::Address));
        assert!(record.is_missing(Field::Website));
        assert_eq!(record.get(Field::Phone), Some("06371 1234"));
        assert!(record.is_verified());
    }

    #[test]
    fn test_extra_columns_are_preserved_in_order() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "id,slug,name\na1,baeckerei,Bakery\n");

        let table = load_business_table(&path).unwrap();

        assert_eq!(&table.columns()[..3], &["id", "slug", "name"]);
        assert_eq!(
            table.records()[0].value_for_column("slug"),
            Some("baeckerei")
        );
        assert!(table.records()[0].is_missing(Field::Email));
    }

    #[test]
    fn test_missing_id_column_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        let path = write_fixture(dir.path(), "name,address\nBakery,Main St\n");

        let err = load_business_table(&path).unwrap_err();
        assert_eq!(err.error_code(), "MISSING_COLUMN");
    }
}
