//! Writing the listing table back to CSV.

use crate::error::{Result, ResultExt};
use crate::types::BusinessTable;
use polars::prelude::*;
use std::fs::{self, File};
use std::path::Path;
use tracing::info;

/// Convert the table into a DataFrame in table column order.
///
/// Missing values become nulls, which the CSV writer emits as empty cells.
pub fn table_to_dataframe(table: &BusinessTable) -> Result<DataFrame> {
    let columns: Vec<Column> = table
        .columns()
        .iter()
        .map(|name| {
            let values: Vec<Option<&str>> = table
                .records()
                .iter()
                .map(|record| record.value_for_column(name))
                .collect();
            Column::new(name.as_str().into(), values)
        })
        .collect();

    Ok(DataFrame::new(columns)?)
}

/// Write a DataFrame as CSV, replacing any previous file.
pub fn write_csv(df: &mut DataFrame, path: &Path) -> Result<()> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
    }

    let mut file = File::create(path).context(format!("Creating {}", path.display()))?;

    CsvWriter::new(&mut file)
        .include_header(true)
        .with_separator(b',')
        .with_quote_char(b'"')
        .finish(df)
        .context(format!("Writing {}", path.display()))?;

    Ok(())
}

/// Persist the updated table.
pub fn save_business_table(table: &BusinessTable, path: &Path) -> Result<()> {
    let mut df = table_to_dataframe(table)?;
    write_csv(&mut df, path)?;
    info!("Updated data saved: {}", path.display());
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::storage::load_business_table;
    use crate::types::{BusinessRecord, Field};
    use pretty_assertions::assert_eq;

    #[test]
    fn test_dataframe_shape_follows_columns() {
        let table = BusinessTable::from_records(vec![
            BusinessRecord::new("a1").with(Field::Name, "Bakery"),
            BusinessRecord::new("a2"),
        ]);

        let df = table_to_dataframe(&table).unwrap();

        assert_eq!(df.height(), 2);
        assert_eq!(df.width(), Field::ALL.len());
        assert_eq!(df.column("address").unwrap().null_count(), 2);
    }

    #[test]
    fn test_saved_table_reloads_identically() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("output/businesses_rows_updated.csv");
        let mut record = BusinessRecord::new("a1")
            .with(Field::Name, "Hans im Glück")
            .with(Field::Location, "Kaiserslautern, Germany")
            .with(Field::Phone, "+49 631 62799007");
        record.extra.push(("slug".to_string(), Some("hans".to_string())));
        let table = BusinessTable::new(
            vec!["id".to_string(), "slug".to_string()],
            vec![record],
        );

        save_business_table(&table, &path).unwrap();
        let reloaded = load_business_table(&path).unwrap();

        assert_eq!(reloaded.columns(), table.columns());
        assert_eq!(reloaded.records(), table.records());
    }
}
