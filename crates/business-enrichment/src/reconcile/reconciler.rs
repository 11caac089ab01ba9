use crate::types::{
    BusinessTable, Field, ReconciliationReport, RecordChange, UpdateTemplateRow, join_fields,
};
use tracing::{debug, info};

/// Merge template rows into a copy of `table`.
///
/// Leaves the input untouched and returns the updated table with a report of
/// what changed. See [`apply_updates`] for the overwrite rules.
pub fn reconcile(
    table: &BusinessTable,
    rows: &[UpdateTemplateRow],
) -> (BusinessTable, ReconciliationReport) {
    let mut updated = table.clone();
    let report = apply_updates(&mut updated, rows);
    (updated, report)
}

/// Merge template rows into `table` in place.
///
/// Rows are matched to the first record with the same identifier; rows with
/// a blank or unknown identifier are skipped. A field is overwritten only
/// when its `NEW_` value is non-blank after trimming, and the trimmed value
/// is stored. Applying the same rows twice gives the same table.
pub fn apply_updates(table: &mut BusinessTable, rows: &[UpdateTemplateRow]) -> ReconciliationReport {
    let mut report = ReconciliationReport::default();

    for row in rows {
        let id = row.id.trim();
        if id.is_empty() {
            continue;
        }

        let Some(record) = table.find_mut(id) else {
            debug!("No record with id {}, template row skipped", id);
            report.unmatched_rows += 1;
            continue;
        };

        let mut fields = Vec::new();
        for field in Field::UPDATABLE {
            if let Some(value) = row.proposed(field) {
                record.set(field, Some(value.to_string()));
                fields.push(field);
            }
        }

        if fields.is_empty() {
            continue;
        }

        info!("{}: {}", record.display_name(), join_fields(&fields));
        report.changes.push(RecordChange {
            id: id.to_string(),
            name: record.display_name().to_string(),
            fields,
        });
    }

    info!("Applied {} updates from template", report.updated_records());
    report
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::BusinessRecord;
    use pretty_assertions::assert_eq;

    fn base() -> BusinessTable {
        BusinessTable::from_records(vec![
            BusinessRecord::new("A")
                .with(Field::Name, "Bakery")
                .with(Field::Address, "A St"),
            BusinessRecord::new("B").with(Field::Name, "Garage"),
        ])
    }

    #[test]
    fn test_blank_new_value_never_overwrites() {
        let rows = vec![UpdateTemplateRow::new("A").with(Field::Address, "   ")];

        let (table, report) = reconcile(&base(), &rows);

        assert_eq!(table.find("A").unwrap().get(Field::Address), Some("A St"));
        assert_eq!(report.updated_records(), 0);
    }

    #[test]
    fn test_non_blank_values_apply_including_email() {
        let rows = vec![
            UpdateTemplateRow::new("B")
                .with(Field::Phone, " +49 631 123 ")
                .with(Field::Email, "info@garage.de"),
        ];

        let (table, report) = reconcile(&base(), &rows);

        let record = table.find("B").unwrap();
        assert_eq!(record.get(Field::Phone), Some("+49 631 123"));
        assert_eq!(record.get(Field::Email), Some("info@garage.de"));
        assert_eq!(
            report.changes,
            vec![RecordChange {
                id: "B".to_string(),
                name: "Garage".to_string(),
                fields: vec![Field::Phone, Field::Email],
            }]
        );
    }

    #[test]
    fn test_reconcile_leaves_input_untouched() {
        let original = base();
        let rows = vec![UpdateTemplateRow::new("A").with(Field::Website, "https://bakery.de")];

        let (updated, _) = reconcile(&original, &rows);

        assert!(original.find("A").unwrap().is_missing(Field::Website));
        assert_eq!(updated.find("A").unwrap().get(Field::Website), Some("https://bakery.de"));
    }

    #[test]
    fn test_reconcile_is_idempotent() {
        let rows = vec![
            UpdateTemplateRow::new("A").with(Field::Phone, "1"),
            UpdateTemplateRow::new("B")
                .with(Field::Address, "B St")
                .with(Field::Website, "https://garage.de"),
        ];

        let (once, _) = reconcile(&base(), &rows);
        let (twice, _) = reconcile(&once, &rows);

        assert_eq!(once, twice);
    }

    #[test]
    fn test_unmatched_and_blank_ids_are_skipped() {
        let rows = vec![
            UpdateTemplateRow::new("Z").with(Field::Phone, "1"),
            UpdateTemplateRow::new("").with(Field::Phone, "2"),
        ];

        let (table, report) = reconcile(&base(), &rows);

        assert_eq!(table, base());
        assert_eq!(report.updated_records(), 0);
        assert_eq!(report.unmatched_rows, 1);
    }

    #[test]
    fn test_duplicate_ids_update_first_record() {
        let mut records = base().records().to_vec();
        records.push(BusinessRecord::new("A").with(Field::Name, "Second Bakery"));
        let table = BusinessTable::from_records(records);

        let rows = vec![UpdateTemplateRow::new("A").with(Field::Phone, "1")];
        let (updated, _) = reconcile(&table, &rows);

        assert_eq!(updated.records()[0].get(Field::Phone), Some("1"));
        assert!(updated.records()[2].is_missing(Field::Phone));
    }
}
