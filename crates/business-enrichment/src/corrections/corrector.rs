use crate::corrections::known_corrections;
use crate::types::{BusinessTable, CorrectionEntry};
use tracing::{debug, info};

/// Applies an ordered set of [`CorrectionEntry`] values to a table.
///
/// Listed fields are overwritten unconditionally. Entries whose identifier
/// matches no record are skipped. When several entries share an identifier
/// they are applied in order, so the last one wins per field.
#[derive(Debug, Clone)]
pub struct Corrector {
    entries: Vec<CorrectionEntry>,
}

impl Default for Corrector {
    fn default() -> Self {
        Self::new(known_corrections())
    }
}

impl Corrector {
    pub fn new(entries: Vec<CorrectionEntry>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[CorrectionEntry] {
        &self.entries
    }

    /// Apply every entry and return how many matched a record.
    pub fn apply(&self, table: &mut BusinessTable) -> usize {
        let mut applied = 0;

        for entry in &self.entries {
            let Some(record) = table.find_mut(&entry.id) else {
                debug!("No record with id {}, correction skipped", entry.id);
                continue;
            };

            for (field, value) in &entry.fields {
                record.set(*field, Some(value.clone()));
            }

            info!("Updated: {}", record.display_name());
            applied += 1;
        }

        info!("Applied {} corrections", applied);
        applied
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::types::{BusinessRecord, Field};
    use pretty_assertions::assert_eq;

    fn table() -> BusinessTable {
        BusinessTable::from_records(vec![
            BusinessRecord::new("X").with(Field::Name, "Bakery"),
            BusinessRecord::new("Y")
                .with(Field::Name, "Garage")
                .with(Field::Address, "Old St 1"),
        ])
    }

    #[test]
    fn test_correction_sets_missing_field_and_counts() {
        let mut table = table();
        let corrector = Corrector::new(vec![
            CorrectionEntry::new("Y").set(Field::Website, "https://a.com"),
        ]);

        let applied = corrector.apply(&mut table);

        assert_eq!(applied, 1);
        assert_eq!(table.find("Y").unwrap().get(Field::Website), Some("https://a.com"));
    }

    #[test]
    fn test_correction_overwrites_present_value() {
        let mut table = table();
        let corrector = Corrector::new(vec![
            CorrectionEntry::new("Y").set(Field::Address, "New St 2"),
        ]);

        corrector.apply(&mut table);

        assert_eq!(table.find("Y").unwrap().get(Field::Address), Some("New St 2"));
    }

    #[test]
    fn test_unknown_id_is_a_no_op() {
        let mut table = table();
        let before = table.clone();
        let corrector = Corrector::new(vec![
            CorrectionEntry::new("Z").set(Field::Website, "https://z.com"),
        ]);

        assert_eq!(corrector.apply(&mut table), 0);
        assert_eq!(table, before);
    }

    #[test]
    fn test_later_entry_wins_for_same_id() {
        let mut table = table();
        let corrector = Corrector::new(vec![
            CorrectionEntry::new("X")
                .set(Field::Phone, "111")
                .set(Field::Email, "a@x.de"),
            CorrectionEntry::new("X").set(Field::Phone, "222"),
        ]);

        assert_eq!(corrector.apply(&mut table), 2);
        let record = table.find("X").unwrap();
        assert_eq!(record.get(Field::Phone), Some("222"));
        assert_eq!(record.get(Field::Email), Some("a@x.de"));
    }

    #[test]
    fn test_untouched_fields_stay() {
        let mut table = table();
        Corrector::new(vec![CorrectionEntry::new("Y").set(Field::Phone, "1")]).apply(&mut table);

        let record = table.find("Y").unwrap();
        assert_eq!(record.get(Field::Name), Some("Garage"));
        assert_eq!(record.get(Field::Address), Some("Old St 1"));
    }
}
