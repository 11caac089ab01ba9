use crate::types::{BusinessTable, DataQualityStats, Field, IncompleteRecord};
use crate::utils::{completion_percentage, is_excluded_from_worklist, is_placeholder_name};
use tracing::debug;

pub struct DataQualityAnalyzer;

impl DataQualityAnalyzer {
    /// Records missing at least one of address, website or phone, in table order.
    pub fn identify_incomplete(table: &BusinessTable) -> Vec<IncompleteRecord<'_>> {
        let incomplete: Vec<IncompleteRecord<'_>> = table
            .records()
            .iter()
            .filter_map(|record| {
                let missing = record.missing_contact_fields();
                (!missing.is_empty()).then_some(IncompleteRecord { record, missing })
            })
            .collect();

        debug!(
            "{} of {} records are missing contact data",
            incomplete.len(),
            table.len()
        );
        incomplete
    }

    /// Incomplete records that are real businesses worth looking up.
    ///
    /// Placeholder listings ("Dentist Needed", "Seeking ...",
    /// "English-Speaking ...") are dropped.
    pub fn worklist_candidates(table: &BusinessTable) -> Vec<IncompleteRecord<'_>> {
        Self::identify_incomplete(table)
            .into_iter()
            .filter(|entry| !is_excluded_from_worklist(entry.record.get(Field::Name)))
            .collect()
    }

    pub fn compute_statistics(table: &BusinessTable) -> DataQualityStats {
        let records = table.records();
        let total = records.len();
        let missing = |field: Field| records.iter().filter(|r| r.is_missing(field)).count();

        let missing_address = missing(Field::Address);
        let missing_phone = missing(Field::Phone);
        let missing_website = missing(Field::Website);
        let missing_email = missing(Field::Email);

        DataQualityStats {
            total_businesses: total,
            missing_address,
            missing_phone,
            missing_website,
            missing_email,
            placeholder_entries: records
                .iter()
                .filter(|r| is_placeholder_name(r.get(Field::Name)))
                .count(),
            verified_businesses: records.iter().filter(|r| r.is_verified()).count(),
            featured_businesses: records.iter().filter(|r| r.is_featured()).count(),
            address_completion: completion_percentage(total, missing_address),
            phone_completion: completion_percentage(total, missing_phone),
            website_completion: completion_percentage(total, missing_website),
            email_completion: completion_percentage(total, missing_email),
        }
    }
}
