use crate::error::{Result, ResultExt};
use crate::quality::DataQualityAnalyzer;
use crate::types::{BusinessRecord, BusinessTable, Field};
use crate::utils::location_head;
use chrono::Local;
use std::fs;
use std::path::Path;
use tracing::info;

/// Categories looked up first.
pub const PRIORITY_CATEGORIES: [&str; 4] = ["healthcare", "automotive", "restaurants", "education"];

const MAPS_SEARCH_URL: &str = "https://www.google.com/maps/search/";

/// 0 for priority categories, 1 for everything else.
pub fn priority_tier(category: Option<&str>) -> u8 {
    match category {
        Some(category) if PRIORITY_CATEGORIES.contains(&category) => 0,
        _ => 1,
    }
}

/// `"<name> <location before the first comma>"`.
pub fn search_query(record: &BusinessRecord) -> String {
    let name = record.get(Field::Name).unwrap_or_default();
    let location = location_head(record.get(Field::Location).unwrap_or_default());
    format!("{} {}", name, location).trim().to_string()
}

/// One block of the search worklist.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct SearchListEntry {
    pub id: String,
    pub name: String,
    pub location: String,
    pub category: String,
    pub missing_fields: String,
    pub query: String,
}

impl SearchListEntry {
    fn from_record(record: &BusinessRecord, missing_fields: String) -> Self {
        let text = |field: Field| record.get(field).unwrap_or_default().to_string();
        Self {
            id: text(Field::Id),
            name: text(Field::Name),
            location: text(Field::Location),
            category: text(Field::Category),
            missing_fields,
            query: search_query(record),
        }
    }

    /// Google Maps search link, form-urlencoded so spaces become `+`.
    pub fn maps_url(&self) -> String {
        let encoded: String = url::form_urlencoded::byte_serialize(self.query.as_bytes()).collect();
        format!("{MAPS_SEARCH_URL}{encoded}")
    }
}

/// Builds the prioritized manual search worklist.
#[derive(Debug, Clone, Copy)]
pub struct SearchListGenerator {
    limit: usize,
}

impl SearchListGenerator {
    pub fn new(limit: usize) -> Self {
        Self { limit }
    }

    /// Worklist entries: placeholder-free incomplete records, priority
    /// categories first, table order kept within a tier, truncated to the limit.
    pub fn build_entries(&self, table: &BusinessTable) -> Vec<SearchListEntry> {
        let mut candidates = DataQualityAnalyzer::worklist_candidates(table);
        candidates.sort_by_key(|entry| priority_tier(entry.record.get(Field::Category)));

        candidates
            .into_iter()
            .take(self.limit)
            .map(|entry| SearchListEntry::from_record(entry.record, entry.missing_label()))
            .collect()
    }

    /// Render the worklist as plain text.
    pub fn render(entries: &[SearchListEntry], generated_at: &str) -> String {
        let rule = "=".repeat(80);
        let mut output = String::new();

        output.push_str(&format!("{rule}\n"));
        output.push_str("BUSINESSES NEEDING DATA - MANUAL SEARCH LIST\n");
        output.push_str(&format!("Generated: {generated_at}\n"));
        output.push_str(&format!("{rule}\n\n"));
        output.push_str("INSTRUCTIONS:\n");
        output.push_str("1. Copy the 'Search Query' into Google\n");
        output.push_str("2. Find official website and contact info\n");
        output.push_str("3. Fill data into business_updates_template.csv\n");
        output.push_str("4. Run this tool again to apply updates\n\n");
        output.push_str(&format!("{rule}\n\n"));

        for entry in entries {
            output.push_str(&format!("ID: {}\n", entry.id));
            output.push_str(&format!("Business: {}\n", entry.name));
            output.push_str(&format!("Location: {}\n", entry.location));
            output.push_str(&format!("Category: {}\n", entry.category));
            output.push_str(&format!("Missing: {}\n", entry.missing_fields));
            output.push_str(&format!("Search Query: \"{}\"\n", entry.query));
            output.push_str(&format!("Google Maps: {}\n", entry.maps_url()));
            output.push_str(&format!("{}\n\n", "-".repeat(80)));
        }

        output
    }

    /// Write the worklist to `path` and return the number of entries.
    pub fn write(&self, table: &BusinessTable, path: &Path) -> Result<usize> {
        let entries = self.build_entries(table);
        let generated_at = Local::now().format("%Y-%m-%d %H:%M").to_string();

        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent).context(format!("Creating {}", parent.display()))?;
        }
        fs::write(path, Self::render(&entries, &generated_at))
            .context(format!("Writing {}", path.display()))?;

        info!("Search list saved: {} ({} businesses)", path.display(), entries.len());
        Ok(entries.len())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    fn listing(id: &str, name: &str, category: &str) -> BusinessRecord {
        BusinessRecord::new(id)
            .with(Field::Name, name)
            .with(Field::Category, category)
            .with(Field::Location, "Kaiserslautern, Rhineland-Palatinate")
    }

    #[test]
    fn test_search_query_uses_location_before_comma() {
        let record = BusinessRecord::new("X")
            .with(Field::Name, "GTÜ Schönaich")
            .with(Field::Location, "Schönaich, Germany");
        assert_eq!(search_query(&record), "GTÜ Schönaich Schönaich");

        let record = BusinessRecord::new("X")
            .with(Field::Name, "NKD")
            .with(Field::Location, "Ramstein");
        assert_eq!(search_query(&record), "NKD Ramstein");
    }

    #[test]
    fn test_search_query_with_missing_location() {
        let record = BusinessRecord::new("X").with(Field::Name, "NKD");
        assert_eq!(search_query(&record), "NKD");
    }

    #[test]
    fn test_priority_tier() {
        assert_eq!(priority_tier(Some("healthcare")), 0);
        assert_eq!(priority_tier(Some("education")), 0);
        assert_eq!(priority_tier(Some("shopping")), 1);
        assert_eq!(priority_tier(Some("Healthcare")), 1);
        assert_eq!(priority_tier(None), 1);
    }

    #[test]
    fn test_priority_tiers_are_stable() {
        let table = BusinessTable::from_records(vec![
            listing("1", "Boutique", "shopping"),
            listing("2", "Dr. Klein", "healthcare"),
            listing("3", "Friseur", "services"),
            listing("4", "Autohaus", "automotive"),
            listing("5", "Vet Needed", "healthcare"),
        ]);

        let ids: Vec<_> = SearchListGenerator::new(50)
            .build_entries(&table)
            .into_iter()
            .map(|entry| entry.id)
            .collect();

        assert_eq!(ids, vec!["2", "4", "1", "3"]);
    }

    #[test]
    fn test_limit_truncates_after_sorting() {
        let table = BusinessTable::from_records(vec![
            listing("1", "Boutique", "shopping"),
            listing("2", "Dr. Klein", "healthcare"),
            listing("3", "Autohaus", "automotive"),
        ]);

        let entries = SearchListGenerator::new(2).build_entries(&table);

        assert_eq!(entries.len(), 2);
        assert!(entries.iter().all(|entry| entry.category != "shopping"));
    }

    #[test]
    fn test_complete_records_are_not_listed() {
        let table = BusinessTable::from_records(vec![
            listing("1", "Boutique", "shopping")
                .with(Field::Address, "Main St")
                .with(Field::Phone, "1")
                .with(Field::Website, "https://b.de"),
        ]);

        assert!(SearchListGenerator::new(50).build_entries(&table).is_empty());
    }

    #[test]
    fn test_maps_url_encodes_query() {
        let entry = SearchListEntry {
            id: "X".to_string(),
            name: "Hans im Glück".to_string(),
            location: "Kaiserslautern".to_string(),
            category: "restaurants".to_string(),
            missing_fields: "phone".to_string(),
            query: "Hans im Glück Kaiserslautern".to_string(),
        };

        assert_eq!(
            entry.maps_url(),
            "https://www.google.com/maps/search/Hans+im+Gl%C3%BCck+Kaiserslautern"
        );
    }

    #[test]
    fn test_render_block() {
        let table = BusinessTable::from_records(vec![
            BusinessRecord::new("X")
                .with(Field::Name, "NKD")
                .with(Field::Category, "shopping")
                .with(Field::Location, "Ramstein, Germany")
                .with(Field::Phone, "123"),
        ]);
        let entries = SearchListGenerator::new(50).build_entries(&table);

        let text = SearchListGenerator::render(&entries, "2026-10-19 09:30");

        assert!(text.starts_with(&"=".repeat(80)));
        assert!(text.contains("Generated: 2026-10-19 09:30\n"));
        assert!(text.contains("INSTRUCTIONS:\n1. Copy the 'Search Query' into Google\n"));
        assert!(text.contains(
            "ID: X\nBusiness: NKD\nLocation: Ramstein, Germany\nCategory: shopping\n\
             Missing: address, website\nSearch Query: \"NKD Ramstein\"\n\
             Google Maps: https://www.google.com/maps/search/NKD+Ramstein\n"
        ));
    }

    #[test]
    fn test_write_returns_count() {
        let dir = tempfile::tempdir().unwrap();
        let path = dir.path().join("out/businesses_to_search.txt");
        let table = BusinessTable::from_records(vec![
            listing("1", "Boutique", "shopping"),
            listing("2", "Dr. Klein", "healthcare"),
        ]);

        let count = SearchListGenerator::new(1).write(&table, &path).unwrap();

        assert_eq!(count, 1);
        let text = fs::read_to_string(&path).unwrap();
        assert!(text.contains("Business: Dr. Klein"));
        assert!(!text.contains("Business: Boutique"));
    }
}
