use crate::error::EnrichmentError;
use crate::utils::{is_flag_set, non_blank};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;
use std::str::FromStr;

// ============================================================================
// Fields
// ============================================================================

/// A known column of the business listing table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Field {
    Id,
    Name,
    Category,
    Location,
    Address,
    Phone,
    Website,
    Email,
    Verified,
    Featured,
    Status,
}

impl Field {
    /// Every known field, in the canonical column order of the listing export.
    pub const ALL: [Field; 11] = [
        Field::Id,
        Field::Name,
        Field::Category,
        Field::Location,
        Field::Address,
        Field::Phone,
        Field::Website,
        Field::Email,
        Field::Verified,
        Field::Featured,
        Field::Status,
    ];

    /// Contact fields that decide whether a record is complete, in label order.
    pub const COMPLETENESS: [Field; 3] = [Field::Address, Field::Website, Field::Phone];

    /// Fields an operator can fill in through the update template, in apply order.
    pub const UPDATABLE: [Field; 4] = [Field::Address, Field::Phone, Field::Website, Field::Email];

    /// Column name used in CSV headers and reports.
    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Id => "id",
            Self::Name => "name",
            Self::Category => "category",
            Self::Location => "location",
            Self::Address => "address",
            Self::Phone => "phone",
            Self::Website => "website",
            Self::Email => "email",
            Self::Verified => "verified",
            Self::Featured => "featured",
            Self::Status => "status",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Field {
    type Err = EnrichmentError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Field::ALL
            .into_iter()
            .find(|field| field.as_str() == s)
            .ok_or_else(|| EnrichmentError::UnknownField(s.to_string()))
    }
}

/// Join field names with `", "`, e.g. `"address, website"`.
pub fn join_fields(fields: &[Field]) -> String {
    fields
        .iter()
        .map(Field::as_str)
        .collect::<Vec<_>>()
        .join(", ")
}

// ============================================================================
// Records
// ============================================================================

/// One business listing.
///
/// Every cell is an `Option<String>`: `None` is the missing sentinel and is
/// never conflated with a present value. Columns that are not [`Field`]s are
/// carried in `extra` so the table can be written back with its original
/// schema.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BusinessRecord {
    pub id: Option<String>,
    pub name: Option<String>,
    pub category: Option<String>,
    pub location: Option<String>,
    pub address: Option<String>,
    pub phone: Option<String>,
    pub website: Option<String>,
    pub email: Option<String>,
    pub verified: Option<String>,
    pub featured: Option<String>,
    pub status: Option<String>,
    #[serde(default, skip_serializing_if = "Vec::is_empty")]
    pub extra: Vec<(String, Option<String>)>,
}

impl BusinessRecord {
    /// Create a record with only its identifier set.
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: Some(id.into()),
            ..Default::default()
        }
    }

    /// Builder-style setter, mostly useful for fixtures.
    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    fn slot(&self, field: Field) -> &Option<String> {
        match field {
            Field::Id => &self.id,
            Field::Name => &self.name,
            Field::Category => &self.category,
            Field::Location => &self.location,
            Field::Address => &self.address,
            Field::Phone => &self.phone,
            Field::Website => &self.website,
            Field::Email => &self.email,
            Field::Verified => &self.verified,
            Field::Featured => &self.featured,
            Field::Status => &self.status,
        }
    }

    fn slot_mut(&mut self, field: Field) -> &mut Option<String> {
        match field {
            Field::Id => &mut self.id,
            Field::Name => &mut self.name,
            Field::Category => &mut self.category,
            Field::Location => &mut self.location,
            Field::Address => &mut self.address,
            Field::Phone => &mut self.phone,
            Field::Website => &mut self.website,
            Field::Email => &mut self.email,
            Field::Verified => &mut self.verified,
            Field::Featured => &mut self.featured,
            Field::Status => &mut self.status,
        }
    }

    pub fn get(&self, field: Field) -> Option<&str> {
        self.slot(field).as_deref()
    }

    pub fn set(&mut self, field: Field, value: Option<String>) {
        *self.slot_mut(field) = value;
    }

    pub fn is_missing(&self, field: Field) -> bool {
        self.slot(field).is_none()
    }

    /// Value of an arbitrary column, known field or extra.
    pub fn value_for_column(&self, column: &str) -> Option<&str> {
        match column.parse::<Field>() {
            Ok(field) => self.get(field),
            Err(_) => self
                .extra
                .iter()
                .find(|(name, _)| name == column)
                .and_then(|(_, value)| value.as_deref()),
        }
    }

    /// Fields among [`Field::COMPLETENESS`] that are missing, in label order.
    pub fn missing_contact_fields(&self) -> Vec<Field> {
        Field::COMPLETENESS
            .into_iter()
            .filter(|field| self.is_missing(*field))
            .collect()
    }

    pub fn is_verified(&self) -> bool {
        self.verified.as_deref().is_some_and(is_flag_set)
    }

    pub fn is_featured(&self) -> bool {
        self.featured.as_deref().is_some_and(is_flag_set)
    }

    /// Name for log lines; falls back to the identifier.
    pub fn display_name(&self) -> &str {
        self.name
            .as_deref()
            .or(self.id.as_deref())
            .unwrap_or("<unnamed>")
    }
}

/// The in-memory listing table.
///
/// Column order follows the source file; known fields that the source did
/// not carry are appended so every output has the full schema.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct BusinessTable {
    columns: Vec<String>,
    records: Vec<BusinessRecord>,
}

impl Default for BusinessTable {
    fn default() -> Self {
        Self::from_records(Vec::new())
    }
}

impl BusinessTable {
    pub fn new(columns: Vec<String>, records: Vec<BusinessRecord>) -> Self {
        let mut columns = columns;
        for field in Field::ALL {
            if !columns.iter().any(|c| c == field.as_str()) {
                columns.push(field.as_str().to_string());
            }
        }
        Self { columns, records }
    }

    /// Table with the canonical column set.
    pub fn from_records(records: Vec<BusinessRecord>) -> Self {
        Self::new(Vec::new(), records)
    }

    pub fn columns(&self) -> &[String] {
        &self.columns
    }

    pub fn records(&self) -> &[BusinessRecord] {
        &self.records
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    /// Position of the first record with this identifier.
    pub fn position(&self, id: &str) -> Option<usize> {
        self.records
            .iter()
            .position(|record| record.id.as_deref() == Some(id))
    }

    pub fn find(&self, id: &str) -> Option<&BusinessRecord> {
        self.position(id).map(|idx| &self.records[idx])
    }

    pub fn find_mut(&mut self, id: &str) -> Option<&mut BusinessRecord> {
        self.position(id).map(move |idx| &mut self.records[idx])
    }
}

// ============================================================================
// Corrections and updates
// ============================================================================

/// A manual correction: field overrides for one identifier.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CorrectionEntry {
    pub id: String,
    pub fields: Vec<(Field, String)>,
}

impl CorrectionEntry {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            fields: Vec::new(),
        }
    }

    pub fn set(mut self, field: Field, value: impl Into<String>) -> Self {
        self.fields.push((field, value.into()));
        self
    }
}

/// One row of a filled-in update template.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct UpdateTemplateRow {
    pub id: String,
    pub new_address: Option<String>,
    pub new_phone: Option<String>,
    pub new_website: Option<String>,
    pub new_email: Option<String>,
}

impl UpdateTemplateRow {
    pub fn new(id: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            ..Default::default()
        }
    }

    pub fn with(mut self, field: Field, value: impl Into<String>) -> Self {
        self.set(field, Some(value.into()));
        self
    }

    /// Set the proposed value for an updatable field; other fields are ignored.
    pub fn set(&mut self, field: Field, value: Option<String>) {
        match field {
            Field::Address => self.new_address = value,
            Field::Phone => self.new_phone = value,
            Field::Website => self.new_website = value,
            Field::Email => self.new_email = value,
            _ => {}
        }
    }

    /// The operator-supplied value for `field`, trimmed, if it is non-blank.
    pub fn proposed(&self, field: Field) -> Option<&str> {
        let raw = match field {
            Field::Address => self.new_address.as_deref(),
            Field::Phone => self.new_phone.as_deref(),
            Field::Website => self.new_website.as_deref(),
            Field::Email => self.new_email.as_deref(),
            _ => None,
        };
        non_blank(raw)
    }
}

// ============================================================================
// Analysis results
// ============================================================================

/// A record missing at least one contact field.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct IncompleteRecord<'a> {
    pub record: &'a BusinessRecord,
    pub missing: Vec<Field>,
}

impl IncompleteRecord<'_> {
    /// `missing_fields` label, e.g. `"address, website"`.
    pub fn missing_label(&self) -> String {
        join_fields(&self.missing)
    }
}

/// Aggregate data quality statistics over the current table.
///
/// Field order matches the keys of the persisted JSON.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct DataQualityStats {
    pub total_businesses: usize,
    pub missing_address: usize,
    pub missing_phone: usize,
    pub missing_website: usize,
    pub missing_email: usize,
    pub placeholder_entries: usize,
    pub verified_businesses: usize,
    pub featured_businesses: usize,
    pub address_completion: String,
    pub phone_completion: String,
    pub website_completion: String,
    pub email_completion: String,
}

impl DataQualityStats {
    /// `(label, value)` pairs for console output, in JSON key order.
    pub fn display_rows(&self) -> Vec<(&'static str, String)> {
        vec![
            ("Total Businesses", self.total_businesses.to_string()),
            ("Missing Address", self.missing_address.to_string()),
            ("Missing Phone", self.missing_phone.to_string()),
            ("Missing Website", self.missing_website.to_string()),
            ("Missing Email", self.missing_email.to_string()),
            ("Placeholder Entries", self.placeholder_entries.to_string()),
            ("Verified Businesses", self.verified_businesses.to_string()),
            ("Featured Businesses", self.featured_businesses.to_string()),
            ("Address Completion", self.address_completion.clone()),
            ("Phone Completion", self.phone_completion.clone()),
            ("Website Completion", self.website_completion.clone()),
            ("Email Completion", self.email_completion.clone()),
        ]
    }
}

/// Fields changed on one record during reconciliation.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RecordChange {
    pub id: String,
    pub name: String,
    pub fields: Vec<Field>,
}

/// Outcome of merging a filled template into the table.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct ReconciliationReport {
    pub changes: Vec<RecordChange>,
    /// Template rows whose identifier matched no record.
    pub unmatched_rows: usize,
}

impl ReconciliationReport {
    /// Number of records with at least one changed field.
    pub fn updated_records(&self) -> usize {
        self.changes.len()
    }
}

// ============================================================================
// Run Summary
// ============================================================================

/// Everything one enrichment run did, for the CLI summary and callers.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EnrichmentSummary {
    pub records_loaded: usize,
    pub corrections_applied: usize,
    /// Statistics after corrections, before any template updates.
    pub stats_before: DataQualityStats,
    pub search_list_count: usize,
    pub template_rows: usize,
    /// `None` when no filled template was present.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub reconciliation: Option<ReconciliationReport>,
    /// Statistics of the persisted table.
    pub stats_after: DataQualityStats,
    /// Files written by the run, in write order.
    pub artifacts: Vec<PathBuf>,
    pub duration_ms: u64,
}

impl EnrichmentSummary {
    pub fn updates_applied(&self) -> usize {
        self.reconciliation
            .as_ref()
            .map(ReconciliationReport::updated_records)
            .unwrap_or(0)
    }
}
