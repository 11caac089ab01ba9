//! Shared utilities for the enrichment workflow.
//!
//! Cell normalization, flag parsing, placeholder detection and the small
//! formatting helpers used by both the analyzer and the report writers.

use once_cell::sync::Lazy;
use regex::Regex;

// =============================================================================
// Cell Utilities
// =============================================================================

/// Normalize a raw CSV cell into the missing-sentinel model.
///
/// Absent cells and cells that are empty after trimming become `None`;
/// anything else is kept as read.
pub fn normalize_cell(raw: Option<&str>) -> Option<String> {
    match raw {
        Some(value) if !value.trim().is_empty() => Some(value.to_string()),
        _ => None,
    }
}

/// Trimmed value when present and non-blank.
pub fn non_blank(raw: Option<&str>) -> Option<&str> {
    raw.map(str::trim).filter(|value| !value.is_empty())
}

// =============================================================================
// Flag Utilities
// =============================================================================

/// Representations of a set status flag (`verified`, `featured`).
pub const FLAG_TRUE_VALUES: [&str; 5] = ["true", "t", "yes", "y", "1"];

/// Check if a cell represents a set flag.
pub fn is_flag_set(s: &str) -> bool {
    let lower = s.trim().to_ascii_lowercase();
    FLAG_TRUE_VALUES.iter().any(|&v| v == lower)
}

// =============================================================================
// Placeholder Detection
// =============================================================================

/// Names of stand-in listings, counted in the statistics.
static PLACEHOLDER_PATTERN: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"(?i)need|needed|seeking").expect("Invalid regex: placeholder"));

/// Names excluded from the outreach worklist and the update template.
static WORKLIST_EXCLUSION_PATTERN: Lazy<Regex> = Lazy::new(|| {
    Regex::new(r"(?i)need|needed|seeking|english-speaking")
        .expect("Invalid regex: worklist exclusion")
});

/// Check if a listing name marks a placeholder entry.
pub fn is_placeholder_name(name: Option<&str>) -> bool {
    name.is_some_and(|n| PLACEHOLDER_PATTERN.is_match(n))
}

/// Check if a listing name should be kept off the search worklist.
pub fn is_excluded_from_worklist(name: Option<&str>) -> bool {
    name.is_some_and(|n| WORKLIST_EXCLUSION_PATTERN.is_match(n))
}

// =============================================================================
// Formatting Utilities
// =============================================================================

/// Format `(total - missing) / total` as a one-decimal percentage.
///
/// An empty table yields `"0.0%"`.
pub fn completion_percentage(total: usize, missing: usize) -> String {
    if total == 0 {
        return "0.0%".to_string();
    }
    let present = total.saturating_sub(missing) as f64;
    format!("{:.1}%", present / total as f64 * 100.0)
}

/// Location text before the first comma, or the whole location.
pub fn location_head(location: &str) -> &str {
    match location.split_once(',') {
        Some((head, _)) => head,
        None => location,
    }
}

// =============================================================================
// Tests
// =============================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_normalize_cell() {
        assert_eq!(normalize_cell(None), None);
        assert_eq!(normalize_cell(Some("")), None);
        assert_eq!(normalize_cell(Some("   ")), None);
        assert_eq!(normalize_cell(Some("A St")), Some("A St".to_string()));
    }

    #[test]
    fn test_non_blank() {
        assert_eq!(non_blank(Some("  x ")), Some("x"));
        assert_eq!(non_blank(Some(" \t")), None);
        assert_eq!(non_blank(None), None);
    }

    #[test]
    fn test_is_flag_set() {
        assert!(is_flag_set("true"));
        assert!(is_flag_set("TRUE"));
        assert!(is_flag_set(" 1 "));
        assert!(!is_flag_set("false"));
        assert!(!is_flag_set(""));
    }

    #[test]
    fn test_placeholder_patterns() {
        assert!(is_placeholder_name(Some("Dentist Needed")));
        assert!(is_placeholder_name(Some("seeking a plumber")));
        assert!(!is_placeholder_name(Some("English-Speaking Vet")));
        assert!(is_excluded_from_worklist(Some("English-Speaking Vet")));
        assert!(!is_placeholder_name(None));
        assert!(!is_excluded_from_worklist(Some("Hans im Glück")));
    }

    #[test]
    fn test_completion_percentage() {
        assert_eq!(completion_percentage(10, 3), "70.0%");
        assert_eq!(completion_percentage(3, 1), "66.7%");
        assert_eq!(completion_percentage(0, 0), "0.0%");
        assert_eq!(completion_percentage(4, 0), "100.0%");
    }

    #[test]
    fn test_location_head() {
        assert_eq!(location_head("Ramstein, Germany"), "Ramstein");
        assert_eq!(location_head("Kaiserslautern"), "Kaiserslautern");
        assert_eq!(location_head(""), "");
    }
}
