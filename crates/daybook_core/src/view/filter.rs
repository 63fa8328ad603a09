//! Pure record filters.
//!
//! # Responsibility
//! - Narrow a record sequence by category, date range, or text query.
//!
//! # Invariants
//! - Input order is preserved.
//! - A blank text query returns the input unchanged.

use crate::model::record::Record;
use crate::stats::Window;
use once_cell::sync::Lazy;
use regex::Regex;

static WHITESPACE_RE: Lazy<Regex> = Lazy::new(|| Regex::new(r"\s+").expect("valid ws regex"));

/// Records filed under `category_id`, input order kept.
pub fn by_category(records: &[Record], category_id: &str) -> Vec<Record> {
    records
        .iter()
        .filter(|record| record.category == category_id)
        .cloned()
        .collect()
}

/// Records whose timestamp falls in the half-open window `[start, end)`.
///
/// Filtering an already-filtered sequence by the same window returns an
/// identical sequence.
pub fn by_date_range(records: &[Record], window: Window) -> Vec<Record> {
    records
        .iter()
        .filter(|record| window.contains(record.recorded_at))
        .cloned()
        .collect()
}

/// Records whose note or tags contain `query`, case-insensitively.
///
/// Query whitespace is collapsed before matching; a query that is blank
/// after normalization returns the input unchanged.
pub fn by_text_match(records: &[Record], query: &str) -> Vec<Record> {
    let Some(needle) = normalize_query(query) else {
        return records.to_vec();
    };

    records
        .iter()
        .filter(|record| {
            record.note.to_lowercase().contains(&needle)
                || record.tags.iter().any(|tag| tag.contains(&needle))
        })
        .cloned()
        .collect()
}

/// Lowercases and collapses query whitespace; `None` for blank input.
fn normalize_query(query: &str) -> Option<String> {
    let collapsed = WHITESPACE_RE.replace_all(query.trim(), " ").to_lowercase();
    if collapsed.is_empty() {
        None
    } else {
        Some(collapsed)
    }
}

#[cfg(test)]
mod tests {
    use super::normalize_query;

    #[test]
    fn normalize_query_collapses_whitespace_and_lowercases() {
        assert_eq!(
            normalize_query("  Sunny\t\n day "),
            Some("sunny day".to_string())
        );
    }

    #[test]
    fn normalize_query_rejects_blank_input() {
        assert_eq!(normalize_query(""), None);
        assert_eq!(normalize_query(" \t\n"), None);
    }
}
