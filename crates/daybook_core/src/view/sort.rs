//! Stable record sorting.
//!
//! # Responsibility
//! - Order record sequences by caller-chosen keys for list screens.
//!
//! # Invariants
//! - Sorting is stable: equal keys keep their relative input order.
//! - Records missing the named measurement sort after records that have
//!   it, in either direction.

use crate::model::record::Record;
use std::cmp::Ordering;

/// Key a record sequence can be ordered by.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SortKey {
    /// Entry timestamp.
    RecordedAt,
    /// Category slug, lexicographic.
    Category,
    /// Named numeric measurement; absent values rank last.
    Measurement(String),
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SortDirection {
    Ascending,
    Descending,
}

/// Returns a new sequence ordered by `key` in `direction`.
pub fn sort_by(records: &[Record], key: &SortKey, direction: SortDirection) -> Vec<Record> {
    let mut sorted = records.to_vec();
    sorted.sort_by(|a, b| compare(a, b, key, direction));
    sorted
}

fn compare(a: &Record, b: &Record, key: &SortKey, direction: SortDirection) -> Ordering {
    match key {
        SortKey::RecordedAt => directed(a.recorded_at.cmp(&b.recorded_at), direction),
        SortKey::Category => directed(a.category.cmp(&b.category), direction),
        SortKey::Measurement(name) => {
            // Absent measurements rank last regardless of direction, so
            // the direction flip happens before the None handling.
            match (a.measurement(name), b.measurement(name)) {
                (Some(lhs), Some(rhs)) => directed(lhs.total_cmp(&rhs), direction),
                (Some(_), None) => Ordering::Less,
                (None, Some(_)) => Ordering::Greater,
                (None, None) => Ordering::Equal,
            }
        }
    }
}

fn directed(ordering: Ordering, direction: SortDirection) -> Ordering {
    match direction {
        SortDirection::Ascending => ordering,
        SortDirection::Descending => ordering.reverse(),
    }
}
