//! Aggregation functions over record sequences.
//!
//! # Responsibility
//! - Turn a record snapshot into the derived numbers dashboard screens
//!   render: category counts and shares, entry frequency, measurement
//!   deltas, calendar-day groupings, growth leaderboards.
//!
//! # Invariants
//! - Inputs are treated as immutable snapshots; nothing here mutates a
//!   record.
//! - Empty input returns the documented empty value, never an error.
//! - "Insufficient data" (`None`) stays distinct from "no change"
//!   (`Some(0.0)`).

use crate::model::record::Record;
use crate::stats::window::Window;
use chrono::{FixedOffset, NaiveDate, TimeZone, Utc};
use std::collections::{BTreeMap, BTreeSet};

/// One row of a per-category delta leaderboard.
#[derive(Debug, Clone, PartialEq)]
pub struct Leader {
    /// Category slug.
    pub category: String,
    /// `last - first` of the ranked measurement inside the window.
    pub delta: f64,
    /// Number of in-window records carrying the measurement.
    pub samples: usize,
}

/// Maps an epoch-millisecond timestamp to its calendar day in `tz`.
///
/// Returns `None` only for timestamps outside chrono's representable
/// range, which validated records never hit.
pub fn local_day(ts_ms: i64, tz: FixedOffset) -> Option<NaiveDate> {
    Utc.timestamp_millis_opt(ts_ms)
        .single()
        .map(|instant| instant.with_timezone(&tz).date_naive())
}

/// Record count per category slug.
///
/// Counts sum to `records.len()`.
pub fn count_by_category(records: &[Record]) -> BTreeMap<String, usize> {
    let mut counts = BTreeMap::new();
    for record in records {
        *counts.entry(record.category.clone()).or_insert(0) += 1;
    }
    counts
}

/// Per-category share of the total, in `[0, 1]`.
///
/// Shares sum to 1.0 over non-empty input; empty input yields an empty
/// map.
pub fn distribution(records: &[Record]) -> BTreeMap<String, f64> {
    if records.is_empty() {
        return BTreeMap::new();
    }

    let total = records.len() as f64;
    count_by_category(records)
        .into_iter()
        .map(|(category, count)| (category, count as f64 / total))
        .collect()
}

/// Entries per active day inside `window`.
///
/// Defined as in-window record count divided by the number of distinct
/// calendar days (in `tz`) holding at least one in-window record, and
/// `0.0` when that denominator is zero.
pub fn frequency(records: &[Record], window: Window, tz: FixedOffset) -> f64 {
    let mut in_window = 0usize;
    let mut active_days = BTreeSet::new();

    for record in records {
        if !window.contains(record.recorded_at) {
            continue;
        }
        in_window += 1;
        if let Some(day) = local_day(record.recorded_at, tz) {
            active_days.insert(day);
        }
    }

    if active_days.is_empty() {
        return 0.0;
    }

    in_window as f64 / active_days.len() as f64
}

/// Change of the named measurement across `window`: `last - first` by
/// ascending timestamp among records carrying the field.
///
/// Returns `None` below two qualifying records — insufficient data,
/// which callers must render distinctly from `Some(0.0)`.
pub fn delta(records: &[Record], field: &str, window: Window) -> Option<f64> {
    let mut samples: Vec<(i64, f64)> = records
        .iter()
        .filter(|record| window.contains(record.recorded_at))
        .filter_map(|record| record.measurement(field).map(|v| (record.recorded_at, v)))
        .collect();

    if samples.len() < 2 {
        return None;
    }

    // Stable sort keeps input order for equal timestamps.
    samples.sort_by_key(|(ts, _)| *ts);
    let first = samples.first()?.1;
    let last = samples.last()?.1;
    Some(last - first)
}

/// Groups records by calendar day in `tz`.
///
/// Used for calendar-view counts and daily breakdowns. Records whose
/// timestamps cannot map to a day (impossible for validated records)
/// are skipped.
pub fn group_by_day(records: &[Record], tz: FixedOffset) -> BTreeMap<NaiveDate, Vec<Record>> {
    let mut days: BTreeMap<NaiveDate, Vec<Record>> = BTreeMap::new();
    for record in records {
        if let Some(day) = local_day(record.recorded_at, tz) {
            days.entry(day).or_default().push(record.clone());
        }
    }
    days
}

/// Per-category delta leaderboard for the named measurement.
///
/// Categories with fewer than two qualifying in-window records are
/// omitted. Rows are ordered by descending delta, ties by category id.
pub fn leaders(records: &[Record], field: &str, window: Window) -> Vec<Leader> {
    let mut per_category: BTreeMap<&str, Vec<Record>> = BTreeMap::new();
    for record in records {
        if window.contains(record.recorded_at) && record.measurement(field).is_some() {
            per_category
                .entry(record.category.as_str())
                .or_default()
                .push(record.clone());
        }
    }

    let mut rows: Vec<Leader> = per_category
        .into_iter()
        .filter_map(|(category, group)| {
            let samples = group.len();
            delta(&group, field, window).map(|delta| Leader {
                category: category.to_string(),
                delta,
                samples,
            })
        })
        .collect();

    rows.sort_by(|a, b| {
        b.delta
            .total_cmp(&a.delta)
            .then_with(|| a.category.cmp(&b.category))
    });
    rows
}
