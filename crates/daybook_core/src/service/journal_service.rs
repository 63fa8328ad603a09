//! Journal use-case service.
//!
//! # Responsibility
//! - Provide stable entry points for record/category mutations.
//! - Compose filters and aggregates into the read models dashboard
//!   screens consume directly.
//!
//! # Invariants
//! - Service APIs never bypass store validation or persistence
//!   contracts.
//! - Read models are recomputed from the current snapshot on demand and
//!   never cached.

use crate::model::category::Category;
use crate::model::record::{Record, RecordId};
use crate::stats::{
    count_by_category, delta, frequency, group_by_day, leaders, Leader, Window,
};
use crate::store::{BlobStore, Mutation, RecordStore, StoreResult};
use crate::view::{by_category, by_text_match};
use chrono::{FixedOffset, NaiveDate};
use std::collections::BTreeMap;

/// One slice of a category breakdown, e.g. a pie-chart segment.
#[derive(Debug, Clone, PartialEq)]
pub struct CategorySlice {
    /// Category slug.
    pub category: String,
    /// Number of records filed under the category.
    pub count: usize,
    /// Share of the total, in `[0, 1]`.
    pub share: f64,
}

/// Distribution read model for chart screens.
///
/// Slices are ordered by descending count, ties by category id.
#[derive(Debug, Clone, PartialEq)]
pub struct CategoryBreakdown {
    pub total: usize,
    pub slices: Vec<CategorySlice>,
}

/// Use-case facade over one record store.
pub struct JournalService<B: BlobStore> {
    store: RecordStore<B>,
}

impl<B: BlobStore> JournalService<B> {
    /// Creates a service owning the provided store.
    pub fn new(store: RecordStore<B>) -> Self {
        Self { store }
    }

    /// Read access to the underlying store.
    pub fn store(&self) -> &RecordStore<B> {
        &self.store
    }

    /// Files one new record.
    pub fn log_record(&mut self, record: Record) -> StoreResult<Mutation> {
        self.store.add(record)
    }

    /// Replaces an existing record; no-op when the id is unknown.
    pub fn edit_record(&mut self, record: Record) -> StoreResult<Mutation> {
        self.store.update(record)
    }

    /// Removes one record; no-op when the id is unknown.
    pub fn remove_record(&mut self, id: RecordId) -> StoreResult<Mutation> {
        self.store.delete(id)
    }

    /// Registers one category.
    pub fn define_category(&mut self, category: Category) -> StoreResult<Mutation> {
        self.store.add_category(category)
    }

    /// Removes one category; refused while records reference it.
    pub fn remove_category(&mut self, id: &str) -> StoreResult<Mutation> {
        self.store.delete_category(id)
    }

    /// Case-insensitive text search over notes and tags.
    pub fn search(&self, query: &str) -> Vec<Record> {
        by_text_match(self.store.all(), query)
    }

    /// Per-category counts and shares over the full collection.
    pub fn category_breakdown(&self) -> CategoryBreakdown {
        let counts = count_by_category(self.store.all());
        let total: usize = counts.values().sum();

        let mut slices: Vec<CategorySlice> = counts
            .into_iter()
            .map(|(category, count)| CategorySlice {
                category,
                count,
                share: if total == 0 {
                    0.0
                } else {
                    count as f64 / total as f64
                },
            })
            .collect();
        slices.sort_by(|a, b| b.count.cmp(&a.count).then_with(|| a.category.cmp(&b.category)));

        CategoryBreakdown { total, slices }
    }

    /// Entries per active day over a trailing window of `days`.
    pub fn entry_frequency(&self, days: u32, as_of_ms: i64, tz: FixedOffset) -> f64 {
        frequency(self.store.all(), Window::trailing(days, as_of_ms), tz)
    }

    /// Measurement change for one category over `window`.
    ///
    /// `None` signals insufficient data, not zero change.
    pub fn measurement_delta(
        &self,
        category_id: &str,
        field: &str,
        window: Window,
    ) -> Option<f64> {
        let scoped = by_category(self.store.all(), category_id);
        delta(&scoped, field, window)
    }

    /// Per-category delta leaderboard for one measurement.
    pub fn growth_leaders(&self, field: &str, window: Window) -> Vec<Leader> {
        leaders(self.store.all(), field, window)
    }

    /// Record count per calendar day, for calendar badges.
    pub fn daily_counts(&self, tz: FixedOffset) -> BTreeMap<NaiveDate, usize> {
        group_by_day(self.store.all(), tz)
            .into_iter()
            .map(|(day, entries)| (day, entries.len()))
            .collect()
    }
}
