//! Core domain logic for Daybook.
//! This crate is the single source of truth for record-keeping
//! invariants; UI layers stay presentation-only.

pub mod logging;
pub mod model;
pub mod service;
pub mod stats;
pub mod store;
pub mod view;

pub use logging::{default_log_level, init_logging, logging_status};
pub use model::category::{Category, CategoryStyle, CategoryValidationError};
pub use model::record::{Record, RecordId, RecordValidationError};
pub use service::journal_service::{CategoryBreakdown, CategorySlice, JournalService};
pub use stats::{
    count_by_category, delta, distribution, frequency, group_by_day, leaders, Leader, Window,
};
pub use store::{
    open_blob_store, open_blob_store_in_memory, BlobError, BlobStore, MemoryBlobStore, Mutation,
    RecordStore, SqliteBlobStore, StoreError, StoreResult, SNAPSHOT_SCHEMA_VERSION,
};
pub use view::{by_category, by_date_range, by_text_match, sort_by, SortDirection, SortKey};

/// Minimal health-check API for early integration.
pub fn ping() -> &'static str {
    "pong"
}

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::{core_version, ping};

    #[test]
    fn ping_returns_pong() {
        assert_eq!(ping(), "pong");
    }

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
