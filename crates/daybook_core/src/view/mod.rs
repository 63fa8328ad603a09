//! Derived-view functions over record sequences.
//!
//! # Responsibility
//! - Produce filtered and sorted views for list/calendar screens.
//! - Keep every function pure: explicit input in, new sequence out.
//!
//! # Invariants
//! - Filters preserve input order.
//! - Sorting is stable; ties keep their relative input order.

pub mod filter;
pub mod sort;

pub use filter::{by_category, by_date_range, by_text_match};
pub use sort::{sort_by, SortDirection, SortKey};
