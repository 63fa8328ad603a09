//! On-demand statistics over record sequences.
//!
//! # Responsibility
//! - Compute derived statistics (counts, shares, frequency, deltas,
//!   day groupings, leaderboards) as pure functions.
//!
//! # Invariants
//! - Every function is stateless and idempotent: the same input
//!   sequence yields the same output.
//! - Every function is total over well-formed input, including empty
//!   sequences.

pub mod aggregate;
pub mod window;

pub use aggregate::{
    count_by_category, delta, distribution, frequency, group_by_day, leaders, local_day, Leader,
};
pub use window::Window;
