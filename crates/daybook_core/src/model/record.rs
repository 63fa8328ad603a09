//! Record domain model.
//!
//! # Responsibility
//! - Define the canonical timestamped entry shared by all journal apps
//!   (mood, plant measurement, idea, gratitude, weather).
//! - Provide constructors and validation for write paths.
//!
//! # Invariants
//! - `uuid` is stable and never reused for another record.
//! - `recorded_at` only changes through an explicit edit.
//! - Measurement names are non-blank and values are finite.

use crate::model::category::normalize_tags;
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for every record.
///
/// Kept as a type alias to make semantic intent explicit in signatures.
pub type RecordId = Uuid;

/// Upper bound for `recorded_at`, end of year 9999 in epoch milliseconds.
///
/// Keeps every valid timestamp mappable to a calendar day.
pub const MAX_RECORDED_AT_MS: i64 = 253_402_300_799_999;

/// Canonical timestamped user entry.
///
/// Free-form text and named numeric measurements live side by side so
/// one storage shape covers all the journal projections without copies.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Record {
    /// Stable global ID used for edit/delete targeting.
    pub uuid: RecordId,
    /// Unix epoch milliseconds. Immutable except via explicit edit.
    pub recorded_at: i64,
    /// Normalized slug of the owning category.
    pub category: String,
    /// Free-form note text. May be empty.
    pub note: String,
    /// Named numeric payload fields, e.g. `height_cm`, `mood_score`.
    pub measurements: BTreeMap<String, f64>,
    /// Lowercase, deduplicated tags.
    pub tags: Vec<String>,
}

/// Validation failure for record write paths.
#[derive(Debug, Clone, PartialEq)]
pub enum RecordValidationError {
    /// `recorded_at` lies outside `[0, MAX_RECORDED_AT_MS]`.
    TimestampOutOfRange(i64),
    /// Category slug is empty or not in normalized form.
    InvalidCategoryId(String),
    /// A measurement name is blank after trimming.
    BlankMeasurementName,
    /// A measurement value is NaN or infinite.
    NonFiniteMeasurement { name: String, value: f64 },
}

impl Display for RecordValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TimestampOutOfRange(value) => {
                write!(f, "recorded_at {value} is outside the supported range")
            }
            Self::InvalidCategoryId(value) => {
                write!(f, "invalid category id `{value}`")
            }
            Self::BlankMeasurementName => write!(f, "measurement name cannot be blank"),
            Self::NonFiniteMeasurement { name, value } => {
                write!(f, "measurement `{name}` has non-finite value {value}")
            }
        }
    }
}

impl Error for RecordValidationError {}

impl Record {
    /// Creates a new record with a generated stable ID.
    ///
    /// # Invariants
    /// - `note` starts empty, `measurements` and `tags` start empty.
    pub fn new(category: impl Into<String>, recorded_at: i64) -> Self {
        Self::with_id(Uuid::new_v4(), category, recorded_at)
    }

    /// Creates a record with a caller-provided stable ID.
    ///
    /// Used by import paths and tests where identity already exists.
    pub fn with_id(uuid: RecordId, category: impl Into<String>, recorded_at: i64) -> Self {
        Self {
            uuid,
            recorded_at,
            category: category.into(),
            note: String::new(),
            measurements: BTreeMap::new(),
            tags: Vec::new(),
        }
    }

    /// Sets the note text, builder style.
    pub fn with_note(mut self, note: impl Into<String>) -> Self {
        self.note = note.into();
        self
    }

    /// Adds one named measurement, builder style.
    pub fn with_measurement(mut self, name: impl Into<String>, value: f64) -> Self {
        self.measurements.insert(name.into(), value);
        self
    }

    /// Sets tags, normalized to lowercase and deduplicated.
    pub fn with_tags(mut self, tags: &[String]) -> Self {
        self.tags = normalize_tags(tags);
        self
    }

    /// Returns the named measurement value, if present.
    pub fn measurement(&self, name: &str) -> Option<f64> {
        self.measurements.get(name).copied()
    }

    /// Checks the record against model invariants.
    ///
    /// # Errors
    /// - `TimestampOutOfRange` for timestamps before the epoch or past
    ///   the supported calendar range.
    /// - `InvalidCategoryId` for blank or non-normalized category slugs.
    /// - `BlankMeasurementName` / `NonFiniteMeasurement` for payload
    ///   fields no aggregate could consume safely.
    pub fn validate(&self) -> Result<(), RecordValidationError> {
        if self.recorded_at < 0 || self.recorded_at > MAX_RECORDED_AT_MS {
            return Err(RecordValidationError::TimestampOutOfRange(self.recorded_at));
        }

        if crate::model::category::normalize_category_id(&self.category).as_deref()
            != Some(self.category.as_str())
        {
            return Err(RecordValidationError::InvalidCategoryId(
                self.category.clone(),
            ));
        }

        for (name, value) in &self.measurements {
            if name.trim().is_empty() {
                return Err(RecordValidationError::BlankMeasurementName);
            }
            if !value.is_finite() {
                return Err(RecordValidationError::NonFiniteMeasurement {
                    name: name.clone(),
                    value: *value,
                });
            }
        }

        Ok(())
    }
}
