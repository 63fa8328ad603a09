//! Category model and normalization rules.
//!
//! # Responsibility
//! - Define the tag-like grouping records are filed under.
//! - Own slug/tag normalization shared by store write paths.
//! - Carry per-category presentation hints as a lookup table instead of
//!   scattered per-category switch dispatch.
//!
//! # Invariants
//! - Category ids are lowercase slugs of `a-z 0-9 _ -`, at most 64 chars.
//! - Tags are stored lowercase and deduplicated.
//! - `CategoryStyle::color` is a `#rrggbb` hex literal.

use once_cell::sync::Lazy;
use regex::Regex;
use serde::{Deserialize, Serialize};
use std::collections::BTreeSet;
use std::error::Error;
use std::fmt::{Display, Formatter};

const CATEGORY_ID_MAX_CHARS: usize = 64;
const CATEGORY_NAME_MAX_CHARS: usize = 120;

static HEX_COLOR_RE: Lazy<Regex> =
    Lazy::new(|| Regex::new(r"^#[0-9a-f]{6}$").expect("valid hex color regex"));

/// Presentation hints for one category.
///
/// A single table entry replaces per-category icon/color switches in
/// consuming UIs; the core only guarantees the values are well-formed.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct CategoryStyle {
    /// Symbolic icon name resolved by the UI layer.
    pub icon: String,
    /// Lowercase `#rrggbb` hex color.
    pub color: String,
}

/// Grouping tag that records are filed under.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Category {
    /// Stable normalized slug referenced by records.
    pub id: String,
    /// Human-readable display label.
    pub name: String,
    /// Icon/color lookup entry for this category.
    pub style: CategoryStyle,
}

/// Validation failure for category write paths.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CategoryValidationError {
    /// Id is empty, too long, or contains characters outside the slug set.
    InvalidId(String),
    /// Display name is blank or too long.
    InvalidName(String),
    /// Color is not a lowercase `#rrggbb` literal.
    InvalidColor(String),
}

impl Display for CategoryValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::InvalidId(value) => write!(f, "invalid category id `{value}`"),
            Self::InvalidName(value) => write!(f, "invalid category name `{value}`"),
            Self::InvalidColor(value) => write!(f, "invalid category color `{value}`"),
        }
    }
}

impl Error for CategoryValidationError {}

impl Category {
    /// Creates a category after normalizing the id.
    ///
    /// # Errors
    /// - `InvalidId` when the id does not normalize to a usable slug.
    /// - `InvalidName` when the display name is blank or oversized.
    /// - `InvalidColor` when the style color is not `#rrggbb`.
    pub fn new(
        id: &str,
        name: impl Into<String>,
        style: CategoryStyle,
    ) -> Result<Self, CategoryValidationError> {
        let id =
            normalize_category_id(id).ok_or_else(|| CategoryValidationError::InvalidId(id.to_string()))?;

        let name = name.into();
        let trimmed = name.trim();
        if trimmed.is_empty() || trimmed.chars().count() > CATEGORY_NAME_MAX_CHARS {
            return Err(CategoryValidationError::InvalidName(name));
        }

        if !HEX_COLOR_RE.is_match(&style.color) {
            return Err(CategoryValidationError::InvalidColor(style.color));
        }

        Ok(Self {
            id,
            name: trimmed.to_string(),
            style,
        })
    }

    /// Re-checks invariants on a deserialized category.
    ///
    /// Snapshot decoding must reject malformed persisted state instead
    /// of masking it.
    pub fn validate(&self) -> Result<(), CategoryValidationError> {
        if normalize_category_id(&self.id).as_deref() != Some(self.id.as_str()) {
            return Err(CategoryValidationError::InvalidId(self.id.clone()));
        }
        if self.name.trim().is_empty() || self.name.chars().count() > CATEGORY_NAME_MAX_CHARS {
            return Err(CategoryValidationError::InvalidName(self.name.clone()));
        }
        if !HEX_COLOR_RE.is_match(&self.style.color) {
            return Err(CategoryValidationError::InvalidColor(self.style.color.clone()));
        }
        Ok(())
    }
}

/// Normalizes one category id to its slug form.
///
/// Returns `None` when the input cannot become a valid slug.
pub fn normalize_category_id(id: &str) -> Option<String> {
    let normalized = id.trim().to_lowercase();
    if normalized.is_empty() || normalized.chars().count() > CATEGORY_ID_MAX_CHARS {
        return None;
    }
    let valid = normalized
        .chars()
        .all(|c| c.is_ascii_lowercase() || c.is_ascii_digit() || c == '_' || c == '-');
    valid.then_some(normalized)
}

/// Normalizes one tag value; blank tags are dropped.
pub fn normalize_tag(tag: &str) -> Option<String> {
    let trimmed = tag.trim();
    if trimmed.is_empty() {
        None
    } else {
        Some(trimmed.to_lowercase())
    }
}

/// Normalizes and deduplicates tag values, sorted ascending.
pub fn normalize_tags(tags: &[String]) -> Vec<String> {
    let mut unique = BTreeSet::new();
    for tag in tags {
        if let Some(value) = normalize_tag(tag) {
            unique.insert(value);
        }
    }
    unique.into_iter().collect()
}
