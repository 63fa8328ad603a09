//! Persistence layer: blob storage contracts and the record store.
//!
//! # Responsibility
//! - Define the key-value blob contract the record store persists through.
//! - Isolate SQLite details from domain orchestration.
//!
//! # Invariants
//! - The record store serializes its full snapshot on every applied
//!   mutation, before the mutating call returns.
//! - Persistence failure never rolls back an in-memory mutation.

use crate::model::category::CategoryValidationError;
use crate::model::record::{RecordId, RecordValidationError};
use std::error::Error;
use std::fmt::{Display, Formatter};

pub mod memory;
pub mod migrations;
pub mod record_store;
pub mod sqlite;

pub use memory::MemoryBlobStore;
pub use record_store::{Mutation, RecordStore, SNAPSHOT_SCHEMA_VERSION};
pub use sqlite::{open_blob_store, open_blob_store_in_memory, SqliteBlobStore};

pub type BlobResult<T> = Result<T, BlobError>;
pub type StoreResult<T> = Result<T, StoreError>;

/// Transport-level failure from a blob backend.
#[derive(Debug)]
pub enum BlobError {
    Sqlite(rusqlite::Error),
    /// Backend schema is newer than this binary supports.
    UnsupportedSchemaVersion {
        db_version: u32,
        latest_supported: u32,
    },
    /// Backend refused the operation for a backend-specific reason.
    Backend(String),
}

impl Display for BlobError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Sqlite(err) => write!(f, "{err}"),
            Self::UnsupportedSchemaVersion {
                db_version,
                latest_supported,
            } => write!(
                f,
                "blob schema version {db_version} is newer than supported {latest_supported}"
            ),
            Self::Backend(message) => write!(f, "blob backend error: {message}"),
        }
    }
}

impl Error for BlobError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Sqlite(err) => Some(err),
            Self::UnsupportedSchemaVersion { .. } | Self::Backend(_) => None,
        }
    }
}

impl From<rusqlite::Error> for BlobError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Sqlite(value)
    }
}

/// Key-value blob persistence collaborator.
///
/// The record store treats this as an opaque device-local byte sink:
/// one key holds the whole serialized collection.
pub trait BlobStore {
    /// Loads the blob stored under `key`, if any.
    fn load(&self, key: &str) -> BlobResult<Option<Vec<u8>>>;
    /// Stores `bytes` under `key`, replacing any previous value.
    fn save(&mut self, key: &str, bytes: &[u8]) -> BlobResult<()>;
}

/// Record-store error for validation, decoding and load-time failures.
#[derive(Debug)]
pub enum StoreError {
    /// Record payload failed model validation.
    Validation(RecordValidationError),
    /// Category payload failed model validation.
    Category(CategoryValidationError),
    /// Record references a category the store does not know.
    UnknownCategory(String),
    /// Category still referenced by records; deletion refused.
    CategoryInUse { id: String, references: usize },
    /// A record with this id already exists.
    DuplicateRecord(RecordId),
    /// A category with this id already exists.
    DuplicateCategory(String),
    /// Snapshot bytes could not be encoded or decoded.
    Codec(serde_json::Error),
    /// Persisted snapshot declares a schema newer than this binary.
    UnsupportedSnapshotVersion { found: u32, latest_supported: u32 },
    /// Blob backend failure during startup load.
    Blob(BlobError),
}

impl Display for StoreError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Category(err) => write!(f, "{err}"),
            Self::UnknownCategory(id) => write!(f, "unknown category `{id}`"),
            Self::CategoryInUse { id, references } => {
                write!(f, "category `{id}` is referenced by {references} record(s)")
            }
            Self::DuplicateRecord(id) => write!(f, "record already exists: {id}"),
            Self::DuplicateCategory(id) => write!(f, "category already exists: `{id}`"),
            Self::Codec(err) => write!(f, "snapshot codec failure: {err}"),
            Self::UnsupportedSnapshotVersion {
                found,
                latest_supported,
            } => write!(
                f,
                "snapshot schema version {found} is newer than supported {latest_supported}"
            ),
            Self::Blob(err) => write!(f, "{err}"),
        }
    }
}

impl Error for StoreError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Category(err) => Some(err),
            Self::Codec(err) => Some(err),
            Self::Blob(err) => Some(err),
            _ => None,
        }
    }
}

impl From<RecordValidationError> for StoreError {
    fn from(value: RecordValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<CategoryValidationError> for StoreError {
    fn from(value: CategoryValidationError) -> Self {
        Self::Category(value)
    }
}

impl From<serde_json::Error> for StoreError {
    fn from(value: serde_json::Error) -> Self {
        Self::Codec(value)
    }
}

impl From<BlobError> for StoreError {
    fn from(value: BlobError) -> Self {
        Self::Blob(value)
    }
}
