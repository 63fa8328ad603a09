//! In-memory record collection with snapshot persistence.
//!
//! # Responsibility
//! - Own the canonical record and category collections for one session.
//! - Persist the full snapshot through a `BlobStore` on every applied
//!   mutation, before the mutating call returns.
//! - Enforce referential integrity between records and categories.
//!
//! # Invariants
//! - Write paths validate models before mutating collections.
//! - A category is only deletable while no record references it.
//! - Persistence failure keeps the in-memory mutation; durability state
//!   is reported to the caller instead of rolled back.

use crate::model::category::Category;
use crate::model::record::{Record, RecordId};
use crate::store::{BlobError, BlobStore, StoreError, StoreResult};
use log::{info, warn};
use serde::{Deserialize, Serialize};

/// Snapshot envelope version written by this binary.
pub const SNAPSHOT_SCHEMA_VERSION: u32 = 1;

/// Outcome of one mutating store call.
#[derive(Debug)]
pub enum Mutation {
    /// Collection changed and the snapshot reached the blob backend.
    Persisted,
    /// Collection changed but the snapshot save failed; the in-memory
    /// state is authoritative for the rest of the session.
    MemoryOnly(BlobError),
    /// Identifier matched nothing; collections and backend untouched.
    NoOp,
}

impl Mutation {
    /// Whether the call changed the in-memory collection.
    pub fn applied(&self) -> bool {
        !matches!(self, Self::NoOp)
    }
}

/// Serialized form of the full store state.
#[derive(Debug, Serialize, Deserialize)]
struct Snapshot {
    schema_version: u32,
    categories: Vec<Category>,
    records: Vec<Record>,
}

/// Session-scoped store over records and categories.
///
/// The blob backend is an injected dependency; no global state.
#[derive(Debug)]
pub struct RecordStore<B: BlobStore> {
    blob: B,
    key: String,
    categories: Vec<Category>,
    records: Vec<Record>,
}

impl<B: BlobStore> RecordStore<B> {
    /// Opens a store, decoding the snapshot stored under `key`.
    ///
    /// An absent blob yields an empty store. Snapshots written by a
    /// newer binary are rejected instead of misparsed.
    ///
    /// # Side effects
    /// - Emits a `snapshot_load` event with the decoded element counts.
    pub fn open(blob: B, key: impl Into<String>) -> StoreResult<Self> {
        let key = key.into();
        let snapshot = match blob.load(&key)? {
            Some(bytes) => decode_snapshot(&bytes)?,
            None => Snapshot {
                schema_version: SNAPSHOT_SCHEMA_VERSION,
                categories: Vec::new(),
                records: Vec::new(),
            },
        };

        info!(
            "event=snapshot_load module=store status=ok key={} categories={} records={}",
            key,
            snapshot.categories.len(),
            snapshot.records.len()
        );

        Ok(Self {
            blob,
            key,
            categories: snapshot.categories,
            records: snapshot.records,
        })
    }

    /// Adds one record.
    ///
    /// # Errors
    /// - `Validation` for malformed payloads.
    /// - `UnknownCategory` when the referenced category does not exist.
    /// - `DuplicateRecord` when the id is already present.
    pub fn add(&mut self, record: Record) -> StoreResult<Mutation> {
        record.validate()?;
        self.require_category(&record.category)?;
        if self.records.iter().any(|r| r.uuid == record.uuid) {
            return Err(StoreError::DuplicateRecord(record.uuid));
        }

        self.records.push(record);
        Ok(self.persist("record_add"))
    }

    /// Replaces the record with the same id; no-op when absent.
    pub fn update(&mut self, record: Record) -> StoreResult<Mutation> {
        record.validate()?;
        self.require_category(&record.category)?;

        let Some(slot) = self.records.iter_mut().find(|r| r.uuid == record.uuid) else {
            return Ok(Mutation::NoOp);
        };
        *slot = record;
        Ok(self.persist("record_update"))
    }

    /// Removes the record with this id; no-op when absent.
    pub fn delete(&mut self, id: RecordId) -> StoreResult<Mutation> {
        let before = self.records.len();
        self.records.retain(|r| r.uuid != id);
        if self.records.len() == before {
            return Ok(Mutation::NoOp);
        }
        Ok(self.persist("record_delete"))
    }

    /// Registers one category.
    ///
    /// # Errors
    /// - `Category` for malformed definitions.
    /// - `DuplicateCategory` when the id is already registered.
    pub fn add_category(&mut self, category: Category) -> StoreResult<Mutation> {
        category.validate()?;
        if self.categories.iter().any(|c| c.id == category.id) {
            return Err(StoreError::DuplicateCategory(category.id));
        }

        self.categories.push(category);
        Ok(self.persist("category_add"))
    }

    /// Removes one category; no-op when absent.
    ///
    /// # Errors
    /// - `CategoryInUse` while any record references the category.
    pub fn delete_category(&mut self, id: &str) -> StoreResult<Mutation> {
        if !self.categories.iter().any(|c| c.id == id) {
            return Ok(Mutation::NoOp);
        }

        let references = self.records.iter().filter(|r| r.category == id).count();
        if references > 0 {
            return Err(StoreError::CategoryInUse {
                id: id.to_string(),
                references,
            });
        }

        self.categories.retain(|c| c.id != id);
        Ok(self.persist("category_delete"))
    }

    /// All records, insertion-ordered. Callers sort explicitly.
    pub fn all(&self) -> &[Record] {
        &self.records
    }

    /// Read access to the blob backend.
    pub fn blob(&self) -> &B {
        &self.blob
    }

    /// One record by id.
    pub fn get(&self, id: RecordId) -> Option<&Record> {
        self.records.iter().find(|r| r.uuid == id)
    }

    /// All registered categories, insertion-ordered.
    pub fn categories(&self) -> &[Category] {
        &self.categories
    }

    /// One category by id.
    pub fn category(&self, id: &str) -> Option<&Category> {
        self.categories.iter().find(|c| c.id == id)
    }

    pub fn len(&self) -> usize {
        self.records.len()
    }

    pub fn is_empty(&self) -> bool {
        self.records.is_empty()
    }

    fn require_category(&self, id: &str) -> StoreResult<()> {
        if self.categories.iter().any(|c| c.id == id) {
            Ok(())
        } else {
            Err(StoreError::UnknownCategory(id.to_string()))
        }
    }

    /// Serializes current state and writes it through the blob backend.
    ///
    /// The in-memory mutation already happened; a failed save degrades
    /// the outcome to `MemoryOnly` instead of rolling back.
    fn persist(&mut self, event: &str) -> Mutation {
        let snapshot = Snapshot {
            schema_version: SNAPSHOT_SCHEMA_VERSION,
            categories: self.categories.clone(),
            records: self.records.clone(),
        };

        let bytes = match serde_json::to_vec(&snapshot) {
            Ok(bytes) => bytes,
            Err(err) => {
                warn!(
                    "event={event} module=store status=memory_only key={} error_code=snapshot_encode_failed error={err}",
                    self.key
                );
                return Mutation::MemoryOnly(BlobError::Backend(format!(
                    "snapshot encode failed: {err}"
                )));
            }
        };

        match self.blob.save(&self.key, &bytes) {
            Ok(()) => {
                info!(
                    "event={event} module=store status=ok key={} records={}",
                    self.key,
                    self.records.len()
                );
                Mutation::Persisted
            }
            Err(err) => {
                warn!(
                    "event={event} module=store status=memory_only key={} error_code=snapshot_save_failed error={err}",
                    self.key
                );
                Mutation::MemoryOnly(err)
            }
        }
    }
}

fn decode_snapshot(bytes: &[u8]) -> StoreResult<Snapshot> {
    let snapshot: Snapshot = serde_json::from_slice(bytes)?;

    if snapshot.schema_version > SNAPSHOT_SCHEMA_VERSION {
        return Err(StoreError::UnsupportedSnapshotVersion {
            found: snapshot.schema_version,
            latest_supported: SNAPSHOT_SCHEMA_VERSION,
        });
    }

    for category in &snapshot.categories {
        category.validate()?;
    }
    for record in &snapshot.records {
        record.validate()?;
    }

    Ok(snapshot)
}
