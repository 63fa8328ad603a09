//! In-memory blob store.
//!
//! # Responsibility
//! - Provide a deterministic `BlobStore` for tests and ephemeral
//!   sessions, with an optional injected save failure.

use super::{BlobError, BlobResult, BlobStore};
use std::collections::BTreeMap;

/// Blob store holding everything in a process-local map.
#[derive(Debug, Default)]
pub struct MemoryBlobStore {
    blobs: BTreeMap<String, Vec<u8>>,
    save_count: u64,
    fail_saves: bool,
}

impl MemoryBlobStore {
    pub fn new() -> Self {
        Self::default()
    }

    /// Makes every subsequent `save` fail, for durability-failure tests.
    pub fn fail_saves(&mut self, fail: bool) {
        self.fail_saves = fail;
    }

    /// Number of successful saves observed so far.
    pub fn save_count(&self) -> u64 {
        self.save_count
    }

    /// Raw bytes currently stored under `key`, if any.
    pub fn raw(&self, key: &str) -> Option<&[u8]> {
        self.blobs.get(key).map(Vec::as_slice)
    }
}

impl BlobStore for MemoryBlobStore {
    fn load(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        Ok(self.blobs.get(key).cloned())
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> BlobResult<()> {
        if self.fail_saves {
            return Err(BlobError::Backend("save disabled by test".to_string()));
        }
        self.blobs.insert(key.to_string(), bytes.to_vec());
        self.save_count += 1;
        Ok(())
    }
}
