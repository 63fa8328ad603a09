//! SQLite-backed key-value blob store.
//!
//! # Responsibility
//! - Open and configure SQLite connections for the blob backend.
//! - Provide `load`/`save` over a single `blobs` table.
//!
//! # Invariants
//! - Returned stores have migrations fully applied.
//! - `save` replaces the previous value for a key in one statement.

use super::migrations::apply_migrations;
use super::{BlobResult, BlobStore};
use log::{error, info};
use rusqlite::{params, Connection, OptionalExtension};
use std::path::Path;
use std::time::{Duration, Instant};

/// Blob store persisting to one SQLite database file.
#[derive(Debug)]
pub struct SqliteBlobStore {
    conn: Connection,
}

/// Opens a SQLite-backed blob store at `path` and applies pending
/// migrations.
///
/// # Side effects
/// - Emits `blob_open` logging events with duration and status.
pub fn open_blob_store(path: impl AsRef<Path>) -> BlobResult<SqliteBlobStore> {
    let started_at = Instant::now();
    info!("event=blob_open module=store status=start mode=file");

    let result = Connection::open(path)
        .map_err(Into::into)
        .and_then(bootstrap);

    match result {
        Ok(store) => {
            info!(
                "event=blob_open module=store status=ok mode=file duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=blob_open module=store status=error mode=file duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

/// Opens an in-memory SQLite-backed blob store.
///
/// Used by tests and ephemeral sessions; same migration guarantees as
/// the file-backed variant.
pub fn open_blob_store_in_memory() -> BlobResult<SqliteBlobStore> {
    let started_at = Instant::now();
    info!("event=blob_open module=store status=start mode=memory");

    let result = Connection::open_in_memory()
        .map_err(Into::into)
        .and_then(bootstrap);

    match result {
        Ok(store) => {
            info!(
                "event=blob_open module=store status=ok mode=memory duration_ms={}",
                started_at.elapsed().as_millis()
            );
            Ok(store)
        }
        Err(err) => {
            error!(
                "event=blob_open module=store status=error mode=memory duration_ms={} error={}",
                started_at.elapsed().as_millis(),
                err
            );
            Err(err)
        }
    }
}

fn bootstrap(mut conn: Connection) -> BlobResult<SqliteBlobStore> {
    conn.execute_batch("PRAGMA foreign_keys = ON;")?;
    conn.busy_timeout(Duration::from_secs(5))?;
    apply_migrations(&mut conn)?;
    Ok(SqliteBlobStore { conn })
}

impl BlobStore for SqliteBlobStore {
    fn load(&self, key: &str) -> BlobResult<Option<Vec<u8>>> {
        let value = self
            .conn
            .query_row("SELECT value FROM blobs WHERE key = ?1;", [key], |row| {
                row.get::<_, Vec<u8>>(0)
            })
            .optional()?;
        Ok(value)
    }

    fn save(&mut self, key: &str, bytes: &[u8]) -> BlobResult<()> {
        self.conn.execute(
            "INSERT INTO blobs (key, value, updated_at)
             VALUES (?1, ?2, (strftime('%s', 'now') * 1000))
             ON CONFLICT (key) DO UPDATE SET
                value = excluded.value,
                updated_at = excluded.updated_at;",
            params![key, bytes],
        )?;
        Ok(())
    }
}
