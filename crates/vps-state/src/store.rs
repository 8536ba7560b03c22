//! RecordStore — redb-backed persistence for VPS records.
//!
//! Provides typed create, lookup, list, and status-update operations.
//! Values are JSON-serialized into redb's `&[u8]` value column. The store
//! supports both on-disk and in-memory backends (the latter for testing).

use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use vps_core::{VpsRecord, VpsStatus};

use crate::error::{StoreError, StoreResult};
use crate::tables::RECORDS;

/// Convert any `Display` error into a `StoreError` variant via a closure factory.
macro_rules! map_err {
    ($variant:ident) => {
        |e| StoreError::$variant(e.to_string())
    };
}

/// Thread-safe record store backed by redb.
#[derive(Clone)]
pub struct RecordStore {
    db: Arc<Database>,
}

impl RecordStore {
    /// Open (or create) a persistent record store at the given path.
    pub fn open(path: &Path) -> StoreResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "record store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory record store (for testing).
    pub fn open_in_memory() -> StoreResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory record store opened");
        Ok(store)
    }

    /// Create the records table if it doesn't exist yet.
    fn ensure_tables(&self) -> StoreResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(RECORDS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Insert a freshly created record. Insert-only path: ids are
    /// generated UUIDs, so keys never collide with existing rows.
    pub fn insert_record(&self, record: &VpsRecord) -> StoreResult<()> {
        let key = record.table_key();
        let value = serde_json::to_vec(record).map_err(map_err!(Serialize))?;
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
            table
                .insert(key.as_str(), value.as_slice())
                .map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%key, "record stored");
        Ok(())
    }

    /// Get a record by its id string.
    pub fn get_record(&self, id: &str) -> StoreResult<Option<VpsRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
        match table.get(id).map_err(map_err!(Read))? {
            Some(guard) => {
                let record: VpsRecord =
                    serde_json::from_slice(guard.value()).map_err(map_err!(Deserialize))?;
                Ok(Some(record))
            }
            None => Ok(None),
        }
    }

    /// List all records, in key order.
    pub fn list_records(&self) -> StoreResult<Vec<VpsRecord>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
        let mut results = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (_, value) = entry.map_err(map_err!(Read))?;
            let record: VpsRecord =
                serde_json::from_slice(value.value()).map_err(map_err!(Deserialize))?;
            results.push(record);
        }
        Ok(results)
    }

    /// Set the status of an existing record, leaving every other field
    /// untouched. Returns the updated record, or `None` if the id is
    /// unknown.
    ///
    /// Lookup, mutation, and write all happen inside one write
    /// transaction; redb write transactions are exclusive, so concurrent
    /// status updates against the same id serialize here (no lost
    /// updates).
    pub fn update_status(&self, id: &str, status: VpsStatus) -> StoreResult<Option<VpsRecord>> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let updated = {
            let mut table = txn.open_table(RECORDS).map_err(map_err!(Table))?;
            let current = match table.get(id).map_err(map_err!(Read))? {
                Some(guard) => Some(
                    serde_json::from_slice::<VpsRecord>(guard.value())
                        .map_err(map_err!(Deserialize))?,
                ),
                None => None,
            };
            match current {
                Some(mut record) => {
                    record.status = status;
                    let value = serde_json::to_vec(&record).map_err(map_err!(Serialize))?;
                    table
                        .insert(id, value.as_slice())
                        .map_err(map_err!(Write))?;
                    Some(record)
                }
                None => None,
            }
        };
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%id, updated = updated.is_some(), "record status updated");
        Ok(updated)
    }
}
