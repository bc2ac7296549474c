//! StateStore — redb-backed snapshot persistence.
//!
//! Snapshots are JSON-serialized into redb's `&[u8]` value column, keyed by
//! name. The store supports both on-disk and in-memory backends (the latter
//! for testing).

use std::path::Path;
use std::sync::Arc;

use hanoi_core::RotationSnapshot;
use redb::{Database, ReadableDatabase, ReadableTable};
use tracing::debug;

use crate::backend::SnapshotStore;
use crate::error::{StateError, StateResult, map_err};
use crate::tables::SNAPSHOTS;

/// Thread-safe snapshot store backed by redb.
#[derive(Clone)]
pub struct StateStore {
    db: Arc<Database>,
}

impl StateStore {
    /// Open (or create) a persistent store at the given path.
    pub fn open(path: &Path) -> StateResult<Self> {
        let db = Database::create(path).map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!(?path, "state store opened");
        Ok(store)
    }

    /// Create an ephemeral in-memory store (for testing).
    pub fn open_in_memory() -> StateResult<Self> {
        let backend = redb::backends::InMemoryBackend::new();
        let db = Database::builder()
            .create_with_backend(backend)
            .map_err(map_err!(Open))?;
        let store = Self { db: Arc::new(db) };
        store.ensure_tables()?;
        debug!("in-memory state store opened");
        Ok(store)
    }

    /// Create the snapshots table if it doesn't exist yet.
    fn ensure_tables(&self) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        // Opening a table in a write transaction creates it if absent.
        txn.open_table(SNAPSHOTS).map_err(map_err!(Table))?;
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }

    /// Names of all stored snapshots, in key order.
    pub fn list_names(&self) -> StateResult<Vec<String>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(SNAPSHOTS).map_err(map_err!(Table))?;
        let mut names = Vec::new();
        for entry in table.iter().map_err(map_err!(Read))? {
            let (key, _) = entry.map_err(map_err!(Read))?;
            names.push(key.value().to_string());
        }
        Ok(names)
    }

    /// Raw stored bytes for `name`.
    fn get_raw(&self, name: &str) -> StateResult<Option<Vec<u8>>> {
        let txn = self.db.begin_read().map_err(map_err!(Transaction))?;
        let table = txn.open_table(SNAPSHOTS).map_err(map_err!(Table))?;
        let raw = table
            .get(name)
            .map_err(map_err!(Read))?
            .map(|guard| guard.value().to_vec());
        Ok(raw)
    }

    fn put_raw(&self, name: &str, value: &[u8]) -> StateResult<()> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        {
            let mut table = txn.open_table(SNAPSHOTS).map_err(map_err!(Table))?;
            table.insert(name, value).map_err(map_err!(Write))?;
        }
        txn.commit().map_err(map_err!(Transaction))?;
        Ok(())
    }
}

impl SnapshotStore for StateStore {
    fn get_snapshot(&self, name: &str) -> StateResult<Option<RotationSnapshot>> {
        match self.get_raw(name)? {
            Some(bytes) => {
                let snapshot = RotationSnapshot::from_json(&bytes)
                    .map_err(|e| StateError::Deserialize(format!("{name}: {e}")))?;
                Ok(Some(snapshot))
            }
            None => Ok(None),
        }
    }

    fn put_snapshot(&self, name: &str, snapshot: &RotationSnapshot) -> StateResult<()> {
        let value = snapshot.to_json().map_err(map_err!(Serialize))?;
        self.put_raw(name, &value)?;
        debug!(%name, depth = snapshot.stack.len(), "snapshot stored");
        Ok(())
    }

    fn delete_snapshot(&self, name: &str) -> StateResult<bool> {
        let txn = self.db.begin_write().map_err(map_err!(Transaction))?;
        let existed;
        {
            let mut table = txn.open_table(SNAPSHOTS).map_err(map_err!(Table))?;
            existed = table.remove(name).map_err(map_err!(Write))?.is_some();
        }
        txn.commit().map_err(map_err!(Transaction))?;
        debug!(%name, existed, "snapshot deleted");
        Ok(existed)
    }
}
