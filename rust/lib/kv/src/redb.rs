use std::path::Path;
use std::sync::Arc;

use redb::{Database, ReadableTable, TableDefinition};
use tracing::debug;

use crate::error::KVError;
use crate::traits::KVStore;

const TABLE: TableDefinition<&str, &[u8]> = TableDefinition::new("store");

fn storage<E: ToString>(e: E) -> KVError {
    KVError::Storage(e.to_string())
}

/// RedbStore is the persistent KVStore, backed by redb, a pure-Rust embedded
/// key-value database. One table holds every key.
///
/// Each call runs in its own transaction; there is no locking across calls,
/// so two processes sharing a file get last-write-wins.
pub struct RedbStore {
    db: Arc<Database>,
}

impl RedbStore {
    /// Open or create a redb database at the given path.
    pub fn open(path: &Path) -> Result<Self, KVError> {
        if let Some(parent) = path.parent() {
            if !parent.as_os_str().is_empty() {
                std::fs::create_dir_all(parent).map_err(storage)?;
            }
        }
        let db = Database::create(path).map_err(storage)?;

        // Ensure the table exists so read transactions never see it missing.
        let write_txn = db.begin_write().map_err(storage)?;
        {
            let _table = write_txn.open_table(TABLE).map_err(storage)?;
        }
        write_txn.commit().map_err(storage)?;

        debug!("opened local store at {}", path.display());
        Ok(Self { db: Arc::new(db) })
    }
}

impl KVStore for RedbStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        match table.get(key) {
            Ok(Some(val)) => Ok(Some(val.value().to_vec())),
            Ok(None) => Ok(None),
            Err(e) => Err(storage(e)),
        }
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        self.batch_set(&[(key, value)])
    }

    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError> {
        let write_txn = self.db.begin_write().map_err(storage)?;
        {
            let mut table = write_txn.open_table(TABLE).map_err(storage)?;
            for (key, value) in entries {
                table.insert(*key, *value).map_err(storage)?;
            }
        }
        write_txn.commit().map_err(storage)?;
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, KVError> {
        let read_txn = self.db.begin_read().map_err(storage)?;
        let table = read_txn.open_table(TABLE).map_err(storage)?;

        let mut keys = Vec::new();
        for entry in table.iter().map_err(storage)? {
            let (key, _) = entry.map_err(storage)?;
            keys.push(key.value().to_string());
        }
        Ok(keys)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn open_temp() -> (TempDir, RedbStore) {
        let tmp = TempDir::new().unwrap();
        let store = RedbStore::open(&tmp.path().join("local.redb")).unwrap();
        (tmp, store)
    }

    #[test]
    fn new_store_is_empty() {
        let (_tmp, store) = open_temp();
        assert!(store.is_empty().unwrap());
        assert!(store.keys().unwrap().is_empty());
        assert!(store.get("settings").unwrap().is_none());
    }

    #[test]
    fn set_get_overwrite() {
        let (_tmp, store) = open_temp();
        store.set("settings", b"{\"a\":1}").unwrap();
        store.set("settings", b"{\"a\":2}").unwrap();
        assert_eq!(store.get("settings").unwrap().unwrap(), b"{\"a\":2}");
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn batch_set_and_keys_sorted() {
        let (_tmp, store) = open_temp();
        store
            .batch_set(&[("users", b"[]"), ("documents", b"[]"), ("settings", b"{}")])
            .unwrap();
        assert_eq!(store.keys().unwrap(), vec!["documents", "settings", "users"]);
    }

    #[test]
    fn data_survives_reopen() {
        let tmp = TempDir::new().unwrap();
        let path = tmp.path().join("nested").join("local.redb");
        {
            let store = RedbStore::open(&path).unwrap();
            store.set("documents", b"[1,2,3]").unwrap();
        }
        let store = RedbStore::open(&path).unwrap();
        assert_eq!(store.get("documents").unwrap().unwrap(), b"[1,2,3]");
    }
}
