use std::collections::BTreeMap;
use std::sync::Arc;

use prodtask_core::keys;
use prodtask_core::{Dictionary, Document, NomenclatureEntry, Settings};
use prodtask_kv::KVStore;
use serde::Serialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;
use crate::fixture::Fixture;

/// Typed JSON view of the local key-value store.
///
/// Every read and write covers a whole value: saving documents rewrites the
/// entire array. There is no locking; the last writer wins.
#[derive(Clone)]
pub struct LocalStore {
    kv: Arc<dyn KVStore>,
}

impl LocalStore {
    pub fn new(kv: Arc<dyn KVStore>) -> Self {
        Self { kv }
    }

    pub fn is_empty(&self) -> Result<bool, StoreError> {
        Ok(self.kv.is_empty()?)
    }

    pub fn keys(&self) -> Result<Vec<String>, StoreError> {
        Ok(self.kv.keys()?)
    }

    // ====================================================================
    // Raw JSON access
    // ====================================================================

    /// Read a value, trying the canonical key and then its legacy alias.
    pub fn get_value(&self, key: &str) -> Result<Option<Value>, StoreError> {
        for candidate in keys::read_candidates(key) {
            if let Some(bytes) = self.kv.get(candidate)? {
                let value = serde_json::from_slice(&bytes).map_err(|source| StoreError::Json {
                    key: candidate.to_string(),
                    source,
                })?;
                return Ok(Some(value));
            }
        }
        Ok(None)
    }

    pub fn get_json<T: DeserializeOwned>(&self, key: &str) -> Result<Option<T>, StoreError> {
        match self.get_value(key)? {
            Some(value) => serde_json::from_value(value)
                .map(Some)
                .map_err(|source| StoreError::Json {
                    key: key.to_string(),
                    source,
                }),
            None => Ok(None),
        }
    }

    /// Serialize and store `value` under the canonical form of `key`.
    pub fn set_json<T: Serialize + ?Sized>(&self, key: &str, value: &T) -> Result<(), StoreError> {
        let key = keys::canonical(key);
        let bytes = serde_json::to_vec(value).map_err(|source| StoreError::Json {
            key: key.to_string(),
            source,
        })?;
        debug!(key, bytes = bytes.len(), "store write");
        self.kv.set(key, &bytes)?;
        Ok(())
    }

    // ====================================================================
    // Entities
    // ====================================================================

    /// Stored settings, or the placeholder defaults when none were saved.
    pub fn load_settings(&self) -> Result<Settings, StoreError> {
        Ok(self.get_json(keys::SETTINGS)?.unwrap_or_default())
    }

    pub fn save_settings(&self, settings: &Settings) -> Result<(), StoreError> {
        self.set_json(keys::SETTINGS, settings)
    }

    pub fn load_documents(&self) -> Result<Vec<Document>, StoreError> {
        Ok(self.get_json(keys::DOCUMENTS)?.unwrap_or_default())
    }

    pub fn save_documents(&self, documents: &[Document]) -> Result<(), StoreError> {
        self.set_json(keys::DOCUMENTS, documents)
    }

    pub fn load_nomenclature(&self) -> Result<Vec<NomenclatureEntry>, StoreError> {
        Ok(self.get_json(keys::NOMENCLATURE)?.unwrap_or_default())
    }

    /// A named reference table. Missing tables are empty, not errors.
    pub fn load_dictionary(&self, name: &str) -> Result<Dictionary, StoreError> {
        let value = self.get_value(name)?.unwrap_or(Value::Null);
        Ok(Dictionary::from_value(keys::canonical(name), value))
    }

    // ====================================================================
    // Maintenance
    // ====================================================================

    /// Item count per key: the array length for arrays, `1` for anything
    /// else (objects, scalars, undecodable bytes).
    pub fn db_stats(&self) -> Result<BTreeMap<String, usize>, StoreError> {
        let mut stats = BTreeMap::new();
        for key in self.kv.keys()? {
            let count = match self.kv.get(&key)? {
                Some(bytes) => match serde_json::from_slice::<Value>(&bytes) {
                    Ok(Value::Array(items)) => items.len(),
                    _ => 1,
                },
                None => continue,
            };
            stats.insert(key, count);
        }
        Ok(stats)
    }

    /// Write a fixture's settings and tables verbatim in one batch.
    /// Returns the keys written.
    pub fn seed(&self, fixture: &Fixture) -> Result<Vec<String>, StoreError> {
        let entries = fixture.entries()?;
        let batch: Vec<(&str, &[u8])> = entries
            .iter()
            .map(|(k, v)| (k.as_str(), v.as_slice()))
            .collect();
        self.kv.batch_set(&batch)?;
        Ok(entries.into_iter().map(|(k, _)| k).collect())
    }
}
