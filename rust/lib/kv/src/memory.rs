use std::collections::BTreeMap;
use std::sync::RwLock;

use crate::error::KVError;
use crate::traits::KVStore;

/// MemoryStore keeps every entry in an ordered in-process map.
///
/// Used for tests and for throwaway sessions where nothing should touch disk.
#[derive(Default)]
pub struct MemoryStore {
    entries: RwLock<BTreeMap<String, Vec<u8>>>,
}

impl MemoryStore {
    pub fn new() -> Self {
        Self::default()
    }

    fn poisoned<T>(_: T) -> KVError {
        KVError::Storage("memory store lock poisoned".to_string())
    }
}

impl KVStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError> {
        let entries = self.entries.read().map_err(Self::poisoned)?;
        Ok(entries.get(key).cloned())
    }

    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError> {
        let mut entries = self.entries.write().map_err(Self::poisoned)?;
        entries.insert(key.to_string(), value.to_vec());
        Ok(())
    }

    fn batch_set(&self, batch: &[(&str, &[u8])]) -> Result<(), KVError> {
        let mut entries = self.entries.write().map_err(Self::poisoned)?;
        for (key, value) in batch {
            entries.insert(key.to_string(), value.to_vec());
        }
        Ok(())
    }

    fn keys(&self) -> Result<Vec<String>, KVError> {
        let entries = self.entries.read().map_err(Self::poisoned)?;
        Ok(entries.keys().cloned().collect())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_then_populated() {
        let store = MemoryStore::new();
        assert!(store.is_empty().unwrap());
        store.set("nomenclature", b"[]").unwrap();
        assert!(!store.is_empty().unwrap());
    }

    #[test]
    fn batch_set_is_visible_in_keys() {
        let store = MemoryStore::new();
        store.batch_set(&[("b", b"2"), ("a", b"1")]).unwrap();
        assert_eq!(store.keys().unwrap(), vec!["a", "b"]);
        assert_eq!(store.get("a").unwrap().unwrap(), b"1");
    }
}
