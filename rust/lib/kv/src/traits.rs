use crate::error::KVError;

/// KVStore provides whole-value key-value storage.
///
/// Keys are plain names (`settings`, `documents`, `stor`). Values are opaque
/// bytes; the document store layers JSON on top.
pub trait KVStore: Send + Sync {
    /// Get the value for a key. Returns None if the key does not exist.
    fn get(&self, key: &str) -> Result<Option<Vec<u8>>, KVError>;

    /// Set a key-value pair, replacing any previous value.
    fn set(&self, key: &str, value: &[u8]) -> Result<(), KVError>;

    /// Write several entries in one transaction.
    fn batch_set(&self, entries: &[(&str, &[u8])]) -> Result<(), KVError>;

    /// All keys, sorted.
    fn keys(&self) -> Result<Vec<String>, KVError>;

    /// True when the store holds no keys at all.
    fn is_empty(&self) -> Result<bool, KVError> {
        Ok(self.keys()?.is_empty())
    }
}
