//! Local key-value persistence for the production-task client.
//!
//! Every value is a whole blob (JSON in practice) addressed by a flat key:
//! `settings`, `documents`, `nomenclature`, `stor`, ... There are no partial
//! updates; callers read and write complete values.

pub mod error;
pub mod memory;
pub mod redb;
pub mod traits;

pub use error::KVError;
pub use memory::MemoryStore;
pub use redb::RedbStore;
pub use traits::KVStore;
