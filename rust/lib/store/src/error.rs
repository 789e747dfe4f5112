use prodtask_kv::KVError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum StoreError {
    #[error(transparent)]
    Kv(#[from] KVError),

    #[error("invalid JSON under \"{key}\": {source}")]
    Json {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    #[error("fixture load failed: {0}")]
    Fixture(String),
}
