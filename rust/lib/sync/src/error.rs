use thiserror::Error;

/// Sync failures. Callers surface every kind the same way.
#[derive(Error, Debug)]
pub enum SyncError {
    #[error("{0} endpoint is not configured")]
    NotConfigured(&'static str),

    #[error("request failed: {0}")]
    Http(#[from] reqwest::Error),

    #[error("HTTP error, status {0}")]
    Status(reqwest::StatusCode),

    #[error("invalid response body: {0}")]
    Decode(String),
}
