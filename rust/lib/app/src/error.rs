use prodtask_core::CoreError;
use prodtask_store::StoreError;
use prodtask_sync::SyncError;
use thiserror::Error;

#[derive(Error, Debug)]
pub enum AppError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Sync(#[from] SyncError),

    #[error(transparent)]
    Core(#[from] CoreError),

    #[error("document {0} not found")]
    DocumentNotFound(String),

    #[error("no document is open")]
    NoOpenDocument,

    #[error("invalid filter: {0}")]
    InvalidFilter(String),
}
