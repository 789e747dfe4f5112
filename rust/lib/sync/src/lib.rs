//! Remote ERP sync.
//!
//! Two calls against the endpoints named in [`Settings`](prodtask_core::Settings):
//! pull the production-task list, push one completed document. Both carry
//! `Authorization: Bearer <token>`. Nothing is retried or queued.

pub mod error;
pub mod http;

use async_trait::async_trait;
use prodtask_core::{Document, Settings};

pub use error::SyncError;
pub use http::HttpTaskApi;

/// The ERP side of the client.
#[async_trait]
pub trait TaskApi: Send + Sync {
    /// Fetch the full production-task list.
    async fn pull_tasks(&self, settings: &Settings) -> Result<Vec<Document>, SyncError>;

    /// Submit a completed document. Returns the status string the server
    /// reported.
    async fn push_completion(
        &self,
        settings: &Settings,
        document: &Document,
    ) -> Result<String, SyncError>;
}
