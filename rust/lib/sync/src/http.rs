use async_trait::async_trait;
use prodtask_core::{Document, Settings};
use reqwest::header::CONTENT_TYPE;
use serde::Deserialize;
use serde::de::DeserializeOwned;
use serde_json::Value;
use tracing::{info, warn};

use crate::TaskApi;
use crate::error::SyncError;

#[derive(Deserialize)]
struct TasksResponse {
    #[serde(default)]
    tasks: Vec<Document>,
}

#[derive(Deserialize)]
struct CompletionResponse {
    #[serde(default)]
    status: Value,
}

/// TaskApi over HTTP with reqwest. One attempt per call, client default
/// timeouts.
#[derive(Clone, Default)]
pub struct HttpTaskApi {
    client: reqwest::Client,
}

impl HttpTaskApi {
    pub fn new() -> Self {
        Self::default()
    }

    async fn decode<T: DeserializeOwned>(resp: reqwest::Response) -> Result<T, SyncError> {
        let status = resp.status();
        if !status.is_success() {
            warn!("server answered {status}");
            return Err(SyncError::Status(status));
        }
        let bytes = resp.bytes().await?;
        serde_json::from_slice(&bytes).map_err(|e| SyncError::Decode(e.to_string()))
    }
}

fn endpoint<'a>(url: &'a str, what: &'static str) -> Result<&'a str, SyncError> {
    let url = url.trim();
    if url.is_empty() {
        return Err(SyncError::NotConfigured(what));
    }
    Ok(url)
}

#[async_trait]
impl TaskApi for HttpTaskApi {
    async fn pull_tasks(&self, settings: &Settings) -> Result<Vec<Document>, SyncError> {
        let url = endpoint(&settings.api_production_tasks, "production tasks")?;

        let resp = self
            .client
            .get(url)
            .bearer_auth(&settings.token)
            .header(CONTENT_TYPE, "application/json")
            .send()
            .await?;

        let body: TasksResponse = Self::decode(resp).await?;
        info!("pulled {} tasks from {url}", body.tasks.len());
        Ok(body.tasks)
    }

    async fn push_completion(
        &self,
        settings: &Settings,
        document: &Document,
    ) -> Result<String, SyncError> {
        let url = endpoint(&settings.api_task_completion, "task completion")?;

        let resp = self
            .client
            .post(url)
            .bearer_auth(&settings.token)
            .json(document)
            .send()
            .await?;

        let body: CompletionResponse = Self::decode(resp).await?;
        let status = match body.status {
            Value::String(s) => s,
            Value::Null => String::new(),
            other => other.to_string(),
        };
        info!("pushed document {} to {url}: {status}", document.id_erp);
        Ok(status)
    }
}
