use std::collections::BTreeMap;
use std::path::{Path, PathBuf};

use async_trait::async_trait;
use prodtask_core::keys;
use serde::{Deserialize, Serialize};
use serde_json::Value;
use tracing::debug;

use crate::error::StoreError;

/// Seed data shipped with the app.
///
/// ```json
/// {
///   "settings": { "apiProductionTasks": "...", ... },
///   "tables": { "documents": [...], "nomenclature": [...], "stor": [...] }
/// }
/// ```
///
/// Both parts are written to the store verbatim; table names become keys.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
pub struct Fixture {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub settings: Option<Value>,

    #[serde(default)]
    pub tables: BTreeMap<String, Value>,
}

impl Fixture {
    /// (key, JSON bytes) pairs to write, settings first.
    pub fn entries(&self) -> Result<Vec<(String, Vec<u8>)>, StoreError> {
        let mut out = Vec::with_capacity(self.tables.len() + 1);
        if let Some(settings) = &self.settings {
            out.push((keys::SETTINGS.to_string(), encode(keys::SETTINGS, settings)?));
        }
        for (name, value) in &self.tables {
            out.push((name.clone(), encode(name, value)?));
        }
        Ok(out)
    }
}

fn encode(key: &str, value: &Value) -> Result<Vec<u8>, StoreError> {
    serde_json::to_vec(value).map_err(|source| StoreError::Json {
        key: key.to_string(),
        source,
    })
}

fn decode(origin: &str, bytes: &[u8]) -> Result<Fixture, StoreError> {
    serde_json::from_slice(bytes).map_err(|e| StoreError::Fixture(format!("{origin}: {e}")))
}

/// Where the seed comes from.
#[async_trait]
pub trait FixtureSource: Send + Sync {
    /// Human-readable origin, for logs.
    fn describe(&self) -> String;

    async fn fetch(&self) -> Result<Fixture, StoreError>;
}

// ── Embedded ────────────────────────────────────────────────────────

const SEED: &str = include_str!("../fixtures/seed.json");

/// The fixture compiled into the binary.
pub struct EmbeddedFixture;

#[async_trait]
impl FixtureSource for EmbeddedFixture {
    fn describe(&self) -> String {
        "embedded seed".to_string()
    }

    async fn fetch(&self) -> Result<Fixture, StoreError> {
        decode("embedded seed", SEED.as_bytes())
    }
}

// ── File ────────────────────────────────────────────────────────────

/// A fixture on disk.
///
/// A file is read as a [`Fixture`]. A directory is read as `seed.json` when
/// present, otherwise as the older split layout:
///
/// ```text
/// data/
/// ├── nomenclature.json   → tables.nomenclature
/// └── tasks.json          → tables.documents
/// ```
pub struct FileFixture {
    path: PathBuf,
}

impl FileFixture {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    async fn read_dir_layout(dir: &Path) -> Result<Fixture, StoreError> {
        let seed = dir.join("seed.json");
        if tokio::fs::try_exists(&seed).await.unwrap_or(false) {
            return Self::read_file(&seed).await;
        }

        let mut fixture = Fixture::default();
        for (file, table) in [
            ("nomenclature.json", keys::NOMENCLATURE),
            ("tasks.json", keys::DOCUMENTS),
        ] {
            let path = dir.join(file);
            let bytes = tokio::fs::read(&path)
                .await
                .map_err(|e| StoreError::Fixture(format!("{}: {e}", path.display())))?;
            let value: Value = serde_json::from_slice(&bytes)
                .map_err(|e| StoreError::Fixture(format!("{}: {e}", path.display())))?;
            fixture.tables.insert(table.to_string(), value);
        }
        Ok(fixture)
    }

    async fn read_file(path: &Path) -> Result<Fixture, StoreError> {
        let bytes = tokio::fs::read(path)
            .await
            .map_err(|e| StoreError::Fixture(format!("{}: {e}", path.display())))?;
        decode(&path.display().to_string(), &bytes)
    }
}

#[async_trait]
impl FixtureSource for FileFixture {
    fn describe(&self) -> String {
        self.path.display().to_string()
    }

    async fn fetch(&self) -> Result<Fixture, StoreError> {
        debug!("reading fixture from {}", self.path.display());
        if self.path.is_dir() {
            Self::read_dir_layout(&self.path).await
        } else {
            Self::read_file(&self.path).await
        }
    }
}

// ── HTTP ────────────────────────────────────────────────────────────

/// A fixture served over HTTP, fetched with a plain GET.
pub struct HttpFixture {
    url: String,
    client: reqwest::Client,
}

impl HttpFixture {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            client: reqwest::Client::new(),
        }
    }
}

#[async_trait]
impl FixtureSource for HttpFixture {
    fn describe(&self) -> String {
        self.url.clone()
    }

    async fn fetch(&self) -> Result<Fixture, StoreError> {
        let resp = self
            .client
            .get(&self.url)
            .send()
            .await
            .map_err(|e| StoreError::Fixture(format!("{}: {e}", self.url)))?;

        let status = resp.status();
        if !status.is_success() {
            return Err(StoreError::Fixture(format!("{}: HTTP status {status}", self.url)));
        }

        let bytes = resp
            .bytes()
            .await
            .map_err(|e| StoreError::Fixture(format!("{}: {e}", self.url)))?;
        decode(&self.url, &bytes)
    }
}
