pub mod init;
pub mod manifest;
pub mod settings;
pub mod sync;
pub mod tasks;

use std::path::Path;
use std::sync::Arc;

use anyhow::{Context as _, Result};
use prodtask_app::{App, Event, render};
use prodtask_kv::RedbStore;
use prodtask_store::{EmbeddedFixture, FileFixture, FixtureSource, HttpFixture, LocalStore};
use prodtask_sync::HttpTaskApi;
use tracing::debug;

use crate::config::ClientConfig;

/// Options shared by every command that touches the local store.
pub struct Session<'a> {
    pub config_path: &'a Path,
    pub db: Option<&'a str>,
    pub fixture: Option<&'a str>,
    pub json: bool,
}

impl Session<'_> {
    /// Open the store, wire up the HTTP API and run startup.
    pub async fn open(&self) -> Result<App> {
        let config = ClientConfig::load(self.config_path)
            .with_context(|| format!("reading {}", self.config_path.display()))?;

        let db_path = config.db_path(self.db);
        let kv = RedbStore::open(&db_path)
            .with_context(|| format!("opening local store {}", db_path.display()))?;
        let store = LocalStore::new(Arc::new(kv));

        let fixture = fixture_source(config.fixture(self.fixture));
        debug!("fixture source: {}", fixture.describe());

        let mut app = App::new(store, Arc::new(HttpTaskApi::new()), fixture);
        app.subscribe(|notice| eprintln!("{}", render::notice_line(notice)));
        run(&mut app, Event::Initialize).await?;
        Ok(app)
    }
}

fn fixture_source(location: Option<&str>) -> Arc<dyn FixtureSource> {
    match location {
        None => Arc::new(EmbeddedFixture),
        Some(url) if url.starts_with("http://") || url.starts_with("https://") => {
            Arc::new(HttpFixture::new(url))
        }
        Some(path) => Arc::new(FileFixture::new(path)),
    }
}

/// Dispatch one event. The notice has already been printed by the time this
/// returns an error.
pub async fn run(app: &mut App, event: Event) -> Result<()> {
    let name = event.name();
    if app.dispatch(event).await {
        Ok(())
    } else {
        anyhow::bail!("{name} failed")
    }
}

pub fn print_json<T: serde::Serialize + ?Sized>(value: &T) -> Result<()> {
    println!("{}", serde_json::to_string_pretty(value)?);
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn fixture_location_picks_source() {
        assert_eq!(fixture_source(None).describe(), "embedded seed");
        assert_eq!(
            fixture_source(Some("https://erp.local/data/seed.json")).describe(),
            "https://erp.local/data/seed.json"
        );
        assert_eq!(fixture_source(Some("./data")).describe(), "./data");
    }

    #[tokio::test]
    async fn session_opens_over_a_store_with_unreadable_documents() {
        use prodtask_kv::KVStore;

        let tmp = tempfile::TempDir::new().unwrap();
        let db = tmp.path().join("local.redb");
        {
            let kv = RedbStore::open(&db).unwrap();
            kv.set("documents", br#"[{"id-erp": "D001", "production": 5}]"#).unwrap();
            kv.set("stor", br#"[{"id": "W1"}]"#).unwrap();
        }

        let config_path = tmp.path().join("config.toml");
        let db = db.to_string_lossy().into_owned();
        let session = Session {
            config_path: &config_path,
            db: Some(&db),
            fixture: None,
            json: false,
        };
        let app = session.open().await.unwrap();
        assert!(app.state().documents.is_empty());
        assert!(app.state().notices[0].is_error());
        assert_eq!(app.store().load_dictionary("stor").unwrap().len(), 1);
    }
}
