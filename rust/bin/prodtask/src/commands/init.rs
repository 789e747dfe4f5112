//! `prodtask init`: write the client config file.

use std::path::Path;

use anyhow::Result;

use crate::config::ClientConfig;

/// Set `db_path` and/or `fixture` in the config file, keeping other values.
pub fn init(db: Option<&str>, fixture: Option<&str>, config_path: &Path) -> Result<()> {
    let mut config = ClientConfig::load(config_path)?;
    if let Some(db) = db {
        config.db_path = db.to_string();
    }
    if let Some(fixture) = fixture {
        config.fixture = fixture.to_string();
    }
    config.save(config_path)?;

    println!("Wrote {}", config_path.display());
    println!("  local store: {}", config.db_path(None).display());
    println!("  fixture:     {}", config.fixture(None).unwrap_or("(embedded)"));
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn init_merges_into_existing_file() {
        let tmp = tempfile::TempDir::new().unwrap();
        let path = tmp.path().join("config.toml");

        init(Some("/data/a.redb"), None, &path).unwrap();
        init(None, Some("./seed"), &path).unwrap();

        let config = ClientConfig::load(&path).unwrap();
        assert_eq!(config.db_path, "/data/a.redb");
        assert_eq!(config.fixture, "./seed");
    }
}
