//! Offline cache manifest.
//!
//! The web build is cached by the platform's service-worker library. This
//! module only describes what to cache and which strategy applies; it never
//! caches anything itself. The JSON form is what the service worker reads.

use serde::{Deserialize, Serialize};

/// A static asset pinned in the precache, invalidated when `revision` changes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PrecacheEntry {
    pub url: String,
    pub revision: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum Strategy {
    NetworkFirst,
    CacheFirst,
}

/// Which requests a runtime route applies to.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RouteMatch {
    /// Page navigations.
    Navigation,
    /// Any request not matched earlier.
    Any,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Expiration {
    pub max_entries: u32,
    pub max_age_seconds: u64,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct RuntimeRoute {
    #[serde(rename = "match")]
    pub matcher: RouteMatch,
    pub strategy: Strategy,
    pub cache_name: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub expiration: Option<Expiration>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PrecacheManifest {
    pub skip_waiting: bool,
    pub clients_claim: bool,
    pub precache: Vec<PrecacheEntry>,
    /// Evaluated in order; the first matching route wins.
    pub routes: Vec<RuntimeRoute>,
}

const ASSETS: &[(&str, u32)] = &[
    ("index.html", 2),
    ("manifest.json", 1),
    ("service-worker.js", 1),
    ("css/main.css", 1),
    ("css/tabulator.min.css", 1),
    ("js/app.js", 4),
    ("js/lib/vue.min.js", 1),
    ("js/lib/tabulator.min.js", 1),
    ("js/lib/localforage.min.js", 1),
    ("js/lib/workbox-sw.js", 1),
    ("icons/icon-192x192.png", 1),
    ("icons/icon-512x512.png", 1),
];

const THIRTY_DAYS: u64 = 30 * 24 * 60 * 60;

impl PrecacheManifest {
    /// The bundled asset list served under `base` (e.g. `/pwa-app0`),
    /// network-first for navigations and cache-first for everything else.
    pub fn default_for(base: &str) -> Self {
        let base = base.trim_end_matches('/');
        let precache = ASSETS
            .iter()
            .map(|(path, rev)| PrecacheEntry {
                url: format!("{base}/{path}"),
                revision: rev.to_string(),
            })
            .collect();

        Self {
            skip_waiting: true,
            clients_claim: true,
            precache,
            routes: vec![
                RuntimeRoute {
                    matcher: RouteMatch::Navigation,
                    strategy: Strategy::NetworkFirst,
                    cache_name: "navigation-cache".to_string(),
                    expiration: None,
                },
                RuntimeRoute {
                    matcher: RouteMatch::Any,
                    strategy: Strategy::CacheFirst,
                    cache_name: "pwa-cache".to_string(),
                    expiration: Some(Expiration {
                        max_entries: 50,
                        max_age_seconds: THIRTY_DAYS,
                    }),
                },
            ],
        }
    }
}
