use tracing::{debug, info};

use crate::error::StoreError;
use crate::fixture::FixtureSource;
use crate::local::LocalStore;

/// What startup seeding did.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SeedOutcome {
    /// The store already had keys; the fixture was not fetched.
    AlreadySeeded,
    /// The store was empty and these keys were written.
    Seeded { keys: Vec<String> },
}

/// Seed an empty store from `source`, once.
///
/// Any existing key counts as "already seeded": there is no merge, schema
/// check or partial re-seed. A fetch failure leaves the store untouched.
pub async fn bootstrap(
    store: &LocalStore,
    source: &dyn FixtureSource,
) -> Result<SeedOutcome, StoreError> {
    if !store.is_empty()? {
        debug!("local store has data, skipping seed");
        return Ok(SeedOutcome::AlreadySeeded);
    }

    info!("local store is empty, seeding from {}", source.describe());
    let fixture = source.fetch().await?;
    let keys = store.seed(&fixture)?;
    info!("seeded {} keys: {}", keys.len(), keys.join(", "));
    Ok(SeedOutcome::Seeded { keys })
}
