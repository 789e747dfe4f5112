//! Document store adapter.
//!
//! Typed whole-value access to the local key-value store, plus the one-shot
//! seeding of an empty store from a bundled fixture.

pub mod bootstrap;
pub mod error;
pub mod fixture;
pub mod local;

pub use bootstrap::{SeedOutcome, bootstrap};
pub use error::StoreError;
pub use fixture::{EmbeddedFixture, FileFixture, Fixture, FixtureSource, HttpFixture};
pub use local::LocalStore;
