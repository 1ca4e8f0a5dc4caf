//! Fixture persistence.
//!
//! [`FixtureStore`] is the seam between the query/import services and the
//! backing store. The server and importer use [`PgFixtureStore`]; tests use
//! [`InMemoryFixtureStore`].

use async_trait::async_trait;

use crate::models::fixture::{Fixture, FixtureRecord, League, PageWindow, Season};

pub mod fixtures;
pub mod memory;

pub use fixtures::PgFixtureStore;
pub use memory::InMemoryFixtureStore;

#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Database error: {0}")]
    Database(#[from] sqlx::Error),

    #[error("Migration error: {0}")]
    Migration(#[from] sqlx::migrate::MigrateError),
}

#[async_trait]
pub trait FixtureStore: Send + Sync {
    /// One page of fixtures for a league and season, in the store's configured order
    async fn find_page(
        &self,
        league: League,
        season: Season,
        window: PageWindow,
    ) -> Result<Vec<Fixture>, StoreError>;

    /// Insert the record, or overwrite the one sharing its identity tuple
    async fn upsert(&self, record: &FixtureRecord) -> Result<(), StoreError>;

    async fn count(&self, league: League, season: Season) -> Result<i64, StoreError>;

    /// Release underlying connections
    async fn close(&self);
}
