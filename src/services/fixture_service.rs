use std::sync::Arc;

use crate::db::FixtureStore;
use crate::query::{FixtureQueryValidator, QueryError, QueryParams};
use crate::services::cache::QueryCache;

/// Where a response body came from
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheStatus {
    Hit,
    Miss,
}

impl CacheStatus {
    pub fn as_str(&self) -> &'static str {
        match self {
            CacheStatus::Hit => "HIT",
            CacheStatus::Miss => "MISS",
        }
    }
}

/// Serialized fixture list, ready to be sent as is
#[derive(Debug, Clone)]
pub struct FixturesBody {
    pub json: String,
    pub cache: CacheStatus,
}

/// Validates fixture queries and serves them cache-first
#[derive(Clone)]
pub struct FixtureService {
    store: Arc<dyn FixtureStore>,
    cache: Arc<dyn QueryCache>,
}

impl FixtureService {
    pub fn new(store: Arc<dyn FixtureStore>, cache: Arc<dyn QueryCache>) -> Self {
        Self { store, cache }
    }

    #[tracing::instrument(name = "Looking up fixtures", skip(self, params))]
    pub async fn find_fixtures(&self, params: &QueryParams) -> Result<FixturesBody, QueryError> {
        let query = FixtureQueryValidator::new().validate(params)?;
        let cache_key = params.cache_key();

        if let Some(json) = self.cache.get(&cache_key).await? {
            tracing::info!(cache_key = %cache_key, "Cached results");
            return Ok(FixturesBody { json, cache: CacheStatus::Hit });
        }

        let fixtures = self
            .store
            .find_page(query.league, query.season, query.window)
            .await?;
        let json = serde_json::to_string(&fixtures)?;

        self.cache.set(&cache_key, &json).await?;
        tracing::info!(cache_key = %cache_key, count = fixtures.len(), "No cache");

        Ok(FixturesBody { json, cache: CacheStatus::Miss })
    }
}
