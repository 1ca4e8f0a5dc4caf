//! Parsing and validation of `GET /fixtures` query strings.

use crate::db::StoreError;
use crate::services::cache::CacheError;

pub mod params;
pub mod validation;

pub use params::{ParamValue, QueryParams};
pub use validation::{FixtureQuery, FixtureQueryValidator};

/// Failure of a fixture lookup. The validation variants display as the exact client message.
#[derive(Debug, thiserror::Error)]
pub enum QueryError {
    #[error("Valid leagues are: Premier League or Bundesliga.")]
    InvalidLeague,

    #[error("Valid seasons are: 2018-2019 or 2017-2018.")]
    InvalidSeason,

    #[error("Invalid or missing parameters.")]
    InvalidPagination,

    #[error(transparent)]
    Store(#[from] StoreError),

    #[error(transparent)]
    Cache(#[from] CacheError),

    #[error("Serialization error: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl QueryError {
    pub fn is_validation(&self) -> bool {
        matches!(
            self,
            QueryError::InvalidLeague | QueryError::InvalidSeason | QueryError::InvalidPagination
        )
    }
}
