use crate::models::fixture::{League, PageWindow, Season};
use crate::query::params::{ParamValue, QueryParams};
use crate::query::QueryError;

pub const DEFAULT_LIMIT: u64 = 15;
pub const DEFAULT_PAGE: u64 = 1;

/// A request that passed validation
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct FixtureQuery {
    pub league: League,
    pub season: Season,
    pub window: PageWindow,
}

/// Checks `GET /fixtures` parameters: league, then season, then pagination
pub struct FixtureQueryValidator;

impl FixtureQueryValidator {
    pub fn new() -> Self {
        Self
    }

    pub fn validate(&self, params: &QueryParams) -> Result<FixtureQuery, QueryError> {
        let league = self.validate_league(params.get("league"))?;
        let season = self.validate_season(params.get("season"))?;
        let limit = self.validate_positive(params.get("limit"), DEFAULT_LIMIT)?;
        let page = self.validate_positive(params.get("page"), DEFAULT_PAGE)?;

        Ok(FixtureQuery {
            league,
            season,
            window: PageWindow { limit, page },
        })
    }

    pub fn validate_league(&self, value: ParamValue<'_>) -> Result<League, QueryError> {
        match value {
            ParamValue::Single(name) => League::parse(name).ok_or(QueryError::InvalidLeague),
            _ => Err(QueryError::InvalidLeague),
        }
    }

    pub fn validate_season(&self, value: ParamValue<'_>) -> Result<Season, QueryError> {
        match value {
            ParamValue::Single(name) => Season::parse(name).ok_or(QueryError::InvalidSeason),
            _ => Err(QueryError::InvalidSeason),
        }
    }

    /// Missing means `default`; anything else must be a whole number above zero
    pub fn validate_positive(&self, value: ParamValue<'_>, default: u64) -> Result<u64, QueryError> {
        match value {
            ParamValue::Missing => Ok(default),
            ParamValue::Single(raw) => parse_positive(raw).ok_or(QueryError::InvalidPagination),
            ParamValue::Repeated => Err(QueryError::InvalidPagination),
        }
    }
}

impl Default for FixtureQueryValidator {
    fn default() -> Self {
        Self::new()
    }
}

fn parse_positive(raw: &str) -> Option<u64> {
    let number: f64 = raw.trim().parse().ok()?;
    if !number.is_finite() || number <= 0.0 || number.fract() != 0.0 {
        return None;
    }
    // Saturates for values beyond u64::MAX
    Some(number as u64)
}
