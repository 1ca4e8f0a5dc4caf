// src/models/fixture.rs
use serde::{Deserialize, Serialize};
use sqlx::FromRow;
use std::collections::BTreeMap;
use std::fmt;
use utoipa::{IntoParams, ToSchema};

/// Leagues the API serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum League {
    PremierLeague,
    Bundesliga,
}

impl League {
    pub const ALL: [League; 2] = [League::PremierLeague, League::Bundesliga];

    pub fn as_str(&self) -> &'static str {
        match self {
            League::PremierLeague => "Premier League",
            League::Bundesliga => "Bundesliga",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|league| league.as_str() == value)
    }
}

impl fmt::Display for League {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Seasons the API serves
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Season {
    Season2018_2019,
    Season2017_2018,
}

impl Season {
    pub const ALL: [Season; 2] = [Season::Season2018_2019, Season::Season2017_2018];

    pub fn as_str(&self) -> &'static str {
        match self {
            Season::Season2018_2019 => "2018-2019",
            Season::Season2017_2018 => "2017-2018",
        }
    }

    pub fn parse(value: &str) -> Option<Self> {
        Self::ALL.into_iter().find(|season| season.as_str() == value)
    }
}

impl fmt::Display for Season {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// A stored match as returned by `GET /fixtures`
#[derive(Debug, FromRow, Serialize, Deserialize, Clone, PartialEq, ToSchema)]
pub struct Fixture {
    pub id: i64,
    #[serde(rename = "League")]
    pub league: String,
    #[serde(rename = "Season")]
    pub season: String,
    #[serde(rename = "Date")]
    pub date: String,
    #[serde(rename = "HomeTeam")]
    pub home_team: String,
    #[serde(rename = "AwayTeam")]
    pub away_team: String,
    #[serde(rename = "FTHG")]
    pub fthg: Option<i32>,
    #[serde(rename = "FTAG")]
    pub ftag: Option<i32>,
    #[serde(rename = "Referee")]
    pub referee: Option<String>,
}

/// Declared parameters of `GET /fixtures`, as published in the API docs.
///
/// Requests are not deserialized into this type: the raw pairs are kept so
/// the cache key reflects exactly what the client sent.
#[derive(Debug, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct FixturesQuery {
    /// The name of the football league. (Premier League or Bundesliga)
    #[param(default = "Premier League")]
    pub league: String,
    /// The name of the football season. (2018-2019 or 2017-2018)
    #[param(default = "2018-2019")]
    pub season: String,
    /// The maximum number of fixtures to return. (Default is 15)
    #[param(default = 15, minimum = 1)]
    pub limit: Option<i64>,
    /// The page number for paginated results. (Default is 1)
    #[param(default = 1, minimum = 1)]
    pub page: Option<i64>,
}

/// One imported CSV row, ready to be upserted
#[derive(Debug, Clone, PartialEq)]
pub struct FixtureRecord {
    pub league: League,
    pub season: Season,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
    pub fthg: Option<i32>,
    pub ftag: Option<i32>,
    pub referee: Option<String>,
    /// Every other column of the source row, keyed by header
    pub extra: BTreeMap<String, String>,
}

/// Upsert identity of a fixture
#[derive(Debug, Clone, PartialEq, Eq, Hash)]
pub struct FixtureKey {
    pub league: League,
    pub season: Season,
    pub date: String,
    pub home_team: String,
    pub away_team: String,
}

impl FixtureRecord {
    pub fn key(&self) -> FixtureKey {
        FixtureKey {
            league: self.league,
            season: self.season,
            date: self.date.clone(),
            home_team: self.home_team.clone(),
            away_team: self.away_team.clone(),
        }
    }
}

/// Order in which a league/season page is read from the store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum FixtureSortKey {
    /// Insertion order
    #[default]
    Id,
    Date,
    HomeTeam,
}

impl FixtureSortKey {
    pub fn column(&self) -> &'static str {
        match self {
            FixtureSortKey::Id => "id",
            FixtureSortKey::Date => "date",
            FixtureSortKey::HomeTeam => "home_team",
        }
    }
}

/// Skip/limit window derived from `page` and `limit`
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PageWindow {
    pub limit: u64,
    pub page: u64,
}

impl PageWindow {
    pub fn skip(&self) -> u64 {
        (self.page - 1).saturating_mul(self.limit)
    }
}
