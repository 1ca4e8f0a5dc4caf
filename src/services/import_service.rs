//! One-shot import of the season CSV files into the fixture store.
//!
//! Jobs run one after another. Within a job every row is upserted
//! concurrently and the job only completes once all of them have. Any
//! failure aborts the whole import; rows already written stay written.

use std::collections::BTreeMap;
use std::sync::Arc;

use csv::{ReaderBuilder, StringRecord};
use futures::future::try_join_all;

use crate::db::{FixtureStore, StoreError};
use crate::models::fixture::{FixtureRecord, League, Season};

const DATE: &str = "Date";
const HOME_TEAM: &str = "HomeTeam";
const AWAY_TEAM: &str = "AwayTeam";
const FTHG: &str = "FTHG";
const FTAG: &str = "FTAG";
const REFEREE: &str = "Referee";

/// A source file and the league/season its rows belong to
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct ImportJob {
    pub league: League,
    pub season: Season,
    pub file: &'static str,
}

impl ImportJob {
    pub fn url(&self, csv_url_base: &str) -> String {
        format!("{}{}", csv_url_base, self.file)
    }
}

pub const IMPORT_JOBS: [ImportJob; 4] = [
    ImportJob { league: League::PremierLeague, season: Season::Season2018_2019, file: "1819-E0.csv" },
    ImportJob { league: League::PremierLeague, season: Season::Season2017_2018, file: "1718-E0.csv" },
    ImportJob { league: League::Bundesliga, season: Season::Season2018_2019, file: "1819-D1.csv" },
    ImportJob { league: League::Bundesliga, season: Season::Season2017_2018, file: "1718-D1.csv" },
];

#[derive(Debug, thiserror::Error)]
pub enum ImportError {
    #[error("Failed to fetch CSV file: {0}")]
    Fetch(#[from] reqwest::Error),

    #[error("Failed to read CSV file for {league} {season}: {source}")]
    Csv {
        league: League,
        season: Season,
        #[source]
        source: csv::Error,
    },

    #[error("Different file scheme was used in {league} {season}.")]
    SchemeMismatch { league: League, season: Season },

    #[error("Column {column} holds {value:?}, not a number, in {league} {season}.")]
    InvalidNumber {
        league: League,
        season: Season,
        column: &'static str,
        value: String,
    },

    #[error("Failed to upsert fixtures: {0}")]
    Upsert(#[from] StoreError),
}

/// Rows upserted per job
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ImportSummary {
    pub jobs: Vec<(ImportJob, usize)>,
}

impl ImportSummary {
    pub fn total_rows(&self) -> usize {
        self.jobs.iter().map(|(_, rows)| rows).sum()
    }
}

/// Turn a CSV payload with a header row into upsert records.
///
/// Every row needs a non-empty Date, HomeTeam and AwayTeam. Columns other
/// than the fixture fields are kept in [`FixtureRecord::extra`].
pub fn parse_fixtures(league: League, season: Season, payload: &str) -> Result<Vec<FixtureRecord>, ImportError> {
    let csv_error = |source: csv::Error| ImportError::Csv { league, season, source };

    let mut reader = ReaderBuilder::new()
        .has_headers(true)
        .flexible(true)
        .from_reader(payload.as_bytes());
    let headers = reader.headers().map_err(csv_error)?.clone();

    let mut records = Vec::new();
    for row in reader.records() {
        let row = row.map_err(csv_error)?;
        records.push(parse_row(league, season, &headers, &row)?);
    }

    Ok(records)
}

fn parse_row(
    league: League,
    season: Season,
    headers: &StringRecord,
    row: &StringRecord,
) -> Result<FixtureRecord, ImportError> {
    let mut columns: BTreeMap<&str, &str> = headers.iter().zip(row.iter()).collect();

    let mut required = |name: &str| match columns.remove(name) {
        Some(value) if !value.is_empty() => Ok(value.to_string()),
        _ => Err(ImportError::SchemeMismatch { league, season }),
    };
    let date = required(DATE)?;
    let home_team = required(HOME_TEAM)?;
    let away_team = required(AWAY_TEAM)?;

    let mut goals = |column: &'static str| -> Result<Option<i32>, ImportError> {
        match columns.remove(column).map(str::trim) {
            None | Some("") => Ok(None),
            Some(value) => value.parse().map(Some).map_err(|_| ImportError::InvalidNumber {
                league,
                season,
                column,
                value: value.to_string(),
            }),
        }
    };
    let fthg = goals(FTHG)?;
    let ftag = goals(FTAG)?;

    let referee = columns.remove(REFEREE).map(str::to_string);
    let extra = columns
        .into_iter()
        .filter(|(name, _)| !name.is_empty())
        .map(|(name, value)| (name.to_string(), value.to_string()))
        .collect();

    Ok(FixtureRecord {
        league,
        season,
        date,
        home_team,
        away_team,
        fthg,
        ftag,
        referee,
        extra,
    })
}

pub struct FixtureImporter {
    client: reqwest::Client,
    store: Arc<dyn FixtureStore>,
    csv_url_base: String,
}

impl FixtureImporter {
    pub fn new(client: reqwest::Client, store: Arc<dyn FixtureStore>, csv_url_base: impl Into<String>) -> Self {
        Self {
            client,
            store,
            csv_url_base: csv_url_base.into(),
        }
    }

    #[tracing::instrument(name = "Fetching fixtures CSV", skip(self))]
    pub async fn fetch_csv(&self, url: &str) -> Result<String, ImportError> {
        let payload = self
            .client
            .get(url)
            .send()
            .await?
            .error_for_status()?
            .text()
            .await?;
        Ok(payload)
    }

    /// Fetch, parse and upsert one file. Returns the number of rows written.
    #[tracing::instrument(
        name = "Importing fixtures",
        skip(self, job),
        fields(league = %job.league, season = %job.season)
    )]
    pub async fn run_job(&self, job: &ImportJob) -> Result<usize, ImportError> {
        let payload = self.fetch_csv(&job.url(&self.csv_url_base)).await?;
        let records = parse_fixtures(job.league, job.season, &payload)?;

        try_join_all(records.iter().map(|record| self.store.upsert(record))).await?;

        tracing::info!("{} {} fixtures have been upserted to the database.", job.league, job.season);
        Ok(records.len())
    }

    /// Run every job in [`IMPORT_JOBS`] order, then release the store
    pub async fn run_all(&self) -> Result<ImportSummary, ImportError> {
        let mut jobs = Vec::with_capacity(IMPORT_JOBS.len());
        for job in IMPORT_JOBS.iter() {
            let rows = self.run_job(job).await?;
            jobs.push((*job, rows));
        }

        self.store.close().await;
        Ok(ImportSummary { jobs })
    }
}
