use async_trait::async_trait;
use std::collections::{BTreeMap, HashMap};
use tokio::sync::RwLock;

use crate::db::{FixtureStore, StoreError};
use crate::models::fixture::{Fixture, FixtureKey, FixtureRecord, FixtureSortKey, League, PageWindow, Season};

#[derive(Default)]
struct Inner {
    rows: Vec<Fixture>,
    // Parallel to `rows`, the `extra` column
    extras: Vec<BTreeMap<String, String>>,
    index: HashMap<FixtureKey, usize>,
}

/// Process-local fixture collection.
///
/// Upserts overwrite the scores, referee and extra columns of the row sharing
/// the identity tuple, and ids grow in insertion order, as in `fixtures`.
#[derive(Default)]
pub struct InMemoryFixtureStore {
    inner: RwLock<Inner>,
    sort_key: FixtureSortKey,
}

impl InMemoryFixtureStore {
    pub fn new(sort_key: FixtureSortKey) -> Self {
        Self {
            inner: RwLock::new(Inner::default()),
            sort_key,
        }
    }

    pub async fn len(&self) -> usize {
        self.inner.read().await.rows.len()
    }

    pub async fn is_empty(&self) -> bool {
        self.len().await == 0
    }
}

#[async_trait]
impl FixtureStore for InMemoryFixtureStore {
    async fn find_page(
        &self,
        league: League,
        season: Season,
        window: PageWindow,
    ) -> Result<Vec<Fixture>, StoreError> {
        let inner = self.inner.read().await;
        let mut matching: Vec<&Fixture> = inner
            .rows
            .iter()
            .filter(|f| f.league == league.as_str() && f.season == season.as_str())
            .collect();

        match self.sort_key {
            FixtureSortKey::Id => {}
            FixtureSortKey::Date => matching.sort_by(|a, b| a.date.cmp(&b.date).then(a.id.cmp(&b.id))),
            FixtureSortKey::HomeTeam => {
                matching.sort_by(|a, b| a.home_team.cmp(&b.home_team).then(a.id.cmp(&b.id)))
            }
        }

        let skip = usize::try_from(window.skip()).unwrap_or(usize::MAX);
        let limit = usize::try_from(window.limit).unwrap_or(usize::MAX);

        Ok(matching.into_iter().skip(skip).take(limit).cloned().collect())
    }

    async fn upsert(&self, record: &FixtureRecord) -> Result<(), StoreError> {
        let mut inner = self.inner.write().await;
        let key = record.key();

        if let Some(&position) = inner.index.get(&key) {
            let row = &mut inner.rows[position];
            row.fthg = record.fthg;
            row.ftag = record.ftag;
            row.referee = record.referee.clone();
            inner.extras[position] = record.extra.clone();
            return Ok(());
        }

        let id = inner.rows.len() as i64 + 1;
        inner.rows.push(Fixture {
            id,
            league: record.league.as_str().to_string(),
            season: record.season.as_str().to_string(),
            date: record.date.clone(),
            home_team: record.home_team.clone(),
            away_team: record.away_team.clone(),
            fthg: record.fthg,
            ftag: record.ftag,
            referee: record.referee.clone(),
        });
        inner.extras.push(record.extra.clone());
        let position = inner.rows.len() - 1;
        inner.index.insert(key, position);

        Ok(())
    }

    async fn count(&self, league: League, season: Season) -> Result<i64, StoreError> {
        let inner = self.inner.read().await;
        Ok(inner
            .rows
            .iter()
            .filter(|f| f.league == league.as_str() && f.season == season.as_str())
            .count() as i64)
    }

    async fn close(&self) {}
}
