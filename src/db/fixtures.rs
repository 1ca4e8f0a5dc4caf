use async_trait::async_trait;
use sqlx::types::Json;
use sqlx::PgPool;

use crate::db::{FixtureStore, StoreError};
use crate::models::fixture::{Fixture, FixtureRecord, FixtureSortKey, League, PageWindow, Season};

/// Postgres-backed fixture collection
#[derive(Clone, Debug)]
pub struct PgFixtureStore {
    pool: PgPool,
    sort_key: FixtureSortKey,
}

impl PgFixtureStore {
    pub fn new(pool: PgPool, sort_key: FixtureSortKey) -> Self {
        Self { pool, sort_key }
    }

    #[tracing::instrument(name = "Running fixture migrations", skip(self))]
    pub async fn migrate(&self) -> Result<(), StoreError> {
        sqlx::migrate!("./migrations").run(&self.pool).await?;
        Ok(())
    }

    fn order_by(&self) -> String {
        match self.sort_key {
            FixtureSortKey::Id => "id".to_string(),
            // id keeps pages stable when the sort column has ties
            other => format!("{}, id", other.column()),
        }
    }
}

fn to_i64(value: u64) -> i64 {
    i64::try_from(value).unwrap_or(i64::MAX)
}

#[async_trait]
impl FixtureStore for PgFixtureStore {
    #[tracing::instrument(
        name = "Fetching fixtures page",
        skip(self),
        fields(league = %league, season = %season)
    )]
    async fn find_page(
        &self,
        league: League,
        season: Season,
        window: PageWindow,
    ) -> Result<Vec<Fixture>, StoreError> {
        let query = format!(
            r#"
            SELECT id, league, season, date, home_team, away_team, fthg, ftag, referee
            FROM fixtures
            WHERE league = $1 AND season = $2
            ORDER BY {}
            LIMIT $3 OFFSET $4
            "#,
            self.order_by()
        );

        let fixtures = sqlx::query_as::<_, Fixture>(&query)
            .bind(league.as_str())
            .bind(season.as_str())
            .bind(to_i64(window.limit))
            .bind(to_i64(window.skip()))
            .fetch_all(&self.pool)
            .await?;

        Ok(fixtures)
    }

    async fn upsert(&self, record: &FixtureRecord) -> Result<(), StoreError> {
        sqlx::query(
            r#"
            INSERT INTO fixtures (league, season, date, home_team, away_team, fthg, ftag, referee, extra)
            VALUES ($1, $2, $3, $4, $5, $6, $7, $8, $9)
            ON CONFLICT ON CONSTRAINT fixtures_identity DO UPDATE SET
                fthg = EXCLUDED.fthg,
                ftag = EXCLUDED.ftag,
                referee = EXCLUDED.referee,
                extra = EXCLUDED.extra
            "#,
        )
        .bind(record.league.as_str())
        .bind(record.season.as_str())
        .bind(&record.date)
        .bind(&record.home_team)
        .bind(&record.away_team)
        .bind(record.fthg)
        .bind(record.ftag)
        .bind(&record.referee)
        .bind(Json(&record.extra))
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    async fn count(&self, league: League, season: Season) -> Result<i64, StoreError> {
        let count: i64 = sqlx::query_scalar(
            "SELECT COUNT(*) FROM fixtures WHERE league = $1 AND season = $2",
        )
        .bind(league.as_str())
        .bind(season.as_str())
        .fetch_one(&self.pool)
        .await?;

        Ok(count)
    }

    async fn close(&self) {
        self.pool.close().await;
    }
}
