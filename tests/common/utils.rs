use once_cell::sync::Lazy;
use secrecy::ExposeSecret;
use sqlx::{Connection, Executor, PgConnection, PgPool};
use std::collections::BTreeMap;
use std::net::TcpListener;
use std::sync::Arc;
use uuid::Uuid;

use football_fixtures::config::settings::{get_config, DatabaseSettings};
use football_fixtures::db::{FixtureStore, InMemoryFixtureStore, PgFixtureStore};
use football_fixtures::models::fixture::FixtureSortKey;
use football_fixtures::models::fixture::{FixtureRecord, League, Season};
use football_fixtures::run;
use football_fixtures::services::{InMemoryQueryCache, QueryCache};
use football_fixtures::telemetry::{get_subscriber, init_subscriber};

// Ensure that the `tracing` stack is only initialised once using `once_cell`
static TRACING: Lazy<()> = Lazy::new(|| {
    let default_filter_level = "info".to_string();
    let subscriber_name = "test".to_string();

    if std::env::var("TEST_LOG").is_ok() {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::stdout
        );
        init_subscriber(subscriber);
    } else {
        let subscriber = get_subscriber(
            subscriber_name,
            default_filter_level,
            std::io::sink
        );
        init_subscriber(subscriber);
    }
});

pub struct TestApp {
    pub address: String,
    pub store: Arc<InMemoryFixtureStore>,
    pub cache: Arc<InMemoryQueryCache>,
}

/// Spawn the API on a random port, backed by in-memory store and cache
pub async fn spawn_app() -> TestApp {
    let store = Arc::new(InMemoryFixtureStore::default());
    let cache = Arc::new(InMemoryQueryCache::new());
    let address = spawn_app_with(store.clone(), cache.clone()).await;

    TestApp { address, store, cache }
}

pub async fn spawn_app_with(store: Arc<dyn FixtureStore>, cache: Arc<dyn QueryCache>) -> String {
    // The first time `initialize` is invoked the code in `TRACING` is executed.
    // All other invocations will instead skip execution.
    Lazy::force(&TRACING);

    let listener = TcpListener::bind("127.0.0.1:0")
        .expect("Failed to bind random port");
    // Get port assigned by the OS
    let port = listener.local_addr().unwrap().port();
    let address = format!("http://127.0.0.1:{}", port);

    let server = run(listener, store, cache, address.clone())
        .expect("Failed to bind address");
    // Launch the server as a background task
    let _ = tokio::spawn(server);

    address
}

pub async fn configure_db(config: &DatabaseSettings) -> PgPool {
    // Create database
    let mut connection = PgConnection::connect(
            config.connection_string_without_db().expose_secret()
        )
        .await
        .expect("Failed to connect to Postgres");
    connection
        .execute(format!(r#"CREATE DATABASE "{}";"#, config.db_name).as_str())
        .await
        .expect("Failed to create database.");

    // Migrate database
    let connection_pool = PgPool::connect(config.connection_string().expose_secret())
        .await
        .expect("Failed to connect to Postgres.");
    sqlx::migrate!("./migrations")
        .run(&connection_pool)
        .await
        .expect("Failed to migrate the database");

    connection_pool
}

/// A `PgFixtureStore` over a freshly created, migrated database
pub async fn spawn_pg_store() -> (Arc<PgFixtureStore>, PgPool) {
    let mut configuration = get_config().expect("Failed to read configuration.");
    configuration.database.db_name = Uuid::new_v4().to_string();
    // The per-test database is addressed by its parts
    configuration.database.db_url = None;
    let pool = configure_db(&configuration.database).await;

    let store = Arc::new(PgFixtureStore::new(pool.clone(), FixtureSortKey::Id));
    (store, pool)
}

pub fn fixture(league: League, season: Season, date: &str, home: &str, away: &str) -> FixtureRecord {
    FixtureRecord {
        league,
        season,
        date: date.to_string(),
        home_team: home.to_string(),
        away_team: away.to_string(),
        fthg: Some(1),
        ftag: Some(1),
        referee: Some("M Oliver".to_string()),
        extra: BTreeMap::new(),
    }
}

/// Five Premier League 2018-2019 matches plus one from another season
pub async fn seed_fixtures(store: &dyn FixtureStore) {
    let matches = [
        ("10/08/2018", "Man United", "Leicester"),
        ("11/08/2018", "Bournemouth", "Cardiff"),
        ("11/08/2018", "Fulham", "Crystal Palace"),
        ("11/08/2018", "Huddersfield", "Chelsea"),
        ("11/08/2018", "Newcastle", "Tottenham"),
    ];
    for (date, home, away) in matches {
        store
            .upsert(&fixture(League::PremierLeague, Season::Season2018_2019, date, home, away))
            .await
            .expect("Failed to seed fixture");
    }
    store
        .upsert(&fixture(League::PremierLeague, Season::Season2017_2018, "11/08/2017", "Arsenal", "Leicester"))
        .await
        .expect("Failed to seed fixture");
}
