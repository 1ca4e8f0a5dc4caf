//! Loads the four league/season CSV files into the fixture store.
//!
//! Takes no arguments. The database comes from `DATABASE_URL` or the layered
//! configuration, the CSV location from `import.csv_url_base`. Any failure
//! ends the process with status 1.

use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;

use football_fixtures::config::settings::get_config;
use football_fixtures::db::PgFixtureStore;
use football_fixtures::services::FixtureImporter;
use football_fixtures::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() {
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "import-fixtures".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    let connection_pool = match PgPoolOptions::new()
        .max_connections(16)
        .connect(config.database.connection_string().expose_secret())
        .await
    {
        Ok(pool) => pool,
        Err(e) => {
            tracing::error!("Failed to connect to Postgres: {}", e);
            std::process::exit(1);
        }
    };
    let store = PgFixtureStore::new(connection_pool, config.store.sort_key);
    if let Err(e) = store.migrate().await {
        tracing::error!("Failed to migrate the database: {}", e);
        std::process::exit(1);
    }

    let importer = FixtureImporter::new(
        reqwest::Client::new(),
        Arc::new(store),
        config.import.csv_url_base.clone(),
    );

    match importer.run_all().await {
        Ok(summary) => {
            tracing::info!(rows = summary.total_rows(), "Import finished");
        }
        Err(e) => {
            tracing::error!("{}", e);
            std::process::exit(1);
        }
    }
}
