use std::net::TcpListener;
use std::sync::Arc;
use secrecy::ExposeSecret;
use sqlx::postgres::PgPoolOptions;
use std::time::Duration;

use football_fixtures::run;
use football_fixtures::config::settings::get_config;
use football_fixtures::db::PgFixtureStore;
use football_fixtures::services::RedisService;
use football_fixtures::telemetry::{get_subscriber, init_subscriber};

#[tokio::main]
async fn main() -> std::io::Result<()> {
    // Panic if we can't read the config
    let config = get_config().expect("Failed to read the config.");

    let subscriber = get_subscriber(
        "football-fixtures".into(),
        config.application.log_level.clone(),
        std::io::stdout
    );
    init_subscriber(subscriber);

    // Redis
    let cache = match RedisService::new(&config.redis, config.cache.ttl_seconds).await {
        Ok(cache) => cache,
        Err(e) => {
            tracing::error!("Failed to connect to Redis: {}", e);
            std::process::exit(1);
        }
    };

    // Only try to establish connection when actually used
    let connection_pool = PgPoolOptions::new()
        .max_connections(32)
        .acquire_timeout(Duration::from_secs(10))
        .idle_timeout(Duration::from_secs(600))
        .max_lifetime(Duration::from_secs(1800))
        .connect_lazy(
            config.database.connection_string().expose_secret()
        )
        .expect("Failed to create Postgres connection pool");
    let store = PgFixtureStore::new(connection_pool, config.store.sort_key);
    if let Err(e) = store.migrate().await {
        tracing::error!("Failed to migrate the database: {}", e);
        std::process::exit(1);
    }

    let address = format!("{}:{}", config.application.host, config.application.port);
    let listener = TcpListener::bind(&address)?;
    tracing::info!("Swagger UI: {}/api-docs/", config.application.base_url);

    run(
        listener,
        Arc::new(store),
        Arc::new(cache),
        config.application.base_url.clone(),
    )?.await
}
