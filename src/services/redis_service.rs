use async_trait::async_trait;
use redis::aio::ConnectionManager;
use redis::{AsyncCommands, Client};
use secrecy::ExposeSecret;

use crate::config::redis::RedisSettings;
use crate::services::cache::{CacheError, QueryCache};

/// Redis-backed [`QueryCache`]
#[derive(Clone)]
pub struct RedisService {
    connection: ConnectionManager,
    ttl_seconds: Option<u64>,
}

impl RedisService {
    /// Connects eagerly; a zero TTL means entries never expire.
    pub async fn new(settings: &RedisSettings, ttl_seconds: Option<u64>) -> Result<Self, CacheError> {
        let client = match Client::open(settings.get_redis_url().expose_secret()) {
            Ok(client) => {
                tracing::info!("Redis client created successfully");
                client
            },
            Err(e) => {
                tracing::error!("Failed to create Redis client: {}", e);
                return Err(e.into());
            }
        };
        let connection = ConnectionManager::new(client).await?;
        Ok(Self {
            connection,
            ttl_seconds: ttl_seconds.filter(|ttl| *ttl > 0),
        })
    }
}

#[async_trait]
impl QueryCache for RedisService {
    async fn get(&self, key: &str) -> Result<Option<String>, CacheError> {
        let mut conn = self.connection.clone();
        let value: Option<String> = conn.get(key).await?;
        Ok(value)
    }

    async fn set(&self, key: &str, value: &str) -> Result<(), CacheError> {
        let mut conn = self.connection.clone();
        match self.ttl_seconds {
            Some(ttl) => {
                let _: () = conn.set_ex(key, value, ttl as usize).await?;
            }
            None => {
                let _: () = conn.set(key, value).await?;
            }
        }
        Ok(())
    }
}
