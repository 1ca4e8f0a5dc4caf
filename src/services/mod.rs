pub mod cache;
pub mod fixture_service;
pub mod import_service;
pub mod redis_service;

pub use cache::{CacheError, InMemoryQueryCache, QueryCache};
pub use fixture_service::{CacheStatus, FixtureService, FixturesBody};
pub use import_service::{FixtureImporter, ImportError, ImportJob, ImportSummary, IMPORT_JOBS};
pub use redis_service::RedisService;
