pub mod backend_health_handler;
pub mod fixtures_handler;
