use actix_web::{web, App, HttpServer};
use actix_web::dev::Server;
use tracing_actix_web::TracingLogger;
use std::net::TcpListener;
use std::sync::Arc;

pub mod config;
mod routes;
mod handlers;
pub mod models;
pub mod db;
pub mod query;
pub mod services;
pub mod telemetry;
use crate::routes::init_routes;
use crate::db::FixtureStore;
use crate::services::{FixtureService, QueryCache};

pub use crate::routes::docs::ApiDoc;

/// Public address of the running service, used to point clients at the docs
#[derive(Debug, Clone)]
pub struct ApplicationBaseUrl(pub String);

pub fn run(
    listener: TcpListener,
    store: Arc<dyn FixtureStore>,
    cache: Arc<dyn QueryCache>,
    base_url: String,
) -> Result<Server, std::io::Error> {
    // Wrap using web::Data, which boils down to an Arc smart pointer
    let fixture_service = web::Data::new(FixtureService::new(store, cache));
    let base_url = web::Data::new(ApplicationBaseUrl(base_url));

    let server = HttpServer::new(move || {
        App::new()
            .wrap(TracingLogger::default())
            .app_data(fixture_service.clone())
            .app_data(base_url.clone())
            .configure(init_routes)
    })
    .listen(listener)?
    .run();

    Ok(server)
}
