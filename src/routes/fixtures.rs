// src/routes/fixtures.rs
use actix_web::{get, web, HttpResponse};

use crate::handlers::fixtures_handler;
use crate::models::fixture::FixturesQuery;
use crate::query::QueryParams;
use crate::services::FixtureService;

/// Returns fixtures based on league and season.
#[utoipa::path(
    get,
    path = "/fixtures",
    params(FixturesQuery),
    responses(
        (status = 200, description = "Successful response with the fetched fixtures.", body = [Fixture]),
        (status = 400, description = "Bad request if league or season is missing or invalid values for limit or page.", body = ErrorResponse),
        (status = 500, description = "Internal server error.", body = ErrorResponse)
    )
)]
#[get("/fixtures")]
pub async fn get_fixtures(
    query: web::Query<Vec<(String, String)>>,
    service: web::Data<FixtureService>,
) -> HttpResponse {
    fixtures_handler::get_fixtures(QueryParams::new(query.into_inner()), service).await
}
