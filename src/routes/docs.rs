use actix_web::{get, http::header, HttpResponse};
use utoipa::OpenApi;
use utoipa_swagger_ui::SwaggerUi;

use crate::models::common::ErrorResponse;
use crate::models::fixture::Fixture;
use crate::routes::fixtures;

pub const OPENAPI_JSON: &str = "/api-docs/openapi.json";

/// OpenAPI document built from the annotations on the fixtures route
#[derive(OpenApi)]
#[openapi(
    info(
        title = "Football Fixtures API",
        version = "1.0.0",
        description = "API for football fixtures based on league and season."
    ),
    paths(fixtures::get_fixtures),
    components(schemas(Fixture, ErrorResponse))
)]
pub struct ApiDoc;

pub fn swagger_ui() -> SwaggerUi {
    SwaggerUi::new("/api-docs/{_:.*}").url(OPENAPI_JSON, ApiDoc::openapi())
}

#[get("/api-docs")]
pub async fn api_docs_redirect() -> HttpResponse {
    HttpResponse::PermanentRedirect()
        .insert_header((header::LOCATION, "/api-docs/"))
        .finish()
}
