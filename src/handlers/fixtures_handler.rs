use actix_web::http::header::ContentType;
use actix_web::{web, HttpResponse};

use crate::models::common::ErrorResponse;
use crate::query::QueryParams;
use crate::services::FixtureService;

/// Serve a fixtures page; the body is sent exactly as produced or cached.
pub async fn get_fixtures(
    params: QueryParams,
    service: web::Data<FixtureService>,
) -> HttpResponse {
    match service.find_fixtures(&params).await {
        Ok(body) => HttpResponse::Ok()
            .content_type(ContentType::json())
            .insert_header(("X-Cache", body.cache.as_str()))
            .body(body.json),
        Err(e) if e.is_validation() => {
            HttpResponse::BadRequest().json(ErrorResponse::new(e.to_string()))
        }
        Err(e) => {
            tracing::error!("Failed to look up fixtures: {}", e);
            HttpResponse::InternalServerError().json(ErrorResponse::new("Internal server error."))
        }
    }
}
