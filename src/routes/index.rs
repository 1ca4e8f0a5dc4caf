use actix_web::http::header::ContentType;
use actix_web::{get, web, HttpResponse};

use crate::ApplicationBaseUrl;

#[get("/")]
pub async fn index(base_url: web::Data<ApplicationBaseUrl>) -> HttpResponse {
    HttpResponse::Ok()
        .content_type(ContentType::plaintext())
        .body(format!("Swagger UI: {}/api-docs/", base_url.0))
}
