use actix_web::web;

pub mod backend_health;
pub mod docs;
pub mod fixtures;
pub mod index;

pub fn init_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(index::index)
        .service(backend_health::backend_health)
        .service(fixtures::get_fixtures);

    // API documentation
    cfg.service(docs::api_docs_redirect)
        .service(docs::swagger_ui());
}
