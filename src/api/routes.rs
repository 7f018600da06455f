// src/api/routes.rs
use super::handlers;
use actix_web::web;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    // Password generation
    cfg.service(
        web::resource("/passwords")
            .app_data(web::QueryConfig::default().error_handler(handlers::generator::query_error))
            .route(web::get().to(handlers::generator::get_passwords))
            .route(web::head().to(handlers::generator::get_passwords))
            .default_service(web::to(handlers::generator::method_not_allowed)),
    );
}
