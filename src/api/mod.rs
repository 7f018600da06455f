// src/api/mod.rs
use actix_web::{web, App, HttpServer};
use std::sync::Arc;
use utoipa::OpenApi;
use utoipa_redoc::{Redoc, Servable};

use crate::core::tls;
use crate::core::Config;
use crate::generators::{PasswordService, Passworder};
use crate::crypto::OsRandom;
use middleware::AccessLog;

// This will hold our API documentation
#[derive(OpenApi)]
#[openapi(
    paths(
        // Generator endpoints
        crate::api::handlers::generator::get_passwords,
    ),
    components(
        schemas(
            crate::api::types::ErrorResponse,
        )
    ),
    tags(
        (name = "Generator", description = "Password generation endpoints")
    ),
    info(
        title = "pwgen API",
        version = "0.1.0",
        description = "Cryptographically secure password generation",
        license(name = "MIT")
    )
)]
pub struct ApiDoc;

pub async fn start_server(config: Config) -> anyhow::Result<()> {
    let limits = web::Data::new(config.limits);
    let service: Arc<dyn Passworder> = Arc::new(PasswordService::new(OsRandom));
    let passworder = web::Data::from(service);

    // actix only takes whole seconds; round up so a short grace period is not zero
    let grace_secs = config.grace_period.as_secs_f64().ceil() as u64;

    let server = HttpServer::new(move || {
        App::new()
            .wrap(AccessLog)
            .app_data(limits.clone())
            .app_data(passworder.clone())
            .service(Redoc::with_url("/redoc", ApiDoc::openapi()))
            .configure(routes::configure_routes)
    })
    .shutdown_timeout(grace_secs);

    let addr = (config.bind_address.clone(), config.port);
    let server = if config.tls_enabled {
        let tls_config = tls::load_server_config(&config.cert_file, &config.key_file)?;
        log::info!("🔒 pwgen listening on {}", config.listen_url());
        server.bind_rustls_0_23(addr, tls_config)?
    } else {
        log::warn!("TLS disabled, pwgen listening on {}", config.listen_url());
        server.bind(addr)?
    };

    server.run().await?;
    log::info!("pwgen shuts down now.");
    Ok(())
}

pub mod error;
pub mod types;
pub mod routes;
pub mod handlers;
pub mod middleware;
