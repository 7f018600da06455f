// src/api/handlers/generator.rs

use actix_web::error::QueryPayloadError;
use actix_web::http::header::{self, ContentType};
use actix_web::{web, HttpRequest, HttpResponse};
use log::{debug, error, warn};

use crate::api::error::ApiError;
use crate::api::types::{ErrorResponse, PasswordQuery};
use crate::core::RequestLimits;
use crate::generators::Passworder;

/// Generate passwords
///
/// Returns `amount` independently generated passwords as a JSON array.
#[utoipa::path(
    get,
    path = "/passwords",
    tag = "Generator",
    params(PasswordQuery),
    responses(
        (status = 200, description = "Generated passwords", body = [String]),
        (status = 400, description = "Malformed or too large request", body = ErrorResponse),
        (status = 405, description = "Method not allowed"),
        (status = 500, description = "Password generation failed", body = ErrorResponse)
    )
)]
pub async fn get_passwords(
    req: HttpRequest,
    query: web::Query<PasswordQuery>,
    limits: web::Data<RequestLimits>,
    passworder: web::Data<dyn Passworder>,
) -> Result<HttpResponse, ApiError> {
    let request = query.into_inner().into_request().map_err(|e| {
        warn!("Rejected password request: {}", e);
        e
    })?;

    if let Some(violation) = limits.violation(&request) {
        warn!("Rejected password request: {}", violation);
        return Err(ApiError::LimitExceeded(violation));
    }

    debug!(
        "{} /passwords: generating {} password(s) of length {:?}",
        req.method(),
        request.amount,
        request.config.resulting_length()
    );

    // Generation is CPU bound and reads entropy per character, keep it off
    // the async worker.
    let passwords = web::block(move || passworder.passwords(&request))
        .await
        .map_err(|e| {
            error!("Password worker failed: {}", e);
            ApiError::from(e)
        })?
        .map_err(|e| {
            error!("Password generation failed: {}", e);
            ApiError::from(e)
        })?;
    debug!("Generated {} password(s)", passwords.len());

    let body = serde_json::to_vec(&passwords)?;
    Ok(HttpResponse::Ok()
        .content_type(ContentType::json())
        .insert_header((header::CONTENT_LENGTH, body.len().to_string()))
        .body(body))
}

/// Turns query extraction failures (such as a repeated parameter) into the
/// usual JSON error body.
pub fn query_error(err: QueryPayloadError, _req: &HttpRequest) -> actix_web::Error {
    warn!("Rejected password request: {}", err);
    ApiError::MalformedQuery(err.to_string()).into()
}

/// Only GET and HEAD are served on `/passwords`.
pub async fn method_not_allowed() -> HttpResponse {
    HttpResponse::MethodNotAllowed()
        .insert_header((header::ALLOW, "GET, HEAD"))
        .finish()
}
