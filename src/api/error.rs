// src/api/error.rs
use actix_web::error::BlockingError;
use actix_web::http::StatusCode;
use actix_web::{HttpResponse, ResponseError};
use thiserror::Error;

use super::types::ErrorResponse;
use crate::generators::GeneratorError;

#[derive(Debug, Error)]
pub enum ApiError {
    #[error("Invalid value '{value}' for parameter '{name}'")]
    InvalidParameter { name: &'static str, value: String },

    #[error("Malformed query: {0}")]
    MalformedQuery(String),

    #[error("Request too large: {0}")]
    LimitExceeded(String),

    #[error("Failed to generate passwords: {0}")]
    Generator(#[from] GeneratorError),

    #[error("Password worker failed: {0}")]
    Blocking(#[from] BlockingError),

    #[error("Failed to encode response: {0}")]
    Serialization(#[from] serde_json::Error),
}

impl ResponseError for ApiError {
    fn status_code(&self) -> StatusCode {
        match self {
            ApiError::InvalidParameter { .. }
            | ApiError::MalformedQuery(_)
            | ApiError::LimitExceeded(_) => StatusCode::BAD_REQUEST,
            ApiError::Generator(_) | ApiError::Blocking(_) | ApiError::Serialization(_) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }

    fn error_response(&self) -> HttpResponse {
        // Server-side details stay in the log.
        let error = match self {
            ApiError::Generator(_) | ApiError::Blocking(_) => "Failed to generate passwords".to_string(),
            ApiError::Serialization(_) => "Failed to encode response".to_string(),
            other => other.to_string(),
        };
        HttpResponse::build(self.status_code()).json(ErrorResponse { error })
    }
}
