// src/api/types.rs
use serde::{Serialize, Deserialize};
use utoipa::{IntoParams, ToSchema};

use super::error::ApiError;
use crate::models::{GeneratorConfig, PasswordRequest};

pub const PARAM_MIN_LENGTH: &str = "minLength";
pub const PARAM_SPECIAL_CHARS: &str = "specialChars";
pub const PARAM_NUMBERS: &str = "numbers";
pub const PARAM_AMOUNT: &str = "amount";
pub const PARAM_SWAP: &str = "swap";

/// Query parameters of `GET /passwords`.
///
/// Values are kept as raw strings so that an empty value falls back to its
/// default instead of failing deserialization.
#[derive(Debug, Default, Deserialize, IntoParams)]
#[into_params(parameter_in = Query)]
pub struct PasswordQuery {
    /// Minimum total length (default: 0)
    #[serde(rename = "minLength")]
    #[param(value_type = Option<u32>)]
    pub min_length: Option<String>,
    /// Exact number of special characters (default: 0)
    #[serde(rename = "specialChars")]
    #[param(value_type = Option<u32>)]
    pub special_chars: Option<String>,
    /// Exact number of digits (default: 0)
    #[param(value_type = Option<u32>)]
    pub numbers: Option<String>,
    /// Number of passwords to return (default: 1)
    #[param(value_type = Option<u32>)]
    pub amount: Option<String>,
    /// Randomly replace vowels with look-alike digits (default: false)
    #[param(value_type = Option<bool>)]
    pub swap: Option<String>,
}

impl PasswordQuery {
    pub fn into_request(self) -> Result<PasswordRequest, ApiError> {
        Ok(PasswordRequest {
            config: GeneratorConfig {
                min_length: parse_count(PARAM_MIN_LENGTH, self.min_length.as_deref(), 0)?,
                digit_count: parse_count(PARAM_NUMBERS, self.numbers.as_deref(), 0)?,
                special_count: parse_count(PARAM_SPECIAL_CHARS, self.special_chars.as_deref(), 0)?,
                swap_vowels: parse_flag(PARAM_SWAP, self.swap.as_deref(), false)?,
            },
            amount: parse_count(PARAM_AMOUNT, self.amount.as_deref(), 1)?,
        })
    }
}

fn parse_count(name: &'static str, raw: Option<&str>, default: usize) -> Result<usize, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some(value) => value.parse().map_err(|_| ApiError::InvalidParameter {
            name,
            value: value.to_string(),
        }),
    }
}

fn parse_flag(name: &'static str, raw: Option<&str>, default: bool) -> Result<bool, ApiError> {
    match raw.map(str::trim) {
        None | Some("") => Ok(default),
        Some("1" | "t" | "T" | "true" | "True" | "TRUE") => Ok(true),
        Some("0" | "f" | "F" | "false" | "False" | "FALSE") => Ok(false),
        Some(value) => Err(ApiError::InvalidParameter {
            name,
            value: value.to_string(),
        }),
    }
}

#[derive(Debug, Serialize, Deserialize, ToSchema)]
pub struct ErrorResponse {
    /// What went wrong
    pub error: String,
}
