// src/generators/mod.rs
use thiserror::Error;

use crate::crypto::CryptoError;

pub mod password;
pub mod service;

pub use password::Generator;
pub use service::{PasswordService, Passworder};

#[derive(Debug, Error)]
pub enum GeneratorError {
    #[error(transparent)]
    Crypto(#[from] CryptoError),

    #[error("Invalid generator configuration: {0}")]
    InvalidConfig(String),
}
