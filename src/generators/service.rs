// src/generators/service.rs
use crate::crypto::{OsRandom, SecureRandom};
use crate::models::PasswordRequest;

use super::{Generator, GeneratorError};

/// Produces batches of passwords; the seam the HTTP layer depends on.
pub trait Passworder: Send + Sync {
    fn passwords(&self, request: &PasswordRequest) -> Result<Vec<String>, GeneratorError>;
}

/// Builds a fresh [`Generator`] per request over a shared random source.
#[derive(Debug, Default, Clone)]
pub struct PasswordService<R = OsRandom> {
    rng: R,
}

impl<R: SecureRandom + Clone> PasswordService<R> {
    pub fn new(rng: R) -> Self {
        PasswordService { rng }
    }
}

impl<R: SecureRandom + Clone> Passworder for PasswordService<R> {
    fn passwords(&self, request: &PasswordRequest) -> Result<Vec<String>, GeneratorError> {
        let generator = Generator::new(request.config, self.rng.clone());
        (0..request.amount).map(|_| generator.generate()).collect()
    }
}
