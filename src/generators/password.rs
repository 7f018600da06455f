// src/generators/password.rs
use crate::crypto::{self, CryptoError, OsRandom, SecureRandom};
use crate::models::GeneratorConfig;

use super::GeneratorError;

pub const LETTERS: &[u8] = b"abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ";
pub const DIGITS: &[u8] = b"0123456789";
/// OWASP password special characters, space included.
pub const SPECIALS: &[u8] = b" !\"#$%&'()*+,-./:;<=>?@[\\]^_`{|}~";
pub const VOWELS: &[u8] = b"aAeEiIoO";
/// Look-alike digit for each vowel pair in `VOWELS`.
pub const VOWEL_DIGITS: &[u8] = b"4310";

/// Digit a vowel may be swapped for, if `c` is one of `VOWELS`.
pub fn vowel_digit(c: u8) -> Option<u8> {
    VOWELS
        .iter()
        .position(|&v| v == c)
        .map(|i| VOWEL_DIGITS[i / 2])
}

/// Builds passwords for one fixed configuration.
///
/// The random source is injected so callers decide where entropy comes from;
/// each call to [`Generator::generate`] is independent of the previous ones.
pub struct Generator<R = OsRandom> {
    config: GeneratorConfig,
    rng: R,
}

impl<R: SecureRandom> Generator<R> {
    pub fn new(config: GeneratorConfig, rng: R) -> Self {
        Generator { config, rng }
    }

    pub fn generate(&self) -> Result<String, GeneratorError> {
        let length = self.config.resulting_length().ok_or_else(|| {
            GeneratorError::InvalidConfig(format!(
                "{} digits plus {} special characters overflows the password length",
                self.config.digit_count, self.config.special_count
            ))
        })?;

        let mut buffer = Vec::with_capacity(length);
        self.draw_into(&mut buffer, DIGITS, self.config.digit_count)?;
        self.draw_into(&mut buffer, SPECIALS, self.config.special_count)?;

        // Digits and specials are exact; letters only top up to the floor.
        let padding = self.config.min_length.saturating_sub(buffer.len());
        self.draw_into(&mut buffer, LETTERS, padding)?;

        Ok(self.shuffle(&buffer)?)
    }

    fn draw_into(&self, buffer: &mut Vec<u8>, class: &[u8], count: usize) -> Result<(), CryptoError> {
        for _ in 0..count {
            let idx = crypto::uniform_index(&self.rng, class.len())?;
            buffer.push(class[idx]);
        }
        Ok(())
    }

    // Reads the buffer through a uniform permutation, swapping vowels on the
    // way out when enabled.
    fn shuffle(&self, buffer: &[u8]) -> Result<String, CryptoError> {
        let order = crypto::uniform_permutation(&self.rng, buffer.len())?;

        let mut password = String::with_capacity(buffer.len());
        for idx in order {
            let mut c = buffer[idx];
            if self.config.swap_vowels {
                c = self.maybe_swap(c)?;
            }
            password.push(char::from(c));
        }
        Ok(password)
    }

    fn maybe_swap(&self, c: u8) -> Result<u8, CryptoError> {
        match vowel_digit(c) {
            Some(digit) => {
                if crypto::uniform_index(&self.rng, 2)? == 1 {
                    Ok(digit)
                } else {
                    Ok(c)
                }
            }
            None => Ok(c),
        }
    }
}
