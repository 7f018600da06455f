// src/models.rs
use serde::{Serialize, Deserialize};

// Password generation options
//
// Counts are unsigned so a negative budget cannot be expressed at all.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct GeneratorConfig {
    /// Floor on the total number of characters
    pub min_length: usize,
    /// Exact number of digits drawn
    pub digit_count: usize,
    /// Exact number of special characters drawn
    pub special_count: usize,
    /// Randomly replace vowels with look-alike digits
    pub swap_vowels: bool,
}

impl GeneratorConfig {
    /// Length every password produced under this configuration will have,
    /// or `None` if the budgets overflow.
    pub fn resulting_length(&self) -> Option<usize> {
        self.digit_count
            .checked_add(self.special_count)
            .map(|required| required.max(self.min_length))
    }
}

/// A batch of passwords sharing one configuration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct PasswordRequest {
    pub config: GeneratorConfig,
    pub amount: usize,
}

impl Default for PasswordRequest {
    fn default() -> Self {
        Self {
            config: GeneratorConfig::default(),
            amount: 1,
        }
    }
}
