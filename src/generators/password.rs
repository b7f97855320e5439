// src/generators/password.rs
use rand::{distributions::{Distribution, Uniform}, Rng};
use thiserror::Error;
use crate::models::PasswordGenerationOptions;

pub const LOWERCASE: &[u8] = b"abcdefghijklmnopqrstuvwxyz";
pub const NUMBERS: &[u8] = b"0123456789";
pub const SYMBOLS: &[u8] = b"!@#$%^&*()_+-=[]{}|;:,.<>?";
pub const UPPERCASE: &[u8] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZ";

/// Length range offered by the interactive surfaces. The generator itself
/// accepts any length.
pub const MIN_UI_LENGTH: usize = 8;
pub const MAX_UI_LENGTH: usize = 32;

#[derive(Debug, Error, PartialEq, Eq)]
pub enum GeneratorError {
    #[error("Password length must not be negative (got {0})")]
    InvalidLength(i64),
    #[error("Password length {length} exceeds the maximum of {max}")]
    LengthTooLarge { length: usize, max: usize },
}

pub struct PasswordGenerator;

impl PasswordGenerator {
    pub fn new() -> Self {
        PasswordGenerator
    }

    pub fn generate_password(&self, options: &PasswordGenerationOptions) -> String {
        generate_with_rng(options, &mut rand::thread_rng())
    }
}

impl Default for PasswordGenerator {
    fn default() -> Self {
        Self::new()
    }
}

/// Candidate characters for `options`: lowercase always, then numbers,
/// symbols and uppercase when requested.
pub fn alphabet(options: &PasswordGenerationOptions) -> Vec<u8> {
    let mut chars = Vec::with_capacity(LOWERCASE.len() + NUMBERS.len() + SYMBOLS.len() + UPPERCASE.len());

    chars.extend(LOWERCASE);
    if options.include_numbers {
        chars.extend(NUMBERS);
    }
    if options.include_symbols {
        chars.extend(SYMBOLS);
    }
    if options.include_uppercase {
        chars.extend(UPPERCASE);
    }

    chars
}

/// Draws `options.length` characters independently and uniformly by index
/// from the combined alphabet. No class is guaranteed to appear.
pub fn generate_with_rng<R: Rng + ?Sized>(options: &PasswordGenerationOptions, rng: &mut R) -> String {
    let chars = alphabet(options);
    let dist = Uniform::from(0..chars.len());

    (0..options.length)
        .map(|_| chars[dist.sample(&mut *rng)] as char)
        .collect()
}

/// Validates a signed length coming from an untyped boundary (JSON, CLI).
pub fn checked_length(length: i64) -> Result<usize, GeneratorError> {
    usize::try_from(length).map_err(|_| GeneratorError::InvalidLength(length))
}
