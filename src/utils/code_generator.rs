//! Random short code generation.
//!
//! Codes are drawn uniformly per character from a configured alphabet. They
//! are not guaranteed to be unique; the store's key constraint decides.

use crate::domain::entities::ShortCode;
use anyhow::Result;
use rand::Rng;

/// Default alphabet: ASCII letters and digits.
pub const DEFAULT_ALPHABET: &str =
    "abcdefghijklmnopqrstuvwxyzABCDEFGHIJKLMNOPQRSTUVWXYZ0123456789";

/// Default code length.
pub const DEFAULT_CODE_LENGTH: usize = 8;

/// Generates fixed-length random short codes.
#[derive(Debug, Clone)]
pub struct CodeGenerator {
    alphabet: Vec<char>,
    length: usize,
}

impl CodeGenerator {
    /// Creates a generator for the given alphabet and length.
    ///
    /// # Errors
    ///
    /// Returns an error if the alphabet is empty or the length is zero.
    pub fn new(alphabet: &str, length: usize) -> Result<Self> {
        let alphabet: Vec<char> = alphabet.chars().collect();

        if alphabet.is_empty() {
            anyhow::bail!("Short code alphabet must not be empty");
        }

        if length == 0 {
            anyhow::bail!("Short code length must be at least 1");
        }

        Ok(Self { alphabet, length })
    }

    pub fn length(&self) -> usize {
        self.length
    }

    /// Draws a new candidate code.
    pub fn generate(&self) -> ShortCode {
        let mut rng = rand::rng();

        let code: String = (0..self.length)
            .map(|_| self.alphabet[rng.random_range(0..self.alphabet.len())])
            .collect();

        ShortCode::new(code)
    }
}

impl Default for CodeGenerator {
    fn default() -> Self {
        Self {
            alphabet: DEFAULT_ALPHABET.chars().collect(),
            length: DEFAULT_CODE_LENGTH,
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::collections::HashSet;

    #[test]
    fn test_generate_has_configured_length() {
        for length in [1, 5, 8, 32] {
            let generator = CodeGenerator::new(DEFAULT_ALPHABET, length).unwrap();
            assert_eq!(generator.generate().as_str().chars().count(), length);
        }
    }

    #[test]
    fn test_generate_uses_only_alphabet_characters() {
        let generator = CodeGenerator::new("xyz", 64).unwrap();

        for _ in 0..100 {
            let code = generator.generate();
            assert!(code.as_str().chars().all(|c| "xyz".contains(c)));
        }
    }

    #[test]
    fn test_generate_single_character_alphabet() {
        let generator = CodeGenerator::new("a", 6).unwrap();
        assert_eq!(generator.generate().as_str(), "aaaaaa");
    }

    #[test]
    fn test_generate_multibyte_alphabet() {
        let generator = CodeGenerator::new("äöü", 4).unwrap();
        let code = generator.generate();

        assert_eq!(code.as_str().chars().count(), 4);
        assert!(code.as_str().chars().all(|c| "äöü".contains(c)));
    }

    #[test]
    fn test_generate_produces_distinct_codes() {
        let generator = CodeGenerator::default();
        let codes: HashSet<String> = (0..1000)
            .map(|_| generator.generate().as_str().to_string())
            .collect();

        assert_eq!(codes.len(), 1000);
    }

    #[test]
    fn test_default_generator() {
        let generator = CodeGenerator::default();
        assert_eq!(generator.length(), DEFAULT_CODE_LENGTH);
        assert!(
            generator
                .generate()
                .as_str()
                .chars()
                .all(|c| c.is_ascii_alphanumeric())
        );
    }

    #[test]
    fn test_empty_alphabet_rejected() {
        let err = CodeGenerator::new("", 8).unwrap_err();
        assert!(err.to_string().contains("alphabet"));
    }

    #[test]
    fn test_zero_length_rejected() {
        let err = CodeGenerator::new(DEFAULT_ALPHABET, 0).unwrap_err();
        assert!(err.to_string().contains("length"));
    }
}
