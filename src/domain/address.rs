//! Address Validator
//!
//! Syntactic shape check for Solana wallet addresses entered by a user or
//! handed over by a wallet extension. Only the base58 alphabet and length are
//! checked; the address is never looked up on-chain.

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Shortest accepted address, in characters
pub const MIN_ADDRESS_LEN: usize = 32;

/// Longest accepted address, in characters
pub const MAX_ADDRESS_LEN: usize = 44;

/// Bitcoin-style base58 alphabet (no 0, O, I or l)
pub const BASE58_ALPHABET: &str = "123456789ABCDEFGHJKLMNPQRSTUVWXYZabcdefghijkmnopqrstuvwxyz";

/// Reason an address was rejected
#[derive(Error, Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum AddressError {
    #[error("address required")]
    Required,

    #[error("invalid length")]
    InvalidLength,

    #[error("invalid character set")]
    InvalidCharacterSet,
}

/// Outcome of validating a candidate address
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationResult {
    Valid,
    Invalid(AddressError),
}

impl ValidationResult {
    pub fn is_valid(&self) -> bool {
        matches!(self, ValidationResult::Valid)
    }

    /// Human-readable rejection reason, `None` when valid
    pub fn reason(&self) -> Option<String> {
        match self {
            ValidationResult::Valid => None,
            ValidationResult::Invalid(err) => Some(err.to_string()),
        }
    }

    /// Convert into a `Result` for `?` propagation
    pub fn into_result(self) -> Result<(), AddressError> {
        match self {
            ValidationResult::Valid => Ok(()),
            ValidationResult::Invalid(err) => Err(err),
        }
    }
}

/// Returns true if `c` belongs to the base58 alphabet
pub fn is_base58_char(c: char) -> bool {
    matches!(c, '1'..='9' | 'A'..='H' | 'J'..='N' | 'P'..='Z' | 'a'..='k' | 'm'..='z')
}

/// Stateless validator for Solana address strings
#[derive(Debug, Clone, Copy, Default)]
pub struct AddressValidator;

impl AddressValidator {
    pub fn new() -> Self {
        Self
    }

    /// Validate a candidate address. Rules are applied in order and the
    /// first failing rule decides the reason.
    pub fn validate(&self, candidate: &str) -> ValidationResult {
        let trimmed = candidate.trim();

        if trimmed.is_empty() {
            return ValidationResult::Invalid(AddressError::Required);
        }

        let len = trimmed.chars().count();
        if !(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN).contains(&len) {
            return ValidationResult::Invalid(AddressError::InvalidLength);
        }

        if !trimmed.chars().all(is_base58_char) {
            return ValidationResult::Invalid(AddressError::InvalidCharacterSet);
        }

        ValidationResult::Valid
    }
}

/// Shorthand for `AddressValidator::new().validate(candidate)`
pub fn validate(candidate: &str) -> ValidationResult {
    AddressValidator::new().validate(candidate)
}

#[cfg(test)]
mod tests {
    use super::*;
    use rand::Rng;

    const EXCLUDED: [char; 4] = ['0', 'O', 'I', 'l'];

    fn random_base58(rng: &mut impl Rng, len: usize) -> String {
        let alphabet: Vec<char> = BASE58_ALPHABET.chars().collect();
        (0..len)
            .map(|_| alphabet[rng.gen_range(0..alphabet.len())])
            .collect()
    }

    #[test]
    fn test_alphabet_matches_predicate() {
        assert_eq!(BASE58_ALPHABET.chars().count(), 58);
        for c in BASE58_ALPHABET.chars() {
            assert!(is_base58_char(c), "{c} should be base58");
        }
        for c in EXCLUDED {
            assert!(!is_base58_char(c), "{c} should not be base58");
        }
    }

    #[test]
    fn test_empty_and_whitespace_required() {
        assert_eq!(validate(""), ValidationResult::Invalid(AddressError::Required));
        assert_eq!(validate(" "), ValidationResult::Invalid(AddressError::Required));
        assert_eq!(validate("\t\n"), ValidationResult::Invalid(AddressError::Required));
        assert_eq!(validate(" ").reason().as_deref(), Some("address required"));
    }

    #[test]
    fn test_length_boundaries() {
        let mut rng = rand::thread_rng();
        assert!(validate(&random_base58(&mut rng, 32)).is_valid());
        assert!(validate(&random_base58(&mut rng, 44)).is_valid());
        assert_eq!(
            validate(&random_base58(&mut rng, 31)),
            ValidationResult::Invalid(AddressError::InvalidLength)
        );
        assert_eq!(
            validate(&random_base58(&mut rng, 45)),
            ValidationResult::Invalid(AddressError::InvalidLength)
        );
    }

    #[test]
    fn test_length_checked_before_charset() {
        // 15 chars containing 0, I and !
        assert_eq!(
            validate("0InvalidChars!!"),
            ValidationResult::Invalid(AddressError::InvalidLength)
        );
    }

    #[test]
    fn test_known_addresses() {
        assert!(validate("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtVhAW5Q5pge4j1").is_valid());
        assert!(validate("JUP6LkbzbjS1jKwapdHNy74zc3tLUZoi5QNyVTaV4").is_valid());
        assert!(validate("So11111111111111111111111111111111111111112").is_valid());
        assert_eq!(validate("short").reason().as_deref(), Some("invalid length"));
    }

    #[test]
    fn test_surrounding_whitespace_trimmed() {
        assert!(validate("  5Q544fKrFoe6tsEbD7S8EmxGTJYAKtVhAW5Q5pge4j1\n").is_valid());
    }

    #[test]
    fn test_into_result() {
        assert!(validate("5Q544fKrFoe6tsEbD7S8EmxGTJYAKtVhAW5Q5pge4j1").into_result().is_ok());
        assert_eq!(validate("").into_result(), Err(AddressError::Required));
    }

    #[test]
    fn test_property_valid_base58_accepted() {
        let mut rng = rand::thread_rng();
        for _ in 0..2_000 {
            let len = rng.gen_range(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN);
            let candidate = random_base58(&mut rng, len);
            assert!(validate(&candidate).is_valid(), "rejected {candidate}");
        }
    }

    #[test]
    fn test_property_bad_length_rejected() {
        let mut rng = rand::thread_rng();
        for _ in 0..2_000 {
            let len = if rng.gen_bool(0.5) {
                rng.gen_range(1..MIN_ADDRESS_LEN)
            } else {
                rng.gen_range(MAX_ADDRESS_LEN + 1..=128)
            };
            let candidate = random_base58(&mut rng, len);
            assert_eq!(
                validate(&candidate),
                ValidationResult::Invalid(AddressError::InvalidLength),
                "accepted {candidate}"
            );
        }
    }

    #[test]
    fn test_property_foreign_char_rejected() {
        let mut rng = rand::thread_rng();
        let foreign: Vec<char> = EXCLUDED
            .iter()
            .copied()
            .chain(['!', '-', '_', '+', '/', '=', 'é', '#'])
            .collect();

        for _ in 0..2_000 {
            let len = rng.gen_range(MIN_ADDRESS_LEN..=MAX_ADDRESS_LEN);
            let mut chars: Vec<char> = random_base58(&mut rng, len).chars().collect();
            let pos = rng.gen_range(0..len);
            chars[pos] = foreign[rng.gen_range(0..foreign.len())];
            let candidate: String = chars.into_iter().collect();
            assert_eq!(
                validate(&candidate),
                ValidationResult::Invalid(AddressError::InvalidCharacterSet),
                "accepted {candidate}"
            );
        }
    }
}
