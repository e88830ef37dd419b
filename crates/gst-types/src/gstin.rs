//! GSTIN format validation
//!
//! A GSTIN is 15 characters: 2-digit state code, 10-character PAN
//! (5 letters, 4 digits, 1 letter), entity number, a literal `Z`, and a
//! check character. Validation is case-insensitive and purely syntactic;
//! the backend remains the authority on whether a GSTIN exists.

use lazy_static::lazy_static;
use regex::Regex;
use thiserror::Error;

lazy_static! {
    static ref GSTIN_PATTERN: Regex =
        Regex::new(r"(?i)^[0-9]{2}[A-Z]{5}[0-9]{4}[A-Z]{1}[A-Z0-9]{1}[Z]{1}[A-Z0-9]{1}$")
            .expect("GSTIN pattern is valid");
}

/// Length of a well-formed GSTIN
pub const GSTIN_LENGTH: usize = 15;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum GstinError {
    #[error("GST Number is required.")]
    Missing,

    #[error("Invalid GST Number. Please enter a valid GSTIN.")]
    Invalid,
}

/// Check whether `value` has the GSTIN shape
pub fn is_valid_gstin(value: &str) -> bool {
    GSTIN_PATTERN.is_match(value)
}

/// Validate a GSTIN typed into a search field.
///
/// Returns the trimmed value on success. The error's `Display` is the
/// message shown inline below the field.
pub fn validate_gstin(value: &str) -> Result<&str, GstinError> {
    let trimmed = value.trim();
    if trimmed.is_empty() {
        return Err(GstinError::Missing);
    }
    if !is_valid_gstin(trimmed) {
        return Err(GstinError::Invalid);
    }
    Ok(trimmed)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_accepts_well_formed_gstin() {
        assert_eq!(validate_gstin("27AAAAA0000A1Z5"), Ok("27AAAAA0000A1Z5"));
    }

    #[test]
    fn test_accepts_lowercase() {
        assert!(is_valid_gstin("27aaaaa0000a1z5"));
    }

    #[test]
    fn test_rejects_wrong_length() {
        assert_eq!(validate_gstin("27aaaa0000a1z5"), Err(GstinError::Invalid));
    }

    #[test]
    fn test_rejects_digits_only() {
        assert_eq!(validate_gstin("1234567890"), Err(GstinError::Invalid));
    }

    #[test]
    fn test_rejects_missing_z() {
        assert!(!is_valid_gstin("27AAAAA0000A1X5"));
    }

    #[test]
    fn test_empty_is_missing() {
        assert_eq!(validate_gstin("   "), Err(GstinError::Missing));
        assert_eq!(
            GstinError::Missing.to_string(),
            "GST Number is required."
        );
    }

    #[test]
    fn test_trims_surrounding_whitespace() {
        assert_eq!(validate_gstin(" 29ABCDE1234F1Z9 "), Ok("29ABCDE1234F1Z9"));
        assert_eq!("29ABCDE1234F1Z9".len(), GSTIN_LENGTH);
    }
}
