//! # Form Validation
//!
//! The message form accepts a single free-text value. A value is submittable
//! when its length, counted in Unicode scalar values, falls in
//! `[MIN_VALUE_LEN, MAX_VALUE_LEN]`.
//!
//! Validation is pure: it never touches `App` and never performs I/O, so the
//! reducer and the input box can both call it on every keystroke.

use std::fmt;

/// Shortest accepted message.
pub const MIN_VALUE_LEN: usize = 1;
/// Longest accepted message.
pub const MAX_VALUE_LEN: usize = 10_000;

/// Why a form value cannot be submitted.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ValidationError {
    /// The value is empty.
    Required,
    /// The value is longer than `MAX_VALUE_LEN` characters.
    TooLong { len: usize },
}

impl fmt::Display for ValidationError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            ValidationError::Required => write!(f, "Value is required"),
            ValidationError::TooLong { .. } => write!(f, "Value is too long"),
        }
    }
}

impl std::error::Error for ValidationError {}

/// Character count used for both validation and the footer counter.
pub fn value_len(value: &str) -> usize {
    value.chars().count()
}

/// Validate a form value against the length bounds.
pub fn validate(value: &str) -> Result<(), ValidationError> {
    let len = value_len(value);
    if len < MIN_VALUE_LEN {
        Err(ValidationError::Required)
    } else if len > MAX_VALUE_LEN {
        Err(ValidationError::TooLong { len })
    } else {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn empty_value_is_required() {
        assert_eq!(validate(""), Err(ValidationError::Required));
    }

    #[test]
    fn single_char_is_valid() {
        assert_eq!(validate("a"), Ok(()));
    }

    #[test]
    fn whitespace_counts_as_content() {
        // Only the length rule applies; a lone space is a valid message.
        assert_eq!(validate(" "), Ok(()));
    }

    #[test]
    fn max_length_is_inclusive() {
        let value = "x".repeat(MAX_VALUE_LEN);
        assert_eq!(validate(&value), Ok(()));
    }

    #[test]
    fn one_past_max_is_too_long() {
        let value = "x".repeat(MAX_VALUE_LEN + 1);
        assert_eq!(
            validate(&value),
            Err(ValidationError::TooLong { len: MAX_VALUE_LEN + 1 })
        );
    }

    #[test]
    fn length_counts_chars_not_bytes() {
        // 10_000 four-byte chars is 40_000 bytes but still within bounds
        let value = "🔥".repeat(MAX_VALUE_LEN);
        assert_eq!(value.len(), MAX_VALUE_LEN * 4);
        assert_eq!(validate(&value), Ok(()));
    }

    #[test]
    fn messages_match_form_copy() {
        assert_eq!(ValidationError::Required.to_string(), "Value is required");
        assert_eq!(
            ValidationError::TooLong { len: 10_001 }.to_string(),
            "Value is too long"
        );
    }
}
