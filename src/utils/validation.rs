//! Centralized input validation.

/// Maximum keyword length in characters (DOS protection)
pub const MAX_KEYWORD_LENGTH: usize = 256;

/// Highest meaningful search threshold
pub const MAX_THRESHOLD: u8 = 100;

/// Input validation error types
#[derive(Debug, thiserror::Error, PartialEq, Eq)]
pub enum ValidationError {
    #[error("Keyword too long: exceeds {MAX_KEYWORD_LENGTH} characters")]
    KeywordTooLong,
    #[error("Keyword contains control characters")]
    InvalidKeyword,
    #[error("Threshold must be between 0 and {MAX_THRESHOLD}")]
    InvalidThreshold,
}

/// Validate a raw search keyword.
///
/// Empty keywords are accepted; they simply match nothing. Surrounding
/// whitespace such as a trailing newline is allowed, control characters
/// inside the keyword are not.
///
/// # Examples
///
/// ```
/// use song_resolver::utils::validation::validate_keyword;
///
/// assert!(validate_keyword("blue zenith").is_ok());
/// assert!(validate_keyword("").is_ok());
/// assert!(validate_keyword("bad\0key").is_err());
/// ```
///
/// # Errors
///
/// Returns [`ValidationError::KeywordTooLong`] or [`ValidationError::InvalidKeyword`].
pub fn validate_keyword(keyword: &str) -> Result<(), ValidationError> {
    if keyword.chars().count() > MAX_KEYWORD_LENGTH {
        return Err(ValidationError::KeywordTooLong);
    }

    if keyword.trim().chars().any(char::is_control) {
        return Err(ValidationError::InvalidKeyword);
    }

    Ok(())
}

/// Validate a search threshold
///
/// # Errors
///
/// Returns [`ValidationError::InvalidThreshold`] if above [`MAX_THRESHOLD`].
pub fn validate_threshold(threshold: u8) -> Result<u8, ValidationError> {
    if threshold > MAX_THRESHOLD {
        Err(ValidationError::InvalidThreshold)
    } else {
        Ok(threshold)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_keyword_length_limit() {
        let at_limit = "a".repeat(MAX_KEYWORD_LENGTH);
        let over_limit = "a".repeat(MAX_KEYWORD_LENGTH + 1);
        assert!(validate_keyword(&at_limit).is_ok());
        assert_eq!(
            validate_keyword(&over_limit),
            Err(ValidationError::KeywordTooLong)
        );

        // Multi-byte characters count once
        let wide = "桜".repeat(MAX_KEYWORD_LENGTH);
        assert!(validate_keyword(&wide).is_ok());
    }

    #[test]
    fn test_keyword_control_characters() {
        assert!(validate_keyword("  spaced out \n").is_ok());
        assert_eq!(
            validate_keyword("a\u{7}b"),
            Err(ValidationError::InvalidKeyword)
        );
        assert_eq!(
            validate_keyword("line\nbreak"),
            Err(ValidationError::InvalidKeyword)
        );
    }

    #[test]
    fn test_threshold_bounds() {
        assert_eq!(validate_threshold(0), Ok(0));
        assert_eq!(validate_threshold(100), Ok(100));
        assert_eq!(
            validate_threshold(101),
            Err(ValidationError::InvalidThreshold)
        );
    }
}
