//! Error types for the RMSSD pipeline.
//!
//! Every failure the core can produce is one of the variants of [`RmssdError`]. The variants carry
//! structured fields so that callers can react to the kind of failure and its data instead of
//! matching on message text.

use crate::precision::Width;

/// Reason a sample token could not be turned into a value of the requested width.
#[derive(thiserror::Error, Debug, Clone, Copy, PartialEq, Eq)]
pub enum ParseFailure {
    /// The token is not a decimal number.
    #[error("not a decimal number")]
    Malformed,
    /// The token is a decimal number, but its magnitude exceeds the finite range of the width.
    #[error("outside the representable range")]
    OutOfRange,
}

/// Errors produced while ingesting, validating and reducing a sample sequence.
#[derive(thiserror::Error, Debug, Clone, PartialEq, Eq)]
pub enum RmssdError {
    /// A sample token could not be parsed at the requested width.
    #[error("sample {position} ({token:?}) cannot be read as a {width} value: {kind}")]
    Parse {
        /// The offending token as it was supplied.
        token: String,
        /// Zero-based position of the token in the input sequence.
        position: usize,
        /// Width the token was parsed for.
        width: Width,
        kind: ParseFailure,
    },
    /// Fewer samples than needed to form one successive difference.
    #[error("too few RR intervals to calculate RMSSD: need at least {required}, got {actual}")]
    InsufficientData { required: usize, actual: usize },
}

pub type Result<T> = std::result::Result<T, RmssdError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_error_message_names_token_and_width() {
        let err = RmssdError::Parse {
            token: "abc".to_string(),
            position: 4,
            width: Width::Standard,
            kind: ParseFailure::Malformed,
        };
        let msg = err.to_string();
        assert!(msg.contains("\"abc\""), "message was {msg}");
        assert!(msg.contains("sample 4"), "message was {msg}");
        assert!(msg.contains("double"), "message was {msg}");
    }

    #[test]
    fn test_insufficient_data_message() {
        let err = RmssdError::InsufficientData {
            required: 2,
            actual: 1,
        };
        assert_eq!(
            err.to_string(),
            "too few RR intervals to calculate RMSSD: need at least 2, got 1"
        );
    }
}
