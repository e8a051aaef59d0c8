//! Error types for STIRX.
//!
//! Every failure is reported synchronously at the offending call. Nothing in
//! the library retries, and nothing logs an error instead of returning it.

use thiserror::Error;

/// A specialized Result type for STIRX operations.
pub type StirResult<T> = Result<T, StirError>;

/// The main error type for STIRX operations.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum StirError {
    /// An input violated its contract: a non-positive count or tenor, a
    /// negative convexity, a malformed date, an unknown IMM month.
    #[error("Invalid argument: {reason}")]
    InvalidArgument {
        /// Description of the offending input.
        reason: String,
    },

    /// A date moved past the representable calendar range.
    #[error("Date arithmetic error: {reason}")]
    DateArithmetic {
        /// Description of the overflowing operation.
        reason: String,
    },
}

impl StirError {
    /// Creates an invalid argument error.
    #[must_use]
    pub fn invalid_argument(reason: impl Into<String>) -> Self {
        Self::InvalidArgument {
            reason: reason.into(),
        }
    }

    /// Creates a date arithmetic error.
    #[must_use]
    pub fn date_arithmetic(reason: impl Into<String>) -> Self {
        Self::DateArithmetic {
            reason: reason.into(),
        }
    }

    /// Returns true for [`StirError::InvalidArgument`].
    #[must_use]
    pub fn is_invalid_argument(&self) -> bool {
        matches!(self, Self::InvalidArgument { .. })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = StirError::invalid_argument("count must be positive, got 0");
        assert!(err.to_string().starts_with("Invalid argument"));
        assert!(err.to_string().contains("got 0"));
        assert!(err.is_invalid_argument());
    }

    #[test]
    fn test_date_arithmetic_error() {
        let err = StirError::date_arithmetic("+262143-12-31 + 1 day");
        assert!(err.to_string().contains("Date arithmetic"));
        assert!(!err.is_invalid_argument());
    }
}
