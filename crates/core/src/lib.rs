//! Shared primitives for all Rust crates in Accord.

#![forbid(unsafe_code)]

use serde::{Deserialize, Serialize};
use thiserror::Error;

/// Result type used across Accord crates.
pub type AppResult<T> = Result<T, AppError>;

/// A validated non-empty UTF-8 string.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct NonEmptyString(String);

impl NonEmptyString {
    /// Creates a validated non-empty string.
    pub fn new(value: impl Into<String>) -> AppResult<Self> {
        let value = value.into();
        if value.trim().is_empty() {
            return Err(AppError::Validation(
                "value must not be empty or whitespace".to_owned(),
            ));
        }

        Ok(Self(value))
    }

    /// Returns the underlying string slice.
    #[must_use]
    pub fn as_str(&self) -> &str {
        self.0.as_str()
    }
}

impl From<NonEmptyString> for String {
    fn from(value: NonEmptyString) -> Self {
        value.0
    }
}

/// Common application error categories.
#[derive(Debug, Error)]
pub enum AppError {
    /// Invalid input or violated invariant.
    #[error("validation error: {0}")]
    Validation(String),

    /// Request could not be delivered or the backend answered with a non-success status.
    #[error("transport error: {0}")]
    Transport(String),

    /// Backend answered but the body did not match the expected shape.
    #[error("decode error: {0}")]
    Decode(String),

    /// Internal unexpected error.
    #[error("internal error: {0}")]
    Internal(String),
}

impl AppError {
    /// Returns true when the error came from the request boundary rather than caller input.
    #[must_use]
    pub fn is_request_failure(&self) -> bool {
        matches!(self, Self::Transport(_) | Self::Decode(_))
    }
}

#[cfg(test)]
mod tests {
    use super::{AppError, NonEmptyString};

    #[test]
    fn non_empty_string_rejects_whitespace() {
        let result = NonEmptyString::new("   ");
        assert!(result.is_err());
    }

    #[test]
    fn transport_and_decode_count_as_request_failures() {
        assert!(AppError::Transport("connection refused".to_owned()).is_request_failure());
        assert!(AppError::Decode("expected array".to_owned()).is_request_failure());
        assert!(!AppError::Validation("page 0".to_owned()).is_request_failure());
    }
}
