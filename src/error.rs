//! Error types for the Instagres SDK.

use thiserror::Error;

/// Errors that can occur while provisioning a database or parsing a
/// connection string.
#[derive(Debug, Error)]
pub enum InstagresError {
    /// The connection string failed URI decomposition, has a disallowed or
    /// missing scheme, or is missing a required component.
    #[error("Invalid connection string: {0}")]
    InvalidFormat(String),

    /// Transport failure or non-success HTTP status while talking to the
    /// provisioning service.
    #[error("Network error: {0}")]
    Network(String),

    /// The provisioning service replied with something other than the
    /// expected JSON document.
    #[error("Invalid response: {0}")]
    InvalidResponse(String),
}

impl InstagresError {
    /// Create an invalid-format error.
    pub fn invalid_format(message: impl Into<String>) -> Self {
        Self::InvalidFormat(message.into())
    }

    /// Create a network error.
    pub fn network(message: impl Into<String>) -> Self {
        Self::Network(message.into())
    }

    /// Create an invalid-response error.
    pub fn invalid_response(message: impl Into<String>) -> Self {
        Self::InvalidResponse(message.into())
    }
}

/// Result type alias for Instagres operations.
pub type InstagresResult<T> = Result<T, InstagresError>;

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_error_display() {
        let err = InstagresError::invalid_format("must use postgres:// or postgresql:// scheme");
        assert_eq!(
            err.to_string(),
            "Invalid connection string: must use postgres:// or postgresql:// scheme"
        );

        let err = InstagresError::network("failed to create database (HTTP status 500)");
        assert_eq!(
            err.to_string(),
            "Network error: failed to create database (HTTP status 500)"
        );
    }
}
