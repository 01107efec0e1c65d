//! Oracle error types.

use thiserror::Error;

/// Errors that can occur during oracle operations.
#[derive(Debug, Error)]
pub enum OracleError {
    /// HTTP request failed.
    #[error("Oracle request failed: {0}")]
    RequestFailed(String),

    /// Reply was not valid JSON or did not match the expected shape.
    #[error("Failed to parse oracle reply: {0}")]
    ParseError(String),

    /// Request timed out.
    #[error("Oracle request timed out after {0}ms")]
    Timeout(u64),

    /// Oracle backend is unavailable.
    #[error("Oracle unavailable: {0}")]
    Unavailable(String),

    /// All retry attempts exhausted.
    #[error("All oracle retry attempts exhausted after {attempts} tries: {last_error}")]
    RetriesExhausted {
        /// How many attempts were made.
        attempts: u32,
        /// The final attempt's failure.
        last_error: String,
    },

    /// Configuration error.
    #[error("Oracle configuration error: {0}")]
    ConfigError(String),
}

impl From<reqwest::Error> for OracleError {
    fn from(err: reqwest::Error) -> Self {
        if err.is_timeout() {
            OracleError::Timeout(0)
        } else if err.is_connect() {
            OracleError::Unavailable(err.to_string())
        } else {
            OracleError::RequestFailed(err.to_string())
        }
    }
}
