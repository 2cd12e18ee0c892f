//! Error types for the oracle layer

use thiserror::Error;

/// Errors that can occur while asking an oracle for a verdict
#[derive(Error, Debug, Clone, PartialEq)]
pub enum OracleError {
    /// Network or API communication error
    #[error("Communication error: {0}")]
    Communication(String),

    /// The model answered, but not with a usable verdict
    #[error("Invalid response: {0}")]
    InvalidResponse(String),

    /// Rate limit exceeded
    #[error("Rate limit exceeded")]
    RateLimitExceeded,

    /// Model not available
    #[error("Model not available: {0}")]
    ModelNotAvailable(String),

    /// Generic error
    #[error("Oracle error: {0}")]
    Other(String),
}

impl From<serde_json::Error> for OracleError {
    fn from(e: serde_json::Error) -> Self {
        OracleError::InvalidResponse(format!("JSON parse error: {}", e))
    }
}
