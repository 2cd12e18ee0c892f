//! Domain error types

use thiserror::Error;

/// Errors raised at the document boundary
#[derive(Error, Debug)]
pub enum DomainError {
    /// The document does not match the typed schema
    #[error("Invalid document: {0}")]
    InvalidDocument(String),

    /// A referenced claim does not exist
    #[error("Unknown claim: {0}")]
    UnknownClaim(String),

    /// A referenced implication does not exist
    #[error("Unknown implication: {0}")]
    UnknownImplication(String),
}

impl From<serde_json::Error> for DomainError {
    fn from(e: serde_json::Error) -> Self {
        DomainError::InvalidDocument(e.to_string())
    }
}
