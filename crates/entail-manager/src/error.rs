//! Error types for the manager

use entail_gatekeeper::GatekeeperError;
use entail_janitor::JanitorError;
use entail_store::StoreError;
use std::time::Duration;
use thiserror::Error;

/// Errors that can occur while editing or checking a document
#[derive(Error, Debug)]
pub enum ManagerError {
    /// Persistence failed; the in-memory document is unchanged
    #[error("Store error: {0}")]
    Store(#[from] StoreError),

    /// A precondition enforced by the validator (e.g. deleting the root)
    #[error(transparent)]
    Gatekeeper(#[from] GatekeeperError),

    /// Pruning could not run
    #[error("Janitor error: {0}")]
    Janitor(#[from] JanitorError),

    /// No current document in the backend
    #[error("No document found; run init first")]
    NoDocument,

    /// A current document already exists
    #[error("A document already exists")]
    AlreadyInitialized,

    /// Claim id not found
    #[error("Unknown claim: {0}")]
    UnknownClaim(String),

    /// Implication id not found
    #[error("Unknown implication: {0}")]
    UnknownImplication(String),

    /// Claim id already taken
    #[error("Duplicate claim id: {0}")]
    DuplicateClaim(String),

    /// Implication id already taken
    #[error("Duplicate implication id: {0}")]
    DuplicateImplication(String),

    /// Rejected input
    #[error("Invalid input: {0}")]
    InvalidInput(String),

    /// The edge would make a claim its own (indirect) premise
    #[error("Implication {0} would create a cycle")]
    WouldCreateCycle(String),

    /// The oracle failed; nothing was written
    #[error("Oracle error: {0}")]
    Oracle(String),

    /// The oracle did not answer in time; nothing was written
    #[error("Oracle timed out after {0:?}")]
    OracleTimeout(Duration),

    /// Configuration error
    #[error("Configuration error: {0}")]
    Config(String),
}

impl ManagerError {
    /// Whether retrying the same call later may succeed
    pub fn is_recoverable(&self) -> bool {
        matches!(self, ManagerError::Oracle(_) | ManagerError::OracleTimeout(_))
    }
}
