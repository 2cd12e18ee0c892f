//! Gatekeeper error types

use thiserror::Error;

/// Preconditions enforced before a mutation is attempted
///
/// Ordinary document problems are never errors; they are collected in a
/// [`ValidationReport`](crate::ValidationReport).
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum GatekeeperError {
    /// The root claim can never be deleted
    #[error("Cannot delete root claim '{0}'")]
    RootDeletion(String),
}
