//! Error types for Janitor operations

use thiserror::Error;

/// Errors that can occur during Janitor operations
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum JanitorError {
    /// Pruning needs a root to search from
    #[error("Root claim '{0}' not found; refusing to prune")]
    MissingRoot(String),
}
