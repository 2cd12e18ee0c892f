//! Trait definitions for external interactions
//!
//! These traits define the boundaries between domain logic and infrastructure.
//! Infrastructure implementations live in other crates.

use crate::{EntailmentRequest, EntailmentVerdict, Hypergraph};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;

/// Identifier of one history snapshot
///
/// Opaque to callers; each backend picks its own format.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct SnapshotId(String);

impl SnapshotId {
    /// Wrap a backend-specific identifier
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for SnapshotId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for SnapshotId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

/// One entry of the history log
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SnapshotInfo {
    /// Identifier accepted by [`SnapshotStore::read_snapshot`]
    pub id: SnapshotId,
    /// When the snapshot was taken
    pub timestamp: DateTime<Utc>,
}

/// Trait for persisting the current document and its append-only history
///
/// Implemented by the infrastructure layer (entail-store)
pub trait SnapshotStore {
    /// Error type for store operations
    type Error;

    /// Load the current document, if one has been written
    fn load_current(&self) -> Result<Option<Hypergraph>, Self::Error>;

    /// Replace the current document
    fn write_current(&mut self, graph: &Hypergraph) -> Result<(), Self::Error>;

    /// Append an immutable copy of a document to the history log
    fn append_snapshot(
        &mut self,
        graph: &Hypergraph,
        at: DateTime<Utc>,
    ) -> Result<SnapshotInfo, Self::Error>;

    /// List history entries, oldest first
    fn list_snapshots(&self) -> Result<Vec<SnapshotInfo>, Self::Error>;

    /// Read one history entry
    fn read_snapshot(&self, id: &SnapshotId) -> Result<Option<Hypergraph>, Self::Error>;
}

/// Trait for judging whether premises logically entail a conclusion
///
/// Implemented by the infrastructure layer (entail-oracle). The engine
/// interprets the verdict; the oracle never sets entailment status itself.
pub trait EntailmentOracle {
    /// Error type for oracle calls
    type Error;

    /// Judge one implication
    fn check(&self, request: &EntailmentRequest) -> Result<EntailmentVerdict, Self::Error>;
}

/// Trait for LLM provider operations
///
/// Implemented by the infrastructure layer (entail-oracle)
pub trait LlmProvider {
    /// Error type for LLM operations
    type Error;

    /// Generate text completion
    fn generate(&self, prompt: &str) -> Result<String, Self::Error>;
}
