//! Entail Domain Layer
//!
//! This crate contains the core data model and the pure algorithms of the
//! entailment hypergraph. Every other crate in the workspace depends on it;
//! it depends only on serialization primitives.
//!
//! ## Key Concepts
//!
//! - **Claim**: An atomic proposition with a belief score in [0, 10]
//! - **Evidence**: Tagged support attached to a claim (simulation, literature, calculation)
//! - **Implication**: An AND/OR hyperedge deriving one conclusion from premises
//! - **Hypergraph**: The whole document rooted at the `hypothesis` claim
//! - **Epistemic cost**: `-log2(p)` surprise; 0 is certain, infinity is hopeless
//!
//! ## Architecture
//!
//! - Documents are typed once at the JSON boundary ([`Hypergraph::from_json`])
//! - Cost propagation is a pure function over the typed graph
//! - Trait definitions for all external interactions (storage, oracle, LLM)

#![warn(missing_docs)]
#![warn(clippy::all)]

pub mod claim;
pub mod cost;
pub mod cost_computation;
pub mod entailment;
pub mod error;
pub mod evidence;
pub mod hypergraph;
pub mod implication;
pub mod traits;

// Re-exports for convenience
pub use claim::{Claim, ClaimId, Testability, ROOT_CLAIM_ID};
pub use cost::EpistemicCost;
pub use cost_computation::{compute_costs, update_costs, ClaimCost, CostReport};
pub use entailment::{check_implication, EntailmentOutcome, EntailmentRequest, EntailmentVerdict, StatementRef};
pub use error::DomainError;
pub use evidence::{Evidence, EvidenceKind};
pub use hypergraph::{CachedValidation, Hypergraph, Metadata};
pub use implication::{EntailmentStatus, Implication, ImplicationId, ImplicationType};
pub use traits::{EntailmentOracle, LlmProvider, SnapshotId, SnapshotInfo, SnapshotStore};
