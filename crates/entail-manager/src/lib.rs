//! Entail Manager
//!
//! The editing surface of the engine. A [`HypergraphManager`] owns one
//! document backed by a versioned store and applies every edit as a full
//! save: costs are recomputed, the validator runs, the previous state goes
//! to history, and a [`SummaryView`] comes back.
//!
//! # Architecture
//!
//! ```text
//! edit → copy of document → VersionedStore::save → swap in → SummaryView
//!                               │
//!                               ├─ update_costs
//!                               ├─ Gatekeeper
//!                               └─ history snapshot
//! ```
//!
//! Entailment checks are async: the synchronous oracle runs on the blocking
//! pool under [`EngineConfig::oracle_timeout`], and the verdict is written
//! only after it arrives.

#![warn(missing_docs)]

pub mod config;
pub mod error;
pub mod manager;
pub mod summary;
pub mod types;

pub use config::EngineConfig;
pub use error::ManagerError;
pub use manager::{HypergraphManager, StaleCheckReport};
pub use summary::{CostLine, SummaryView};
pub use types::{ClaimUpdate, ImplicationUpdate, NewClaim, NewImplication};
