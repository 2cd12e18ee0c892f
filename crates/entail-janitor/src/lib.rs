//! Entail Janitor
//!
//! Reachability pruning for entailment hypergraphs.
//!
//! # Overview
//!
//! Starting from the root claim, the Janitor follows conclusion -> premise
//! edges only and keeps every claim it meets. Everything else is removed:
//! fully disconnected claims as well as conclusions that are derivable but
//! never feed, directly or transitively, into the root. Implications whose
//! conclusion is removed go with it.
//!
//! # Usage
//!
//! ```
//! use entail_domain::{Claim, ClaimId, Hypergraph, Implication};
//! use entail_janitor::{Janitor, JanitorConfig};
//!
//! let mut graph = Hypergraph::new("Example", "", "The hypothesis");
//! graph.claims.push(Claim::new("used", "A premise"));
//! graph.claims.push(Claim::new("orphan", "Nobody needs me"));
//! graph.implications.push(Implication::and("i1", &["used"], "hypothesis"));
//!
//! let mut janitor = Janitor::new(JanitorConfig::default());
//! let outcome = janitor.prune(&graph).unwrap();
//!
//! assert_eq!(outcome.removed_claims, vec![ClaimId::from("orphan")]);
//! assert_eq!(outcome.graph.claims.len(), 2);
//! println!("{}", janitor.metrics().summary());
//! ```
//!
//! # Configuration
//!
//! ```toml
//! [janitor]
//! root_claim_id = "hypothesis"
//! dry_run = false
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod janitor;
mod metrics;

pub use config::JanitorConfig;
pub use error::JanitorError;
pub use janitor::{needed_claims, prune, Janitor, PruneOutcome};
pub use metrics::PruneMetrics;
