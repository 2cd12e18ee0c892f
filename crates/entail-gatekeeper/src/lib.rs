//! Entail Gatekeeper
//!
//! Schema and reference validation for hypergraph documents.
//!
//! The Gatekeeper provides:
//! - Metadata, claim and implication field checks
//! - Evidence schema checks (unknown fields are warnings)
//! - Duplicate id detection
//! - Cross-reference checks, run once every claim id is known
//! - Cycle and multiple-support detection
//!
//! Validation is total: it never fails and always returns every problem it
//! found, so a caller can surface all of them at once.
//!
//! # Examples
//!
//! ```
//! use entail_domain::Hypergraph;
//! use entail_gatekeeper::{Gatekeeper, ValidationConfig};
//!
//! let gatekeeper = Gatekeeper::new(ValidationConfig::default());
//! let graph = Hypergraph::new("Example", "", "The hypothesis");
//!
//! let report = gatekeeper.validate(&graph);
//! assert!(report.is_valid());
//! ```

#![warn(missing_docs)]

mod config;
mod error;
mod validator;

pub use config::ValidationConfig;
pub use error::GatekeeperError;
pub use validator::{validate, Gatekeeper, Severity, ValidationIssue, ValidationReport};
