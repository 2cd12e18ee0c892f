//! Entail Oracle Layer
//!
//! Implementations of the `EntailmentOracle` and `LlmProvider` traits from
//! `entail-domain`.
//!
//! # Oracles
//!
//! - `LlmOracle`: builds a prompt from claim ids and texts, asks any
//!   `LlmProvider`, and parses the JSON verdict
//! - `MockOracle`: deterministic verdicts keyed by conclusion id
//!
//! # Providers
//!
//! - `MockProvider`: canned responses for testing
//!
//! The oracle only judges; deciding the entailment status from a verdict is
//! done by `entail_domain::EntailmentOutcome::interpret`.
//!
//! # Examples
//!
//! ```
//! use entail_domain::{check_implication, Claim, EntailmentStatus, ImplicationType};
//! use entail_oracle::MockOracle;
//!
//! let oracle = MockOracle::rejecting();
//! let premise = Claim::new("a", "The sky is blue");
//! let conclusion = Claim::new("b", "Grass is green");
//!
//! let outcome = check_implication(&[&premise], &conclusion, ImplicationType::And, &oracle).unwrap();
//! assert_eq!(outcome.status, EntailmentStatus::Failed);
//! ```

#![warn(missing_docs)]

pub mod error;
pub mod mock;
pub mod oracle;
pub mod parser;
pub mod prompt;

pub use error::OracleError;
pub use mock::{MockOracle, MockProvider};
pub use oracle::LlmOracle;
pub use parser::parse_verdict;
pub use prompt::PromptBuilder;
