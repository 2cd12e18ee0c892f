//! Gatekeeper configuration

use entail_domain::ROOT_CLAIM_ID;
use serde::{Deserialize, Serialize};

/// Configuration for validation rules
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ValidationConfig {
    /// Id of the claim every document must contain
    pub root_claim_id: String,

    /// Report cycles in the conclusion -> premises relation
    pub check_cycles: bool,

    /// Warn about evidence fields outside the per-type schema
    pub warn_unknown_evidence_fields: bool,

    /// Warn when more than one implication concludes the same claim
    pub warn_multiple_supports: bool,

    /// Warn about claims with no premise chain to the root
    pub warn_unreachable_claims: bool,

    /// Treat a claim without a score as a warning
    pub warn_unscored_claims: bool,
}

impl Default for ValidationConfig {
    fn default() -> Self {
        Self {
            root_claim_id: ROOT_CLAIM_ID.to_string(),
            check_cycles: true,
            warn_unknown_evidence_fields: true,
            warn_multiple_supports: true,
            warn_unreachable_claims: false,
            warn_unscored_claims: false,
        }
    }
}

impl ValidationConfig {
    /// Create a permissive configuration (errors only, no warnings)
    pub fn permissive() -> Self {
        Self {
            root_claim_id: ROOT_CLAIM_ID.to_string(),
            check_cycles: true,
            warn_unknown_evidence_fields: false,
            warn_multiple_supports: false,
            warn_unreachable_claims: false,
            warn_unscored_claims: false,
        }
    }

    /// Create a strict configuration (all warnings enabled)
    pub fn strict() -> Self {
        Self {
            root_claim_id: ROOT_CLAIM_ID.to_string(),
            check_cycles: true,
            warn_unknown_evidence_fields: true,
            warn_multiple_supports: true,
            warn_unreachable_claims: true,
            warn_unscored_claims: true,
        }
    }

    /// Use a different root claim id
    pub fn with_root(mut self, root_claim_id: impl Into<String>) -> Self {
        self.root_claim_id = root_claim_id.into();
        self
    }
}
