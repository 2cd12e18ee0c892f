//! Claim module - the atomic proposition of the hypergraph

use crate::cost::EpistemicCost;
use crate::evidence::Evidence;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::borrow::Borrow;
use std::fmt;

/// Reserved id of the root claim. It always exists and can never be deleted.
pub const ROOT_CLAIM_ID: &str = "hypothesis";

/// Stable, user-chosen identifier for a claim
///
/// # Examples
///
/// ```
/// use entail_domain::ClaimId;
///
/// let id = ClaimId::from("c1");
/// assert_eq!(id.as_str(), "c1");
/// assert_eq!(id.to_string(), "c1");
/// ```
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ClaimId(String);

impl ClaimId {
    /// Create a claim id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// The id of the reserved root claim
    pub fn root() -> Self {
        Self(ROOT_CLAIM_ID.to_string())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ClaimId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ClaimId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ClaimId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl Borrow<str> for ClaimId {
    fn borrow(&self) -> &str {
        &self.0
    }
}

impl PartialEq<str> for ClaimId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ClaimId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Whether one further experiment could settle the claim's truth value
///
/// Persisted as the integers `0` and `1`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Testability {
    /// No feasible experiment resolves the claim
    Untestable,
    /// A single experiment could resolve the claim
    Testable,
}

impl Testability {
    /// Integer form used in documents
    pub fn as_u8(&self) -> u8 {
        match self {
            Testability::Untestable => 0,
            Testability::Testable => 1,
        }
    }

    /// Parse the integer form
    pub fn from_u8(value: u8) -> Option<Self> {
        match value {
            0 => Some(Testability::Untestable),
            1 => Some(Testability::Testable),
            _ => None,
        }
    }
}

impl Serialize for Testability {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_u8(self.as_u8())
    }
}

impl<'de> Deserialize<'de> for Testability {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let value = u8::deserialize(deserializer)?;
        Self::from_u8(value).ok_or_else(|| {
            serde::de::Error::custom(format!("testability must be 0 or 1, got {}", value))
        })
    }
}

/// A claim - one node of the entailment hypergraph
///
/// The three cost fields are derived: they are overwritten by
/// [`update_costs`](crate::update_costs) and never read back as inputs.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Claim {
    /// Unique, stable identifier
    pub id: ClaimId,

    /// The proposition itself (non-empty)
    pub text: String,

    /// Belief score in [0, 10]; `None` means not yet evaluated
    #[serde(default)]
    pub score: Option<f64>,

    /// Free-text justification of the score
    #[serde(default)]
    pub reasoning: String,

    /// Ordered supporting evidence
    #[serde(default)]
    pub evidence: Vec<Evidence>,

    /// Known open questions about the claim
    #[serde(default)]
    pub uncertainties: Vec<String>,

    /// Labels such as `CRITICAL_BLOCKER`
    #[serde(default)]
    pub tags: Vec<String>,

    /// Whether one experiment could resolve the claim
    #[serde(default)]
    pub testability: Option<Testability>,

    /// When the claim was created
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,

    /// When the claim was last modified
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub modified_at: Option<DateTime<Utc>>,

    /// Derived: cost attributable to the strength of the evidence
    #[serde(default)]
    pub evidence_epistemic_cost: Option<EpistemicCost>,

    /// Derived: cost attributable to the missing experiment
    #[serde(default)]
    pub experimental_epistemic_cost: Option<EpistemicCost>,

    /// Derived: sum of the two components
    #[serde(default)]
    pub cost: Option<EpistemicCost>,
}

impl Claim {
    /// Create an unevaluated claim with no evidence
    pub fn new(id: impl Into<ClaimId>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            score: None,
            reasoning: String::new(),
            evidence: Vec::new(),
            uncertainties: Vec::new(),
            tags: Vec::new(),
            testability: None,
            created_at: None,
            modified_at: None,
            evidence_epistemic_cost: None,
            experimental_epistemic_cost: None,
            cost: None,
        }
    }

    /// Set the belief score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Set the testability flag
    pub fn with_testability(mut self, testability: Testability) -> Self {
        self.testability = Some(testability);
        self
    }

    /// Append an evidence item
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    /// Set the reasoning text
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    /// Stamp both timestamps
    pub fn with_timestamps(mut self, at: DateTime<Utc>) -> Self {
        self.created_at = Some(at);
        self.modified_at = Some(at);
        self
    }

    /// Whether this is the reserved root claim
    pub fn is_root(&self) -> bool {
        self.id == ROOT_CLAIM_ID
    }

    /// Whether the claim carries the given tag
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::evidence::Evidence;
    use serde_json::json;

    #[test]
    fn test_claim_id_comparisons() {
        let id = ClaimId::from("c1");
        assert_eq!(id, "c1");
        assert!(ClaimId::from("a") < ClaimId::from("b"));
        assert_eq!(ClaimId::root(), ROOT_CLAIM_ID);
    }

    #[test]
    fn test_claim_deserializes_with_defaults() {
        let claim: Claim = serde_json::from_value(json!({
            "id": "c1",
            "text": "Water boils at 100C at sea level"
        }))
        .unwrap();

        assert_eq!(claim.id, "c1");
        assert!(claim.score.is_none());
        assert!(claim.evidence.is_empty());
        assert!(claim.testability.is_none());
        assert!(claim.cost.is_none());
    }

    #[test]
    fn test_testability_rejects_other_integers() {
        let result: Result<Claim, _> = serde_json::from_value(json!({
            "id": "c1",
            "text": "t",
            "testability": 2
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_unevaluated_costs_serialize_as_null() {
        let claim = Claim::new("c1", "text").with_score(7.0);
        let value = serde_json::to_value(&claim).unwrap();

        assert_eq!(value["score"], json!(7.0));
        assert!(value["cost"].is_null());
        assert!(value["evidence_epistemic_cost"].is_null());
        assert!(value.get("created_at").is_none());
    }

    #[test]
    fn test_builder_and_tags() {
        let mut claim = Claim::new(ROOT_CLAIM_ID, "The effect is real")
            .with_score(9.0)
            .with_testability(Testability::Testable)
            .with_evidence(Evidence::literature("Smith 2020", "Table 3"));
        claim.tags.push("CRITICAL_BLOCKER".to_string());

        assert!(claim.is_root());
        assert!(claim.has_tag("CRITICAL_BLOCKER"));
        assert_eq!(claim.evidence.len(), 1);
        assert_eq!(claim.testability.map(|t| t.as_u8()), Some(1));
    }
}
