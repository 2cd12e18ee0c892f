//! The hypergraph document: metadata, claims and implications

use crate::{Claim, ClaimId, DomainError, Implication, ImplicationId, ROOT_CLAIM_ID};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// Validation result cached in the document at save time
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct CachedValidation {
    /// Hard errors
    pub errors: Vec<String>,
    /// Non-fatal warnings
    pub warnings: Vec<String>,
    /// When the validator ran
    pub validated_at: DateTime<Utc>,
}

impl CachedValidation {
    /// Whether the cached run found no errors
    pub fn is_valid(&self) -> bool {
        self.errors.is_empty()
    }
}

fn default_version() -> String {
    "1.0".to_string()
}

/// Document metadata
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Metadata {
    /// Human-readable name of the hypothesis
    pub name: String,
    /// Longer description
    #[serde(default)]
    pub description: String,
    /// Creation time
    pub created: DateTime<Utc>,
    /// Last save time
    pub last_updated: DateTime<Utc>,
    /// Document format version
    #[serde(default = "default_version")]
    pub version: String,
    /// Validator output from the last save
    #[serde(default)]
    pub cached_validation: Option<CachedValidation>,
}

/// An entailment hypergraph rooted at the `hypothesis` claim
///
/// # Examples
///
/// ```
/// use entail_domain::{Hypergraph, ROOT_CLAIM_ID};
///
/// let graph = Hypergraph::new("Dark matter", "Is it axions?", "Dark matter is made of axions");
/// assert!(graph.claim(ROOT_CLAIM_ID).is_some());
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Hypergraph {
    /// Document metadata
    pub metadata: Metadata,
    /// Claims in document order
    #[serde(default)]
    pub claims: Vec<Claim>,
    /// Implications in document order
    #[serde(default)]
    pub implications: Vec<Implication>,
}

impl Hypergraph {
    /// Create a document containing only the root claim
    pub fn new(
        name: impl Into<String>,
        description: impl Into<String>,
        hypothesis: impl Into<String>,
    ) -> Self {
        let now = Utc::now();
        Self {
            metadata: Metadata {
                name: name.into(),
                description: description.into(),
                created: now,
                last_updated: now,
                version: default_version(),
                cached_validation: None,
            },
            claims: vec![Claim::new(ROOT_CLAIM_ID, hypothesis).with_timestamps(now)],
            implications: Vec::new(),
        }
    }

    /// Parse a JSON document
    pub fn from_json(json: &str) -> Result<Self, DomainError> {
        Ok(serde_json::from_str(json)?)
    }

    /// Type an already-parsed JSON value
    pub fn from_value(value: serde_json::Value) -> Result<Self, DomainError> {
        Ok(serde_json::from_value(value)?)
    }

    /// Serialize as pretty-printed JSON
    pub fn to_json_pretty(&self) -> Result<String, DomainError> {
        Ok(serde_json::to_string_pretty(self)?)
    }

    /// Serialize to a JSON value
    pub fn to_value(&self) -> Result<serde_json::Value, DomainError> {
        Ok(serde_json::to_value(self)?)
    }

    /// Look up a claim by id
    pub fn claim(&self, id: &str) -> Option<&Claim> {
        self.claims.iter().find(|c| c.id == id)
    }

    /// Look up a claim by id, mutably
    pub fn claim_mut(&mut self, id: &str) -> Option<&mut Claim> {
        self.claims.iter_mut().find(|c| c.id == id)
    }

    /// Look up an implication by id
    pub fn implication(&self, id: &str) -> Option<&Implication> {
        self.implications.iter().find(|i| i.id == id)
    }

    /// Look up an implication by id, mutably
    pub fn implication_mut(&mut self, id: &str) -> Option<&mut Implication> {
        self.implications.iter_mut().find(|i| i.id == id)
    }

    /// Whether a claim with this id exists
    pub fn contains_claim(&self, id: &str) -> bool {
        self.claim(id).is_some()
    }

    /// The root claim, if present
    pub fn root(&self, root_id: &str) -> Option<&Claim> {
        self.claim(root_id)
    }

    /// The implication used to derive a claim's cost (first in document order)
    pub fn supporting_implication(&self, claim: &str) -> Option<&Implication> {
        self.implications.iter().find(|i| i.conclusion == claim)
    }

    /// Whether the claim is a leaf (not the conclusion of any implication)
    pub fn is_leaf(&self, claim: &str) -> bool {
        self.supporting_implication(claim).is_none()
    }

    /// Map each conclusion to the premises of every implication deriving it
    pub fn premises_by_conclusion(&self) -> HashMap<&ClaimId, Vec<&ClaimId>> {
        let mut map: HashMap<&ClaimId, Vec<&ClaimId>> = HashMap::new();
        for implication in &self.implications {
            map.entry(&implication.conclusion)
                .or_default()
                .extend(implication.premises.iter());
        }
        map
    }

    /// Ids of implications that mention the claim as premise or conclusion
    pub fn implications_touching(&self, claim: &ClaimId) -> Vec<ImplicationId> {
        self.implications
            .iter()
            .filter(|i| i.references(claim))
            .map(|i| i.id.clone())
            .collect()
    }

    /// Whether an implication must be re-checked by the oracle
    ///
    /// It is stale when it was never checked, or when any referenced claim
    /// was modified after the last check.
    pub fn is_stale(&self, implication: &Implication) -> bool {
        let Some(checked) = implication.last_checked else {
            return true;
        };

        implication
            .premises
            .iter()
            .chain(std::iter::once(&implication.conclusion))
            .filter_map(|id| self.claim(id.as_str()))
            .filter_map(|claim| claim.modified_at)
            .any(|modified| modified > checked)
    }

    /// Every implication that needs re-checking, in document order
    pub fn stale_implications(&self) -> Vec<&Implication> {
        self.implications.iter().filter(|i| self.is_stale(i)).collect()
    }

    /// Whether adding `premises -> conclusion` would close a cycle
    ///
    /// A cycle exists when the conclusion is already reachable from one of the
    /// premises by following conclusion-to-premise edges, or is a premise itself.
    pub fn would_create_cycle(&self, premises: &[ClaimId], conclusion: &ClaimId) -> bool {
        let by_conclusion = self.premises_by_conclusion();
        let mut stack: Vec<&ClaimId> = premises.iter().collect();
        let mut visited: Vec<&ClaimId> = Vec::new();

        while let Some(current) = stack.pop() {
            if current == conclusion {
                return true;
            }
            if visited.contains(&current) {
                continue;
            }
            visited.push(current);
            if let Some(next) = by_conclusion.get(current) {
                stack.extend(next.iter().copied());
            }
        }
        false
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Duration;

    fn sample() -> Hypergraph {
        let mut graph = Hypergraph::new("test", "", "root");
        graph.claims.push(Claim::new("a", "A"));
        graph.claims.push(Claim::new("b", "B"));
        graph.implications.push(Implication::and("i1", &["a", "b"], ROOT_CLAIM_ID));
        graph
    }

    #[test]
    fn test_new_has_root() {
        let graph = Hypergraph::new("n", "d", "The hypothesis");
        assert_eq!(graph.claims.len(), 1);
        assert!(graph.claims[0].is_root());
        assert!(graph.claims[0].created_at.is_some());
        assert_eq!(graph.metadata.version, "1.0");
    }

    #[test]
    fn test_json_round_trip_preserves_document() {
        let graph = sample();
        let json = graph.to_json_pretty().unwrap();
        let parsed = Hypergraph::from_json(&json).unwrap();
        assert_eq!(graph, parsed);
    }

    #[test]
    fn test_invalid_json_is_domain_error() {
        assert!(matches!(
            Hypergraph::from_json("{\"claims\": []}"),
            Err(DomainError::InvalidDocument(_))
        ));
    }

    #[test]
    fn test_leaf_and_support() {
        let graph = sample();
        assert!(graph.is_leaf("a"));
        assert!(!graph.is_leaf(ROOT_CLAIM_ID));
        assert_eq!(graph.supporting_implication(ROOT_CLAIM_ID).unwrap().id, "i1");
    }

    #[test]
    fn test_staleness_policy() {
        let mut graph = sample();
        let t0 = Utc::now();
        for claim in &mut graph.claims {
            claim.modified_at = Some(t0);
        }

        // Never checked
        assert!(graph.is_stale(&graph.implications[0]));

        // Checked after the last edit
        graph.implications[0].last_checked = Some(t0 + Duration::seconds(5));
        assert!(!graph.is_stale(&graph.implications[0]));

        // A referenced claim edited after the check
        graph.claim_mut("b").unwrap().modified_at = Some(t0 + Duration::seconds(10));
        assert!(graph.is_stale(&graph.implications[0]));
        assert_eq!(graph.stale_implications().len(), 1);
    }

    #[test]
    fn test_unrelated_edit_does_not_stale() {
        let mut graph = sample();
        graph.claims.push(Claim::new("z", "Z"));
        let t0 = Utc::now();
        graph.implications[0].last_checked = Some(t0);
        graph.claim_mut("z").unwrap().modified_at = Some(t0 + Duration::seconds(10));

        assert!(!graph.is_stale(&graph.implications[0]));
    }

    #[test]
    fn test_would_create_cycle() {
        let graph = sample();
        // root <- a ; adding root -> a closes a loop
        assert!(graph.would_create_cycle(&[ClaimId::root()], &ClaimId::from("a")));
        assert!(graph.would_create_cycle(&[ClaimId::from("a")], &ClaimId::from("a")));
        assert!(!graph.would_create_cycle(&[ClaimId::from("b")], &ClaimId::from("a")));
    }

    #[test]
    fn test_premises_by_conclusion_unions_implications() {
        let mut graph = sample();
        graph.claims.push(Claim::new("c", "C"));
        graph.implications.push(Implication::or("i2", &["c"], ROOT_CLAIM_ID));

        let map = graph.premises_by_conclusion();
        assert_eq!(map.get(&ClaimId::root()).map(|v| v.len()), Some(3));
    }
}
