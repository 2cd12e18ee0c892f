//! Request types for document edits

use chrono::{DateTime, Utc};
use entail_domain::{Claim, ClaimId, Evidence, Implication, ImplicationId, ImplicationType, Testability};
use serde::{Deserialize, Serialize};

/// A claim to add
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NewClaim {
    /// Unique id
    pub id: String,
    /// Statement text (must not be empty)
    pub text: String,
    /// Belief score in [0, 10]
    pub score: Option<f64>,
    /// Free-text justification
    pub reasoning: String,
    /// Supporting evidence
    pub evidence: Vec<Evidence>,
    /// Known open questions
    pub uncertainties: Vec<String>,
    /// Labels
    pub tags: Vec<String>,
    /// Whether an experiment could settle the claim
    pub testability: Option<Testability>,
}

impl NewClaim {
    /// Claim with id and text only
    pub fn new(id: impl Into<String>, text: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            text: text.into(),
            ..Self::default()
        }
    }

    /// Set the score
    pub fn with_score(mut self, score: f64) -> Self {
        self.score = Some(score);
        self
    }

    /// Set testability
    pub fn with_testability(mut self, testability: Testability) -> Self {
        self.testability = Some(testability);
        self
    }

    /// Attach one piece of evidence
    pub fn with_evidence(mut self, evidence: Evidence) -> Self {
        self.evidence.push(evidence);
        self
    }

    pub(crate) fn into_claim(self, now: DateTime<Utc>) -> Claim {
        let mut claim = Claim::new(self.id, self.text).with_timestamps(now);
        claim.score = self.score;
        claim.reasoning = self.reasoning;
        claim.evidence = self.evidence;
        claim.uncertainties = self.uncertainties;
        claim.tags = self.tags;
        claim.testability = self.testability;
        claim
    }
}

/// Partial update of a claim; `None` leaves a field as it is
///
/// `score` and `testability` are doubly optional so they can be cleared:
/// `Some(None)` unsets the field.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ClaimUpdate {
    /// New text
    pub text: Option<String>,
    /// New score, or `Some(None)` to clear it
    pub score: Option<Option<f64>>,
    /// New reasoning
    pub reasoning: Option<String>,
    /// Replacement evidence list
    pub evidence: Option<Vec<Evidence>>,
    /// Replacement uncertainties
    pub uncertainties: Option<Vec<String>>,
    /// Replacement tags
    pub tags: Option<Vec<String>>,
    /// New testability, or `Some(None)` to clear it
    pub testability: Option<Option<Testability>>,
}

impl ClaimUpdate {
    /// Update nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Change the text
    pub fn text(mut self, text: impl Into<String>) -> Self {
        self.text = Some(text.into());
        self
    }

    /// Change the score
    pub fn score(mut self, score: f64) -> Self {
        self.score = Some(Some(score));
        self
    }

    /// Change testability
    pub fn testability(mut self, testability: Testability) -> Self {
        self.testability = Some(Some(testability));
        self
    }

    /// Change the reasoning
    pub fn reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Replace the evidence list
    pub fn evidence(mut self, evidence: Vec<Evidence>) -> Self {
        self.evidence = Some(evidence);
        self
    }

    /// Replace the uncertainties
    pub fn uncertainties(mut self, uncertainties: Vec<String>) -> Self {
        self.uncertainties = Some(uncertainties);
        self
    }

    /// Replace the tags
    pub fn tags(mut self, tags: Vec<String>) -> Self {
        self.tags = Some(tags);
        self
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }

    /// Apply to a claim, returning whether the text changed
    pub(crate) fn apply(self, claim: &mut Claim) -> bool {
        let text_changed = self.text.as_ref().is_some_and(|t| *t != claim.text);
        if let Some(text) = self.text {
            claim.text = text;
        }
        if let Some(score) = self.score {
            claim.score = score;
        }
        if let Some(reasoning) = self.reasoning {
            claim.reasoning = reasoning;
        }
        if let Some(evidence) = self.evidence {
            claim.evidence = evidence;
        }
        if let Some(uncertainties) = self.uncertainties {
            claim.uncertainties = uncertainties;
        }
        if let Some(tags) = self.tags {
            claim.tags = tags;
        }
        if let Some(testability) = self.testability {
            claim.testability = testability;
        }
        text_changed
    }
}

/// An implication to add
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct NewImplication {
    /// Unique id
    pub id: String,
    /// Premise claim ids (at least one)
    pub premises: Vec<ClaimId>,
    /// Conclusion claim id
    pub conclusion: ClaimId,
    /// AND / OR
    #[serde(rename = "type")]
    pub implication_type: ImplicationType,
    /// Free-text justification
    #[serde(default)]
    pub reasoning: String,
}

impl NewImplication {
    /// AND implication over string ids
    pub fn and(id: impl Into<String>, premises: &[&str], conclusion: &str) -> Self {
        Self::new(id, premises, conclusion, ImplicationType::And)
    }

    /// OR implication over string ids
    pub fn or(id: impl Into<String>, premises: &[&str], conclusion: &str) -> Self {
        Self::new(id, premises, conclusion, ImplicationType::Or)
    }

    fn new(id: impl Into<String>, premises: &[&str], conclusion: &str, implication_type: ImplicationType) -> Self {
        Self {
            id: id.into(),
            premises: premises.iter().map(|p| ClaimId::from(*p)).collect(),
            conclusion: ClaimId::from(conclusion),
            implication_type,
            reasoning: String::new(),
        }
    }

    /// Set the reasoning
    pub fn with_reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = reasoning.into();
        self
    }

    pub(crate) fn into_implication(self) -> Implication {
        let mut implication = Implication::new(
            ImplicationId::from(self.id.as_str()),
            self.premises,
            self.conclusion,
            self.implication_type,
        );
        implication.reasoning = self.reasoning;
        implication
    }
}

/// Partial update of an implication
///
/// Changing premises, conclusion or type invalidates the last entailment
/// check; changing only the reasoning does not.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ImplicationUpdate {
    /// Replacement premises
    pub premises: Option<Vec<ClaimId>>,
    /// Replacement conclusion
    pub conclusion: Option<ClaimId>,
    /// Replacement connective
    pub implication_type: Option<ImplicationType>,
    /// Replacement reasoning
    pub reasoning: Option<String>,
}

impl ImplicationUpdate {
    /// Update nothing yet
    pub fn new() -> Self {
        Self::default()
    }

    /// Replace the premises
    pub fn premises(mut self, premises: &[&str]) -> Self {
        self.premises = Some(premises.iter().map(|p| ClaimId::from(*p)).collect());
        self
    }

    /// Replace the conclusion
    pub fn conclusion(mut self, conclusion: &str) -> Self {
        self.conclusion = Some(ClaimId::from(conclusion));
        self
    }

    /// Replace the connective
    pub fn implication_type(mut self, implication_type: ImplicationType) -> Self {
        self.implication_type = Some(implication_type);
        self
    }

    /// Replace the reasoning
    pub fn reasoning(mut self, reasoning: impl Into<String>) -> Self {
        self.reasoning = Some(reasoning.into());
        self
    }

    /// Whether no field is set
    pub fn is_empty(&self) -> bool {
        self == &Self::default()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_new_claim_sets_timestamps() {
        let now = Utc::now();
        let claim = NewClaim::new("c1", "text").with_score(7.0).into_claim(now);

        assert_eq!(claim.created_at, Some(now));
        assert_eq!(claim.modified_at, Some(now));
        assert_eq!(claim.score, Some(7.0));
        assert!(claim.cost.is_none());
    }

    #[test]
    fn test_claim_update_reports_text_change() {
        let mut claim = Claim::new("c1", "old");

        assert!(!ClaimUpdate::new().score(3.0).apply(&mut claim));
        assert!(!ClaimUpdate::new().text("old").apply(&mut claim));
        assert!(ClaimUpdate::new().text("new").apply(&mut claim));
        assert_eq!(claim.text, "new");
        assert_eq!(claim.score, Some(3.0));
    }

    #[test]
    fn test_claim_update_can_clear_score() {
        let mut claim = Claim::new("c1", "text").with_score(4.0);
        let update = ClaimUpdate {
            score: Some(None),
            ..ClaimUpdate::default()
        };
        update.apply(&mut claim);
        assert_eq!(claim.score, None);
    }

    #[test]
    fn test_claim_update_replaces_lists() {
        let mut claim = Claim::new("c1", "text");
        ClaimUpdate::new()
            .tags(vec!["CRITICAL_BLOCKER".to_string()])
            .uncertainties(vec!["Sample size".to_string()])
            .apply(&mut claim);

        assert!(claim.has_tag("CRITICAL_BLOCKER"));
        assert_eq!(claim.uncertainties, vec!["Sample size".to_string()]);
    }

    #[test]
    fn test_empty_updates() {
        assert!(ClaimUpdate::new().is_empty());
        assert!(!ClaimUpdate::new().reasoning("why").is_empty());
        assert!(ImplicationUpdate::new().is_empty());
        assert!(!ImplicationUpdate::new().conclusion("x").is_empty());
    }

    #[test]
    fn test_new_implication_deserializes_type_field() {
        let json = r#"{"id": "i1", "premises": ["a"], "conclusion": "hypothesis", "type": "OR"}"#;
        let parsed: NewImplication = serde_json::from_str(json).unwrap();
        assert_eq!(parsed, NewImplication::or("i1", &["a"], "hypothesis"));
    }
}
