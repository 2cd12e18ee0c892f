//! Implication module - AND/OR hyperedges between claims

use crate::ClaimId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fmt;

/// Unique identifier for an implication
#[derive(Debug, Clone, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct ImplicationId(String);

impl ImplicationId {
    /// Create an implication id from any string
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    /// Borrow the id as a string slice
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for ImplicationId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for ImplicationId {
    fn from(s: &str) -> Self {
        Self(s.to_string())
    }
}

impl From<String> for ImplicationId {
    fn from(s: String) -> Self {
        Self(s)
    }
}

impl PartialEq<str> for ImplicationId {
    fn eq(&self, other: &str) -> bool {
        self.0 == other
    }
}

impl PartialEq<&str> for ImplicationId {
    fn eq(&self, other: &&str) -> bool {
        self.0 == *other
    }
}

/// Logical connective of an implication
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum ImplicationType {
    /// All premises together entail the conclusion
    #[serde(rename = "AND")]
    And,
    /// Any single premise entails the conclusion
    #[serde(rename = "OR")]
    Or,
}

impl ImplicationType {
    /// Document form (`AND` / `OR`)
    pub fn as_str(&self) -> &'static str {
        match self {
            ImplicationType::And => "AND",
            ImplicationType::Or => "OR",
        }
    }

    /// Parse the document form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "AND" => Some(ImplicationType::And),
            "OR" => Some(ImplicationType::Or),
            _ => None,
        }
    }
}

impl fmt::Display for ImplicationType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Outcome of the last entailment check
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default)]
pub enum EntailmentStatus {
    /// Never checked, or invalidated by an edit
    #[default]
    Unset,
    /// The premises were judged to entail the conclusion
    Passed,
    /// The logical step is broken
    Failed,
}

impl EntailmentStatus {
    /// Document form
    pub fn as_str(&self) -> &'static str {
        match self {
            EntailmentStatus::Unset => "unset",
            EntailmentStatus::Passed => "passed",
            EntailmentStatus::Failed => "failed",
        }
    }

    /// Parse the document form
    pub fn parse(s: &str) -> Option<Self> {
        match s {
            "unset" => Some(EntailmentStatus::Unset),
            "passed" => Some(EntailmentStatus::Passed),
            "failed" => Some(EntailmentStatus::Failed),
            _ => None,
        }
    }
}

impl Serialize for EntailmentStatus {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        serializer.serialize_str(self.as_str())
    }
}

impl<'de> Deserialize<'de> for EntailmentStatus {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        // Older documents store an unchecked status as null
        match Option::<String>::deserialize(deserializer)? {
            None => Ok(EntailmentStatus::Unset),
            Some(s) => Self::parse(&s).ok_or_else(|| {
                serde::de::Error::custom(format!("unknown entailment status: {}", s))
            }),
        }
    }
}

/// A hyperedge deriving one conclusion from one or more premises
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Implication {
    /// Unique identifier
    pub id: ImplicationId,

    /// Premise claim ids (non-empty, no repeats)
    pub premises: Vec<ClaimId>,

    /// Conclusion claim id
    pub conclusion: ClaimId,

    /// AND / OR connective
    #[serde(rename = "type")]
    pub implication_type: ImplicationType,

    /// Why the premises should entail the conclusion
    #[serde(default)]
    pub reasoning: String,

    /// When the entailment was last checked
    #[serde(default)]
    pub last_checked: Option<DateTime<Utc>>,

    /// Result of the last check
    #[serde(default)]
    pub entailment_status: EntailmentStatus,

    /// Explanation returned with the last check
    #[serde(default)]
    pub entailment_explanation: Option<String>,
}

impl Implication {
    /// Create an unchecked implication
    pub fn new(
        id: impl Into<ImplicationId>,
        premises: Vec<ClaimId>,
        conclusion: impl Into<ClaimId>,
        implication_type: ImplicationType,
    ) -> Self {
        Self {
            id: id.into(),
            premises,
            conclusion: conclusion.into(),
            implication_type,
            reasoning: String::new(),
            last_checked: None,
            entailment_status: EntailmentStatus::Unset,
            entailment_explanation: None,
        }
    }

    /// Shorthand for an AND implication over string ids
    pub fn and(id: &str, premises: &[&str], conclusion: &str) -> Self {
        Self::new(
            id,
            premises.iter().map(|p| ClaimId::from(*p)).collect(),
            conclusion,
            ImplicationType::And,
        )
    }

    /// Shorthand for an OR implication over string ids
    pub fn or(id: &str, premises: &[&str], conclusion: &str) -> Self {
        Self::new(
            id,
            premises.iter().map(|p| ClaimId::from(*p)).collect(),
            conclusion,
            ImplicationType::Or,
        )
    }

    /// Whether the claim appears as a premise or as the conclusion
    pub fn references(&self, claim: &ClaimId) -> bool {
        &self.conclusion == claim || self.premises.contains(claim)
    }

    /// Forget the last entailment check, forcing re-validation
    pub fn reset_entailment(&mut self) {
        self.entailment_status = EntailmentStatus::Unset;
        self.last_checked = None;
        self.entailment_explanation = None;
    }

    /// Premises with repeats removed, in first-seen order
    pub fn distinct_premises(&self) -> Vec<&ClaimId> {
        let mut seen = Vec::with_capacity(self.premises.len());
        for premise in &self.premises {
            if !seen.contains(&premise) {
                seen.push(premise);
            }
        }
        seen
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use serde_json::json;

    #[test]
    fn test_document_shape() {
        let implication = Implication::and("i1", &["c1", "c2"], "hypothesis");
        let value = serde_json::to_value(&implication).unwrap();

        assert_eq!(value["type"], json!("AND"));
        assert_eq!(value["premises"], json!(["c1", "c2"]));
        assert_eq!(value["entailment_status"], json!("unset"));
        assert!(value["last_checked"].is_null());
    }

    #[test]
    fn test_null_status_reads_as_unset() {
        let implication: Implication = serde_json::from_value(json!({
            "id": "i1",
            "premises": ["a"],
            "conclusion": "b",
            "type": "OR",
            "entailment_status": null
        }))
        .unwrap();

        assert_eq!(implication.entailment_status, EntailmentStatus::Unset);
        assert_eq!(implication.implication_type, ImplicationType::Or);
    }

    #[test]
    fn test_unknown_type_rejected() {
        let result: Result<Implication, _> = serde_json::from_value(json!({
            "id": "i1",
            "premises": ["a"],
            "conclusion": "b",
            "type": "XOR"
        }));
        assert!(result.is_err());
    }

    #[test]
    fn test_reset_entailment() {
        let mut implication = Implication::or("i1", &["a"], "b");
        implication.entailment_status = EntailmentStatus::Failed;
        implication.last_checked = Some(Utc::now());
        implication.entailment_explanation = Some("circular".to_string());

        implication.reset_entailment();

        assert_eq!(implication.entailment_status, EntailmentStatus::Unset);
        assert!(implication.last_checked.is_none());
        assert!(implication.entailment_explanation.is_none());
    }

    #[test]
    fn test_distinct_premises_and_references() {
        let implication = Implication::and("i1", &["a", "b", "a"], "c");
        let distinct: Vec<&str> = implication.distinct_premises().iter().map(|p| p.as_str()).collect();

        assert_eq!(distinct, vec!["a", "b"]);
        assert!(implication.references(&ClaimId::from("c")));
        assert!(implication.references(&ClaimId::from("b")));
        assert!(!implication.references(&ClaimId::from("z")));
    }
}
