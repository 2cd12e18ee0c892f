//! Entailment checking
//!
//! Builds the request handed to an [`EntailmentOracle`] and interprets its
//! verdict. Only ids and texts cross the boundary: scores and evidence are
//! withheld so the judgment stays purely logical.

use crate::traits::EntailmentOracle;
use crate::{Claim, ClaimId, EntailmentStatus, ImplicationType};
use serde::{Deserialize, Serialize};

/// A claim as the oracle sees it
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StatementRef {
    /// Claim id
    pub id: ClaimId,
    /// Claim text
    pub text: String,
}

impl From<&Claim> for StatementRef {
    fn from(claim: &Claim) -> Self {
        Self {
            id: claim.id.clone(),
            text: claim.text.clone(),
        }
    }
}

/// Everything the oracle is allowed to see about one implication
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct EntailmentRequest {
    /// Premise statements in implication order
    pub premises: Vec<StatementRef>,
    /// Conclusion statement
    pub conclusion: StatementRef,
    /// AND / OR connective
    pub implication_type: ImplicationType,
}

impl EntailmentRequest {
    /// Build a request from claims
    pub fn new(premises: &[&Claim], conclusion: &Claim, implication_type: ImplicationType) -> Self {
        Self {
            premises: premises.iter().map(|c| StatementRef::from(*c)).collect(),
            conclusion: StatementRef::from(conclusion),
            implication_type,
        }
    }

    fn is_premise(&self, id: &ClaimId) -> bool {
        self.premises.iter().any(|p| &p.id == id)
    }
}

/// Raw judgment returned by an oracle
#[derive(Debug, Clone, PartialEq, Eq, Default, Serialize, Deserialize)]
pub struct EntailmentVerdict {
    /// Whether the premises entail the conclusion
    pub is_valid: bool,
    /// Free-text explanation
    #[serde(default)]
    pub explanation: String,
    /// AND only: premises that could be dropped without breaking entailment
    #[serde(default)]
    pub redundant_premises: Vec<ClaimId>,
    /// AND only: premises the conclusion trivially entails
    #[serde(default)]
    pub degenerate_premises: Vec<ClaimId>,
}

/// The engine's interpretation of a verdict
#[derive(Debug, Clone, PartialEq)]
pub struct EntailmentOutcome {
    /// Status to record on the implication
    pub status: EntailmentStatus,
    /// Explanation to record on the implication
    pub explanation: String,
    /// The verdict as returned by the oracle
    pub verdict: EntailmentVerdict,
}

impl EntailmentOutcome {
    /// Decide the status of an implication from a verdict
    ///
    /// An invalid verdict fails. On an AND, any redundant or degenerate
    /// premise also fails, even when the verdict is otherwise valid. Ids that
    /// are not premises of the request are ignored.
    pub fn interpret(request: &EntailmentRequest, verdict: EntailmentVerdict) -> Self {
        let redundant: Vec<&ClaimId> = verdict
            .redundant_premises
            .iter()
            .filter(|id| request.is_premise(id))
            .collect();
        let degenerate: Vec<&ClaimId> = verdict
            .degenerate_premises
            .iter()
            .filter(|id| request.is_premise(id))
            .collect();

        let mut explanation = verdict.explanation.clone();
        let status = if !verdict.is_valid {
            EntailmentStatus::Failed
        } else if request.implication_type == ImplicationType::And
            && (!redundant.is_empty() || !degenerate.is_empty())
        {
            if !redundant.is_empty() {
                explanation.push_str(&format!("\nRedundant premises: {}", join(&redundant)));
            }
            if !degenerate.is_empty() {
                explanation.push_str(&format!("\nDegenerate premises: {}", join(&degenerate)));
            }
            EntailmentStatus::Failed
        } else {
            EntailmentStatus::Passed
        };

        Self {
            status,
            explanation: explanation.trim().to_string(),
            verdict,
        }
    }
}

fn join(ids: &[&ClaimId]) -> String {
    ids.iter().map(|id| id.as_str()).collect::<Vec<_>>().join(", ")
}

/// Ask an oracle whether `premises` entail `conclusion` and interpret the answer
///
/// Oracle errors are returned untouched; nothing is written anywhere, so a
/// failed call leaves the implication safely retriable.
pub fn check_implication<O: EntailmentOracle>(
    premises: &[&Claim],
    conclusion: &Claim,
    implication_type: ImplicationType,
    oracle: &O,
) -> Result<EntailmentOutcome, O::Error> {
    let request = EntailmentRequest::new(premises, conclusion, implication_type);
    let verdict = oracle.check(&request)?;
    Ok(EntailmentOutcome::interpret(&request, verdict))
}
