//! Compact overview of a document

use entail_domain::{ClaimCost, ClaimId, Hypergraph, ImplicationId};
use serde::Serialize;
use std::cmp::Ordering;

/// One claim with its derived costs
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct CostLine {
    /// Claim id
    pub id: ClaimId,
    /// Claim text
    pub text: String,
    /// Evidence, experimental and total cost
    pub cost: ClaimCost,
}

/// What a caller needs to know after each edit
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct SummaryView {
    /// Document name
    pub name: String,
    /// Root claim costs; `None` when the root is missing
    pub root: Option<CostLine>,
    /// Number of claims
    pub claim_count: usize,
    /// Number of implications
    pub implication_count: usize,
    /// Validation errors
    pub error_count: usize,
    /// Validation warnings
    pub warning_count: usize,
    /// Leaves that have not been scored yet
    pub unevaluated_leaves: Vec<ClaimId>,
    /// Implications that need an entailment check
    pub stale_implications: Vec<ImplicationId>,
    /// Non-root claims, undefined first, then by descending total cost
    pub branches: Vec<CostLine>,
}

impl SummaryView {
    /// Summarize a document whose costs are up to date
    pub fn build(graph: &Hypergraph, root_id: &str, error_count: usize, warning_count: usize) -> Self {
        let line = |claim: &entail_domain::Claim| CostLine {
            id: claim.id.clone(),
            text: claim.text.clone(),
            cost: ClaimCost::of(claim),
        };

        let mut branches: Vec<CostLine> = graph
            .claims
            .iter()
            .filter(|c| c.id != root_id)
            .map(line)
            .collect();
        branches.sort_by(|a, b| needs_work_first(&a.cost, &b.cost));

        Self {
            name: graph.metadata.name.clone(),
            root: graph.root(root_id).map(line),
            claim_count: graph.claims.len(),
            implication_count: graph.implications.len(),
            error_count,
            warning_count,
            unevaluated_leaves: graph
                .claims
                .iter()
                .filter(|c| c.score.is_none() && graph.is_leaf(c.id.as_str()))
                .map(|c| c.id.clone())
                .collect(),
            stale_implications: graph
                .stale_implications()
                .into_iter()
                .map(|i| i.id.clone())
                .collect(),
            branches,
        }
    }

    /// Whether the document has no validation errors
    pub fn is_valid(&self) -> bool {
        self.error_count == 0
    }
}

fn needs_work_first(a: &ClaimCost, b: &ClaimCost) -> Ordering {
    match (a.total, b.total) {
        (None, None) => Ordering::Equal,
        (None, Some(_)) => Ordering::Less,
        (Some(_), None) => Ordering::Greater,
        (Some(x), Some(y)) => y.total_cmp(&x),
    }
}
