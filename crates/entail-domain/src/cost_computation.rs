//! Cost propagation
//!
//! Converts belief scores and testability into per-claim epistemic cost and
//! propagates it bottom-up through the implications:
//!
//! 1. Leaves: `-log2(score / 10)` plus 0 (testable) or infinity (not testable)
//! 2. AND: component-wise sum over premises, undefined if any premise is
//! 3. OR: components of the premise with the lowest defined total cost
//! 4. A failed entailment check forces the conclusion to infinity
//!
//! Evaluation is a single topological pass over an explicit memo table.
//! Claims on a cycle are detected up front, reported, and left undefined so
//! the pass always terminates.

use crate::cost::{self, EpistemicCost};
use crate::{Claim, ClaimId, EntailmentStatus, Hypergraph, Implication, ImplicationId, ImplicationType, Testability};
use serde::Serialize;
use std::collections::{HashMap, VecDeque};

/// The three derived cost fields of one claim
#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
pub struct ClaimCost {
    /// Cost attributable to evidence strength
    pub evidence: Option<EpistemicCost>,
    /// Cost attributable to the missing experiment
    pub experimental: Option<EpistemicCost>,
    /// Sum of both components
    pub total: Option<EpistemicCost>,
}

impl ClaimCost {
    /// Not yet evaluated
    pub const UNDEFINED: ClaimCost = ClaimCost {
        evidence: None,
        experimental: None,
        total: None,
    };

    /// Certainly false or unknowable
    pub const INFINITE: ClaimCost = ClaimCost {
        evidence: Some(EpistemicCost::Infinite),
        experimental: Some(EpistemicCost::Infinite),
        total: Some(EpistemicCost::Infinite),
    };

    /// Build from components, deriving the total
    pub fn from_components(
        evidence: Option<EpistemicCost>,
        experimental: Option<EpistemicCost>,
    ) -> Self {
        Self {
            evidence,
            experimental,
            total: cost::sum(evidence, experimental),
        }
    }

    /// Read the derived fields currently stored on a claim
    pub fn of(claim: &Claim) -> Self {
        Self {
            evidence: claim.evidence_epistemic_cost,
            experimental: claim.experimental_epistemic_cost,
            total: claim.cost,
        }
    }

    fn apply_to(&self, claim: &mut Claim) {
        claim.evidence_epistemic_cost = self.evidence;
        claim.experimental_epistemic_cost = self.experimental;
        claim.cost = self.total;
    }
}

/// Diagnostics gathered while propagating costs
///
/// Propagation never fails; problems in the graph are reported here and the
/// affected claims are left undefined.
#[derive(Debug, Clone, Default, PartialEq)]
pub struct CostReport {
    /// Strongly connected groups of claims that are their own premises
    pub cycles: Vec<Vec<ClaimId>>,
    /// Implications ignored because an earlier one already concludes the same claim
    pub ignored_implications: Vec<ImplicationId>,
    /// Premise references that resolve to no claim
    pub missing_premises: Vec<(ImplicationId, ClaimId)>,
    /// Claims whose total cost is defined
    pub evaluated: usize,
    /// Claims whose total cost is undefined
    pub undefined: usize,
}

impl CostReport {
    /// Whether any claim sits on a cycle
    pub fn has_cycles(&self) -> bool {
        !self.cycles.is_empty()
    }

    /// Claims on any cycle
    pub fn cyclic_claims(&self) -> impl Iterator<Item = &ClaimId> {
        self.cycles.iter().flatten()
    }
}

/// Cost of a leaf claim (one that no implication concludes)
///
/// A leaf with neither evidence nor a score has not been evaluated yet and
/// stays undefined; it is never treated as zero.
pub fn leaf_cost(claim: &Claim) -> ClaimCost {
    if claim.evidence.is_empty() && claim.score.is_none() {
        return ClaimCost::UNDEFINED;
    }

    let evidence = claim
        .score
        .and_then(|score| EpistemicCost::from_probability(score / 10.0));

    let experimental = match claim.testability {
        Some(Testability::Testable) => EpistemicCost::ZERO,
        Some(Testability::Untestable) | None => EpistemicCost::Infinite,
    };

    ClaimCost::from_components(evidence, Some(experimental))
}

/// Combine premise costs through an implication
pub fn aggregate(implication: &Implication, premises: &[ClaimCost]) -> ClaimCost {
    let combined = match implication.implication_type {
        ImplicationType::And => {
            let evidence = premises
                .iter()
                .try_fold(EpistemicCost::ZERO, |acc, c| Some(acc + c.evidence?));
            let experimental = premises
                .iter()
                .try_fold(EpistemicCost::ZERO, |acc, c| Some(acc + c.experimental?));
            ClaimCost::from_components(evidence, experimental)
        }
        ImplicationType::Or => premises
            .iter()
            .filter_map(|c| c.total.map(|total| (total, c)))
            .min_by(|(a, _), (b, _)| a.total_cmp(b))
            .map(|(_, best)| ClaimCost::from_components(best.evidence, best.experimental))
            .unwrap_or(ClaimCost::UNDEFINED),
    };

    if implication.entailment_status == EntailmentStatus::Failed {
        ClaimCost::INFINITE
    } else {
        combined
    }
}

/// Compute every claim's cost without touching the document
///
/// Returns the costs keyed by claim id together with the diagnostics.
pub fn compute_costs(graph: &Hypergraph) -> (HashMap<ClaimId, ClaimCost>, CostReport) {
    let mut report = CostReport::default();

    // Index claims; repeated ids resolve to the first occurrence
    let mut index: HashMap<&ClaimId, usize> = HashMap::new();
    for (i, claim) in graph.claims.iter().enumerate() {
        index.entry(&claim.id).or_insert(i);
    }
    let n = graph.claims.len();

    // Each claim is derived by at most one implication
    let mut support: Vec<Option<&Implication>> = vec![None; n];
    for implication in &graph.implications {
        let Some(&c) = index.get(&implication.conclusion) else {
            continue;
        };
        if support[c].is_some() {
            report.ignored_implications.push(implication.id.clone());
        } else {
            support[c] = Some(implication);
        }
    }

    // Dependency edges: conclusion -> distinct existing premises
    let mut edges: Vec<Vec<usize>> = vec![Vec::new(); n];
    for (c, implication) in support.iter().enumerate() {
        let Some(implication) = implication else {
            continue;
        };
        for premise in implication.distinct_premises() {
            match index.get(premise) {
                Some(&p) => edges[c].push(p),
                None => report
                    .missing_premises
                    .push((implication.id.clone(), premise.clone())),
            }
        }
    }

    let components = cyclic_components(&edges);
    let mut memo: Vec<Option<ClaimCost>> = vec![None; n];
    let mut on_cycle = vec![false; n];
    for component in &components {
        for &c in component {
            on_cycle[c] = true;
            memo[c] = Some(ClaimCost::UNDEFINED);
        }
        report
            .cycles
            .push(component.iter().map(|&c| graph.claims[c].id.clone()).collect());
    }

    // Kahn's algorithm over the acyclic remainder
    let mut pending = vec![0usize; n];
    let mut dependents: Vec<Vec<usize>> = vec![Vec::new(); n];
    for c in 0..n {
        if on_cycle[c] {
            continue;
        }
        for &p in &edges[c] {
            if !on_cycle[p] {
                pending[c] += 1;
                dependents[p].push(c);
            }
        }
    }

    let mut ready: VecDeque<usize> = (0..n).filter(|&c| !on_cycle[c] && pending[c] == 0).collect();
    while let Some(c) = ready.pop_front() {
        let computed = match support[c] {
            None => leaf_cost(&graph.claims[c]),
            Some(implication) => {
                let premises: Vec<ClaimCost> = implication
                    .distinct_premises()
                    .into_iter()
                    .map(|premise| {
                        index
                            .get(premise)
                            .and_then(|&p| memo[p])
                            .unwrap_or(ClaimCost::UNDEFINED)
                    })
                    .collect();
                aggregate(implication, &premises)
            }
        };
        memo[c] = Some(computed);

        for &d in &dependents[c] {
            pending[d] -= 1;
            if pending[d] == 0 {
                ready.push_back(d);
            }
        }
    }

    // Visited guard: anything the pass could not reach stays undefined
    let mut costs = HashMap::with_capacity(n);
    for (c, claim) in graph.claims.iter().enumerate() {
        let first = index.get(&claim.id).copied().unwrap_or(c);
        let value = memo[first].unwrap_or(ClaimCost::UNDEFINED);
        if first == c {
            if value.total.is_some() {
                report.evaluated += 1;
            } else {
                report.undefined += 1;
            }
            costs.insert(claim.id.clone(), value);
        }
    }

    (costs, report)
}

/// Recompute the derived cost fields of every claim in place
///
/// Idempotent: derived fields are never read back as inputs, so running it
/// twice without other edits produces the same document.
pub fn update_costs(graph: &mut Hypergraph) -> CostReport {
    let (costs, report) = compute_costs(graph);
    for claim in &mut graph.claims {
        costs
            .get(&claim.id)
            .copied()
            .unwrap_or(ClaimCost::UNDEFINED)
            .apply_to(claim);
    }
    report
}

/// Strongly connected components that form cycles (iterative Tarjan)
///
/// A component is cyclic when it has more than one member or a self-edge.
fn cyclic_components(edges: &[Vec<usize>]) -> Vec<Vec<usize>> {
    const UNVISITED: usize = usize::MAX;

    let n = edges.len();
    let mut order = vec![UNVISITED; n];
    let mut low = vec![0usize; n];
    let mut on_stack = vec![false; n];
    let mut stack: Vec<usize> = Vec::new();
    let mut next = 0usize;
    let mut cycles = Vec::new();

    for root in 0..n {
        if order[root] != UNVISITED {
            continue;
        }

        order[root] = next;
        low[root] = next;
        next += 1;
        stack.push(root);
        on_stack[root] = true;
        let mut frames: Vec<(usize, usize)> = vec![(root, 0)];

        while let Some(&(v, i)) = frames.last() {
            if i < edges[v].len() {
                if let Some(frame) = frames.last_mut() {
                    frame.1 += 1;
                }
                let w = edges[v][i];
                if order[w] == UNVISITED {
                    order[w] = next;
                    low[w] = next;
                    next += 1;
                    stack.push(w);
                    on_stack[w] = true;
                    frames.push((w, 0));
                } else if on_stack[w] {
                    low[v] = low[v].min(order[w]);
                }
                continue;
            }

            frames.pop();
            if let Some(&(parent, _)) = frames.last() {
                low[parent] = low[parent].min(low[v]);
            }

            if low[v] == order[v] {
                let mut component = Vec::new();
                while let Some(w) = stack.pop() {
                    on_stack[w] = false;
                    component.push(w);
                    if w == v {
                        break;
                    }
                }
                if component.len() > 1 || edges[v].contains(&v) {
                    component.sort_unstable();
                    cycles.push(component);
                }
            }
        }
    }

    cycles.sort();
    cycles
}
