//! Core Janitor implementation for reachability pruning

use crate::{JanitorConfig, JanitorError, PruneMetrics};
use entail_domain::{ClaimId, Hypergraph, ImplicationId};
use std::collections::{HashSet, VecDeque};
use tracing::{debug, info};

/// Result of one prune pass
#[derive(Debug, Clone, PartialEq)]
pub struct PruneOutcome {
    /// The pruned document (the input, untouched, in dry-run mode)
    pub graph: Hypergraph,
    /// Claims removed, in document order
    pub removed_claims: Vec<ClaimId>,
    /// Implications removed, in document order
    pub removed_implications: Vec<ImplicationId>,
    /// Whether this was a dry run
    pub dry_run: bool,
}

impl PruneOutcome {
    /// Whether the pass found nothing to remove
    pub fn is_noop(&self) -> bool {
        self.removed_claims.is_empty() && self.removed_implications.is_empty()
    }
}

/// Janitor for removing claims that do not contribute to the root
///
/// # Examples
///
/// ```
/// use entail_domain::Hypergraph;
/// use entail_janitor::{Janitor, JanitorConfig};
///
/// let graph = Hypergraph::new("Example", "", "The hypothesis");
/// let mut janitor = Janitor::new(JanitorConfig::preview());
///
/// let outcome = janitor.prune(&graph).unwrap();
/// assert!(outcome.is_noop());
/// assert_eq!(janitor.metrics().dry_runs, 1);
/// ```
pub struct Janitor {
    config: JanitorConfig,
    metrics: PruneMetrics,
}

impl Janitor {
    /// Create a new Janitor with the given configuration
    pub fn new(config: JanitorConfig) -> Self {
        Self {
            config,
            metrics: PruneMetrics::new(),
        }
    }

    /// Create a Janitor with default configuration
    pub fn default_config() -> Self {
        Self::new(JanitorConfig::default())
    }

    /// Active configuration
    pub fn config(&self) -> &JanitorConfig {
        &self.config
    }

    /// Switch dry-run mode for subsequent passes
    pub fn set_dry_run(&mut self, dry_run: bool) {
        self.config.dry_run = dry_run;
    }

    /// Get a reference to the current metrics
    pub fn metrics(&self) -> &PruneMetrics {
        &self.metrics
    }

    /// Reset metrics counters
    pub fn reset_metrics(&mut self) {
        self.metrics.reset();
    }

    /// Run one prune pass over a document
    ///
    /// The input is never modified; the pruned copy is returned in the
    /// outcome. Fails only when the root claim is missing, since every claim
    /// would otherwise be removed.
    pub fn prune(&mut self, graph: &Hypergraph) -> Result<PruneOutcome, JanitorError> {
        let root = self.config.root_claim_id.as_str();
        if !graph.contains_claim(root) {
            return Err(JanitorError::MissingRoot(root.to_string()));
        }

        let needed = needed_claims(graph, root);

        let removed_claims: Vec<ClaimId> = graph
            .claims
            .iter()
            .filter(|c| !needed.contains(c.id.as_str()))
            .map(|c| c.id.clone())
            .collect();
        let removed_implications: Vec<ImplicationId> = graph
            .implications
            .iter()
            .filter(|i| !needed.contains(i.conclusion.as_str()))
            .map(|i| i.id.clone())
            .collect();

        let kept = graph.claims.len() - removed_claims.len();
        self.metrics.record_pass(
            removed_claims.len(),
            removed_implications.len(),
            kept,
            self.config.dry_run,
        );

        if self.config.dry_run {
            info!(
                "DRY RUN: Would remove {} claims and {} implications",
                removed_claims.len(),
                removed_implications.len()
            );
            return Ok(PruneOutcome {
                graph: graph.clone(),
                removed_claims,
                removed_implications,
                dry_run: true,
            });
        }

        let mut pruned = graph.clone();
        pruned.claims.retain(|c| needed.contains(c.id.as_str()));
        pruned
            .implications
            .retain(|i| needed.contains(i.conclusion.as_str()));

        info!(
            removed_claims = removed_claims.len(),
            removed_implications = removed_implications.len(),
            kept,
            "Pruned claims unreachable from root"
        );
        for id in &removed_claims {
            debug!(claim = %id, "Removed claim");
        }

        Ok(PruneOutcome {
            graph: pruned,
            removed_claims,
            removed_implications,
            dry_run: false,
        })
    }
}

/// Claim ids on some premise chain to `root`, the root included
///
/// Only conclusion -> premise edges are followed; a claim that merely uses a
/// needed claim as a premise is not itself needed.
pub fn needed_claims<'a>(graph: &'a Hypergraph, root: &'a str) -> HashSet<&'a str> {
    let by_conclusion = graph.premises_by_conclusion();

    let mut needed: HashSet<&str> = HashSet::new();
    let mut queue: VecDeque<&str> = VecDeque::from([root]);
    while let Some(current) = queue.pop_front() {
        if !needed.insert(current) {
            continue;
        }
        if let Some(premises) = by_conclusion.get(&ClaimId::from(current)) {
            queue.extend(premises.iter().copied().map(ClaimId::as_str));
        }
    }
    needed
}

/// Prune a document against `root`, returning the pruned copy and removed claim ids
pub fn prune(graph: &Hypergraph, root: &str) -> Result<(Hypergraph, Vec<ClaimId>), JanitorError> {
    let mut janitor = Janitor::new(JanitorConfig::default().with_root(root));
    let outcome = janitor.prune(graph)?;
    Ok((outcome.graph, outcome.removed_claims))
}


#[cfg(test)]
mod proptests {
    use super::*;
    use entail_domain::{Claim, Implication, ImplicationType, ROOT_CLAIM_ID};
    use proptest::prelude::*;

    fn arbitrary_graph() -> impl Strategy<Value = Hypergraph> {
        (1usize..10).prop_flat_map(|n| {
            proptest::collection::vec((0..=n, proptest::collection::vec(0..=n, 1..4)), 0..12)
                .prop_map(move |edges| {
                    let name = |k: usize| if k == 0 { ROOT_CLAIM_ID.to_string() } else { format!("c{}", k) };
                    let mut graph = Hypergraph::new("prop", "", "root");
                    for k in 1..=n {
                        graph.claims.push(Claim::new(name(k), "claim"));
                    }
                    for (i, (conclusion, premises)) in edges.into_iter().enumerate() {
                        graph.implications.push(Implication::new(
                            format!("i{}", i),
                            premises.into_iter().map(|p| ClaimId::from(name(p))).collect(),
                            name(conclusion),
                            ImplicationType::And,
                        ));
                    }
                    graph
                })
        })
    }

    proptest! {
        /// Property: pruning is idempotent and never removes the root
        #[test]
        fn test_prune_idempotent(graph in arbitrary_graph()) {
            let (once, removed) = prune(&graph, ROOT_CLAIM_ID).unwrap();
            prop_assert!(once.contains_claim(ROOT_CLAIM_ID));
            prop_assert!(!removed.contains(&ClaimId::root()));

            let (twice, removed_again) = prune(&once, ROOT_CLAIM_ID).unwrap();
            prop_assert_eq!(&once, &twice);
            prop_assert!(removed_again.is_empty());
        }

        /// Property: every kept implication concludes a kept claim
        #[test]
        fn test_kept_implications_are_anchored(graph in arbitrary_graph()) {
            let (pruned, removed) = prune(&graph, ROOT_CLAIM_ID).unwrap();
            prop_assert_eq!(pruned.claims.len() + removed.len(), graph.claims.len());
            for implication in &pruned.implications {
                prop_assert!(pruned.contains_claim(implication.conclusion.as_str()));
            }
        }
    }
}
