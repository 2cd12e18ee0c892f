//! Core manager: edits, pruning and entailment checks over a versioned store

use crate::{ClaimUpdate, EngineConfig, ImplicationUpdate, ManagerError, NewClaim, NewImplication, SummaryView};
use chrono::Utc;
use entail_domain::{
    compute_costs, ClaimCost, ClaimId, CostReport, EntailmentOracle, EntailmentOutcome, EntailmentRequest,
    EntailmentStatus, Hypergraph, ImplicationId, SnapshotId, SnapshotInfo, SnapshotStore,
};
use entail_gatekeeper::{Gatekeeper, ValidationReport};
use entail_janitor::{Janitor, PruneMetrics, PruneOutcome};
use entail_store::{StoreError, VersionedStore};
use std::collections::HashMap;
use std::fmt::Display;
use std::sync::Arc;
use tokio::time::timeout;
use tracing::{debug, info, warn};

/// Result of checking every stale implication
#[derive(Debug)]
pub struct StaleCheckReport {
    /// Implications checked successfully, with their new status
    pub checked: Vec<(ImplicationId, EntailmentStatus)>,
    /// Implications whose check failed; they stay stale
    pub failures: Vec<(ImplicationId, ManagerError)>,
    /// Document overview after all checks
    pub summary: SummaryView,
}

/// Owns one document and routes every edit through a versioned save
///
/// Edits are applied to a copy of the document; the copy replaces the
/// in-memory document only after it has been saved, so a failed save leaves
/// both the store and the manager unchanged.
///
/// # Examples
///
/// ```
/// use entail_domain::Testability;
/// use entail_manager::{EngineConfig, HypergraphManager, NewClaim, NewImplication};
/// use entail_store::SqliteBackend;
///
/// let backend = SqliteBackend::in_memory().unwrap();
/// let mut manager = HypergraphManager::create(
///     backend,
///     EngineConfig::default(),
///     "Example",
///     "",
///     "The bridge will hold",
/// )
/// .unwrap();
///
/// manager
///     .add_claim(NewClaim::new("c1", "The steel is rated for the load")
///         .with_score(10.0)
///         .with_testability(Testability::Testable))
///     .unwrap();
/// let summary = manager
///     .add_implication(NewImplication::and("i1", &["c1"], "hypothesis"))
///     .unwrap();
///
/// assert_eq!(summary.claim_count, 2);
/// assert_eq!(manager.history().unwrap().len(), 2);
/// ```
pub struct HypergraphManager<B> {
    store: VersionedStore<B>,
    graph: Hypergraph,
    janitor: Janitor,
    config: EngineConfig,
}

impl<B> HypergraphManager<B>
where
    B: SnapshotStore<Error = StoreError>,
{
    /// Create and save a new document holding only the root claim
    pub fn create(
        backend: B,
        config: EngineConfig,
        name: impl Into<String>,
        description: impl Into<String>,
        hypothesis: impl Into<String>,
    ) -> Result<Self, ManagerError> {
        let (mut store, janitor, config) = Self::parts(backend, config)?;
        if store.load()?.is_some() {
            return Err(ManagerError::AlreadyInitialized);
        }

        let mut graph = Hypergraph::new(name, description, hypothesis);
        if let Some(root) = graph.claims.first_mut() {
            root.id = ClaimId::new(config.root_claim_id.clone());
        }
        store.save(&mut graph)?;
        info!(name = %graph.metadata.name, "Created document");

        Ok(Self {
            store,
            graph,
            janitor,
            config,
        })
    }

    /// Open the current document of a backend
    pub fn open(backend: B, config: EngineConfig) -> Result<Self, ManagerError> {
        let (store, janitor, config) = Self::parts(backend, config)?;
        let graph = store.load()?.ok_or(ManagerError::NoDocument)?;
        debug!(
            claims = graph.claims.len(),
            implications = graph.implications.len(),
            "Opened document"
        );

        Ok(Self {
            store,
            graph,
            janitor,
            config,
        })
    }

    fn parts(backend: B, config: EngineConfig) -> Result<(VersionedStore<B>, Janitor, EngineConfig), ManagerError> {
        config.validate()?;
        let config = config.resolved();
        let store = VersionedStore::with_gatekeeper(backend, Gatekeeper::new(config.validation.clone()));
        let janitor = Janitor::new(config.janitor.clone());
        Ok((store, janitor, config))
    }

    /// The current document
    pub fn graph(&self) -> &Hypergraph {
        &self.graph
    }

    /// Active configuration
    pub fn config(&self) -> &EngineConfig {
        &self.config
    }

    /// The versioned store
    pub fn store(&self) -> &VersionedStore<B> {
        &self.store
    }

    /// Counters of every prune pass run by this manager
    pub fn prune_metrics(&self) -> &PruneMetrics {
        self.janitor.metrics()
    }

    /// Run the validator on the current document
    pub fn validate(&self) -> ValidationReport {
        self.store.gatekeeper().validate(&self.graph)
    }

    /// Compute costs without touching the document
    pub fn costs(&self) -> (HashMap<ClaimId, ClaimCost>, CostReport) {
        compute_costs(&self.graph)
    }

    /// Overview of the current document
    pub fn summary(&self) -> SummaryView {
        let (errors, warnings) = match &self.graph.metadata.cached_validation {
            Some(cached) => (cached.errors.len(), cached.warnings.len()),
            None => {
                let report = self.validate();
                (report.errors.len(), report.warnings.len())
            }
        };
        SummaryView::build(&self.graph, &self.config.root_claim_id, errors, warnings)
    }

    /// History entries, oldest first
    pub fn history(&self) -> Result<Vec<SnapshotInfo>, ManagerError> {
        Ok(self.store.get_history()?)
    }

    /// Make a historical snapshot the current document
    pub fn restore(&mut self, id: &SnapshotId) -> Result<SummaryView, ManagerError> {
        let (graph, _) = self.store.restore(id)?;
        self.graph = graph;
        Ok(self.summary())
    }

    /// Save the current document as is, refreshing costs and validation
    pub fn save(&mut self) -> Result<SummaryView, ManagerError> {
        self.commit(self.graph.clone())
    }

    /// Add a claim
    pub fn add_claim(&mut self, new: NewClaim) -> Result<SummaryView, ManagerError> {
        if new.id.trim().is_empty() {
            return Err(ManagerError::InvalidInput("claim id must not be empty".to_string()));
        }
        if self.graph.contains_claim(&new.id) {
            return Err(ManagerError::DuplicateClaim(new.id));
        }
        check_text(&new.text)?;
        check_score(new.score)?;

        let id = new.id.clone();
        let mut next = self.graph.clone();
        next.claims.push(new.into_claim(Utc::now()));

        let summary = self.commit(next)?;
        info!(claim = %id, "Added claim");
        Ok(summary)
    }

    /// Change some fields of a claim
    ///
    /// A text change invalidates the entailment check of every implication
    /// the claim takes part in.
    pub fn update_claim(&mut self, id: &str, update: ClaimUpdate) -> Result<SummaryView, ManagerError> {
        if update.is_empty() {
            return Err(ManagerError::InvalidInput("nothing to update".to_string()));
        }
        if let Some(text) = &update.text {
            check_text(text)?;
        }
        if let Some(score) = update.score {
            check_score(score)?;
        }

        let mut next = self.graph.clone();
        let claim = next
            .claim_mut(id)
            .ok_or_else(|| ManagerError::UnknownClaim(id.to_string()))?;
        let text_changed = update.apply(claim);
        claim.modified_at = Some(Utc::now());
        let claim_id = claim.id.clone();

        if text_changed {
            for implication in next.implications.iter_mut().filter(|i| i.references(&claim_id)) {
                implication.reset_entailment();
                debug!(implication = %implication.id, "Reset entailment after text change");
            }
        }

        let summary = self.commit(next)?;
        info!(claim = %id, text_changed, "Updated claim");
        Ok(summary)
    }

    /// Delete a claim and repair the implications around it
    ///
    /// Implications concluding the claim are removed. The claim is dropped
    /// from other implications' premises, which resets their entailment
    /// check; any implication left without premises is removed too. The root
    /// claim can never be deleted.
    pub fn delete_claim(&mut self, id: &str) -> Result<SummaryView, ManagerError> {
        self.store.gatekeeper().ensure_deletable(id)?;
        if !self.graph.contains_claim(id) {
            return Err(ManagerError::UnknownClaim(id.to_string()));
        }

        let claim_id = ClaimId::from(id);
        let mut next = self.graph.clone();
        next.claims.retain(|c| c.id != claim_id);

        let before = next.implications.len();
        next.implications.retain(|i| i.conclusion != claim_id);
        for implication in next.implications.iter_mut() {
            if implication.premises.contains(&claim_id) {
                implication.premises.retain(|p| p != &claim_id);
                implication.reset_entailment();
            }
        }
        next.implications.retain(|i| !i.premises.is_empty());
        let removed_implications = before - next.implications.len();

        let summary = self.commit(next)?;
        info!(claim = %id, removed_implications, "Deleted claim");
        Ok(summary)
    }

    /// Add an implication
    pub fn add_implication(&mut self, new: NewImplication) -> Result<SummaryView, ManagerError> {
        if new.id.trim().is_empty() {
            return Err(ManagerError::InvalidInput("implication id must not be empty".to_string()));
        }
        if self.graph.implication(&new.id).is_some() {
            return Err(ManagerError::DuplicateImplication(new.id));
        }
        check_edge(&self.graph, &new.id, &new.premises, &new.conclusion)?;

        if self.graph.supporting_implication(new.conclusion.as_str()).is_some() {
            warn!(
                implication = %new.id,
                conclusion = %new.conclusion,
                "Conclusion already supported; the new implication will not contribute to its cost"
            );
        }

        let id = new.id.clone();
        let mut next = self.graph.clone();
        next.implications.push(new.into_implication());

        let summary = self.commit(next)?;
        info!(implication = %id, "Added implication");
        Ok(summary)
    }

    /// Change some fields of an implication
    pub fn update_implication(&mut self, id: &str, update: ImplicationUpdate) -> Result<SummaryView, ManagerError> {
        if update.is_empty() {
            return Err(ManagerError::InvalidInput("nothing to update".to_string()));
        }
        let current = self
            .graph
            .implication(id)
            .ok_or_else(|| ManagerError::UnknownImplication(id.to_string()))?;

        let premises = update.premises.unwrap_or_else(|| current.premises.clone());
        let conclusion = update.conclusion.unwrap_or_else(|| current.conclusion.clone());
        let implication_type = update.implication_type.unwrap_or(current.implication_type);
        let structural = premises != current.premises
            || conclusion != current.conclusion
            || implication_type != current.implication_type;

        if structural {
            let mut without = self.graph.clone();
            without.implications.retain(|i| i.id != id);
            check_edge(&without, id, &premises, &conclusion)?;
        }

        let mut next = self.graph.clone();
        let implication = next
            .implication_mut(id)
            .ok_or_else(|| ManagerError::UnknownImplication(id.to_string()))?;
        implication.premises = premises;
        implication.conclusion = conclusion;
        implication.implication_type = implication_type;
        if let Some(reasoning) = update.reasoning {
            implication.reasoning = reasoning;
        }
        if structural {
            implication.reset_entailment();
        }

        let summary = self.commit(next)?;
        info!(implication = %id, structural, "Updated implication");
        Ok(summary)
    }

    /// Delete an implication
    pub fn delete_implication(&mut self, id: &str) -> Result<SummaryView, ManagerError> {
        if self.graph.implication(id).is_none() {
            return Err(ManagerError::UnknownImplication(id.to_string()));
        }

        let mut next = self.graph.clone();
        next.implications.retain(|i| i.id != id);

        let summary = self.commit(next)?;
        info!(implication = %id, "Deleted implication");
        Ok(summary)
    }

    /// Remove claims that do not feed the root
    ///
    /// A dry run (or a janitor configured for dry runs) reports without
    /// saving. A pass that finds nothing to remove saves nothing either.
    pub fn prune(&mut self, dry_run: bool) -> Result<(PruneOutcome, SummaryView), ManagerError> {
        self.janitor.set_dry_run(dry_run || self.config.janitor.dry_run);
        let outcome = self.janitor.prune(&self.graph)?;

        if outcome.dry_run || outcome.is_noop() {
            return Ok((outcome, self.summary()));
        }

        let summary = self.commit(outcome.graph.clone())?;
        Ok((outcome, summary))
    }

    /// Ids of implications that need an entailment check
    pub fn stale_implications(&self) -> Vec<ImplicationId> {
        self.graph
            .stale_implications()
            .into_iter()
            .map(|i| i.id.clone())
            .collect()
    }

    /// Ask the oracle about one implication and record the verdict
    ///
    /// The oracle runs on the blocking pool under the configured timeout.
    /// Nothing is written unless it answers: on error or timeout the
    /// implication keeps its previous status and stays stale.
    pub async fn check_implication<O>(
        &mut self,
        id: &str,
        oracle: Arc<O>,
    ) -> Result<(EntailmentOutcome, SummaryView), ManagerError>
    where
        O: EntailmentOracle + Send + Sync + 'static,
        O::Error: Display + Send + 'static,
    {
        let outcome = self.consult(id, oracle).await?;
        let summary = self.record(id, &outcome)?;
        Ok((outcome, summary))
    }

    /// Check every stale implication, one at a time
    ///
    /// Oracle failures are collected per implication; a storage failure
    /// aborts the run.
    pub async fn check_stale_implications<O>(&mut self, oracle: Arc<O>) -> Result<StaleCheckReport, ManagerError>
    where
        O: EntailmentOracle + Send + Sync + 'static,
        O::Error: Display + Send + 'static,
    {
        let stale = self.stale_implications();
        info!(count = stale.len(), "Checking stale implications");

        let mut checked = Vec::new();
        let mut failures = Vec::new();
        for id in stale {
            match self.consult(id.as_str(), Arc::clone(&oracle)).await {
                Ok(outcome) => {
                    self.record(id.as_str(), &outcome)?;
                    checked.push((id, outcome.status));
                }
                Err(e) => {
                    warn!(implication = %id, "Entailment check failed: {}", e);
                    failures.push((id, e));
                }
            }
        }

        Ok(StaleCheckReport {
            checked,
            failures,
            summary: self.summary(),
        })
    }

    fn request_for(&self, id: &str) -> Result<EntailmentRequest, ManagerError> {
        let implication = self
            .graph
            .implication(id)
            .ok_or_else(|| ManagerError::UnknownImplication(id.to_string()))?;

        let premises = implication
            .distinct_premises()
            .into_iter()
            .map(|p| {
                self.graph
                    .claim(p.as_str())
                    .ok_or_else(|| ManagerError::UnknownClaim(p.to_string()))
            })
            .collect::<Result<Vec<_>, _>>()?;
        let conclusion = self
            .graph
            .claim(implication.conclusion.as_str())
            .ok_or_else(|| ManagerError::UnknownClaim(implication.conclusion.to_string()))?;

        Ok(EntailmentRequest::new(&premises, conclusion, implication.implication_type))
    }

    async fn consult<O>(&self, id: &str, oracle: Arc<O>) -> Result<EntailmentOutcome, ManagerError>
    where
        O: EntailmentOracle + Send + Sync + 'static,
        O::Error: Display + Send + 'static,
    {
        let request = self.request_for(id)?;
        let limit = self.config.oracle_timeout();
        debug!(implication = %id, timeout_secs = limit.as_secs(), "Consulting oracle");

        // Oracle calls are synchronous; keep them off the async workers
        let task_request = request.clone();
        let verdict = timeout(
            limit,
            tokio::task::spawn_blocking(move || {
                oracle
                    .check(&task_request)
                    .map_err(|e| ManagerError::Oracle(e.to_string()))
            }),
        )
        .await
        .map_err(|_| ManagerError::OracleTimeout(limit))?
        .map_err(|e| ManagerError::Oracle(format!("Task join error: {}", e)))??;

        Ok(EntailmentOutcome::interpret(&request, verdict))
    }

    fn record(&mut self, id: &str, outcome: &EntailmentOutcome) -> Result<SummaryView, ManagerError> {
        let mut next = self.graph.clone();
        let implication = next
            .implication_mut(id)
            .ok_or_else(|| ManagerError::UnknownImplication(id.to_string()))?;
        implication.entailment_status = outcome.status;
        implication.entailment_explanation = Some(outcome.explanation.clone());
        implication.last_checked = Some(Utc::now());

        let summary = self.commit(next)?;
        info!(implication = %id, status = outcome.status.as_str(), "Recorded entailment verdict");
        Ok(summary)
    }

    fn commit(&mut self, mut next: Hypergraph) -> Result<SummaryView, ManagerError> {
        self.store.save(&mut next)?;
        self.graph = next;
        Ok(self.summary())
    }
}

fn check_text(text: &str) -> Result<(), ManagerError> {
    if text.trim().is_empty() {
        return Err(ManagerError::InvalidInput("claim text must not be empty".to_string()));
    }
    Ok(())
}

fn check_score(score: Option<f64>) -> Result<(), ManagerError> {
    match score {
        Some(s) if !(0.0..=10.0).contains(&s) => Err(ManagerError::InvalidInput(format!(
            "score {} is outside [0, 10]",
            s
        ))),
        _ => Ok(()),
    }
}

/// Reject edges with no premises, dangling ids, self-premises or cycles
fn check_edge(graph: &Hypergraph, id: &str, premises: &[ClaimId], conclusion: &ClaimId) -> Result<(), ManagerError> {
    if premises.is_empty() {
        return Err(ManagerError::InvalidInput(format!(
            "implication {} needs at least one premise",
            id
        )));
    }
    for claim in premises.iter().chain(std::iter::once(conclusion)) {
        if !graph.contains_claim(claim.as_str()) {
            return Err(ManagerError::UnknownClaim(claim.to_string()));
        }
    }
    if premises.contains(conclusion) {
        return Err(ManagerError::InvalidInput(format!(
            "claim {} cannot be a premise of itself",
            conclusion
        )));
    }
    if graph.would_create_cycle(premises, conclusion) {
        return Err(ManagerError::WouldCreateCycle(id.to_string()));
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;
    use entail_domain::{EntailmentVerdict, EpistemicCost, Evidence, ImplicationType, Testability, ROOT_CLAIM_ID};
    use entail_gatekeeper::GatekeeperError;
    use entail_oracle::{MockOracle, OracleError};
    use entail_store::SqliteBackend;
    use std::time::Duration;

    fn manager() -> HypergraphManager<SqliteBackend> {
        HypergraphManager::create(
            SqliteBackend::in_memory().unwrap(),
            EngineConfig::default(),
            "test",
            "",
            "Root hypothesis",
        )
        .unwrap()
    }

    /// hypothesis <- AND(c1, c2)
    fn seeded() -> HypergraphManager<SqliteBackend> {
        let mut manager = manager();
        manager
            .add_claim(
                NewClaim::new("c1", "First premise")
                    .with_score(8.0)
                    .with_testability(Testability::Testable)
                    .with_evidence(Evidence::literature("paper", "p. 3")),
            )
            .unwrap();
        manager.add_claim(NewClaim::new("c2", "Second premise")).unwrap();
        manager
            .add_implication(NewImplication::and("i1", &["c1", "c2"], ROOT_CLAIM_ID))
            .unwrap();
        manager
    }

    #[test]
    fn test_create_rejects_existing_document() {
        let mut backend = SqliteBackend::in_memory().unwrap();
        backend.write_current(&Hypergraph::new("old", "", "root")).unwrap();

        let result = HypergraphManager::create(backend, EngineConfig::default(), "new", "", "root");
        assert!(matches!(result, Err(ManagerError::AlreadyInitialized)));
    }

    #[test]
    fn test_open_requires_document() {
        let result = HypergraphManager::open(SqliteBackend::in_memory().unwrap(), EngineConfig::default());
        assert!(matches!(result, Err(ManagerError::NoDocument)));
    }

    #[test]
    fn test_create_uses_configured_root() {
        let manager = HypergraphManager::create(
            SqliteBackend::in_memory().unwrap(),
            EngineConfig::default().with_root("thesis"),
            "n",
            "",
            "root",
        )
        .unwrap();

        assert!(manager.graph().contains_claim("thesis"));
        assert!(manager.summary().is_valid());
    }

    #[test]
    fn test_add_claim_rejections() {
        let mut manager = seeded();

        assert!(matches!(
            manager.add_claim(NewClaim::new("c1", "again")),
            Err(ManagerError::DuplicateClaim(_))
        ));
        assert!(matches!(
            manager.add_claim(NewClaim::new("c3", "  ")),
            Err(ManagerError::InvalidInput(_))
        ));
        assert!(matches!(
            manager.add_claim(NewClaim::new("c3", "text").with_score(11.0)),
            Err(ManagerError::InvalidInput(_))
        ));
        assert_eq!(manager.graph().claims.len(), 3);
    }

    #[test]
    fn test_every_edit_recomputes_costs() {
        let mut manager = seeded();
        assert_eq!(manager.graph().claim(ROOT_CLAIM_ID).unwrap().cost, None);

        let summary = manager
            .update_claim("c2", ClaimUpdate::new().score(9.0).testability(Testability::Testable))
            .unwrap();

        let root = summary.root.unwrap();
        let total = root.cost.total.unwrap().value();
        assert!((total - 0.474).abs() < 1e-3);
        assert!(summary.unevaluated_leaves.is_empty());
    }

    #[test]
    fn test_text_change_resets_entailment() {
        let mut manager = seeded();
        let mut graph = manager.graph().clone();
        let implication = graph.implication_mut("i1").unwrap();
        implication.entailment_status = EntailmentStatus::Passed;
        implication.last_checked = Some(Utc::now());
        manager.graph = graph;

        manager.update_claim("c1", ClaimUpdate::new().score(7.0)).unwrap();
        assert_eq!(manager.graph().implication("i1").unwrap().entailment_status, EntailmentStatus::Passed);

        manager.update_claim("c1", ClaimUpdate::new().text("Reworded premise")).unwrap();
        let implication = manager.graph().implication("i1").unwrap();
        assert_eq!(implication.entailment_status, EntailmentStatus::Unset);
        assert!(implication.last_checked.is_none());
    }

    #[test]
    fn test_update_claim_errors() {
        let mut manager = seeded();
        assert!(matches!(
            manager.update_claim("nope", ClaimUpdate::new().score(1.0)),
            Err(ManagerError::UnknownClaim(_))
        ));
        assert!(matches!(
            manager.update_claim("c1", ClaimUpdate::new()),
            Err(ManagerError::InvalidInput(_))
        ));
        assert!(matches!(
            manager.update_claim("c1", ClaimUpdate::new().text("")),
            Err(ManagerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_delete_root_is_rejected() {
        let mut manager = seeded();
        let history = manager.history().unwrap().len();

        let err = manager.delete_claim(ROOT_CLAIM_ID).unwrap_err();
        assert!(matches!(err, ManagerError::Gatekeeper(GatekeeperError::RootDeletion(_))));
        assert_eq!(manager.history().unwrap().len(), history);
    }

    #[test]
    fn test_delete_claim_cascades() {
        let mut manager = seeded();
        manager.add_claim(NewClaim::new("c3", "Sub premise")).unwrap();
        manager.add_implication(NewImplication::or("i2", &["c3"], "c2")).unwrap();

        // c3 is the only premise of i2: i2 goes; c3 leaves i1 untouched
        manager.delete_claim("c3").unwrap();
        assert!(manager.graph().implication("i2").is_none());
        assert!(manager.graph().implication("i1").is_some());

        // c2 is a premise of i1, which keeps c1
        manager.delete_claim("c2").unwrap();
        let i1 = manager.graph().implication("i1").unwrap();
        assert_eq!(i1.premises, vec![ClaimId::from("c1")]);
        assert_eq!(i1.entailment_status, EntailmentStatus::Unset);

        // c1 was the last premise: i1 goes too
        manager.delete_claim("c1").unwrap();
        assert!(manager.graph().implications.is_empty());
        assert_eq!(manager.graph().claims.len(), 1);
    }

    #[test]
    fn test_add_implication_rejections() {
        let mut manager = seeded();
        manager.add_claim(NewClaim::new("c3", "Third")).unwrap();

        let cases = [
            (NewImplication::and("i1", &["c3"], "c1"), "duplicate"),
            (NewImplication::and("i9", &[], "c1"), "empty"),
            (NewImplication::and("i9", &["ghost"], "c1"), "dangling premise"),
            (NewImplication::and("i9", &["c3"], "ghost"), "dangling conclusion"),
            (NewImplication::and("i9", &["c3", "c1"], "c1"), "self premise"),
            (NewImplication::and("i9", &[ROOT_CLAIM_ID], "c1"), "cycle"),
        ];
        for (new, label) in cases {
            assert!(manager.add_implication(new).is_err(), "{} accepted", label);
        }

        assert!(matches!(
            manager.add_implication(NewImplication::and("i9", &[ROOT_CLAIM_ID], "c1")),
            Err(ManagerError::WouldCreateCycle(_))
        ));
        assert_eq!(manager.graph().implications.len(), 1);
    }

    #[test]
    fn test_update_implication() {
        let mut manager = seeded();
        let mut graph = manager.graph().clone();
        graph.implication_mut("i1").unwrap().entailment_status = EntailmentStatus::Failed;
        manager.graph = graph;

        manager
            .update_implication("i1", ImplicationUpdate::new().reasoning("because"))
            .unwrap();
        let i1 = manager.graph().implication("i1").unwrap();
        assert_eq!(i1.reasoning, "because");
        assert_eq!(i1.entailment_status, EntailmentStatus::Failed);

        manager
            .update_implication("i1", ImplicationUpdate::new().implication_type(ImplicationType::Or))
            .unwrap();
        let i1 = manager.graph().implication("i1").unwrap();
        assert_eq!(i1.implication_type, ImplicationType::Or);
        assert_eq!(i1.entailment_status, EntailmentStatus::Unset);
        assert_eq!(manager.graph().claim(ROOT_CLAIM_ID).unwrap().cost.map(|c| c.is_infinite()), Some(false));
    }

    #[test]
    fn test_update_implication_rejects_cycle() {
        let mut manager = seeded();
        manager.add_claim(NewClaim::new("c3", "Third")).unwrap();
        manager.add_implication(NewImplication::and("i2", &["c3"], "c1")).unwrap();

        // Re-pointing i2 at the root would make the root its own premise
        let result = manager.update_implication("i2", ImplicationUpdate::new().premises(&[ROOT_CLAIM_ID]));
        assert!(matches!(result, Err(ManagerError::WouldCreateCycle(_))));

        // Rewriting an edge in place is not a cycle with itself
        manager
            .update_implication("i2", ImplicationUpdate::new().premises(&["c3", "c2"]))
            .unwrap();
    }

    #[test]
    fn test_delete_implication() {
        let mut manager = seeded();
        manager.delete_implication("i1").unwrap();
        assert!(manager.graph().implications.is_empty());
        assert!(matches!(
            manager.delete_implication("i1"),
            Err(ManagerError::UnknownImplication(_))
        ));
    }

    #[test]
    fn test_prune_dry_run_then_real() {
        let mut manager = seeded();
        manager.add_claim(NewClaim::new("orphan", "Unused")).unwrap();
        let history = manager.history().unwrap().len();

        let (preview, _) = manager.prune(true).unwrap();
        assert_eq!(preview.removed_claims, vec![ClaimId::from("orphan")]);
        assert!(manager.graph().contains_claim("orphan"));
        assert_eq!(manager.history().unwrap().len(), history);

        let (outcome, summary) = manager.prune(false).unwrap();
        assert!(!outcome.dry_run);
        assert!(!manager.graph().contains_claim("orphan"));
        assert_eq!(summary.claim_count, 3);
        assert_eq!(manager.history().unwrap().len(), history + 1);

        let (again, _) = manager.prune(false).unwrap();
        assert!(again.is_noop());
        assert_eq!(manager.history().unwrap().len(), history + 1);
        assert_eq!(manager.prune_metrics().dry_runs, 1);
    }

    #[test]
    fn test_stale_policy() {
        let mut manager = seeded();
        assert_eq!(manager.stale_implications(), vec![ImplicationId::from("i1")]);

        let mut graph = manager.graph().clone();
        graph.implication_mut("i1").unwrap().last_checked = Some(Utc::now());
        manager.graph = graph;
        assert!(manager.stale_implications().is_empty());

        manager.update_claim("c2", ClaimUpdate::new().reasoning("new notes")).unwrap();
        assert_eq!(manager.stale_implications(), vec![ImplicationId::from("i1")]);
    }

    #[tokio::test]
    async fn test_check_implication_records_verdict() {
        let mut manager = seeded();
        let oracle = Arc::new(MockOracle::accepting());

        let (outcome, summary) = manager.check_implication("i1", Arc::clone(&oracle)).await.unwrap();

        assert_eq!(outcome.status, EntailmentStatus::Passed);
        let i1 = manager.graph().implication("i1").unwrap();
        assert_eq!(i1.entailment_status, EntailmentStatus::Passed);
        assert!(i1.last_checked.is_some());
        assert!(summary.stale_implications.is_empty());

        let request = &oracle.requests()[0];
        assert_eq!(request.premises.len(), 2);
        assert_eq!(request.conclusion.text, "Root hypothesis");
    }

    #[tokio::test]
    async fn test_failed_check_makes_conclusion_infinite() {
        let mut manager = seeded();
        manager
            .update_claim("c2", ClaimUpdate::new().score(9.0).testability(Testability::Testable))
            .unwrap();
        let oracle = Arc::new(MockOracle::new(EntailmentVerdict {
            is_valid: true,
            explanation: "c2 adds nothing".to_string(),
            redundant_premises: vec![ClaimId::from("c2")],
            degenerate_premises: Vec::new(),
        }));

        let (outcome, _) = manager.check_implication("i1", oracle).await.unwrap();
        assert_eq!(outcome.status, EntailmentStatus::Failed);
        assert_eq!(
            manager.graph().claim(ROOT_CLAIM_ID).unwrap().cost,
            Some(EpistemicCost::Infinite)
        );
    }

    #[tokio::test]
    async fn test_oracle_failure_writes_nothing() {
        let mut manager = seeded();
        let before = manager.graph().clone();
        let history = manager.history().unwrap().len();
        let oracle = Arc::new(MockOracle::failing(OracleError::Communication("offline".to_string())));

        let err = manager.check_implication("i1", oracle).await.unwrap_err();
        assert!(err.is_recoverable());
        assert_eq!(manager.graph(), &before);
        assert_eq!(manager.history().unwrap().len(), history);
        assert_eq!(manager.stale_implications(), vec![ImplicationId::from("i1")]);
    }

    /// Oracle that never answers within the test timeout
    struct SlowOracle;

    impl EntailmentOracle for SlowOracle {
        type Error = OracleError;

        fn check(&self, _request: &EntailmentRequest) -> Result<EntailmentVerdict, OracleError> {
            std::thread::sleep(Duration::from_millis(1500));
            Ok(EntailmentVerdict::default())
        }
    }

    #[tokio::test]
    async fn test_oracle_timeout() {
        let mut config = EngineConfig::default();
        config.oracle_timeout_secs = 1;
        let mut manager =
            HypergraphManager::create(SqliteBackend::in_memory().unwrap(), config, "t", "", "root").unwrap();
        manager.add_claim(NewClaim::new("c1", "premise")).unwrap();
        manager
            .add_implication(NewImplication::and("i1", &["c1"], ROOT_CLAIM_ID))
            .unwrap();

        let err = manager.check_implication("i1", Arc::new(SlowOracle)).await.unwrap_err();
        assert!(matches!(err, ManagerError::OracleTimeout(_)));
        assert_eq!(manager.graph().implication("i1").unwrap().entailment_status, EntailmentStatus::Unset);
    }

    #[tokio::test]
    async fn test_check_unknown_implication() {
        let mut manager = seeded();
        let result = manager.check_implication("nope", Arc::new(MockOracle::default())).await;
        assert!(matches!(result, Err(ManagerError::UnknownImplication(_))));
    }

    #[tokio::test]
    async fn test_check_stale_collects_failures() {
        let mut manager = seeded();
        manager.add_claim(NewClaim::new("c3", "Sub premise")).unwrap();
        manager.add_implication(NewImplication::or("i2", &["c3"], "c2")).unwrap();

        let oracle = Arc::new(MockOracle::accepting());
        oracle.set_error("c2", OracleError::RateLimitExceeded);

        let report = manager.check_stale_implications(Arc::clone(&oracle)).await.unwrap();
        assert_eq!(report.checked, vec![(ImplicationId::from("i1"), EntailmentStatus::Passed)]);
        assert_eq!(report.failures.len(), 1);
        assert_eq!(report.failures[0].0, ImplicationId::from("i2"));
        assert_eq!(report.summary.stale_implications, vec![ImplicationId::from("i2")]);
        assert_eq!(oracle.call_count(), 2);
    }
}
