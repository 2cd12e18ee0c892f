//! Versioned store: save with history, list history, restore

use crate::StoreError;
use chrono::Utc;
use entail_domain::{update_costs, CostReport, Hypergraph, SnapshotId, SnapshotInfo, SnapshotStore};
use entail_gatekeeper::{Gatekeeper, ValidationReport};
use tracing::{info, warn};

/// What a save did
#[derive(Debug, Clone)]
pub struct SaveReceipt {
    /// The pre-save state appended to history, if there was one
    pub snapshot: Option<SnapshotInfo>,
    /// Validator output embedded in the saved document
    pub validation: ValidationReport,
    /// Cost propagation diagnostics
    pub costs: CostReport,
}

/// Append-only versioned persistence over any [`SnapshotStore`]
///
/// # Examples
///
/// ```
/// use entail_domain::Hypergraph;
/// use entail_store::{SqliteBackend, VersionedStore};
///
/// let mut store = VersionedStore::new(SqliteBackend::in_memory().unwrap());
/// let mut graph = Hypergraph::new("Example", "", "The hypothesis");
///
/// store.save(&mut graph).unwrap();
/// graph.metadata.description = "edited".to_string();
/// store.save(&mut graph).unwrap();
///
/// assert_eq!(store.get_history().unwrap().len(), 1);
/// ```
pub struct VersionedStore<B> {
    backend: B,
    gatekeeper: Gatekeeper,
}

impl<B> VersionedStore<B>
where
    B: SnapshotStore<Error = StoreError>,
{
    /// Wrap a backend, validating with the default configuration
    pub fn new(backend: B) -> Self {
        Self::with_gatekeeper(backend, Gatekeeper::default_config())
    }

    /// Wrap a backend with a specific validator
    pub fn with_gatekeeper(backend: B, gatekeeper: Gatekeeper) -> Self {
        Self { backend, gatekeeper }
    }

    /// The underlying backend
    pub fn backend(&self) -> &B {
        &self.backend
    }

    /// The validator run on every save
    pub fn gatekeeper(&self) -> &Gatekeeper {
        &self.gatekeeper
    }

    /// Load the current document
    pub fn load(&self) -> Result<Option<Hypergraph>, StoreError> {
        self.backend.load_current()
    }

    /// Persist a document
    ///
    /// In order: recompute costs, stamp `last_updated`, embed the validator
    /// result, append the state being replaced to history, write. The
    /// document is updated in place so the caller sees exactly what was
    /// written. Validation problems never block a save.
    pub fn save(&mut self, graph: &mut Hypergraph) -> Result<SaveReceipt, StoreError> {
        let now = Utc::now();

        let costs = update_costs(graph);
        if costs.has_cycles() {
            warn!(cycles = costs.cycles.len(), "Saving document with cyclic implications");
        }

        graph.metadata.last_updated = now;
        let validation = self.gatekeeper.validate(graph);
        graph.metadata.cached_validation = Some(validation.to_cached(now));

        let snapshot = match self.backend.load_current()? {
            Some(previous) => Some(self.backend.append_snapshot(&previous, now)?),
            None => None,
        };

        self.backend.write_current(graph)?;

        info!(
            snapshot = snapshot.as_ref().map(|s| s.id.as_str()).unwrap_or("none"),
            errors = validation.errors.len(),
            warnings = validation.warnings.len(),
            "Saved document"
        );

        Ok(SaveReceipt {
            snapshot,
            validation,
            costs,
        })
    }

    /// History entries, oldest first
    pub fn get_history(&self) -> Result<Vec<SnapshotInfo>, StoreError> {
        self.backend.list_snapshots()
    }

    /// Read one history entry
    pub fn read_snapshot(&self, id: &SnapshotId) -> Result<Hypergraph, StoreError> {
        self.backend
            .read_snapshot(id)?
            .ok_or_else(|| StoreError::NotFound(id.to_string()))
    }

    /// Make a historical snapshot the current document
    ///
    /// Restoring is itself a save: the state being replaced is appended to
    /// history, so history only ever grows.
    pub fn restore(&mut self, id: &SnapshotId) -> Result<(Hypergraph, SaveReceipt), StoreError> {
        let mut graph = self.read_snapshot(id)?;
        let receipt = self.save(&mut graph)?;
        info!(snapshot = %id, "Restored snapshot");
        Ok((graph, receipt))
    }
}
