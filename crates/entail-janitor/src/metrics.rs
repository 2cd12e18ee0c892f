//! Metrics collection for Janitor operations

/// Metrics collected across prune passes
#[derive(Debug, Clone, Default, PartialEq)]
pub struct PruneMetrics {
    /// Claims removed (or that would be, in dry-run mode)
    pub claims_removed: usize,

    /// Implications removed alongside their conclusions
    pub implications_removed: usize,

    /// Claims kept on the last pass
    pub claims_kept: usize,

    /// Prune passes completed
    pub prune_count: usize,

    /// Passes that ran in dry-run mode
    pub dry_runs: usize,
}

impl PruneMetrics {
    /// Create new empty metrics
    pub fn new() -> Self {
        Self::default()
    }

    /// Record one completed pass
    pub fn record_pass(
        &mut self,
        claims_removed: usize,
        implications_removed: usize,
        claims_kept: usize,
        dry_run: bool,
    ) {
        self.claims_removed += claims_removed;
        self.implications_removed += implications_removed;
        self.claims_kept = claims_kept;
        self.prune_count += 1;
        if dry_run {
            self.dry_runs += 1;
        }
    }

    /// Reset all metrics
    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Generate a summary report of metrics
    pub fn summary(&self) -> String {
        [
            "Janitor Metrics Summary".to_string(),
            "======================".to_string(),
            format!("Prune passes: {} ({} dry run)", self.prune_count, self.dry_runs),
            format!("Claims removed: {}", self.claims_removed),
            format!("Implications removed: {}", self.implications_removed),
            format!("Claims kept (last pass): {}", self.claims_kept),
        ]
        .join("\n")
    }
}
