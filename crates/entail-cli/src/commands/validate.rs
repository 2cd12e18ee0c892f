//! Validate command implementation.

use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use entail_gatekeeper::Gatekeeper;
use entail_store::FileBackend;
use serde_json::Value;
use std::fs;
use std::path::Path;
use tracing::debug;

/// Execute the validate command.
///
/// Reads `hypergraph.json` as raw JSON so schema problems are reported
/// even when the document would not load.
pub fn execute_validate(dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    let path = FileBackend::new(dir)?.current_path();
    if !path.exists() {
        return Err(CliError::NotInitialized(dir.display().to_string()));
    }

    let contents = fs::read_to_string(&path)?;
    let document: Value = serde_json::from_str(&contents)?;
    let report = Gatekeeper::new(config.engine.validation.clone()).validate_value(&document);
    debug!(
        errors = report.errors.len(),
        warnings = report.warnings.len(),
        "Validated {}",
        path.display()
    );

    formatter.format_validation(&report)
}
