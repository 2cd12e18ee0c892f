//! Init command implementation.

use crate::cli::InitArgs;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use entail_manager::HypergraphManager;
use entail_store::FileBackend;
use std::path::Path;

/// Execute the init command.
pub fn execute_init(args: InitArgs, dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    if args.hypothesis.trim().is_empty() {
        return Err(CliError::InvalidInput("Hypothesis text must not be empty".to_string()));
    }

    let backend = FileBackend::new(dir)?;
    let manager = HypergraphManager::create(
        backend,
        config.engine.clone(),
        args.name,
        args.description,
        args.hypothesis,
    )?;

    let summary = manager.summary();
    Ok([
        formatter.success(&format!("Created '{}' in {}", summary.name, dir.display())),
        formatter.format_summary(&summary)?,
    ]
    .join("\n"))
}
