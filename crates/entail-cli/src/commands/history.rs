//! History and restore command implementations.

use crate::cli::RestoreArgs;
use crate::commands::open_manager;
use crate::config::Config;
use crate::error::{CliError, Result};
use crate::output::Formatter;
use entail_domain::SnapshotId;
use std::path::Path;

/// Execute the history command.
pub fn execute_history(dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    let manager = open_manager(dir, config)?;
    formatter.format_history(&manager.history()?)
}

/// Execute the restore command.
pub fn execute_restore(args: RestoreArgs, dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    let id = args.id.trim();
    if id.is_empty() {
        return Err(CliError::InvalidInput("Snapshot id must not be empty".to_string()));
    }

    let mut manager = open_manager(dir, config)?;
    let summary = manager.restore(&SnapshotId::from(id))?;
    Ok([
        formatter.success(&format!("Restored snapshot {}", id)),
        formatter.format_summary(&summary)?,
    ]
    .join("\n"))
}
