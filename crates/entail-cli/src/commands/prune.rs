//! Prune command implementation.

use crate::cli::PruneArgs;
use crate::commands::open_manager;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the prune command.
pub fn execute_prune(args: PruneArgs, dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    let mut manager = open_manager(dir, config)?;
    let (outcome, _) = manager.prune(args.dry_run)?;
    formatter.format_prune(&outcome)
}
