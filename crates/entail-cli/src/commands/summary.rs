//! Summary and stale command implementations.

use crate::commands::open_manager;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the summary command.
pub fn execute_summary(dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    let manager = open_manager(dir, config)?;
    formatter.format_summary(&manager.summary())
}

/// Execute the stale command.
pub fn execute_stale(dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    let manager = open_manager(dir, config)?;
    formatter.format_stale(manager.graph(), &manager.stale_implications())
}
