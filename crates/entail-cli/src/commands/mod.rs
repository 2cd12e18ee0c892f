//! Command implementations.

pub mod costs;
pub mod history;
pub mod init;
pub mod prune;
pub mod summary;
pub mod validate;

pub use self::costs::execute_costs;
pub use self::history::{execute_history, execute_restore};
pub use self::init::execute_init;
pub use self::prune::execute_prune;
pub use self::summary::{execute_stale, execute_summary};
pub use self::validate::execute_validate;

use crate::config::Config;
use crate::error::{CliError, Result};
use entail_manager::{HypergraphManager, ManagerError};
use entail_store::FileBackend;
use std::path::Path;

/// Open the document kept in `dir`.
pub(crate) fn open_manager(dir: &Path, config: &Config) -> Result<HypergraphManager<FileBackend>> {
    let backend = FileBackend::new(dir)?;
    HypergraphManager::open(backend, config.engine.clone()).map_err(|e| match e {
        ManagerError::NoDocument => CliError::NotInitialized(dir.display().to_string()),
        other => CliError::Manager(other),
    })
}
