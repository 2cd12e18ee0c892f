//! Costs command implementation.

use crate::commands::open_manager;
use crate::config::Config;
use crate::error::Result;
use crate::output::Formatter;
use std::path::Path;

/// Execute the costs command.
pub fn execute_costs(dir: &Path, config: &Config, formatter: &Formatter) -> Result<String> {
    let manager = open_manager(dir, config)?;
    let (costs, report) = manager.costs();
    formatter.format_costs(manager.graph(), &costs, &report)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::config::OutputFormat;
    use entail_manager::{HypergraphManager, NewClaim, NewImplication};
    use entail_store::FileBackend;
    use tempfile::TempDir;

    #[test]
    fn test_costs_of_worked_example() {
        let dir = TempDir::new().unwrap();
        let config = Config::default();
        let mut manager = HypergraphManager::create(
            FileBackend::new(dir.path()).unwrap(),
            config.engine.clone(),
            "Study",
            "",
            "It holds",
        )
        .unwrap();
        manager.add_claim(NewClaim::new("c1", "Scored").with_score(8.0)).unwrap();
        manager.add_claim(NewClaim::new("c2", "Open")).unwrap();
        manager
            .add_implication(NewImplication::and("i1", &["c1", "c2"], &config.engine.root_claim_id))
            .unwrap();

        let formatter = Formatter::new(OutputFormat::Json, false);
        let output = execute_costs(dir.path(), &config, &formatter).unwrap();
        let value: serde_json::Value = serde_json::from_str(&output).unwrap();

        assert_eq!(value["evaluated"], 1);
        assert!(value["claims"][0]["cost"]["total"].is_null());
    }
}
