//! Configuration for Janitor operations

use entail_domain::ROOT_CLAIM_ID;
use serde::{Deserialize, Serialize};

/// Configuration for the Janitor
///
/// # Examples
///
/// ```
/// use entail_janitor::JanitorConfig;
///
/// let config = JanitorConfig::default();
/// assert_eq!(config.root_claim_id, "hypothesis");
/// assert!(!config.dry_run);
///
/// let preview = JanitorConfig::preview();
/// assert!(preview.dry_run);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct JanitorConfig {
    /// Claim the reachability search starts from
    #[serde(default = "default_root")]
    pub root_claim_id: String,

    /// Dry-run mode: report what would be removed without removing it
    /// Default: false
    #[serde(default)]
    pub dry_run: bool,
}

fn default_root() -> String {
    ROOT_CLAIM_ID.to_string()
}

impl Default for JanitorConfig {
    fn default() -> Self {
        Self {
            root_claim_id: default_root(),
            dry_run: false,
        }
    }
}

impl JanitorConfig {
    /// Dry-run configuration: compute removals, change nothing
    pub fn preview() -> Self {
        Self {
            dry_run: true,
            ..Self::default()
        }
    }

    /// Use a different root claim id
    pub fn with_root(mut self, root_claim_id: impl Into<String>) -> Self {
        self.root_claim_id = root_claim_id.into();
        self
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = JanitorConfig::default();
        assert_eq!(config.root_claim_id, "hypothesis");
        assert!(!config.dry_run);
    }

    #[test]
    fn test_preview_config() {
        let config = JanitorConfig::preview().with_root("goal");
        assert!(config.dry_run);
        assert_eq!(config.root_claim_id, "goal");
    }

    #[test]
    fn test_serde_roundtrip() {
        let config = JanitorConfig::preview();
        let serialized = serde_json::to_string(&config).unwrap();
        let deserialized: JanitorConfig = serde_json::from_str(&serialized).unwrap();
        assert_eq!(config, deserialized);

        let partial: JanitorConfig = serde_json::from_str("{}").unwrap();
        assert_eq!(partial, JanitorConfig::default());
    }
}
