//! Engine configuration

use crate::ManagerError;
use entail_domain::ROOT_CLAIM_ID;
use entail_gatekeeper::ValidationConfig;
use entail_janitor::JanitorConfig;
use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Configuration for the whole engine
///
/// The top-level `root_claim_id` wins over the copies inside the validation
/// and janitor sections; see [`EngineConfig::resolved`].
///
/// # Examples
///
/// ```
/// use entail_manager::EngineConfig;
///
/// let config = EngineConfig::from_toml(r#"
/// oracle_timeout_secs = 30
///
/// [validation]
/// warn_unreachable_claims = true
/// "#).unwrap();
///
/// assert_eq!(config.oracle_timeout_secs, 30);
/// assert_eq!(config.root_claim_id, "hypothesis");
/// assert!(config.validation.warn_unreachable_claims);
/// ```
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct EngineConfig {
    /// Id of the root claim
    pub root_claim_id: String,

    /// Maximum time for a single oracle call (seconds)
    pub oracle_timeout_secs: u64,

    /// Validator settings
    pub validation: ValidationConfig,

    /// Pruner settings
    pub janitor: JanitorConfig,
}

impl Default for EngineConfig {
    fn default() -> Self {
        Self {
            root_claim_id: ROOT_CLAIM_ID.to_string(),
            oracle_timeout_secs: 120,
            validation: ValidationConfig::default(),
            janitor: JanitorConfig::default(),
        }
    }
}

impl EngineConfig {
    /// Get the oracle timeout as a Duration
    pub fn oracle_timeout(&self) -> Duration {
        Duration::from_secs(self.oracle_timeout_secs)
    }

    /// Strict preset: every validation warning enabled
    pub fn strict() -> Self {
        Self {
            validation: ValidationConfig::strict(),
            ..Self::default()
        }
    }

    /// Use a different root claim id everywhere
    pub fn with_root(mut self, root_claim_id: impl Into<String>) -> Self {
        self.root_claim_id = root_claim_id.into();
        self.resolved()
    }

    /// Copy the top-level root id into the nested sections
    pub fn resolved(mut self) -> Self {
        self.validation.root_claim_id = self.root_claim_id.clone();
        self.janitor.root_claim_id = self.root_claim_id.clone();
        self
    }

    /// Validate the configuration
    pub fn validate(&self) -> Result<(), ManagerError> {
        if self.root_claim_id.trim().is_empty() {
            return Err(ManagerError::Config("root_claim_id must not be empty".to_string()));
        }
        if self.oracle_timeout_secs == 0 {
            return Err(ManagerError::Config(
                "oracle_timeout_secs must be greater than 0".to_string(),
            ));
        }
        Ok(())
    }

    /// Load configuration from TOML string
    pub fn from_toml(toml_str: &str) -> Result<Self, ManagerError> {
        let config: Self = toml::from_str(toml_str)
            .map_err(|e| ManagerError::Config(format!("Failed to parse TOML: {}", e)))?;
        config.validate()?;
        Ok(config.resolved())
    }

    /// Serialize configuration to TOML string
    pub fn to_toml(&self) -> Result<String, ManagerError> {
        toml::to_string_pretty(self)
            .map_err(|e| ManagerError::Config(format!("Failed to serialize TOML: {}", e)))
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_defaults() {
        let config = EngineConfig::default();
        assert_eq!(config.root_claim_id, "hypothesis");
        assert_eq!(config.oracle_timeout(), Duration::from_secs(120));
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_toml_roundtrip() {
        let config = EngineConfig::strict().with_root("thesis");
        let toml_str = config.to_toml().unwrap();
        let parsed = EngineConfig::from_toml(&toml_str).unwrap();
        assert_eq!(parsed, config);
    }

    #[test]
    fn test_empty_toml_is_default() {
        assert_eq!(EngineConfig::from_toml("").unwrap(), EngineConfig::default());
    }

    #[test]
    fn test_top_level_root_wins() {
        let config = EngineConfig::from_toml(
            r#"
            root_claim_id = "goal"

            [janitor]
            root_claim_id = "other"
            "#,
        )
        .unwrap();

        assert_eq!(config.validation.root_claim_id, "goal");
        assert_eq!(config.janitor.root_claim_id, "goal");
    }

    #[test]
    fn test_rejects_zero_timeout() {
        let result = EngineConfig::from_toml("oracle_timeout_secs = 0");
        assert!(matches!(result, Err(ManagerError::Config(_))));
    }

    #[test]
    fn test_rejects_malformed_toml() {
        let result = EngineConfig::from_toml("oracle_timeout_secs = \"soon\"");
        assert!(matches!(result, Err(ManagerError::Config(_))));
    }
}
