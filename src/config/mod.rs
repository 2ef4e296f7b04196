//! Configuration for attribution runs.
//!
//! Configuration is loaded with precedence: overrides > Env vars > Config file > Defaults
//!
//! # Example config file (terralabel.toml)
//! ```toml
//! mode = "border"
//! workers = 4
//! partition_policy = "legacy-overlap"
//! parallel_border = false
//!
//! [assignment]
//! progress_interval = 1000
//! no_match = "N/A"
//! ```

mod defaults;

pub use defaults::*;

use crate::assignment::AssignmentSettings;
use crate::model::AssignmentMode;
use crate::partition::PartitionPolicy;
use figment::{
    providers::{Env, Format, Serialized, Toml},
    Figment,
};
use serde::{Deserialize, Serialize};
use std::path::Path;

/// Main configuration for an attribution run.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct AttributionConfig {
    /// How final labels are chosen
    pub mode: AssignmentMode,
    /// Resolution worker pool size
    pub workers: usize,
    /// Number of shards; one per worker when unset
    pub shard_count: Option<usize>,
    /// Shard boundary policy
    pub partition_policy: PartitionPolicy,
    /// Resolve border shards on the worker pool instead of sequentially
    pub parallel_border: bool,
    /// Assignment pass settings
    pub assignment: AssignmentConfig,
}

impl Default for AttributionConfig {
    fn default() -> Self {
        Self {
            mode: AssignmentMode::default(),
            workers: DEFAULT_WORKERS,
            shard_count: None,
            partition_policy: PartitionPolicy::default(),
            parallel_border: false,
            assignment: AssignmentConfig::default(),
        }
    }
}

impl AttributionConfig {
    /// Load configuration with precedence: overrides > Env > File > Defaults
    ///
    /// # Arguments
    /// * `config_path` - Optional path to TOML config file
    /// * `overrides` - Caller overrides to apply on top
    pub fn load(
        config_path: Option<&Path>,
        overrides: ConfigOverrides,
    ) -> Result<Self, ConfigError> {
        let mut figment = Figment::new().merge(Serialized::defaults(AttributionConfig::default()));

        // Layer 1: Config file (if provided)
        if let Some(path) = config_path {
            figment = figment.merge(Toml::file(path));
        }

        // Layer 2: Environment variables with TERRALABEL_ prefix
        figment = figment.merge(Env::prefixed(ENV_PREFIX).split("__"));

        // Layer 3: Caller overrides
        figment = figment.merge(Serialized::defaults(overrides));

        let config: AttributionConfig = figment.extract().map_err(ConfigError::from)?;
        config.validate()?;
        Ok(config)
    }

    /// Load from environment and optional config file only
    pub fn from_env(config_path: Option<&Path>) -> Result<Self, ConfigError> {
        Self::load(config_path, ConfigOverrides::default())
    }

    /// Shards used for one resolution pass
    pub fn effective_shard_count(&self) -> usize {
        self.shard_count.unwrap_or(self.workers)
    }

    /// Reject settings the driver cannot run with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workers == 0 || self.workers > MAX_WORKERS {
            return Err(ConfigError::new(format!(
                "workers must be between 1 and {}, got {}",
                MAX_WORKERS, self.workers
            )));
        }
        if self.shard_count == Some(0) {
            return Err(ConfigError::new("shard_count must be at least 1"));
        }
        Ok(())
    }

    pub fn assignment_settings(&self) -> AssignmentSettings {
        AssignmentSettings {
            progress_interval: self.assignment.progress_interval,
            no_match: self.assignment.no_match.clone(),
        }
    }
}

/// Assignment pass configuration.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct AssignmentConfig {
    /// Footprints between two progress log lines (0 disables)
    pub progress_interval: usize,
    /// Code written when a label has no reference entry
    pub no_match: String,
}

impl Default for AssignmentConfig {
    fn default() -> Self {
        Self {
            progress_interval: DEFAULT_PROGRESS_INTERVAL,
            no_match: DEFAULT_NO_MATCH.to_string(),
        }
    }
}

/// Overrides that take precedence over file and env config.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct ConfigOverrides {
    #[serde(skip_serializing_if = "Option::is_none")]
    pub mode: Option<AssignmentMode>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub workers: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub shard_count: Option<usize>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub partition_policy: Option<PartitionPolicy>,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub parallel_border: Option<bool>,
}

/// Configuration error.
#[derive(Debug)]
pub struct ConfigError {
    pub message: String,
}

impl ConfigError {
    fn new(message: impl Into<String>) -> Self {
        Self {
            message: message.into(),
        }
    }
}

impl std::fmt::Display for ConfigError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "configuration error: {}", self.message)
    }
}

impl std::error::Error for ConfigError {}

impl From<figment::Error> for ConfigError {
    fn from(e: figment::Error) -> Self {
        Self {
            message: e.to_string(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    #[test]
    fn test_default_config() {
        let config = AttributionConfig::default();
        assert_eq!(config.mode, AssignmentMode::Dominant);
        assert_eq!(config.workers, DEFAULT_WORKERS);
        assert_eq!(config.effective_shard_count(), 2);
        assert_eq!(config.partition_policy, PartitionPolicy::LegacyOverlap);
        assert!(!config.parallel_border);
        assert_eq!(config.assignment.progress_interval, 1000);
        assert_eq!(config.assignment.no_match, "N/A");
    }

    #[test]
    fn test_mode_serde() {
        let json = serde_json::to_string(&AssignmentMode::DominantWithOcean).unwrap();
        assert_eq!(json, "\"dominant-with-ocean\"");

        let policy: PartitionPolicy = serde_json::from_str("\"clean\"").unwrap();
        assert_eq!(policy, PartitionPolicy::Clean);
    }

    #[test]
    fn test_load_from_file_with_overrides() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(
            file,
            "mode = \"border\"\nworkers = 4\npartition_policy = \"clean\"\n\n[assignment]\nno_match = \"NONE\""
        )
        .unwrap();

        let overrides = ConfigOverrides {
            workers: Some(8),
            ..Default::default()
        };
        let config = AttributionConfig::load(Some(file.path()), overrides).unwrap();

        assert_eq!(config.mode, AssignmentMode::Border);
        assert_eq!(config.workers, 8);
        assert_eq!(config.effective_shard_count(), 8);
        assert_eq!(config.partition_policy, PartitionPolicy::Clean);
        assert_eq!(config.assignment.no_match, "NONE");
        assert_eq!(config.assignment.progress_interval, 1000);
    }

    #[test]
    fn test_zero_workers_rejected() {
        let overrides = ConfigOverrides {
            workers: Some(0),
            ..Default::default()
        };
        let err = AttributionConfig::load(None, overrides).unwrap_err();
        assert!(err.to_string().contains("workers"));
    }

    #[test]
    fn test_zero_shard_count_rejected() {
        let config = AttributionConfig {
            shard_count: Some(0),
            ..Default::default()
        };
        assert!(config.validate().is_err());
    }
}
