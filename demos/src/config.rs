//! Demo run configuration.
//!
//! Supports loading configuration from:
//! 1. A YAML file passed with `--config`
//! 2. Environment variables (with `QALG_` prefix)
//!
//! Configuration precedence (highest to lowest):
//! 1. Command-line flags
//! 2. Environment variables
//! 3. Configuration file
//! 4. Default values
//!
//! Example file:
//!
//! ```yaml
//! shots: 4096
//! seed: 7
//! simulator:
//!   max_qubits: 20
//!   norm_check: every_gate
//! ```

use std::path::Path;

use qalg_sim::SimConfig;
use serde::{Deserialize, Serialize};

/// Settings shared by the demo binaries.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct DemoConfig {
    /// Shots per run; each demo has its own default when unset.
    pub shots: Option<u32>,
    /// Sampler seed; fresh entropy when unset.
    pub seed: Option<u64>,
    /// Simulator tuning.
    pub simulator: SimConfig,
}

impl DemoConfig {
    /// Load configuration from a YAML file.
    pub fn from_file<P: AsRef<Path>>(path: P) -> Result<Self, ConfigError> {
        let contents = std::fs::read_to_string(path.as_ref())
            .map_err(|e| ConfigError::IoError(format!("{}: {e}", path.as_ref().display())))?;

        let config: DemoConfig = serde_yaml_ng::from_str(&contents)
            .map_err(|e| ConfigError::ParseError(e.to_string()))?;

        config.validate()?;
        Ok(config)
    }

    /// Load configuration with the following precedence:
    /// 1. Load from file if provided
    /// 2. Apply environment variable overrides
    pub fn load(config_file: Option<&Path>) -> Result<Self, ConfigError> {
        let config = if let Some(path) = config_file {
            Self::from_file(path)?
        } else {
            DemoConfig::default()
        };

        let config = config.merge_env()?;
        config.validate()?;
        Ok(config)
    }

    /// Merge environment variables into this configuration.
    ///
    /// Environment variables:
    /// - `QALG_SHOTS`
    /// - `QALG_SEED`
    /// - every `QALG_*` variable read by [`SimConfig::merge_env`]
    fn merge_env(mut self) -> Result<Self, ConfigError> {
        if let Ok(v) = std::env::var("QALG_SHOTS") {
            let shots = v
                .trim()
                .parse()
                .map_err(|e| ConfigError::ParseError(format!("QALG_SHOTS={v}: {e}")))?;
            self.shots = Some(shots);
        }
        if let Ok(v) = std::env::var("QALG_SEED") {
            let seed = v
                .trim()
                .parse()
                .map_err(|e| ConfigError::ParseError(format!("QALG_SEED={v}: {e}")))?;
            self.seed = Some(seed);
        }
        self.simulator = self
            .simulator
            .merge_env()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))?;
        Ok(self)
    }

    /// Validate configuration values.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.shots == Some(0) {
            return Err(ConfigError::ValidationError(
                "shots must be at least 1".to_string(),
            ));
        }
        self.simulator
            .validate()
            .map_err(|e| ConfigError::ValidationError(e.to_string()))
    }
}

/// Configuration errors.
#[derive(Debug, thiserror::Error)]
pub enum ConfigError {
    /// The config file could not be read.
    #[error("IO error: {0}")]
    IoError(String),

    /// The file is not valid YAML for [`DemoConfig`].
    #[error("Parse error: {0}")]
    ParseError(String),

    /// A value was read but is out of range.
    #[error("Validation error: {0}")]
    ValidationError(String),
}

#[cfg(test)]
mod tests {
    use super::*;
    use qalg_sim::NormCheck;

    #[test]
    fn test_default_config() {
        let config = DemoConfig::default();
        assert_eq!(config.shots, None);
        assert_eq!(config.seed, None);
        assert!(config.validate().is_ok());
    }

    #[test]
    fn test_parse_yaml() {
        let yaml = "shots: 4096\nseed: 7\nsimulator:\n  max_qubits: 20\n  norm_check: every_gate\n";
        let config: DemoConfig = serde_yaml_ng::from_str(yaml).unwrap();
        assert_eq!(config.shots, Some(4096));
        assert_eq!(config.seed, Some(7));
        assert_eq!(config.simulator.max_qubits, 20);
        assert_eq!(config.simulator.norm_check, NormCheck::EveryGate);
        assert_eq!(config.simulator.sample_chunk, SimConfig::default().sample_chunk);
    }

    #[test]
    fn test_validate_rejects_zero_shots() {
        let config = DemoConfig {
            shots: Some(0),
            ..DemoConfig::default()
        };
        assert!(matches!(
            config.validate(),
            Err(ConfigError::ValidationError(_))
        ));
    }

    #[test]
    fn test_missing_file() {
        let err = DemoConfig::from_file("/nonexistent/qalg.yaml").unwrap_err();
        assert!(matches!(err, ConfigError::IoError(_)));
    }
}
