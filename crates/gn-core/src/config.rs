//! Estimator configuration
//!
//! Settings can be serialized to and loaded from RON files.

use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::constants::{DEFAULT_MIN_PARALLEL_VERTICES, DEGENERATE_NORMAL_EPSILON};

/// Grid normal estimator configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct EstimatorConfig {
    /// Cross product magnitude at or below which the normal is zeroed
    pub degenerate_epsilon: f32,
    /// Whether large grids are processed on the rayon thread pool
    pub parallel: bool,
    /// Grids with fewer vertices than this run sequentially
    pub min_parallel_vertices: usize,
}

impl Default for EstimatorConfig {
    fn default() -> Self {
        Self {
            degenerate_epsilon: DEGENERATE_NORMAL_EPSILON,
            parallel: true,
            min_parallel_vertices: DEFAULT_MIN_PARALLEL_VERTICES,
        }
    }
}

impl EstimatorConfig {
    /// Create a configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Configuration that never leaves the calling thread
    pub fn sequential() -> Self {
        Self {
            parallel: false,
            ..Self::default()
        }
    }

    /// Reject values the kernel cannot use
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.degenerate_epsilon.is_finite() || self.degenerate_epsilon < 0.0 {
            return Err(ConfigError::Invalid(format!(
                "degenerate_epsilon must be finite and non-negative, got {}",
                self.degenerate_epsilon
            )));
        }
        Ok(())
    }

    /// Parse a configuration from RON text
    pub fn from_ron_str(content: &str) -> Result<Self, ConfigError> {
        let config: EstimatorConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }

    /// Load configuration from a file
    pub fn load(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let content =
            std::fs::read_to_string(path.as_ref()).map_err(|e| ConfigError::Io(e.to_string()))?;
        Self::from_ron_str(&content)
    }

    /// Save configuration to a file
    pub fn save(&self, path: impl AsRef<Path>) -> Result<(), ConfigError> {
        let content = self.to_ron_string()?;
        std::fs::write(path.as_ref(), content).map_err(|e| ConfigError::Io(e.to_string()))
    }
}

/// Configuration errors
#[derive(Debug, Clone, thiserror::Error)]
pub enum ConfigError {
    #[error("IO error: {0}")]
    Io(String),
    #[error("Serialization error: {0}")]
    Serialize(String),
    #[error("Deserialization error: {0}")]
    Deserialize(String),
    #[error("Invalid configuration: {0}")]
    Invalid(String),
}
