//! GPU dispatch configuration
//!
//! Settings can be serialized to and loaded from RON files.

use serde::{Deserialize, Serialize};

use gn_core::ConfigError;
use gn_core::constants::{DEFAULT_WORKGROUP_SIZE, DEGENERATE_NORMAL_EPSILON};

/// Adapter power preference
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub enum PowerPreference {
    /// Let the backend decide
    #[default]
    None,
    /// Prefer integrated / low-power adapters
    LowPower,
    /// Prefer discrete / high-performance adapters
    HighPerformance,
}

impl From<PowerPreference> for wgpu::PowerPreference {
    fn from(preference: PowerPreference) -> Self {
        match preference {
            PowerPreference::None => wgpu::PowerPreference::None,
            PowerPreference::LowPower => wgpu::PowerPreference::LowPower,
            PowerPreference::HighPerformance => wgpu::PowerPreference::HighPerformance,
        }
    }
}

/// Complete GPU configuration
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(default)]
pub struct GpuConfig {
    /// Compute workgroup size along x and y
    pub workgroup_size: [u32; 2],
    /// Cross product magnitude at or below which the normal is zeroed
    pub degenerate_epsilon: f32,
    /// Adapter power preference
    pub power_preference: PowerPreference,
    /// Request a software fallback adapter
    pub force_fallback_adapter: bool,
}

impl Default for GpuConfig {
    fn default() -> Self {
        Self {
            workgroup_size: DEFAULT_WORKGROUP_SIZE,
            degenerate_epsilon: DEGENERATE_NORMAL_EPSILON,
            power_preference: PowerPreference::default(),
            force_fallback_adapter: false,
        }
    }
}

impl GpuConfig {
    /// Create a new configuration with default values
    pub fn new() -> Self {
        Self::default()
    }

    /// Reject values the shader cannot be built with
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.workgroup_size.contains(&0) {
            return Err(ConfigError::Invalid(
                "workgroup_size must be non-zero on both axes".into(),
            ));
        }
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
        let config: GpuConfig =
            ron::from_str(content).map_err(|e| ConfigError::Deserialize(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize the configuration to pretty RON text
    pub fn to_ron_string(&self) -> Result<String, ConfigError> {
        ron::ser::to_string_pretty(self, ron::ser::PrettyConfig::default())
            .map_err(|e| ConfigError::Serialize(e.to_string()))
    }
}
