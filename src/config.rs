use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;

/// Construction-time settings of an [`AxiLiteMaster`](crate::master::AxiLiteMaster).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct DriverConfig {
    /// Stepping stops once simulated time reaches this value.
    pub max_time_ns: u64,
    /// Time added per clock step. 5 ns is half a period at 100 MHz.
    pub half_period_ns: u64,
    /// Steps waited on a handshake before a stall diagnostic is emitted.
    pub stall_threshold: u32,
    /// Steps spent with reset asserted, and again after releasing it.
    pub reset_steps: u32,
}

impl Default for DriverConfig {
    fn default() -> Self {
        Self {
            max_time_ns: 50_000_000,
            half_period_ns: 5,
            stall_threshold: 10_000,
            reset_steps: 10,
        }
    }
}

impl DriverConfig {
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let config: Self = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn from_json_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json_str(&json)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.half_period_ns == 0 {
            return Err(ConfigError::Invalid("half_period_ns must be non-zero".into()));
        }
        if self.stall_threshold == 0 {
            return Err(ConfigError::Invalid("stall_threshold must be non-zero".into()));
        }
        Ok(())
    }

    /// Time consumed by the reset sequence run at construction.
    pub fn reset_time_ns(&self) -> u64 {
        2 * u64::from(self.reset_steps) * self.half_period_ns
    }
}
