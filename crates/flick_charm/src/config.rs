//! Engine configuration
//!
//! ```toml
//! tick_interval_ms = 20
//! max_speed = 64
//! deceleration = 1
//! ```

use std::time::Duration;

use serde::{Deserialize, Serialize};

use crate::error::{FlickError, Result};

/// Timing and physics knobs for [`FlickCharm`](crate::FlickCharm)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Deserialize, Serialize)]
pub struct FlickConfig {
    /// Timer cadence in milliseconds
    #[serde(default = "default_tick_interval_ms")]
    pub tick_interval_ms: u64,
    /// Per-axis velocity clamp, in device units per tick
    #[serde(default = "default_max_speed")]
    pub max_speed: i32,
    /// Per-tick step toward zero while auto-scrolling
    #[serde(default = "default_deceleration")]
    pub deceleration: i32,
}

fn default_tick_interval_ms() -> u64 {
    20
}

fn default_max_speed() -> i32 {
    64
}

fn default_deceleration() -> i32 {
    1
}

impl Default for FlickConfig {
    fn default() -> Self {
        Self {
            tick_interval_ms: default_tick_interval_ms(),
            max_speed: default_max_speed(),
            deceleration: default_deceleration(),
        }
    }
}

impl FlickConfig {
    /// Timer cadence as a duration
    pub fn tick_interval(&self) -> Duration {
        Duration::from_millis(self.tick_interval_ms)
    }

    /// Reject values the engine cannot run with
    pub fn validate(&self) -> Result<()> {
        if self.tick_interval_ms == 0 {
            return Err(FlickError::Config(
                "tick_interval_ms must be greater than zero".to_string(),
            ));
        }
        if self.max_speed <= 0 {
            return Err(FlickError::Config(format!(
                "max_speed must be positive, got {}",
                self.max_speed
            )));
        }
        if self.deceleration <= 0 {
            return Err(FlickError::Config(format!(
                "deceleration must be positive, got {}",
                self.deceleration
            )));
        }
        Ok(())
    }

    /// Parse and validate a TOML document
    pub fn from_toml_str(content: &str) -> Result<Self> {
        let config: FlickConfig =
            toml::from_str(content).map_err(|e| FlickError::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Serialize to TOML string
    pub fn to_toml(&self) -> Result<String> {
        toml::to_string_pretty(self).map_err(|e| FlickError::Config(e.to_string()))
    }
}
