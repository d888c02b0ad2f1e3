//! Configuration Management

use serde::{Deserialize, Serialize};
use std::path::Path;

use crate::segment::merge::MinDurations;

/// Segmentation engine configuration
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SegmenterConfig {
    /// Trailing rolling-mean window (frames) applied before heuristic scoring
    pub rolling_window: usize,
    /// Collapse flicker segments shorter than this (seconds)
    pub flicker_max_s: f64,
    /// Uniform multiplier on all transition penalties
    pub penalty_scale: f64,
    /// Per-phase duration floors
    #[serde(default)]
    pub min_durations: MinDurations,
}

impl Default for SegmenterConfig {
    fn default() -> Self {
        Self {
            rolling_window: 7,
            flicker_max_s: 0.8,
            penalty_scale: 1.0,
            min_durations: MinDurations::default(),
        }
    }
}

impl SegmenterConfig {
    /// Validate config values are within acceptable ranges.
    /// Returns Ok(()) if valid, or Err with a description of the first invalid field.
    pub fn validate(&self) -> Result<(), crate::Error> {
        if self.rolling_window == 0 {
            return Err(crate::Error::Config(
                "rolling_window must be >= 1".to_string(),
            ));
        }
        if !self.flicker_max_s.is_finite() || self.flicker_max_s < 0.0 {
            return Err(crate::Error::Config(format!(
                "flicker_max_s must be >= 0, got {}",
                self.flicker_max_s
            )));
        }
        if !self.penalty_scale.is_finite() || self.penalty_scale <= 0.0 {
            return Err(crate::Error::Config(format!(
                "penalty_scale must be > 0, got {}",
                self.penalty_scale
            )));
        }
        let floors = [
            ("explore_s", self.min_durations.explore_s),
            ("pursue_s", self.min_durations.pursue_s),
            ("execute_s", self.min_durations.execute_s),
            ("outcome_s", self.min_durations.outcome_s),
        ];
        for (name, value) in floors {
            if !value.is_finite() || value < 0.0 {
                return Err(crate::Error::Config(format!(
                    "min_durations.{} must be >= 0, got {}",
                    name, value
                )));
            }
        }
        Ok(())
    }

    /// Load config from a TOML file
    pub fn load(path: &Path) -> Result<Self, crate::Error> {
        let content = std::fs::read_to_string(path)?;
        let config: Self =
            toml::from_str(&content).map_err(|e| crate::Error::Config(e.to_string()))?;
        config.validate()?;
        Ok(config)
    }

    /// Save config to a TOML file
    pub fn save(&self, path: &Path) -> Result<(), crate::Error> {
        let content = self.to_toml()?;

        // Create parent directories
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent)?;
        }

        std::fs::write(path, content)?;
        Ok(())
    }

    /// Generate TOML representation
    pub fn to_toml(&self) -> Result<String, crate::Error> {
        toml::to_string_pretty(self).map_err(|e| crate::Error::Config(e.to_string()))
    }
}
