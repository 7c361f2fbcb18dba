//! Tracker configuration.

use std::fs;
use std::path::Path;

use serde::{Deserialize, Serialize};

use crate::error::ConfigError;
use crate::governor::HudStyle;
use crate::tracker::{DEFAULT_TRACK_TTL_MS, EnabledCategories};

/// Configuration for the [`TrackerPipeline`](crate::TrackerPipeline).
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    /// Detections must score strictly above this to be kept
    pub confidence_threshold: f32,
    pub enabled: EnabledCategories,
    /// Start in reduced mode (frame skipping, lighter hand model)
    pub reduced_mode: bool,
    /// Tracks unseen for longer than this are evicted
    pub track_ttl_ms: u64,
    pub hud_style: HudStyle,
    pub performance: PerformanceConfig,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            confidence_threshold: 0.5,
            enabled: EnabledCategories::default(),
            reduced_mode: false,
            track_ttl_ms: DEFAULT_TRACK_TTL_MS,
            hud_style: HudStyle::default(),
            performance: PerformanceConfig::default(),
        }
    }
}

impl TrackerConfig {
    /// Parse and validate a JSON document. Missing fields take their defaults.
    pub fn from_json_str(json: &str) -> Result<Self, ConfigError> {
        let cfg: TrackerConfig = serde_json::from_str(json)?;
        cfg.validate()?;
        Ok(cfg)
    }

    /// Load from a JSON file.
    pub fn from_file(path: impl AsRef<Path>) -> Result<Self, ConfigError> {
        let data = fs::read_to_string(path)?;
        Self::from_json_str(&data)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        validate_threshold(self.confidence_threshold)?;
        self.performance.validate()
    }
}

pub(crate) fn validate_threshold(threshold: f32) -> Result<(), ConfigError> {
    if (0.0..=1.0).contains(&threshold) {
        Ok(())
    } else {
        Err(ConfigError::InvalidThreshold(threshold))
    }
}

/// Tuning for the performance governor.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct PerformanceConfig {
    /// Number of recent frame rates averaged
    pub history_capacity: usize,
    /// Frame rate that maps to a performance level of 100
    pub target_fps: f32,
    /// Samples required before the low-performance advisory may fire
    pub advisory_min_samples: usize,
    /// Mean frame rate below which the advisory fires
    pub advisory_fps: f32,
    /// Frames skipped between detector runs in reduced mode
    pub reduced_frame_skip: u32,
}

impl Default for PerformanceConfig {
    fn default() -> Self {
        Self {
            history_capacity: 30,
            target_fps: 30.0,
            advisory_min_samples: 10,
            advisory_fps: 15.0,
            reduced_frame_skip: 2,
        }
    }
}

impl PerformanceConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.history_capacity == 0 {
            return Err(ConfigError::InvalidCapacity);
        }
        if !(self.target_fps > 0.0) {
            return Err(ConfigError::InvalidTargetFps(self.target_fps));
        }
        Ok(())
    }
}
