//! Tracking thresholds.
//!
//! The named constants are the production defaults. Sessions take a
//! [`TrackerConfig`] value so tests and replays can vary them.

use std::path::Path;

use serde::{Deserialize, Serialize};
use time::Duration;

use crate::errors::TrackerError;

/// Number of accepted fixes kept for smoothing.
pub const POSITION_HISTORY_SIZE: usize = 5;
/// Window entries required before distance and pace update.
pub const MIN_POSITIONS_NEEDED_TO_UPDATE_STATS: usize = 3;
/// Fixes reporting a worse accuracy than this are dropped.
pub const MAX_HORIZONTAL_ACCURACY: f64 = 40.0;
/// Minimum time between two statistics recalculations.
pub const STATS_CALCULATION_INTERVAL: Duration = Duration::SECOND;
/// Maximum age of a window entry for it to be selected.
pub const VALID_LOCATION_HISTORY_DELTA_INTERVAL: Duration = Duration::SECOND;
/// One stored sample per this many chosen samples.
pub const DOWNSAMPLE_STRIDE: u64 = 5;

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TrackerConfig {
    pub window_capacity: usize,
    pub min_positions_for_stats: usize,
    pub max_horizontal_accuracy: f64,
    pub stats_interval_secs: f64,
    pub location_validity_secs: f64,
    pub downsample_stride: u64,
}

impl Default for TrackerConfig {
    fn default() -> Self {
        Self {
            window_capacity: POSITION_HISTORY_SIZE,
            min_positions_for_stats: MIN_POSITIONS_NEEDED_TO_UPDATE_STATS,
            max_horizontal_accuracy: MAX_HORIZONTAL_ACCURACY,
            stats_interval_secs: STATS_CALCULATION_INTERVAL.as_seconds_f64(),
            location_validity_secs: VALID_LOCATION_HISTORY_DELTA_INTERVAL.as_seconds_f64(),
            downsample_stride: DOWNSAMPLE_STRIDE,
        }
    }
}

impl TrackerConfig {
    pub fn stats_interval(&self) -> Result<Duration, TrackerError> {
        seconds("stats_interval_secs", self.stats_interval_secs)
    }

    pub fn location_validity(&self) -> Result<Duration, TrackerError> {
        seconds("location_validity_secs", self.location_validity_secs)
    }

    /// Checks that every threshold is usable by a session.
    pub fn validate(&self) -> Result<(), TrackerError> {
        if self.window_capacity == 0 {
            return Err(TrackerError::InvalidConfig(
                "window_capacity must be at least 1".to_string(),
            ));
        }
        if self.min_positions_for_stats > self.window_capacity {
            return Err(TrackerError::InvalidConfig(format!(
                "min_positions_for_stats ({}) exceeds window_capacity ({})",
                self.min_positions_for_stats, self.window_capacity
            )));
        }
        if !self.max_horizontal_accuracy.is_finite() || self.max_horizontal_accuracy <= 0.0 {
            return Err(TrackerError::InvalidConfig(
                "max_horizontal_accuracy must be a positive number".to_string(),
            ));
        }
        self.stats_interval()?;
        self.location_validity()?;
        if self.downsample_stride == 0 {
            return Err(TrackerError::InvalidConfig(
                "downsample_stride must be at least 1".to_string(),
            ));
        }
        Ok(())
    }

    /// Parses a JSON document. Missing fields take their defaults.
    pub fn from_json(json: &str) -> Result<Self, TrackerError> {
        let config: TrackerConfig = serde_json::from_str(json)?;
        config.validate()?;
        Ok(config)
    }

    pub fn load(path: impl AsRef<Path>) -> Result<Self, TrackerError> {
        let json = std::fs::read_to_string(path)?;
        Self::from_json(&json)
    }
}

/// Non-negative and representable as a [`Duration`].
fn seconds(name: &str, secs: f64) -> Result<Duration, TrackerError> {
    if secs < 0.0 {
        return Err(TrackerError::InvalidConfig(format!(
            "{name} must be a non-negative number of seconds"
        )));
    }
    Duration::checked_seconds_f64(secs).ok_or_else(|| {
        TrackerError::InvalidConfig(format!("{name} is not a representable duration: {secs}"))
    })
}
