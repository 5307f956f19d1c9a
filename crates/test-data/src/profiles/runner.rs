//! Runner athletic profile.

use super::AthleteProfile;

/// Athletic profile for running.
///
/// Based on typical recreational to competitive runner performance:
/// - Base pace: ~5:00/km (3.33 m/s)
/// - Fatigue: up to ~6% slower by the end of the run
#[derive(Debug, Clone)]
pub struct RunnerProfile {
    /// Base speed in m/s.
    base_speed: f64,
    /// Fraction of speed lost by the end of the run.
    fatigue: f64,
    /// Performance variance (coefficient of variation).
    variance: f64,
}

impl Default for RunnerProfile {
    fn default() -> Self {
        Self::with_pace(5.0)
    }
}

impl RunnerProfile {
    /// Creates a new runner profile with specified base pace.
    ///
    /// # Arguments
    /// * `pace_min_per_km` - Base pace in minutes per kilometer (e.g., 5.0 for 5:00/km)
    pub fn with_pace(pace_min_per_km: f64) -> Self {
        let base_speed = 1000.0 / (pace_min_per_km * 60.0);
        Self {
            base_speed,
            fatigue: 0.06,
            variance: 0.05,
        }
    }

    /// Creates an elite runner profile (~3:30/km base pace).
    pub fn elite() -> Self {
        Self {
            fatigue: 0.02,
            ..Self::with_pace(3.5)
        }
    }

    /// Creates a recreational runner profile (~6:00/km base pace).
    pub fn recreational() -> Self {
        Self {
            fatigue: 0.10,
            variance: 0.08,
            ..Self::with_pace(6.0)
        }
    }

    /// Removes all randomness and fatigue, for exact expectations in tests.
    pub fn steady(pace_min_per_km: f64) -> Self {
        Self {
            fatigue: 0.0,
            variance: 0.0,
            ..Self::with_pace(pace_min_per_km)
        }
    }
}

impl AthleteProfile for RunnerProfile {
    fn base_speed_mps(&self) -> f64 {
        self.base_speed
    }

    fn pace_factor(&self, progress: f64) -> f64 {
        1.0 - self.fatigue * progress
    }

    fn variance(&self) -> f64 {
        self.variance
    }
}
