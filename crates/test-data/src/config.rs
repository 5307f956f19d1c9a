//! Configuration types for test data generation.

use serde::{Deserialize, Serialize};

/// Geographic bounding box defined by southwest and northeast corners.
#[derive(Debug, Clone, Copy, Serialize, Deserialize)]
pub struct BoundingBox {
    /// Minimum latitude (south)
    pub min_lat: f64,
    /// Minimum longitude (west)
    pub min_lon: f64,
    /// Maximum latitude (north)
    pub max_lat: f64,
    /// Maximum longitude (east)
    pub max_lon: f64,
}

impl BoundingBox {
    pub const fn new(min_lat: f64, min_lon: f64, max_lat: f64, max_lon: f64) -> Self {
        Self {
            min_lat,
            min_lon,
            max_lat,
            max_lon,
        }
    }

    /// Returns a random point within the bounding box.
    pub fn random_point(&self, rng: &mut impl rand::Rng) -> (f64, f64) {
        let lat = rng.gen_range(self.min_lat..self.max_lat);
        let lon = rng.gen_range(self.min_lon..self.max_lon);
        (lat, lon)
    }

    /// Returns the center of the bounding box.
    pub fn center(&self) -> (f64, f64) {
        (
            (self.min_lat + self.max_lat) / 2.0,
            (self.min_lon + self.max_lon) / 2.0,
        )
    }

    pub fn contains(&self, lat: f64, lon: f64) -> bool {
        (self.min_lat..=self.max_lat).contains(&lat) && (self.min_lon..=self.max_lon).contains(&lon)
    }
}

/// Pre-defined running areas.
#[derive(Debug, Clone, Copy)]
pub struct Region;

impl Region {
    /// Boulder, CO area - popular running trails.
    pub const BOULDER: BoundingBox = BoundingBox::new(39.9, -105.5, 40.1, -105.2);

    /// Central Park, New York - dense urban canyon around the park.
    pub const CENTRAL_PARK: BoundingBox = BoundingBox::new(40.765, -73.982, 40.800, -73.949);
}

/// How a simulated location sensor degrades the true position.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct FixNoiseConfig {
    /// Seconds between reported fixes.
    pub fix_interval_s: f64,
    /// Typical reported accuracy in meters.
    pub accuracy_mean_m: f64,
    /// Standard deviation of the reported accuracy in meters.
    pub accuracy_std_m: f64,
    /// Probability that a fix reports accuracy 0 (unknown).
    pub unknown_accuracy_probability: f64,
    /// Probability that a fix is a coarse network/cell fix.
    pub coarse_fix_probability: f64,
    /// Accuracy range (min, max) of coarse fixes in meters.
    pub coarse_accuracy_range: (f64, f64),
    /// Probability that no fix is reported for an interval.
    pub dropout_probability: f64,
    /// Probability that the sensor reports an error instead of a fix.
    pub sensor_error_probability: f64,
    /// Standard deviation of reported speed noise in m/s.
    pub speed_noise_mps: f64,
}

impl Default for FixNoiseConfig {
    fn default() -> Self {
        Self {
            fix_interval_s: 1.0,
            accuracy_mean_m: 6.0,
            accuracy_std_m: 2.0,
            unknown_accuracy_probability: 0.03,
            coarse_fix_probability: 0.02,
            coarse_accuracy_range: (45.0, 150.0),
            dropout_probability: 0.02,
            sensor_error_probability: 0.002,
            speed_noise_mps: 0.2,
        }
    }
}

impl FixNoiseConfig {
    /// Open sky, good receiver.
    pub fn clear_sky() -> Self {
        Self {
            accuracy_mean_m: 3.0,
            accuracy_std_m: 0.5,
            unknown_accuracy_probability: 0.0,
            coarse_fix_probability: 0.0,
            dropout_probability: 0.0,
            sensor_error_probability: 0.0,
            speed_noise_mps: 0.05,
            ..Default::default()
        }
    }

    /// Tall buildings: worse accuracy, more coarse fixes and dropouts.
    pub fn urban() -> Self {
        Self {
            accuracy_mean_m: 14.0,
            accuracy_std_m: 6.0,
            unknown_accuracy_probability: 0.05,
            coarse_fix_probability: 0.08,
            dropout_probability: 0.05,
            sensor_error_probability: 0.005,
            speed_noise_mps: 0.5,
            ..Default::default()
        }
    }
}
