//! Noisy location sensor simulation.

use rand::Rng;
use rand_distr::{Distribution, Normal};
use time::Duration;
use tracker::{Position, SensorError, SensorErrorKind, SensorEvent};

use crate::config::FixNoiseConfig;
use crate::sources::TruthRoute;

/// Meters per degree of latitude used to turn metric noise into degrees.
const METERS_PER_DEGREE: f64 = 111_000.0;

/// Samples a [`TruthRoute`] at the sensor rate and degrades each sample.
///
/// The reported accuracy drives the position error: a fix claiming 5 m lands
/// within a few meters of the truth, a coarse fix can be far off. Fixes that
/// report unknown accuracy are still displaced as if they were average.
#[derive(Debug, Clone)]
pub struct FixStreamGenerator {
    config: FixNoiseConfig,
}

impl FixStreamGenerator {
    pub fn new(config: FixNoiseConfig) -> Self {
        Self { config }
    }

    pub fn config(&self) -> &FixNoiseConfig {
        &self.config
    }

    /// Generates sensor events in time order for the whole route.
    pub fn generate(&self, route: &TruthRoute, rng: &mut impl Rng) -> Vec<SensorEvent> {
        let Some(first) = route.points.first() else {
            return Vec::new();
        };

        let interval = Duration::seconds_f64(self.config.fix_interval_s.max(0.1));
        let accuracy_dist =
            Normal::new(self.config.accuracy_mean_m, self.config.accuracy_std_m.max(0.0)).ok();
        let speed_noise = Normal::new(0.0, self.config.speed_noise_mps.max(0.0)).ok();

        let mut events = Vec::new();
        let mut at = first.timestamp + interval;

        while let Some(truth) = route.at(at) {
            at += interval;

            if rng.r#gen::<f64>() < self.config.dropout_probability {
                continue;
            }
            if rng.r#gen::<f64>() < self.config.sensor_error_probability {
                events.push(SensorEvent::Error(SensorError::new(
                    SensorErrorKind::PositionUnavailable,
                    "simulated loss of fix",
                )));
                continue;
            }

            let coarse = rng.r#gen::<f64>() < self.config.coarse_fix_probability;
            let true_error_m = if coarse {
                let (min, max) = self.config.coarse_accuracy_range;
                rng.gen_range(min..max)
            } else {
                accuracy_dist
                    .as_ref()
                    .map_or(self.config.accuracy_mean_m, |d| d.sample(rng))
                    .max(1.0)
            };

            let reported_accuracy =
                if rng.r#gen::<f64>() < self.config.unknown_accuracy_probability {
                    0.0
                } else {
                    true_error_m
                };

            // Reported accuracy is roughly a 68% radius: one std dev per axis
            // of about 0.7 of it.
            let (north_m, east_m) = jitter(true_error_m * 0.7, rng);
            let lat = truth.lat + north_m / METERS_PER_DEGREE;
            let lon = truth.lon + east_m / (METERS_PER_DEGREE * truth.lat.to_radians().cos());

            let speed_error = speed_noise.as_ref().map_or(0.0, |d| d.sample(rng));
            let speed = (truth.speed + speed_error).max(0.0);

            events.push(SensorEvent::Position(Position::new(
                lat,
                lon,
                reported_accuracy,
                speed,
                truth.timestamp,
            )));
        }

        events
    }

    /// Only the position fixes of [`generate`](Self::generate).
    pub fn generate_positions(&self, route: &TruthRoute, rng: &mut impl Rng) -> Vec<Position> {
        self.generate(route, rng)
            .into_iter()
            .filter_map(|event| match event {
                SensorEvent::Position(position) => Some(position),
                SensorEvent::Error(_) => None,
            })
            .collect()
    }
}

fn jitter(std_dev_m: f64, rng: &mut impl Rng) -> (f64, f64) {
    match Normal::new(0.0, std_dev_m) {
        Ok(normal) => (normal.sample(rng), normal.sample(rng)),
        Err(_) => (0.0, 0.0),
    }
}
