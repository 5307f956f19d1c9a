//! Athletic performance profiles.
//!
//! Profiles define realistic speeds over the course of a run. They are used by
//! route generators to produce realistic timestamps.

mod runner;

pub use runner::RunnerProfile;

/// Trait for athletic performance profiles.
pub trait AthleteProfile: Send + Sync {
    /// Base speed in meters per second at the start of the run.
    fn base_speed_mps(&self) -> f64;

    /// Speed multiplier at a point of the run, `progress` going from 0.0 to 1.0.
    ///
    /// Values below 1.0 model fatigue.
    fn pace_factor(&self, progress: f64) -> f64;

    /// Step-to-step speed variance as a coefficient of variation (0.0 - 1.0).
    fn variance(&self) -> f64;
}

/// Speed at a point of the run, with a variance factor sampled by the caller.
pub fn speed_at(profile: &dyn AthleteProfile, progress: f64, variance_factor: f64) -> f64 {
    let target = profile.base_speed_mps() * profile.pace_factor(progress.clamp(0.0, 1.0));

    (target * variance_factor).max(0.5) // Minimum 0.5 m/s to avoid division issues
}

/// Samples a variance factor from a normal distribution.
/// Returns a multiplier around 1.0.
pub fn sample_variance(profile: &dyn AthleteProfile, rng: &mut impl rand::Rng) -> f64 {
    use rand_distr::{Distribution, Normal};

    match Normal::new(1.0, profile.variance()) {
        Ok(normal) if profile.variance() > 0.0 => {
            let sample: f64 = normal.sample(rng);
            sample.clamp(0.7, 1.4)
        }
        _ => 1.0,
    }
}
