//! Test data generation for the run tracker.
//!
//! This crate produces synthetic runs: a ground-truth route timed by an athlete
//! profile, and the noisy stream of sensor fixes a phone would report while
//! following it. Streams can be fed straight into a tracking session or written
//! out as GPX for the `run-replay` binary.
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use test_data::prelude::*;
//!
//! let mut rng = StdRng::seed_from_u64(42);
//! let route = ProceduralGenerator::new()
//!     .with_distance(5000.0)
//!     .generate(&RunnerProfile::default(), &mut rng);
//! let events = FixStreamGenerator::new(FixNoiseConfig::urban()).generate(&route, &mut rng);
//! ```

pub mod config;
pub mod generators;
pub mod gpx;
pub mod profiles;
pub mod sources;

pub mod prelude {
    //! Convenient re-exports for common usage.

    pub use crate::config::{BoundingBox, FixNoiseConfig, Region};
    pub use crate::generators::FixStreamGenerator;
    pub use crate::gpx::generate_gpx;
    pub use crate::profiles::{AthleteProfile, RunnerProfile, sample_variance};
    pub use crate::sources::{ProceduralGenerator, TruthPoint, TruthRoute};
    pub use rand::{SeedableRng, rngs::StdRng};
    pub use tracker::{Position, SensorEvent};
}
