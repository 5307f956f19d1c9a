//! Sensor stream generators for test data.
//!
//! - [`FixStreamGenerator`]: Turn a ground-truth route into the noisy fixes and
//!   sensor errors a phone would report while running it

pub mod fixes;

pub use fixes::FixStreamGenerator;
