//! Run tracking engine.
//!
//! Turns a stream of noisy GPS fixes into distance, pace and a down-sampled
//! track for one running session. [`session::TrackingSession`] is the entry
//! point; [`host`] wraps it behind a channel for multi-threaded sensor sources
//! and [`run_store`] keeps completed runs.

pub mod clock;
pub mod config;
pub mod distance;
pub mod downsample;
pub mod errors;
pub mod filter;
pub mod gpx_io;
pub mod host;
pub mod metrics;
pub mod models;
pub mod run_store;
pub mod selector;
pub mod session;
pub mod sink;
pub mod units;
pub mod window;

pub use clock::{Clock, ManualClock, SystemClock};
pub use config::TrackerConfig;
pub use errors::TrackerError;
pub use host::{SensorEvent, TrackerHandle, spawn_tracker};
pub use models::{LiveStats, Position, RunSummary, SensorError, SensorErrorKind, StoredSample};
pub use run_store::{RunStore, StoreSink};
pub use session::{TrackingSession, UpdateOutcome};
pub use sink::{MemoryRunSink, RunSink};
