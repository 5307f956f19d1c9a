//! Lifecycle of one tracked run.
//!
//! Fixes flow through the accuracy filter into the recency window, then a rate
//! gate decides whether this fix starts a statistics cycle. A cycle selects the
//! best recent fix, updates distance and pace once the window is warm, and
//! feeds the downsampler that builds the stored track.

use time::{Duration, OffsetDateTime};
use tracing::{debug, info, warn};
use uuid::Uuid;

use crate::{
    clock::{Clock, SystemClock},
    config::TrackerConfig,
    downsample::TrackDownsampler,
    errors::TrackerError,
    filter::AccuracyFilter,
    metrics::{RunMetrics, TrackMetric},
    models::{LiveStats, Position, RunSummary, SensorError},
    selector::BestSampleSelector,
    sink::RunSink,
    window::RecencyWindow,
};

/// What a single fix did to the session.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum UpdateOutcome {
    /// Session was not running.
    Idle,
    /// Accuracy was unknown or too coarse.
    Rejected,
    /// Kept for smoothing, but too soon after the last statistics cycle.
    Throttled,
    /// A fix was chosen. `stats_updated` is false while the window warms up.
    Sampled { stats_updated: bool, stored: bool },
}

#[derive(Debug)]
struct RunState {
    id: Uuid,
    started_at: OffsetDateTime,
    window: RecencyWindow,
    previous_chosen: Option<Position>,
    previous_distance_time: OffsetDateTime,
    metrics: RunMetrics,
    downsampler: TrackDownsampler,
}

impl RunState {
    fn new(config: &TrackerConfig, started_at: OffsetDateTime) -> Self {
        Self {
            id: Uuid::new_v4(),
            started_at,
            window: RecencyWindow::new(config.window_capacity),
            previous_chosen: None,
            previous_distance_time: started_at,
            metrics: RunMetrics::default(),
            downsampler: TrackDownsampler::new(config.downsample_stride),
        }
    }
}

/// Single-owner tracking session. `Idle` until [`start`](Self::start), then
/// `Running` until [`stop`](Self::stop).
pub struct TrackingSession<S: RunSink, C: Clock = SystemClock> {
    config: TrackerConfig,
    stats_interval: Duration,
    filter: AccuracyFilter,
    selector: BestSampleSelector,
    sink: S,
    clock: C,
    state: Option<RunState>,
}

impl<S: RunSink> TrackingSession<S, SystemClock> {
    pub fn new(config: TrackerConfig, sink: S) -> Result<Self, TrackerError> {
        Self::with_clock(config, sink, SystemClock)
    }
}

impl<S: RunSink, C: Clock> TrackingSession<S, C> {
    /// Fails with [`TrackerError::InvalidConfig`] unless `config` validates.
    pub fn with_clock(config: TrackerConfig, sink: S, clock: C) -> Result<Self, TrackerError> {
        config.validate()?;
        let stats_interval = config.stats_interval()?;
        let filter = AccuracyFilter::new(config.max_horizontal_accuracy);
        let selector =
            BestSampleSelector::new(config.max_horizontal_accuracy, config.location_validity()?);
        Ok(Self {
            config,
            stats_interval,
            filter,
            selector,
            sink,
            clock,
            state: None,
        })
    }

    pub fn config(&self) -> &TrackerConfig {
        &self.config
    }

    pub fn sink(&self) -> &S {
        &self.sink
    }

    pub fn is_running(&self) -> bool {
        self.state.is_some()
    }

    /// Begins a new run, discarding anything from an unfinished one.
    pub fn start(&mut self) {
        let state = RunState::new(&self.config, self.clock.now());
        info!(run_id = %state.id, started_at = %state.started_at, "Tracking session started");
        self.state = Some(state);
    }

    pub fn on_position(&mut self, position: Position) -> UpdateOutcome {
        let Some(state) = self.state.as_mut() else {
            return UpdateOutcome::Idle;
        };

        if !self.filter.accept(&position) {
            debug!(accuracy = position.accuracy, "Dropping untrusted fix");
            return UpdateOutcome::Rejected;
        }

        state.window.push(position);
        let can_update_stats = state.window.is_ready(self.config.min_positions_for_stats);

        if position.timestamp - state.previous_distance_time <= self.stats_interval {
            debug!(timestamp = %position.timestamp, "Throttled fix");
            return UpdateOutcome::Throttled;
        }
        state.previous_distance_time = position.timestamp;

        let chosen = self.selector.select(
            &state.window,
            state.previous_chosen.as_ref(),
            &position,
            self.clock.now(),
        );

        let mut stats_updated = false;
        if can_update_stats && let Some(previous) = state.previous_chosen.as_ref() {
            state.metrics.record(previous, &chosen);
            stats_updated = true;
        }

        let stored = state.downsampler.record(&chosen);
        state.previous_chosen = Some(chosen);

        debug!(
            accuracy = chosen.accuracy,
            stats_updated,
            stored,
            distance_meters = state.metrics.distance.total_meters(),
            "Chose fix"
        );

        UpdateOutcome::Sampled {
            stats_updated,
            stored,
        }
    }

    /// Sensor failures are reported and otherwise ignored.
    pub fn on_sensor_error(&self, error: &SensorError) {
        warn!(kind = ?error.kind, running = self.is_running(), "Location sensor failed: {}", error.message);
    }

    /// Statistics of the current run, if one is in progress.
    pub fn snapshot(&self) -> Option<LiveStats> {
        let state = self.state.as_ref()?;
        Some(LiveStats {
            distance_meters: state.metrics.distance.total_meters(),
            current_pace_mps: state.metrics.pace.current(),
            average_pace_mps: state.metrics.pace.average(),
            elapsed: self.clock.now() - state.started_at,
            chosen_samples: state.downsampler.chosen_count(),
            stored_samples: state.downsampler.stored().len(),
        })
    }

    /// Every chosen fix of the current run, in order.
    pub fn route(&self) -> &[Position] {
        self.state
            .as_ref()
            .map(|state| state.downsampler.route())
            .unwrap_or(&[])
    }

    /// Ends the run, hands its summary to the sink and returns to idle.
    ///
    /// Returns `None` without side effects when no run is in progress.
    pub fn stop(&mut self) -> Option<RunSummary> {
        let state = self.state.take()?;

        let elapsed = self.clock.now() - state.started_at;
        let scores = state.metrics.finish();

        let summary = RunSummary {
            id: state.id,
            started_at: state.started_at,
            distance_meters: scores.distance_meters,
            average_pace_mps: scores.average_pace_mps,
            duration_seconds: whole_seconds(elapsed),
            samples: state.downsampler.into_stored(),
        };

        info!(
            run_id = %summary.id,
            distance_meters = summary.distance_meters,
            average_pace_mps = summary.average_pace_mps,
            duration_seconds = summary.duration_seconds,
            stored_samples = summary.samples.len(),
            "Tracking session stopped"
        );

        self.sink.persist_run(summary.clone());
        Some(summary)
    }
}

/// Rounds half to even, matching how historical durations were rounded.
fn whole_seconds(elapsed: Duration) -> i64 {
    elapsed.as_seconds_f64().round_ties_even() as i64
}
