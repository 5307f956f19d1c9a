//! Per-cycle statistics fed by consecutive chosen fixes.

use crate::{distance::distance_in_meters, models::Position};

/// A statistic that consumes one leg (previous chosen fix to current chosen fix)
/// per statistics cycle.
pub trait TrackMetric {
    type Score;
    fn record(&mut self, previous: &Position, chosen: &Position);
    fn finish(&self) -> Self::Score;
}

#[derive(Debug, Clone, Default)]
pub struct DistanceAccumulator {
    total_meters: f64,
}

impl DistanceAccumulator {
    pub fn total_meters(&self) -> f64 {
        self.total_meters
    }
}

impl TrackMetric for DistanceAccumulator {
    type Score = f64;

    fn record(&mut self, previous: &Position, chosen: &Position) {
        self.total_meters += distance_in_meters(chosen, previous);
    }

    fn finish(&self) -> f64 {
        self.total_meters
    }
}

/// Current pace is the speed of the latest chosen fix; the average is the mean
/// of every recorded speed.
#[derive(Debug, Clone, Default)]
pub struct PaceTracker {
    current: f64,
    history: Vec<f64>,
}

impl PaceTracker {
    pub fn current(&self) -> f64 {
        self.current
    }

    pub fn average(&self) -> f64 {
        if self.history.is_empty() {
            return 0.0;
        }
        self.history.iter().sum::<f64>() / self.history.len() as f64
    }

    pub fn history(&self) -> &[f64] {
        &self.history
    }
}

impl TrackMetric for PaceTracker {
    type Score = f64;

    fn record(&mut self, _previous: &Position, chosen: &Position) {
        self.history.push(chosen.speed);
        self.current = chosen.speed;
    }

    fn finish(&self) -> f64 {
        self.average()
    }
}

#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct RunScores {
    pub distance_meters: f64,
    pub average_pace_mps: f64,
}

/// Distance and pace updated together from the same leg.
#[derive(Debug, Clone, Default)]
pub struct RunMetrics {
    pub distance: DistanceAccumulator,
    pub pace: PaceTracker,
}

impl TrackMetric for RunMetrics {
    type Score = RunScores;

    fn record(&mut self, previous: &Position, chosen: &Position) {
        self.distance.record(previous, chosen);
        self.pace.record(previous, chosen);
    }

    fn finish(&self) -> RunScores {
        RunScores {
            distance_meters: self.distance.finish(),
            average_pace_mps: self.pace.finish(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::distance::distance_between;
    use time::{Duration, OffsetDateTime};

    fn fix(lat: f64, speed: f64, second: i64) -> Position {
        Position::new(
            lat,
            -105.27,
            5.0,
            speed,
            OffsetDateTime::UNIX_EPOCH + Duration::seconds(second),
        )
    }

    #[test]
    fn test_average_pace_empty_is_zero() {
        let pace = PaceTracker::default();
        assert_eq!(pace.average(), 0.0);
        assert_eq!(pace.current(), 0.0);
    }

    #[test]
    fn test_average_pace_is_mean() {
        let mut pace = PaceTracker::default();
        let prev = fix(40.0, 0.0, 0);
        for (i, speed) in [3.0, 4.0, 2.0, 3.0].into_iter().enumerate() {
            pace.record(&prev, &fix(40.0, speed, i as i64 + 1));
        }
        assert_eq!(pace.average(), 3.0);
        assert_eq!(pace.current(), 3.0);
        assert_eq!(pace.history(), &[3.0, 4.0, 2.0, 3.0]);
    }

    #[test]
    fn test_distance_sums_legs() {
        let a = fix(40.000, 3.0, 0);
        let b = fix(40.001, 3.0, 2);
        let c = fix(40.003, 3.0, 4);

        let mut distance = DistanceAccumulator::default();
        distance.record(&a, &b);
        distance.record(&b, &c);
        distance.record(&c, &c);

        let expected =
            distance_between(40.001, -105.27, 40.0, -105.27) + distance_between(40.003, -105.27, 40.001, -105.27);
        assert_eq!(distance.total_meters(), expected);
    }

    #[test]
    fn test_run_metrics_update_together() {
        let a = fix(40.000, 2.5, 0);
        let b = fix(40.001, 3.5, 2);

        let mut metrics = RunMetrics::default();
        metrics.record(&a, &b);
        let scores = metrics.finish();

        assert!(scores.distance_meters > 100.0 && scores.distance_meters < 120.0);
        assert_eq!(scores.average_pace_mps, 3.5);
    }
}
