use time::{Duration, OffsetDateTime};

use crate::{models::Position, window::RecencyWindow};

/// Picks the fix used for one statistics cycle.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BestSampleSelector {
    max_horizontal_accuracy: f64,
    validity: Duration,
}

impl BestSampleSelector {
    pub fn new(max_horizontal_accuracy: f64, validity: Duration) -> Self {
        Self {
            max_horizontal_accuracy,
            validity,
        }
    }

    /// Returns the freshest-enough, most accurate window entry that differs from
    /// `previous`, or `trigger` when no entry qualifies.
    ///
    /// Only accuracies strictly below the filter threshold can win, and an
    /// equal accuracy later in the window never displaces an earlier one.
    pub fn select(
        &self,
        window: &RecencyWindow,
        previous: Option<&Position>,
        trigger: &Position,
        now: OffsetDateTime,
    ) -> Position {
        let mut best: Option<&Position> = None;
        let mut best_accuracy = self.max_horizontal_accuracy;

        for candidate in window.iter() {
            if now - candidate.timestamp <= self.validity
                && candidate.accuracy < best_accuracy
                && previous != Some(candidate)
            {
                best_accuracy = candidate.accuracy;
                best = Some(candidate);
            }
        }

        *best.unwrap_or(trigger)
    }
}

impl Default for BestSampleSelector {
    fn default() -> Self {
        Self::new(
            crate::config::MAX_HORIZONTAL_ACCURACY,
            crate::config::VALID_LOCATION_HISTORY_DELTA_INTERVAL,
        )
    }
}
