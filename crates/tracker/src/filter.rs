use crate::models::Position;

/// Drops fixes whose reported accuracy cannot be trusted.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AccuracyFilter {
    max_horizontal_accuracy: f64,
}

impl AccuracyFilter {
    pub fn new(max_horizontal_accuracy: f64) -> Self {
        Self {
            max_horizontal_accuracy,
        }
    }

    /// Zero accuracy means the sensor does not know, not that the fix is perfect.
    pub fn accept(&self, position: &Position) -> bool {
        position.accuracy != 0.0 && position.accuracy <= self.max_horizontal_accuracy
    }

    pub fn max_horizontal_accuracy(&self) -> f64 {
        self.max_horizontal_accuracy
    }
}

impl Default for AccuracyFilter {
    fn default() -> Self {
        Self::new(crate::config::MAX_HORIZONTAL_ACCURACY)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use time::OffsetDateTime;

    fn fix(accuracy: f64) -> Position {
        Position::new(40.0, -105.0, accuracy, 3.0, OffsetDateTime::now_utc())
    }

    #[test]
    fn test_rejects_unknown_accuracy() {
        assert!(!AccuracyFilter::default().accept(&fix(0.0)));
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let filter = AccuracyFilter::default();
        assert!(filter.accept(&fix(40.0)));
        assert!(!filter.accept(&fix(40.000_001)));
        assert!(!filter.accept(&fix(50.0)));
    }

    #[test]
    fn test_accepts_regardless_of_other_fields() {
        let filter = AccuracyFilter::default();
        for accuracy in [0.5, 5.0, 10.0, 35.0] {
            let mut position = fix(accuracy);
            position.speed = 0.0;
            position.latitude = -89.9;
            position.longitude = 179.9;
            assert!(filter.accept(&position), "accuracy {accuracy} should pass");
        }
    }

    #[test]
    fn test_custom_threshold() {
        let filter = AccuracyFilter::new(10.0);
        assert!(filter.accept(&fix(10.0)));
        assert!(!filter.accept(&fix(12.0)));
    }
}
