use geo::geometry::Point;
use serde::{Deserialize, Serialize};
use time::{Duration, OffsetDateTime};
use uuid::Uuid;

/// One raw fix as reported by the device location sensor.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Position {
    pub latitude: f64,
    pub longitude: f64,
    /// Horizontal uncertainty radius. Lower is better, `0.0` means unknown.
    pub accuracy: f64,
    /// Speed over ground in meters per second.
    pub speed: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub timestamp: OffsetDateTime,
}

impl Position {
    pub fn new(
        latitude: f64,
        longitude: f64,
        accuracy: f64,
        speed: f64,
        timestamp: OffsetDateTime,
    ) -> Self {
        Self {
            latitude,
            longitude,
            accuracy,
            speed,
            timestamp,
        }
    }

    /// True when both coordinates are bit-identical.
    pub fn same_place(&self, other: &Position) -> bool {
        self.latitude.to_bits() == other.latitude.to_bits()
            && self.longitude.to_bits() == other.longitude.to_bits()
    }
}

/// Reduced projection of a chosen position kept in the persisted track.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct StoredSample {
    pub speed: f64,
    pub latitude: f64,
    pub longitude: f64,
    #[serde(with = "time::serde::rfc3339")]
    pub captured_at: OffsetDateTime,
}

impl StoredSample {
    /// Geo point, `x` is longitude.
    pub fn point(&self) -> Point<f64> {
        Point::new(self.longitude, self.latitude)
    }
}

impl From<&Position> for StoredSample {
    fn from(position: &Position) -> Self {
        Self {
            speed: position.speed,
            latitude: position.latitude,
            longitude: position.longitude,
            captured_at: position.timestamp,
        }
    }
}

/// Aggregate of one completed run, assembled when the session stops.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct RunSummary {
    pub id: Uuid,
    #[serde(with = "time::serde::rfc3339")]
    pub started_at: OffsetDateTime,
    pub distance_meters: f64,
    pub average_pace_mps: f64,
    pub duration_seconds: i64,
    pub samples: Vec<StoredSample>,
}

/// Statistics of a running session, readable between updates.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct LiveStats {
    pub distance_meters: f64,
    pub current_pace_mps: f64,
    pub average_pace_mps: f64,
    pub elapsed: Duration,
    pub chosen_samples: u64,
    pub stored_samples: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SensorErrorKind {
    PositionUnavailable,
    Unauthorized,
    Other,
}

/// Error reported by the location sensor, out of band from position fixes.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct SensorError {
    pub kind: SensorErrorKind,
    pub message: String,
}

impl SensorError {
    pub fn new(kind: SensorErrorKind, message: impl Into<String>) -> Self {
        Self {
            kind,
            message: message.into(),
        }
    }
}

impl std::fmt::Display for SensorError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{:?}: {}", self.kind, self.message)
    }
}
