//! Display formatting for distance and pace.
//!
//! Only the presentation layer uses this; tracking always works in meters and
//! meters per second.

use std::{fmt, str::FromStr};

use serde::{Deserialize, Serialize};

const METERS_PER_KILOMETER: f64 = 1000.0;
const METERS_PER_MILE: f64 = 1609.344;

#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum MeasurementSystem {
    #[default]
    Metric,
    Imperial,
}

impl MeasurementSystem {
    /// Parses a stored setting. Empty or unknown values fall back to metric.
    pub fn from_setting(value: &str) -> Self {
        value.parse().unwrap_or_default()
    }

    /// Factor from meters to the display unit.
    pub fn conversion(self) -> f64 {
        match self {
            MeasurementSystem::Metric => 1.0 / METERS_PER_KILOMETER,
            MeasurementSystem::Imperial => 1.0 / METERS_PER_MILE,
        }
    }

    pub fn distance_unit(self) -> &'static str {
        match self {
            MeasurementSystem::Metric => "km",
            MeasurementSystem::Imperial => "mi",
        }
    }

    /// `"3.14 km"`, two decimals.
    pub fn format_distance(self, meters: f64) -> String {
        if meters == 0.0 {
            return format!("0.00 {}", self.distance_unit());
        }
        let value = round2(meters * self.conversion());
        format!("{:.2} {}", value, self.distance_unit())
    }

    /// `"05:21 per km"` from a speed in meters per second.
    pub fn format_pace(self, speed_mps: f64) -> String {
        if speed_mps == 0.0 {
            return format!("00:00 per {}", self.distance_unit());
        }
        let minutes_per_unit = round2(1.0 / (speed_mps * self.conversion() * 60.0));
        format!("{} per {}", mm_ss(minutes_per_unit), self.distance_unit())
    }
}

impl FromStr for MeasurementSystem {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "metric" | "kilometers" | "km" => Ok(MeasurementSystem::Metric),
            "imperial" | "miles" | "mi" => Ok(MeasurementSystem::Imperial),
            other => Err(format!("unknown measurement system: {other}")),
        }
    }
}

impl fmt::Display for MeasurementSystem {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            MeasurementSystem::Metric => write!(f, "metric"),
            MeasurementSystem::Imperial => write!(f, "imperial"),
        }
    }
}

/// Midpoints round to even.
fn round2(value: f64) -> f64 {
    (value * 100.0).round_ties_even() / 100.0
}

/// Minutes-of-hour and seconds of a span given in minutes.
fn mm_ss(minutes: f64) -> String {
    let total_ms = (minutes * 60_000.0).round() as i64;
    let mm = (total_ms / 60_000) % 60;
    let ss = (total_ms / 1000) % 60;
    format!("{mm:02}:{ss:02}")
}
