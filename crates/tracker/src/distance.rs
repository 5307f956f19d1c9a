//! Great-circle distance between fixes.
//!
//! Uses the spherical law of cosines and a nautical-mile-per-degree conversion.
//! This is not a geodesic on the WGS84 ellipsoid; totals stored by earlier
//! versions were computed with exactly these operations, so they must not change.

use std::f64::consts::PI;

use crate::models::Position;

const NAUTICAL_MILES_PER_DEGREE: f64 = 60.0;
const STATUTE_MILES_PER_NAUTICAL_MILE: f64 = 1.1515;
const METERS_PER_STATUTE_MILE: f64 = 1609.344;

/// Distance in meters from `previous` to `recent`.
///
/// Identical coordinates give exactly zero, and any NaN from rounding pushing
/// the `acos` argument outside [-1, 1] is replaced by zero.
pub fn distance_in_meters(recent: &Position, previous: &Position) -> f64 {
    distance_between(
        recent.latitude,
        recent.longitude,
        previous.latitude,
        previous.longitude,
    )
}

pub fn distance_between(lat1: f64, lon1: f64, lat2: f64, lon2: f64) -> f64 {
    if lat1 == lat2 && lon1 == lon2 {
        return 0.0;
    }

    let theta = lon1 - lon2;

    let cosine = deg2rad(lat1).sin() * deg2rad(lat2).sin()
        + deg2rad(lat1).cos() * deg2rad(lat2).cos() * deg2rad(theta).cos();

    let angle = cosine.acos();
    if angle.is_nan() {
        return 0.0;
    }

    rad2deg(angle) * NAUTICAL_MILES_PER_DEGREE * STATUTE_MILES_PER_NAUTICAL_MILE * METERS_PER_STATUTE_MILE
}

// Kept as explicit multiply/divide rather than to_radians/to_degrees so
// results stay bit-identical to historical totals.
fn deg2rad(deg: f64) -> f64 {
    deg * PI / 180.0
}

fn rad2deg(rad: f64) -> f64 {
    rad / PI * 180.0
}
