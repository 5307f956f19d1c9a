//! Procedural route generation.

use rand::Rng;
use time::{Duration, OffsetDateTime};
use tracker::distance::distance_between;

use crate::config::BoundingBox;
use crate::profiles::{self, AthleteProfile};

/// Configuration for procedural route generation.
#[derive(Debug, Clone)]
pub struct RouteConfig {
    /// Target distance in meters.
    pub distance_meters: f64,
    /// Starting point (lat, lon). If None, random within bounds.
    pub start_point: Option<(f64, f64)>,
    /// Geographic bounds for the route.
    pub bounds: BoundingBox,
    /// Approximate distance between route vertices in meters.
    pub point_spacing_m: f64,
    /// Maximum heading change per vertex in radians.
    pub max_turn_rad: f64,
    /// Time of the first vertex.
    pub start_time: OffsetDateTime,
}

impl Default for RouteConfig {
    fn default() -> Self {
        Self {
            distance_meters: 5000.0,
            start_point: None,
            bounds: crate::config::Region::BOULDER,
            point_spacing_m: 10.0,
            max_turn_rad: 0.3,
            start_time: OffsetDateTime::now_utc(),
        }
    }
}

/// One vertex of the path actually run.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TruthPoint {
    pub lat: f64,
    pub lon: f64,
    /// Speed over the leg arriving at this point, m/s.
    pub speed: f64,
    pub timestamp: OffsetDateTime,
}

/// The path actually run, with exact timing.
#[derive(Debug, Clone, Default)]
pub struct TruthRoute {
    pub points: Vec<TruthPoint>,
}

impl TruthRoute {
    /// Total length in meters, measured the same way the tracker measures.
    pub fn distance_meters(&self) -> f64 {
        self.points
            .windows(2)
            .map(|w| distance_between(w[1].lat, w[1].lon, w[0].lat, w[0].lon))
            .sum()
    }

    pub fn duration(&self) -> Duration {
        match (self.points.first(), self.points.last()) {
            (Some(first), Some(last)) => last.timestamp - first.timestamp,
            _ => Duration::ZERO,
        }
    }

    /// Interpolated position and speed at `at`, or None outside the route.
    pub fn at(&self, at: OffsetDateTime) -> Option<TruthPoint> {
        let first = self.points.first()?;
        let last = self.points.last()?;
        if at < first.timestamp || at > last.timestamp {
            return None;
        }

        // First vertex at or after `at`
        let idx = self.points.partition_point(|p| p.timestamp < at);
        let next = self.points[idx];
        if idx == 0 || next.timestamp == at {
            return Some(TruthPoint { timestamp: at, ..next });
        }

        let prev = self.points[idx - 1];
        let span = (next.timestamp - prev.timestamp).as_seconds_f64();
        let t = (at - prev.timestamp).as_seconds_f64() / span;

        Some(TruthPoint {
            lat: prev.lat + (next.lat - prev.lat) * t,
            lon: prev.lon + (next.lon - prev.lon) * t,
            speed: next.speed,
            timestamp: at,
        })
    }
}

/// Generates synthetic running routes with realistic characteristics.
pub struct ProceduralGenerator {
    config: RouteConfig,
}

impl Default for ProceduralGenerator {
    fn default() -> Self {
        Self::new()
    }
}

impl ProceduralGenerator {
    /// Creates a new procedural generator with default configuration.
    pub fn new() -> Self {
        Self {
            config: RouteConfig::default(),
        }
    }

    /// Creates a generator for a specific region.
    pub fn for_region(bounds: BoundingBox) -> Self {
        Self {
            config: RouteConfig {
                bounds,
                ..Default::default()
            },
        }
    }

    /// Sets the target distance.
    pub fn with_distance(mut self, meters: f64) -> Self {
        self.config.distance_meters = meters;
        self
    }

    /// Sets the starting point.
    pub fn with_start(mut self, lat: f64, lon: f64) -> Self {
        self.config.start_point = Some((lat, lon));
        self
    }

    /// Sets the time of the first point.
    pub fn with_start_time(mut self, start_time: OffsetDateTime) -> Self {
        self.config.start_time = start_time;
        self
    }

    /// Sets point spacing.
    pub fn with_point_spacing(mut self, meters: f64) -> Self {
        self.config.point_spacing_m = meters;
        self
    }

    /// Sets how sharply the route may turn between vertices.
    pub fn with_max_turn(mut self, radians: f64) -> Self {
        self.config.max_turn_rad = radians;
        self
    }

    /// Generates a route using the specified athletic profile.
    pub fn generate(&self, profile: &dyn AthleteProfile, rng: &mut impl Rng) -> TruthRoute {
        let start = self
            .config
            .start_point
            .unwrap_or_else(|| self.config.bounds.random_point(rng));

        let path = self.generate_path(start, rng);
        self.apply_timing(path, profile, rng)
    }

    /// Generates a simple path (coordinates only, no timing).
    pub fn generate_path(&self, start: (f64, f64), rng: &mut impl Rng) -> Vec<(f64, f64)> {
        let mut path = vec![start];
        let mut current = start;
        let mut total_distance = 0.0;

        // Random walk with some momentum to create natural-looking paths
        let mut heading = rng.gen_range(0.0..std::f64::consts::TAU);

        while total_distance < self.config.distance_meters {
            if self.config.max_turn_rad > 0.0 {
                heading += rng.gen_range(-self.config.max_turn_rad..self.config.max_turn_rad);
            }

            let step = self.config.point_spacing_m * rng.gen_range(0.8..1.2);

            // Rough approximation: 1 degree lat ≈ 111km, lon varies by latitude
            let lat_delta = (step * heading.cos()) / 111_000.0;
            let lon_delta = (step * heading.sin()) / (111_000.0 * current.0.to_radians().cos());

            let (next_lat, next_lon, bounced_heading) =
                self.apply_bounds(current.0 + lat_delta, current.1 + lon_delta, heading);
            heading = bounced_heading;

            current = (next_lat, next_lon);
            path.push(current);
            total_distance += step;
        }

        path
    }

    /// Applies bounds checking with heading reversal.
    fn apply_bounds(&self, lat: f64, lon: f64, heading: f64) -> (f64, f64, f64) {
        let b = &self.config.bounds;
        let mut new_heading = heading;

        let lat = if lat < b.min_lat {
            new_heading = std::f64::consts::PI - heading;
            b.min_lat + (b.min_lat - lat).min(0.001)
        } else if lat > b.max_lat {
            new_heading = std::f64::consts::PI - heading;
            b.max_lat - (lat - b.max_lat).min(0.001)
        } else {
            lat
        };

        let lon = if lon < b.min_lon {
            new_heading = -heading;
            b.min_lon + (b.min_lon - lon).min(0.001)
        } else if lon > b.max_lon {
            new_heading = -heading;
            b.max_lon - (lon - b.max_lon).min(0.001)
        } else {
            lon
        };

        (lat, lon, new_heading)
    }

    /// Applies timing to a path using an athletic profile.
    fn apply_timing(
        &self,
        path: Vec<(f64, f64)>,
        profile: &dyn AthleteProfile,
        rng: &mut impl Rng,
    ) -> TruthRoute {
        if path.is_empty() {
            return TruthRoute::default();
        }

        let mut points = Vec::with_capacity(path.len());
        let mut timestamp = self.config.start_time;
        let mut covered = 0.0;

        let (lat, lon) = path[0];
        points.push(TruthPoint {
            lat,
            lon,
            speed: 0.0,
            timestamp,
        });

        for i in 1..path.len() {
            let (prev_lat, prev_lon) = path[i - 1];
            let (lat, lon) = path[i];

            let distance = distance_between(lat, lon, prev_lat, prev_lon);
            let progress = covered / self.config.distance_meters.max(1.0);
            let variance = profiles::sample_variance(profile, rng);
            let speed = profiles::speed_at(profile, progress, variance);

            timestamp += Duration::seconds_f64(distance / speed);
            covered += distance;

            points.push(TruthPoint {
                lat,
                lon,
                speed,
                timestamp,
            });
        }

        TruthRoute { points }
    }
}
