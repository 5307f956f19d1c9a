//! GPX conversion for replaying recorded tracks and exporting stored runs.

use gpx::{Gpx, GpxVersion, Track, TrackSegment, Waypoint};
use time::OffsetDateTime;

use crate::{
    distance::distance_in_meters,
    errors::TrackerError,
    models::{Position, RunSummary},
};

/// How GPX points without sensor metadata become fixes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ImportOptions {
    /// Accuracy used when a point carries no `hdop`.
    pub default_accuracy_m: f64,
    /// Meters of horizontal uncertainty per unit of HDOP.
    pub hdop_scale_m: f64,
}

impl Default for ImportOptions {
    fn default() -> Self {
        Self {
            default_accuracy_m: 10.0,
            hdop_scale_m: 5.0,
        }
    }
}

/// Reads every timestamped track point as a position fix, in file order.
///
/// Speed is derived from the distance and time to the previous point.
pub fn positions_from_gpx(
    content: &[u8],
    options: &ImportOptions,
) -> Result<Vec<Position>, TrackerError> {
    let gpx: Gpx = gpx::read(content)
        .map_err(|e| TrackerError::GpxParsing(format!("Failed to parse GPX: {}", e)))?;

    let mut positions: Vec<Position> = Vec::new();

    for track in &gpx.tracks {
        for segment in &track.segments {
            for point in &segment.points {
                let Some(time) = point.time else {
                    continue;
                };
                let timestamp: OffsetDateTime = time.into();
                let accuracy = point
                    .hdop
                    .map_or(options.default_accuracy_m, |hdop| hdop * options.hdop_scale_m);

                let mut position = Position::new(
                    point.point().y(),
                    point.point().x(),
                    accuracy,
                    0.0,
                    timestamp,
                );
                if let Some(previous) = positions.last() {
                    position.speed = derived_speed(previous, &position);
                }
                positions.push(position);
            }
        }
    }

    if positions.is_empty() {
        return Err(TrackerError::InvalidInput(
            "No timestamped track points found in GPX file".to_string(),
        ));
    }

    Ok(positions)
}

fn derived_speed(previous: &Position, current: &Position) -> f64 {
    let seconds = (current.timestamp - previous.timestamp).as_seconds_f64();
    if seconds <= 0.0 {
        return 0.0;
    }
    distance_in_meters(current, previous) / seconds
}

/// Writes the stored samples of a run as a single-segment GPX 1.1 track.
pub fn summary_to_gpx(summary: &RunSummary) -> Result<Vec<u8>, TrackerError> {
    let mut segment = TrackSegment::new();
    for sample in &summary.samples {
        let mut waypoint = Waypoint::new(sample.point());
        waypoint.time = Some(gpx::Time::from(sample.captured_at));
        segment.points.push(waypoint);
    }

    let mut track = Track::new();
    track.name = Some(format!("Run {}", summary.started_at.date()));
    track.segments.push(segment);

    let document = Gpx {
        version: GpxVersion::Gpx11,
        creator: Some("simple-run tracker".to_string()),
        tracks: vec![track],
        ..Default::default()
    };

    let mut buffer = Vec::new();
    gpx::write(&document, &mut buffer)
        .map_err(|e| TrackerError::GpxWriting(format!("Failed to write GPX: {}", e)))?;
    Ok(buffer)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::models::StoredSample;
    use time::macros::datetime;
    use uuid::Uuid;

    const SAMPLE: &str = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk>
    <trkseg>
      <trkpt lat="40.0150000" lon="-105.2705000">
        <time>2024-06-01T07:00:00Z</time>
        <hdop>1.2</hdop>
      </trkpt>
      <trkpt lat="40.0160000" lon="-105.2705000">
        <time>2024-06-01T07:00:30Z</time>
      </trkpt>
      <trkpt lat="40.0170000" lon="-105.2705000">
      </trkpt>
    </trkseg>
  </trk>
</gpx>
"#;

    #[test]
    fn test_positions_from_gpx() {
        let positions = positions_from_gpx(SAMPLE.as_bytes(), &ImportOptions::default()).unwrap();

        assert_eq!(positions.len(), 2);
        assert!((positions[0].accuracy - 6.0).abs() < 1e-9);
        assert_eq!(positions[1].accuracy, 10.0);
        assert_eq!(positions[0].speed, 0.0);
        assert_eq!(positions[0].timestamp, datetime!(2024-06-01 07:00 UTC));

        // ~111 m in 30 s
        assert!((positions[1].speed - 3.706).abs() < 0.01, "got {}", positions[1].speed);
    }

    #[test]
    fn test_rejects_garbage() {
        assert!(matches!(
            positions_from_gpx(b"<not-gpx>", &ImportOptions::default()),
            Err(TrackerError::GpxParsing(_))
        ));
    }

    #[test]
    fn test_rejects_untimed_track() {
        let untimed = r#"<?xml version="1.0" encoding="UTF-8"?>
<gpx version="1.1" creator="test" xmlns="http://www.topografix.com/GPX/1/1">
  <trk><trkseg><trkpt lat="40.0" lon="-105.0"></trkpt></trkseg></trk>
</gpx>
"#;
        assert!(matches!(
            positions_from_gpx(untimed.as_bytes(), &ImportOptions::default()),
            Err(TrackerError::InvalidInput(_))
        ));
    }

    #[test]
    fn test_export_reads_back() {
        let started_at = datetime!(2024-06-01 07:00 UTC);
        let samples: Vec<StoredSample> = (0..4)
            .map(|i| StoredSample {
                speed: 3.0,
                latitude: 40.015 + i as f64 * 0.001,
                longitude: -105.27,
                captured_at: started_at + time::Duration::seconds(i * 10),
            })
            .collect();
        let summary = RunSummary {
            id: Uuid::new_v4(),
            started_at,
            distance_meters: 333.0,
            average_pace_mps: 3.0,
            duration_seconds: 40,
            samples: samples.clone(),
        };

        let bytes = summary_to_gpx(&summary).unwrap();
        let text = String::from_utf8(bytes.clone()).unwrap();
        assert!(text.contains("Run 2024-06-01"));

        let positions = positions_from_gpx(&bytes, &ImportOptions::default()).unwrap();
        assert_eq!(positions.len(), samples.len());
        for (position, sample) in positions.iter().zip(&samples) {
            assert!((position.latitude - sample.latitude).abs() < 1e-7);
            assert!((position.longitude - sample.longitude).abs() < 1e-7);
            assert_eq!(position.timestamp, sample.captured_at);
        }
    }
}
