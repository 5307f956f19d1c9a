//! End-to-end properties of the tracking session over randomized fix streams.
//!
//! Streams are generated from a fixed seed, so failures reproduce exactly.

use rand::{Rng, SeedableRng, rngs::StdRng};
use time::{Duration, OffsetDateTime, macros::datetime};
use tracker::{
    ManualClock, MemoryRunSink, Position, TrackerConfig, TrackingSession, UpdateOutcome,
    distance::distance_in_meters,
};

const START: OffsetDateTime = datetime!(2024-06-01 07:00 UTC);

struct Replay {
    outcomes: Vec<UpdateOutcome>,
    route: Vec<Position>,
    distance_meters: f64,
    average_pace_mps: f64,
}

/// Fixes every 300-1700 ms with accuracies from 0 to 60 and a slow drift north.
fn random_stream(rng: &mut StdRng, count: usize) -> Vec<Position> {
    let mut at = START;
    let mut lat = 40.0150;
    (0..count)
        .map(|_| {
            at += Duration::milliseconds(rng.gen_range(300..1700));
            lat += rng.gen_range(0.0..0.00003);
            let accuracy = if rng.gen_bool(0.1) {
                0.0
            } else {
                rng.gen_range(1.0..60.0)
            };
            let speed = rng.gen_range(0.0..5.0);
            Position::new(lat, -105.2705 + rng.gen_range(-1e-5..1e-5), accuracy, speed, at)
        })
        .collect()
}

fn replay(fixes: &[Position]) -> (Replay, MemoryRunSink) {
    let clock = ManualClock::new(START);
    let sink = MemoryRunSink::new();
    let mut session =
        TrackingSession::with_clock(TrackerConfig::default(), sink.clone(), clock.clone()).unwrap();
    session.start();

    let mut outcomes = Vec::new();
    for fix in fixes {
        clock.set(fix.timestamp);
        outcomes.push(session.on_position(*fix));
        let stats = session.snapshot().unwrap();
        assert!(stats.distance_meters >= 0.0);
        assert!(!stats.distance_meters.is_nan());
    }

    let stats = session.snapshot().unwrap();
    let replay = Replay {
        outcomes,
        route: session.route().to_vec(),
        distance_meters: stats.distance_meters,
        average_pace_mps: stats.average_pace_mps,
    };
    (replay, sink)
}

#[test]
fn test_distance_is_sum_of_chosen_legs() {
    let mut rng = StdRng::seed_from_u64(7);
    for _ in 0..20 {
        let fixes = random_stream(&mut rng, 300);
        let (replay, _) = replay(&fixes);

        let mut expected = 0.0;
        let mut speeds = Vec::new();
        let mut chosen = 0;
        for outcome in &replay.outcomes {
            if let UpdateOutcome::Sampled { stats_updated, .. } = outcome {
                if *stats_updated {
                    let previous = &replay.route[chosen - 1];
                    let current = &replay.route[chosen];
                    expected += distance_in_meters(current, previous);
                    speeds.push(current.speed);
                }
                chosen += 1;
            }
        }

        assert_eq!(chosen, replay.route.len());
        assert!((replay.distance_meters - expected).abs() < 1e-6);

        let mean = if speeds.is_empty() {
            0.0
        } else {
            speeds.iter().sum::<f64>() / speeds.len() as f64
        };
        assert!((replay.average_pace_mps - mean).abs() < 1e-9);
    }
}

#[test]
fn test_rejected_fixes_never_reach_the_route() {
    let mut rng = StdRng::seed_from_u64(11);
    let fixes = random_stream(&mut rng, 500);
    let (replay, _) = replay(&fixes);

    for (fix, outcome) in fixes.iter().zip(&replay.outcomes) {
        let untrusted = fix.accuracy == 0.0 || fix.accuracy > 40.0;
        assert_eq!(untrusted, *outcome == UpdateOutcome::Rejected);
    }
    for chosen in &replay.route {
        assert!(chosen.accuracy > 0.0 && chosen.accuracy <= 40.0);
    }
}

#[test]
fn test_stats_wait_for_three_accepted_fixes() {
    let mut rng = StdRng::seed_from_u64(3);
    let fixes = random_stream(&mut rng, 400);
    let (replay, _) = replay(&fixes);

    let mut accepted = 0;
    for outcome in &replay.outcomes {
        if *outcome != UpdateOutcome::Rejected {
            accepted += 1;
        }
        if let UpdateOutcome::Sampled { stats_updated: true, .. } = outcome {
            assert!(accepted >= 3);
        }
    }
}

#[test]
fn test_stored_track_keeps_first_and_every_fifth() {
    let mut rng = StdRng::seed_from_u64(19);
    let fixes = random_stream(&mut rng, 400);
    let clock = ManualClock::new(START);
    let sink = MemoryRunSink::new();
    let mut session =
        TrackingSession::with_clock(TrackerConfig::default(), sink.clone(), clock.clone()).unwrap();

    session.start();
    for fix in &fixes {
        clock.set(fix.timestamp);
        session.on_position(*fix);
    }
    let route = session.route().to_vec();
    let summary = session.stop().unwrap();

    assert!(!route.is_empty());
    assert_eq!(summary.samples.len(), 1 + route.len() / 5);
    assert_eq!(summary.samples[0].captured_at, route[0].timestamp);
    for (k, sample) in summary.samples.iter().enumerate().skip(1) {
        let chosen = &route[k * 5 - 1];
        assert_eq!(sample.latitude, chosen.latitude);
        assert_eq!(sample.captured_at, chosen.timestamp);
    }
    assert_eq!(sink.last().unwrap(), summary);
}

#[test]
fn test_tighter_accuracy_threshold_changes_choices() {
    let mut rng = StdRng::seed_from_u64(23);
    let fixes = random_stream(&mut rng, 300);

    let clock = ManualClock::new(START);
    let config = TrackerConfig {
        max_horizontal_accuracy: 15.0,
        ..Default::default()
    };
    let mut session = TrackingSession::with_clock(config, MemoryRunSink::new(), clock.clone()).unwrap();
    session.start();
    for fix in &fixes {
        clock.set(fix.timestamp);
        session.on_position(*fix);
    }

    assert!(session.route().iter().all(|p| p.accuracy <= 15.0));
}
