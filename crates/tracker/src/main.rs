use std::env;

use anyhow::Context as _;
use tracing_subscriber::{EnvFilter, layer::SubscriberExt, util::SubscriberInitExt};
use tracker::{
    ManualClock, RunStore, StoreSink, TrackerConfig, TrackingSession,
    gpx_io::{self, ImportOptions},
    spawn_tracker,
    units::MeasurementSystem,
};

fn init_logging() {
    tracing_subscriber::registry()
        .with(EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")))
        .with(tracing_subscriber::fmt::layer().pretty())
        .init();
}

/// Replays a recorded GPX track through a tracking session, as if the fixes
/// were arriving live, then stores the resulting run.
#[tokio::main]
async fn main() -> anyhow::Result<()> {
    init_logging();

    let gpx_path = env::args()
        .nth(1)
        .context("usage: run-replay <track.gpx>")?;

    let config = match env::var("TRACKER_CONFIG") {
        Ok(path) => TrackerConfig::load(&path)
            .with_context(|| format!("loading tracker config from {path}"))?,
        Err(_) => TrackerConfig::default(),
    };
    let units = MeasurementSystem::from_setting(&env::var("MEASUREMENT_SYSTEM").unwrap_or_default());
    let store_path = env::var("RUN_STORE_PATH").unwrap_or_else(|_| "./runs".to_string());

    let content = std::fs::read(&gpx_path).with_context(|| format!("reading {gpx_path}"))?;
    let positions = gpx_io::positions_from_gpx(&content, &ImportOptions::default())?;
    tracing::info!("Replaying {} fixes from {}", positions.len(), gpx_path);

    let Some(first) = positions.first() else {
        anyhow::bail!("no fixes in {gpx_path}");
    };
    let clock = ManualClock::new(first.timestamp);
    let sink = StoreSink::new(RunStore::new_local(&store_path)?);
    let session = TrackingSession::with_clock(config, sink.clone(), clock.clone())?;
    let (handle, task) = spawn_tracker(session, 64);

    handle.start().await?;
    for (i, position) in positions.iter().enumerate() {
        clock.set(position.timestamp);
        handle.position(*position).await?;

        // The snapshot round trip also keeps the clock from running ahead of
        // the task applying the fix.
        let stats = handle.snapshot().await?;
        if (i + 1) % 60 == 0
            && let Some(stats) = stats
        {
            tracing::info!(
                "distance: {}  elapsed: {}  pace: {}  avg: {}",
                units.format_distance(stats.distance_meters),
                stats.elapsed,
                units.format_pace(stats.current_pace_mps),
                units.format_pace(stats.average_pace_mps),
            );
        }
    }

    let summary = handle
        .stop()
        .await?
        .context("session was not running")?;
    drop(handle);
    task.await?;
    sink.flush().await;

    println!("Run {}", summary.id);
    println!("  distance:  {}", units.format_distance(summary.distance_meters));
    println!("  avg pace:  {}", units.format_pace(summary.average_pace_mps));
    println!("  duration:  {} s", summary.duration_seconds);
    println!("  stored:    {} samples in {}", summary.samples.len(), store_path);

    Ok(())
}
