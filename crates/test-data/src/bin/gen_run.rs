//! Writes a synthetic noisy run as GPX for the replay binary.
//!
//! Run with:
//! ```
//! cargo run -p test-data --bin gen-run -- run.gpx [distance_m] [seed]
//! ```

use rand::{SeedableRng, rngs::StdRng};
use test_data::prelude::*;
use tracing_subscriber::EnvFilter;

fn main() -> anyhow::Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("info")),
        )
        .init();

    let mut args = std::env::args().skip(1);
    let output = args.next().unwrap_or_else(|| "run.gpx".to_string());
    let distance: f64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(5000.0);
    let seed: u64 = args.next().map(|s| s.parse()).transpose()?.unwrap_or(12345);

    let noise = match std::env::var("NOISE_PROFILE").as_deref() {
        Ok("clear") => FixNoiseConfig::clear_sky(),
        Ok("urban") => FixNoiseConfig::urban(),
        _ => FixNoiseConfig::default(),
    };

    let mut rng = StdRng::seed_from_u64(seed);
    let route = ProceduralGenerator::for_region(Region::BOULDER)
        .with_distance(distance)
        .generate(&RunnerProfile::default(), &mut rng);
    let fixes = FixStreamGenerator::new(noise).generate_positions(&route, &mut rng);

    std::fs::write(&output, generate_gpx(&fixes, "Generated Run"))?;

    tracing::info!("Wrote {} fixes to {}", fixes.len(), output);
    tracing::info!("  True distance: {:.1} m", route.distance_meters());
    tracing::info!("  True duration: {}", route.duration());

    Ok(())
}
