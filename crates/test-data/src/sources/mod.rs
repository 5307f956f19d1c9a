//! Ground-truth route sources.
//!
//! - [`ProceduralGenerator`]: Generate synthetic routes with configurable parameters

mod procedural;

pub use procedural::{ProceduralGenerator, RouteConfig, TruthPoint, TruthRoute};
