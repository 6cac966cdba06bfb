//! Engine implementations
//!
//! Concrete engines built on the [`Engine`](crate::engine::Engine) trait
//! and the shared stepping helpers of [`crate::engine`].
//!
//! # Available Engines
//!
//! - **[`BifurcationEngine`]**: real trajectories, optional Lyapunov exponents
//!   - Needs: [`DifferentiableMap`](crate::maps::DifferentiableMap) (or any
//!     [`IterativeMap`](crate::maps::IterativeMap) when scatter-only)
//!   - Schedule: `Trajectory`
//!
//! - **[`ComplexEngine`]**: complex trajectories seeded at `z0 + i`
//!   - Needs: [`ComplexMap`](crate::maps::ComplexMap)
//!   - Schedule: `Trajectory`
//!
//! - **[`DensityHistogramEngine`]**: chunked occupation density
//!   - Needs: [`IterativeMap`](crate::maps::IterativeMap)
//!   - Schedule: `Density`
//!
//! - **[`CobwebTracer`]**: one scalar trajectory as cobweb segments
//!   - Needs: [`IterativeMap`](crate::maps::IterativeMap)
//!   - Schedule: `Cobweb`
//!
//! # Design Philosophy
//!
//! Engines are stateless values: all working buffers (state vector, chunk
//! buffer, accumulation grid) are created by a run and dropped with it, so
//! one engine can serve any number of runs.

mod bifurcation;
mod cobweb;
mod complex;
mod density;

pub use bifurcation::{BifurcationEngine, BifurcationResult};
pub use cobweb::{CobwebMarker, CobwebSegment, CobwebStep, CobwebTrace, CobwebTracer, CobwebWindow, SegmentKind};
pub use complex::{ComplexEngine, ComplexResult};
pub use density::DensityHistogramEngine;

use crate::engine::{IterationConfiguration, IterationSchedule};

/// Validate `config` and extract a `Trajectory` budget
fn trajectory_budget(config: &IterationConfiguration, engine: &str) -> Result<(usize, usize), String> {
    config.validate()?;

    match &config.schedule {
        IterationSchedule::Trajectory { step_count, burn_in } => Ok((*step_count, *burn_in)),
        other => Err(format!(
            "{} only supports Trajectory configuration, got {}",
            engine,
            other.name()
        )),
    }
}
