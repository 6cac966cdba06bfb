//! bifurc-rs: Bifurcation diagrams for one-parameter iterative maps
//!
//! Iterates maps `z ↦ f(z; α, β)` across a whole parameter sweep at once and
//! turns the trajectories into bifurcation diagrams, Lyapunov exponents,
//! complex-plane diagrams, occupation-density heat maps and cobweb plots.
//!
//! # Architecture
//!
//! bifurc-rs is built on two core principles:
//!
//! 1. **Separation of Maps and Engines**
//!    - Maps define formulas (what is iterated)
//!    - Engines define the iteration discipline (how it is iterated and what
//!      is collected)
//!
//! 2. **Capabilities as traits**
//!    - Every map evaluates (`IterativeMap`)
//!    - Lyapunov exponents need `DifferentiableMap`
//!    - Complex runs need `ComplexMap`
//!    - A missing capability is a compile error, not a runtime failure
//!
//! # Quick Start
//!
//! ```rust
//! use bifurc_rs::prelude::*;
//!
//! # fn main() -> Result<(), String> {
//! // 1. Map, fixed parameters and sweep
//! let scenario = Scenario::uniform(
//!     MapFamily::QuadraticNewton.build(),
//!     MapConfiguration::sweep_alpha(0.5),   // β = 0.5, α swept
//!     ParameterSweep::linspace(0.5, 2.0, 100)?,
//!     0.3,                                  // z0 for every entry
//! );
//!
//! // 2. Budget: 200 steps, first 50 discarded
//! let config = IterationConfiguration::trajectory(200, 50);
//!
//! // 3. Run, collecting the scatter
//! let mut scatter = ScatterSeries::new();
//! let result = BifurcationEngine::new().run_observed(&scenario, &config, &mut scatter)?;
//!
//! // 4. Access results
//! let lyapunov = result.lyapunov.expect("computed by default");
//! assert_eq!(lyapunov.len(), 100);
//! assert!(scatter.len() <= 150 * 100);
//! # Ok(())
//! # }
//! ```
//!
//! # Modules
//!
//! - [`maps`]: Map traits and parameters
//! - [`models`]: The concrete map families
//! - [`engine`]: Iteration engines and their results
//! - [`output`]: Figures and data files

pub mod engine;
pub mod maps;
pub mod models;
pub mod output;

pub mod prelude {
    //! Convenient imports for common usage
    //!
    //! ```rust
    //! use bifurc_rs::prelude::*;
    //! ```
    pub use crate::engine::{
        BifurcationEngine,
        BifurcationResult,
        BinEdges,
        CobwebTracer,
        CobwebWindow,
        ComplexEngine,
        ComplexScatter,
        DensityHistogram,
        DensityHistogramEngine,
        DensityPreset,
        Engine,
        IterationConfiguration,
        IterationSchedule,
        LyapunovExponent,
        NumericErrorGuard,
        ParameterSweep,
        Scenario,
        ScatterSeries,
    };
    pub use crate::maps::{
        AnalyticMap,
        ComplexMap,
        DifferentiableMap,
        IterativeMap,
        MapConfiguration,
        MapParameter,
        MapParameters,
    };
    pub use crate::models::MapFamily;
}
