//! Iterative maps
//!
//! This module provides the capability contract every map plug-in implements.
//! A map encapsulates a closed-form formula `z ↦ f(z; α, β)`; it never
//! iterates itself.
//!
//! # Core Concepts
//!
//! - **Iterative Map**: evaluates `f` and reports its discontinuities
//! - **Map Parameters**: named record of parameter values (α, β)
//! - **Map Configuration**: fixed parameters plus the designated swept one
//!
//! # Architecture
//!
//! Maps are **separate from engines**:
//! - The map provides the **formula** (mathematics)
//! - The engine provides the **iteration discipline** (burn-in, accumulation, chunking)
//!
//! Optional capabilities are separate traits, so an engine only demands what
//! it actually uses: the Lyapunov accumulator needs [`DifferentiableMap`], the
//! complex engine needs [`ComplexMap`], the density engine and the cobweb
//! tracer only need [`IterativeMap`].
//!
//! # Implementing a New Map
//!
//! ```rust
//! use bifurc_rs::maps::{IterativeMap, DifferentiableMap, MapParameters};
//!
//! /// f(z) = r·z·(1 - z)
//! struct Logistic;
//!
//! impl IterativeMap for Logistic {
//!     fn evaluate(&self, z: f64, params: &MapParameters) -> f64 {
//!         params.alpha * z * (1.0 - z)
//!     }
//!
//!     fn discontinuities(&self, _params: &MapParameters) -> Vec<f64> {
//!         Vec::new()
//!     }
//!
//!     fn name(&self) -> &str {
//!         "Logistic"
//!     }
//! }
//!
//! impl DifferentiableMap for Logistic {
//!     fn derivative(&self, z: f64, params: &MapParameters) -> f64 {
//!         params.alpha * (1.0 - 2.0 * z)
//!     }
//! }
//! ```
//!
//! # Available Maps
//!
//! See [`crate::models`] for the Newton-map families shipped with the crate.

// module declaration
pub mod parameters;
pub mod traits;

// re-export commonly used types for convenience
pub use parameters::{MapConfiguration, MapParameter, MapParameters};
pub use traits::{AnalyticMap, ComplexMap, DifferentiableMap, IterativeMap};
