//! Iteration engines
//!
//! This module provides the vectorized engines that repeatedly apply a map
//! across a whole parameter sweep and accumulate what the diagrams need.
//!
//! # Core Concepts
//!
//! ## The Architecture (WHAT vs HOW)
//!
//! 1. **Scenario** (`Scenario`) - WHAT to iterate
//!    - Map (formula)
//!    - Map configuration (fixed parameters + swept one)
//!    - Parameter sweep and initial state
//!
//! 2. **Configuration** (`IterationConfiguration`) - HOW MUCH to iterate
//!    - Schedule (trajectory, density, cobweb)
//!    - Budgets (steps, burn-in, cycles, chunk size)
//!
//! 3. **Engine** (`Engine` trait) - The iteration discipline
//!    - Steps the state vector, entries in parallel, steps in sequence
//!    - Hands post-burn-in snapshots to observers
//!    - Returns the accumulated statistic
//!
//! # Module Organization
//!
//! - **`traits`**: `Engine`, `IterationSchedule`, `IterationConfiguration`, `RunMetadata`
//! - **`scenario`**: `Scenario`
//! - **`sweep`**: `ParameterSweep`
//! - **`observer`**: per-step snapshot consumers
//! - **`lyapunov`**: `LyapunovAccumulator`, `LyapunovExponent`
//! - **`histogram`**: `BinEdges`, `DensityAccumulator`, `DensityHistogram`
//! - **`numeric`**: scoped numeric-error mode
//! - **Engine implementations**:
//!   - `BifurcationEngine`: real trajectories + Lyapunov exponents
//!   - `ComplexEngine`: complex trajectories
//!   - `DensityHistogramEngine`: chunked occupation density
//!   - `CobwebTracer`: single scalar trajectory drawn as a cobweb
//!
//! # Quick Start Example
//!
//! ```rust
//! use bifurc_rs::engine::{BifurcationEngine, Engine, IterationConfiguration, ParameterSweep, Scenario};
//! use bifurc_rs::maps::MapConfiguration;
//! use bifurc_rs::models::QuadraticNewton;
//!
//! // 1. WHAT: quadratic Newton map, alpha swept, beta = 0.5
//! let sweep = ParameterSweep::linspace(0.5, 1.5, 50).unwrap();
//! let scenario = Scenario::uniform(
//!     Box::new(QuadraticNewton),
//!     MapConfiguration::sweep_alpha(0.5),
//!     sweep,
//!     0.1,
//! );
//!
//! // 2. HOW MUCH: 200 steps, first 50 discarded
//! let config = IterationConfiguration::trajectory(200, 50);
//!
//! // 3. Run
//! let result = BifurcationEngine::new().run(&scenario, &config).unwrap();
//! assert_eq!(result.lyapunov.unwrap().len(), 50);
//! ```
//!
//! # Error Handling
//!
//! All engines return `Result<T, String>`. Errors are configuration errors
//! only (length mismatches, unsupported schedule, burn-in too large, invalid
//! bin edges) and are raised before the first step. Infinities and NaN coming
//! out of a map are values: they propagate into the results.

// =================================================================================================
// Module Declarations
// =================================================================================================

mod histogram;
mod lyapunov;
mod methods;
pub mod numeric;
mod observer;
mod scenario;
mod sweep;
mod traits;

// =================================================================================================
// Parallel Execution Threshold
// =================================================================================================
//
// Entries of a sweep never interact, so a step is split across Rayon workers
// once the sweep is long enough. Steps themselves always run in sequence.
// The threshold is an AtomicUsize so benches and tests can move it at runtime;
// Relaxed ordering is enough for a performance hint.
// =================================================================================================

use std::sync::atomic::{AtomicUsize, Ordering};

#[cfg(feature = "parallel")]
use rayon::prelude::*;

/// Default number of sweep entries above which a step is dispatched to Rayon.
const DEFAULT_PARALLEL_THRESHOLD: usize = 999;

/// Runtime-configurable parallel-execution threshold.
static PARALLEL_THRESHOLD: AtomicUsize = AtomicUsize::new(DEFAULT_PARALLEL_THRESHOLD);

/// Return the current parallel-execution threshold.
///
/// Engines step the state vector sequentially when the sweep holds at most
/// this many entries and with Rayon above it (only with the `parallel`
/// feature).
///
/// # Example
///
/// ```rust
/// use bifurc_rs::engine::parallel_threshold;
///
/// assert!(parallel_threshold() > 0);
/// ```
pub fn parallel_threshold() -> usize {
    PARALLEL_THRESHOLD.load(Ordering::Relaxed)
}

/// Set the parallel-execution threshold to a new value.
///
/// # Panics
///
/// Panics when `threshold == 0`.
///
/// # Example
///
/// ```rust
/// use bifurc_rs::engine::{parallel_threshold, set_parallel_threshold};
///
/// let previous = parallel_threshold();
/// set_parallel_threshold(4096);
/// assert_eq!(parallel_threshold(), 4096);
///
/// set_parallel_threshold(previous);
/// ```
pub fn set_parallel_threshold(threshold: usize) {
    assert!(threshold > 0, "parallel threshold must be at least 1");
    PARALLEL_THRESHOLD.store(threshold, Ordering::Relaxed);
}

/// RAII guard that saves the current threshold on construction and restores
/// it on drop.
///
/// Only compiled in test builds.
#[cfg(test)]
pub(crate) struct ThresholdGuard {
    previous: usize,
}

#[cfg(test)]
impl ThresholdGuard {
    /// Set the threshold to `new_value` and return a guard that will
    /// restore the previous value on drop.
    pub(crate) fn save(new_value: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(new_value);
        Self { previous }
    }
}

#[cfg(test)]
impl Drop for ThresholdGuard {
    fn drop(&mut self) {
        PARALLEL_THRESHOLD.store(self.previous, Ordering::Relaxed);
    }
}

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use histogram::{BinEdges, DensityAccumulator, DensityHistogram, DensityPreset};
pub use lyapunov::{LyapunovAccumulator, LyapunovExponent};
pub use methods::{
    BifurcationEngine, BifurcationResult, CobwebMarker, CobwebSegment, CobwebStep, CobwebTrace,
    CobwebTracer, CobwebWindow, ComplexEngine, ComplexResult, DensityHistogramEngine, SegmentKind,
};
pub use numeric::{NumericErrorGuard, NumericErrorMode};
pub use observer::{ComplexObserver, ComplexScatter, ScatterSeries, TrajectoryObserver};
pub use scenario::Scenario;
pub use sweep::ParameterSweep;
pub use traits::{
    DEFAULT_CURVE_SAMPLES, DEFAULT_GAP_RADIUS, DEFAULT_WARM_UP, Engine, IterationConfiguration,
    IterationSchedule, RunMetadata,
};

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Apply `f` to every `(state, sweep value)` pair
///
/// Entries are independent, so above [`parallel_threshold()`] the work is
/// spread over Rayon workers. Callers guarantee equal lengths.
pub(crate) fn for_each_entry<T, F>(state: &mut [T], sweep: &[f64], f: F)
where
    T: Send,
    F: Fn(&mut T, f64) + Sync + Send,
{
    debug_assert_eq!(state.len(), sweep.len());

    if state.len() > parallel_threshold() {
        #[cfg(feature = "parallel")]
        state
            .par_iter_mut()
            .zip(sweep.par_iter())
            .for_each(|(z, &r)| f(z, r));
        #[cfg(not(feature = "parallel"))]
        state.iter_mut().zip(sweep).for_each(|(z, &r)| f(z, r));
    } else {
        state.iter_mut().zip(sweep).for_each(|(z, &r)| f(z, r));
    }
}

/// Apply `f` to every `(target, state, sweep value)` triple
///
/// Same dispatch as [`for_each_entry`], for updates that read the state
/// without modifying it (running sums over the trajectory).
pub(crate) fn for_each_entry_with<F>(target: &mut [f64], state: &[f64], sweep: &[f64], f: F)
where
    F: Fn(&mut f64, f64, f64) + Sync + Send,
{
    debug_assert_eq!(target.len(), state.len());
    debug_assert_eq!(target.len(), sweep.len());

    if target.len() > parallel_threshold() {
        #[cfg(feature = "parallel")]
        target
            .par_iter_mut()
            .zip(state.par_iter())
            .zip(sweep.par_iter())
            .for_each(|((t, &z), &r)| f(t, z, r));
        #[cfg(not(feature = "parallel"))]
        target
            .iter_mut()
            .zip(state)
            .zip(sweep)
            .for_each(|((t, &z), &r)| f(t, z, r));
    } else {
        target
            .iter_mut()
            .zip(state)
            .zip(sweep)
            .for_each(|((t, &z), &r)| f(t, z, r));
    }
}

/// Count NaN and infinite entries
pub(crate) fn count_non_finite(values: &[f64]) -> usize {
    values.iter().filter(|x| !x.is_finite()).count()
}

/// Reject a state vector that does not match the sweep
pub(crate) fn check_lengths(state: usize, sweep: usize) -> Result<(), String> {
    if state != sweep {
        return Err(format!(
            "Initial state has {} entries but the parameter sweep has {}",
            state, sweep
        ));
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_threshold_value() {
        assert_eq!(DEFAULT_PARALLEL_THRESHOLD, 999);
    }

    #[test]
    fn test_get_and_set_threshold() {
        let _guard = ThresholdGuard::save(500);
        assert_eq!(parallel_threshold(), 500);
    }

    #[test]
    #[should_panic(expected = "parallel threshold must be at least 1")]
    fn test_zero_threshold_panics() {
        set_parallel_threshold(0);
    }

    #[test]
    fn test_threshold_guard_restores_previous_value() {
        let before = parallel_threshold();
        {
            let _guard = ThresholdGuard::save(42);
            assert_eq!(parallel_threshold(), 42);
        }
        assert_eq!(parallel_threshold(), before);
    }

    #[test]
    fn test_for_each_entry_same_result_both_paths() {
        let sweep: Vec<f64> = (0..64).map(|i| i as f64 * 0.1).collect();
        let step = |z: &mut f64, r: f64| *z = r * *z * (1.0 - *z);

        let mut sequential = vec![0.3; 64];
        {
            let _guard = ThresholdGuard::save(1000);
            for_each_entry(&mut sequential, &sweep, step);
        }

        let mut parallel = vec![0.3; 64];
        {
            let _guard = ThresholdGuard::save(1);
            for_each_entry(&mut parallel, &sweep, step);
        }

        assert_eq!(sequential, parallel);
    }

    #[test]
    fn test_count_non_finite() {
        assert_eq!(count_non_finite(&[1.0, f64::NAN, f64::INFINITY, -0.0]), 2);
    }

    #[test]
    fn test_check_lengths() {
        assert!(check_lengths(3, 3).is_ok());
        let err = check_lengths(2, 3).unwrap_err();
        assert!(err.contains("2 entries"));
    }
}
