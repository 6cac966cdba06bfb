//! Engine traits and types
//!
//! # Design Philosophy
//!
//! - Central enum `IterationSchedule` defines the iteration budget of a run
//! - `IterationConfiguration` wraps it with named constructors and validation
//! - `Engine` is the interface every vectorized engine implements
//! - `RunMetadata` carries diagnostics alongside every engine output
//!
//! Every schedule is a fixed budget: engines never stop early on convergence.

use std::collections::BTreeMap;

use super::scenario::Scenario;

/// Warm-up steps discarded at the start of every density cycle
pub const DEFAULT_WARM_UP: usize = 1000;

/// Number of evenly spaced samples of the map curve in a cobweb diagram
pub const DEFAULT_CURVE_SAMPLES: usize = 10_000;

/// Half-width of the gap cut into the map curve around each discontinuity
pub const DEFAULT_GAP_RADIUS: f64 = 0.01;

// =================================================================================================
// Iteration schedule
// =================================================================================================

/// Iteration budget of a run
///
/// # Examples
///
/// ```rust
/// use bifurc_rs::engine::IterationSchedule;
///
/// // 200 steps, the first 50 discarded
/// let schedule = IterationSchedule::Trajectory { step_count: 200, burn_in: 50 };
/// assert!(schedule.validate().is_ok());
///
/// // burn-in must leave at least one step
/// let schedule = IterationSchedule::Trajectory { step_count: 50, burn_in: 50 };
/// assert!(schedule.validate().is_err());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub enum IterationSchedule {
    /// Single trajectory per sweep entry with burn-in
    ///
    /// Used by: `BifurcationEngine` (with or without Lyapunov), `ComplexEngine`
    ///
    /// # Parameters
    /// - `step_count`: total number of map applications
    /// - `burn_in`: leading steps excluded from every statistic (`< step_count`)
    Trajectory {
        step_count: usize,
        burn_in: usize,
    },

    /// Restarted, chunked iteration for density histograms
    ///
    /// Used by: `DensityHistogramEngine`
    ///
    /// # Parameters
    /// - `cycle_count`: number of independent restarts
    /// - `warm_up`: steps discarded at the start of each cycle
    /// - `retained_steps`: steps binned per cycle, after warm-up
    /// - `chunk_size`: steps buffered between two binning passes
    Density {
        cycle_count: usize,
        warm_up: usize,
        retained_steps: usize,
        chunk_size: usize,
    },

    /// Single scalar trajectory drawn as a cobweb
    ///
    /// Used by: `CobwebTracer`
    ///
    /// # Parameters
    /// - `step_count`: number of map applications
    /// - `curve_samples`: samples of the map curve across the display range
    /// - `gap_radius`: half-width of the mask around each discontinuity
    Cobweb {
        step_count: usize,
        curve_samples: usize,
        gap_radius: f64,
    },
}

impl IterationSchedule {
    /// Get name identifier
    pub fn name(&self) -> &str {
        match self {
            IterationSchedule::Trajectory { .. } => "Trajectory",
            IterationSchedule::Density { .. } => "Density",
            IterationSchedule::Cobweb { .. } => "Cobweb",
        }
    }

    /// Validate that the budget is meaningful
    pub fn validate(&self) -> Result<(), String> {
        match self {
            IterationSchedule::Trajectory { step_count, burn_in } => {
                if *step_count == 0 {
                    return Err("Step count must be greater than 0".to_string());
                }
                if burn_in >= step_count {
                    return Err(format!(
                        "Burn-in ({}) must be smaller than the step count ({})",
                        burn_in, step_count
                    ));
                }
                Ok(())
            }
            IterationSchedule::Density { cycle_count, retained_steps, chunk_size, .. } => {
                if *cycle_count == 0 {
                    return Err("Cycle count must be greater than 0".to_string());
                }
                if *retained_steps == 0 {
                    return Err("Retained steps per cycle must be greater than 0".to_string());
                }
                if *chunk_size == 0 {
                    return Err("Chunk size must be greater than 0".to_string());
                }
                Ok(())
            }
            IterationSchedule::Cobweb { step_count, curve_samples, gap_radius } => {
                if *step_count == 0 {
                    return Err("Step count must be greater than 0".to_string());
                }
                if *curve_samples < 2 {
                    return Err(format!(
                        "Need at least 2 curve samples, got {}",
                        curve_samples
                    ));
                }
                if !gap_radius.is_finite() || *gap_radius < 0.0 {
                    return Err(format!(
                        "Gap radius must be finite and non-negative, got {}",
                        gap_radius
                    ));
                }
                Ok(())
            }
        }
    }
}

// =================================================================================================
// Iteration configuration
// =================================================================================================

/// Configuration for an engine run
///
/// # Examples
///
/// ```rust
/// use bifurc_rs::engine::IterationConfiguration;
///
/// let bifurcation = IterationConfiguration::trajectory(200, 50);
/// let density = IterationConfiguration::density(10, 10_000, 1_000);
/// let cobweb = IterationConfiguration::cobweb(30);
///
/// assert!(bifurcation.validate().is_ok());
/// assert!(density.validate().is_ok());
/// assert!(cobweb.validate().is_ok());
/// ```
#[derive(Clone, Debug, PartialEq)]
pub struct IterationConfiguration {
    /// Schedule and its parameters
    pub schedule: IterationSchedule,
}

impl IterationConfiguration {
    /// Create a new configuration with a given schedule
    pub fn new(schedule: IterationSchedule) -> Self {
        Self { schedule }
    }

    /// Trajectory schedule with burn-in
    pub fn trajectory(step_count: usize, burn_in: usize) -> Self {
        Self::new(IterationSchedule::Trajectory { step_count, burn_in })
    }

    /// Density schedule with the default warm-up
    pub fn density(cycle_count: usize, retained_steps: usize, chunk_size: usize) -> Self {
        Self::density_with_warm_up(cycle_count, DEFAULT_WARM_UP, retained_steps, chunk_size)
    }

    /// Density schedule with an explicit warm-up
    pub fn density_with_warm_up(
        cycle_count: usize,
        warm_up: usize,
        retained_steps: usize,
        chunk_size: usize,
    ) -> Self {
        Self::new(IterationSchedule::Density { cycle_count, warm_up, retained_steps, chunk_size })
    }

    /// Cobweb schedule with default curve sampling
    pub fn cobweb(step_count: usize) -> Self {
        Self::new(IterationSchedule::Cobweb {
            step_count,
            curve_samples: DEFAULT_CURVE_SAMPLES,
            gap_radius: DEFAULT_GAP_RADIUS,
        })
    }

    /// Validate configuration
    pub fn validate(&self) -> Result<(), String> {
        self.schedule.validate()
    }
}

// =================================================================================================
// Run metadata
// =================================================================================================

/// Free-form diagnostics attached to engine outputs
///
/// Engines record their name, budgets and how many non-finite values they
/// met, so that results are self-describing.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct RunMetadata {
    entries: BTreeMap<String, String>,
}

impl RunMetadata {
    /// Empty metadata
    pub fn new() -> Self {
        Self::default()
    }

    /// Add or replace an entry
    pub fn add(&mut self, key: &str, value: &str) {
        self.entries.insert(key.to_string(), value.to_string());
    }

    /// Get an entry
    pub fn get(&self, key: &str) -> Option<&str> {
        self.entries.get(key).map(String::as_str)
    }

    /// Entries in key order
    pub fn sorted(&self) -> Vec<(&str, &str)> {
        self.entries.iter().map(|(k, v)| (k.as_str(), v.as_str())).collect()
    }

    /// Number of entries
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

// =================================================================================================
// Engine trait
// =================================================================================================

/// Trait for vectorized engines
///
/// # Responsibility
/// Iterates the scenario's map across the whole sweep according to the
/// configuration's schedule and returns the engine-specific output.
///
/// The type parameter is the map type the engine is run against; each engine
/// implements `Engine<M>` only for maps offering the capabilities it needs
/// (e.g. the Lyapunov engine requires
/// [`DifferentiableMap`](crate::maps::DifferentiableMap)).
///
/// # Errors
/// Configuration errors (unsupported schedule, length mismatches) are
/// returned before any iteration. Numerical singularities are never errors.
pub trait Engine<M: ?Sized> {
    /// What a run produces
    type Output;

    /// Run the engine to completion
    fn run(&self, scenario: &Scenario<M>, config: &IterationConfiguration) -> Result<Self::Output, String>;

    /// Name of the engine (used for metadata and logging)
    fn name(&self) -> &'static str;
}

// =================================================================================================
// Tests
// =================================================================================================
