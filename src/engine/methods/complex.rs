//! Complex bifurcation engine
//!
//! Same stepping discipline as the real engine, over `Complex64` and without
//! derivative. Every entry starts at `z0 + i`: a unit imaginary offset pushes
//! the orbit off the real axis, where the real maps would keep it forever.
//!
//! The studied maps have real coefficients, so orbits come in conjugate
//! pairs. Each retained snapshot is therefore handed over as three series:
//! `Re z`, `Im z` and `-Im z`.

use log::debug;
use nalgebra::DVector;
use num_complex::Complex64;

use crate::engine::numeric;
use crate::engine::observer::ComplexObserver;
use crate::engine::{Engine, IterationConfiguration, RunMetadata, Scenario};
use crate::maps::ComplexMap;

use super::trajectory_budget;

/// Imaginary offset added to every initial value
pub const SEED_OFFSET: Complex64 = Complex64::new(0.0, 1.0);

/// Output of a [`ComplexEngine`] run
#[derive(Debug, Clone)]
pub struct ComplexResult {
    /// Steps handed to the observer
    pub retained_steps: usize,

    /// Entries whose final iterate has a NaN or infinite component
    pub non_finite: usize,

    /// Run diagnostics
    pub metadata: RunMetadata,
}

/// Vectorized complex iteration engine
///
/// # Example
///
/// ```rust
/// use bifurc_rs::engine::{ComplexEngine, ComplexScatter, IterationConfiguration, ParameterSweep, Scenario};
/// use bifurc_rs::maps::MapConfiguration;
/// use bifurc_rs::models::CubicNewton;
///
/// let scenario = Scenario::uniform(
///     Box::new(CubicNewton),
///     MapConfiguration::sweep_alpha(0.0),
///     ParameterSweep::linspace(-2.0, 2.0, 40).unwrap(),
///     0.2,
/// );
///
/// let mut scatter = ComplexScatter::new();
/// let result = ComplexEngine::new()
///     .run_observed(&scenario, &IterationConfiguration::trajectory(60, 30), &mut scatter)
///     .unwrap();
/// assert_eq!(result.retained_steps, 30);
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct ComplexEngine;

impl ComplexEngine {
    /// Create the engine
    pub fn new() -> Self {
        Self
    }

    /// Run, handing every post-burn-in snapshot to `observer`
    pub fn run_observed<M, O>(
        &self,
        scenario: &Scenario<M>,
        config: &IterationConfiguration,
        observer: &mut O,
    ) -> Result<ComplexResult, String>
    where
        M: ComplexMap + ?Sized,
        O: ComplexObserver + ?Sized,
    {
        // ====== Validation ======

        let (step_count, burn_in) = trajectory_budget(config, "ComplexEngine")?;
        scenario.validate()?;

        // ====== Setup ======

        let map = scenario.map.as_ref();
        let configuration = &scenario.configuration;
        let sweep = scenario.sweep.as_slice();
        let n = sweep.len();

        let mut state: DVector<Complex64> = scenario.initial.map(|z0| Complex64::new(z0, 0.0) + SEED_OFFSET);

        // reused by every retained step
        let mut real = vec![0.0; n];
        let mut imaginary = vec![0.0; n];
        let mut mirrored = vec![0.0; n];

        // ====== Iteration ======

        for step in 0..step_count {
            crate::engine::for_each_entry(state.as_mut_slice(), sweep, |z, r| {
                *z = map.evaluate_complex(*z, &configuration.at(r));
            });

            if step >= burn_in {
                for (k, z) in state.iter().enumerate() {
                    real[k] = z.re;
                    imaginary[k] = z.im;
                    mirrored[k] = -z.im;
                }
                observer.observe(step, sweep, &real, &imaginary, &mirrored);
            }
        }

        // ====== Result ======

        let non_finite = state.iter().filter(|z| !z.is_finite()).count();
        numeric::report_domain_error(scenario.get_map_name(), non_finite);

        let retained_steps = step_count - burn_in;
        debug!(
            "ComplexEngine: {} steps over {} entries, {} retained, {} non-finite",
            step_count, n, retained_steps, non_finite
        );

        let mut metadata = RunMetadata::new();
        metadata.add("engine", "Complex");
        metadata.add("map", scenario.get_map_name());
        metadata.add("steps", &step_count.to_string());
        metadata.add("burn-in", &burn_in.to_string());
        metadata.add("sweep entries", &n.to_string());
        metadata.add("seed offset", &SEED_OFFSET.to_string());

        Ok(ComplexResult { retained_steps, non_finite, metadata })
    }
}

impl<M: ComplexMap + ?Sized> Engine<M> for ComplexEngine {
    type Output = ComplexResult;

    fn run(&self, scenario: &Scenario<M>, config: &IterationConfiguration) -> Result<ComplexResult, String> {
        self.run_observed(scenario, config, &mut ())
    }

    fn name(&self) -> &'static str {
        "Complex"
    }
}
