//! Real bifurcation engine
//!
//! # Algorithm
//!
//! ```text
//! z ← z0                                  (one entry per sweep value r)
//! for i in 0..n:
//!     z ← f(z; r)                         (all entries, in parallel)
//!     if i ≥ b:
//!         observe(i, r, z)                (scatter point of the diagram)
//!         S ← S + ln |f'(z; r)|           (Lyapunov sum, optional)
//! λ ← S / (n - b)
//! ```
//!
//! Steps run strictly in sequence; only the entries of one step are
//! independent. The state vector lives for one run and is dropped at its end.

use log::debug;

use crate::engine::lyapunov::{LyapunovAccumulator, LyapunovExponent};
use crate::engine::numeric;
use crate::engine::observer::TrajectoryObserver;
use crate::engine::{Engine, IterationConfiguration, RunMetadata, Scenario};
use crate::maps::{DifferentiableMap, IterativeMap};

use super::trajectory_budget;

// =================================================================================================
// Result
// =================================================================================================

/// Output of a [`BifurcationEngine`] run
#[derive(Debug, Clone)]
pub struct BifurcationResult {
    /// Lyapunov exponent per sweep entry (`None` for scatter-only runs)
    pub lyapunov: Option<LyapunovExponent>,

    /// Steps handed to the observer (`step_count - burn_in`)
    pub retained_steps: usize,

    /// Entries whose final iterate is NaN or infinite
    pub non_finite: usize,

    /// Run diagnostics
    pub metadata: RunMetadata,
}

impl BifurcationResult {
    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.add(key, value);
    }
}

// =================================================================================================
// Engine
// =================================================================================================

/// Vectorized real iteration engine with optional Lyapunov accumulation
///
/// # Capabilities
///
/// - [`BifurcationEngine::new`] accumulates Lyapunov exponents and therefore
///   needs a [`DifferentiableMap`]; use it through [`Engine::run`] or
///   [`run_observed`](Self::run_observed).
/// - [`BifurcationEngine::scatter_only`] only iterates and works with any
///   [`IterativeMap`] through [`scan`](Self::scan).
///
/// # Example
///
/// ```rust
/// use bifurc_rs::engine::{BifurcationEngine, IterationConfiguration, ParameterSweep, Scenario, ScatterSeries};
/// use bifurc_rs::maps::MapConfiguration;
/// use bifurc_rs::models::QuadraticNewton;
///
/// let scenario = Scenario::uniform(
///     Box::new(QuadraticNewton),
///     MapConfiguration::sweep_alpha(0.5),
///     ParameterSweep::linspace(0.5, 2.0, 20).unwrap(),
///     0.3,
/// );
/// let config = IterationConfiguration::trajectory(100, 20);
///
/// let mut scatter = ScatterSeries::new();
/// let result = BifurcationEngine::new()
///     .run_observed(&scenario, &config, &mut scatter)
///     .unwrap();
///
/// assert_eq!(result.retained_steps, 80);
/// assert_eq!(scatter.snapshots, 80);
/// ```
#[derive(Debug, Clone, Copy)]
pub struct BifurcationEngine {
    lyapunov: bool,
}

impl Default for BifurcationEngine {
    fn default() -> Self {
        Self::new()
    }
}

impl BifurcationEngine {
    /// Engine accumulating Lyapunov exponents
    pub fn new() -> Self {
        Self { lyapunov: true }
    }

    /// Engine producing trajectories only
    pub fn scatter_only() -> Self {
        Self { lyapunov: false }
    }

    /// Whether Lyapunov exponents are accumulated
    pub fn computes_lyapunov(&self) -> bool {
        self.lyapunov
    }

    /// Engine name
    pub fn name(&self) -> &'static str {
        if self.lyapunov { "Bifurcation + Lyapunov" } else { "Bifurcation" }
    }

    /// Run, handing every post-burn-in snapshot to `observer`
    pub fn run_observed<M, O>(
        &self,
        scenario: &Scenario<M>,
        config: &IterationConfiguration,
        observer: &mut O,
    ) -> Result<BifurcationResult, String>
    where
        M: DifferentiableMap + ?Sized,
        O: TrajectoryObserver + ?Sized,
    {
        let (step_count, burn_in) = trajectory_budget(config, "BifurcationEngine")?;
        scenario.validate()?;

        if !self.lyapunov {
            return Ok(self.iterate(scenario, step_count, burn_in, observer));
        }

        let mut accumulator = LyapunovAccumulator::new(scenario.len());
        let mut result = {
            let mut observe = |step: usize, sweep: &[f64], state: &[f64]| {
                accumulator.accumulate(scenario.map.as_ref(), &scenario.configuration, sweep, state);
                observer.observe(step, sweep, state);
            };
            self.iterate(scenario, step_count, burn_in, &mut observe)
        };

        let exponent = accumulator.finish(scenario.sweep.as_slice());
        result.add_metadata("non-finite exponents", &exponent.non_finite().to_string());
        result.lyapunov = Some(exponent);
        Ok(result)
    }

    /// Scatter-only run over a map without derivative
    ///
    /// Fails on an engine built with [`new`](Self::new): the Lyapunov sum
    /// cannot be formed without `f'`.
    pub fn scan<M, O>(
        &self,
        scenario: &Scenario<M>,
        config: &IterationConfiguration,
        observer: &mut O,
    ) -> Result<BifurcationResult, String>
    where
        M: IterativeMap + ?Sized,
        O: TrajectoryObserver + ?Sized,
    {
        if self.lyapunov {
            return Err(format!(
                "Lyapunov accumulation needs a differentiable map ({} has no derivative here); \
                 use BifurcationEngine::scatter_only()",
                scenario.get_map_name()
            ));
        }
        let (step_count, burn_in) = trajectory_budget(config, "BifurcationEngine")?;
        scenario.validate()?;
        Ok(self.iterate(scenario, step_count, burn_in, observer))
    }

    /// Stepping loop shared by both modes
    fn iterate<M, O>(
        &self,
        scenario: &Scenario<M>,
        step_count: usize,
        burn_in: usize,
        observer: &mut O,
    ) -> BifurcationResult
    where
        M: IterativeMap + ?Sized,
        O: TrajectoryObserver + ?Sized,
    {
        // ====== Setup ======

        let map = scenario.map.as_ref();
        let configuration = &scenario.configuration;
        let sweep = scenario.sweep.as_slice();
        let mut state = scenario.initial.clone();

        // ====== Iteration ======

        for step in 0..step_count {
            crate::engine::for_each_entry(state.as_mut_slice(), sweep, |z, r| {
                *z = map.evaluate(*z, &configuration.at(r));
            });

            if step >= burn_in {
                observer.observe(step, sweep, state.as_slice());
            }
        }

        // ====== Result ======

        let non_finite = crate::engine::count_non_finite(state.as_slice());
        numeric::report_domain_error(scenario.get_map_name(), non_finite);

        let retained_steps = step_count - burn_in;
        debug!(
            "{}: {} steps over {} entries, {} retained, {} non-finite",
            self.name(),
            step_count,
            sweep.len(),
            retained_steps,
            non_finite
        );

        let mut result = BifurcationResult {
            lyapunov: None,
            retained_steps,
            non_finite,
            metadata: RunMetadata::new(),
        };
        result.add_metadata("engine", self.name());
        result.add_metadata("map", scenario.get_map_name());
        result.add_metadata("variable", scenario.configuration.variable().name());
        result.add_metadata("steps", &step_count.to_string());
        result.add_metadata("burn-in", &burn_in.to_string());
        result.add_metadata("sweep entries", &sweep.len().to_string());
        result.add_metadata("non-finite states", &non_finite.to_string());

        result
    }
}

impl<M: DifferentiableMap + ?Sized> Engine<M> for BifurcationEngine {
    type Output = BifurcationResult;

    fn run(&self, scenario: &Scenario<M>, config: &IterationConfiguration) -> Result<BifurcationResult, String> {
        self.run_observed(scenario, config, &mut ())
    }

    fn name(&self) -> &'static str {
        BifurcationEngine::name(self)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;
    use crate::engine::numeric::capture;
    use crate::engine::{ParameterSweep, ScatterSeries};
    use crate::maps::{MapConfiguration, MapParameters};

    /// f(z) = r z (1 - z), no derivative on purpose
    struct Logistic;

    impl IterativeMap for Logistic {
        fn evaluate(&self, z: f64, params: &MapParameters) -> f64 {
            params.alpha * z * (1.0 - z)
        }

        fn discontinuities(&self, _params: &MapParameters) -> Vec<f64> {
            Vec::new()
        }

        fn name(&self) -> &str {
            "Logistic"
        }
    }

    /// f(z) = r z, f'(z) = r
    struct Linear;

    impl IterativeMap for Linear {
        fn evaluate(&self, z: f64, params: &MapParameters) -> f64 {
            params.alpha * z
        }

        fn discontinuities(&self, _params: &MapParameters) -> Vec<f64> {
            Vec::new()
        }

        fn name(&self) -> &str {
            "Linear"
        }
    }

    impl DifferentiableMap for Linear {
        fn derivative(&self, _z: f64, params: &MapParameters) -> f64 {
            params.alpha
        }
    }

    fn linear_scenario() -> Scenario<Linear> {
        Scenario::uniform(
            Box::new(Linear),
            MapConfiguration::sweep_alpha(0.0),
            ParameterSweep::new(vec![0.5, 1.0, 3.0]).unwrap(),
            1.0,
        )
    }

    #[test]
    fn test_zero_derivative_is_not_reported() {
        capture::install();

        // α = 0: f' = 0 at every step, ln 0 = -inf
        let scenario = Scenario::uniform(
            Box::new(Linear),
            MapConfiguration::sweep_alpha(0.0),
            ParameterSweep::new(vec![0.0, 2.0]).unwrap(),
            1.0,
        );
        let (result, warnings) = capture::warnings_during(|| {
            BifurcationEngine::new()
                .run(&scenario, &IterationConfiguration::trajectory(4, 0))
                .unwrap()
        });

        let lyapunov = result.lyapunov.unwrap();
        assert_eq!(lyapunov.exponents[0], f64::NEG_INFINITY);
        assert_relative_eq!(lyapunov.exponents[1], 2.0f64.ln(), epsilon = 1e-12);
        assert_eq!(result.metadata.get("non-finite exponents"), Some("1"));
        assert!(warnings.is_empty(), "unexpected warnings: {:?}", warnings);
    }

    #[test]
    fn test_overflowing_state_is_reported() {
        capture::install();

        let scenario = Scenario::uniform(
            Box::new(Linear),
            MapConfiguration::sweep_alpha(0.0),
            ParameterSweep::new(vec![1e200]).unwrap(),
            1e200,
        );
        let (result, warnings) = capture::warnings_during(|| {
            BifurcationEngine::new()
                .run(&scenario, &IterationConfiguration::trajectory(3, 0))
                .unwrap()
        });

        assert_eq!(result.non_finite, 1);
        assert_eq!(warnings, vec!["Linear: 1 non-finite value(s) encountered".to_string()]);
    }

    #[test]
    fn test_lyapunov_of_linear_map() {
        let scenario = linear_scenario();
        let config = IterationConfiguration::trajectory(10, 4);
        let result = BifurcationEngine::new().run(&scenario, &config).unwrap();

        let lyapunov = result.lyapunov.unwrap();
        assert_eq!(lyapunov.len(), 3);
        assert_relative_eq!(lyapunov.exponents[0], 0.5f64.ln(), epsilon = 1e-12);
        assert_eq!(lyapunov.exponents[1], 0.0);
        assert_relative_eq!(lyapunov.exponents[2], 3.0f64.ln(), epsilon = 1e-12);
        assert_eq!(result.retained_steps, 6);
        assert_eq!(result.metadata.get("burn-in"), Some("4"));
    }

    #[test]
    fn test_observer_sees_post_burn_in_states() {
        let scenario = linear_scenario();
        let config = IterationConfiguration::trajectory(3, 1);

        let mut seen = Vec::new();
        let mut observer = |step: usize, _: &[f64], state: &[f64]| seen.push((step, state[2]));
        BifurcationEngine::new().run_observed(&scenario, &config, &mut observer).unwrap();

        // z after step i is 3^(i+1)
        assert_eq!(seen, vec![(1, 9.0), (2, 27.0)]);
    }

    #[test]
    fn test_scatter_only_without_derivative() {
        let scenario = Scenario::uniform(
            Box::new(Logistic),
            MapConfiguration::sweep_alpha(0.0),
            ParameterSweep::linspace(2.5, 3.9, 15).unwrap(),
            0.5,
        );
        let config = IterationConfiguration::trajectory(50, 10);

        let mut scatter = ScatterSeries::new();
        let result = BifurcationEngine::scatter_only().scan(&scenario, &config, &mut scatter).unwrap();

        assert!(result.lyapunov.is_none());
        assert_eq!(scatter.snapshots, 40);
        assert_eq!(scatter.len(), 40 * 15);
    }

    #[test]
    fn test_scan_requires_scatter_only() {
        let scenario = Scenario::uniform(
            Box::new(Logistic),
            MapConfiguration::sweep_alpha(0.0),
            ParameterSweep::single(3.0).unwrap(),
            0.5,
        );
        let config = IterationConfiguration::trajectory(5, 0);
        let err = BifurcationEngine::new().scan(&scenario, &config, &mut ()).unwrap_err();
        assert!(err.contains("scatter_only"));
    }

    #[test]
    fn test_rejects_wrong_schedule() {
        let scenario = linear_scenario();
        let err = BifurcationEngine::new()
            .run(&scenario, &IterationConfiguration::cobweb(10))
            .unwrap_err();
        assert!(err.contains("only supports Trajectory"));
    }

    #[test]
    fn test_rejects_burn_in_before_iterating() {
        let scenario = linear_scenario();
        let mut calls = 0;
        let mut observer = |_: usize, _: &[f64], _: &[f64]| calls += 1;
        let result = BifurcationEngine::new().run_observed(
            &scenario,
            &IterationConfiguration::trajectory(5, 5),
            &mut observer,
        );
        assert!(result.is_err());
        assert_eq!(calls, 0);
    }
}
