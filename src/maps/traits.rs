//! Map capability traits
//!
//! This module defines the plug-in contract consumed by the engines:
//! - `IterativeMap`: evaluation and discontinuity set (mandatory)
//! - `DifferentiableMap`: derivative, needed for Lyapunov exponents
//! - `ComplexMap`: evaluation over complex state
//! - `AnalyticMap`: all of the above, usable as a single trait object

use num_complex::Complex64;

use super::parameters::MapParameters;

// =================================================================================================
// Iterative Map Trait
// =================================================================================================

/// Trait for one-parameter iterative maps `z ↦ f(z; params)`
///
/// # Responsibility
/// Evaluates the map at a single point. Does NOT iterate it (that's the
/// engine's job) and does not know about sweeps: the engine hands each
/// evaluation the parameter record of the sweep entry being advanced.
///
/// # Numerical singularities
/// Evaluating at or near a discontinuity may return `±inf` or `NaN`.
/// This is expected and must not panic; engines propagate such values.
///
/// # Optional capabilities
/// Derivatives and complex evaluation are separate traits
/// ([`DifferentiableMap`], [`ComplexMap`]) so that engines only demand what
/// they use.
pub trait IterativeMap: Send + Sync {
    /// Evaluate `f(z)`
    fn evaluate(&self, z: f64, params: &MapParameters) -> f64;

    /// Real values near which `f` is discontinuous
    ///
    /// Used to gap plotted curves so that no line is drawn across an
    /// asymptote. Must be sorted in increasing order.
    fn discontinuities(&self, params: &MapParameters) -> Vec<f64>;

    /// Name of the map (used to display and logging)
    fn name(&self) -> &str;

    /// Description of the map (option)
    fn description(&self) -> Option<&str> {
        None
    }
}

/// Maps with a closed-form derivative `f'(z)`
///
/// Required by the Lyapunov accumulator.
pub trait DifferentiableMap: IterativeMap {
    /// Evaluate `f'(z)`
    fn derivative(&self, z: f64, params: &MapParameters) -> f64;
}

/// Maps that extend to the complex plane
pub trait ComplexMap: IterativeMap {
    /// Evaluate `f(z)` for complex `z`
    fn evaluate_complex(&self, z: Complex64, params: &MapParameters) -> Complex64;
}

/// Maps offering every capability
///
/// Implemented automatically; lets a single `Box<dyn AnalyticMap>` drive all
/// the engines.
pub trait AnalyticMap: DifferentiableMap + ComplexMap {}

impl<T: DifferentiableMap + ComplexMap + ?Sized> AnalyticMap for T {}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;

    /// f(z) = r·z·(1 - z), the logistic map
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

    impl DifferentiableMap for Logistic {
        fn derivative(&self, z: f64, params: &MapParameters) -> f64 {
            params.alpha * (1.0 - 2.0 * z)
        }
    }

    impl ComplexMap for Logistic {
        fn evaluate_complex(&self, z: Complex64, params: &MapParameters) -> Complex64 {
            z * (1.0 - z) * params.alpha
        }
    }

    #[test]
    fn test_blanket_analytic_map() {
        let map: Box<dyn AnalyticMap> = Box::new(Logistic);
        let params = MapParameters::alpha(4.0);

        assert_eq!(map.evaluate(0.5, &params), 1.0);
        assert_eq!(map.derivative(0.5, &params), 0.0);
        assert_eq!(map.evaluate_complex(Complex64::new(0.5, 0.0), &params).re, 1.0);
        assert!(map.discontinuities(&params).is_empty());
        assert!(map.description().is_none());
        assert_eq!(map.name(), "Logistic");
    }
}
