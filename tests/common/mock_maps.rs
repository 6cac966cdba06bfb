//! Mock maps for testing
//!
//! These maps have known dynamics, which makes engine output predictable.

use bifurc_rs::maps::{ComplexMap, DifferentiableMap, IterativeMap, MapParameters};
use num_complex::Complex64;

// =================================================================================================
// Linear: f(z) = α z
// =================================================================================================

/// Linear map `f(z) = α z`
///
/// The derivative is constant, so the Lyapunov exponent is exactly `ln|α|`
/// whatever the trajectory.
pub struct Linear;

impl Linear {
    pub fn analytical_exponent(alpha: f64) -> f64 {
        alpha.abs().ln()
    }
}

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

impl ComplexMap for Linear {
    fn evaluate_complex(&self, z: Complex64, params: &MapParameters) -> Complex64 {
        z * params.alpha
    }
}

// =================================================================================================
// Logistic: f(z) = α z (1 - z)
// =================================================================================================

/// Logistic map `f(z) = α z (1 - z)`
///
/// Orbits of `[0, 1]` stay in `[0, 1]` for `α ∈ [0, 4]`.
pub struct Logistic;

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
        z * (Complex64::new(1.0, 0.0) - z) * params.alpha
    }
}

// =================================================================================================
// Reciprocal: f(z) = α / z
// =================================================================================================

/// Reciprocal map `f(z) = α / z`, pole at 0
pub struct Reciprocal;

impl IterativeMap for Reciprocal {
    fn evaluate(&self, z: f64, params: &MapParameters) -> f64 {
        params.alpha / z
    }

    fn discontinuities(&self, _params: &MapParameters) -> Vec<f64> {
        vec![0.0]
    }

    fn name(&self) -> &str {
        "Reciprocal"
    }
}
