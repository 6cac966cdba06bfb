//! General polynomial family
//!
//! ```text
//! f(z)  = α/(α+1) · (z + 1/z - (α-1)/α)
//! f'(z) = α/(α+1) · (1 - 1/z²)
//! ```
//!
//! Singular at `z = 0`. This is the map behind the original density plot
//! (`r ∈ [0.3, 0.5]`).

use num_complex::Complex64;

use crate::maps::{ComplexMap, DifferentiableMap, IterativeMap, MapParameters};

/// `α/(α+1) · (z + 1/z - (α-1)/α)`
#[derive(Debug, Clone, Copy, Default)]
pub struct GeneralPolynomial;

impl GeneralPolynomial {
    /// Create the map
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn gain(alpha: f64) -> f64 {
        alpha / (alpha + 1.0)
    }
}

impl IterativeMap for GeneralPolynomial {
    #[inline]
    fn evaluate(&self, z: f64, params: &MapParameters) -> f64 {
        let alpha = params.alpha;
        Self::gain(alpha) * (z + 1.0 / z - (alpha - 1.0) / alpha)
    }

    fn discontinuities(&self, _params: &MapParameters) -> Vec<f64> {
        vec![0.0]
    }

    fn name(&self) -> &str {
        "General Polynomial"
    }
}

impl DifferentiableMap for GeneralPolynomial {
    fn derivative(&self, z: f64, params: &MapParameters) -> f64 {
        Self::gain(params.alpha) * (1.0 - 1.0 / (z * z))
    }
}

impl ComplexMap for GeneralPolynomial {
    fn evaluate_complex(&self, z: Complex64, params: &MapParameters) -> Complex64 {
        let alpha = params.alpha;
        (z + z.inv() - (alpha - 1.0) / alpha) * Self::gain(alpha)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_known_value() {
        // α = 1: f(z) = (z + 1/z) / 2
        let params = MapParameters::alpha(1.0);
        assert_eq!(GeneralPolynomial.evaluate(2.0, &params), 1.25);
        assert_eq!(GeneralPolynomial.derivative(1.0, &params), 0.0);
    }

    #[test]
    fn test_zero_is_singular() {
        let params = MapParameters::alpha(0.4);
        assert_eq!(GeneralPolynomial.discontinuities(&params), vec![0.0]);
        assert!(GeneralPolynomial.evaluate(0.0, &params).is_infinite());
        assert!(GeneralPolynomial.derivative(0.0, &params).is_infinite());
    }

    #[test]
    fn test_complex_agrees_on_real_axis() {
        let params = MapParameters::alpha(0.4);
        let z = 0.75;
        let c = GeneralPolynomial.evaluate_complex(Complex64::new(z, 0.0), &params);
        assert_relative_eq!(c.re, GeneralPolynomial.evaluate(z, &params), epsilon = 1e-14);
    }
}
