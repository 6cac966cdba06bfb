//! Newton map of a quadratic polynomial
//!
//! Newton's method applied to `p(z) = z² + αz + β`:
//!
//! ```text
//! N(z)  = z - (z² + αz + β) / (2z + α)
//! N'(z) = 2(z² + αz + β) / (2z + α)²
//! ```
//!
//! The map is singular where `p'(z) = 0`, i.e. at `z = -α/2`. When the
//! discriminant `α² - 4β` is negative the polynomial has no real root and the
//! real iteration is chaotic, which is what the bifurcation diagrams explore.
//!
//! # Example
//!
//! ```rust
//! use bifurc_rs::maps::{IterativeMap, MapParameters};
//! use bifurc_rs::models::QuadraticNewton;
//!
//! let map = QuadraticNewton;
//! let params = MapParameters::new(1.0, 0.5);
//! assert_eq!(map.discontinuities(&params), vec![-0.5]);
//! ```

use num_complex::Complex64;

use crate::maps::{ComplexMap, DifferentiableMap, IterativeMap, MapParameters};

/// Newton map for `z² + αz + β`
#[derive(Debug, Clone, Copy, Default)]
pub struct QuadraticNewton;

impl QuadraticNewton {
    /// Create the map
    pub fn new() -> Self {
        Self
    }

    #[inline]
    fn polynomial(z: f64, params: &MapParameters) -> f64 {
        z * z + params.alpha * z + params.beta
    }
}

impl IterativeMap for QuadraticNewton {
    fn evaluate(&self, z: f64, params: &MapParameters) -> f64 {
        z - Self::polynomial(z, params) / (2.0 * z + params.alpha)
    }

    fn discontinuities(&self, params: &MapParameters) -> Vec<f64> {
        vec![-params.alpha / 2.0]
    }

    fn name(&self) -> &str {
        "Quadratic Newton"
    }

    fn description(&self) -> Option<&str> {
        Some("Newton map of z^2 + alpha z + beta")
    }
}

impl DifferentiableMap for QuadraticNewton {
    fn derivative(&self, z: f64, params: &MapParameters) -> f64 {
        let slope = 2.0 * z + params.alpha;
        2.0 * Self::polynomial(z, params) / (slope * slope)
    }
}

impl ComplexMap for QuadraticNewton {
    fn evaluate_complex(&self, z: Complex64, params: &MapParameters) -> Complex64 {
        let polynomial = z * z + z * params.alpha + params.beta;
        z - polynomial / (z * 2.0 + params.alpha)
    }
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_real_root_is_fixed_point() {
        // z² + 3z + 2 = (z + 1)(z + 2)
        let params = MapParameters::new(3.0, 2.0);
        let map = QuadraticNewton::new();
        assert_relative_eq!(map.evaluate(-1.0, &params), -1.0, epsilon = 1e-15);
        assert_relative_eq!(map.evaluate(-2.0, &params), -2.0, epsilon = 1e-15);
        // superattracting: derivative vanishes at a simple root
        assert_eq!(map.derivative(-1.0, &params), 0.0);
    }

    #[test]
    fn test_derivative_matches_finite_difference() {
        let params = MapParameters::new(1.0, 0.5);
        let map = QuadraticNewton::new();
        let h = 1e-6;
        for &z in &[-3.0, -1.2, 0.3, 2.0] {
            let numeric = (map.evaluate(z + h, &params) - map.evaluate(z - h, &params)) / (2.0 * h);
            assert_relative_eq!(numeric, map.derivative(z, &params), epsilon = 1e-5);
        }
    }

    #[test]
    fn test_singular_at_discontinuity() {
        let params = MapParameters::new(1.0, 0.5);
        let map = QuadraticNewton::new();
        let d = map.discontinuities(&params)[0];
        assert!(!map.evaluate(d, &params).is_finite());
        assert!(!map.derivative(d, &params).is_finite());
    }

    #[test]
    fn test_complex_agrees_on_real_axis() {
        let params = MapParameters::new(1.0, 0.5);
        let map = QuadraticNewton::new();
        let real = map.evaluate(0.7, &params);
        let complex = map.evaluate_complex(Complex64::new(0.7, 0.0), &params);
        assert_relative_eq!(complex.re, real, epsilon = 1e-14);
        assert_eq!(complex.im, 0.0);
    }

    #[test]
    fn test_complex_converges_to_complex_root() {
        // z² + z + 0.5 has roots (-1 ± i) / 2
        let params = MapParameters::new(1.0, 0.5);
        let map = QuadraticNewton::new();
        let mut z = Complex64::new(0.0, 1.0);
        for _ in 0..50 {
            z = map.evaluate_complex(z, &params);
        }
        assert_relative_eq!(z.re, -0.5, epsilon = 1e-12);
        assert_relative_eq!(z.im, 0.5, epsilon = 1e-12);
    }
}
