//! Newton map of a depressed cubic
//!
//! Newton's method applied to `p(z) = z³ - αz`:
//!
//! ```text
//! N(z)  = 2z³ / (3z² - α)
//! N'(z) = (6z⁴ - 6αz²) / (3z² - α)²
//! ```
//!
//! Singular at `z = ±√(α/3)`; for `α < 0` there is no real singularity.

use num_complex::Complex64;

use crate::maps::{ComplexMap, DifferentiableMap, IterativeMap, MapParameters};

/// Newton map for `z³ - αz`
#[derive(Debug, Clone, Copy, Default)]
pub struct CubicNewton;

impl CubicNewton {
    /// Create the map
    pub fn new() -> Self {
        Self
    }
}

impl IterativeMap for CubicNewton {
    fn evaluate(&self, z: f64, params: &MapParameters) -> f64 {
        2.0 * z.powi(3) / (3.0 * z * z - params.alpha)
    }

    fn discontinuities(&self, params: &MapParameters) -> Vec<f64> {
        if params.alpha < 0.0 {
            return Vec::new();
        }
        let root = (params.alpha / 3.0).sqrt();
        if root == 0.0 {
            vec![0.0]
        } else {
            vec![-root, root]
        }
    }

    fn name(&self) -> &str {
        "Cubic Newton"
    }
}

impl DifferentiableMap for CubicNewton {
    fn derivative(&self, z: f64, params: &MapParameters) -> f64 {
        let z2 = z * z;
        let denominator = 3.0 * z2 - params.alpha;
        (6.0 * z2 * z2 - 6.0 * params.alpha * z2) / (denominator * denominator)
    }
}

impl ComplexMap for CubicNewton {
    fn evaluate_complex(&self, z: Complex64, params: &MapParameters) -> Complex64 {
        z.powi(3) * 2.0 / (z * z * 3.0 - params.alpha)
    }
}
