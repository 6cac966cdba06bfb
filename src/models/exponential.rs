//! Exponential map
//!
//! ```text
//! f(z)  = eᶻ (z - 1)
//! f'(z) = eᶻ z
//! ```
//!
//! Parameter-free and continuous everywhere.

use num_complex::Complex64;

use crate::maps::{ComplexMap, DifferentiableMap, IterativeMap, MapParameters};

/// `eᶻ (z - 1)`
#[derive(Debug, Clone, Copy, Default)]
pub struct Exponential;

impl Exponential {
    /// Create the map
    pub fn new() -> Self {
        Self
    }
}

impl IterativeMap for Exponential {
    fn evaluate(&self, z: f64, _params: &MapParameters) -> f64 {
        z.exp() * (z - 1.0)
    }

    fn discontinuities(&self, _params: &MapParameters) -> Vec<f64> {
        Vec::new()
    }

    fn name(&self) -> &str {
        "Exponential"
    }
}

impl DifferentiableMap for Exponential {
    fn derivative(&self, z: f64, _params: &MapParameters) -> f64 {
        z.exp() * z
    }
}

impl ComplexMap for Exponential {
    fn evaluate_complex(&self, z: Complex64, _params: &MapParameters) -> Complex64 {
        z.exp() * (z - 1.0)
    }
}
