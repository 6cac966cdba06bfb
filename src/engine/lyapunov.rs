//! Lyapunov exponent accumulation
//!
//! ```text
//! λ(r) = 1/(n - b) · Σ_{i=b}^{n-1} ln |f'(z_{i+1}(r))|
//! ```
//!
//! where `z_{i+1}` is the state right after step `i`, `n` the step count and
//! `b` the burn-in. A derivative of exactly zero gives `ln 0 = -inf`, which is
//! kept: the exponent of that entry becomes `-inf` (or NaN if `+inf` terms are
//! also met). Neither case is an error, and neither is logged: every term is
//! formed inside a [`NumericErrorGuard`] scope.

use nalgebra::DVector;

use crate::maps::{DifferentiableMap, MapConfiguration};

use super::numeric::{self, NumericErrorGuard};

/// Running element-wise sum of `ln |f'(z)|`
#[derive(Debug, Clone)]
pub struct LyapunovAccumulator {
    sum: DVector<f64>,
    steps: usize,
    non_finite: usize,
}

impl LyapunovAccumulator {
    /// Zeroed accumulator for `len` sweep entries
    pub fn new(len: usize) -> Self {
        Self { sum: DVector::zeros(len), steps: 0, non_finite: 0 }
    }

    /// Add one post-burn-in step
    ///
    /// `state` is the iterate right after the step; the derivative is taken
    /// there. Domain errors are silenced for the duration of the call.
    pub fn accumulate<M: DifferentiableMap + ?Sized>(
        &mut self,
        map: &M,
        configuration: &MapConfiguration,
        sweep: &[f64],
        state: &[f64],
    ) {
        let _quiet = NumericErrorGuard::suppress();

        super::for_each_entry_with(self.sum.as_mut_slice(), state, sweep, |sum, z, r| {
            *sum += map.derivative(z, &configuration.at(r)).abs().ln();
        });
        self.steps += 1;

        // a non-finite sum stays non-finite, so the difference is this step's share
        let non_finite = super::count_non_finite(self.sum.as_slice());
        numeric::report_domain_error("Lyapunov sum", non_finite.saturating_sub(self.non_finite));
        self.non_finite = non_finite;
    }

    /// Steps accumulated so far
    pub fn steps(&self) -> usize {
        self.steps
    }

    /// Divide by the number of accumulated steps
    ///
    /// An accumulator that saw no step yields NaN everywhere. Non-finite
    /// exponents were already accounted for while accumulating and are not
    /// reported again.
    pub fn finish(self, sweep: &[f64]) -> LyapunovExponent {
        let steps = self.steps as f64;
        LyapunovExponent {
            parameters: DVector::from_column_slice(sweep),
            exponents: self.sum.map(|s| s / steps),
        }
    }
}

/// Lyapunov exponent per sweep entry
#[derive(Debug, Clone, PartialEq)]
pub struct LyapunovExponent {
    /// Sweep values
    pub parameters: DVector<f64>,

    /// Exponent for each sweep value
    pub exponents: DVector<f64>,
}

impl LyapunovExponent {
    /// Number of entries (N)
    pub fn len(&self) -> usize {
        self.exponents.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.exponents.is_empty()
    }

    /// Whether entry `index` is chaotic (strictly positive exponent)
    pub fn is_chaotic(&self, index: usize) -> bool {
        self.exponents[index] > 0.0
    }

    /// Split `(parameter, exponent)` points into stable (`<= 0`) and chaotic (`> 0`)
    ///
    /// NaN entries belong to neither side.
    pub fn partition(&self) -> (Vec<(f64, f64)>, Vec<(f64, f64)>) {
        let mut stable = Vec::new();
        let mut chaotic = Vec::new();
        for (&r, &l) in self.parameters.iter().zip(self.exponents.iter()) {
            if l > 0.0 {
                chaotic.push((r, l));
            } else if l <= 0.0 {
                stable.push((r, l));
            }
        }
        (stable, chaotic)
    }

    /// Number of NaN or infinite exponents
    pub fn non_finite(&self) -> usize {
        super::count_non_finite(self.exponents.as_slice())
    }
}
