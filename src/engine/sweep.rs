//! Parameter sweep
//!
//! The x-axis of every diagram: the ordered values taken by the designated
//! variable parameter, one per state-vector entry.

use nalgebra::DVector;

/// Ordered values of the swept parameter
///
/// # Examples
///
/// ```rust
/// use bifurc_rs::engine::ParameterSweep;
///
/// // half-open range, like the original study scripts: 0.3, 0.35, ..., 0.45
/// let sweep = ParameterSweep::arange(0.3, 0.5, 0.05).unwrap();
/// assert_eq!(sweep.len(), 4);
///
/// // inclusive, fixed number of points
/// let sweep = ParameterSweep::linspace(1.0, 2.0, 11).unwrap();
/// assert_eq!(sweep.values()[10], 2.0);
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ParameterSweep {
    values: DVector<f64>,
}

impl ParameterSweep {
    /// Create from explicit values
    pub fn new(values: Vec<f64>) -> Result<Self, String> {
        let sweep = Self { values: DVector::from_vec(values) };
        sweep.validate()?;
        Ok(sweep)
    }

    /// `start, start + step, ...` strictly below `stop`
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, String> {
        Self::new(arange(start, stop, step)?)
    }

    /// `count` evenly spaced values from `start` to `stop` inclusive
    pub fn linspace(start: f64, stop: f64, count: usize) -> Result<Self, String> {
        Self::new(linspace(start, stop, count)?)
    }

    /// Single-valued sweep
    pub fn single(value: f64) -> Result<Self, String> {
        Self::new(vec![value])
    }

    /// Sweep values
    pub fn values(&self) -> &DVector<f64> {
        &self.values
    }

    /// Sweep values as a slice
    pub fn as_slice(&self) -> &[f64] {
        self.values.as_slice()
    }

    /// Number of sweep entries (N)
    pub fn len(&self) -> usize {
        self.values.len()
    }

    /// Check emptiness (never true for a validated sweep)
    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Smallest and largest values
    pub fn range(&self) -> (f64, f64) {
        (self.values.min(), self.values.max())
    }

    /// Reject empty sweeps and non-finite values
    pub fn validate(&self) -> Result<(), String> {
        if self.values.is_empty() {
            return Err("Parameter sweep must not be empty".to_string());
        }
        if let Some(position) = self.values.iter().position(|v| !v.is_finite()) {
            return Err(format!(
                "Parameter sweep value at index {} is not finite ({})",
                position, self.values[position]
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Helper Functions
// =================================================================================================

/// Longest range [`arange`] will build (800 MB of `f64`)
pub(crate) const MAX_RANGE_LENGTH: usize = 100_000_000;

/// Half-open range `[start, stop)` with a fixed step
///
/// The length is `ceil((stop - start) / step)` and values are computed from
/// the index (`start + i * step`), not accumulated, so long ranges do not drift.
/// Ranges longer than [`MAX_RANGE_LENGTH`] are rejected.
pub(crate) fn arange(start: f64, stop: f64, step: f64) -> Result<Vec<f64>, String> {
    if !start.is_finite() || !stop.is_finite() || !step.is_finite() {
        return Err(format!(
            "Range bounds must be finite, got start = {}, stop = {}, step = {}",
            start, stop, step
        ));
    }
    if step <= 0.0 {
        return Err(format!("Range step must be positive, got {}", step));
    }
    if stop <= start {
        return Err(format!("Empty range: stop ({}) <= start ({})", stop, start));
    }

    let count = ((stop - start) / step).ceil();
    if count > MAX_RANGE_LENGTH as f64 {
        return Err(format!(
            "Range [{}, {}) with step {} would hold {:e} values, more than the limit of {}",
            start, stop, step, count, MAX_RANGE_LENGTH
        ));
    }
    let count = count as usize;
    Ok((0..count).map(|i| start + i as f64 * step).collect())
}

/// `count` evenly spaced values over `[start, stop]`
pub(crate) fn linspace(start: f64, stop: f64, count: usize) -> Result<Vec<f64>, String> {
    if !start.is_finite() || !stop.is_finite() {
        return Err(format!("Range bounds must be finite, got {} and {}", start, stop));
    }
    match count {
        0 => Err("Need at least one point".to_string()),
        1 => Ok(vec![start]),
        _ => {
            let step = (stop - start) / (count - 1) as f64;
            let mut values: Vec<f64> = (0..count).map(|i| start + i as f64 * step).collect();
            // pin the end point exactly
            values[count - 1] = stop;
            Ok(values)
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_arange_length_and_values() {
        let values = arange(0.0, 1.0, 0.25).unwrap();
        assert_eq!(values, vec![0.0, 0.25, 0.5, 0.75]);

        // stop not on the grid
        let values = arange(0.0, 1.1, 0.5).unwrap();
        assert_eq!(values, vec![0.0, 0.5, 1.0]);
    }

    #[test]
    fn test_arange_rejects_bad_input() {
        assert!(arange(0.0, 1.0, 0.0).is_err());
        assert!(arange(0.0, 1.0, -0.1).is_err());
        assert!(arange(1.0, 1.0, 0.1).is_err());
        assert!(arange(f64::NAN, 1.0, 0.1).is_err());
    }

    #[test]
    fn test_arange_rejects_oversized_range() {
        let err = arange(0.0, 1.0, 1e-12).unwrap_err();
        assert!(err.contains("more than the limit"), "{}", err);

        // the quotient itself overflows to +inf
        assert!(ParameterSweep::arange(-1e308, 1e308, 1e-300).is_err());
        assert!(crate::engine::BinEdges::arange(-5.0, 2.0, 1e-9).is_err());
    }

    #[test]
    fn test_linspace_endpoints() {
        let values = linspace(-1.0, 1.0, 5).unwrap();
        assert_eq!(values, vec![-1.0, -0.5, 0.0, 0.5, 1.0]);
        assert_eq!(linspace(3.0, 4.0, 1).unwrap(), vec![3.0]);
        assert!(linspace(0.0, 1.0, 0).is_err());
    }

    #[test]
    fn test_sweep_rejects_empty_and_nan() {
        assert!(ParameterSweep::new(vec![]).is_err());
        let err = ParameterSweep::new(vec![0.1, f64::INFINITY]).unwrap_err();
        assert!(err.contains("index 1"));
    }

    #[test]
    fn test_sweep_range() {
        let sweep = ParameterSweep::new(vec![0.5, -1.0, 2.0]).unwrap();
        assert_eq!(sweep.range(), (-1.0, 2.0));
        assert_eq!(sweep.len(), 3);
        assert_eq!(sweep.as_slice()[0], 0.5);
    }
}
