//! Helper functions for integration tests

use bifurc_rs::engine::{ParameterSweep, Scenario, parallel_threshold, set_parallel_threshold};
use bifurc_rs::maps::{IterativeMap, MapConfiguration};
use ndarray::Array2;

/// Scenario sweeping α over `[start, stop]` with `n` entries, all starting at `z0`
pub fn create_uniform_scenario<M: IterativeMap>(
    map: M,
    start: f64,
    stop: f64,
    n: usize,
    z0: f64,
) -> Scenario<M> {
    let sweep = ParameterSweep::linspace(start, stop, n).expect("valid sweep");
    Scenario::uniform(Box::new(map), MapConfiguration::sweep_alpha(0.0), sweep, z0)
}

/// Assert that two slices hold the same bits (NaN included)
pub fn assert_bit_identical(a: &[f64], b: &[f64], message: &str) {
    assert_eq!(a.len(), b.len(), "{}: Dimension mismatch", message);
    for (i, (x, y)) in a.iter().zip(b.iter()).enumerate() {
        assert_eq!(
            x.to_bits(),
            y.to_bits(),
            "{}: Element {} differs ({} vs {})",
            message,
            i,
            x,
            y
        );
    }
}

/// Sum of every finite cell
pub fn grid_sum(grid: &Array2<f64>) -> f64 {
    grid.iter().filter(|v| v.is_finite()).sum()
}

/// Sets the parallel threshold and restores the previous value on drop,
/// panics included
pub struct ThresholdOverride {
    previous: usize,
}

impl ThresholdOverride {
    pub fn set(threshold: usize) -> Self {
        let previous = parallel_threshold();
        set_parallel_threshold(threshold);
        Self { previous }
    }
}

impl Drop for ThresholdOverride {
    fn drop(&mut self) {
        set_parallel_threshold(self.previous);
    }
}
