//! Common utilities for integration tests

pub mod mock_maps;
pub mod test_helpers;

// Re-export commonly used items
pub use mock_maps::{Linear, Logistic, Reciprocal};
pub use test_helpers::{ThresholdOverride, assert_bit_identical, create_uniform_scenario, grid_sum};
