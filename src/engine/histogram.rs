//! Density histogram
//!
//! Occupation density of iterate values over a parameter sweep:
//!
//! - [`BinEdges`]: strictly increasing edges, histogram semantics of NumPy
//!   (half-open bins, last bin closed, anything else dropped)
//! - [`DensityAccumulator`]: mutable `(n_bins, N)` count grid fed chunk by chunk
//! - [`DensityHistogram`]: immutable, post-processed grid handed to renderers
//!   and persistence
//!
//! Rows are stored with the bin order reversed: row 0 holds the highest
//! values, so the grid reads top-down like the picture it becomes.

use nalgebra::DVector;
use ndarray::{Array2, ArrayView2};

use super::numeric;
use super::sweep::{self, ParameterSweep};
use super::traits::{DEFAULT_WARM_UP, IterationConfiguration, RunMetadata};

// =================================================================================================
// Bin edges
// =================================================================================================

/// Histogram bin edges
///
/// # Examples
///
/// ```rust
/// use bifurc_rs::engine::BinEdges;
///
/// let edges = BinEdges::new(vec![0.0, 1.0, 2.0]).unwrap();
/// assert_eq!(edges.n_bins(), 2);
/// assert_eq!(edges.bin_index(0.5), Some(0));
/// assert_eq!(edges.bin_index(1.0), Some(1));
/// assert_eq!(edges.bin_index(2.0), Some(1)); // last bin is closed
/// assert_eq!(edges.bin_index(2.5), None);
///
/// assert!(BinEdges::new(vec![0.0, 1.0, 1.0]).is_err());
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct BinEdges {
    edges: Vec<f64>,
}

impl BinEdges {
    /// Create from explicit edges
    ///
    /// Requires at least two finite, strictly increasing values.
    pub fn new(edges: Vec<f64>) -> Result<Self, String> {
        if edges.len() < 2 {
            return Err(format!("Need at least 2 bin edges, got {}", edges.len()));
        }
        if let Some(i) = edges.iter().position(|e| !e.is_finite()) {
            return Err(format!("Bin edge {} is not finite ({})", i, edges[i]));
        }
        if let Some(i) = edges.windows(2).position(|w| w[1] <= w[0]) {
            return Err(format!(
                "Bin edges must be strictly increasing: edge {} ({}) >= edge {} ({})",
                i,
                edges[i],
                i + 1,
                edges[i + 1]
            ));
        }
        Ok(Self { edges })
    }

    /// Edges `start, start + step, ...` strictly below `stop`
    pub fn arange(start: f64, stop: f64, step: f64) -> Result<Self, String> {
        Self::new(sweep::arange(start, stop, step)?)
    }

    /// `n_bins` equal bins over `[start, stop]`
    pub fn uniform(start: f64, stop: f64, n_bins: usize) -> Result<Self, String> {
        Self::new(sweep::linspace(start, stop, n_bins + 1)?)
    }

    /// Edge values
    pub fn edges(&self) -> &[f64] {
        &self.edges
    }

    /// Number of bins (edges - 1)
    pub fn n_bins(&self) -> usize {
        self.edges.len() - 1
    }

    /// Lowest and highest edge
    pub fn range(&self) -> (f64, f64) {
        (self.edges[0], self.edges[self.edges.len() - 1])
    }

    /// Bin holding `value`
    ///
    /// Bins are `[e_k, e_{k+1})` except the last one, `[e_{n-1}, e_n]`.
    /// Values outside the edges and NaN have no bin.
    #[inline]
    pub fn bin_index(&self, value: f64) -> Option<usize> {
        let (low, high) = self.range();
        if !(low..=high).contains(&value) {
            return None;
        }
        if value == high {
            return Some(self.n_bins() - 1);
        }
        // number of edges <= value, at least 1 here
        Some(self.edges.partition_point(|&e| e <= value) - 1)
    }

    /// Value interval `[low, high)` covered by grid row `row`
    pub fn row_interval(&self, row: usize) -> (f64, f64) {
        let bin = self.n_bins() - 1 - row;
        (self.edges[bin], self.edges[bin + 1])
    }
}

// =================================================================================================
// Accumulator
// =================================================================================================

/// Mutable count grid of shape `(n_bins, N)`
///
/// Filled with [`accumulate_chunk`](Self::accumulate_chunk), then consumed by
/// [`finalize`](Self::finalize). Chunking is invisible in the result: feeding
/// the same rows in one chunk or in many gives the same grid.
#[derive(Debug, Clone)]
pub struct DensityAccumulator {
    edges: BinEdges,
    grid: Array2<f64>,
    rejected: usize,
}

impl DensityAccumulator {
    /// Zeroed grid for `columns` sweep entries
    pub fn new(edges: BinEdges, columns: usize) -> Self {
        let grid = Array2::zeros((edges.n_bins(), columns));
        Self { edges, grid, rejected: 0 }
    }

    /// Bin every value of `chunk` (rows = steps, columns = sweep entries)
    pub fn accumulate_chunk(&mut self, chunk: ArrayView2<'_, f64>) -> Result<(), String> {
        if chunk.ncols() != self.grid.ncols() {
            return Err(format!(
                "Chunk has {} columns but the histogram has {}",
                chunk.ncols(),
                self.grid.ncols()
            ));
        }

        let top = self.edges.n_bins() - 1;
        for row in chunk.rows() {
            for (column, &value) in row.iter().enumerate() {
                match self.edges.bin_index(value) {
                    Some(bin) => self.grid[[top - bin, column]] += 1.0,
                    None => self.rejected += 1,
                }
            }
        }
        Ok(())
    }

    /// Bin edges
    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    /// Raw counts so far
    pub fn grid(&self) -> &Array2<f64> {
        &self.grid
    }

    /// Sum of all raw counts
    pub fn total(&self) -> f64 {
        self.grid.sum()
    }

    /// Values that fell outside the edges or were not finite
    pub fn rejected(&self) -> usize {
        self.rejected
    }

    /// Post-process into an immutable histogram
    ///
    /// 1. Every column is multiplied by its own number of non-zero cells.
    ///    This weighting is not a probability normalization; it is kept
    ///    as is so that images match the reference pictures.
    /// 2. Cells `<= 0` become NaN ("no data").
    pub fn finalize(self, parameters: &[f64]) -> Result<DensityHistogram, String> {
        super::check_lengths(parameters.len(), self.grid.ncols())?;

        let raw_total = self.total();
        let mut grid = self.grid;

        for mut column in grid.columns_mut() {
            let occupied = column.iter().filter(|&&v| v != 0.0).count() as f64;
            column *= occupied;
        }
        grid.mapv_inplace(|v| if v > 0.0 { v } else { f64::NAN });

        numeric::report_domain_error("Density histogram (values outside the bin edges)", self.rejected);

        Ok(DensityHistogram {
            grid,
            edges: self.edges,
            parameters: DVector::from_column_slice(parameters),
            raw_total,
            rejected: self.rejected,
            metadata: RunMetadata::new(),
        })
    }
}

// =================================================================================================
// Finalized histogram
// =================================================================================================

/// Finalized density histogram
#[derive(Debug, Clone)]
pub struct DensityHistogram {
    /// Weighted counts, `(n_bins, N)`, row 0 = highest values, NaN = no data
    pub grid: Array2<f64>,

    /// Bin edges (value axis)
    pub edges: BinEdges,

    /// Sweep values (parameter axis)
    pub parameters: DVector<f64>,

    /// Sum of raw counts before weighting
    pub raw_total: f64,

    /// Values that had no bin
    pub rejected: usize,

    /// Run diagnostics
    pub metadata: RunMetadata,
}

impl DensityHistogram {
    /// Grid shape `(n_bins, N)`
    pub fn shape(&self) -> (usize, usize) {
        self.grid.dim()
    }

    /// Largest finite cell, `None` if every cell is "no data"
    pub fn max_finite(&self) -> Option<f64> {
        self.grid
            .iter()
            .copied()
            .filter(|v| v.is_finite())
            .fold(None, |acc, v| Some(acc.map_or(v, |m: f64| m.max(v))))
    }

    /// Colour-scale bounds `(0.001 × max, 0.1 × max)` for a logarithmic scale
    pub fn color_bounds(&self) -> Option<(f64, f64)> {
        self.max_finite().map(|max| (0.001 * max, 0.1 * max))
    }

    /// Number of cells holding data
    pub fn occupied_cells(&self) -> usize {
        self.grid.iter().filter(|v| !v.is_nan()).count()
    }

    /// Add a metadata entry
    pub fn add_metadata(&mut self, key: &str, value: &str) {
        self.metadata.add(key, value);
    }
}

// =================================================================================================
// Preset
// =================================================================================================

/// Ready-made density setup
///
/// [`DensityPreset::original`] reproduces the reference picture of the
/// general polynomial map: `r ∈ [0.3, 0.5)` and `x ∈ [-5, 2)`, both with a
/// step of 0.00025, ten cycles of 10 000 retained steps after 1000 warm-up
/// steps.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DensityPreset {
    /// Sweep `(start, stop, step)`, half-open
    pub parameter_range: (f64, f64, f64),

    /// Bin edges `(start, stop, step)`, half-open
    pub value_range: (f64, f64, f64),

    /// Independent restarts
    pub cycle_count: usize,

    /// Discarded steps per cycle
    pub warm_up: usize,

    /// Binned steps per cycle
    pub retained_steps: usize,

    /// Steps per chunk
    pub chunk_size: usize,
}

impl DensityPreset {
    /// Setup of the reference density picture
    pub fn original() -> Self {
        Self {
            parameter_range: (0.3, 0.5, 0.001 / 4.0),
            value_range: (-5.0, 2.0, 0.001 / 4.0),
            cycle_count: 10,
            warm_up: DEFAULT_WARM_UP,
            retained_steps: 10_000,
            chunk_size: 10_000,
        }
    }

    /// Parameter sweep
    pub fn sweep(&self) -> Result<ParameterSweep, String> {
        let (start, stop, step) = self.parameter_range;
        ParameterSweep::arange(start, stop, step)
    }

    /// Bin edges
    pub fn edges(&self) -> Result<BinEdges, String> {
        let (start, stop, step) = self.value_range;
        BinEdges::arange(start, stop, step)
    }

    /// Density iteration configuration
    pub fn configuration(&self) -> IterationConfiguration {
        IterationConfiguration::density_with_warm_up(
            self.cycle_count,
            self.warm_up,
            self.retained_steps,
            self.chunk_size,
        )
    }
}

// =================================================================================================
// Tests
// =================================================================================================
