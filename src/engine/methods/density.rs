//! Density histogram engine
//!
//! # Algorithm
//!
//! ```text
//! for c in 0..C:                          (independent restarts)
//!     z ← (c + 0.5) / C                   (every entry)
//!     repeat W times: z ← f(z; r)         (warm-up, discarded)
//!     while steps remain:
//!         fill a chunk of ≤ K rows:  row_k ← z ← f(z; r)
//!         bin every column of the chunk into the grid
//! finalize: weight columns, mark empty cells as no data
//! ```
//!
//! The seed `(c + 0.5) / C` staggers the restarts evenly across `[0, 1)`.
//! The initial state of the scenario is not used.
//!
//! # Memory
//!
//! Only one chunk of `min(K, retained) × N` values exists at any time, plus
//! the state vector and the `(n_bins, N)` grid. Total work grows with
//! `C × (W + retained)`, memory does not.

use log::debug;
use ndarray::{Array2, ArrayView1, s};

use crate::engine::histogram::{BinEdges, DensityAccumulator, DensityHistogram};
use crate::engine::{Engine, IterationConfiguration, IterationSchedule, Scenario};
use crate::maps::{IterativeMap, MapConfiguration};

// =================================================================================================
// Engine
// =================================================================================================

/// Chunked, cyclic density histogram engine
///
/// # Example
///
/// ```rust
/// use bifurc_rs::engine::{BinEdges, DensityHistogramEngine, Engine, IterationConfiguration, ParameterSweep, Scenario};
/// use bifurc_rs::maps::MapConfiguration;
/// use bifurc_rs::models::GeneralPolynomial;
///
/// let sweep = ParameterSweep::arange(0.3, 0.5, 0.01).unwrap();
/// let scenario = Scenario::uniform(Box::new(GeneralPolynomial), MapConfiguration::sweep_alpha(0.0), sweep, 0.0);
///
/// let engine = DensityHistogramEngine::new(BinEdges::arange(-5.0, 2.0, 0.05).unwrap());
/// let config = IterationConfiguration::density_with_warm_up(2, 100, 500, 128);
///
/// let histogram = engine.run(&scenario, &config).unwrap();
/// assert_eq!(histogram.shape(), (engine.edges().n_bins(), 20));
/// ```
#[derive(Debug, Clone)]
pub struct DensityHistogramEngine {
    edges: BinEdges,
}

impl DensityHistogramEngine {
    /// Engine binning into `edges`
    ///
    /// Edges are validated when built, so a non-monotone sequence never
    /// reaches the accumulation loop.
    pub fn new(edges: BinEdges) -> Self {
        Self { edges }
    }

    /// Bin edges
    pub fn edges(&self) -> &BinEdges {
        &self.edges
    }

    /// Run every cycle and return the raw accumulator (not finalized)
    pub fn accumulate<M: IterativeMap + ?Sized>(
        &self,
        scenario: &Scenario<M>,
        config: &IterationConfiguration,
    ) -> Result<DensityAccumulator, String> {
        // ====== Validation ======

        config.validate()?;
        let (cycle_count, warm_up, retained_steps, chunk_size) = match &config.schedule {
            IterationSchedule::Density { cycle_count, warm_up, retained_steps, chunk_size } => {
                (*cycle_count, *warm_up, *retained_steps, *chunk_size)
            }
            other => {
                return Err(format!(
                    "DensityHistogramEngine only supports Density configuration, got {}",
                    other.name()
                ));
            }
        };
        scenario.validate()?;

        // ====== Cycles ======

        let mut run = DensityRun::new(scenario, self.edges.clone(), chunk_size.min(retained_steps));
        for cycle in 0..cycle_count {
            run.seed((cycle as f64 + 0.5) / cycle_count as f64);
            run.warm_up(warm_up);
            run.retain(retained_steps)?;
        }

        debug!(
            "DensityHistogramEngine: {} cycles x ({} + {}) steps over {} entries, chunks of {}, {} values binned",
            cycle_count,
            warm_up,
            retained_steps,
            scenario.len(),
            chunk_size,
            run.accumulator.total()
        );

        Ok(run.accumulator)
    }
}

impl<M: IterativeMap + ?Sized> Engine<M> for DensityHistogramEngine {
    type Output = DensityHistogram;

    fn run(&self, scenario: &Scenario<M>, config: &IterationConfiguration) -> Result<DensityHistogram, String> {
        let accumulator = self.accumulate(scenario, config)?;
        let mut histogram = accumulator.finalize(scenario.sweep.as_slice())?;

        histogram.add_metadata("engine", "Density Histogram");
        histogram.add_metadata("map", scenario.get_map_name());
        histogram.add_metadata("bins", &self.edges.n_bins().to_string());
        histogram.add_metadata("raw total", &histogram.raw_total.to_string());
        histogram.add_metadata("rejected values", &histogram.rejected.to_string());
        if let IterationSchedule::Density { cycle_count, warm_up, retained_steps, chunk_size } = &config.schedule {
            histogram.add_metadata("cycles", &cycle_count.to_string());
            histogram.add_metadata("warm-up", &warm_up.to_string());
            histogram.add_metadata("retained steps", &retained_steps.to_string());
            histogram.add_metadata("chunk size", &chunk_size.to_string());
        }

        Ok(histogram)
    }

    fn name(&self) -> &'static str {
        "Density Histogram"
    }
}

// =================================================================================================
// Working buffers of one run
// =================================================================================================

/// State vector, chunk buffer and grid, owned for the duration of one run
struct DensityRun<'a, M: ?Sized> {
    map: &'a M,
    configuration: &'a MapConfiguration,
    sweep: &'a [f64],
    state: Vec<f64>,
    chunk: Array2<f64>,
    accumulator: DensityAccumulator,
}

impl<'a, M: IterativeMap + ?Sized> DensityRun<'a, M> {
    fn new(scenario: &'a Scenario<M>, edges: BinEdges, chunk_rows: usize) -> Self {
        let n = scenario.len();
        Self {
            map: scenario.map.as_ref(),
            configuration: &scenario.configuration,
            sweep: scenario.sweep.as_slice(),
            state: vec![0.0; n],
            chunk: Array2::zeros((chunk_rows, n)),
            accumulator: DensityAccumulator::new(edges, n),
        }
    }

    fn seed(&mut self, z0: f64) {
        self.state.fill(z0);
    }

    #[inline]
    fn step(&mut self) {
        let map = self.map;
        let configuration = self.configuration;
        crate::engine::for_each_entry(&mut self.state, self.sweep, |z, r| {
            *z = map.evaluate(*z, &configuration.at(r));
        });
    }

    fn warm_up(&mut self, steps: usize) {
        for _ in 0..steps {
            self.step();
        }
    }

    /// Iterate `steps` times, binning in chunks
    fn retain(&mut self, steps: usize) -> Result<(), String> {
        let capacity = self.chunk.nrows();
        let mut remaining = steps;

        while remaining > 0 {
            let rows = capacity.min(remaining);
            for row in 0..rows {
                self.step();
                self.chunk.row_mut(row).assign(&ArrayView1::from(self.state.as_slice()));
            }
            // the last chunk of a cycle may be partial
            self.accumulator.accumulate_chunk(self.chunk.slice(s![..rows, ..]))?;
            remaining -= rows;
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
