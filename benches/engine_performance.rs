//! Performance benchmarks for the iteration engines
//!
//! # What We're Measuring
//!
//! 1. **Bifurcation engine**: one map evaluation per entry and step, plus one
//!    derivative per retained step when Lyapunov exponents are accumulated
//! 2. **Density engine**: same stepping, plus binning every retained value
//! 3. **Chunk size**: the density engine's only memory knob; total work is
//!    fixed, so time should barely move with it
//!
//! # Expected Results
//!
//! - Time ∝ sweep entries × steps
//! - Lyapunov accumulation costs roughly one extra evaluation per retained step
//! - Chunk sizes from 100 up give the same time within noise
//!
//! # Running Benchmarks
//!
//! ```bash
//! cargo bench --bench engine_performance
//! cargo bench --bench engine_performance density
//!
//! # sequential stepping only
//! cargo bench --bench engine_performance --no-default-features
//! ```

use bifurc_rs::engine::{
    BifurcationEngine, BinEdges, DensityHistogramEngine, Engine, IterationConfiguration, ParameterSweep, Scenario,
    ScatterSeries,
};
use bifurc_rs::maps::MapConfiguration;
use bifurc_rs::models::{GeneralPolynomial, QuadraticNewton};
use criterion::{BenchmarkId, Criterion, Throughput, criterion_group, criterion_main};
use std::hint::black_box;
use std::time::Duration;

fn newton_scenario(entries: usize) -> Scenario<QuadraticNewton> {
    Scenario::uniform(
        Box::new(QuadraticNewton),
        MapConfiguration::sweep_alpha(0.5),
        ParameterSweep::linspace(0.0, 2.0, entries).unwrap(),
        0.3,
    )
}

fn polynomial_scenario(entries: usize) -> Scenario<GeneralPolynomial> {
    Scenario::uniform(
        Box::new(GeneralPolynomial),
        MapConfiguration::sweep_alpha(0.0),
        ParameterSweep::linspace(0.3, 0.5, entries).unwrap(),
        0.0,
    )
}

// =================================================================================================
// Bifurcation
// =================================================================================================

fn benchmark_bifurcation(c: &mut Criterion) {
    let mut group = c.benchmark_group("Bifurcation Engine");
    let config = IterationConfiguration::trajectory(200, 50);

    for entries in [100, 1000, 10_000] {
        let scenario = newton_scenario(entries);
        group.throughput(Throughput::Elements((entries * 200) as u64));

        group.bench_with_input(BenchmarkId::new("lyapunov", entries), &scenario, |b, scenario| {
            let engine = BifurcationEngine::new();
            b.iter(|| engine.run(black_box(scenario), black_box(&config)).unwrap());
        });

        group.bench_with_input(BenchmarkId::new("scatter only", entries), &scenario, |b, scenario| {
            let engine = BifurcationEngine::scatter_only();
            b.iter(|| {
                let mut scatter = ScatterSeries::new();
                engine.scan(black_box(scenario), black_box(&config), &mut scatter).unwrap();
                scatter.len()
            });
        });
    }

    group.finish();
}

// =================================================================================================
// Density
// =================================================================================================

fn benchmark_density(c: &mut Criterion) {
    let mut group = c.benchmark_group("Density Engine");
    group.measurement_time(Duration::from_secs(10));
    group.sample_size(20);

    let scenario = polynomial_scenario(400);
    let engine = DensityHistogramEngine::new(BinEdges::arange(-5.0, 2.0, 0.001).unwrap());

    for chunk_size in [10, 100, 1000, 4000] {
        let config = IterationConfiguration::density_with_warm_up(2, 200, 4000, chunk_size);
        group.throughput(Throughput::Elements((2 * 4200 * 400) as u64));

        group.bench_with_input(BenchmarkId::new("chunk size", chunk_size), &config, |b, config| {
            b.iter(|| engine.accumulate(black_box(&scenario), black_box(config)).unwrap());
        });
    }

    group.finish();
}

criterion_group!(benches, benchmark_bifurcation, benchmark_density);
criterion_main!(benches);
