//! Example: occupation density of the general polynomial map
//!
//! Runs the density engine over r ∈ [0.3, 0.5) and writes the grid to
//! `logmap.npy` and the heat map to `bifurcation.png` (1920 × 1440).
//!
//! By default the resolution is reduced 8× on both axes so the demo finishes
//! in seconds. Pass `--full` for the full setup (800 × 27 999 grid,
//! 10 cycles of 1000 + 10 000 steps).

use bifurc_rs::engine::{DensityHistogramEngine, DensityPreset, Engine, NumericErrorGuard, Scenario};
use bifurc_rs::maps::MapConfiguration;
use bifurc_rs::models::GeneralPolynomial;
use bifurc_rs::output::visualization::{PlotConfig, plot_density};
use bifurc_rs::output::{DENSITY_IMAGE_FILE, save_density};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  General polynomial map - density histogram");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Setup ======

    let mut preset = DensityPreset::original();
    if !std::env::args().any(|arg| arg == "--full") {
        preset.parameter_range.2 *= 8.0;
        preset.value_range.2 *= 8.0;
        preset.cycle_count = 4;
        preset.retained_steps = 2000;
        preset.chunk_size = 500;
    }

    let sweep = preset.sweep()?;
    let edges = preset.edges()?;
    let config = preset.configuration();

    println!("Grid     : {} bins × {} parameter values", edges.n_bins(), sweep.len());
    println!(
        "Cycles   : {} × ({} warm-up + {} retained), chunks of {}\n",
        preset.cycle_count, preset.warm_up, preset.retained_steps, preset.chunk_size
    );

    let scenario = Scenario::uniform(Box::new(GeneralPolynomial), MapConfiguration::sweep_alpha(0.0), sweep, 0.0);

    // ====== Run ======

    let start = Instant::now();
    let histogram = {
        let _quiet = NumericErrorGuard::suppress();
        DensityHistogramEngine::new(edges).run(&scenario, &config)?
    };

    println!("Results:");
    println!("  time            : {:.2} s", start.elapsed().as_secs_f64());
    println!("  values binned   : {}", histogram.raw_total);
    println!("  values rejected : {}", histogram.rejected);
    println!("  occupied cells  : {}", histogram.occupied_cells());
    if let Some((low, high)) = histogram.color_bounds() {
        println!("  colour bounds   : [{:.3e}, {:.3e}]\n", low, high);
    }

    // ====== Outputs ======

    let tmp_dir = std::env::temp_dir();
    let array = save_density(&histogram, &tmp_dir)?;
    println!("Array  : {}", array.display());

    let image = tmp_dir.join(DENSITY_IMAGE_FILE);
    let (r_min, r_max) = (preset.parameter_range.0, preset.parameter_range.1);
    plot_density(
        &histogram,
        &image.to_string_lossy(),
        Some(&PlotConfig::density(format!("r ∈ [{}, {})", r_min, r_max))),
    )?;
    println!("Image  : {}", image.display());

    Ok(())
}
