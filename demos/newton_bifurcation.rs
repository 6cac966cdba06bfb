//! Example: Newton map of z² + αz + β, bifurcation and Lyapunov exponent
//!
//! Sweeps α with β fixed. Where α² < 4β the polynomial has no real root and
//! the real Newton iteration wanders chaotically; elsewhere it converges to a
//! root and the exponent drops to -∞ (superattracting fixed point).
//!
//! ## Outputs (in the system temp directory)
//!
//! - `newton_bifurcation.png`: scatter + Lyapunov panel
//! - `newton_lyapunov.csv`: exponent per α, with a metadata header

use bifurc_rs::engine::{
    BifurcationEngine, IterationConfiguration, NumericErrorGuard, ParameterSweep, Scenario, ScatterSeries,
};
use bifurc_rs::maps::MapConfiguration;
use bifurc_rs::models::QuadraticNewton;
use bifurc_rs::output::export::{CsvConfig, CsvMetadata, export_lyapunov_csv};
use bifurc_rs::output::visualization::{PlotConfig, plot_bifurcation};

use std::time::Instant;

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Quadratic Newton map - bifurcation diagram");
    println!("═══════════════════════════════════════════════════════\n");

    // ====== Parameters ======

    let beta = 0.5;
    let (alpha_min, alpha_max, entries) = (0.0, 3.0, 2000);
    let (step_count, burn_in) = (400, 100);
    let z0 = 0.3;

    println!("Map: z - (z² + αz + β) / (2z + α)");
    println!("  β          : {}", beta);
    println!("  α          : [{}, {}] ({} values)", alpha_min, alpha_max, entries);
    println!("  steps      : {} (burn-in {})", step_count, burn_in);
    println!("  z0         : {}\n", z0);

    let scenario = Scenario::uniform(
        Box::new(QuadraticNewton),
        MapConfiguration::sweep_alpha(beta),
        ParameterSweep::linspace(alpha_min, alpha_max, entries)?,
        z0,
    );
    let config = IterationConfiguration::trajectory(step_count, burn_in);

    // ====== Run ======

    let start = Instant::now();
    let mut scatter = ScatterSeries::new();
    let result = {
        // orbits hitting the pole are expected here
        let _quiet = NumericErrorGuard::suppress();
        BifurcationEngine::new().run_observed(&scenario, &config, &mut scatter)?
    };
    let elapsed = start.elapsed().as_secs_f64();

    let lyapunov = result.lyapunov.as_ref().ok_or("Lyapunov exponent missing")?;
    let (stable, chaotic) = lyapunov.partition();

    println!("Results:");
    println!("  time             : {:.3} s", elapsed);
    println!("  scatter points   : {}", scatter.len());
    println!("  stable entries   : {}", stable.len());
    println!("  chaotic entries  : {}", chaotic.len());
    println!("  non-finite       : {}\n", lyapunov.non_finite());

    // ====== Outputs ======

    let tmp_dir = std::env::temp_dir();

    let figure = tmp_dir.join("newton_bifurcation.png");
    let mut plot_config = PlotConfig::bifurcation(format!("Quadratic Newton, β = {}", beta));
    plot_config.point_alpha = 0.05;
    plot_bifurcation(&scatter, Some(lyapunov), &figure.to_string_lossy(), Some(&plot_config))?;
    println!("Figure : {}", figure.display());

    let csv = tmp_dir.join("newton_lyapunov.csv");
    let csv_config = CsvConfig::default().with_metadata(CsvMetadata::from_run(&result.metadata));
    export_lyapunov_csv(lyapunov, &csv.to_string_lossy(), Some(&csv_config))?;
    println!("CSV    : {}", csv.display());

    Ok(())
}
