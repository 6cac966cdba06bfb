//! Example: cobweb diagrams of the four map families
//!
//! One figure per family, written to the system temp directory.

use bifurc_rs::engine::{CobwebTracer, CobwebWindow, IterationConfiguration};
use bifurc_rs::maps::MapParameters;
use bifurc_rs::models::MapFamily;
use bifurc_rs::output::visualization::{PlotConfig, plot_cobweb};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Cobweb diagrams");
    println!("═══════════════════════════════════════════════════════\n");

    // (family, parameters, z0, window)
    let cases = [
        (MapFamily::QuadraticNewton, MapParameters::new(1.0, 0.5), 0.3, CobwebWindow::square(-3.0, 3.0)),
        (MapFamily::CubicNewton, MapParameters::alpha(1.0), 0.45, CobwebWindow::square(-2.0, 2.0)),
        (MapFamily::GeneralPolynomial, MapParameters::alpha(0.4), 0.7, CobwebWindow::square(-5.0, 5.0)),
        (MapFamily::Exponential, MapParameters::default(), -1.5, CobwebWindow::new((-3.0, 1.0), (-1.5, 1.5))),
    ];

    let tmp_dir = std::env::temp_dir();

    for (family, params, z0, window) in cases {
        let map = family.build();
        let trace = CobwebTracer::trace(map.as_ref(), &params, z0, &window, &IterationConfiguration::cobweb(30))?;

        let last = trace.steps.last().map(|step| step.to).unwrap_or(z0);
        println!("{:<20} z0 = {:<6} z30 = {:.6}", map.name(), z0, last);

        let file_name = format!("cobweb_{}.png", map.name().to_lowercase().replace(' ', "_"));
        let path = tmp_dir.join(file_name);
        plot_cobweb(&trace, &path.to_string_lossy(), Some(&PlotConfig::cobweb(map.name())))?;
        println!("{:<20} {}", "", path.display());
    }

    Ok(())
}
