//! Example: Newton map of z³ - αz, iterated in the complex plane
//!
//! Every entry starts at z0 + i. The real part and both signs of the
//! imaginary part are plotted against α.

use bifurc_rs::engine::{ComplexEngine, ComplexScatter, IterationConfiguration, ParameterSweep, Scenario};
use bifurc_rs::maps::MapConfiguration;
use bifurc_rs::models::MapFamily;
use bifurc_rs::output::visualization::{PlotConfig, plot_complex_bifurcation};

fn main() -> Result<(), Box<dyn std::error::Error>> {
    println!("═══════════════════════════════════════════════════════");
    println!("  Cubic Newton map - complex bifurcation diagram");
    println!("═══════════════════════════════════════════════════════\n");

    let family = MapFamily::CubicNewton;
    let scenario = Scenario::uniform(
        family.build(),
        MapConfiguration::sweep_alpha(0.0),
        ParameterSweep::linspace(-2.0, 2.0, 1500)?,
        0.2,
    );
    let config = IterationConfiguration::trajectory(300, 200);

    println!("Map      : {}", scenario.get_map_name());
    println!("Entries  : {}", scenario.len());
    println!("Steps    : 300 (burn-in 200)\n");

    let mut scatter = ComplexScatter::new();
    let result = ComplexEngine::new().run_observed(&scenario, &config, &mut scatter)?;

    println!("Retained steps  : {}", result.retained_steps);
    println!("Re(z) points    : {}", scatter.real.len());
    println!("Im(z) points    : {}", scatter.imaginary.len());
    println!("Non-finite      : {}\n", result.non_finite);

    let figure = std::env::temp_dir().join("complex_bifurcation.png");
    let mut plot_config = PlotConfig::complex("Cubic Newton, z0 = 0.2 + i");
    plot_config.point_alpha = 0.1;
    plot_complex_bifurcation(&scatter, &figure.to_string_lossy(), Some(&plot_config))?;
    println!("Figure : {}", figure.display());

    Ok(())
}
