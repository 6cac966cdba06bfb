//! Bifurcation and Lyapunov figures
//!
//! - [`plot_bifurcation`]: scatter of retained iterates, with an optional
//!   Lyapunov panel below (stable points black, chaotic points in the accent
//!   colour, split at exactly 0)
//! - [`plot_complex_bifurcation`]: real part above, imaginary part (both
//!   signs) below

use plotters::prelude::*;
use std::error::Error;

use super::config::{NO_TITLE, PlotConfig};
use super::{finite_range, is_svg};
use crate::engine::{ComplexScatter, LyapunovExponent, ScatterSeries};

/// Plot a bifurcation diagram, optionally with its Lyapunov exponent
///
/// # Arguments
///
/// * `scatter` - Points collected by a [`ScatterSeries`] observer
/// * `lyapunov` - Exponent of the same run, drawn in a second panel
/// * `output_path` - Output file path (PNG/SVG based on extension)
/// * `config` - Optional PlotConfig (uses [`PlotConfig::bifurcation`] if None)
///
/// # Example
///
/// ```rust,ignore
/// let mut scatter = ScatterSeries::new();
/// let result = BifurcationEngine::new().run_observed(&scenario, &config, &mut scatter)?;
/// plot_bifurcation(&scatter, result.lyapunov.as_ref(), "newton.png", None)?;
/// ```
///
/// # Errors
///
/// Returns error if the scatter is empty or if the file cannot be written.
pub fn plot_bifurcation(
    scatter: &ScatterSeries,
    lyapunov: Option<&LyapunovExponent>,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if scatter.is_empty() {
        return Err("No finite bifurcation points to plot".into());
    }

    let default_config = PlotConfig::bifurcation(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    if is_svg(output_path) {
        let backend = SVGBackend::new(output_path, (config.width, config.height));
        plot_bifurcation_impl(backend, scatter, lyapunov, config)
    } else {
        let backend = BitMapBackend::new(output_path, (config.width, config.height));
        plot_bifurcation_impl(backend, scatter, lyapunov, config)
    }
}

/// Plot the real and imaginary panels of a complex run
///
/// # Errors
///
/// Returns error if either panel is empty or if the file cannot be written.
pub fn plot_complex_bifurcation(
    scatter: &ComplexScatter,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    if scatter.real.is_empty() || scatter.imaginary.is_empty() {
        return Err("No finite complex points to plot".into());
    }

    let default_config = PlotConfig::complex(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    if is_svg(output_path) {
        let backend = SVGBackend::new(output_path, (config.width, config.height));
        plot_complex_impl(backend, scatter, config)
    } else {
        let backend = BitMapBackend::new(output_path, (config.width, config.height));
        plot_complex_impl(backend, scatter, config)
    }
}

// =================================================================================================
// Implementations
// =================================================================================================

fn plot_bifurcation_impl<DB: DrawingBackend>(
    backend: DB,
    scatter: &ScatterSeries,
    lyapunov: Option<&LyapunovExponent>,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let panels = match lyapunov {
        Some(_) => root.split_evenly((2, 1)),
        None => vec![root.clone()],
    };

    let x_range = finite_range(scatter.points.iter().map(|p| p.0));

    // ====== Upper panel: iterates ======

    let y_range = finite_range(scatter.points.iter().map(|p| p.1));
    draw_scatter_panel(&panels[0], &config.title, "", &config.ylabel, x_range, y_range, &[&scatter.points], config)?;

    // ====== Lower panel: Lyapunov exponent ======

    if let (Some(exponent), Some(area)) = (lyapunov, panels.get(1)) {
        let (stable, chaotic) = exponent.partition();
        // -inf exponents (superstable entries) have no place on a linear axis
        let stable: Vec<(f64, f64)> = stable.into_iter().filter(|p| p.1.is_finite()).collect();
        let chaotic: Vec<(f64, f64)> = chaotic.into_iter().filter(|p| p.1.is_finite()).collect();

        let l_range = finite_range(stable.iter().chain(chaotic.iter()).map(|p| p.1).chain([0.0]));

        let mut chart = ChartBuilder::on(area)
            .caption("Lyapunov exponent", ("sans-serif", 30).into_font())
            .margin(15)
            .x_label_area_size(45)
            .y_label_area_size(60)
            .build_cartesian_2d(x_range.0..x_range.1, l_range.0..l_range.1)?;

        let mut mesh = chart.configure_mesh();
        if !config.show_grid {
            mesh.disable_mesh();
        }
        mesh.x_desc(&config.xlabel)
            .y_desc("λ")
            .x_label_formatter(&|x| format!("{:.2}", x))
            .y_label_formatter(&|y| format!("{:.2}", y))
            .draw()?;

        // λ = 0 separates stable from chaotic
        chart.draw_series(LineSeries::new(
            vec![(x_range.0, 0.0), (x_range.1, 0.0)],
            BLACK.mix(0.5).stroke_width(1),
        ))?;

        let size = config.point_size.max(1);
        chart.draw_series(
            stable
                .iter()
                .map(|&(r, l)| Circle::new((r, l), size, BLACK.mix(0.5).filled())),
        )?;
        chart.draw_series(
            chaotic
                .iter()
                .map(|&(r, l)| Circle::new((r, l), size, config.accent_color.mix(0.5).filled())),
        )?;
    }

    root.present()?;
    Ok(())
}

fn plot_complex_impl<DB: DrawingBackend>(
    backend: DB,
    scatter: &ComplexScatter,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;
    let panels = root.split_evenly((2, 1));

    let x_range = finite_range(
        scatter
            .real
            .points
            .iter()
            .chain(scatter.imaginary.points.iter())
            .map(|p| p.0),
    );

    let re_range = finite_range(scatter.real.points.iter().map(|p| p.1));
    draw_scatter_panel(&panels[0], &config.title, "", &config.ylabel, x_range, re_range, &[&scatter.real.points], config)?;

    let im_range = finite_range(scatter.imaginary.points.iter().map(|p| p.1));
    draw_scatter_panel(
        &panels[1],
        "",
        &config.xlabel,
        "Im(z)",
        x_range,
        im_range,
        &[&scatter.imaginary.points],
        config,
    )?;

    root.present()?;
    Ok(())
}

/// One scatter panel with its own axes
#[allow(clippy::too_many_arguments)]
fn draw_scatter_panel<DB: DrawingBackend>(
    area: &DrawingArea<DB, plotters::coord::Shift>,
    caption: &str,
    xlabel: &str,
    ylabel: &str,
    x_range: (f64, f64),
    y_range: (f64, f64),
    series: &[&Vec<(f64, f64)>],
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let mut builder = ChartBuilder::on(area);
    builder.margin(15).x_label_area_size(45).y_label_area_size(60);
    if !caption.is_empty() {
        builder.caption(caption, ("sans-serif", 36).into_font());
    }
    let mut chart = builder.build_cartesian_2d(x_range.0..x_range.1, y_range.0..y_range.1)?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(xlabel)
        .y_desc(ylabel)
        .x_label_formatter(&|x| format!("{:.2}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()?;

    let style = config.point_style();
    for points in series {
        chart.draw_series(points.iter().map(|&(x, y)| Circle::new((x, y), config.point_size, style)))?;
    }
    Ok(())
}

// =================================================================================================
// Tests
// =================================================================================================

#[cfg(test)]
mod tests {
    use super::*;
    use crate::engine::{BifurcationEngine, ComplexEngine, IterationConfiguration, ParameterSweep, Scenario};
    use crate::maps::MapConfiguration;
    use crate::models::{CubicNewton, QuadraticNewton};

    fn run_real() -> (ScatterSeries, LyapunovExponent) {
        let scenario = Scenario::uniform(
            Box::new(QuadraticNewton),
            MapConfiguration::sweep_alpha(0.5),
            ParameterSweep::linspace(0.5, 2.0, 30).unwrap(),
            0.3,
        );
        let mut scatter = ScatterSeries::new();
        let result = BifurcationEngine::new()
            .run_observed(&scenario, &IterationConfiguration::trajectory(60, 20), &mut scatter)
            .unwrap();
        (scatter, result.lyapunov.unwrap())
    }

    #[test]
    fn test_plot_bifurcation_png() {
        let (scatter, lyapunov) = run_real();
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("png");
        plot_bifurcation(&scatter, Some(&lyapunov), path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_bifurcation_svg_without_lyapunov() {
        let (scatter, _) = run_real();
        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("svg");
        plot_bifurcation(&scatter, None, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }

    #[test]
    fn test_plot_bifurcation_empty_fails() {
        let result = plot_bifurcation(&ScatterSeries::new(), None, "unused.png", None);
        assert!(result.is_err());
    }

    #[test]
    fn test_plot_complex_svg() {
        let scenario = Scenario::uniform(
            Box::new(CubicNewton),
            MapConfiguration::sweep_alpha(0.0),
            ParameterSweep::linspace(-1.0, 1.0, 20).unwrap(),
            0.2,
        );
        let mut scatter = ComplexScatter::new();
        ComplexEngine::new()
            .run_observed(&scenario, &IterationConfiguration::trajectory(40, 20), &mut scatter)
            .unwrap();

        let tmp = tempfile::NamedTempFile::new().unwrap();
        let path = tmp.path().with_extension("svg");
        plot_complex_bifurcation(&scatter, path.to_str().unwrap(), None).unwrap();
        assert!(path.exists());
    }
}
