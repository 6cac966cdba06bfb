//! Density heat map
//!
//! Renders a finalized [`DensityHistogram`] as an image: one column per
//! parameter value, row 0 (highest values) at the top. Colours follow a
//! reversed inferno ramp on a logarithmic scale between the histogram's
//! [`color_bounds`](DensityHistogram::color_bounds); cells without data keep
//! the background colour.
//!
//! The grid usually holds far more cells than the image has pixels, so each
//! pixel shows the maximum of the block of cells it covers.

use plotters::prelude::*;
use std::error::Error;

use super::config::{NO_TITLE, PlotConfig};
use super::is_svg;
use crate::engine::DensityHistogram;

/// Plot a density histogram as a heat map
///
/// # Arguments
///
/// * `histogram` - Finalized histogram
/// * `output_path` - Output file path (PNG/SVG based on extension)
/// * `config` - Optional PlotConfig (uses [`PlotConfig::density`] if None)
///
/// # Errors
///
/// Returns error if the histogram holds no finite cell or if the file cannot
/// be written.
pub fn plot_density(
    histogram: &DensityHistogram,
    output_path: &str,
    config: Option<&PlotConfig>,
) -> Result<(), Box<dyn Error>> {
    let bounds = histogram
        .color_bounds()
        .ok_or("Density histogram holds no data to plot")?;

    let default_config = PlotConfig::density(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    if is_svg(output_path) {
        let backend = SVGBackend::new(output_path, (config.width, config.height));
        plot_density_impl(backend, histogram, bounds, config)
    } else {
        let backend = BitMapBackend::new(output_path, (config.width, config.height));
        plot_density_impl(backend, histogram, bounds, config)
    }
}

fn plot_density_impl<DB: DrawingBackend>(
    backend: DB,
    histogram: &DensityHistogram,
    bounds: (f64, f64),
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (p_min, p_max) = parameter_extent(histogram);
    let (v_min, v_max) = histogram.edges.range();

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 40).into_font())
        .margin(20)
        .x_label_area_size(60)
        .y_label_area_size(80)
        .build_cartesian_2d(p_min..p_max, v_min..v_max)?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| format!("{:.3}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()?;

    // ====== Raster ======

    let area = chart.plotting_area().strip_coord_spec();
    let (width, height) = area.dim_in_pixel();
    let (rows, columns) = histogram.shape();
    let (log_lo, log_hi) = (bounds.0.ln(), bounds.1.ln());

    for py in 0..height as usize {
        let (r0, r1) = block(py, height as usize, rows);
        for px in 0..width as usize {
            let (c0, c1) = block(px, width as usize, columns);

            let mut peak = f64::NAN;
            for row in r0..r1 {
                for column in c0..c1 {
                    let value = histogram.grid[[row, column]];
                    if value.is_finite() && (peak.is_nan() || value > peak) {
                        peak = value;
                    }
                }
            }

            if peak.is_finite() {
                let t = ((peak.ln() - log_lo) / (log_hi - log_lo)).clamp(0.0, 1.0);
                area.draw_pixel((px as i32, py as i32), &inferno_reversed(t))?;
            }
        }
    }

    root.present()?;
    Ok(())
}

/// Parameter axis extent; a single column still gets a non-empty range
fn parameter_extent(histogram: &DensityHistogram) -> (f64, f64) {
    let (min, max) = histogram
        .parameters
        .iter()
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), &p| (lo.min(p), hi.max(p)));
    if max > min { (min, max) } else { (min - 0.5, max + 0.5) }
}

/// Cells `[start, end)` shown by pixel `index` out of `pixels`
fn block(index: usize, pixels: usize, cells: usize) -> (usize, usize) {
    let start = index * cells / pixels;
    let end = ((index + 1) * cells / pixels).max(start + 1).min(cells);
    (start.min(cells.saturating_sub(1)), end)
}

// =================================================================================================
// Colour map
// =================================================================================================

const INFERNO: [(f64, (u8, u8, u8)); 5] = [
    (0.00, (0, 0, 4)),
    (0.25, (87, 16, 110)),
    (0.50, (188, 55, 84)),
    (0.75, (249, 142, 9)),
    (1.00, (252, 255, 164)),
];

/// Reversed inferno: 0 is pale yellow, 1 is near black
fn inferno_reversed(t: f64) -> RGBColor {
    let t = 1.0 - t.clamp(0.0, 1.0);
    for pair in INFERNO.windows(2) {
        let (t0, c0) = pair[0];
        let (t1, c1) = pair[1];
        if t <= t1 {
            let u = (t - t0) / (t1 - t0);
            let lerp = |a: u8, b: u8| (a as f64 + u * (b as f64 - a as f64)).round() as u8;
            return RGBColor(lerp(c0.0, c1.0), lerp(c0.1, c1.1), lerp(c0.2, c1.2));
        }
    }
    let (r, g, b) = INFERNO[INFERNO.len() - 1].1;
    RGBColor(r, g, b)
}
