//! Cobweb figure
//!
//! Draws a [`CobwebTrace`]: the map curve in black (one polyline per
//! continuous run), the identity as a dotted line, the staircase in the point
//! colour and the markers shaded by step. The emphasized first marker uses
//! the accent colour.

use plotters::prelude::*;
use std::error::Error;

use super::config::{NO_TITLE, PlotConfig};
use super::is_svg;
use crate::engine::CobwebTrace;

/// Number of dashes along the identity line
const DIAGONAL_DASHES: usize = 60;

/// Plot a cobweb diagram
///
/// # Arguments
///
/// * `trace` - Output of [`CobwebTracer::trace`](crate::engine::CobwebTracer::trace)
/// * `output_path` - Output file path (PNG/SVG based on extension)
/// * `config` - Optional PlotConfig (uses [`PlotConfig::cobweb`] if None)
///
/// # Errors
///
/// Returns error if the file cannot be written.
pub fn plot_cobweb(trace: &CobwebTrace, output_path: &str, config: Option<&PlotConfig>) -> Result<(), Box<dyn Error>> {
    let default_config = PlotConfig::cobweb(NO_TITLE);
    let config = config.unwrap_or(&default_config);

    if is_svg(output_path) {
        let backend = SVGBackend::new(output_path, (config.width, config.height));
        plot_cobweb_impl(backend, trace, config)
    } else {
        let backend = BitMapBackend::new(output_path, (config.width, config.height));
        plot_cobweb_impl(backend, trace, config)
    }
}

fn plot_cobweb_impl<DB: DrawingBackend>(
    backend: DB,
    trace: &CobwebTrace,
    config: &PlotConfig,
) -> Result<(), Box<dyn Error>>
where
    DB::ErrorType: 'static,
{
    let root = backend.into_drawing_area();
    root.fill(&config.background)?;

    let (x0, x1) = trace.window.x;
    let (y0, y1) = trace.window.y;

    let mut chart = ChartBuilder::on(&root)
        .caption(&config.title, ("sans-serif", 36).into_font())
        .margin(15)
        .x_label_area_size(45)
        .y_label_area_size(60)
        .build_cartesian_2d(x0..x1, y0..y1)?;

    let mut mesh = chart.configure_mesh();
    if !config.show_grid {
        mesh.disable_mesh();
    }
    mesh.x_desc(&config.xlabel)
        .y_desc(&config.ylabel)
        .x_label_formatter(&|x| format!("{:.2}", x))
        .y_label_formatter(&|y| format!("{:.2}", y))
        .draw()?;

    // ====== Map curve ======

    for run in trace.curve_runs() {
        chart.draw_series(LineSeries::new(run, BLACK.stroke_width(2)))?;
    }

    // ====== Identity (dotted) ======

    let ((ax, ay), (bx, by)) = trace.diagonal;
    chart.draw_series((0..DIAGONAL_DASHES).step_by(2).map(|k| {
        let t0 = k as f64 / DIAGONAL_DASHES as f64;
        let t1 = (k + 1) as f64 / DIAGONAL_DASHES as f64;
        PathElement::new(
            vec![
                (ax + t0 * (bx - ax), ay + t0 * (by - ay)),
                (ax + t1 * (bx - ax), ay + t1 * (by - ay)),
            ],
            BLACK.mix(0.6).stroke_width(1),
        )
    }))?;

    // ====== Staircase ======

    let stroke = config.point_color.mix(config.point_alpha).stroke_width(1);
    chart.draw_series(
        trace
            .segments()
            .filter(|segment| is_finite_point(segment.start) && is_finite_point(segment.end))
            .map(|segment| PathElement::new(vec![segment.start, segment.end], stroke)),
    )?;

    // ====== Markers ======

    chart.draw_series(
        trace
            .markers()
            .filter(|marker| is_finite_point(marker.point))
            .map(|marker| {
                let style = if marker.emphasized {
                    config.accent_color.filled()
                } else {
                    config.point_color.mix(marker.shade).filled()
                };
                Circle::new(marker.point, config.point_size, style)
            }),
    )?;

    root.present()?;
    Ok(())
}

fn is_finite_point((x, y): (f64, f64)) -> bool {
    x.is_finite() && y.is_finite()
}
