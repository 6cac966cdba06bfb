//! Visualization of engine results
//!
//! This module draws engine results with the `plotters` library. The backend
//! is picked from the file extension: `.svg` goes to `SVGBackend`, anything
//! else to `BitMapBackend`.
//!
//! # Organization
//!
//! - **config**: Shared plot configuration (`PlotConfig`)
//! - **bifurcation**: Scatter diagrams (real with Lyapunov panel, complex)
//! - **density**: Heat map of a finalized density histogram
//! - **cobweb**: Staircase construction over the map curve
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bifurc_rs::output::visualization::{plot_bifurcation, plot_density, PlotConfig};
//!
//! let mut scatter = ScatterSeries::new();
//! let result = BifurcationEngine::new().run_observed(&scenario, &config, &mut scatter)?;
//! plot_bifurcation(&scatter, result.lyapunov.as_ref(), "newton.png", None)?;
//!
//! let histogram = DensityHistogramEngine::new(edges).run(&scenario, &density_config)?;
//! plot_density(&histogram, "bifurcation.png", Some(&PlotConfig::density("Density")))?;
//! ```
//!
//! | Use Case | Module | Function |
//! |----------|--------|----------|
//! | Bifurcation + Lyapunov | `bifurcation` | `plot_bifurcation` |
//! | Real / imaginary parts | `bifurcation` | `plot_complex_bifurcation` |
//! | Density heat map | `density` | `plot_density` |
//! | Cobweb | `cobweb` | `plot_cobweb` |

pub mod bifurcation;
pub mod cobweb;
pub mod config;
pub mod density;

pub use config::{DENSITY_RESOLUTION, IntoOptionalTitle, NO_TITLE, PlotConfig};

pub use bifurcation::{plot_bifurcation, plot_complex_bifurcation};
pub use cobweb::plot_cobweb;
pub use density::plot_density;

use std::path::Path;

/// Whether `path` should be written with the SVG backend
pub(crate) fn is_svg(path: &str) -> bool {
    Path::new(path)
        .extension()
        .and_then(|ext| ext.to_str())
        .is_some_and(|ext| ext.eq_ignore_ascii_case("svg"))
}

/// Axis range covering every finite value, padded by 5 %
///
/// Falls back to `(-1, 1)` when nothing is finite and widens a degenerate
/// range so plotters always gets a non-empty interval.
pub(crate) fn finite_range(values: impl IntoIterator<Item = f64>) -> (f64, f64) {
    let (min, max) = values
        .into_iter()
        .filter(|v| v.is_finite())
        .fold((f64::INFINITY, f64::NEG_INFINITY), |(lo, hi), v| (lo.min(v), hi.max(v)));

    if !min.is_finite() {
        return (-1.0, 1.0);
    }
    if max - min < 1e-12 {
        let half = if min.abs() > 0.0 { min.abs() * 0.05 } else { 0.5 };
        return (min - half, max + half);
    }

    let pad = (max - min) * 0.05;
    (min - pad, max + pad)
}
