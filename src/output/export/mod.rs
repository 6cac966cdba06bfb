//! Export of engine results
//!
//! # Architecture
//!
//! The [`Exporter`] trait abstracts the file format. Each format lives in its
//! own sub-module and reports failures through [`ExportError`].
//!
//! | Format | Module | Density grid | Lyapunov curve |
//! |--------|--------|--------------|----------------|
//! | NumPy `.npy` | [`npy`] | `(n_bins, N)` array | `(N,)` array |
//! | CSV | [`csv`] | one row per bin | `parameter,exponent` |
//!
//! # Usage example
//!
//! ```rust,ignore
//! use bifurc_rs::output::export::{Exporter, NpyExporter, save_density};
//!
//! let histogram = engine.run(&scenario, &config)?;
//!
//! // Fixed file name inside an output directory: out/logmap.npy
//! let path = save_density(&histogram, "out")?;
//!
//! // Any path
//! NpyExporter.export_density(&histogram, "grid.npy")?;
//! ```

pub mod csv;
pub mod npy;

pub use csv::{CsvConfig, CsvExporter, CsvMetadata, export_density_csv, export_lyapunov_csv};
pub use npy::{DENSITY_ARRAY_FILE, DENSITY_IMAGE_FILE, NpyExporter, read_npy_grid, save_density, write_npy_grid};

use thiserror::Error;

use crate::engine::{DensityHistogram, LyapunovExponent};

/// Errors raised while writing or reading result files
#[derive(Debug, Error)]
pub enum ExportError {
    /// Underlying file system error
    #[error("I/O error: {0}")]
    Io(#[from] std::io::Error),

    /// Nothing to write
    #[error("Empty data: {0}")]
    EmptyData(String),

    /// Series or arrays whose sizes disagree
    #[error("Shape mismatch: expected {expected}, found {found}")]
    ShapeMismatch { expected: String, found: String },

    /// A file that is not a `<f8` C-order `.npy` array
    #[error("Invalid .npy file: {0}")]
    Format(String),
}

/// Abstraction trait for all export formats.
///
/// # Associated type `Error`
///
/// Each format manages its own errors via the associated type, so callers
/// can match on the failure instead of inspecting a boxed error.
pub trait Exporter {
    /// Error type specific to this export format.
    type Error: std::error::Error;

    /// Exports a finalized density histogram.
    ///
    /// Cells without data are NaN and are written as such (or as an empty
    /// field where the format has no NaN).
    ///
    /// # Errors
    ///
    /// Returns an error if the grid is empty or the file cannot be written.
    fn export_density(&self, histogram: &DensityHistogram, path: &str) -> Result<(), Self::Error>;

    /// Exports a Lyapunov curve, one value per sweep entry.
    ///
    /// `-inf` and NaN exponents are valid results and are written unchanged.
    ///
    /// # Errors
    ///
    /// Returns an error if the curve is empty, if parameters and exponents
    /// differ in length or if the file cannot be written.
    fn export_lyapunov(&self, exponent: &LyapunovExponent, path: &str) -> Result<(), Self::Error>;
}

/// Shared validation of a Lyapunov curve
pub(crate) fn check_curve(exponent: &LyapunovExponent) -> Result<(), ExportError> {
    if exponent.is_empty() {
        return Err(ExportError::EmptyData("Lyapunov curve has no entries".to_string()));
    }
    if exponent.parameters.len() != exponent.exponents.len() {
        return Err(ExportError::ShapeMismatch {
            expected: format!("{} exponents", exponent.parameters.len()),
            found: format!("{} exponents", exponent.exponents.len()),
        });
    }
    Ok(())
}

/// Shared validation of a density grid
pub(crate) fn check_grid(histogram: &DensityHistogram) -> Result<(), ExportError> {
    let (rows, columns) = histogram.shape();
    if rows == 0 || columns == 0 {
        return Err(ExportError::EmptyData(format!("density grid has shape ({}, {})", rows, columns)));
    }
    if histogram.parameters.len() != columns {
        return Err(ExportError::ShapeMismatch {
            expected: format!("{} parameter values", columns),
            found: format!("{} parameter values", histogram.parameters.len()),
        });
    }
    Ok(())
}
