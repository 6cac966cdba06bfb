//! CSV export of engine results
//!
//! CSV files open in spreadsheets, pandas or any plotting tool. Two layouts
//! are written:
//!
//! - **Lyapunov curve**: one row per sweep entry, `parameter,exponent`
//! - **Density grid**: one row per bin (highest values first), the bin
//!   interval followed by one column per parameter value; cells without data
//!   are left empty
//!
//! # Quick Examples
//!
//! ## Minimal Export
//!
//! ```rust,ignore
//! use bifurc_rs::output::export::export_lyapunov_csv;
//!
//! let result = BifurcationEngine::new().run(&scenario, &config)?;
//! export_lyapunov_csv(result.lyapunov.as_ref().unwrap(), "lyapunov.csv", None)?;
//! ```
//!
//! **Output** (`lyapunov.csv`):
//! ```csv
//! alpha,lyapunov
//! 0.500000,0.318229
//! 0.510000,0.291705
//! ...
//! ```
//!
//! ## With Metadata
//!
//! ```rust,ignore
//! use bifurc_rs::output::export::{export_lyapunov_csv, CsvConfig, CsvMetadata};
//!
//! let config = CsvConfig::default().with_metadata(CsvMetadata::from_run(&result.metadata));
//! export_lyapunov_csv(&exponent, "lyapunov.csv", Some(&config))?;
//! ```
//!
//! **Output** (`lyapunov.csv`):
//! ```csv
//! # Bifurcation Run Data
//! # Generated: 2026-10-19T15:30:00+00:00
//! # burn-in: 50
//! # engine: Bifurcation + Lyapunov
//! # map: Quadratic Newton
//! # steps: 200
//! #
//! alpha,lyapunov
//! ...
//! ```

use std::fs::File;
use std::io::{BufWriter, Write};

use log::info;

use super::{ExportError, Exporter, check_curve, check_grid};
use crate::engine::{DensityHistogram, LyapunovExponent, RunMetadata};

// =============================================================================
// Configuration Structures
// =============================================================================

/// Configuration for CSV export
///
/// # Fields
///
/// - `delimiter`: Column separator (default: ',')
/// - `decimal_separator`: Decimal point character (default: '.')
/// - `precision`: Number of decimal places (default: 6)
/// - `include_metadata`: Add header comments with run info
/// - `metadata`: Run metadata to include
/// - `parameter_header`: Header of the parameter column
/// - `exponent_header`: Header of the exponent column
///
/// # Example
///
/// ```rust,ignore
/// let config = CsvConfig {
///     delimiter: ';',
///     precision: 10,
///     ..Default::default()
/// };
/// ```
#[derive(Clone)]
pub struct CsvConfig {
    /// Column delimiter (default: ',')
    pub delimiter: char,

    /// Decimal separator (default: '.')
    pub decimal_separator: char,

    /// Number of decimal places for floating-point values (default: 6)
    pub precision: usize,

    /// Include metadata header comments (default: false)
    pub include_metadata: bool,

    /// Metadata to include in header
    pub metadata: Option<CsvMetadata>,

    /// Header of the parameter column (default: "alpha")
    pub parameter_header: String,

    /// Header of the exponent column (default: "lyapunov")
    pub exponent_header: String,
}

impl Default for CsvConfig {
    fn default() -> Self {
        Self {
            delimiter: ',',
            decimal_separator: '.',
            precision: 6,
            include_metadata: false,
            metadata: None,
            parameter_header: "alpha".to_string(),
            exponent_header: "lyapunov".to_string(),
        }
    }
}

impl CsvConfig {
    /// European CSV format (semicolon, comma for decimal)
    pub fn european() -> Self {
        Self {
            delimiter: ';',
            decimal_separator: ',',
            ..Default::default()
        }
    }

    /// High precision (12 decimal places)
    pub fn high_precision() -> Self {
        Self {
            precision: 12,
            ..Default::default()
        }
    }

    /// Builder pattern: set delimiter
    pub fn delimiter(mut self, delimiter: char) -> Self {
        self.delimiter = delimiter;
        self
    }

    /// Builder pattern: set precision
    pub fn precision(mut self, precision: usize) -> Self {
        self.precision = precision;
        self
    }

    /// Builder pattern: attach metadata and turn the header on
    pub fn with_metadata(mut self, metadata: CsvMetadata) -> Self {
        self.include_metadata = true;
        self.metadata = Some(metadata);
        self
    }
}

/// Metadata for CSV header comments
///
/// Entries are written as `# key: value` lines after a timestamp.
#[derive(Clone, Default)]
pub struct CsvMetadata {
    /// First comment line (default: "Bifurcation Run Data")
    pub title: Option<String>,

    /// Key/value pairs, written in order
    pub entries: Vec<(String, String)>,
}

impl CsvMetadata {
    /// Copy every entry of a run's metadata, sorted by key
    pub fn from_run(metadata: &RunMetadata) -> Self {
        Self {
            title: None,
            entries: metadata
                .sorted()
                .into_iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        }
    }

    /// Add custom parameter
    pub fn add_custom(&mut self, key: &str, value: &str) {
        self.entries.push((key.to_string(), value.to_string()));
    }
}

// =============================================================================
// Helper Functions
// =============================================================================

fn write_metadata_header<W: Write>(writer: &mut W, metadata: &CsvMetadata) -> Result<(), ExportError> {
    let title = metadata.title.as_deref().unwrap_or("Bifurcation Run Data");
    writeln!(writer, "# {}", title)?;
    writeln!(writer, "# Generated: {}", chrono::Utc::now().to_rfc3339())?;

    for (key, value) in &metadata.entries {
        writeln!(writer, "# {}: {}", key, value)?;
    }

    writeln!(writer, "#")?;
    Ok(())
}

/// Format number with configured precision and decimal separator
///
/// Infinite and NaN values keep Rust's spelling (`inf`, `-inf`, `NaN`).
fn format_number(value: f64, config: &CsvConfig) -> String {
    let formatted = format!("{:.prec$}", value, prec = config.precision);

    if config.decimal_separator != '.' {
        formatted.replace('.', &config.decimal_separator.to_string())
    } else {
        formatted
    }
}

fn open(path: &str, config: &CsvConfig) -> Result<BufWriter<File>, ExportError> {
    let mut writer = BufWriter::new(File::create(path)?);
    if config.include_metadata
        && let Some(metadata) = &config.metadata
    {
        write_metadata_header(&mut writer, metadata)?;
    }
    Ok(writer)
}

// =============================================================================
// Export Functions
// =============================================================================

/// Export a Lyapunov curve to CSV
///
/// # Arguments
///
/// * `exponent` - Lyapunov curve of a bifurcation run
/// * `output_path` - Output file path
/// * `config` - Optional CSV configuration (uses default if None)
///
/// # Errors
///
/// - Empty curve
/// - Parameters and exponents of different lengths
/// - File creation errors
pub fn export_lyapunov_csv(
    exponent: &LyapunovExponent,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), ExportError> {
    // ============================= Validation =============================

    check_curve(exponent)?;

    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);

    // ============================= Write ==================================

    let mut writer = open(output_path, config)?;
    writeln!(writer, "{}{}{}", config.parameter_header, config.delimiter, config.exponent_header)?;

    for (r, l) in exponent.parameters.iter().zip(exponent.exponents.iter()) {
        writeln!(writer, "{}{}{}", format_number(*r, config), config.delimiter, format_number(*l, config))?;
    }
    writer.flush()?;

    info!("Lyapunov curve ({} entries) written to {}", exponent.len(), output_path);
    Ok(())
}

/// Export a density grid to CSV
///
/// Rows follow the grid (highest values first). Each row starts with the
/// bin's lower and upper edge.
pub fn export_density_csv(
    histogram: &DensityHistogram,
    output_path: &str,
    config: Option<&CsvConfig>,
) -> Result<(), ExportError> {
    check_grid(histogram)?;

    let binding = CsvConfig::default();
    let config = config.unwrap_or(&binding);
    let d = config.delimiter;

    let mut writer = open(output_path, config)?;

    write!(writer, "bin_low{}bin_high", d)?;
    for r in histogram.parameters.iter() {
        write!(writer, "{}{}", d, format_number(*r, config))?;
    }
    writeln!(writer)?;

    for (row, cells) in histogram.grid.rows().into_iter().enumerate() {
        let (low, high) = histogram.edges.row_interval(row);
        write!(writer, "{}{}{}", format_number(low, config), d, format_number(high, config))?;
        for value in cells {
            if value.is_nan() {
                write!(writer, "{}", d)?;
            } else {
                write!(writer, "{}{}", d, format_number(*value, config))?;
            }
        }
        writeln!(writer)?;
    }
    writer.flush()?;

    let (rows, columns) = histogram.shape();
    info!("Density grid ({}, {}) written to {}", rows, columns, output_path);
    Ok(())
}

/// CSV implementation of [`Exporter`]
#[derive(Clone, Default)]
pub struct CsvExporter {
    pub config: CsvConfig,
}

impl CsvExporter {
    pub fn new(config: CsvConfig) -> Self {
        Self { config }
    }
}

impl Exporter for CsvExporter {
    type Error = ExportError;

    fn export_density(&self, histogram: &DensityHistogram, path: &str) -> Result<(), ExportError> {
        export_density_csv(histogram, path, Some(&self.config))
    }

    fn export_lyapunov(&self, exponent: &LyapunovExponent, path: &str) -> Result<(), ExportError> {
        export_lyapunov_csv(exponent, path, Some(&self.config))
    }
}

// =================================================================================================
// Tests
// =================================================================================================
