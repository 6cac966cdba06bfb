//! Output of engine results
//!
//! - **Visualization**: PNG/SVG figures using plotters
//! - **Export**: `.npy` and CSV files for external analysis
//!
//! # Architecture
//!
//! ```text
//! output/
//! ├── mod.rs              ← This file
//! ├── visualization/      ← Figures
//! │   ├── config.rs
//! │   ├── bifurcation.rs
//! │   ├── density.rs
//! │   └── cobweb.rs
//! └── export/             ← Data files
//!     ├── mod.rs          ← Exporter trait, ExportError
//!     ├── npy.rs
//!     └── csv.rs
//! ```
//!
//! # Quick Start
//!
//! ```rust,ignore
//! use bifurc_rs::output::{plot_density, save_density, DENSITY_IMAGE_FILE, PlotConfig};
//!
//! let histogram = engine.run(&scenario, &config)?;
//! save_density(&histogram, "out")?;                       // out/logmap.npy
//! plot_density(&histogram, DENSITY_IMAGE_FILE, Some(&PlotConfig::density("r ∈ [0.3, 0.5)")))?;
//! ```

pub mod export;
pub mod visualization;

pub use visualization::{
    PlotConfig,
    plot_bifurcation,
    plot_cobweb,
    plot_complex_bifurcation,
    plot_density,
};

pub use export::{
    CsvConfig,
    DENSITY_ARRAY_FILE,
    DENSITY_IMAGE_FILE,
    ExportError,
    Exporter,
    NpyExporter,
    export_lyapunov_csv,
    read_npy_grid,
    save_density,
};
