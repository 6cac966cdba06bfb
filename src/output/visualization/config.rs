//! Plot configuration shared across visualization modules

use plotters::prelude::*;

/// Density rasters are written at 6.4 × 4.8 in, 300 dpi
pub const DENSITY_RESOLUTION: (u32, u32) = (1920, 1440);

/// Configuration for customizing plots
///
/// Used by the bifurcation, complex, density and cobweb renderers.
///
/// # Fields
///
/// - `width`, `height`: Dimensions in pixels
/// - `title`: Plot title
/// - `xlabel`, `ylabel`: Axis labels
/// - `point_color`: Scatter colour (bifurcation points, cobweb staircase)
/// - `accent_color`: Chaotic Lyapunov points, first cobweb marker
/// - `point_alpha`: Opacity of scatter points
/// - `point_size`: Marker radius in pixels
/// - `background`: Background colour, also used for "no data" cells
/// - `show_grid`: Whether to show grid lines
///
/// # Example
///
/// ```rust,ignore
/// use bifurc_rs::output::visualization::PlotConfig;
/// use plotters::prelude::*;
///
/// let mut config = PlotConfig::bifurcation("Quadratic Newton, β = 0.5");
/// config.point_color = BLUE;
/// config.point_alpha = 0.05;
/// ```
#[derive(Clone)]
pub struct PlotConfig {
    /// Image width in pixels (default: 1024)
    pub width: u32,

    /// Image height in pixels (default: 768)
    pub height: u32,

    /// Plot title (default: "Plot")
    pub title: String,

    /// X-axis label (default: auto-set by plot type)
    pub xlabel: String,

    /// Y-axis label (default: "z")
    pub ylabel: String,

    /// Scatter colour (default: GREEN)
    pub point_color: RGBColor,

    /// Accent colour (default: RED)
    pub accent_color: RGBColor,

    /// Scatter opacity (default: 0.3)
    pub point_alpha: f64,

    /// Marker radius in pixels (default: 1)
    pub point_size: u32,

    /// Background colour (default: WHITE)
    pub background: RGBColor,

    /// Show grid lines (default: true)
    pub show_grid: bool,
}

impl Default for PlotConfig {
    fn default() -> Self {
        Self {
            width: 1024,
            height: 768,
            title: "Plot".to_string(),
            xlabel: String::new(), // Set by specific plot type
            ylabel: "z".to_string(),
            point_color: GREEN,
            accent_color: RED,
            point_alpha: 0.3,
            point_size: 1,
            background: WHITE,
            show_grid: true,
        }
    }
}

/// Helper trait to accept both `String` and `None` for optional titles
pub trait IntoOptionalTitle {
    fn into_optional_title(self) -> Option<String>;
}

impl IntoOptionalTitle for &str {
    fn into_optional_title(self) -> Option<String> {
        Some(self.to_string())
    }
}

impl IntoOptionalTitle for String {
    fn into_optional_title(self) -> Option<String> {
        Some(self)
    }
}

impl<T: IntoOptionalTitle> IntoOptionalTitle for Option<T> {
    fn into_optional_title(self) -> Option<String> {
        self.and_then(|t| t.into_optional_title())
    }
}

/// Constant for no title (default title will be used)
pub const NO_TITLE: Option<&str> = None;

impl PlotConfig {
    /// Bifurcation + Lyapunov figure
    ///
    /// Tall two-panel layout, title defaults to "Bifurcation diagram".
    pub fn bifurcation(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.height = 1024;
        config.xlabel = "α".to_string();
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Bifurcation diagram".to_string());
        config
    }

    /// Complex figure (real part over imaginary part)
    pub fn complex(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::bifurcation(title);
        config.ylabel = "Re(z)".to_string();
        if config.title == "Bifurcation diagram" {
            config.title = "Complex bifurcation diagram".to_string();
        }
        config
    }

    /// Density heat map at 1920 × 1440
    pub fn density(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        (config.width, config.height) = DENSITY_RESOLUTION;
        config.xlabel = "r".to_string();
        config.ylabel = "x".to_string();
        config.show_grid = false;
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Density".to_string());
        config
    }

    /// Cobweb figure (square)
    pub fn cobweb(title: impl IntoOptionalTitle) -> Self {
        let mut config = Self::default();
        config.height = config.width;
        config.xlabel = "z_n".to_string();
        config.ylabel = "z_{n+1}".to_string();
        config.point_color = BLUE;
        config.point_alpha = 0.6;
        config.point_size = 5;
        config.title = title
            .into_optional_title()
            .unwrap_or_else(|| "Cobweb".to_string());
        config
    }

    /// Scatter style with the configured opacity
    pub(crate) fn point_style(&self) -> ShapeStyle {
        self.point_color.mix(self.point_alpha).filled()
    }
}

// =================================================================================================
// Tests
// =================================================================================================
