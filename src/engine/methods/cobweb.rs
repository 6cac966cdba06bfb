//! Cobweb tracer
//!
//! Scalar, single-trajectory stepper producing everything a cobweb diagram
//! is made of:
//!
//! ```text
//!  z_{n+1}
//!     │        ╭── map curve (gapped at discontinuities)
//!     │   ┌────●
//!     │   │    │        ● marker at (z, f(z))
//!     │ ●─┼────┘        ─ horizontal (z, f(z)) → (f(z), f(z))
//!     │   │ ╱           │ vertical   (z, z)    → (z, f(z))   (from step 1)
//!     │   │╱  identity
//!     └───────────── z_n
//! ```
//!
//! The first step has no vertical segment: nothing connects the start value
//! to the diagonal yet. Its marker is flagged as emphasized instead.

use crate::engine::numeric;
use crate::engine::sweep::linspace;
use crate::engine::{IterationConfiguration, IterationSchedule};
use crate::maps::{IterativeMap, MapParameters};

// =================================================================================================
// Types
// =================================================================================================

/// Display ranges of a cobweb diagram
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CobwebWindow {
    /// `(min, max)` of `z_n`
    pub x: (f64, f64),

    /// `(min, max)` of `z_{n+1}`
    pub y: (f64, f64),
}

impl CobwebWindow {
    /// Create a window
    pub fn new(x: (f64, f64), y: (f64, f64)) -> Self {
        Self { x, y }
    }

    /// Same range on both axes
    pub fn square(low: f64, high: f64) -> Self {
        Self::new((low, high), (low, high))
    }

    /// Ranges must be finite and non-empty
    pub fn validate(&self) -> Result<(), String> {
        for (axis, (low, high)) in [("x", self.x), ("y", self.y)] {
            if !low.is_finite() || !high.is_finite() {
                return Err(format!("Cobweb {} range must be finite, got ({}, {})", axis, low, high));
            }
            if low >= high {
                return Err(format!("Cobweb {} range is empty: ({}, {})", axis, low, high));
            }
        }
        Ok(())
    }

    /// Identity segment spanning both ranges
    pub fn diagonal(&self) -> ((f64, f64), (f64, f64)) {
        let low = self.x.0.min(self.y.0);
        let high = self.x.1.max(self.y.1);
        ((low, low), (high, high))
    }
}

/// Orientation of a staircase segment
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SegmentKind {
    /// From the curve to the diagonal
    Horizontal,

    /// From the diagonal to the curve
    Vertical,
}

/// One drawn line of the staircase
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CobwebSegment {
    /// First point
    pub start: (f64, f64),

    /// Second point
    pub end: (f64, f64),

    /// Orientation
    pub kind: SegmentKind,
}

/// Point `(z, f(z))` on the map curve
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CobwebMarker {
    /// Position
    pub point: (f64, f64),

    /// Set for the first step only
    pub emphasized: bool,

    /// Opacity `(i + 1) / step_count`, 1 for the emphasized marker
    pub shade: f64,
}

/// Everything produced by one step `z → f(z)`
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct CobwebStep {
    /// Step index
    pub index: usize,

    /// `z`
    pub from: f64,

    /// `f(z)`
    pub to: f64,

    /// `(z, f(z)) → (f(z), f(z))`
    pub horizontal: CobwebSegment,

    /// `(z, z) → (z, f(z))`, absent on the first step
    pub vertical: Option<CobwebSegment>,

    /// Marker at `(z, f(z))`
    pub marker: CobwebMarker,
}

/// Output of [`CobwebTracer::trace`]
#[derive(Debug, Clone)]
pub struct CobwebTrace {
    /// Staircase, one entry per step
    pub steps: Vec<CobwebStep>,

    /// Map curve `(t, f(t))`, `None` where masked
    pub curve: Vec<(f64, Option<f64>)>,

    /// Identity line
    pub diagonal: ((f64, f64), (f64, f64)),

    /// Display ranges
    pub window: CobwebWindow,

    /// Curve samples masked because they were not finite
    pub non_finite: usize,
}

impl CobwebTrace {
    /// Staircase segments in drawing order
    pub fn segments(&self) -> impl Iterator<Item = &CobwebSegment> + '_ {
        self.steps
            .iter()
            .flat_map(|step| std::iter::once(&step.horizontal).chain(step.vertical.as_ref()))
    }

    /// Markers in drawing order
    pub fn markers(&self) -> impl Iterator<Item = &CobwebMarker> + '_ {
        self.steps.iter().map(|step| &step.marker)
    }

    /// Curve split into continuous runs, ready to be drawn as polylines
    pub fn curve_runs(&self) -> Vec<Vec<(f64, f64)>> {
        let mut runs = Vec::new();
        let mut current = Vec::new();
        for &(t, y) in &self.curve {
            match y {
                Some(y) => current.push((t, y)),
                None if !current.is_empty() => runs.push(std::mem::take(&mut current)),
                None => {}
            }
        }
        if !current.is_empty() {
            runs.push(current);
        }
        runs
    }
}

// =================================================================================================
// Tracer
// =================================================================================================

/// Cobweb tracer
///
/// # Example
///
/// ```rust
/// use bifurc_rs::engine::{CobwebTracer, CobwebWindow, IterationConfiguration};
/// use bifurc_rs::maps::{IterativeMap, MapParameters};
/// use bifurc_rs::models::QuadraticNewton;
///
/// let params = MapParameters::new(1.0, 0.5);
/// let trace = CobwebTracer::trace(
///     &QuadraticNewton,
///     &params,
///     0.3,
///     &CobwebWindow::square(-3.0, 3.0),
///     &IterationConfiguration::cobweb(20),
/// )
/// .unwrap();
///
/// assert_eq!(trace.steps.len(), 20);
/// assert!(trace.steps[0].marker.emphasized);
/// assert!(trace.steps[0].vertical.is_none());
/// ```
#[derive(Debug, Clone, Copy, Default)]
pub struct CobwebTracer;

impl CobwebTracer {
    /// Trace `step_count` steps from `z0` and sample the curve over the window
    pub fn trace<M: IterativeMap + ?Sized>(
        map: &M,
        params: &MapParameters,
        z0: f64,
        window: &CobwebWindow,
        config: &IterationConfiguration,
    ) -> Result<CobwebTrace, String> {
        // ====== Validation ======

        config.validate()?;
        let (step_count, curve_samples, gap_radius) = match &config.schedule {
            IterationSchedule::Cobweb { step_count, curve_samples, gap_radius } => {
                (*step_count, *curve_samples, *gap_radius)
            }
            other => {
                return Err(format!(
                    "CobwebTracer only supports Cobweb configuration, got {}",
                    other.name()
                ));
            }
        };
        window.validate()?;

        // ====== Curve ======

        let discontinuities = map.discontinuities(params);
        let mut non_finite = 0;
        let curve: Vec<(f64, Option<f64>)> = linspace(window.x.0, window.x.1, curve_samples)?
            .into_iter()
            .map(|t| {
                if discontinuities.iter().any(|d| (t - d).abs() < gap_radius) {
                    return (t, None);
                }
                let y = map.evaluate(t, params);
                if y.is_finite() {
                    (t, Some(y))
                } else {
                    non_finite += 1;
                    (t, None)
                }
            })
            .collect();
        numeric::report_domain_error("Cobweb curve", non_finite);

        // ====== Staircase ======

        let mut steps = Vec::with_capacity(step_count);
        let mut current = z0;
        for index in 0..step_count {
            let next = map.evaluate(current, params);

            let vertical = (index >= 1).then_some(CobwebSegment {
                start: (current, current),
                end: (current, next),
                kind: SegmentKind::Vertical,
            });
            let marker = CobwebMarker {
                point: (current, next),
                emphasized: index == 0,
                shade: if index == 0 { 1.0 } else { (index + 1) as f64 / step_count as f64 },
            };

            steps.push(CobwebStep {
                index,
                from: current,
                to: next,
                horizontal: CobwebSegment {
                    start: (current, next),
                    end: (next, next),
                    kind: SegmentKind::Horizontal,
                },
                vertical,
                marker,
            });
            current = next;
        }

        let lost = steps.iter().filter(|step| !step.to.is_finite()).count();
        numeric::report_domain_error("Cobweb trajectory", lost);

        Ok(CobwebTrace {
            steps,
            curve,
            diagonal: window.diagonal(),
            window: *window,
            non_finite,
        })
    }
}

// =================================================================================================
// Tests
// =================================================================================================
