//! Trajectory observers
//!
//! Trajectories are never stored: an engine hands each post-burn-in snapshot
//! to an observer and then overwrites it. Observers decide what to keep (a
//! scatter series for a renderer, a running statistic, nothing at all).

/// Consumer of real trajectory snapshots
pub trait TrajectoryObserver {
    /// Called once per retained step
    ///
    /// - `step`: index of the step that produced `state` (`>= burn_in`)
    /// - `sweep`: parameter values, same length as `state`
    /// - `state`: iterate values after the step
    fn observe(&mut self, step: usize, sweep: &[f64], state: &[f64]);
}

/// The unit observer ignores every snapshot
impl TrajectoryObserver for () {
    fn observe(&mut self, _step: usize, _sweep: &[f64], _state: &[f64]) {}
}

impl<F: FnMut(usize, &[f64], &[f64])> TrajectoryObserver for F {
    fn observe(&mut self, step: usize, sweep: &[f64], state: &[f64]) {
        self(step, sweep, state)
    }
}

/// Consumer of complex trajectory snapshots
///
/// Receives the real part, the imaginary part and its negation as three
/// separate series, so the mirrored branch of the diagram is explicit.
pub trait ComplexObserver {
    /// Called once per retained step
    fn observe(&mut self, step: usize, sweep: &[f64], real: &[f64], imaginary: &[f64], mirrored: &[f64]);
}

impl ComplexObserver for () {
    fn observe(&mut self, _step: usize, _sweep: &[f64], _real: &[f64], _imaginary: &[f64], _mirrored: &[f64]) {}
}

// =================================================================================================
// Collectors
// =================================================================================================

/// Scatter points `(parameter, value)` for a bifurcation diagram
///
/// Non-finite values are skipped: they cannot be drawn.
#[derive(Debug, Clone, Default)]
pub struct ScatterSeries {
    /// Collected points
    pub points: Vec<(f64, f64)>,

    /// Snapshots observed
    pub snapshots: usize,
}

impl ScatterSeries {
    /// Empty series
    pub fn new() -> Self {
        Self::default()
    }

    /// Number of collected points
    pub fn len(&self) -> usize {
        self.points.len()
    }

    /// Check emptiness
    pub fn is_empty(&self) -> bool {
        self.points.is_empty()
    }
}

impl TrajectoryObserver for ScatterSeries {
    fn observe(&mut self, _step: usize, sweep: &[f64], state: &[f64]) {
        self.snapshots += 1;
        self.points.extend(
            sweep
                .iter()
                .zip(state)
                .filter(|(_, z)| z.is_finite())
                .map(|(&r, &z)| (r, z)),
        );
    }
}

/// Scatter points for the complex diagram: real panel and imaginary panel
#[derive(Debug, Clone, Default)]
pub struct ComplexScatter {
    /// `(parameter, Re z)`
    pub real: ScatterSeries,

    /// `(parameter, Im z)` and `(parameter, -Im z)`
    pub imaginary: ScatterSeries,
}

impl ComplexScatter {
    /// Empty collector
    pub fn new() -> Self {
        Self::default()
    }
}

impl ComplexObserver for ComplexScatter {
    fn observe(&mut self, step: usize, sweep: &[f64], real: &[f64], imaginary: &[f64], mirrored: &[f64]) {
        self.real.observe(step, sweep, real);
        self.imaginary.observe(step, sweep, imaginary);
        self.imaginary.observe(step, sweep, mirrored);
    }
}
