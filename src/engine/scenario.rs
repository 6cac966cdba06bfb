//! Iteration scenario
//!
//! A scenario is the "WHAT to iterate" half of a run: the map, its
//! configuration, the parameter sweep and the initial state vector.

use nalgebra::DVector;

use crate::maps::{AnalyticMap, IterativeMap, MapConfiguration};

use super::sweep::ParameterSweep;

/// Iteration scenario
///
/// Defines a specific case to iterate:
/// - Map (formula)
/// - Map configuration (fixed parameters, designated variable)
/// - Parameter sweep (x-axis, length N)
/// - Initial state (length N)
///
/// # Design
///
/// The same scenario can be fed to different engines. The map type defaults
/// to `dyn AnalyticMap`, so a scenario built from
/// [`MapFamily::build`](crate::models::MapFamily::build) works with every
/// engine; scenarios over a concrete map only work with the engines whose
/// capability requirements that map meets.
///
/// # Examples
///
/// ```rust
/// use bifurc_rs::engine::{ParameterSweep, Scenario};
/// use bifurc_rs::maps::MapConfiguration;
/// use bifurc_rs::models::MapFamily;
///
/// let scenario = Scenario::uniform(
///     MapFamily::CubicNewton.build(),
///     MapConfiguration::sweep_alpha(0.0),
///     ParameterSweep::linspace(0.1, 2.0, 100).unwrap(),
///     0.4,
/// );
/// assert!(scenario.validate().is_ok());
/// assert_eq!(scenario.len(), 100);
/// ```
pub struct Scenario<M: ?Sized = dyn AnalyticMap> {
    /// Map (formula)
    pub map: Box<M>,

    /// Fixed parameters and designated variable
    pub configuration: MapConfiguration,

    /// Values of the variable parameter
    pub sweep: ParameterSweep,

    /// Initial iterate for every sweep entry
    pub initial: DVector<f64>,
}

impl<M: IterativeMap + ?Sized> Scenario<M> {
    /// Create a scenario
    pub fn new(
        map: Box<M>,
        configuration: MapConfiguration,
        sweep: ParameterSweep,
        initial: DVector<f64>,
    ) -> Self {
        Self { map, configuration, sweep, initial }
    }

    /// Create a scenario starting every entry at `z0`
    pub fn uniform(map: Box<M>, configuration: MapConfiguration, sweep: ParameterSweep, z0: f64) -> Self {
        let initial = DVector::from_element(sweep.len(), z0);
        Self::new(map, configuration, sweep, initial)
    }

    /// Verify scenario content
    ///
    /// The initial state must have exactly one entry per sweep value.
    pub fn validate(&self) -> Result<(), String> {
        self.configuration.validate()?;
        self.sweep.validate()?;
        super::check_lengths(self.initial.len(), self.sweep.len())
    }

    /// Get map name
    pub fn get_map_name(&self) -> &str {
        self.map.name()
    }

    /// Number of sweep entries (N)
    pub fn len(&self) -> usize {
        self.sweep.len()
    }

    /// Check emptiness (never true for a validated scenario)
    pub fn is_empty(&self) -> bool {
        self.sweep.is_empty()
    }
}

impl<M: IterativeMap + ?Sized> std::fmt::Debug for Scenario<M> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Scenario")
            .field("map", &self.get_map_name())
            .field("configuration", &self.configuration)
            .field("entries", &self.len())
            .field("sweep range", &self.sweep.range())
            .finish()
    }
}

// ================================================================================================
// Tests
// ================================================================================================
