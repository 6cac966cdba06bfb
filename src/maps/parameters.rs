//! Map parameters and configuration
//!
//! Map families in this crate take at most two real parameters, `alpha` and
//! `beta`. A [`MapConfiguration`] fixes both and designates which one is swept
//! along the x-axis of a diagram.

use std::fmt;

// =================================================================================================
// Parameter identifiers
// =================================================================================================

/// Named map parameter (type-safe identifier)
///
/// Replaces string-keyed lookups: the swept parameter of a diagram is one of
/// these variants, never a name resolved at call time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapParameter {
    /// First parameter α (linear coefficient for the Newton maps)
    Alpha,

    /// Second parameter β (constant coefficient for the quadratic Newton map)
    Beta,
}

impl MapParameter {
    /// Short name used in labels and metadata
    pub fn name(&self) -> &'static str {
        match self {
            MapParameter::Alpha => "alpha",
            MapParameter::Beta => "beta",
        }
    }

    /// Greek symbol for axis labels
    pub fn symbol(&self) -> &'static str {
        match self {
            MapParameter::Alpha => "α",
            MapParameter::Beta => "β",
        }
    }
}

impl fmt::Display for MapParameter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

// =================================================================================================
// Parameter record
// =================================================================================================

/// Values of all map parameters for one evaluation
///
/// Maps that do not use a parameter simply ignore it.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub struct MapParameters {
    /// α
    pub alpha: f64,

    /// β
    pub beta: f64,
}

impl MapParameters {
    /// Create a parameter record
    pub fn new(alpha: f64, beta: f64) -> Self {
        Self { alpha, beta }
    }

    /// Record with only α set (β = 0)
    pub fn alpha(alpha: f64) -> Self {
        Self { alpha, beta: 0.0 }
    }

    /// Read a parameter by identifier
    pub fn get(&self, parameter: MapParameter) -> f64 {
        match parameter {
            MapParameter::Alpha => self.alpha,
            MapParameter::Beta => self.beta,
        }
    }

    /// Copy of this record with one parameter replaced
    #[inline]
    pub fn with(mut self, parameter: MapParameter, value: f64) -> Self {
        match parameter {
            MapParameter::Alpha => self.alpha = value,
            MapParameter::Beta => self.beta = value,
        }
        self
    }
}

// =================================================================================================
// Map configuration
// =================================================================================================

/// Immutable map configuration for one diagram
///
/// Holds the fixed parameter values plus the designated variable parameter.
/// The fixed value of the variable parameter is kept (it is what the cobweb
/// tracer and single-point evaluations use) but is overridden entry by entry
/// when iterating across a [`ParameterSweep`](crate::engine::ParameterSweep).
///
/// # Example
///
/// ```rust
/// use bifurc_rs::maps::{MapConfiguration, MapParameter, MapParameters};
///
/// let config = MapConfiguration::new(MapParameters::new(1.0, 0.5), MapParameter::Alpha);
/// let at = config.at(2.5);
/// assert_eq!(at.alpha, 2.5);
/// assert_eq!(at.beta, 0.5);
/// ```
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct MapConfiguration {
    parameters: MapParameters,
    variable: MapParameter,
}

impl MapConfiguration {
    /// Create a configuration sweeping `variable`
    pub fn new(parameters: MapParameters, variable: MapParameter) -> Self {
        Self { parameters, variable }
    }

    /// Configuration sweeping α with β fixed
    pub fn sweep_alpha(beta: f64) -> Self {
        Self::new(MapParameters::new(0.0, beta), MapParameter::Alpha)
    }

    /// Fixed parameter values
    pub fn parameters(&self) -> &MapParameters {
        &self.parameters
    }

    /// Designated variable parameter
    pub fn variable(&self) -> MapParameter {
        self.variable
    }

    /// Parameter record for the sweep entry holding `value`
    #[inline]
    pub fn at(&self, value: f64) -> MapParameters {
        self.parameters.with(self.variable, value)
    }

    /// Reject non-finite fixed parameters
    pub fn validate(&self) -> Result<(), String> {
        if !self.parameters.alpha.is_finite() || !self.parameters.beta.is_finite() {
            return Err(format!(
                "Map parameters must be finite, got alpha = {}, beta = {}",
                self.parameters.alpha, self.parameters.beta
            ));
        }
        Ok(())
    }
}

// =================================================================================================
// Tests
// =================================================================================================
