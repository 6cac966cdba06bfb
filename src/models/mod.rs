//! Map families shipped with the crate
//!
//! All families implement [`IterativeMap`](crate::maps::IterativeMap),
//! [`DifferentiableMap`](crate::maps::DifferentiableMap) and
//! [`ComplexMap`](crate::maps::ComplexMap). The engines never name them:
//! a family is picked once, at construction, through [`MapFamily`].
//!
//! # Available Maps
//!
//! | Family | Formula | Discontinuities |
//! |--------|---------|-----------------|
//! | [`QuadraticNewton`] | `z - (z²+αz+β)/(2z+α)` | `-α/2` |
//! | [`CubicNewton`] | `2z³/(3z²-α)` | `±√(α/3)` |
//! | [`GeneralPolynomial`] | `α/(α+1)·(z + 1/z - (α-1)/α)` | `0` |
//! | [`Exponential`] | `eᶻ(z-1)` | none |

// =================================================================================================
// Module Declarations
// =================================================================================================

pub mod cubic_newton;
pub mod exponential;
pub mod general_polynomial;
pub mod quadratic_newton;

// =================================================================================================
// Public Re-exports
// =================================================================================================

pub use cubic_newton::CubicNewton;
pub use exponential::Exponential;
pub use general_polynomial::GeneralPolynomial;
pub use quadratic_newton::QuadraticNewton;

use crate::maps::AnalyticMap;

/// Registered map families
///
/// # Example
///
/// ```rust
/// use bifurc_rs::models::MapFamily;
///
/// let map = MapFamily::QuadraticNewton.build();
/// assert_eq!(map.name(), "Quadratic Newton");
/// ```
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum MapFamily {
    /// [`QuadraticNewton`]
    QuadraticNewton,

    /// [`CubicNewton`]
    CubicNewton,

    /// [`GeneralPolynomial`]
    GeneralPolynomial,

    /// [`Exponential`]
    Exponential,
}

impl MapFamily {
    /// Every registered family
    pub const ALL: [MapFamily; 4] = [
        MapFamily::QuadraticNewton,
        MapFamily::CubicNewton,
        MapFamily::GeneralPolynomial,
        MapFamily::Exponential,
    ];

    /// Instantiate the family as a trait object
    pub fn build(self) -> Box<dyn AnalyticMap> {
        match self {
            MapFamily::QuadraticNewton => Box::new(QuadraticNewton),
            MapFamily::CubicNewton => Box::new(CubicNewton),
            MapFamily::GeneralPolynomial => Box::new(GeneralPolynomial),
            MapFamily::Exponential => Box::new(Exponential),
        }
    }
}
