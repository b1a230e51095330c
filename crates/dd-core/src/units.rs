// dd-core/src/units.rs
//
// Everything inside the coupling core runs in US customary units (ft, ft², ft³/s, s).
// Conversion happens only where values cross the toolkit boundary.

use uom::si::area::{square_foot, square_meter};
use uom::si::f64::{Area, Length};
use uom::si::length::{foot, meter};

/// External unit system a model is described in.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum UnitSystem {
    /// ft, ft², ft³/s (same as internal)
    #[default]
    Us,
    /// m, m², m³/s
    Si,
}

impl UnitSystem {
    pub fn length_to_internal(self, v: f64) -> f64 {
        match self {
            UnitSystem::Us => v,
            UnitSystem::Si => Length::new::<meter>(v).get::<foot>(),
        }
    }

    pub fn length_from_internal(self, v: f64) -> f64 {
        match self {
            UnitSystem::Us => v,
            UnitSystem::Si => Length::new::<foot>(v).get::<meter>(),
        }
    }

    pub fn area_to_internal(self, v: f64) -> f64 {
        match self {
            UnitSystem::Us => v,
            UnitSystem::Si => Area::new::<square_meter>(v).get::<square_foot>(),
        }
    }

    pub fn area_from_internal(self, v: f64) -> f64 {
        match self {
            UnitSystem::Us => v,
            UnitSystem::Si => Area::new::<square_foot>(v).get::<square_meter>(),
        }
    }

    /// ft³/s to the model's flow unit.
    ///
    /// Derived from the foot so that flow, area and length conversions agree.
    pub fn flow_from_internal(self, v: f64) -> f64 {
        match self {
            UnitSystem::Us => v,
            UnitSystem::Si => v * Length::new::<foot>(1.0).get::<meter>().powi(3),
        }
    }
}

pub mod constants {
    /// Gravitational acceleration used by the weir/orifice equations (ft/s²).
    pub const GRAVITY_FT_PER_S2: f64 = 32.2;
}
