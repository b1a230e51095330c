//! Coupling regime classification.

use crate::common::Heads;
use crate::error::{CouplingError, CouplingResult};

/// Flow condition at one opening.
///
/// `NoCoupling` is never produced by [`classify`]; it marks an opening that has
/// been closed through the toolkit and is skipped by the aggregator.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum CouplingRegime {
    #[default]
    NoFlow,
    Orifice,
    FreeWeir,
    SubmergedWeir,
    NoCoupling,
}

impl CouplingRegime {
    pub fn code(self) -> i32 {
        match self {
            CouplingRegime::NoFlow => 0,
            CouplingRegime::Orifice => 1,
            CouplingRegime::FreeWeir => 2,
            CouplingRegime::SubmergedWeir => 3,
            CouplingRegime::NoCoupling => 4,
        }
    }

    pub fn from_code(code: i32) -> CouplingResult<Self> {
        match code {
            0 => Ok(CouplingRegime::NoFlow),
            1 => Ok(CouplingRegime::Orifice),
            2 => Ok(CouplingRegime::FreeWeir),
            3 => Ok(CouplingRegime::SubmergedWeir),
            4 => Ok(CouplingRegime::NoCoupling),
            _ => Err(CouplingError::UnknownCode {
                what: "coupling regime",
                code,
            }),
        }
    }

    /// Whether the opening takes part in aggregation.
    pub fn is_coupled(self) -> bool {
        self != CouplingRegime::NoCoupling
    }
}

/// Classify the regime at an opening from the three heads and its geometry.
///
/// Callers guarantee `weir_width > 0` (see [`crate::OpeningGeometry`]).
pub fn classify(heads: Heads, overflow_area: f64, weir_width: f64) -> CouplingRegime {
    let Heads {
        crest,
        node,
        overland,
    } = heads;
    let surface_depth = heads.surface_depth();
    let weir_ratio = overflow_area / weir_width;

    let overflow = node > overland;
    let drainage = node < overland;
    if !overflow && !drainage {
        return CouplingRegime::NoFlow;
    }

    let overflow_orifice = overflow && node > crest;
    let drainage_orifice = drainage && node > crest && surface_depth >= weir_ratio;
    let submerged_weir = drainage && node > crest && surface_depth < weir_ratio;
    let free_weir = drainage && node < crest && overland > crest;

    if overflow_orifice || drainage_orifice {
        CouplingRegime::Orifice
    } else if submerged_weir {
        CouplingRegime::SubmergedWeir
    } else if free_weir {
        CouplingRegime::FreeWeir
    } else {
        CouplingRegime::NoFlow
    }
}
