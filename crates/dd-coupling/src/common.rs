//! Value types shared by the classifier, the flow calculator and the registry.

use crate::error::{CouplingError, CouplingResult};
use dd_core::numeric::{ensure_finite, ensure_non_negative, ensure_positive};

/// Water surface elevations seen by one opening (ft).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct Heads {
    /// Ground-level rim of the opening
    pub crest: f64,
    /// Water surface inside the node
    pub node: f64,
    /// Water surface of the overland model above the node
    pub overland: f64,
}

impl Heads {
    pub fn new(crest: f64, node: f64, overland: f64) -> Self {
        Self {
            crest,
            node,
            overland,
        }
    }

    /// +1.0 when water moves from the surface into the node, -1.0 otherwise.
    pub fn flow_sign(&self) -> f64 {
        if self.overland > self.node { 1.0 } else { -1.0 }
    }

    /// Depth of the overland water above the crest (may be negative).
    pub fn surface_depth(&self) -> f64 {
        self.overland - self.crest
    }

    pub fn check_finite(&self) -> CouplingResult<()> {
        ensure_finite(self.crest, "crest elevation")?;
        ensure_finite(self.node, "node head")?;
        ensure_finite(self.overland, "overland head")?;
        Ok(())
    }
}

/// Opening geometry. `weir_width` is always strictly positive.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpeningGeometry {
    area: f64,
    weir_width: f64,
}

impl OpeningGeometry {
    pub fn new(area: f64, weir_width: f64) -> CouplingResult<Self> {
        ensure_non_negative(area, "opening area").map_err(|_| CouplingError::InvalidGeometry {
            what: "opening area must be finite and non-negative",
        })?;
        ensure_positive(weir_width, "weir width").map_err(|_| {
            CouplingError::InvalidGeometry {
                what: "weir width must be finite and positive",
            }
        })?;
        Ok(Self { area, weir_width })
    }

    pub fn area(&self) -> f64 {
        self.area
    }

    pub fn weir_width(&self) -> f64 {
        self.weir_width
    }
}

/// Empirical discharge coefficients of one opening.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct DischargeCoefficients {
    pub orifice: f64,
    pub free_weir: f64,
    pub submerged_weir: f64,
}

impl DischargeCoefficients {
    pub fn new(orifice: f64, free_weir: f64, submerged_weir: f64) -> CouplingResult<Self> {
        for (v, what) in [
            (orifice, "orifice coefficient must be finite and non-negative"),
            (free_weir, "free weir coefficient must be finite and non-negative"),
            (
                submerged_weir,
                "submerged weir coefficient must be finite and non-negative",
            ),
        ] {
            ensure_non_negative(v, what)
                .map_err(|_| CouplingError::InvalidCoefficient { what })?;
        }
        Ok(Self {
            orifice,
            free_weir,
            submerged_weir,
        })
    }
}
