//! Coupling-relevant node state and its parameter keys.

use crate::error::{ToolkitError, ToolkitResult};
use dd_core::UnitSystem;
use dd_coupling::{
    DischargeCoefficients, NodeSnapshot, OpeningGeometry, OpeningKind, OpeningSet,
};
use dd_project::{NodeDef, OpeningKindDef};

/// A drainage node as seen by the coupling layer. All fields in internal units (ft).
#[derive(Clone, Debug, PartialEq)]
pub struct Node {
    pub id: String,
    pub invert_elev: f64,
    pub full_depth: f64,
    pub initial_depth: f64,
    pub new_depth: f64,
    pub overland_depth: f64,
    pub coupling_area: f64,
    /// Aggregated inflow of the last coupling call (ft³/s)
    pub coupling_inflow: f64,
    pub openings: OpeningSet,
}

impl Node {
    pub(crate) fn from_def(def: &NodeDef, units: UnitSystem) -> ToolkitResult<Self> {
        let mut openings = OpeningSet::new();
        for o in &def.openings {
            let kind = match o.kind {
                OpeningKindDef::Manhole => OpeningKind::Manhole,
                OpeningKindDef::Grate => OpeningKind::Grate,
            };
            let geometry = OpeningGeometry::new(
                units.area_to_internal(o.area),
                units.length_to_internal(o.width),
            )?;
            let coeffs =
                DischargeCoefficients::new(o.orifice_coeff, o.free_weir_coeff, o.submerged_weir_coeff)?;
            openings.upsert(o.id, kind, geometry, coeffs)?;
            if o.closed {
                openings.set_open(o.id, false)?;
            }
        }

        let initial_depth = units.length_to_internal(def.initial_depth);
        Ok(Self {
            id: def.id.clone(),
            invert_elev: units.length_to_internal(def.invert_elev),
            full_depth: units.length_to_internal(def.full_depth),
            initial_depth,
            new_depth: initial_depth,
            overland_depth: 0.0,
            coupling_area: units.area_to_internal(def.coupling_area),
            coupling_inflow: 0.0,
            openings,
        })
    }

    pub fn snapshot(&self) -> NodeSnapshot {
        NodeSnapshot {
            invert_elev: self.invert_elev,
            full_depth: self.full_depth,
            new_depth: self.new_depth,
            overland_depth: self.overland_depth,
            coupling_area: self.coupling_area,
        }
    }

    /// A node is coupled while at least one of its openings is open.
    pub fn is_coupled(&self) -> bool {
        self.openings.any_open()
    }

    pub(crate) fn reset(&mut self) {
        self.new_depth = self.initial_depth;
        self.coupling_inflow = 0.0;
        self.openings.reset_history();
    }
}

/// Settable node parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeParam {
    InvertElev,
    FullDepth,
    InitialDepth,
    CouplingArea,
    /// Pushed in by the overland model every step; settable while running
    OverlandDepth,
}

impl NodeParam {
    pub fn from_code(code: i32) -> ToolkitResult<Self> {
        match code {
            0 => Ok(NodeParam::InvertElev),
            1 => Ok(NodeParam::FullDepth),
            2 => Ok(NodeParam::InitialDepth),
            3 => Ok(NodeParam::CouplingArea),
            4 => Ok(NodeParam::OverlandDepth),
            _ => Err(ToolkitError::ParamKey {
                what: "node parameter",
                key: code,
            }),
        }
    }

    /// Whether changing the parameter alters the model structure.
    pub fn is_structural(self) -> bool {
        !matches!(self, NodeParam::OverlandDepth)
    }
}

/// Read-only node results.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum NodeResult {
    Depth,
    Head,
    CouplingInflow,
}

impl NodeResult {
    pub fn from_code(code: i32) -> ToolkitResult<Self> {
        match code {
            0 => Ok(NodeResult::Depth),
            1 => Ok(NodeResult::Head),
            2 => Ok(NodeResult::CouplingInflow),
            _ => Err(ToolkitError::ParamKey {
                what: "node result",
                key: code,
            }),
        }
    }
}
