//! Model file schema definitions.
//!
//! Lengths, areas and depths are expressed in the model's `units`.

use dd_core::UnitSystem;
use serde::{Deserialize, Serialize};

/// Format version written by this crate. Files with any other version are rejected.
pub const LATEST_VERSION: u32 = 1;

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct Project {
    pub version: u32,
    pub name: String,
    #[serde(default)]
    pub units: UnitSystem,
    #[serde(default)]
    pub nodes: Vec<NodeDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct NodeDef {
    pub id: String,
    pub invert_elev: f64,
    /// Invert to ground surface
    pub full_depth: f64,
    #[serde(default)]
    pub initial_depth: f64,
    /// Surface area draining through this node's openings
    #[serde(default)]
    pub coupling_area: f64,
    #[serde(default)]
    pub openings: Vec<OpeningDef>,
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct OpeningDef {
    pub id: u32,
    #[serde(default)]
    pub kind: OpeningKindDef,
    pub area: f64,
    pub width: f64,
    pub orifice_coeff: f64,
    pub free_weir_coeff: f64,
    pub submerged_weir_coeff: f64,
    #[serde(default, skip_serializing_if = "is_false")]
    pub closed: bool,
}

#[derive(Debug, Clone, Copy, Default, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum OpeningKindDef {
    #[default]
    Manhole,
    Grate,
}

fn is_false(v: &bool) -> bool {
    !*v
}
