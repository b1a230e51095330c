//! Model validation logic.

use crate::schema::{LATEST_VERSION, NodeDef, OpeningDef, Project};
use std::collections::HashSet;

#[derive(thiserror::Error, Debug)]
pub enum ValidationError {
    #[error("Duplicate ID: {id} in {context}")]
    DuplicateId { id: String, context: String },

    #[error("Invalid value: {field} = {value} ({reason})")]
    InvalidValue {
        field: String,
        value: String,
        reason: String,
    },

    #[error("Unsupported version: {version}")]
    UnsupportedVersion { version: u32 },
}

pub fn validate_project(project: &Project) -> Result<(), ValidationError> {
    if project.version != LATEST_VERSION {
        return Err(ValidationError::UnsupportedVersion {
            version: project.version,
        });
    }

    let mut node_ids = HashSet::new();
    for node in &project.nodes {
        if !node_ids.insert(&node.id) {
            return Err(ValidationError::DuplicateId {
                id: node.id.clone(),
                context: "nodes".to_string(),
            });
        }
        validate_node(node)?;
    }

    Ok(())
}

fn validate_node(node: &NodeDef) -> Result<(), ValidationError> {
    if !node.invert_elev.is_finite() {
        return Err(invalid(node, "invert_elev", node.invert_elev, "must be finite"));
    }
    for (field, value) in [
        ("full_depth", node.full_depth),
        ("initial_depth", node.initial_depth),
        ("coupling_area", node.coupling_area),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(invalid(node, field, value, "must be non-negative and finite"));
        }
    }

    let mut opening_ids = HashSet::new();
    for opening in &node.openings {
        if !opening_ids.insert(opening.id) {
            return Err(ValidationError::DuplicateId {
                id: opening.id.to_string(),
                context: format!("node '{}' openings", node.id),
            });
        }
        validate_opening(node, opening)?;
    }

    Ok(())
}

fn validate_opening(node: &NodeDef, opening: &OpeningDef) -> Result<(), ValidationError> {
    let field = |name: &str| format!("node '{}' opening {} {}", node.id, opening.id, name);

    if !opening.width.is_finite() || opening.width <= 0.0 {
        return Err(ValidationError::InvalidValue {
            field: field("width"),
            value: opening.width.to_string(),
            reason: "must be positive and finite".to_string(),
        });
    }

    for (name, value) in [
        ("area", opening.area),
        ("orifice_coeff", opening.orifice_coeff),
        ("free_weir_coeff", opening.free_weir_coeff),
        ("submerged_weir_coeff", opening.submerged_weir_coeff),
    ] {
        if !value.is_finite() || value < 0.0 {
            return Err(ValidationError::InvalidValue {
                field: field(name),
                value: value.to_string(),
                reason: "must be non-negative and finite".to_string(),
            });
        }
    }

    Ok(())
}

fn invalid(node: &NodeDef, field: &str, value: f64, reason: &str) -> ValidationError {
    ValidationError::InvalidValue {
        field: format!("node '{}' {}", node.id, field),
        value: value.to_string(),
        reason: reason.to_string(),
    }
}
