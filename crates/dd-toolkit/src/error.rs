//! Error types for the toolkit API.

use dd_coupling::{CouplingError, OpeningId};

/// Toolkit error. Every variant maps to a stable integer code for callers that
/// speak the numeric error protocol.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum ToolkitError {
    #[error("Model is not open")]
    NotOpen,

    #[error("Operation not allowed while the simulation is running")]
    SimRunning,

    #[error("Node index {index} out of range (count={count})")]
    NodeIndex { index: usize, count: usize },

    #[error("Node not found: {0}")]
    NodeNotFound(String),

    #[error("Opening {id} not found at node {node}")]
    OpeningIndex { node: usize, id: OpeningId },

    #[error("Unknown key {key} for {what}")]
    ParamKey { what: &'static str, key: i32 },

    #[error("Invalid value: {what}")]
    InvalidValue { what: &'static str },

    #[error("Allocation failed")]
    Allocation,

    #[error("Project error: {0}")]
    Project(String),

    #[error("Coupling error: {0}")]
    Coupling(String),
}

impl ToolkitError {
    pub const OUT_OF_BOUNDS: i32 = 2000;
    pub const NOT_OPEN: i32 = 2001;
    pub const SIM_RUNNING: i32 = 2002;
    pub const OBJECT_INDEX: i32 = 2004;
    pub const COUPLING: i32 = 2005;
    pub const MEMORY: i32 = 101;
    pub const PROJECT: i32 = 200;

    pub fn code(&self) -> i32 {
        match self {
            ToolkitError::NotOpen => Self::NOT_OPEN,
            ToolkitError::SimRunning => Self::SIM_RUNNING,
            ToolkitError::NodeIndex { .. }
            | ToolkitError::NodeNotFound(_)
            | ToolkitError::OpeningIndex { .. } => Self::OBJECT_INDEX,
            ToolkitError::ParamKey { .. } | ToolkitError::InvalidValue { .. } => {
                Self::OUT_OF_BOUNDS
            }
            ToolkitError::Allocation => Self::MEMORY,
            ToolkitError::Project(_) => Self::PROJECT,
            ToolkitError::Coupling(_) => Self::COUPLING,
        }
    }
}

/// Result type for toolkit operations.
pub type ToolkitResult<T> = Result<T, ToolkitError>;

impl From<CouplingError> for ToolkitError {
    fn from(err: CouplingError) -> Self {
        match err {
            CouplingError::InvalidGeometry { what } | CouplingError::InvalidCoefficient { what } => {
                ToolkitError::InvalidValue { what }
            }
            CouplingError::UnknownCode { what, code } => ToolkitError::ParamKey { what, key: code },
            CouplingError::Allocation { .. } => ToolkitError::Allocation,
            other => ToolkitError::Coupling(other.to_string()),
        }
    }
}

impl From<dd_project::ProjectError> for ToolkitError {
    fn from(err: dd_project::ProjectError) -> Self {
        ToolkitError::Project(err.to_string())
    }
}

impl From<dd_project::ValidationError> for ToolkitError {
    fn from(err: dd_project::ValidationError) -> Self {
        ToolkitError::Project(err.to_string())
    }
}
