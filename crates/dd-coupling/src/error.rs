//! Error types for coupling operations.

use dd_core::error::DdError;
use thiserror::Error;

use crate::opening::OpeningId;

/// Errors raised by the coupling core and the opening registry.
#[derive(Error, Debug, Clone, PartialEq)]
pub enum CouplingError {
    #[error("Invalid geometry: {what}")]
    InvalidGeometry { what: &'static str },

    #[error("Invalid coefficient: {what}")]
    InvalidCoefficient { what: &'static str },

    #[error("Invalid argument: {what}")]
    InvalidArg { what: &'static str },

    #[error("Opening {id} not found")]
    OpeningNotFound { id: OpeningId },

    #[error("Unknown code {code} for {what}")]
    UnknownCode { what: &'static str, code: i32 },

    #[error("Allocation failed while adding opening {id}")]
    Allocation { id: OpeningId },
}

pub type CouplingResult<T> = Result<T, CouplingError>;

impl From<DdError> for CouplingError {
    fn from(e: DdError) -> Self {
        match e {
            DdError::NonFinite { what, .. } | DdError::OutOfRange { what, .. } => {
                CouplingError::InvalidArg { what }
            }
            DdError::InvalidArg { what } => CouplingError::InvalidArg { what },
        }
    }
}
