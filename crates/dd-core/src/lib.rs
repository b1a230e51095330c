//! dd-core: shared foundation for dualdrain.
//!
//! Contains:
//! - units (internal US-customary unit system + boundary conversions)
//! - numeric (validation and sign helpers)
//! - error (shared error types)

pub mod error;
pub mod numeric;
pub mod units;

pub use error::DdError;
pub use numeric::*;
pub use units::{UnitSystem, constants};
