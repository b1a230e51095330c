//! Management API over the coupling core.
//!
//! The [`Toolkit`] is the simulation-state object a routing engine or an
//! external caller talks to: it opens a model, guards structural changes while
//! a run is in progress, converts between the model's units and the internal
//! US customary units, and couples nodes step by step.

pub mod error;
pub mod node;
pub mod openings;
pub mod toolkit;

pub use dd_coupling::{CouplingRegime, OpeningId, OpeningKind};
pub use error::{ToolkitError, ToolkitResult};
pub use node::{Node, NodeParam, NodeResult};
pub use openings::{OpeningParam, OpeningSpec};
pub use toolkit::{Phase, Toolkit};
