//! dd-coupling: exchange of water between a drainage node and the overland model.
//!
//! Provides:
//! - Regime classification of an opening (orifice, free weir, submerged weir)
//! - Signed flow through an opening for a regime
//! - Per-node opening registry
//! - Node aggregation with oscillation guard and conservation clamp
//!
//! All quantities are in US customary units (ft, ft², ft³/s, s).
//!
//! # Example
//!
//! ```
//! use dd_coupling::{
//!     DischargeCoefficients, NodeSnapshot, OpeningGeometry, OpeningKind, OpeningSet,
//!     aggregate_inflow,
//! };
//!
//! let mut openings = OpeningSet::new();
//! openings
//!     .upsert(
//!         0,
//!         OpeningKind::Manhole,
//!         OpeningGeometry::new(10.0, 5.0).unwrap(),
//!         DischargeCoefficients::new(0.167, 0.54, 0.056).unwrap(),
//!     )
//!     .unwrap();
//!
//! let node = NodeSnapshot {
//!     invert_elev: 0.0,
//!     full_depth: 6.0,
//!     new_depth: 3.0,
//!     overland_depth: 1.0,
//!     coupling_area: 500.0,
//! };
//!
//! let step = aggregate_inflow(2.0, &node, &openings).unwrap();
//! assert!(step.total_inflow > 0.0);
//! openings.apply(&step);
//! openings.commit_step();
//! ```

pub mod aggregate;
pub mod common;
pub mod error;
pub mod flow;
pub mod opening;
pub mod regime;

// Re-exports
pub use aggregate::{CouplingStep, NodeSnapshot, OpeningOutcome, aggregate_inflow};
pub use common::{DischargeCoefficients, Heads, OpeningGeometry};
pub use error::{CouplingError, CouplingResult};
pub use flow::coupling_flow;
pub use opening::{Opening, OpeningId, OpeningKind, OpeningSet, Upsert};
pub use regime::{CouplingRegime, classify};
