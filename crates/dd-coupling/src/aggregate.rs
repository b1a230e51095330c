//! Node-level aggregation of opening flows.
//!
//! [`aggregate_inflow`] is a pure function of a node snapshot and its openings.
//! Persisting the result is a separate step: [`OpeningSet::apply`] records the
//! per-opening outcome and [`OpeningSet::commit_step`] promotes it to history
//! for the oscillation guard of the next step.
//!
//! [`OpeningSet::apply`]: crate::OpeningSet::apply
//! [`OpeningSet::commit_step`]: crate::OpeningSet::commit_step

use crate::common::Heads;
use crate::error::CouplingResult;
use crate::flow::coupling_flow;
use crate::opening::{OpeningId, OpeningSet};
use crate::regime::{CouplingRegime, classify};
use dd_core::numeric::{ensure_positive, opposite_signs};
use tracing::debug;

/// Hydraulic state of one node for one step (ft, ft²).
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct NodeSnapshot {
    pub invert_elev: f64,
    /// Invert to surface
    pub full_depth: f64,
    /// Current water depth in the node
    pub new_depth: f64,
    /// Overland water depth above the crest
    pub overland_depth: f64,
    /// Surface area over which the overland volume is available
    pub coupling_area: f64,
}

impl NodeSnapshot {
    pub fn crest_elev(&self) -> f64 {
        self.invert_elev + self.full_depth
    }

    pub fn heads(&self) -> Heads {
        let crest = self.crest_elev();
        Heads::new(
            crest,
            self.invert_elev + self.new_depth,
            crest + self.overland_depth,
        )
    }

    /// Largest inflow the overland reservoir can deliver over `t_step` seconds.
    pub fn max_available_inflow(&self, t_step: f64) -> f64 {
        (self.overland_depth * self.coupling_area / t_step).max(0.0)
    }
}

/// Regime and flow of a single opening for one step.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpeningOutcome {
    pub id: OpeningId,
    pub regime: CouplingRegime,
    /// ft³/s, positive into the node
    pub flow: f64,
}

/// Result of aggregating all openings of a node.
#[derive(Clone, Debug, PartialEq)]
pub struct CouplingStep {
    /// ft³/s, positive into the node
    pub total_inflow: f64,
    /// One entry per opening, in registry order
    pub outcomes: Vec<OpeningOutcome>,
    /// Scale applied by the conservation clamp, if it fired
    pub clamp_factor: Option<f64>,
}

/// Compute the node's coupling inflow for one step.
pub fn aggregate_inflow(
    t_step: f64,
    node: &NodeSnapshot,
    openings: &OpeningSet,
) -> CouplingResult<CouplingStep> {
    ensure_positive(t_step, "time step")?;
    let heads = node.heads();
    heads.check_finite()?;

    let mut outcomes = Vec::with_capacity(openings.len());
    let mut total_inflow = 0.0;

    for opening in openings {
        if !opening.is_open() {
            outcomes.push(OpeningOutcome {
                id: opening.id,
                regime: CouplingRegime::NoCoupling,
                flow: 0.0,
            });
            continue;
        }

        let geometry = opening.geometry;
        let mut regime = classify(heads, geometry.area(), geometry.weir_width());
        let mut flow = coupling_flow(regime, heads, geometry, opening.coeffs);

        if opposite_signs(opening.old_inflow, flow) {
            debug!(
                opening = opening.id,
                previous = opening.old_inflow,
                computed = flow,
                "flow reversal suppressed for this step"
            );
            regime = CouplingRegime::NoFlow;
            flow = 0.0;
        }

        total_inflow += flow;
        outcomes.push(OpeningOutcome {
            id: opening.id,
            regime,
            flow,
        });
    }

    let mut clamp_factor = None;
    if total_inflow > 0.0 {
        let max_available = node.max_available_inflow(t_step);
        if total_inflow > max_available {
            let factor = max_available / total_inflow;
            for outcome in &mut outcomes {
                outcome.flow *= factor;
            }
            let clamped: f64 = outcomes.iter().map(|o| o.flow).sum();
            debug!(
                requested = total_inflow,
                available = max_available,
                factor,
                "coupling inflow limited by overland volume"
            );
            total_inflow = clamped;
            clamp_factor = Some(factor);
        }
    }

    Ok(CouplingStep {
        total_inflow,
        outcomes,
        clamp_factor,
    })
}
