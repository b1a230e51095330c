//! Per-node registry of surface openings.

use crate::aggregate::CouplingStep;
use crate::common::{DischargeCoefficients, OpeningGeometry};
use crate::error::{CouplingError, CouplingResult};
use crate::regime::CouplingRegime;

/// Opening identifier, unique within one node.
pub type OpeningId = u32;

/// Kind of breach in the node cover. Stored only; no effect on the equations.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
pub enum OpeningKind {
    #[default]
    Manhole,
    Grate,
}

impl OpeningKind {
    pub fn code(self) -> i32 {
        match self {
            OpeningKind::Manhole => 0,
            OpeningKind::Grate => 1,
        }
    }

    pub fn from_code(code: i32) -> CouplingResult<Self> {
        match code {
            0 => Ok(OpeningKind::Manhole),
            1 => Ok(OpeningKind::Grate),
            _ => Err(CouplingError::UnknownCode {
                what: "opening kind",
                code,
            }),
        }
    }
}

/// One opening in a node's surface cover.
#[derive(Clone, Debug, PartialEq)]
pub struct Opening {
    pub id: OpeningId,
    pub kind: OpeningKind,
    pub regime: CouplingRegime,
    pub geometry: OpeningGeometry,
    pub coeffs: DischargeCoefficients,
    /// Signed inflow committed at the end of the previous step (ft³/s)
    pub old_inflow: f64,
    /// Signed inflow computed for the current step (ft³/s)
    pub new_inflow: f64,
}

impl Opening {
    pub fn new(
        id: OpeningId,
        kind: OpeningKind,
        geometry: OpeningGeometry,
        coeffs: DischargeCoefficients,
    ) -> Self {
        Self {
            id,
            kind,
            regime: CouplingRegime::NoFlow,
            geometry,
            coeffs,
            old_inflow: 0.0,
            new_inflow: 0.0,
        }
    }

    pub fn is_open(&self) -> bool {
        self.regime.is_coupled()
    }
}

/// Outcome of [`OpeningSet::upsert`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Upsert {
    Created,
    Updated,
}

/// Insertion-ordered, id-addressable collection of openings owned by one node.
#[derive(Clone, Debug, Default, PartialEq)]
pub struct OpeningSet {
    openings: Vec<Opening>,
}

impl OpeningSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.openings.len()
    }

    pub fn is_empty(&self) -> bool {
        self.openings.is_empty()
    }

    pub fn iter(&self) -> std::slice::Iter<'_, Opening> {
        self.openings.iter()
    }

    pub fn ids(&self) -> Vec<OpeningId> {
        self.openings.iter().map(|o| o.id).collect()
    }

    fn position(&self, id: OpeningId) -> Option<usize> {
        self.openings.iter().position(|o| o.id == id)
    }

    pub fn get(&self, id: OpeningId) -> Option<&Opening> {
        self.openings.iter().find(|o| o.id == id)
    }

    pub fn get_mut(&mut self, id: OpeningId) -> Option<&mut Opening> {
        self.openings.iter_mut().find(|o| o.id == id)
    }

    /// Create the opening if `id` is new, otherwise update its description in place.
    ///
    /// Regime and inflow history of an existing opening are kept.
    pub fn upsert(
        &mut self,
        id: OpeningId,
        kind: OpeningKind,
        geometry: OpeningGeometry,
        coeffs: DischargeCoefficients,
    ) -> CouplingResult<Upsert> {
        if let Some(existing) = self.get_mut(id) {
            existing.kind = kind;
            existing.geometry = geometry;
            existing.coeffs = coeffs;
            return Ok(Upsert::Updated);
        }

        self.openings
            .try_reserve(1)
            .map_err(|_| CouplingError::Allocation { id })?;
        self.openings.push(Opening::new(id, kind, geometry, coeffs));
        Ok(Upsert::Created)
    }

    /// Remove one opening. `None` if the registry is empty or `id` is absent.
    pub fn remove(&mut self, id: OpeningId) -> Option<Opening> {
        let pos = self.position(id)?;
        Some(self.openings.remove(pos))
    }

    /// Remove every opening, returning how many were dropped.
    pub fn clear(&mut self) -> usize {
        let n = self.openings.len();
        self.openings.clear();
        n
    }

    /// Re-enable (`NoFlow`) or disable (`NoCoupling`) an opening.
    pub fn set_open(&mut self, id: OpeningId, open: bool) -> CouplingResult<()> {
        let opening = self
            .get_mut(id)
            .ok_or(CouplingError::OpeningNotFound { id })?;
        opening.regime = if open {
            CouplingRegime::NoFlow
        } else {
            CouplingRegime::NoCoupling
        };
        if !open {
            opening.new_inflow = 0.0;
        }
        Ok(())
    }

    /// True when at least one opening takes part in coupling.
    pub fn any_open(&self) -> bool {
        self.openings.iter().any(Opening::is_open)
    }

    /// Record the regimes and flows of a computed step.
    ///
    /// Open/closed state belongs to [`OpeningSet::set_open`]: outcomes for
    /// openings closed since the step was computed, and closed outcomes for
    /// openings reopened since, are skipped.
    pub fn apply(&mut self, step: &CouplingStep) {
        for outcome in &step.outcomes {
            let Some(opening) = self.get_mut(outcome.id) else {
                continue;
            };
            if opening.is_open() && outcome.regime.is_coupled() {
                opening.regime = outcome.regime;
                opening.new_inflow = outcome.flow;
            }
        }
    }

    /// Promote each opening's current-step inflow to previous-step inflow.
    pub fn commit_step(&mut self) {
        for opening in &mut self.openings {
            opening.old_inflow = opening.new_inflow;
        }
    }

    /// Forget flow history before a new run. Closed openings stay closed.
    pub fn reset_history(&mut self) {
        for opening in &mut self.openings {
            opening.old_inflow = 0.0;
            opening.new_inflow = 0.0;
            if opening.is_open() {
                opening.regime = CouplingRegime::NoFlow;
            }
        }
    }
}

impl<'a> IntoIterator for &'a OpeningSet {
    type Item = &'a Opening;
    type IntoIter = std::slice::Iter<'a, Opening>;

    fn into_iter(self) -> Self::IntoIter {
        self.iter()
    }
}
