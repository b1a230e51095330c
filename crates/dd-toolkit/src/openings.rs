//! Management API for node openings.

use crate::error::{ToolkitError, ToolkitResult};
use crate::toolkit::Toolkit;
use dd_coupling::{
    CouplingRegime, DischargeCoefficients, Opening, OpeningGeometry, OpeningId, OpeningKind,
};
use tracing::info;

/// Description of an opening passed to [`Toolkit::set_opening`], in model units.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct OpeningSpec {
    pub kind: OpeningKind,
    pub area: f64,
    pub width: f64,
    pub orifice_coeff: f64,
    pub free_weir_coeff: f64,
    pub submerged_weir_coeff: f64,
}

/// Readable opening parameters.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum OpeningParam {
    Area,
    Width,
    OrificeCoeff,
    FreeWeirCoeff,
    SubmergedWeirCoeff,
}

impl OpeningParam {
    pub fn from_code(code: i32) -> ToolkitResult<Self> {
        match code {
            0 => Ok(OpeningParam::Area),
            1 => Ok(OpeningParam::Width),
            2 => Ok(OpeningParam::OrificeCoeff),
            3 => Ok(OpeningParam::FreeWeirCoeff),
            4 => Ok(OpeningParam::SubmergedWeirCoeff),
            _ => Err(ToolkitError::ParamKey {
                what: "opening parameter",
                key: code,
            }),
        }
    }
}

impl Toolkit {
    /// Create opening `id` at `node`, or update it in place if it exists.
    pub fn set_opening(&mut self, node: usize, id: OpeningId, spec: OpeningSpec) -> ToolkitResult<()> {
        self.require_open()?;
        self.require_not_running()?;
        let u = self.units();
        let target = self.node_mut(node)?;

        let geometry =
            OpeningGeometry::new(u.area_to_internal(spec.area), u.length_to_internal(spec.width))?;
        let coeffs = DischargeCoefficients::new(
            spec.orifice_coeff,
            spec.free_weir_coeff,
            spec.submerged_weir_coeff,
        )?;
        let outcome = target.openings.upsert(id, spec.kind, geometry, coeffs)?;
        info!(node = %target.id, opening = id, ?outcome, "opening set");
        Ok(())
    }

    /// Remove one opening. Returns how many were removed; `0` is not an error.
    pub fn delete_opening(&mut self, node: usize, id: OpeningId) -> ToolkitResult<usize> {
        self.require_open()?;
        self.require_not_running()?;
        let target = self.node_mut(node)?;
        match target.openings.remove(id) {
            Some(_) => {
                info!(node = %target.id, opening = id, "opening deleted");
                Ok(1)
            }
            None => Ok(0),
        }
    }

    /// Remove every opening of a node, returning how many were removed.
    pub fn delete_all_openings(&mut self, node: usize) -> ToolkitResult<usize> {
        self.require_open()?;
        self.require_not_running()?;
        let target = self.node_mut(node)?;
        let removed = target.openings.clear();
        info!(node = %target.id, removed, "openings cleared");
        Ok(removed)
    }

    /// Let the opening take part in coupling again.
    pub fn open_opening(&mut self, node: usize, id: OpeningId) -> ToolkitResult<()> {
        self.set_opening_open(node, id, true)
    }

    /// Exclude the opening from coupling without deleting it.
    pub fn close_opening(&mut self, node: usize, id: OpeningId) -> ToolkitResult<()> {
        self.set_opening_open(node, id, false)
    }

    fn set_opening_open(&mut self, node: usize, id: OpeningId, open: bool) -> ToolkitResult<()> {
        let target = self.node_mut(node)?;
        target
            .openings
            .set_open(id, open)
            .map_err(|_| ToolkitError::OpeningIndex { node, id })?;
        info!(node = %target.id, opening = id, open, "opening toggled");
        Ok(())
    }

    pub fn count_openings(&self, node: usize) -> ToolkitResult<usize> {
        Ok(self.node(node)?.openings.len())
    }

    pub fn list_opening_ids(&self, node: usize) -> ToolkitResult<Vec<OpeningId>> {
        Ok(self.node(node)?.openings.ids())
    }

    fn opening(&self, node: usize, id: OpeningId) -> ToolkitResult<&Opening> {
        self.node(node)?
            .openings
            .get(id)
            .ok_or(ToolkitError::OpeningIndex { node, id })
    }

    pub fn get_opening_param(
        &self,
        node: usize,
        id: OpeningId,
        param: OpeningParam,
    ) -> ToolkitResult<f64> {
        let opening = self.opening(node, id)?;
        let u = self.units();
        Ok(match param {
            OpeningParam::Area => u.area_from_internal(opening.geometry.area()),
            OpeningParam::Width => u.length_from_internal(opening.geometry.weir_width()),
            OpeningParam::OrificeCoeff => opening.coeffs.orifice,
            OpeningParam::FreeWeirCoeff => opening.coeffs.free_weir,
            OpeningParam::SubmergedWeirCoeff => opening.coeffs.submerged_weir,
        })
    }

    /// Flow through the opening at the last coupling call, positive into the node.
    pub fn get_opening_flow(&self, node: usize, id: OpeningId) -> ToolkitResult<f64> {
        let opening = self.opening(node, id)?;
        Ok(self.units().flow_from_internal(opening.new_inflow))
    }

    pub fn get_opening_kind(&self, node: usize, id: OpeningId) -> ToolkitResult<OpeningKind> {
        Ok(self.opening(node, id)?.kind)
    }

    pub fn get_opening_regime(&self, node: usize, id: OpeningId) -> ToolkitResult<CouplingRegime> {
        Ok(self.opening(node, id)?.regime)
    }

    pub fn is_node_coupled(&self, node: usize) -> ToolkitResult<bool> {
        Ok(self.node(node)?.is_coupled())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn param_codes() {
        assert_eq!(OpeningParam::from_code(1), Ok(OpeningParam::Width));
        assert_eq!(
            OpeningParam::from_code(100),
            Err(ToolkitError::ParamKey {
                what: "opening parameter",
                key: 100
            })
        );
    }
}
