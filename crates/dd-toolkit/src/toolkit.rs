//! Simulation state object and its lifecycle.
//!
//! A [`Toolkit`] owns every node and, through them, every opening. All calls
//! validate in the same order: model open, simulation not running (structural
//! changes only), node index, then keys and values.

use std::path::Path;

use crate::error::{ToolkitError, ToolkitResult};
use crate::node::{Node, NodeParam, NodeResult};
use dd_core::UnitSystem;
use dd_core::numeric::{ensure_finite, ensure_non_negative};
use dd_coupling::aggregate_inflow;
use dd_project::{Project, validate_project};
use tracing::{debug, info};

#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum Phase {
    #[default]
    Closed,
    Open,
    Running,
}

#[derive(Clone, Debug, Default)]
pub struct Toolkit {
    phase: Phase,
    name: String,
    units: UnitSystem,
    nodes: Vec<Node>,
}

impl Toolkit {
    /// A toolkit with no model loaded.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build the simulation state from a model description.
    pub fn open(&mut self, project: &Project) -> ToolkitResult<()> {
        if self.phase == Phase::Running {
            return Err(ToolkitError::SimRunning);
        }
        validate_project(project)?;

        let nodes = project
            .nodes
            .iter()
            .map(|def| Node::from_def(def, project.units))
            .collect::<ToolkitResult<Vec<_>>>()?;

        self.name = project.name.clone();
        self.units = project.units;
        self.nodes = nodes;
        self.phase = Phase::Open;
        info!(
            model = %self.name,
            nodes = self.nodes.len(),
            units = ?self.units,
            "model opened"
        );
        Ok(())
    }

    /// Load a YAML or JSON model file and open it.
    pub fn open_path(&mut self, path: &Path) -> ToolkitResult<()> {
        let project = dd_project::load(path)?;
        self.open(&project)
    }

    pub fn start(&mut self) -> ToolkitResult<()> {
        self.require_open()?;
        self.require_not_running()?;
        for node in &mut self.nodes {
            node.reset();
        }
        self.phase = Phase::Running;
        info!(model = %self.name, "simulation started");
        Ok(())
    }

    pub fn end(&mut self) -> ToolkitResult<()> {
        self.require_open()?;
        self.phase = Phase::Open;
        info!(model = %self.name, "simulation ended");
        Ok(())
    }

    pub fn close(&mut self) {
        if self.phase != Phase::Closed {
            info!(model = %self.name, "model closed");
        }
        *self = Self::default();
    }

    pub fn phase(&self) -> Phase {
        self.phase
    }

    pub fn is_open(&self) -> bool {
        self.phase != Phase::Closed
    }

    pub fn is_running(&self) -> bool {
        self.phase == Phase::Running
    }

    pub fn units(&self) -> UnitSystem {
        self.units
    }

    pub fn name(&self) -> &str {
        &self.name
    }

    pub(crate) fn require_open(&self) -> ToolkitResult<()> {
        if self.is_open() {
            Ok(())
        } else {
            Err(ToolkitError::NotOpen)
        }
    }

    pub(crate) fn require_not_running(&self) -> ToolkitResult<()> {
        if self.is_running() {
            Err(ToolkitError::SimRunning)
        } else {
            Ok(())
        }
    }

    pub fn node_count(&self) -> ToolkitResult<usize> {
        self.require_open()?;
        Ok(self.nodes.len())
    }

    /// Index of the node with the given id.
    pub fn node_index(&self, id: &str) -> ToolkitResult<usize> {
        self.require_open()?;
        self.nodes
            .iter()
            .position(|n| n.id == id)
            .ok_or_else(|| ToolkitError::NodeNotFound(id.to_string()))
    }

    pub fn node(&self, index: usize) -> ToolkitResult<&Node> {
        self.require_open()?;
        let count = self.nodes.len();
        self.nodes
            .get(index)
            .ok_or(ToolkitError::NodeIndex { index, count })
    }

    pub(crate) fn node_mut(&mut self, index: usize) -> ToolkitResult<&mut Node> {
        self.require_open()?;
        let count = self.nodes.len();
        self.nodes
            .get_mut(index)
            .ok_or(ToolkitError::NodeIndex { index, count })
    }

    pub fn get_node_param(&self, index: usize, param: NodeParam) -> ToolkitResult<f64> {
        let node = self.node(index)?;
        let u = self.units;
        Ok(match param {
            NodeParam::InvertElev => u.length_from_internal(node.invert_elev),
            NodeParam::FullDepth => u.length_from_internal(node.full_depth),
            NodeParam::InitialDepth => u.length_from_internal(node.initial_depth),
            NodeParam::CouplingArea => u.area_from_internal(node.coupling_area),
            NodeParam::OverlandDepth => u.length_from_internal(node.overland_depth),
        })
    }

    pub fn set_node_param(&mut self, index: usize, param: NodeParam, value: f64) -> ToolkitResult<()> {
        self.require_open()?;
        if param.is_structural() {
            self.require_not_running()?;
        }
        let u = self.units;
        let node = self.node_mut(index)?;
        let invalid = |what| ToolkitError::InvalidValue { what };

        match param {
            NodeParam::InvertElev => {
                ensure_finite(value, "invert elevation").map_err(|_| invalid("invert elevation"))?;
                node.invert_elev = u.length_to_internal(value);
            }
            NodeParam::FullDepth => {
                ensure_non_negative(value, "full depth").map_err(|_| invalid("full depth"))?;
                node.full_depth = u.length_to_internal(value);
            }
            NodeParam::InitialDepth => {
                ensure_non_negative(value, "initial depth")
                    .map_err(|_| invalid("initial depth"))?;
                node.initial_depth = u.length_to_internal(value);
            }
            NodeParam::CouplingArea => {
                ensure_non_negative(value, "coupling area")
                    .map_err(|_| invalid("coupling area"))?;
                node.coupling_area = u.area_to_internal(value);
            }
            NodeParam::OverlandDepth => {
                ensure_finite(value, "overland depth").map_err(|_| invalid("overland depth"))?;
                node.overland_depth = u.length_to_internal(value);
            }
        }
        Ok(())
    }

    pub fn get_node_result(&self, index: usize, result: NodeResult) -> ToolkitResult<f64> {
        let node = self.node(index)?;
        let u = self.units;
        Ok(match result {
            NodeResult::Depth => u.length_from_internal(node.new_depth),
            NodeResult::Head => u.length_from_internal(node.invert_elev + node.new_depth),
            NodeResult::CouplingInflow => u.flow_from_internal(node.coupling_inflow),
        })
    }

    /// Compute and record the coupling inflow of one node for one step.
    ///
    /// `new_depth` is the node depth produced by the routing engine; the returned
    /// inflow (positive into the node) is in the model's flow units. The caller
    /// must call [`Toolkit::commit_step`] once the step is accepted.
    pub fn couple_node(&mut self, index: usize, t_step: f64, new_depth: f64) -> ToolkitResult<f64> {
        let u = self.units;
        let node = self.node_mut(index)?;
        ensure_finite(new_depth, "node depth").map_err(|_| ToolkitError::InvalidValue {
            what: "node depth",
        })?;
        // node state changes only once the step is accepted
        let mut snapshot = node.snapshot();
        snapshot.new_depth = u.length_to_internal(new_depth);
        let step = aggregate_inflow(t_step, &snapshot, &node.openings)?;

        node.new_depth = snapshot.new_depth;
        node.openings.apply(&step);
        node.coupling_inflow = step.total_inflow;
        debug!(
            node = %node.id,
            inflow = step.total_inflow,
            clamped = step.clamp_factor.is_some(),
            "node coupled"
        );
        Ok(u.flow_from_internal(step.total_inflow))
    }

    /// Carry every opening's current inflow over as the previous-step inflow.
    pub fn commit_step(&mut self) -> ToolkitResult<()> {
        self.require_open()?;
        for node in &mut self.nodes {
            node.openings.commit_step();
        }
        Ok(())
    }
}
