//! The cell/edge state store.
//!
//! [`StateStore`] owns everything that varies per cell or per membrane:
//! the parameter table, role tags, conductances, and the double-buffered
//! dynamic state. It has two phases:
//!
//! - **Setup.** Roles, parameters, conductances and initial values may be
//!   changed freely.
//! - **Sealed.** After [`StateStore::seal`] (or the first
//!   [`StateStore::begin_step`]) only the integrator writes, and only to
//!   the dynamic state.

use std::sync::Arc;

use log::debug;
use pinflux_core::{CellId, CellParams, Role, StateView, StepId, StoreError};
use pinflux_space::TissueGraph;

use crate::buffer::{StateBuffer, Staging};
use crate::pingpong::PingPongState;
use crate::snapshot::{Layout, Snapshot};

/// Dynamic state of one cell.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellState {
    /// Auxin concentration.
    pub auxin: f64,
    /// Cytoplasmic PINS concentration.
    pub pins: f64,
}

/// Borrowed inputs and outputs for one integration step.
///
/// Everything static is shared read-only; `next` is the only writable
/// view and must be filled completely.
#[derive(Debug)]
pub struct StepFrame<'a> {
    /// Connectivity.
    pub graph: &'a TissueGraph,
    /// Parameters per cell slot.
    pub params: &'a [CellParams],
    /// Conductance per edge slot.
    pub conductance: &'a [f64],
    /// The published state being advanced.
    pub previous: &'a StateBuffer,
    /// Staging buffers for the next state.
    pub next: Staging<'a>,
}

/// Per-cell and per-edge state over a fixed [`TissueGraph`].
#[derive(Clone, Debug)]
pub struct StateStore {
    graph: Arc<TissueGraph>,
    defaults: CellParams,
    params: Vec<CellParams>,
    roles: Vec<Role>,
    conductance: Vec<f64>,
    state: PingPongState,
    sealed: bool,
}

impl StateStore {
    /// Default conductance of every membrane.
    pub const DEFAULT_CONDUCTANCE: f64 = 1.0;

    /// Set up a store over `graph`.
    ///
    /// Every cell gets `defaults` and role [`Role::Normal`], auxin 0 and
    /// PINS `initial_pins`. Every edge gets membrane PINS 0 and
    /// conductance [`Self::DEFAULT_CONDUCTANCE`].
    pub fn initialize(graph: Arc<TissueGraph>, defaults: CellParams, initial_pins: f64) -> Self {
        let cells = graph.cell_count();
        let edges = graph.edge_count();
        debug!("initializing state store: {cells} cells, {edges} edges, initial pins {initial_pins}");
        Self {
            defaults,
            params: vec![defaults; cells],
            roles: vec![Role::Normal; cells],
            conductance: vec![Self::DEFAULT_CONDUCTANCE; edges],
            state: PingPongState::new(StateBuffer::uniform(cells, edges, 0.0, initial_pins, 0.0)),
            sealed: false,
            graph,
        }
    }

    // ── Setup ───────────────────────────────────────────────────

    /// Tag `cell` with `role` and replace its parameter set.
    ///
    /// With `overrides = None` the cell receives the default set adjusted
    /// for the role (elevated production for a source, elevated
    /// degradation for a sink). At most one cell may hold each of
    /// [`Role::Source`] and [`Role::Sink`]; re-tagging the same cell is
    /// allowed.
    pub fn override_role(
        &mut self,
        cell: CellId,
        role: Role,
        overrides: Option<CellParams>,
    ) -> Result<(), StoreError> {
        self.ensure_unsealed()?;
        let i = self.slot(cell)?;
        if role != Role::Normal {
            if let Some(existing) = self.role_cell(role) {
                if existing != cell {
                    return Err(StoreError::DuplicateRole { role, existing });
                }
            }
        }
        let params = overrides.unwrap_or(match role {
            Role::Normal => self.defaults,
            Role::Source => self.defaults.as_source(),
            Role::Sink => self.defaults.as_sink(),
        });
        params
            .validate()
            .map_err(|reason| StoreError::InvalidOverride { reason })?;
        debug!("cell {cell} assigned role {role}");
        self.roles[i] = role;
        self.params[i] = params;
        Ok(())
    }

    /// Set the conductance of membrane `from -> to`.
    pub fn set_conductance(&mut self, from: CellId, to: CellId, value: f64) -> Result<(), StoreError> {
        self.ensure_unsealed()?;
        let e = self.edge_slot(from, to)?;
        if !value.is_finite() {
            return Err(StoreError::InvalidOverride {
                reason: format!("conductance must be finite, got {value}"),
            });
        }
        self.conductance[e] = value;
        Ok(())
    }

    /// Overwrite the initial auxin and PINS of a cell.
    pub fn set_cell_state(&mut self, cell: CellId, auxin: f64, pins: f64) -> Result<(), StoreError> {
        self.ensure_unsealed()?;
        let i = self.slot(cell)?;
        let buffer = self.state.published_mut();
        buffer.auxin_mut()[i] = auxin;
        buffer.pins_mut()[i] = pins;
        Ok(())
    }

    /// Overwrite the initial membrane PINS on `from -> to`.
    pub fn set_edge_state(&mut self, from: CellId, to: CellId, pij: f64) -> Result<(), StoreError> {
        self.ensure_unsealed()?;
        let e = self.edge_slot(from, to)?;
        self.state.published_mut().membrane_mut()[e] = pij;
        Ok(())
    }

    /// End setup. Parameters, roles and conductances become read-only.
    pub fn seal(&mut self) {
        if !self.sealed {
            debug!("state store sealed at step {}", self.state.current_step());
            self.sealed = true;
        }
    }

    /// Whether setup has ended.
    pub fn is_sealed(&self) -> bool {
        self.sealed
    }

    // ── Reads ───────────────────────────────────────────────────

    /// Current auxin and PINS of a cell.
    pub fn get_cell_state(&self, cell: CellId) -> Result<CellState, StoreError> {
        let i = self.slot(cell)?;
        let current = self.state.published();
        Ok(CellState {
            auxin: current.auxin()[i],
            pins: current.pins()[i],
        })
    }

    /// Current membrane PINS on `from -> to`.
    pub fn get_edge_state(&self, from: CellId, to: CellId) -> Result<f64, StoreError> {
        let e = self.edge_slot(from, to)?;
        Ok(self.state.published().membrane()[e])
    }

    /// Conductance of `from -> to`.
    pub fn conductance(&self, from: CellId, to: CellId) -> Result<f64, StoreError> {
        self.edge_slot(from, to).map(|e| self.conductance[e])
    }

    /// Parameter set of a cell.
    pub fn params(&self, cell: CellId) -> Result<&CellParams, StoreError> {
        self.slot(cell).map(|i| &self.params[i])
    }

    /// Role tag of a cell.
    pub fn role(&self, cell: CellId) -> Result<Role, StoreError> {
        self.slot(cell).map(|i| self.roles[i])
    }

    /// The cell holding `role`, if any. For [`Role::Normal`] the first
    /// such cell.
    pub fn role_cell(&self, role: Role) -> Option<CellId> {
        self.roles
            .iter()
            .position(|&r| r == role)
            .map(CellId::from_index)
    }

    /// Parameter table indexed by cell slot.
    pub fn params_table(&self) -> &[CellParams] {
        &self.params
    }

    /// Role table indexed by cell slot.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Conductance table indexed by edge slot.
    pub fn conductance_table(&self) -> &[f64] {
        &self.conductance
    }

    /// The graph this store was built over.
    pub fn graph(&self) -> &Arc<TissueGraph> {
        &self.graph
    }

    /// The published state.
    pub fn current(&self) -> &StateBuffer {
        self.state.published()
    }

    /// Step id of the published state.
    pub fn current_step(&self) -> StepId {
        self.state.current_step()
    }

    /// Immutable copy of the published state.
    pub fn snapshot(&self) -> Snapshot {
        Snapshot::capture(self.state.published())
    }

    /// Static layout for rendering snapshots of this store.
    pub fn layout(&self) -> Layout {
        Layout::new(Arc::clone(&self.graph), self.roles.clone().into())
    }

    // ── Stepping ────────────────────────────────────────────────

    /// Seal setup and borrow everything one integration step needs.
    pub fn begin_step(&mut self) -> StepFrame<'_> {
        self.seal();
        let (previous, next) = self.state.begin_step();
        StepFrame {
            graph: &self.graph,
            params: &self.params,
            conductance: &self.conductance,
            previous,
            next,
        }
    }

    /// Commit the step started by [`Self::begin_step`].
    pub fn publish(&mut self) {
        self.state.publish();
    }

    // ── Internal ────────────────────────────────────────────────

    fn ensure_unsealed(&self) -> Result<(), StoreError> {
        if self.sealed {
            Err(StoreError::SetupSealed)
        } else {
            Ok(())
        }
    }

    fn slot(&self, cell: CellId) -> Result<usize, StoreError> {
        cell.index()
            .filter(|&i| i < self.params.len())
            .ok_or(StoreError::UnknownCell { cell })
    }

    fn edge_slot(&self, from: CellId, to: CellId) -> Result<usize, StoreError> {
        self.graph
            .find_edge(from, to)
            .map(|e| e.index())
            .ok_or(StoreError::UnknownEdge { from, to })
    }
}
