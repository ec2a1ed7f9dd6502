//! Graph-level evaluation of the transport model.

use pinflux_arena::{StateStore, StepFrame};
use pinflux_core::{CellParams, EdgeId, StateView};
use pinflux_space::TissueGraph;

use crate::kernel;

/// Instantaneous rates of change for every state variable.
#[derive(Clone, Debug, PartialEq)]
pub struct Rates {
    /// `da/dt` per cell slot.
    pub auxin: Vec<f64>,
    /// `dP/dt` per cell slot.
    pub pins: Vec<f64>,
    /// `dp/dt` per edge slot.
    pub membrane: Vec<f64>,
}

/// The static half of the model: topology, parameters, conductances.
///
/// Cheap to copy. Every method reads dynamic values only from the
/// [`StateView`] it is given.
#[derive(Clone, Copy, Debug)]
pub struct TissueModel<'a> {
    graph: &'a TissueGraph,
    params: &'a [CellParams],
    conductance: &'a [f64],
}

impl<'a> TissueModel<'a> {
    /// Bind the model to explicit tables.
    ///
    /// `params` is indexed by cell slot and `conductance` by edge slot.
    pub fn new(graph: &'a TissueGraph, params: &'a [CellParams], conductance: &'a [f64]) -> Self {
        debug_assert_eq!(params.len(), graph.cell_count());
        debug_assert_eq!(conductance.len(), graph.edge_count());
        Self {
            graph,
            params,
            conductance,
        }
    }

    /// Bind the model to a store's tables.
    pub fn from_store(store: &'a StateStore) -> Self {
        Self::new(
            store.graph(),
            store.params_table(),
            store.conductance_table(),
        )
    }

    /// Bind the model to the static half of a step frame.
    pub fn from_frame(frame: &StepFrame<'a>) -> Self {
        Self::new(frame.graph, frame.params, frame.conductance)
    }

    /// The graph the model runs on.
    pub fn graph(&self) -> &'a TissueGraph {
        self.graph
    }

    /// `J(i,j)` for the membrane `edge`.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not an edge of the bound graph.
    pub fn flux<S: StateView + ?Sized>(&self, state: &S, edge: EdgeId) -> f64 {
        let (i, j) = self.graph.endpoints(edge);
        let back = self.graph.reverse(edge);
        let a = state.auxin();
        let m = state.membrane();
        kernel::flux(
            &self.params[i],
            a[i],
            a[j],
            m[edge.index()],
            m[back.index()],
        )
    }

    /// `da/dt` for the cell in slot `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= cell_count()`.
    pub fn auxin_rate<S: StateView + ?Sized>(&self, state: &S, cell: usize) -> f64 {
        let weighted: f64 = self
            .graph
            .outgoing_at(cell)
            .iter()
            .map(|&e| self.conductance[e.index()] * self.flux(state, e))
            .sum();
        kernel::auxin_rate(&self.params[cell], state.auxin()[cell], weighted)
    }

    /// `dp/dt` for the membrane `edge`.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not an edge of the bound graph.
    pub fn membrane_rate<S: StateView + ?Sized>(&self, state: &S, edge: EdgeId) -> f64 {
        let (i, _) = self.graph.endpoints(edge);
        kernel::membrane_rate(
            &self.params[i],
            state.pins()[i],
            self.flux(state, edge),
            state.membrane()[edge.index()],
        )
    }

    /// `dP/dt` for the cell in slot `cell`.
    ///
    /// # Panics
    ///
    /// Panics if `cell >= cell_count()`.
    pub fn pins_rate<S: StateView + ?Sized>(&self, state: &S, cell: usize) -> f64 {
        let weighted: f64 = self
            .graph
            .outgoing_at(cell)
            .iter()
            .map(|&e| self.conductance[e.index()] * self.membrane_rate(state, e))
            .sum();
        kernel::pins_rate(&self.params[cell], state.pins()[cell], weighted)
    }

    /// Evaluate every rate against `state`.
    pub fn evaluate<S: StateView + ?Sized>(&self, state: &S) -> Rates {
        let cells = self.graph.cell_count();
        let edges = self.graph.edge_count();
        Rates {
            auxin: (0..cells).map(|i| self.auxin_rate(state, i)).collect(),
            pins: (0..cells).map(|i| self.pins_rate(state, i)).collect(),
            membrane: (0..edges)
                .map(|e| self.membrane_rate(state, EdgeId(e as u32)))
                .collect(),
        }
    }
}
