//! Immutable snapshots and renderer-facing accessors.
//!
//! A [`Snapshot`] is an owned, reference-counted copy of one published
//! generation. Cloning is cheap and the data can never change. Pairing a
//! snapshot with the static [`Layout`] yields a [`Frame`], which exposes
//! everything a renderer needs without knowledge of the engine.

use std::sync::Arc;

use pinflux_core::{CellId, EdgeId, Role, StateView, StepId};
use pinflux_space::{Direction, TissueGraph};

use crate::buffer::StateBuffer;

/// An immutable, thread-safe copy of the dynamic state at one step.
#[derive(Clone, Debug, PartialEq)]
pub struct Snapshot {
    data: Arc<StateBuffer>,
}

impl Snapshot {
    /// Copy a buffer into a new snapshot.
    pub fn capture(buffer: &StateBuffer) -> Self {
        Self {
            data: Arc::new(buffer.clone()),
        }
    }

    /// Sum of auxin over all cells.
    pub fn total_auxin(&self) -> f64 {
        self.data.auxin().iter().sum()
    }

    /// Sum of cytoplasmic PINS over all cells.
    pub fn total_pins(&self) -> f64 {
        self.data.pins().iter().sum()
    }

    /// Sum of membrane PINS over all directed edges.
    pub fn total_membrane(&self) -> f64 {
        self.data.membrane().iter().sum()
    }
}

impl StateView for Snapshot {
    fn step(&self) -> StepId {
        self.data.step()
    }

    fn auxin(&self) -> &[f64] {
        self.data.auxin()
    }

    fn pins(&self) -> &[f64] {
        self.data.pins()
    }

    fn membrane(&self) -> &[f64] {
        self.data.membrane()
    }
}

/// Static per-run data a renderer needs alongside a snapshot.
#[derive(Clone, Debug)]
pub struct Layout {
    graph: Arc<TissueGraph>,
    roles: Arc<[Role]>,
}

impl Layout {
    /// Bundle the graph with the role tag of every cell.
    pub fn new(graph: Arc<TissueGraph>, roles: Arc<[Role]>) -> Self {
        Self { graph, roles }
    }

    /// The connectivity graph.
    pub fn graph(&self) -> &TissueGraph {
        &self.graph
    }

    /// Role tag per cell slot.
    pub fn roles(&self) -> &[Role] {
        &self.roles
    }

    /// Grid extents `(rows, cols)`.
    pub fn extents(&self) -> (usize, usize) {
        self.graph.extents()
    }
}

/// Everything known about one cell in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct CellSample {
    /// Cell id.
    pub id: CellId,
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
    /// Auxin concentration.
    pub auxin: f64,
    /// Cytoplasmic PINS concentration.
    pub pins: f64,
    /// Role tag.
    pub role: Role,
}

/// Everything known about one membrane in one frame.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct EdgeSample {
    /// Edge id.
    pub id: EdgeId,
    /// Owning cell.
    pub from: CellId,
    /// Facing neighbour.
    pub to: CellId,
    /// Direction from `from` to `to`.
    pub direction: Direction,
    /// Membrane PINS density.
    pub pins: f64,
}

/// A snapshot viewed through its layout.
#[derive(Clone, Copy, Debug)]
pub struct Frame<'a> {
    layout: &'a Layout,
    snapshot: &'a Snapshot,
}

impl<'a> Frame<'a> {
    /// Pair a snapshot with the layout it was produced on.
    pub fn new(layout: &'a Layout, snapshot: &'a Snapshot) -> Self {
        Self { layout, snapshot }
    }

    /// The step this frame shows.
    pub fn step(&self) -> StepId {
        self.snapshot.step()
    }

    /// The underlying snapshot.
    pub fn snapshot(&self) -> &'a Snapshot {
        self.snapshot
    }

    /// Grid extents `(rows, cols)`.
    pub fn extents(&self) -> (usize, usize) {
        self.layout.extents()
    }

    /// Sample one cell.
    pub fn cell(&self, id: CellId) -> Option<CellSample> {
        let record = self.layout.graph().cell(id)?;
        let i = id.index()?;
        Some(CellSample {
            id,
            row: record.row,
            col: record.col,
            auxin: self.snapshot.auxin()[i],
            pins: self.snapshot.pins()[i],
            role: self.layout.roles()[i],
        })
    }

    /// Sample every cell in id order.
    pub fn cells(&self) -> impl Iterator<Item = CellSample> + 'a {
        let layout = self.layout;
        let snapshot = self.snapshot;
        layout
            .graph()
            .cells()
            .iter()
            .enumerate()
            .map(move |(i, record)| CellSample {
                id: record.id,
                row: record.row,
                col: record.col,
                auxin: snapshot.auxin()[i],
                pins: snapshot.pins()[i],
                role: layout.roles()[i],
            })
    }

    /// Sample every directed edge in id order.
    pub fn edges(&self) -> impl Iterator<Item = EdgeSample> + 'a {
        let layout = self.layout;
        let snapshot = self.snapshot;
        layout.graph().edges().map(move |(id, e)| EdgeSample {
            id,
            from: e.from,
            to: e.to,
            direction: e.direction,
            pins: snapshot.membrane()[id.index()],
        })
    }

    /// Membrane PINS on the edge `from -> to`, if it exists.
    pub fn membrane(&self, from: CellId, to: CellId) -> Option<f64> {
        let e = self.layout.graph().find_edge(from, to)?;
        Some(self.snapshot.membrane()[e.index()])
    }

    /// Net PINS polarity of a cell as an `(x, y)` vector.
    ///
    /// Each membrane contributes its density along the unit vector
    /// pointing at its neighbour. Zero for isolated cells and for
    /// uniformly distributed PINS.
    pub fn polarity(&self, id: CellId) -> Option<(f64, f64)> {
        let graph = self.layout.graph();
        graph.cell(id)?;
        let m = self.snapshot.membrane();
        let v = graph.outgoing(id).iter().fold((0.0, 0.0), |(x, y), &e| {
            let (ux, uy) = graph.edge(e).map_or((0.0, 0.0), |r| r.direction.unit());
            (x + m[e.index()] * ux, y + m[e.index()] * uy)
        });
        Some(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pingpong::PingPongState;

    fn corridor_layout() -> Layout {
        let graph = Arc::new(TissueGraph::build(&[[-1, -1, -1]]).unwrap());
        let roles: Arc<[Role]> = vec![Role::Source, Role::Normal, Role::Sink].into();
        Layout::new(graph, roles)
    }

    #[test]
    fn snapshot_is_detached_from_live_buffer() {
        let mut pp = PingPongState::new(StateBuffer::uniform(1, 0, 1.0, 0.0, 0.0));
        let snap = Snapshot::capture(pp.published());
        let (_, next) = pp.begin_step();
        next.auxin[0] = 5.0;
        next.pins[0] = 0.0;
        pp.publish();
        assert_eq!(snap.auxin(), &[1.0]);
        assert_eq!(snap.step(), StepId(0));
    }

    #[test]
    fn totals() {
        let snap = Snapshot::capture(&StateBuffer::uniform(3, 4, 2.0, 0.5, 0.25));
        assert_eq!(snap.total_auxin(), 6.0);
        assert_eq!(snap.total_pins(), 1.5);
        assert_eq!(snap.total_membrane(), 1.0);
    }

    #[test]
    fn frame_samples_cells_with_roles_and_positions() {
        let layout = corridor_layout();
        let snap = Snapshot::capture(&StateBuffer::uniform(3, 4, 1.0, 2.0, 0.0));
        let frame = Frame::new(&layout, &snap);
        let cells: Vec<_> = frame.cells().collect();
        assert_eq!(cells.len(), 3);
        assert_eq!(cells[0].role, Role::Source);
        assert_eq!(cells[2].role, Role::Sink);
        assert_eq!((cells[2].row, cells[2].col), (0, 2));
        assert_eq!(frame.cell(CellId(2)).unwrap().pins, 2.0);
        assert!(frame.cell(CellId(4)).is_none());
        assert_eq!(frame.extents(), (1, 3));
        assert_eq!(frame.edges().count(), 4);
    }

    #[test]
    fn polarity_points_towards_heavier_membrane() {
        let layout = corridor_layout();
        let mut buffer = StateBuffer::uniform(3, 4, 0.0, 0.0, 0.0);
        let graph = layout.graph();
        let east = graph.find_edge(CellId(2), CellId(3)).unwrap();
        let west = graph.find_edge(CellId(2), CellId(1)).unwrap();
        buffer.membrane_mut()[east.index()] = 3.0;
        buffer.membrane_mut()[west.index()] = 1.0;
        let snap = Snapshot::capture(&buffer);
        let frame = Frame::new(&layout, &snap);
        assert_eq!(frame.polarity(CellId(2)), Some((2.0, 0.0)));
        assert_eq!(frame.membrane(CellId(2), CellId(3)), Some(3.0));
        assert_eq!(frame.membrane(CellId(1), CellId(3)), None);
    }
}
