//! Grid-to-graph builder and the immutable [`TissueGraph`].
//!
//! The graph is a struct-of-arrays: cell records indexed by
//! `CellId::index()`, directed-edge records indexed by `EdgeId`, and an
//! outgoing adjacency list per cell. Topology is fixed at build time.

use indexmap::IndexSet;
use log::debug;
use pinflux_core::{CellId, EdgeId};
use smallvec::SmallVec;

use crate::direction::Direction;
use crate::error::GridError;
use crate::grid::MazeGrid;

/// A cell: one open tile of the input grid.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct CellRecord {
    /// Sequential id in row-major scan order, starting at 1.
    pub id: CellId,
    /// Grid row.
    pub row: usize,
    /// Grid column.
    pub col: usize,
}

/// A directed edge: the membrane on `from`'s side facing `to`.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct EdgeRecord {
    /// Cell owning the membrane.
    pub from: CellId,
    /// Neighbour the membrane faces.
    pub to: CellId,
    /// Direction from `from` towards `to`.
    pub direction: Direction,
}

/// Outgoing edges of one cell. Four covers every 4-connected cell.
type Adjacency = SmallVec<[EdgeId; 4]>;

/// Cell connectivity graph derived from a [`MazeGrid`].
///
/// Invariants established by [`TissueGraph::from_grid`]:
/// - one cell per open tile, ids contiguous `1..=N` in row-major order;
/// - an edge `i -> j` exists iff `i` and `j` are 4-adjacent open tiles;
/// - for every edge `i -> j` the reverse edge `j -> i` exists.
#[derive(Clone, Debug)]
pub struct TissueGraph {
    rows: usize,
    cols: usize,
    cells: Vec<CellRecord>,
    /// `(from, to)` pairs; the index of a pair is its `EdgeId`.
    edge_index: IndexSet<(CellId, CellId)>,
    directions: Vec<Direction>,
    /// `reverse[e]` is the edge pointing the other way.
    reverse: Vec<EdgeId>,
    outgoing: Vec<Adjacency>,
    /// Grid slot (row-major) to cell id; `None` for walls.
    slots: Vec<Option<CellId>>,
}

impl TissueGraph {
    /// Build the graph from a validated grid.
    ///
    /// Scans tiles row-major. Each open tile receives the next cell id;
    /// then, for each cell, every in-bounds open neighbour in
    /// [`Direction::ALL`] order yields one directed edge. A cell with no
    /// open neighbours is a valid isolated vertex.
    pub fn from_grid(grid: &MazeGrid) -> Self {
        let (rows, cols) = grid.extents();

        let mut cells = Vec::with_capacity(grid.open_count());
        let mut slots = vec![None; rows * cols];
        for row in 0..rows {
            for col in 0..cols {
                if grid.is_open(row, col) {
                    let id = CellId::from_index(cells.len());
                    cells.push(CellRecord { id, row, col });
                    slots[row * cols + col] = Some(id);
                }
            }
        }

        let mut edge_index = IndexSet::with_capacity(cells.len() * 4);
        let mut directions = Vec::with_capacity(cells.len() * 4);
        let mut outgoing = Vec::with_capacity(cells.len());
        for cell in &cells {
            let mut adj = Adjacency::new();
            for dir in Direction::ALL {
                let Some((nr, nc)) = step_in_bounds(cell.row, cell.col, dir, rows, cols) else {
                    continue;
                };
                if let Some(to) = slots[nr * cols + nc] {
                    let (idx, _) = edge_index.insert_full((cell.id, to));
                    directions.push(dir);
                    adj.push(EdgeId(idx as u32));
                }
            }
            outgoing.push(adj);
        }

        // Adjacency is symmetric by construction: every (i, j) was produced
        // from both sides of the same tile pair.
        let reverse = edge_index
            .iter()
            .map(|&(from, to)| {
                let idx = edge_index
                    .get_index_of(&(to, from))
                    .expect("4-adjacency is symmetric");
                EdgeId(idx as u32)
            })
            .collect();

        debug!(
            "built tissue graph: {} cells, {} membranes from {}x{} grid",
            cells.len(),
            edge_index.len(),
            rows,
            cols
        );

        Self {
            rows,
            cols,
            cells,
            edge_index,
            directions,
            reverse,
            outgoing,
            slots,
        }
    }

    /// Validate `rows` and build the graph in one call.
    pub fn build<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        MazeGrid::from_rows(rows).map(|grid| Self::from_grid(&grid))
    }

    /// Number of cells (open tiles).
    pub fn cell_count(&self) -> usize {
        self.cells.len()
    }

    /// Number of directed edges.
    pub fn edge_count(&self) -> usize {
        self.edge_index.len()
    }

    /// Grid extents `(rows, cols)` for layout bounds.
    pub fn extents(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// All cells in id order.
    pub fn cells(&self) -> &[CellRecord] {
        &self.cells
    }

    /// Look up a cell record.
    pub fn cell(&self, id: CellId) -> Option<&CellRecord> {
        id.index().and_then(|i| self.cells.get(i))
    }

    /// The cell occupying `(row, col)`, if that tile is open.
    pub fn cell_at(&self, row: usize, col: usize) -> Option<CellId> {
        if row < self.rows && col < self.cols {
            self.slots[row * self.cols + col]
        } else {
            None
        }
    }

    /// Look up a directed edge record.
    pub fn edge(&self, id: EdgeId) -> Option<EdgeRecord> {
        let &(from, to) = self.edge_index.get_index(id.index())?;
        Some(EdgeRecord {
            from,
            to,
            direction: self.directions[id.index()],
        })
    }

    /// Iterate all directed edges in id order.
    pub fn edges(&self) -> impl Iterator<Item = (EdgeId, EdgeRecord)> + '_ {
        self.edge_index
            .iter()
            .zip(&self.directions)
            .enumerate()
            .map(|(i, (&(from, to), &direction))| {
                (
                    EdgeId(i as u32),
                    EdgeRecord {
                        from,
                        to,
                        direction,
                    },
                )
            })
    }

    /// The edge `from -> to`, if the cells are adjacent.
    pub fn find_edge(&self, from: CellId, to: CellId) -> Option<EdgeId> {
        self.edge_index
            .get_index_of(&(from, to))
            .map(|i| EdgeId(i as u32))
    }

    /// The edge pointing the opposite way (`j -> i` for `i -> j`).
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not an edge of this graph.
    pub fn reverse(&self, edge: EdgeId) -> EdgeId {
        self.reverse[edge.index()]
    }

    /// Reverse-edge table indexed by edge slot.
    pub fn reverse_table(&self) -> &[EdgeId] {
        &self.reverse
    }

    /// Outgoing edges of a cell, in [`Direction::ALL`] order.
    ///
    /// Returns an empty slice for unknown ids.
    pub fn outgoing(&self, cell: CellId) -> &[EdgeId] {
        cell.index()
            .and_then(|i| self.outgoing.get(i))
            .map(|adj| adj.as_slice())
            .unwrap_or(&[])
    }

    /// Outgoing edges of the cell in zero-based slot `index`.
    ///
    /// Edges are numbered cell by cell during the build, so the result
    /// is always a contiguous, ascending run of edge ids.
    ///
    /// # Panics
    ///
    /// Panics if `index >= cell_count()`.
    pub fn outgoing_at(&self, index: usize) -> &[EdgeId] {
        &self.outgoing[index]
    }

    /// Zero-based `(from, to)` cell slots of an edge.
    ///
    /// # Panics
    ///
    /// Panics if `edge` is not an edge of this graph.
    pub fn endpoints(&self, edge: EdgeId) -> (usize, usize) {
        let (from, to) = self.edge_index[edge.index()];
        (from.0 as usize - 1, to.0 as usize - 1)
    }

    /// Neighbouring cells of `cell`.
    pub fn neighbours(&self, cell: CellId) -> impl Iterator<Item = CellId> + '_ {
        self.outgoing(cell)
            .iter()
            .map(|&e| self.edge_index[e.index()].1)
    }

    /// Number of neighbours of `cell`.
    pub fn degree(&self, cell: CellId) -> usize {
        self.outgoing(cell).len()
    }
}

/// Move one step from `(row, col)` in `dir`, or `None` if that leaves the grid.
fn step_in_bounds(
    row: usize,
    col: usize,
    dir: Direction,
    rows: usize,
    cols: usize,
) -> Option<(usize, usize)> {
    let (dr, dc) = dir.offset();
    let nr = row.checked_add_signed(dr as isize)?;
    let nc = col.checked_add_signed(dc as isize)?;
    (nr < rows && nc < cols).then_some((nr, nc))
}
