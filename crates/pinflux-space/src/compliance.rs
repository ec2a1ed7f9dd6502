//! Graph invariant compliance helpers.
//!
//! These functions verify that a [`TissueGraph`] built from a
//! [`MazeGrid`] satisfies the builder contract. Reused by the unit tests
//! and the proptest grids.

use crate::graph::TissueGraph;
use crate::grid::MazeGrid;
use indexmap::IndexSet;
use pinflux_core::CellId;

/// Assert one cell per open tile.
pub fn assert_cell_count_matches_open_tiles(grid: &MazeGrid, graph: &TissueGraph) {
    assert_eq!(
        graph.cell_count(),
        grid.open_count(),
        "cell_count ({}) != open tile count ({})",
        graph.cell_count(),
        grid.open_count()
    );
}

/// Assert ids are `1..=N` in row-major order and positions are open tiles.
pub fn assert_ids_contiguous_in_scan_order(grid: &MazeGrid, graph: &TissueGraph) {
    let mut last: Option<(usize, usize)> = None;
    for (i, cell) in graph.cells().iter().enumerate() {
        assert_eq!(cell.id, CellId::from_index(i), "ids are not contiguous");
        assert!(
            grid.is_open(cell.row, cell.col),
            "cell {} sits on a wall at ({}, {})",
            cell.id,
            cell.row,
            cell.col
        );
        if let Some(prev) = last {
            assert!(
                (cell.row, cell.col) > prev,
                "cell {} breaks row-major order",
                cell.id
            );
        }
        last = Some((cell.row, cell.col));
    }
}

/// Assert every edge joins two 4-adjacent open cells.
pub fn assert_edges_join_adjacent_cells(graph: &TissueGraph) {
    for (id, edge) in graph.edges() {
        let a = graph.cell(edge.from).expect("edge source exists");
        let b = graph.cell(edge.to).expect("edge target exists");
        let manhattan = a.row.abs_diff(b.row) + a.col.abs_diff(b.col);
        assert_eq!(manhattan, 1, "edge {id} joins non-adjacent cells");
        let (dr, dc) = edge.direction.offset();
        assert_eq!(
            (b.row as i64 - a.row as i64, b.col as i64 - a.col as i64),
            (dr, dc),
            "edge {id} direction does not match positions"
        );
    }
}

/// Assert `i -> j` exists iff `j -> i` exists, and the reverse table agrees.
pub fn assert_edges_symmetric(graph: &TissueGraph) {
    for (id, edge) in graph.edges() {
        let back = graph
            .find_edge(edge.to, edge.from)
            .unwrap_or_else(|| panic!("edge {id} has no reverse"));
        assert_eq!(graph.reverse(id), back);
        assert_eq!(graph.reverse(back), id);
    }
}

/// Assert every open 4-neighbour pair produced an edge, with no duplicates.
pub fn assert_adjacency_complete(grid: &MazeGrid, graph: &TissueGraph) {
    let (rows, cols) = grid.extents();
    let mut expected = 0usize;
    for r in 0..rows {
        for c in 0..cols {
            if !grid.is_open(r, c) {
                continue;
            }
            if grid.is_open(r, c + 1) {
                expected += 2;
            }
            if grid.is_open(r + 1, c) {
                expected += 2;
            }
        }
    }
    assert_eq!(graph.edge_count(), expected, "edge count mismatch");
    let unique: IndexSet<_> = graph.edges().map(|(_, e)| (e.from, e.to)).collect();
    assert_eq!(unique.len(), graph.edge_count(), "duplicate edges");
}

/// Run all compliance checks.
pub fn run_full_compliance(grid: &MazeGrid, graph: &TissueGraph) {
    assert_cell_count_matches_open_tiles(grid, graph);
    assert_ids_contiguous_in_scan_order(grid, graph);
    assert_edges_join_adjacent_cells(graph);
    assert_edges_symmetric(graph);
    assert_adjacency_complete(grid, graph);
}
