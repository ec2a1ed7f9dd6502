//! Spatial structures for pinflux simulations.
//!
//! A [`MazeGrid`] is the validated input: a rectangular array of tiles
//! where `0` is a wall and any other value is open. [`TissueGraph`] is
//! built from it once. Every open tile becomes a cell, and every pair of
//! 4-adjacent open tiles becomes two independent directed edges
//! (membranes), one on each cell's side.
//!
//! # Example
//!
//! ```
//! use pinflux_space::{MazeGrid, TissueGraph};
//!
//! let grid = MazeGrid::from_rows(&[
//!     [-1, -1, 0],
//!     [ 0, -1, 0],
//! ]).unwrap();
//! let graph = TissueGraph::from_grid(&grid);
//! assert_eq!(graph.cell_count(), 3);
//! assert_eq!(graph.edge_count(), 4);
//! ```

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod direction;
pub mod error;
pub mod graph;
pub mod grid;

#[cfg(test)]
pub(crate) mod compliance;

pub use direction::Direction;
pub use error::GridError;
pub use graph::{CellRecord, EdgeRecord, TissueGraph};
pub use grid::MazeGrid;
