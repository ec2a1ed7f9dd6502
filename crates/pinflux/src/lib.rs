//! pinflux: polar auxin transport on maze-shaped tissues.
//!
//! This is the top-level facade crate that re-exports the public API from
//! all pinflux sub-crates.
//!
//! # Quick start
//!
//! ```rust
//! use std::sync::Arc;
//! use pinflux::prelude::*;
//!
//! // Two rooms joined by a corridor.
//! let graph = TissueGraph::build(&[
//!     [-1, -1,  0, -1, -1],
//!     [-1, -1, -1, -1, -1],
//!     [-1, -1,  0, -1, -1],
//! ]).unwrap();
//! let source = graph.cell_at(0, 0).unwrap();
//! let sink = graph.cell_at(2, 4).unwrap();
//!
//! let config = SimConfig { n_steps: 100, save_each: 20, ..SimConfig::default() };
//! let mut store = config
//!     .initialize_store(Arc::new(graph), &[RoleSpec::source(source), RoleSpec::sink(sink)])
//!     .unwrap();
//! store.set_cell_state(source, 5.0, 1.0).unwrap();
//!
//! let mut sim = Integrator::new(store, config).unwrap();
//! let trajectory = sim.run().unwrap();
//! assert_eq!(trajectory.len(), 6);
//!
//! let frame = trajectory.frame(trajectory.len() - 1).unwrap();
//! for cell in frame.cells() {
//!     let _ = (cell.row, cell.col, cell.auxin, cell.pins, cell.role);
//! }
//! ```
//!
//! # Modules
//!
//! | Module | Sub-crate | Contents |
//! |--------|-----------|----------|
//! | [`types`] | `pinflux-core` | IDs, parameters, roles, `StateView`, shared errors |
//! | [`space`] | `pinflux-space` | Maze grids and the connectivity graph |
//! | [`arena`] | `pinflux-arena` | State store, double buffer, snapshots |
//! | [`dynamics`] | `pinflux-dynamics` | Flux and rate functions |
//! | [`engine`] | `pinflux-engine` | Configuration, integrator, trajectory |

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

/// Core types, traits, and IDs (`pinflux-core`).
pub use pinflux_core as types;

/// Maze grids and the cell connectivity graph (`pinflux-space`).
pub use pinflux_space as space;

/// State storage and snapshots (`pinflux-arena`).
///
/// [`arena::Snapshot`] and [`arena::Frame`] are also in the [`prelude`].
pub use pinflux_arena as arena;

/// Pure flux and rate-of-change functions (`pinflux-dynamics`).
pub use pinflux_dynamics as dynamics;

/// Configuration, stepping, and trajectory storage (`pinflux-engine`).
pub use pinflux_engine as engine;

/// Common imports for typical pinflux usage.
///
/// ```rust
/// use pinflux::prelude::*;
/// ```
pub mod prelude {
    // Core types and traits
    pub use pinflux_core::{CellId, CellParams, EdgeId, Role, StateView, StepId};

    // Errors
    pub use pinflux_core::{StepError, StoreError};
    pub use pinflux_engine::ConfigError;
    pub use pinflux_space::GridError;

    // Space
    pub use pinflux_space::{Direction, MazeGrid, TissueGraph};

    // Storage
    pub use pinflux_arena::{Frame, Snapshot, StateStore};

    // Engine
    pub use pinflux_engine::{CancelToken, Integrator, RoleSpec, SimConfig, Trajectory};
}
