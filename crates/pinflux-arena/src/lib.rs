//! Cell and membrane state storage for pinflux simulations.
//!
//! The store is laid out as a struct of arrays indexed by zero-based cell
//! slot and edge slot. Static data (parameters, roles, conductances) lives
//! once; dynamic data is double-buffered:
//!
//! ```text
//! StateStore
//! ├── Arc<TissueGraph>          (topology, shared with snapshots)
//! ├── Vec<CellParams>, Vec<Role> (per cell, frozen after setup)
//! ├── Vec<f64> conductance       (per edge, frozen after setup)
//! └── PingPongState
//!     └── StateBuffer × 2        (alternating published/staging)
//! ```
//!
//! Retained generations are copied out as [`Snapshot`]s, which are
//! immutable and cheap to clone.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod buffer;
pub mod pingpong;
pub mod snapshot;
pub mod store;

pub use buffer::{StateBuffer, Staging};
pub use pingpong::PingPongState;
pub use snapshot::{CellSample, EdgeSample, Frame, Layout, Snapshot};
pub use store::{CellState, StateStore, StepFrame};
