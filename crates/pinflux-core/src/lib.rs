//! Core types and traits for the pinflux simulator.
//!
//! This is the leaf crate with zero internal dependencies. It defines
//! the fundamental abstractions shared across the workspace: typed
//! identifiers, the per-cell parameter set and role tag, error types,
//! and the read-only [`StateView`] trait.

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod error;
pub mod id;
pub mod params;
pub mod traits;

pub use error::{StepError, StoreError};
pub use id::{CellId, EdgeId, StepId};
pub use params::{CellParams, Role};
pub use traits::StateView;
