//! Flux and dynamics functions for the auxin/PINS transport model.
//!
//! Everything here is pure: rates are recomputed in full from the state
//! passed in, and nothing is cached between calls.
//!
//! - [`kernel`] holds the scalar formulas for a single cell or membrane.
//! - [`TissueModel`] binds the formulas to a graph, a parameter table and
//!   a conductance table, and evaluates them against any [`StateView`].
//!
//! [`StateView`]: pinflux_core::StateView

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod kernel;
pub mod model;

pub use model::{Rates, TissueModel};
