//! Time-stepping engine for pinflux simulations.
//!
//! Wires a sealed [`StateStore`](pinflux_arena::StateStore) to the model
//! in `pinflux-dynamics` and advances it with fixed-step explicit Euler,
//! retaining every `save_each`-th state in a [`Trajectory`].
//!
//! - [`SimConfig`] / [`RoleSpec`]: programmatic configuration and setup
//! - [`Integrator`]: the Idle → Running → Finished step loop
//! - [`CancelToken`]: cooperative cancellation between steps
//! - [`hash`]: FNV-1a fingerprints for determinism checks
//! - [`diagnostics`]: NaN/infinity detection, reported but never corrected

#![deny(missing_docs)]
#![deny(rustdoc::broken_intra_doc_links)]
#![forbid(unsafe_code)]

pub mod cancel;
pub mod config;
pub mod diagnostics;
pub mod hash;
pub mod integrator;
pub mod metrics;
pub mod trajectory;

pub use cancel::CancelToken;
pub use config::{ConfigError, RoleSpec, SimConfig};
pub use diagnostics::{NonFinite, Quantity};
pub use integrator::{euler_update, Integrator, Phase};
pub use metrics::{RunMetrics, StepMetrics};
pub use trajectory::Trajectory;
