//! Error types shared across the pinflux workspace.
//!
//! Grid validation errors live with the builder in `pinflux-space`;
//! configuration errors live with the engine. This module holds the
//! state-store and stepping errors that several crates surface.

use std::error::Error;
use std::fmt;

use crate::id::CellId;
use crate::params::Role;

/// Errors from state-store lookups and setup mutations.
#[derive(Clone, Debug, PartialEq)]
pub enum StoreError {
    /// The cell id is outside `1..=N`.
    UnknownCell {
        /// The offending id.
        cell: CellId,
    },
    /// `(from, to)` is not a directed edge of the graph.
    ///
    /// Indicates a caller bug: a correctly built graph never produces a
    /// lookup for a non-adjacent pair.
    UnknownEdge {
        /// Cell on whose side the membrane would sit.
        from: CellId,
        /// Neighbour the membrane would face.
        to: CellId,
    },
    /// A setup-only mutation was attempted after setup was sealed.
    SetupSealed,
    /// A second Source or Sink was requested.
    DuplicateRole {
        /// The role being assigned twice.
        role: Role,
        /// The cell that already holds it.
        existing: CellId,
    },
    /// The parameter override or value failed validation.
    InvalidOverride {
        /// What went wrong.
        reason: String,
    },
}

impl fmt::Display for StoreError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::UnknownCell { cell } => write!(f, "unknown cell {cell}"),
            Self::UnknownEdge { from, to } => {
                write!(f, "no directed edge {from} -> {to}")
            }
            Self::SetupSealed => write!(f, "setup is sealed; parameters are read-only"),
            Self::DuplicateRole { role, existing } => {
                write!(f, "{role} role already assigned to cell {existing}")
            }
            Self::InvalidOverride { reason } => write!(f, "invalid override: {reason}"),
        }
    }
}

impl Error for StoreError {}

/// Errors from advancing the integrator.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum StepError {
    /// The configured step count has already been reached.
    Finished,
    /// The run was cancelled between steps.
    Cancelled {
        /// The last step that was committed before cancellation.
        step: u64,
    },
}

impl fmt::Display for StepError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Finished => write!(f, "integrator has reached its configured step count"),
            Self::Cancelled { step } => write!(f, "run cancelled after step {step}"),
        }
    }
}

impl Error for StepError {}
