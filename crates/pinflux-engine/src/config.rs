//! Simulation configuration, validation, and error types.
//!
//! [`SimConfig`] is supplied programmatically. [`validate()`](SimConfig::validate)
//! checks structural invariants before a store is built or an
//! [`Integrator`](crate::Integrator) is constructed.

use std::error::Error;
use std::fmt;
use std::sync::Arc;

use pinflux_arena::StateStore;
use pinflux_core::{CellId, CellParams, Role, StepId, StoreError};
use pinflux_space::TissueGraph;

// ── ConfigError ────────────────────────────────────────────────────

/// Errors detected while validating a [`SimConfig`] or applying setup.
#[derive(Clone, Debug, PartialEq)]
pub enum ConfigError {
    /// `dt` is NaN, infinite, zero, or negative.
    InvalidDt {
        /// The invalid value.
        value: f64,
    },
    /// `n_steps` is zero.
    ZeroSteps,
    /// `save_each` is zero.
    ZeroSaveInterval,
    /// The default parameter set or initial PINS value is invalid.
    InvalidParams {
        /// Description of the validation failure.
        reason: String,
    },
    /// A setup operation on the state store failed.
    Store(StoreError),
    /// The store handed to an integrator has already been stepped.
    AlreadyStepped {
        /// The store's current step.
        step: StepId,
    },
}

impl fmt::Display for ConfigError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::InvalidDt { value } => {
                write!(f, "dt must be finite and positive, got {value}")
            }
            Self::ZeroSteps => write!(f, "n_steps must be at least 1"),
            Self::ZeroSaveInterval => write!(f, "save_each must be at least 1"),
            Self::InvalidParams { reason } => write!(f, "invalid parameters: {reason}"),
            Self::Store(e) => write!(f, "store: {e}"),
            Self::AlreadyStepped { step } => {
                write!(f, "store has already advanced to step {step}")
            }
        }
    }
}

impl Error for ConfigError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Store(e) => Some(e),
            _ => None,
        }
    }
}

impl From<StoreError> for ConfigError {
    fn from(e: StoreError) -> Self {
        Self::Store(e)
    }
}

// ── RoleSpec ───────────────────────────────────────────────────────

/// A role assignment applied during setup.
#[derive(Clone, Copy, Debug, PartialEq)]
pub struct RoleSpec {
    /// The cell receiving the role.
    pub cell: CellId,
    /// The role.
    pub role: Role,
    /// Explicit parameters; `None` uses the role's default set.
    pub params: Option<CellParams>,
}

impl RoleSpec {
    /// A source at `cell` with default source parameters.
    pub fn source(cell: CellId) -> Self {
        Self {
            cell,
            role: Role::Source,
            params: None,
        }
    }

    /// A sink at `cell` with default sink parameters.
    pub fn sink(cell: CellId) -> Self {
        Self {
            cell,
            role: Role::Sink,
            params: None,
        }
    }

    /// Replace the parameter set applied with the role.
    pub fn with_params(self, params: CellParams) -> Self {
        Self {
            params: Some(params),
            ..self
        }
    }
}

// ── SimConfig ──────────────────────────────────────────────────────

/// Integration and initialization settings for one run.
#[derive(Clone, Debug, PartialEq)]
pub struct SimConfig {
    /// Explicit Euler step size. Must be finite and positive.
    pub dt: f64,
    /// Number of integration steps. Must be at least 1.
    pub n_steps: u64,
    /// Retain every `save_each`-th step. Must be at least 1.
    pub save_each: u64,
    /// Parameter set given to every cell before role overrides.
    pub default_params: CellParams,
    /// Initial cytoplasmic PINS of every cell.
    pub initial_pins: f64,
    /// Scan each committed step for NaN or infinity. Observability only:
    /// detection never alters or stops the run.
    pub check_finite: bool,
}

impl Default for SimConfig {
    fn default() -> Self {
        Self {
            dt: 0.1,
            n_steps: 1000,
            save_each: 10,
            default_params: CellParams::default(),
            initial_pins: 1.0,
            check_finite: true,
        }
    }
}

impl SimConfig {
    /// Check structural invariants.
    pub fn validate(&self) -> Result<(), ConfigError> {
        if !self.dt.is_finite() || self.dt <= 0.0 {
            return Err(ConfigError::InvalidDt { value: self.dt });
        }
        if self.n_steps == 0 {
            return Err(ConfigError::ZeroSteps);
        }
        if self.save_each == 0 {
            return Err(ConfigError::ZeroSaveInterval);
        }
        self.default_params
            .validate()
            .map_err(|reason| ConfigError::InvalidParams { reason })?;
        if !self.initial_pins.is_finite() {
            return Err(ConfigError::InvalidParams {
                reason: format!("initial_pins must be finite, got {}", self.initial_pins),
            });
        }
        Ok(())
    }

    /// Number of snapshots a complete run retains, the initial one
    /// included.
    pub fn expected_snapshots(&self) -> u64 {
        self.n_steps / self.save_each.max(1) + 1
    }

    /// Validate, then build a store over `graph` with this configuration's
    /// defaults and the given role assignments applied.
    ///
    /// The store is left unsealed so callers can still adjust initial
    /// state and conductances.
    pub fn initialize_store(
        &self,
        graph: Arc<TissueGraph>,
        roles: &[RoleSpec],
    ) -> Result<StateStore, ConfigError> {
        self.validate()?;
        let mut store = StateStore::initialize(graph, self.default_params, self.initial_pins);
        for spec in roles {
            store.override_role(spec.cell, spec.role, spec.params)?;
        }
        Ok(store)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn graph() -> Arc<TissueGraph> {
        Arc::new(TissueGraph::build(&[[-1, -1, -1]]).unwrap())
    }

    #[test]
    fn default_config_is_valid() {
        assert!(SimConfig::default().validate().is_ok());
    }

    #[test]
    fn rejects_bad_dt() {
        for dt in [0.0, -0.1, f64::NAN, f64::INFINITY] {
            let cfg = SimConfig {
                dt,
                ..SimConfig::default()
            };
            assert!(matches!(cfg.validate(), Err(ConfigError::InvalidDt { .. })));
        }
    }

    #[test]
    fn rejects_zero_counts() {
        let cfg = SimConfig {
            n_steps: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSteps));
        let cfg = SimConfig {
            save_each: 0,
            ..SimConfig::default()
        };
        assert_eq!(cfg.validate(), Err(ConfigError::ZeroSaveInterval));
    }

    #[test]
    fn rejects_bad_params() {
        let cfg = SimConfig {
            default_params: CellParams {
                volume: -1.0,
                ..CellParams::default()
            },
            ..SimConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidParams { .. })
        ));
        let cfg = SimConfig {
            initial_pins: f64::NAN,
            ..SimConfig::default()
        };
        assert!(matches!(
            cfg.validate(),
            Err(ConfigError::InvalidParams { .. })
        ));
    }

    #[test]
    fn expected_snapshots_counts_initial() {
        let cfg = SimConfig {
            n_steps: 25,
            save_each: 10,
            ..SimConfig::default()
        };
        assert_eq!(cfg.expected_snapshots(), 3);
    }

    #[test]
    fn initialize_store_applies_roles() {
        let cfg = SimConfig::default();
        let store = cfg
            .initialize_store(graph(), &[RoleSpec::source(CellId(1)), RoleSpec::sink(CellId(3))])
            .unwrap();
        assert_eq!(store.role(CellId(1)).unwrap(), Role::Source);
        assert_eq!(store.role(CellId(3)).unwrap(), Role::Sink);
        assert_eq!(store.get_cell_state(CellId(2)).unwrap().pins, cfg.initial_pins);
        assert!(!store.is_sealed());
    }

    #[test]
    fn store_errors_are_wrapped() {
        let err = SimConfig::default()
            .initialize_store(graph(), &[RoleSpec::source(CellId(1)), RoleSpec::source(CellId(2))])
            .unwrap_err();
        assert!(matches!(
            err,
            ConfigError::Store(StoreError::DuplicateRole { .. })
        ));
        assert!(err.source().is_some());
        assert_eq!(
            err.to_string(),
            "store: source role already assigned to cell 1"
        );
    }
}
