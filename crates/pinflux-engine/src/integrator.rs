//! Fixed-step explicit Euler integration.
//!
//! [`Integrator`] owns a sealed [`StateStore`] and drives it forward one
//! step at a time. Each step reads only the published state and writes
//! only the staging buffers, then commits both in a single publish:
//!
//! 1. `a' = a + dt·da/dt`, `P' = P + dt·dP/dt` per cell
//! 2. `p' = p + dt·dp/dt` per directed edge
//! 3. publish, then retain if `step % save_each == 0`
//!
//! No clamping, no stability check. Divergence propagates as NaN or
//! infinity and is only reported.

use std::time::Instant;

use log::{info, trace, warn};
use pinflux_arena::{Staging, StateStore, StepFrame};
use pinflux_core::{EdgeId, StateView, StepError, StepId};
use pinflux_dynamics::TissueModel;

#[cfg(feature = "parallel")]
use rayon::prelude::*;

use crate::cancel::CancelToken;
use crate::config::{ConfigError, SimConfig};
use crate::diagnostics::{self, NonFinite};
use crate::metrics::{RunMetrics, StepMetrics};
use crate::trajectory::Trajectory;

// ── Euler update ──────────────────────────────────────────────────

/// Write `previous + dt · rate` for every state variable into `next`.
///
/// Every output slot depends only on `previous`, so slots may be computed
/// in any order. With the `parallel` feature each array is filled with a
/// rayon parallel iterator; results are bit-identical either way.
pub fn euler_update<S>(model: &TissueModel<'_>, previous: &S, next: Staging<'_>, dt: f64)
where
    S: StateView + Sync + ?Sized,
{
    let auxin = previous.auxin();
    let pins = previous.pins();
    let membrane = previous.membrane();

    #[cfg(not(feature = "parallel"))]
    {
        for (i, out) in next.auxin.iter_mut().enumerate() {
            *out = auxin[i] + dt * model.auxin_rate(previous, i);
        }
        for (i, out) in next.pins.iter_mut().enumerate() {
            *out = pins[i] + dt * model.pins_rate(previous, i);
        }
        for (e, out) in next.membrane.iter_mut().enumerate() {
            *out = membrane[e] + dt * model.membrane_rate(previous, EdgeId(e as u32));
        }
    }

    #[cfg(feature = "parallel")]
    {
        next.auxin.par_iter_mut().enumerate().for_each(|(i, out)| {
            *out = auxin[i] + dt * model.auxin_rate(previous, i);
        });
        next.pins.par_iter_mut().enumerate().for_each(|(i, out)| {
            *out = pins[i] + dt * model.pins_rate(previous, i);
        });
        next.membrane
            .par_iter_mut()
            .enumerate()
            .for_each(|(e, out)| {
                *out = membrane[e] + dt * model.membrane_rate(previous, EdgeId(e as u32));
            });
    }
}

/// Advance `store` by one step and publish the result.
fn advance(store: &mut StateStore, dt: f64) {
    let frame = store.begin_step();
    let model = TissueModel::from_frame(&frame);
    let StepFrame { previous, next, .. } = frame;
    euler_update(&model, previous, next, dt);
    store.publish();
}

// ── Phase ─────────────────────────────────────────────────────────

/// Lifecycle of an [`Integrator`].
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Phase {
    /// Constructed; no step taken yet.
    Idle,
    /// At least one step taken, more remain.
    Running,
    /// `n_steps` steps taken. Further steps are rejected.
    Finished,
}

// ── Integrator ────────────────────────────────────────────────────

/// Drives a sealed state store through `n_steps` Euler steps.
///
/// # Example
///
/// ```
/// use std::sync::Arc;
/// use pinflux_core::CellId;
/// use pinflux_engine::{Integrator, RoleSpec, SimConfig};
/// use pinflux_space::TissueGraph;
///
/// let graph = Arc::new(TissueGraph::build(&[[-1, -1, -1]]).unwrap());
/// let config = SimConfig { n_steps: 20, save_each: 5, ..SimConfig::default() };
/// let store = config
///     .initialize_store(graph, &[RoleSpec::source(CellId(1)), RoleSpec::sink(CellId(3))])
///     .unwrap();
/// let mut integrator = Integrator::new(store, config).unwrap();
/// let trajectory = integrator.run().unwrap();
/// assert_eq!(trajectory.len(), 5);
/// ```
#[derive(Debug)]
pub struct Integrator {
    store: StateStore,
    config: SimConfig,
    trajectory: Trajectory,
    phase: Phase,
    cancel: CancelToken,
    last_metrics: StepMetrics,
    run_metrics: RunMetrics,
    first_non_finite: Option<NonFinite>,
}

impl Integrator {
    /// Validate `config`, seal `store`, and retain its current state as
    /// the first trajectory entry.
    ///
    /// The store must still be at step 0; one advanced outside an
    /// integrator is rejected with [`ConfigError::AlreadyStepped`].
    pub fn new(mut store: StateStore, config: SimConfig) -> Result<Self, ConfigError> {
        config.validate()?;
        let step = store.current_step();
        if step != StepId(0) {
            return Err(ConfigError::AlreadyStepped { step });
        }
        store.seal();
        let trajectory = Trajectory::new(store.layout(), store.snapshot());
        let mut integrator = Self {
            store,
            config,
            trajectory,
            phase: Phase::Idle,
            cancel: CancelToken::new(),
            last_metrics: StepMetrics::default(),
            run_metrics: RunMetrics {
                snapshots_retained: 1,
                ..RunMetrics::default()
            },
            first_non_finite: None,
        };
        if integrator.config.check_finite {
            integrator.scan_non_finite();
        }
        Ok(integrator)
    }

    /// Use `token` for cancellation instead of the integrator's own.
    pub fn with_cancel_token(mut self, token: CancelToken) -> Self {
        self.cancel = token;
        self
    }

    /// Take one step.
    ///
    /// Returns the number of the step just committed.
    ///
    /// # Errors
    ///
    /// [`StepError::Finished`] once `n_steps` steps have been taken, and
    /// [`StepError::Cancelled`] if cancellation was requested. Neither
    /// changes the state or the trajectory.
    pub fn step(&mut self) -> Result<StepId, StepError> {
        if self.phase == Phase::Finished {
            return Err(StepError::Finished);
        }
        if self.cancel.is_cancelled() {
            return Err(StepError::Cancelled {
                step: self.store.current_step().0,
            });
        }
        if self.phase == Phase::Idle {
            info!(
                "run started: {} cells, {} edges, dt {}, {} steps, saving every {}",
                self.store.graph().cell_count(),
                self.store.graph().edge_count(),
                self.config.dt,
                self.config.n_steps,
                self.config.save_each,
            );
            self.phase = Phase::Running;
        }

        let start = Instant::now();
        advance(&mut self.store, self.config.dt);
        let step = self.store.current_step();

        let retained = step.0 % self.config.save_each == 0;
        if retained {
            self.trajectory.push(self.store.snapshot());
            trace!("retained snapshot at step {step}");
        }

        let non_finite = if self.config.check_finite {
            self.scan_non_finite()
        } else {
            0
        };

        self.last_metrics = StepMetrics {
            step: step.0,
            total_us: start.elapsed().as_micros() as u64,
            retained,
            non_finite,
        };
        self.run_metrics.record(&self.last_metrics);

        if step.0 >= self.config.n_steps {
            self.phase = Phase::Finished;
            info!(
                "run finished at step {step}: {} snapshots retained, mean step {:.1}us",
                self.trajectory.len(),
                self.run_metrics.mean_step_us(),
            );
        }
        Ok(step)
    }

    /// Step until `n_steps` is reached.
    ///
    /// Returns immediately if the run already finished.
    ///
    /// # Errors
    ///
    /// [`StepError::Cancelled`] if cancellation was requested. The
    /// trajectory retained so far stays available through
    /// [`trajectory()`](Self::trajectory).
    pub fn run(&mut self) -> Result<&Trajectory, StepError> {
        while self.phase != Phase::Finished {
            if let Err(e) = self.step() {
                info!("{e}; {} snapshots retained", self.trajectory.len());
                return Err(e);
            }
        }
        Ok(&self.trajectory)
    }

    /// Scan the published state, record the first detection, and return
    /// the number of non-finite values.
    fn scan_non_finite(&mut self) -> usize {
        let current = self.store.current();
        let count = diagnostics::count_non_finite(current);
        if count > 0 && self.first_non_finite.is_none() {
            if let Some(found) = diagnostics::first_non_finite(current) {
                warn!("{found}; integration continues unclamped");
                self.first_non_finite = Some(found);
            }
        }
        count
    }

    // ── Accessors ─────────────────────────────────────────────────

    /// Current lifecycle phase.
    pub fn phase(&self) -> Phase {
        self.phase
    }

    /// Number of the last committed step (0 before the first step).
    pub fn current_step(&self) -> StepId {
        self.store.current_step()
    }

    /// The configuration this run uses.
    pub fn config(&self) -> &SimConfig {
        &self.config
    }

    /// The sealed state store.
    pub fn store(&self) -> &StateStore {
        &self.store
    }

    /// Snapshots retained so far.
    pub fn trajectory(&self) -> &Trajectory {
        &self.trajectory
    }

    /// Consume the integrator, keeping only the trajectory.
    pub fn into_trajectory(self) -> Trajectory {
        self.trajectory
    }

    /// A clone of the cancellation token; cancelling it stops the run
    /// before its next step.
    pub fn cancel_token(&self) -> CancelToken {
        self.cancel.clone()
    }

    /// Metrics of the most recent step.
    pub fn last_metrics(&self) -> &StepMetrics {
        &self.last_metrics
    }

    /// Totals across the run so far.
    pub fn run_metrics(&self) -> &RunMetrics {
        &self.run_metrics
    }

    /// Where the first NaN or infinity appeared, if the scan is enabled
    /// and one has.
    pub fn first_non_finite(&self) -> Option<NonFinite> {
        self.first_non_finite
    }
}

#[cfg(test)]
mod tests {
    use std::sync::Arc;

    use super::*;
    use pinflux_core::{CellId, CellParams};
    use pinflux_space::TissueGraph;

    fn two_cells(params: CellParams, config: &SimConfig) -> StateStore {
        let graph = Arc::new(TissueGraph::build(&[[-1, -1]]).unwrap());
        let mut store = StateStore::initialize(graph, params, config.initial_pins);
        store.set_cell_state(CellId(1), 10.0, 0.0).unwrap();
        store.set_cell_state(CellId(2), 0.0, 0.0).unwrap();
        store
    }

    fn diffusion_only() -> CellParams {
        CellParams {
            auxin_diffusion: 1.0,
            ..CellParams::inert()
        }
    }

    #[test]
    fn worked_example_single_step() {
        let config = SimConfig {
            dt: 0.1,
            n_steps: 1,
            save_each: 1,
            ..SimConfig::default()
        };
        let store = two_cells(diffusion_only(), &config);
        let mut integrator = Integrator::new(store, config).unwrap();
        assert_eq!(integrator.step(), Ok(StepId(1)));
        let state = integrator.store().current();
        assert_eq!(state.auxin(), &[9.0, 1.0]);
        assert_eq!(integrator.phase(), Phase::Finished);
    }

    #[test]
    fn lifecycle_transitions() {
        let config = SimConfig {
            n_steps: 2,
            save_each: 1,
            ..SimConfig::default()
        };
        let store = two_cells(diffusion_only(), &config);
        let mut integrator = Integrator::new(store, config).unwrap();
        assert_eq!(integrator.phase(), Phase::Idle);
        integrator.step().unwrap();
        assert_eq!(integrator.phase(), Phase::Running);
        integrator.step().unwrap();
        assert_eq!(integrator.phase(), Phase::Finished);
        assert_eq!(integrator.step(), Err(StepError::Finished));
        assert_eq!(integrator.current_step(), StepId(2));
        assert_eq!(integrator.trajectory().len(), 3);
    }

    #[test]
    fn new_rejects_invalid_config() {
        let config = SimConfig {
            dt: 0.0,
            ..SimConfig::default()
        };
        let store = two_cells(diffusion_only(), &config);
        assert!(matches!(
            Integrator::new(store, config),
            Err(ConfigError::InvalidDt { .. })
        ));
    }

    #[test]
    fn new_seals_store() {
        let config = SimConfig::default();
        let store = two_cells(diffusion_only(), &config);
        let integrator = Integrator::new(store, config).unwrap();
        assert!(integrator.store().is_sealed());
    }

    #[test]
    fn new_rejects_store_already_stepped() {
        let config = SimConfig {
            n_steps: 3,
            save_each: 1,
            ..SimConfig::default()
        };
        let mut store = two_cells(diffusion_only(), &config);
        advance(&mut store, config.dt);
        let err = Integrator::new(store, config).err().unwrap();
        assert_eq!(err, ConfigError::AlreadyStepped { step: StepId(1) });
        assert_eq!(err.to_string(), "store has already advanced to step 1");
    }

    #[test]
    fn cancellation_stops_between_steps() {
        let config = SimConfig {
            n_steps: 100,
            save_each: 10,
            ..SimConfig::default()
        };
        let store = two_cells(diffusion_only(), &config);
        let token = CancelToken::new();
        let mut integrator = Integrator::new(store, config)
            .unwrap()
            .with_cancel_token(token.clone());
        for _ in 0..25 {
            integrator.step().unwrap();
        }
        token.cancel();
        assert_eq!(integrator.run().unwrap_err(), StepError::Cancelled { step: 25 });
        assert_eq!(integrator.current_step(), StepId(25));
        let steps: Vec<u64> = integrator.trajectory().steps().map(|s| s.0).collect();
        assert_eq!(steps, vec![0, 10, 20]);

        token.reset();
        integrator.run().unwrap();
        assert_eq!(integrator.trajectory().len(), 11);
    }

    #[test]
    fn divergence_is_reported_not_corrected() {
        let params = CellParams {
            auxin_degradation: -50.0,
            ..CellParams::inert()
        };
        let config = SimConfig {
            dt: 1.0,
            n_steps: 400,
            save_each: 400,
            ..SimConfig::default()
        };
        let store = two_cells(params, &config);
        let mut integrator = Integrator::new(store, config).unwrap();
        integrator.run().unwrap();
        let found = integrator.first_non_finite().unwrap();
        assert_eq!(found.quantity, diagnostics::Quantity::Auxin);
        assert_eq!(found.index, 0);
        assert!(integrator.run_metrics().non_finite_steps > 0);
        assert_eq!(integrator.phase(), Phase::Finished);
        assert!(!integrator.trajectory().last().unwrap().auxin()[0].is_finite());
    }

    #[test]
    fn run_metrics_track_steps_and_snapshots() {
        let config = SimConfig {
            n_steps: 30,
            save_each: 7,
            ..SimConfig::default()
        };
        let store = two_cells(diffusion_only(), &config);
        let mut integrator = Integrator::new(store, config).unwrap();
        integrator.run().unwrap();
        let m = integrator.run_metrics();
        assert_eq!(m.steps_executed, 30);
        assert_eq!(m.snapshots_retained, 5);
        assert_eq!(integrator.last_metrics().step, 30);
        assert!(!integrator.last_metrics().retained);
    }
}
