//! Integration tests: bit-identical trajectories from identical inputs.

use std::sync::Arc;

use pinflux_core::CellId;
#[cfg(feature = "parallel")]
use pinflux_core::{EdgeId, StateView, StepId};
use pinflux_engine::hash::{snapshot_hash, trajectory_hash};
use pinflux_engine::{Integrator, RoleSpec, SimConfig, Trajectory};
use pinflux_space::TissueGraph;
use pinflux_test_utils::fixtures;

fn run_maze(seed: u64) -> Trajectory {
    let grid = fixtures::random_maze(seed, 16, 16, 0.7);
    let graph = Arc::new(TissueGraph::from_grid(&grid));
    let n = graph.cell_count();
    let config = SimConfig {
        dt: 0.05,
        n_steps: 300,
        save_each: 25,
        ..SimConfig::default()
    };
    let mut roles = Vec::new();
    if n >= 2 {
        roles.push(RoleSpec::source(CellId(1)));
        roles.push(RoleSpec::sink(CellId(n as u32)));
    }
    let store = config.initialize_store(graph, &roles).unwrap();
    let mut sim = Integrator::new(store, config).unwrap();
    sim.run().unwrap();
    sim.into_trajectory()
}

#[test]
fn identical_inputs_hash_identically() {
    let a = run_maze(11);
    let b = run_maze(11);
    assert_eq!(trajectory_hash(&a), trajectory_hash(&b));
    for (x, y) in a.snapshots().iter().zip(b.snapshots()) {
        assert_eq!(snapshot_hash(x), snapshot_hash(y));
        assert_eq!(x, y);
    }
}

#[test]
fn different_mazes_hash_differently() {
    assert_ne!(trajectory_hash(&run_maze(11)), trajectory_hash(&run_maze(12)));
}

#[test]
fn incremental_stepping_matches_run() {
    let config = SimConfig {
        n_steps: 50,
        save_each: 10,
        ..SimConfig::default()
    };
    let build = || {
        let graph = Arc::new(TissueGraph::from_grid(&fixtures::comb_maze()));
        let store = config
            .initialize_store(graph, &[RoleSpec::source(CellId(1)), RoleSpec::sink(CellId(20))])
            .unwrap();
        Integrator::new(store, config.clone()).unwrap()
    };
    let mut whole = build();
    whole.run().unwrap();
    let mut stepped = build();
    while stepped.step().is_ok() {}
    assert_eq!(
        trajectory_hash(whole.trajectory()),
        trajectory_hash(stepped.trajectory())
    );
}

/// Plain sequential Euler state, advanced slot by slot in index order.
#[cfg(feature = "parallel")]
struct SerialState {
    step: StepId,
    auxin: Vec<f64>,
    pins: Vec<f64>,
    membrane: Vec<f64>,
}

#[cfg(feature = "parallel")]
impl StateView for SerialState {
    fn step(&self) -> StepId {
        self.step
    }

    fn auxin(&self) -> &[f64] {
        &self.auxin
    }

    fn pins(&self) -> &[f64] {
        &self.pins
    }

    fn membrane(&self) -> &[f64] {
        &self.membrane
    }
}

#[cfg(feature = "parallel")]
#[test]
fn parallel_run_matches_sequential_loop() {
    use pinflux_dynamics::TissueModel;

    let config = SimConfig {
        dt: 0.05,
        n_steps: 120,
        save_each: 120,
        ..SimConfig::default()
    };
    let graph = Arc::new(TissueGraph::from_grid(&fixtures::random_maze(5, 24, 24, 0.7)));
    let n = graph.cell_count();
    let roles = [RoleSpec::source(CellId(1)), RoleSpec::sink(CellId(n as u32))];

    let reference = config.initialize_store(graph.clone(), &roles).unwrap();
    let model = TissueModel::from_store(&reference);
    let start = reference.current();
    let mut state = SerialState {
        step: StepId(0),
        auxin: start.auxin().to_vec(),
        pins: start.pins().to_vec(),
        membrane: start.membrane().to_vec(),
    };
    for k in 1..=config.n_steps {
        let mut next = SerialState {
            step: StepId(k),
            auxin: Vec::with_capacity(state.auxin.len()),
            pins: Vec::with_capacity(state.pins.len()),
            membrane: Vec::with_capacity(state.membrane.len()),
        };
        for i in 0..state.auxin.len() {
            next.auxin.push(state.auxin[i] + config.dt * model.auxin_rate(&state, i));
            next.pins.push(state.pins[i] + config.dt * model.pins_rate(&state, i));
        }
        for e in 0..state.membrane.len() {
            let rate = model.membrane_rate(&state, EdgeId(e as u32));
            next.membrane.push(state.membrane[e] + config.dt * rate);
        }
        state = next;
    }

    let store = config.initialize_store(graph, &roles).unwrap();
    let mut sim = Integrator::new(store, config).unwrap();
    sim.run().unwrap();
    let last = sim.trajectory().last().unwrap();
    assert_eq!(last.step(), state.step);
    assert_eq!(snapshot_hash(last), snapshot_hash(&state));
}
