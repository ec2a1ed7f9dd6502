//! Benchmark profiles for the pinflux simulator.
//!
//! - [`reference_profile`]: 100x100 maze (about 7K cells)
//! - [`stress_profile`]: 316x316 maze (about 70K cells)
//!
//! Both place the source at the first cell and the sink at the last.

#![forbid(unsafe_code)]
#![deny(rustdoc::broken_intra_doc_links)]

use std::sync::Arc;

use pinflux_core::CellId;
use pinflux_engine::{Integrator, RoleSpec, SimConfig};
use pinflux_space::TissueGraph;
use pinflux_test_utils::fixtures::random_maze;

/// Fraction of open tiles in generated profile mazes.
pub const OPEN_FRACTION: f64 = 0.7;

/// A ready-to-build benchmark scenario.
#[derive(Clone, Debug)]
pub struct Profile {
    /// Connectivity graph.
    pub graph: Arc<TissueGraph>,
    /// Run settings.
    pub config: SimConfig,
    /// Source and sink placement.
    pub roles: Vec<RoleSpec>,
}

impl Profile {
    /// Build an integrator for this profile.
    ///
    /// # Panics
    ///
    /// Panics if the profile's configuration is invalid, which the
    /// constructors in this crate never produce.
    pub fn integrator(&self) -> Integrator {
        let store = self
            .config
            .initialize_store(Arc::clone(&self.graph), &self.roles)
            .expect("profile config is valid");
        Integrator::new(store, self.config.clone()).expect("profile config is valid")
    }
}

/// A `side`×`side` random maze profile.
pub fn maze_profile(side: usize, seed: u64, config: SimConfig) -> Profile {
    let graph = Arc::new(TissueGraph::from_grid(&random_maze(
        seed,
        side,
        side,
        OPEN_FRACTION,
    )));
    let n = graph.cell_count();
    let roles = if n >= 2 {
        vec![
            RoleSpec::source(CellId(1)),
            RoleSpec::sink(CellId::from_index(n - 1)),
        ]
    } else {
        Vec::new()
    };
    Profile {
        graph,
        config,
        roles,
    }
}

/// dt = 0.05, 1000 steps, retaining every 100th.
pub fn reference_config() -> SimConfig {
    SimConfig {
        dt: 0.05,
        n_steps: 1000,
        save_each: 100,
        ..SimConfig::default()
    }
}

/// 100x100 maze with [`reference_config`].
pub fn reference_profile(seed: u64) -> Profile {
    maze_profile(100, seed, reference_config())
}

/// 316x316 maze with [`reference_config`].
pub fn stress_profile(seed: u64) -> Profile {
    maze_profile(316, seed, reference_config())
}
