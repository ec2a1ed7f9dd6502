//! Grid fixtures.
//!
//! - [`two_cell`]: the smallest connected tissue.
//! - [`single_cell`]: one isolated cell.
//! - [`corridor`]: a 1×n strip.
//! - [`comb_maze`]: a 5×7 comb with a top corridor and four teeth.
//! - [`random_maze`]: seeded random open/wall layout.

use pinflux_space::MazeGrid;
use rand::{Rng, SeedableRng};
use rand_chacha::ChaCha8Rng;

const O: i32 = MazeGrid::OPEN;
const W: i32 = MazeGrid::WALL;

/// Cell count of [`comb_maze`].
pub const COMB_CELLS: usize = 20;

/// Directed edge count of [`comb_maze`].
pub const COMB_EDGES: usize = 38;

/// Two open tiles side by side.
pub fn two_cell() -> MazeGrid {
    MazeGrid::from_rows(&[[O, O]]).expect("fixture grid is rectangular")
}

/// One open tile surrounded by walls.
pub fn single_cell() -> MazeGrid {
    MazeGrid::from_rows(&[[W, W, W], [W, O, W], [W, W, W]]).expect("fixture grid is rectangular")
}

/// A single row of `len` open tiles.
pub fn corridor(len: usize) -> MazeGrid {
    MazeGrid::from_flat(1, len, vec![O; len]).expect("corridor length must be positive")
}

/// A tree-shaped maze: the top row is open and every even column hangs
/// down from it. Column 0 reaches the bottom row.
pub fn comb_maze() -> MazeGrid {
    MazeGrid::from_rows(&[
        [O, O, O, O, O, O, O],
        [O, W, O, W, O, W, O],
        [O, W, O, W, O, W, O],
        [O, W, O, W, O, W, O],
        [O, W, W, W, W, W, W],
    ])
    .expect("fixture grid is rectangular")
}

/// A `rows`×`cols` grid where each tile is open with probability
/// `open_fraction`.
///
/// Open tiles carry assorted nonzero ids, not just `-1`, so callers
/// exercise the "any nonzero is open" rule. Deterministic for a seed.
pub fn random_maze(seed: u64, rows: usize, cols: usize, open_fraction: f64) -> MazeGrid {
    let mut rng = ChaCha8Rng::seed_from_u64(seed);
    let tiles = (0..rows * cols)
        .map(|_| {
            if rng.random::<f64>() < open_fraction {
                if rng.random_range(0..4) == 0 {
                    rng.random_range(1..=9)
                } else {
                    O
                }
            } else {
                W
            }
        })
        .collect();
    MazeGrid::from_flat(rows, cols, tiles).expect("random maze extents must be positive")
}
