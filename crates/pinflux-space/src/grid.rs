//! Validated rectangular tile grid.

use crate::error::GridError;

/// An immutable rectangular grid of tile ids.
///
/// Tile `0` is a wall; any nonzero value is open. The reference
/// convention marks open tiles with `-1`, but the value itself carries no
/// meaning beyond open/wall.
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct MazeGrid {
    rows: usize,
    cols: usize,
    tiles: Vec<i32>,
}

impl MazeGrid {
    /// Tile value for a wall.
    pub const WALL: i32 = 0;

    /// Conventional tile value for an open tile.
    pub const OPEN: i32 = -1;

    /// Largest tile count a grid may have. Each cell owns at most four
    /// directed edges and edge ids are `u32`, so every id stays in range.
    pub const MAX_TILES: usize = u32::MAX as usize / 4;

    /// Build a grid from a slice of rows.
    ///
    /// Returns [`GridError::Empty`] for no rows, [`GridError::EmptyRow`]
    /// for zero-width rows, and [`GridError::Ragged`] if any row's length
    /// differs from the first.
    ///
    /// # Examples
    ///
    /// ```
    /// use pinflux_space::{GridError, MazeGrid};
    ///
    /// let grid = MazeGrid::from_rows(&[vec![-1, 0], vec![0, -1]]).unwrap();
    /// assert_eq!(grid.extents(), (2, 2));
    ///
    /// let ragged = MazeGrid::from_rows(&[vec![-1, 0], vec![0]]);
    /// assert!(matches!(ragged, Err(GridError::Ragged { row: 1, .. })));
    /// ```
    pub fn from_rows<R: AsRef<[i32]>>(rows: &[R]) -> Result<Self, GridError> {
        let first = rows.first().ok_or(GridError::Empty)?;
        let cols = first.as_ref().len();
        let mut tiles = Vec::with_capacity(rows.len() * cols);
        for (r, row) in rows.iter().enumerate() {
            let row = row.as_ref();
            if row.len() != cols {
                return Err(GridError::Ragged {
                    row: r,
                    expected: cols,
                    found: row.len(),
                });
            }
            tiles.extend_from_slice(row);
        }
        Self::from_flat(rows.len(), cols, tiles)
    }

    /// Build a grid from row-major tile data.
    ///
    /// `tiles.len()` must equal `rows * cols`; a mismatch is reported as
    /// [`GridError::Ragged`] on the first short or overlong row.
    pub fn from_flat(rows: usize, cols: usize, tiles: Vec<i32>) -> Result<Self, GridError> {
        if rows == 0 {
            return Err(GridError::Empty);
        }
        if cols == 0 {
            return Err(GridError::EmptyRow);
        }
        let expected = rows
            .checked_mul(cols)
            .filter(|&n| n <= Self::MAX_TILES)
            .ok_or(GridError::TooLarge { rows, cols })?;
        if tiles.len() != expected {
            let row = (tiles.len() / cols).min(rows - 1);
            let found = tiles.len().saturating_sub(row * cols);
            return Err(GridError::Ragged {
                row,
                expected: cols,
                found,
            });
        }
        Ok(Self { rows, cols, tiles })
    }

    /// Number of rows.
    pub fn rows(&self) -> usize {
        self.rows
    }

    /// Number of columns.
    pub fn cols(&self) -> usize {
        self.cols
    }

    /// `(rows, cols)`.
    pub fn extents(&self) -> (usize, usize) {
        (self.rows, self.cols)
    }

    /// Tile id at `(row, col)`, or `None` if out of bounds.
    pub fn tile(&self, row: usize, col: usize) -> Option<i32> {
        if row < self.rows && col < self.cols {
            Some(self.tiles[row * self.cols + col])
        } else {
            None
        }
    }

    /// Whether `(row, col)` is in bounds and open.
    pub fn is_open(&self, row: usize, col: usize) -> bool {
        self.tile(row, col).is_some_and(|t| t != Self::WALL)
    }

    /// Number of open tiles.
    pub fn open_count(&self) -> usize {
        self.tiles.iter().filter(|&&t| t != Self::WALL).count()
    }

    /// Row-major tile data.
    pub fn tiles(&self) -> &[i32] {
        &self.tiles
    }
}
