//! Cardinal directions for 4-connected adjacency.

/// A cardinal direction from a cell towards one of its neighbours.
///
/// Rows grow downward, so `North` is `row - 1`.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Direction {
    /// Row above.
    North,
    /// Row below.
    South,
    /// Column to the left.
    West,
    /// Column to the right.
    East,
}

impl Direction {
    /// Neighbour scan order used by the graph builder.
    pub const ALL: [Direction; 4] = [
        Direction::North,
        Direction::South,
        Direction::West,
        Direction::East,
    ];

    /// `(d_row, d_col)` grid offset.
    pub fn offset(self) -> (i64, i64) {
        match self {
            Self::North => (-1, 0),
            Self::South => (1, 0),
            Self::West => (0, -1),
            Self::East => (0, 1),
        }
    }

    /// Direction pointing back the other way.
    pub fn opposite(self) -> Self {
        match self {
            Self::North => Self::South,
            Self::South => Self::North,
            Self::West => Self::East,
            Self::East => Self::West,
        }
    }

    /// Unit vector `(x, y)` in screen coordinates (x right, y down).
    pub fn unit(self) -> (f64, f64) {
        let (dr, dc) = self.offset();
        (dc as f64, dr as f64)
    }
}
