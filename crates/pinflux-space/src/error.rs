//! Error types for grid validation.

use std::fmt;

/// Errors arising from malformed input grids.
#[derive(Clone, Debug, PartialEq, Eq)]
pub enum GridError {
    /// The grid has no rows.
    Empty,
    /// The first row has no columns.
    EmptyRow,
    /// A row's length differs from the first row's.
    Ragged {
        /// Index of the offending row.
        row: usize,
        /// Length of the first row.
        expected: usize,
        /// Length of the offending row.
        found: usize,
    },
    /// The grid has more tiles than cell and edge ids can address.
    TooLarge {
        /// Row count.
        rows: usize,
        /// Column count.
        cols: usize,
    },
}

impl fmt::Display for GridError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Empty => write!(f, "grid has no rows"),
            Self::EmptyRow => write!(f, "grid rows have no columns"),
            Self::Ragged {
                row,
                expected,
                found,
            } => write!(
                f,
                "grid is not rectangular: row {row} has {found} tiles, expected {expected}"
            ),
            Self::TooLarge { rows, cols } => {
                write!(f, "grid {rows}x{cols} exceeds the addressable cell count")
            }
        }
    }
}

impl std::error::Error for GridError {}
