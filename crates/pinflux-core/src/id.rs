//! Strongly-typed identifiers for cells, membranes, and steps.

use std::fmt;

/// Identifies a cell (graph vertex).
///
/// Cell ids are assigned in row-major scan order over open tiles and form
/// the contiguous range `1..=N`. Use [`CellId::index`] to convert to a
/// zero-based array slot.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct CellId(pub u32);

impl CellId {
    /// Build the id for the zero-based array slot `index`.
    pub fn from_index(index: usize) -> Self {
        Self(index as u32 + 1)
    }

    /// Zero-based array slot for this id.
    ///
    /// Returns `None` for the invalid id `0`.
    pub fn index(self) -> Option<usize> {
        (self.0 as usize).checked_sub(1)
    }
}

impl fmt::Display for CellId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for CellId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Identifies a directed edge (one cell's membrane facing a neighbour).
///
/// `EdgeId(n)` is the n-th directed edge in build order and indexes
/// directly into per-edge state arrays.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct EdgeId(pub u32);

impl EdgeId {
    /// Zero-based array slot for this edge.
    pub fn index(self) -> usize {
        self.0 as usize
    }
}

impl fmt::Display for EdgeId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u32> for EdgeId {
    fn from(v: u32) -> Self {
        Self(v)
    }
}

/// Integration step counter.
///
/// Step 0 is the initial state; each explicit Euler update increments it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct StepId(pub u64);

impl StepId {
    /// The step after this one.
    pub fn next(self) -> Self {
        Self(self.0 + 1)
    }
}

impl fmt::Display for StepId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl From<u64> for StepId {
    fn from(v: u64) -> Self {
        Self(v)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn cell_id_index_round_trip() {
        assert_eq!(CellId(1).index(), Some(0));
        assert_eq!(CellId::from_index(0), CellId(1));
        assert_eq!(CellId::from_index(41).index(), Some(41));
    }

    #[test]
    fn cell_id_zero_has_no_index() {
        assert_eq!(CellId(0).index(), None);
    }

    #[test]
    fn step_id_next_increments() {
        assert_eq!(StepId(0).next(), StepId(1));
        assert_eq!(StepId::default(), StepId(0));
    }
}
