//! The retained trajectory.

use std::ops::Index;

use pinflux_arena::{Frame, Layout, Snapshot};
use pinflux_core::{StateView, StepId};

/// Ordered, append-only sequence of retained snapshots.
///
/// Always starts with the initial state (step 0). Step numbers are
/// strictly increasing. Only the integrator appends; readers get shared
/// access to immutable [`Snapshot`]s.
#[derive(Clone, Debug)]
pub struct Trajectory {
    layout: Layout,
    snapshots: Vec<Snapshot>,
}

impl Trajectory {
    pub(crate) fn new(layout: Layout, initial: Snapshot) -> Self {
        Self {
            layout,
            snapshots: vec![initial],
        }
    }

    pub(crate) fn push(&mut self, snapshot: Snapshot) {
        debug_assert!(
            self.snapshots
                .last()
                .is_none_or(|last| last.step() < snapshot.step()),
            "trajectory steps must be strictly increasing"
        );
        self.snapshots.push(snapshot);
    }

    /// Number of retained snapshots.
    pub fn len(&self) -> usize {
        self.snapshots.len()
    }

    /// Always false once constructed; present for API symmetry.
    pub fn is_empty(&self) -> bool {
        self.snapshots.is_empty()
    }

    /// The `index`-th retained snapshot.
    pub fn get(&self, index: usize) -> Option<&Snapshot> {
        self.snapshots.get(index)
    }

    /// The initial snapshot.
    pub fn first(&self) -> Option<&Snapshot> {
        self.snapshots.first()
    }

    /// The latest retained snapshot.
    pub fn last(&self) -> Option<&Snapshot> {
        self.snapshots.last()
    }

    /// All retained snapshots in order.
    pub fn snapshots(&self) -> &[Snapshot] {
        &self.snapshots
    }

    /// `(step, snapshot)` pairs in order.
    pub fn iter(&self) -> impl Iterator<Item = (StepId, &Snapshot)> + '_ {
        self.snapshots.iter().map(|s| (s.step(), s))
    }

    /// Retained step numbers in order.
    pub fn steps(&self) -> impl Iterator<Item = StepId> + '_ {
        self.snapshots.iter().map(|s| s.step())
    }

    /// The snapshot retained at exactly `step`, if any.
    pub fn at_step(&self, step: StepId) -> Option<&Snapshot> {
        self.snapshots
            .binary_search_by_key(&step, |s| s.step())
            .ok()
            .map(|i| &self.snapshots[i])
    }

    /// Static layout shared by every snapshot.
    pub fn layout(&self) -> &Layout {
        &self.layout
    }

    /// The `index`-th snapshot paired with the layout, for rendering.
    pub fn frame(&self, index: usize) -> Option<Frame<'_>> {
        self.snapshots
            .get(index)
            .map(|s| Frame::new(&self.layout, s))
    }
}

impl Index<usize> for Trajectory {
    type Output = Snapshot;

    fn index(&self, index: usize) -> &Snapshot {
        &self.snapshots[index]
    }
}

impl<'a> IntoIterator for &'a Trajectory {
    type Item = &'a Snapshot;
    type IntoIter = std::slice::Iter<'a, Snapshot>;

    fn into_iter(self) -> Self::IntoIter {
        self.snapshots.iter()
    }
}
