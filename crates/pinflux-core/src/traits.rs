//! Read-only access to one generation of dynamic state.

use crate::id::StepId;

/// Read-only access to the dynamic state at one step.
///
/// Decouples the rate functions, hashing, and renderers from the concrete
/// storage: both the live double buffer and retained snapshots implement
/// it. All slices are indexed by zero-based cell slot or edge slot.
pub trait StateView {
    /// The step this state belongs to.
    fn step(&self) -> StepId;

    /// Auxin concentration per cell.
    fn auxin(&self) -> &[f64];

    /// Cytoplasmic PINS concentration per cell.
    fn pins(&self) -> &[f64];

    /// Membrane PINS density per directed edge.
    fn membrane(&self) -> &[f64];
}
