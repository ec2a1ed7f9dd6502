//! Fixed-size dynamic-state buffers.

use pinflux_core::{StateView, StepId};

/// Dynamic state for one generation: auxin and PINS per cell, PINS density
/// per directed edge.
///
/// Sized once at store initialization and never resized.
#[derive(Clone, Debug, PartialEq)]
pub struct StateBuffer {
    step: StepId,
    auxin: Vec<f64>,
    pins: Vec<f64>,
    membrane: Vec<f64>,
}

impl StateBuffer {
    /// A buffer for `cells` cells and `edges` edges, filled uniformly.
    pub fn uniform(cells: usize, edges: usize, auxin: f64, pins: f64, membrane: f64) -> Self {
        Self {
            step: StepId(0),
            auxin: vec![auxin; cells],
            pins: vec![pins; cells],
            membrane: vec![membrane; edges],
        }
    }

    /// Number of cells covered.
    pub fn cell_count(&self) -> usize {
        self.auxin.len()
    }

    /// Number of edges covered.
    pub fn edge_count(&self) -> usize {
        self.membrane.len()
    }

    pub(crate) fn set_step(&mut self, step: StepId) {
        self.step = step;
    }

    pub(crate) fn auxin_mut(&mut self) -> &mut [f64] {
        &mut self.auxin
    }

    pub(crate) fn pins_mut(&mut self) -> &mut [f64] {
        &mut self.pins
    }

    pub(crate) fn membrane_mut(&mut self) -> &mut [f64] {
        &mut self.membrane
    }

    /// Split into disjoint writable views.
    pub(crate) fn staging(&mut self) -> Staging<'_> {
        Staging {
            auxin: &mut self.auxin,
            pins: &mut self.pins,
            membrane: &mut self.membrane,
        }
    }
}

impl StateView for StateBuffer {
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

/// Writable views into the staging buffer during one step.
///
/// Every slot must be overwritten: the buffer still holds the state from
/// two steps ago.
#[derive(Debug)]
pub struct Staging<'a> {
    /// Next auxin per cell.
    pub auxin: &'a mut [f64],
    /// Next cytoplasmic PINS per cell.
    pub pins: &'a mut [f64],
    /// Next membrane PINS per edge.
    pub membrane: &'a mut [f64],
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn uniform_sizes_and_values() {
        let b = StateBuffer::uniform(3, 4, 0.0, 1.5, 0.0);
        assert_eq!(b.cell_count(), 3);
        assert_eq!(b.edge_count(), 4);
        assert_eq!(b.pins(), &[1.5, 1.5, 1.5]);
        assert_eq!(b.step(), StepId(0));
    }

    #[test]
    fn staging_writes_land_in_buffer() {
        let mut b = StateBuffer::uniform(2, 2, 0.0, 0.0, 0.0);
        {
            let s = b.staging();
            s.auxin[1] = 4.0;
            s.membrane[0] = 0.25;
        }
        assert_eq!(b.auxin(), &[0.0, 4.0]);
        assert_eq!(b.membrane(), &[0.25, 0.0]);
    }
}
