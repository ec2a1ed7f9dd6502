//! Non-finite value detection.
//!
//! Explicit Euler with large `dt` or stiff parameters can diverge. The
//! integrator never clamps or corrects; these scans only report where
//! the first NaN or infinity appeared.

use std::fmt;

use pinflux_core::{StateView, StepId};

/// Which state array a value belongs to.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Quantity {
    /// Auxin per cell.
    Auxin,
    /// Cytoplasmic PINS per cell.
    Pins,
    /// Membrane PINS per directed edge.
    Membrane,
}

impl fmt::Display for Quantity {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Auxin => write!(f, "auxin"),
            Self::Pins => write!(f, "pins"),
            Self::Membrane => write!(f, "membrane pins"),
        }
    }
}

/// Location of a NaN or infinite value.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub struct NonFinite {
    /// Step at which the value was found.
    pub step: StepId,
    /// Which array holds it.
    pub quantity: Quantity,
    /// Zero-based cell or edge slot.
    pub index: usize,
}

impl fmt::Display for NonFinite {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "non-finite {} at slot {} (step {})",
            self.quantity, self.index, self.step
        )
    }
}

fn arrays<S: StateView + ?Sized>(state: &S) -> [(Quantity, &[f64]); 3] {
    [
        (Quantity::Auxin, state.auxin()),
        (Quantity::Pins, state.pins()),
        (Quantity::Membrane, state.membrane()),
    ]
}

/// The first non-finite value, scanning auxin, then PINS, then membranes.
pub fn first_non_finite<S: StateView + ?Sized>(state: &S) -> Option<NonFinite> {
    arrays(state).into_iter().find_map(|(quantity, values)| {
        values
            .iter()
            .position(|v| !v.is_finite())
            .map(|index| NonFinite {
                step: state.step(),
                quantity,
                index,
            })
    })
}

/// Number of non-finite values across all arrays.
pub fn count_non_finite<S: StateView + ?Sized>(state: &S) -> usize {
    arrays(state)
        .iter()
        .map(|(_, values)| values.iter().filter(|v| !v.is_finite()).count())
        .sum()
}

#[cfg(test)]
mod tests {
    use super::*;
    use pinflux_arena::StateBuffer;

    struct Fixed {
        auxin: Vec<f64>,
        pins: Vec<f64>,
        membrane: Vec<f64>,
    }

    impl StateView for Fixed {
        fn step(&self) -> StepId {
            StepId(7)
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

    #[test]
    fn finite_state_is_clean() {
        let b = StateBuffer::uniform(4, 6, 1.0, 2.0, 0.5);
        assert_eq!(first_non_finite(&b), None);
        assert_eq!(count_non_finite(&b), 0);
    }

    #[test]
    fn reports_first_in_scan_order() {
        let s = Fixed {
            auxin: vec![0.0, 1.0],
            pins: vec![0.0, f64::INFINITY],
            membrane: vec![f64::NAN, f64::NAN],
        };
        let found = first_non_finite(&s).unwrap();
        assert_eq!(
            found,
            NonFinite {
                step: StepId(7),
                quantity: Quantity::Pins,
                index: 1
            }
        );
        assert_eq!(found.to_string(), "non-finite pins at slot 1 (step 7)");
        assert_eq!(count_non_finite(&s), 3);
    }
}
