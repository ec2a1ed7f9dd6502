//! Double-buffered ping-pong state.
//!
//! [`PingPongState`] holds two [`StateBuffer`]s that alternate between
//! "published" (readable, the current step) and "staging" (writable, the
//! next step). Nothing is reallocated or copied between steps.
//!
//! The lifecycle per step is:
//! 1. `begin_step()` borrows published read-only and staging mutably
//! 2. the integrator fills every staging slot from the published values
//! 3. `publish()` swaps roles, making the staged values current
//!
//! ```text
//! buffer_a: StateBuffer  ←─── published (even steps) / staging (odd)
//! buffer_b: StateBuffer  ←─── staging (even steps) / published (odd)
//! ```

use pinflux_core::{StateView, StepId};

use crate::buffer::{StateBuffer, Staging};

/// Two same-shaped state buffers swapped every step.
#[derive(Clone, Debug)]
pub struct PingPongState {
    buffer_a: StateBuffer,
    buffer_b: StateBuffer,
    /// Which buffer is currently staging (false = B staging, true = A staging).
    a_is_staging: bool,
    /// Whether `begin_step()` was called without a matching `publish()`.
    step_in_progress: bool,
}

impl PingPongState {
    /// Wrap `initial` as the published state at its current step.
    pub fn new(initial: StateBuffer) -> Self {
        Self {
            buffer_b: initial.clone(),
            buffer_a: initial,
            a_is_staging: false,
            step_in_progress: false,
        }
    }

    /// The current (published) state.
    pub fn published(&self) -> &StateBuffer {
        if self.a_is_staging {
            &self.buffer_b
        } else {
            &self.buffer_a
        }
    }

    /// Mutable access to the published state, for setup-time edits only.
    pub(crate) fn published_mut(&mut self) -> &mut StateBuffer {
        if self.a_is_staging {
            &mut self.buffer_b
        } else {
            &mut self.buffer_a
        }
    }

    /// Borrow the published state and the staging buffer for one step.
    ///
    /// The staging buffer is stamped with the next step id. Its contents
    /// are stale until overwritten.
    pub fn begin_step(&mut self) -> (&StateBuffer, Staging<'_>) {
        self.step_in_progress = true;
        let (published, staging) = if self.a_is_staging {
            (&self.buffer_b, &mut self.buffer_a)
        } else {
            (&self.buffer_a, &mut self.buffer_b)
        };
        staging.set_step(published.step().next());
        (published, staging.staging())
    }

    /// Make the staging buffer current.
    ///
    /// A no-op if no step is in progress, so a double publish cannot
    /// roll the state back to the previous generation.
    pub fn publish(&mut self) {
        if !self.step_in_progress {
            return;
        }
        self.a_is_staging = !self.a_is_staging;
        self.step_in_progress = false;
    }

    /// Step id of the published state.
    pub fn current_step(&self) -> StepId {
        self.published().step()
    }
}
