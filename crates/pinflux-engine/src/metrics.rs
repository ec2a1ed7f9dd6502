//! Per-step and per-run metrics for the integrator.
//!
//! [`StepMetrics`] describes the most recent step; [`RunMetrics`]
//! accumulates over every step the integrator has executed.

/// Timing and bookkeeping for a single step.
///
/// Durations are in microseconds.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct StepMetrics {
    /// Step number this record describes.
    pub step: u64,
    /// Wall-clock time for computing and committing the step.
    pub total_us: u64,
    /// Whether the step was appended to the trajectory.
    pub retained: bool,
    /// Non-finite values present after the step. Zero when the scan is
    /// disabled.
    pub non_finite: usize,
}

/// Totals across a run.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct RunMetrics {
    /// Integration steps executed.
    pub steps_executed: u64,
    /// Snapshots in the trajectory, the initial one included.
    pub snapshots_retained: u64,
    /// Steps after which at least one non-finite value was present.
    pub non_finite_steps: u64,
    /// Summed step wall-clock time in microseconds.
    pub total_us: u64,
}

impl RunMetrics {
    /// Fold one step's metrics into the totals.
    pub fn record(&mut self, step: &StepMetrics) {
        self.steps_executed += 1;
        self.total_us = self.total_us.saturating_add(step.total_us);
        if step.retained {
            self.snapshots_retained += 1;
        }
        if step.non_finite > 0 {
            self.non_finite_steps += 1;
        }
    }

    /// Mean step time in microseconds, or zero before the first step.
    pub fn mean_step_us(&self) -> f64 {
        if self.steps_executed == 0 {
            0.0
        } else {
            self.total_us as f64 / self.steps_executed as f64
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn default_metrics_are_zero() {
        let m = RunMetrics::default();
        assert_eq!(m.steps_executed, 0);
        assert_eq!(m.snapshots_retained, 0);
        assert_eq!(m.mean_step_us(), 0.0);
        assert!(!StepMetrics::default().retained);
    }

    #[test]
    fn record_accumulates() {
        let mut run = RunMetrics::default();
        run.record(&StepMetrics {
            step: 1,
            total_us: 10,
            retained: false,
            non_finite: 0,
        });
        run.record(&StepMetrics {
            step: 2,
            total_us: 30,
            retained: true,
            non_finite: 2,
        });
        assert_eq!(run.steps_executed, 2);
        assert_eq!(run.snapshots_retained, 1);
        assert_eq!(run.non_finite_steps, 1);
        assert_eq!(run.mean_step_us(), 20.0);
    }
}
