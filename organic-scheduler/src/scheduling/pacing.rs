//! Annealing pacing law.
//!
//! The pacing unit shrinks linearly with organic backlog so a growing queue
//! is drained faster, and is floored at `min_frequency`:
//!
//! ```text
//! unit = max(frequency - backlog / scaling_factor, min_frequency)
//! ```

use std::time::Duration;

use organic_core::config::{TriggerConfig, TriggerMode};

/// What the loop must do before the next iteration.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum PacingPlan {
    /// Seconds mode: sleep this long.
    Sleep(Duration),
    /// Steps mode: consume this many steps, waiting until they exist.
    ConsumeSteps(u64),
}

/// Annealed pacing unit for the given backlog. Non-increasing in `backlog`.
pub fn annealed_unit(trigger: &TriggerConfig, backlog: usize) -> f64 {
    let discounted = trigger.frequency - backlog as f64 / trigger.scaling_factor;
    discounted.max(trigger.min_frequency)
}

/// Annealed unit truncated to whole steps. Never zero.
pub fn annealed_steps(trigger: &TriggerConfig, backlog: usize) -> u64 {
    (annealed_unit(trigger, backlog).trunc() as u64).max(1)
}

/// Pacing plan after an iteration that took `elapsed`.
///
/// In seconds mode the elapsed work time is credited against the unit.
pub fn plan(trigger: &TriggerConfig, backlog: usize, elapsed: Duration) -> PacingPlan {
    match trigger.mode {
        TriggerMode::Seconds => {
            let remaining = annealed_unit(trigger, backlog) - elapsed.as_secs_f64();
            // Finite units beyond `Duration`'s range saturate.
            let delay = Duration::try_from_secs_f64(remaining.max(0.0)).unwrap_or(Duration::MAX);
            PacingPlan::Sleep(delay)
        }
        TriggerMode::Steps => PacingPlan::ConsumeSteps(annealed_steps(trigger, backlog)),
    }
}
