//! Adaptive pacing: annealing law, step accounting, and interruptible waits.

pub mod pacing;
pub mod shutdown;
pub mod step_counter;

pub use pacing::{annealed_steps, annealed_unit, plan, PacingPlan};
pub use shutdown::{shutdown_channel, ShutdownListener, ShutdownSignal};
pub use step_counter::StepCounter;
