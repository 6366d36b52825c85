//! Span definitions for scheduler operations.

/// Span wrapping one run-loop iteration.
#[macro_export]
macro_rules! iteration_span {
    ($iteration:expr, $mode:expr) => {
        tracing::info_span!("organic.iteration", iteration = $iteration, mode = %$mode)
    };
}

/// Span wrapping the background loop for its whole lifetime.
#[macro_export]
macro_rules! scheduler_span {
    ($mode:expr, $frequency:expr) => {
        tracing::info_span!("organic.scheduler", mode = %$mode, frequency = $frequency)
    };
}

/// Span wrapping one organic intake submission.
#[macro_export]
macro_rules! intake_span {
    ($queue_size:expr) => {
        tracing::debug_span!("organic.intake", queue_size = $queue_size)
    };
}

/// Span names as constants for programmatic use.
pub mod names {
    pub const ITERATION: &str = "organic.iteration";
    pub const SCHEDULER: &str = "organic.scheduler";
    pub const INTAKE: &str = "organic.intake";
}
