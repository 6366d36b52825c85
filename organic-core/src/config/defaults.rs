//! Compiled defaults for every config section.

// Trigger
pub const DEFAULT_TRIGGER_FREQUENCY: f64 = 10.0;
pub const DEFAULT_TRIGGER_MIN_FREQUENCY: f64 = 2.0;
pub const DEFAULT_TRIGGER_SCALING_FACTOR: f64 = 5.0;

// Queue
pub const DEFAULT_QUEUE_CAPACITY: usize = 10_000;

// Loop
pub const DEFAULT_TRIGGER_POLL_MS: u64 = 100;
pub const DEFAULT_STEP_POLL_MS: u64 = 1_000;
pub const DEFAULT_FAILURE_BACKOFF_MS: u64 = 1_000;
pub const DEFAULT_LOG_EMPTY_ITERATIONS: bool = false;
