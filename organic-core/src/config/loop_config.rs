use std::time::Duration;

use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Timing knobs for the run loop's suspension points.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct LoopConfig {
    /// Poll interval while waiting for the step threshold.
    pub trigger_poll_ms: u64,
    /// Poll interval while waiting for enough steps to pay the pacing unit.
    pub step_poll_ms: u64,
    /// Sleep after a failed iteration before resuming.
    pub failure_backoff_ms: u64,
    /// Emit a zeroed log when neither organic nor synthetic samples exist.
    pub log_empty_iterations: bool,
}

impl LoopConfig {
    pub fn trigger_poll(&self) -> Duration {
        Duration::from_millis(self.trigger_poll_ms)
    }

    pub fn step_poll(&self) -> Duration {
        Duration::from_millis(self.step_poll_ms)
    }

    pub fn failure_backoff(&self) -> Duration {
        Duration::from_millis(self.failure_backoff_ms)
    }

    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.trigger_poll_ms == 0 {
            return Err(ConfigError::invalid(
                "runtime.trigger_poll_ms",
                "must be greater than 0",
            ));
        }
        if self.step_poll_ms == 0 {
            return Err(ConfigError::invalid(
                "runtime.step_poll_ms",
                "must be greater than 0",
            ));
        }
        if self.failure_backoff_ms == 0 {
            return Err(ConfigError::invalid(
                "runtime.failure_backoff_ms",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for LoopConfig {
    fn default() -> Self {
        Self {
            trigger_poll_ms: defaults::DEFAULT_TRIGGER_POLL_MS,
            step_poll_ms: defaults::DEFAULT_STEP_POLL_MS,
            failure_backoff_ms: defaults::DEFAULT_FAILURE_BACKOFF_MS,
            log_empty_iterations: defaults::DEFAULT_LOG_EMPTY_ITERATIONS,
        }
    }
}
