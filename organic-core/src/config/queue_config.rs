use serde::{Deserialize, Serialize};

use super::defaults;
use crate::errors::ConfigError;

/// Organic queue configuration.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct QueueConfig {
    /// Maximum number of organic samples held before the oldest is evicted.
    pub capacity: usize,
}

impl QueueConfig {
    pub fn validate(&self) -> Result<(), ConfigError> {
        if self.capacity == 0 {
            return Err(ConfigError::invalid(
                "queue.capacity",
                "must be greater than 0",
            ));
        }
        Ok(())
    }
}

impl Default for QueueConfig {
    fn default() -> Self {
        Self {
            capacity: defaults::DEFAULT_QUEUE_CAPACITY,
        }
    }
}
