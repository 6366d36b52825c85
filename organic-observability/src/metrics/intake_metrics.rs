use serde::{Deserialize, Serialize};

/// Admission counters for organic samples.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct IntakeMetrics {
    pub accepted: u64,
    pub blacklisted: u64,
    pub failed_verification: u64,
    /// Older samples dropped because the queue was full.
    pub evicted: u64,
}

impl IntakeMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn rejected(&self) -> u64 {
        self.blacklisted + self.failed_verification
    }
}
