//! Per-iteration timing and metadata record.

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::{Map, Value};

/// Wall-clock seconds spent in each phase of one iteration.
#[derive(Debug, Clone, Copy, Default, PartialEq, Serialize, Deserialize)]
pub struct PhaseTimings {
    /// Picking a sample from the organic queue or a synthetic source.
    pub time_sample: f64,
    /// Concurrent reference generation and miner query.
    pub time_responses: f64,
    /// Reward generation.
    pub time_rewards: f64,
    /// Setting weights.
    pub time_weights: f64,
    /// The whole iteration.
    pub time_total: f64,
}

/// Log produced once per loop iteration and handed to the logging hook.
///
/// The hook may add keys to `extra`; everything else is filled in by the
/// scheduler.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct IterationLog {
    pub iteration: u64,
    pub recorded_at: DateTime<Utc>,
    #[serde(flatten)]
    pub timings: PhaseTimings,
    pub organic_queue_size: usize,
    pub is_organic_sample: bool,
    #[serde(default, skip_serializing_if = "Map::is_empty")]
    pub extra: Map<String, Value>,
}

impl IterationLog {
    pub fn new(
        iteration: u64,
        timings: PhaseTimings,
        organic_queue_size: usize,
        is_organic_sample: bool,
    ) -> Self {
        Self {
            iteration,
            recorded_at: Utc::now(),
            timings,
            organic_queue_size,
            is_organic_sample,
            extra: Map::new(),
        }
    }

    /// Zeroed log for an iteration that had nothing to score.
    pub fn empty(iteration: u64, organic_queue_size: usize) -> Self {
        Self::new(iteration, PhaseTimings::default(), organic_queue_size, false)
    }

    /// Attach an extra key, replacing any previous value.
    pub fn insert(&mut self, key: impl Into<String>, value: impl Into<Value>) {
        self.extra.insert(key.into(), value.into());
    }

    /// Flat JSON view with the same keys the logging collaborator sees.
    pub fn to_json(&self) -> Value {
        serde_json::to_value(self).unwrap_or(Value::Null)
    }
}
