use organic_core::models::{IterationLog, PhaseTimings};
use serde::{Deserialize, Serialize};

use super::IntakeMetrics;

/// Running totals over all scheduler iterations.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct IterationMetrics {
    /// Iterations that completed and produced a log.
    pub completed: u64,
    pub organic: u64,
    pub synthetic: u64,
    /// Iterations skipped because no sample was available.
    pub empty: u64,
    pub failed: u64,
    /// Failures since the last completed iteration.
    pub consecutive_failures: u64,
    pub last_queue_size: usize,
    /// Sum of phase timings across completed iterations.
    totals: PhaseTimings,
    pub intake: IntakeMetrics,
}

impl IterationMetrics {
    pub fn new() -> Self {
        Self::default()
    }

    /// Record a completed iteration.
    pub fn record(&mut self, log: &IterationLog) {
        self.completed += 1;
        if log.is_organic_sample {
            self.organic += 1;
        } else {
            self.synthetic += 1;
        }
        self.consecutive_failures = 0;
        self.last_queue_size = log.organic_queue_size;
        self.totals.time_sample += log.timings.time_sample;
        self.totals.time_responses += log.timings.time_responses;
        self.totals.time_rewards += log.timings.time_rewards;
        self.totals.time_weights += log.timings.time_weights;
        self.totals.time_total += log.timings.time_total;
    }

    pub fn record_empty(&mut self, queue_size: usize) {
        self.empty += 1;
        self.last_queue_size = queue_size;
    }

    pub fn record_failure(&mut self) {
        self.failed += 1;
        self.consecutive_failures += 1;
    }

    /// Fraction of completed iterations that used an organic sample.
    pub fn organic_ratio(&self) -> f64 {
        if self.completed == 0 {
            return 0.0;
        }
        self.organic as f64 / self.completed as f64
    }

    /// Mean phase timings over completed iterations.
    pub fn avg_timings(&self) -> PhaseTimings {
        if self.completed == 0 {
            return PhaseTimings::default();
        }
        let n = self.completed as f64;
        PhaseTimings {
            time_sample: self.totals.time_sample / n,
            time_responses: self.totals.time_responses / n,
            time_rewards: self.totals.time_rewards / n,
            time_weights: self.totals.time_weights / n,
            time_total: self.totals.time_total / n,
        }
    }

    pub fn reset(&mut self) {
        *self = Self::default();
    }

    /// Serialize counters plus derived averages.
    pub fn snapshot(&self) -> serde_json::Value {
        serde_json::json!({
            "completed": self.completed,
            "organic": self.organic,
            "synthetic": self.synthetic,
            "empty": self.empty,
            "failed": self.failed,
            "consecutive_failures": self.consecutive_failures,
            "last_queue_size": self.last_queue_size,
            "organic_ratio": self.organic_ratio(),
            "avg_timings": self.avg_timings(),
            "intake": self.intake,
        })
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn log(is_organic: bool, total: f64, queue: usize) -> IterationLog {
        IterationLog::new(
            0,
            PhaseTimings {
                time_total: total,
                time_responses: total / 2.0,
                ..Default::default()
            },
            queue,
            is_organic,
        )
    }

    #[test]
    fn averages_over_completed_only() {
        let mut m = IterationMetrics::new();
        m.record(&log(true, 2.0, 5));
        m.record(&log(false, 4.0, 3));
        m.record_failure();
        m.record_empty(0);
        let avg = m.avg_timings();
        assert_eq!(avg.time_total, 3.0);
        assert_eq!(avg.time_responses, 1.5);
        assert_eq!(m.organic_ratio(), 0.5);
        assert_eq!(m.last_queue_size, 0);
    }

    #[test]
    fn success_resets_consecutive_failures() {
        let mut m = IterationMetrics::new();
        m.record_failure();
        m.record_failure();
        assert_eq!(m.consecutive_failures, 2);
        m.record(&log(true, 1.0, 0));
        assert_eq!(m.consecutive_failures, 0);
        assert_eq!(m.failed, 2);
    }

    #[test]
    fn empty_metrics_have_zero_ratio() {
        let m = IterationMetrics::new();
        assert_eq!(m.organic_ratio(), 0.0);
        assert_eq!(m.avg_timings(), PhaseTimings::default());
    }
}
