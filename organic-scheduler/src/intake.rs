//! Producer-side handle for pushing organic samples into the scheduler's queue.

use std::fmt;
use std::sync::{Arc, Mutex};

use organic_core::errors::IntakeError;
use organic_core::traits::{IntakePolicy, OrganicQueue};
use organic_observability::{intake_span, IterationMetrics};
use tracing::{debug, warn};

use crate::run_loop::lock_metrics;

/// Cloneable handle given to the request layer.
///
/// `submit` applies the blacklist and verification hooks before queueing;
/// `add_organic_sample` queues unconditionally.
pub struct OrganicIntake<T> {
    queue: Arc<dyn OrganicQueue<T>>,
    policy: Arc<dyn IntakePolicy<T>>,
    metrics: Arc<Mutex<IterationMetrics>>,
}

impl<T> OrganicIntake<T> {
    pub(crate) fn new(
        queue: Arc<dyn OrganicQueue<T>>,
        policy: Arc<dyn IntakePolicy<T>>,
        metrics: Arc<Mutex<IterationMetrics>>,
    ) -> Self {
        Self {
            queue,
            policy,
            metrics,
        }
    }

    /// Queue a sample without running the policy hooks.
    /// Returns the oldest sample if it was evicted to make room.
    pub fn add_organic_sample(&self, sample: T) -> Option<T> {
        let evicted = self.queue.add(sample);
        let mut metrics = lock_metrics(&self.metrics);
        metrics.intake.accepted += 1;
        if evicted.is_some() {
            metrics.intake.evicted += 1;
        }
        evicted
    }

    /// Run blacklist then verification, and queue the sample if both pass.
    pub fn submit(&self, sample: T) -> Result<Option<T>, IntakeError> {
        let span = intake_span!(self.queue.size());
        let _guard = span.enter();

        if let Some(reason) = self.policy.blacklist(&sample) {
            lock_metrics(&self.metrics).intake.blacklisted += 1;
            debug!(%reason, "organic sample blacklisted");
            return Err(IntakeError::Blacklisted { reason });
        }
        if !self.policy.verify(&sample) {
            lock_metrics(&self.metrics).intake.failed_verification += 1;
            warn!("organic sample failed verification");
            return Err(IntakeError::VerificationFailed);
        }
        Ok(self.add_organic_sample(sample))
    }

    /// Priority hint for the request layer.
    pub fn priority(&self, sample: &T) -> f64 {
        self.policy.priority(sample)
    }

    pub fn queue_size(&self) -> usize {
        self.queue.size()
    }
}

impl<T> Clone for OrganicIntake<T> {
    fn clone(&self) -> Self {
        Self {
            queue: Arc::clone(&self.queue),
            policy: Arc::clone(&self.policy),
            metrics: Arc::clone(&self.metrics),
        }
    }
}

impl<T> fmt::Debug for OrganicIntake<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("OrganicIntake")
            .field("queue_size", &self.queue.size())
            .finish()
    }
}
