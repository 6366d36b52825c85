//! AdaptiveScheduler: owns the background scoring thread and its lifecycle.

use std::fmt;
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::thread::JoinHandle;

use organic_core::config::{SchedulerConfig, TriggerConfig, TriggerMode};
use organic_core::constants::SCHEDULER_THREAD_NAME;
use organic_core::errors::{ConfigError, OrganicError, OrganicResult};
use organic_core::traits::{
    IntakePolicy, OrganicQueue, PermissivePolicy, ScoringStrategy, SyntheticSource,
};
use organic_observability::IterationMetrics;
use organic_queue::BoundedSampleQueue;
use tracing::{debug, error};

use crate::intake::OrganicIntake;
use crate::run_loop::{BoxedSource, LoopCore};
use crate::scheduling::{shutdown_channel, ShutdownSignal};

/// A running loop: its stop signal and thread handle.
struct Worker {
    signal: ShutdownSignal,
    handle: JoinHandle<()>,
}

/// Blends organic and synthetic samples into a periodically triggered
/// scoring loop whose pacing anneals with organic backlog.
///
/// `start` spawns a dedicated thread running a single-threaded tokio
/// runtime; `stop` signals it and joins. Both are idempotent, and the
/// scheduler can be restarted after a stop. Dropping the scheduler stops it.
pub struct AdaptiveScheduler<S: ScoringStrategy> {
    core: Arc<LoopCore<S>>,
    intake: OrganicIntake<S::Sample>,
    worker: Mutex<Option<Worker>>,
}

impl<S: ScoringStrategy> AdaptiveScheduler<S> {
    /// Scheduler with the default bounded queue and no synthetic sources.
    pub fn new(strategy: S, config: SchedulerConfig) -> Result<Self, ConfigError> {
        Self::builder(strategy).config(config).build()
    }

    pub fn builder(strategy: S) -> SchedulerBuilder<S> {
        SchedulerBuilder::new(strategy)
    }

    /// Start the scoring loop in a background thread. No-op if running.
    pub fn start(&self) -> OrganicResult<()> {
        let mut worker = self.lock_worker();
        match worker.as_ref() {
            Some(running) if !running.handle.is_finished() => return Ok(()),
            Some(_) => {
                // The previous loop exited on its own.
                if let Some(dead) = worker.take() {
                    if dead.handle.join().is_err() {
                        error!("previous organic scoring thread panicked");
                    }
                }
            }
            None => {}
        }

        let runtime = tokio::runtime::Builder::new_current_thread()
            .enable_all()
            .build()
            .map_err(|e| OrganicError::Runtime(format!("failed to build runtime: {e}")))?;
        let (signal, listener) = shutdown_channel();
        let core = Arc::clone(&self.core);

        debug!("starting organic scoring in background thread");
        let handle = std::thread::Builder::new()
            .name(SCHEDULER_THREAD_NAME.to_string())
            .spawn(move || {
                let local = tokio::task::LocalSet::new();
                local.block_on(&runtime, core.run(listener));
            })
            .map_err(|e| OrganicError::Runtime(format!("failed to spawn thread: {e}")))?;

        *worker = Some(Worker { signal, handle });
        Ok(())
    }

    /// Stop the loop and wait for its thread to exit. No-op if not running.
    ///
    /// An iteration already in progress finishes first; waits are cut short.
    pub fn stop(&self) {
        let mut worker = self.lock_worker();
        if let Some(worker) = worker.take() {
            debug!("stopping organic scoring background thread");
            worker.signal.trigger();
            if worker.handle.join().is_err() {
                error!("organic scoring thread panicked");
            }
        }
    }

    pub fn is_running(&self) -> bool {
        self.lock_worker()
            .as_ref()
            .is_some_and(|worker| !worker.handle.is_finished())
    }

    /// Count one logical step. No-op unless the trigger is `steps`.
    pub fn increment_step(&self) {
        if self.core.mode() == TriggerMode::Steps {
            self.core.steps.increment();
        }
    }

    /// Overwrite the step counter. No-op unless the trigger is `steps`.
    pub fn set_step(&self, step: u64) {
        if self.core.mode() == TriggerMode::Steps {
            self.core.steps.set(step);
        }
    }

    pub fn step_count(&self) -> u64 {
        self.core.steps.get()
    }

    pub fn queue_size(&self) -> usize {
        self.core.queue.size()
    }

    /// Handle for the request layer to push organic samples.
    pub fn intake(&self) -> OrganicIntake<S::Sample> {
        self.intake.clone()
    }

    pub fn config(&self) -> &SchedulerConfig {
        &self.core.config
    }

    pub fn strategy(&self) -> &S {
        &self.core.strategy
    }

    pub fn metrics(&self) -> IterationMetrics {
        self.core.metrics().clone()
    }

    pub fn metrics_snapshot(&self) -> serde_json::Value {
        self.core.metrics().snapshot()
    }

    fn lock_worker(&self) -> MutexGuard<'_, Option<Worker>> {
        self.worker.lock().unwrap_or_else(PoisonError::into_inner)
    }
}

impl<S: ScoringStrategy> Drop for AdaptiveScheduler<S> {
    fn drop(&mut self) {
        self.stop();
    }
}

impl<S: ScoringStrategy> fmt::Debug for AdaptiveScheduler<S> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("AdaptiveScheduler")
            .field("trigger", &self.core.config.trigger)
            .field("running", &self.is_running())
            .field("queue_size", &self.queue_size())
            .field("sources", &self.core.sources.len())
            .finish()
    }
}

/// Builder for [`AdaptiveScheduler`].
pub struct SchedulerBuilder<S: ScoringStrategy> {
    strategy: S,
    config: SchedulerConfig,
    queue: Option<Arc<dyn OrganicQueue<S::Sample>>>,
    sources: Vec<BoxedSource<S::Sample>>,
    policy: Arc<dyn IntakePolicy<S::Sample>>,
}

impl<S: ScoringStrategy> SchedulerBuilder<S> {
    fn new(strategy: S) -> Self {
        Self {
            strategy,
            config: SchedulerConfig::default(),
            queue: None,
            sources: Vec::new(),
            policy: Arc::new(PermissivePolicy),
        }
    }

    pub fn config(mut self, config: SchedulerConfig) -> Self {
        self.config = config;
        self
    }

    pub fn trigger(mut self, trigger: TriggerConfig) -> Self {
        self.config.trigger = trigger;
        self
    }

    /// Use a caller-supplied queue instead of a [`BoundedSampleQueue`].
    /// `queue.capacity` in the config is then ignored.
    pub fn queue(mut self, queue: Arc<dyn OrganicQueue<S::Sample>>) -> Self {
        self.queue = Some(queue);
        self
    }

    pub fn synthetic_source<D>(mut self, source: D) -> Self
    where
        D: SyntheticSource<Sample = S::Sample> + 'static,
    {
        self.sources.push(Box::new(source));
        self
    }

    pub fn intake_policy<P>(mut self, policy: P) -> Self
    where
        P: IntakePolicy<S::Sample> + 'static,
    {
        self.policy = Arc::new(policy);
        self
    }

    /// Validate the config and assemble the scheduler. Does not start it.
    pub fn build(self) -> Result<AdaptiveScheduler<S>, ConfigError> {
        self.config.validate()?;
        let queue = match self.queue {
            Some(queue) => queue,
            None => Arc::new(BoundedSampleQueue::from_config(&self.config.queue)?),
        };
        let metrics = Arc::new(Mutex::new(IterationMetrics::new()));
        let intake = OrganicIntake::new(Arc::clone(&queue), self.policy, Arc::clone(&metrics));
        let core = LoopCore::new(self.strategy, queue, self.sources, self.config, metrics);
        Ok(AdaptiveScheduler {
            core: Arc::new(core),
            intake,
            worker: Mutex::new(None),
        })
    }
}
