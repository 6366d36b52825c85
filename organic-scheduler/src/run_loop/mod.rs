//! The scoring loop: trigger gate, sampling, concurrent sub-tasks, scoring,
//! logging, and pacing.

mod iteration;

use std::any::Any;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::{Arc, Mutex, MutexGuard, PoisonError};
use std::time::Duration;

use organic_core::config::{SchedulerConfig, TriggerMode};
use organic_core::constants::VERSION;
use organic_core::errors::{OrganicError, OrganicResult};
use organic_core::traits::{OrganicQueue, ScoringStrategy, SyntheticSource};
use organic_observability::{scheduler_span, IterationMetrics};
use tracing::{error, info, Instrument};

use crate::scheduling::{self, PacingPlan, ShutdownListener, StepCounter};

pub use iteration::IterationOutcome;

pub(crate) type BoxedSource<T> = Box<dyn SyntheticSource<Sample = T>>;

/// State shared by the scheduler handle, the intake handle, and the loop.
pub(crate) struct LoopCore<S: ScoringStrategy> {
    pub(crate) strategy: S,
    pub(crate) queue: Arc<dyn OrganicQueue<S::Sample>>,
    pub(crate) sources: Vec<BoxedSource<S::Sample>>,
    pub(crate) config: SchedulerConfig,
    pub(crate) steps: StepCounter,
    pub(crate) metrics: Arc<Mutex<IterationMetrics>>,
    iterations: AtomicU64,
}

impl<S: ScoringStrategy> LoopCore<S> {
    pub(crate) fn new(
        strategy: S,
        queue: Arc<dyn OrganicQueue<S::Sample>>,
        sources: Vec<BoxedSource<S::Sample>>,
        config: SchedulerConfig,
        metrics: Arc<Mutex<IterationMetrics>>,
    ) -> Self {
        Self {
            strategy,
            queue,
            sources,
            config,
            steps: StepCounter::new(),
            metrics,
            iterations: AtomicU64::new(0),
        }
    }

    pub(crate) fn mode(&self) -> TriggerMode {
        self.config.trigger.mode
    }

    fn next_iteration(&self) -> u64 {
        self.iterations.fetch_add(1, Ordering::Relaxed) + 1
    }

    pub(crate) fn metrics(&self) -> MutexGuard<'_, IterationMetrics> {
        lock_metrics(&self.metrics)
    }

    /// Drive iterations until `shutdown` fires.
    ///
    /// A stop request is honored between iterations and inside every wait;
    /// an iteration that has started always runs to completion. Must be
    /// driven inside a [`tokio::task::LocalSet`].
    pub(crate) async fn run(self: Arc<Self>, shutdown: ShutdownListener) {
        let trigger = &self.config.trigger;
        let span = scheduler_span!(trigger.mode, trigger.frequency);
        async {
            info!(
                version = VERSION,
                scaling_factor = trigger.scaling_factor,
                min_frequency = trigger.min_frequency,
                sources = self.sources.len(),
                "organic scoring loop started"
            );
            while !shutdown.is_triggered() {
                if !self.wait_for_trigger(&shutdown).await {
                    break;
                }
                let keep_going = match self.run_guarded().await {
                    Ok(outcome) => self.pace(outcome.elapsed(), &shutdown).await,
                    Err(e) => {
                        self.metrics().record_failure();
                        error!(
                            error = %e,
                            recoverable = e.is_recoverable(),
                            "organic scoring iteration failed"
                        );
                        shutdown.sleep(self.config.runtime.failure_backoff()).await
                    }
                };
                if !keep_going {
                    break;
                }
            }
            info!("organic scoring loop stopped");
        }
        .instrument(span)
        .await
    }

    /// Run one iteration as a local task so a panicking collaborator is
    /// reported as a failed iteration instead of unwinding the loop.
    async fn run_guarded(self: &Arc<Self>) -> OrganicResult<IterationOutcome> {
        let core = Arc::clone(self);
        match tokio::task::spawn_local(async move { core.run_iteration().await }).await {
            Ok(result) => result,
            Err(e) if e.is_panic() => Err(OrganicError::Panicked(panic_message(e.into_panic()))),
            Err(e) => Err(OrganicError::Runtime(e.to_string())),
        }
    }

    /// Steps mode blocks until the counter reaches `frequency`.
    /// Seconds mode has no gate; pacing already happened.
    async fn wait_for_trigger(&self, shutdown: &ShutdownListener) -> bool {
        match self.mode() {
            TriggerMode::Seconds => !shutdown.is_triggered(),
            TriggerMode::Steps => {
                self.steps
                    .wait_for_threshold(
                        self.config.trigger.frequency,
                        self.config.runtime.trigger_poll(),
                        shutdown,
                    )
                    .await
            }
        }
    }

    /// Apply the annealed pacing unit for the current backlog.
    pub(crate) async fn pace(&self, elapsed: Duration, shutdown: &ShutdownListener) -> bool {
        let backlog = self.queue.size();
        match scheduling::plan(&self.config.trigger, backlog, elapsed) {
            PacingPlan::Sleep(delay) => {
                tracing::debug!(backlog, delay_secs = delay.as_secs_f64(), "pacing sleep");
                shutdown.sleep(delay).await
            }
            PacingPlan::ConsumeSteps(unit) => {
                tracing::debug!(backlog, unit, steps = self.steps.get(), "pacing steps");
                self.steps
                    .consume(unit, self.config.runtime.step_poll(), shutdown)
                    .await
            }
        }
    }
}

fn panic_message(payload: Box<dyn Any + Send>) -> String {
    if let Some(message) = payload.downcast_ref::<&str>() {
        (*message).to_string()
    } else if let Some(message) = payload.downcast_ref::<String>() {
        message.clone()
    } else {
        "non-string panic payload".to_string()
    }
}

pub(crate) fn lock_metrics(metrics: &Mutex<IterationMetrics>) -> MutexGuard<'_, IterationMetrics> {
    metrics.lock().unwrap_or_else(PoisonError::into_inner)
}
