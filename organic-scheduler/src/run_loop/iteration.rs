//! One scoring iteration: sample, fan out, score, apply, log.

use std::time::{Duration, Instant};

use organic_core::errors::OrganicResult;
use organic_core::models::{IterationLog, PhaseTimings, SampleOrigin};
use organic_core::traits::{IterationContext, ScoringStrategy};
use organic_observability::iteration_span;
use rand::Rng;
use tracing::{debug, info, Instrument};

use super::LoopCore;

/// Result of a single iteration that did not fail.
#[derive(Debug, Clone, PartialEq)]
pub enum IterationOutcome {
    /// A sample was scored and its log emitted.
    Completed { log: IterationLog, elapsed: Duration },
    /// No organic sample and no synthetic source. The log is present only
    /// when empty iterations are configured to be logged.
    Skipped { log: Option<IterationLog> },
}

impl IterationOutcome {
    /// Work time credited against the pacing unit.
    pub fn elapsed(&self) -> Duration {
        match self {
            Self::Completed { elapsed, .. } => *elapsed,
            Self::Skipped { .. } => Duration::ZERO,
        }
    }

    pub fn log(&self) -> Option<&IterationLog> {
        match self {
            Self::Completed { log, .. } => Some(log),
            Self::Skipped { log } => log.as_ref(),
        }
    }
}

impl<S: ScoringStrategy> LoopCore<S> {
    /// Run one iteration. Any collaborator or source error is returned to
    /// the loop, which logs it and backs off.
    pub(crate) async fn run_iteration(&self) -> OrganicResult<IterationOutcome> {
        let iteration = self.next_iteration();
        let span = iteration_span!(iteration, self.mode());
        self.score_one(iteration).instrument(span).await
    }

    async fn score_one(&self, iteration: u64) -> OrganicResult<IterationOutcome> {
        let timer_total = Instant::now();

        let timer_sample = Instant::now();
        let Some((sample, origin)) = self.pick_sample()? else {
            return Ok(self.skip(iteration));
        };
        let time_sample = timer_sample.elapsed();

        // Reference and miner query run concurrently; both must finish.
        let timer_responses = Instant::now();
        let (reference, responses) = tokio::join!(
            self.strategy.generate_reference(&sample),
            self.strategy.query_miners(&sample),
        );
        let reference = reference?;
        let responses = responses?;
        let time_responses = timer_responses.elapsed();

        let timer_rewards = Instant::now();
        let rewards = self
            .strategy
            .generate_rewards(&sample, &responses, reference.as_ref())
            .await?;
        let time_rewards = timer_rewards.elapsed();

        let timer_weights = Instant::now();
        self.strategy.set_weights(&rewards).await?;
        let time_weights = timer_weights.elapsed();

        let elapsed = timer_total.elapsed();
        let log = IterationLog::new(
            iteration,
            PhaseTimings {
                time_sample: time_sample.as_secs_f64(),
                time_responses: time_responses.as_secs_f64(),
                time_rewards: time_rewards.as_secs_f64(),
                time_weights: time_weights.as_secs_f64(),
                time_total: elapsed.as_secs_f64(),
            },
            self.queue.size(),
            origin.is_organic(),
        );
        let log = self
            .strategy
            .log_results(
                log,
                IterationContext {
                    sample: &sample,
                    reference: reference.as_ref(),
                    responses: &responses,
                    rewards: &rewards,
                },
            )
            .await?;
        self.emit(&log, &origin);

        Ok(IterationOutcome::Completed { log, elapsed })
    }

    /// Organic first; otherwise a uniformly chosen synthetic source.
    fn pick_sample(&self) -> OrganicResult<Option<(S::Sample, SampleOrigin)>> {
        if let Some(sample) = self.queue.sample() {
            return Ok(Some((sample, SampleOrigin::Organic)));
        }
        if self.sources.is_empty() {
            return Ok(None);
        }
        let index = rand::thread_rng().gen_range(0..self.sources.len());
        let source = &self.sources[index];
        let sample = source.sample()?;
        Ok(Some((
            sample,
            SampleOrigin::Synthetic {
                index,
                source: source.name().to_string(),
            },
        )))
    }

    fn skip(&self, iteration: u64) -> IterationOutcome {
        let queue_size = self.queue.size();
        self.metrics().record_empty(queue_size);
        debug!("no organic sample and no synthetic source, skipping iteration");

        let log = self.config.runtime.log_empty_iterations.then(|| {
            let log = IterationLog::empty(iteration, queue_size);
            info!(
                iteration,
                organic_queue_size = queue_size,
                "organic scoring iteration skipped"
            );
            log
        });
        IterationOutcome::Skipped { log }
    }

    fn emit(&self, log: &IterationLog, origin: &SampleOrigin) {
        let source = match origin {
            SampleOrigin::Organic => "organic",
            SampleOrigin::Synthetic { source, .. } => source.as_str(),
        };
        info!(
            iteration = log.iteration,
            source,
            time_sample = log.timings.time_sample,
            time_responses = log.timings.time_responses,
            time_rewards = log.timings.time_rewards,
            time_weights = log.timings.time_weights,
            time_total = log.timings.time_total,
            organic_queue_size = log.organic_queue_size,
            is_organic_sample = log.is_organic_sample,
            "organic scoring iteration complete"
        );
        self.metrics().record(log);
    }
}
