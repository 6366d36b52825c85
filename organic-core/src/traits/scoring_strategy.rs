//! The pluggable scoring strategy driven by the scheduler.

use std::future::Future;

use crate::errors::OrganicResult;
use crate::models::IterationLog;

/// Everything produced during one iteration, handed to the logging hook.
pub struct IterationContext<'a, S: ScoringStrategy + ?Sized> {
    pub sample: &'a S::Sample,
    pub reference: Option<&'a S::Reference>,
    pub responses: &'a S::Responses,
    pub rewards: &'a S::Rewards,
}

/// Caller-supplied business logic for one scoring iteration.
///
/// Required: `query_miners`, `generate_rewards`, `set_weights`.
/// Optional: `generate_reference` (defaults to no reference) and
/// `log_results` (defaults to returning the log unchanged).
///
/// Implementors may write these as `async fn`; the returned futures must be
/// `Send` because the scheduler drives them on its own thread.
pub trait ScoringStrategy: Send + Sync + 'static {
    type Sample: Send + Sync + 'static;
    type Reference: Send + Sync + 'static;
    type Responses: Send + Sync + 'static;
    type Rewards: Send + Sync + 'static;

    /// Query the miners with a sample.
    fn query_miners(
        &self,
        sample: &Self::Sample,
    ) -> impl Future<Output = OrganicResult<Self::Responses>> + Send;

    /// Score the responses, optionally against a reference.
    fn generate_rewards(
        &self,
        sample: &Self::Sample,
        responses: &Self::Responses,
        reference: Option<&Self::Reference>,
    ) -> impl Future<Output = OrganicResult<Self::Rewards>> + Send;

    /// Persist or broadcast the scoring outcome.
    fn set_weights(
        &self,
        rewards: &Self::Rewards,
    ) -> impl Future<Output = OrganicResult<()>> + Send;

    /// Generate a reference answer for the sample, if the strategy uses one.
    fn generate_reference(
        &self,
        _sample: &Self::Sample,
    ) -> impl Future<Output = OrganicResult<Option<Self::Reference>>> + Send {
        async { Ok(None) }
    }

    /// Transform or augment the iteration log before it is emitted.
    fn log_results(
        &self,
        log: IterationLog,
        _ctx: IterationContext<'_, Self>,
    ) -> impl Future<Output = OrganicResult<IterationLog>> + Send {
        async move { Ok(log) }
    }
}
