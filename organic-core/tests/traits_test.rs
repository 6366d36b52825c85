//! Default behavior of the optional strategy and policy hooks.

use organic_core::errors::{CollaboratorError, OrganicError, OrganicResult, SourceError};
use organic_core::models::IterationLog;
use organic_core::traits::{
    FnSource, IntakePolicy, IterationContext, PermissivePolicy, ScoringStrategy, SyntheticSource,
};

struct MinimalStrategy;

impl ScoringStrategy for MinimalStrategy {
    type Sample = String;
    type Reference = String;
    type Responses = Vec<String>;
    type Rewards = Vec<f64>;

    async fn query_miners(&self, sample: &String) -> OrganicResult<Vec<String>> {
        Ok(vec![sample.to_uppercase()])
    }

    async fn generate_rewards(
        &self,
        _sample: &String,
        responses: &Vec<String>,
        _reference: Option<&String>,
    ) -> OrganicResult<Vec<f64>> {
        Ok(responses.iter().map(|r| r.len() as f64).collect())
    }

    async fn set_weights(&self, _rewards: &Vec<f64>) -> OrganicResult<()> {
        Err(CollaboratorError::Weights {
            reason: "chain unavailable".to_string(),
        }
        .into())
    }
}

#[tokio::test]
async fn default_reference_is_none() {
    let strategy = MinimalStrategy;
    let reference = strategy.generate_reference(&"hi".to_string()).await.unwrap();
    assert!(reference.is_none());
}

#[tokio::test]
async fn default_log_hook_is_identity() {
    let strategy = MinimalStrategy;
    let sample = "hi".to_string();
    let responses = strategy.query_miners(&sample).await.unwrap();
    let rewards = strategy
        .generate_rewards(&sample, &responses, None)
        .await
        .unwrap();
    let log = IterationLog::empty(1, 0);
    let out = strategy
        .log_results(
            log.clone(),
            IterationContext {
                sample: &sample,
                reference: None,
                responses: &responses,
                rewards: &rewards,
            },
        )
        .await
        .unwrap();
    assert_eq!(out, log);
    assert_eq!(rewards, vec![2.0]);
}

#[tokio::test]
async fn collaborator_errors_are_recoverable() {
    let err = MinimalStrategy.set_weights(&vec![1.0]).await.unwrap_err();
    assert!(err.is_recoverable());
    match err {
        OrganicError::Collaborator(inner) => assert_eq!(inner.stage(), "weights"),
        other => panic!("unexpected error: {other}"),
    }
}

#[test]
fn permissive_policy_accepts_everything() {
    let policy = PermissivePolicy;
    assert!(IntakePolicy::<u32>::blacklist(&policy, &7).is_none());
    assert!(IntakePolicy::<u32>::verify(&policy, &7));
    assert_eq!(IntakePolicy::<u32>::priority(&policy, &7), 0.0);
}

#[test]
fn fn_source_forwards_results() {
    let ok = FnSource::new("constant", || Ok::<_, OrganicError>(42u32));
    assert_eq!(ok.name(), "constant");
    assert_eq!(ok.sample().unwrap(), 42);

    let failing = FnSource::new("broken", || -> OrganicResult<u32> {
        Err(SourceError::Unavailable {
            source_name: "broken".to_string(),
            reason: "offline".to_string(),
        }
        .into())
    });
    let err = failing.sample().unwrap_err();
    assert!(err.to_string().contains("offline"));
}

#[test]
fn panics_are_recoverable_but_runtime_errors_are_not() {
    assert!(OrganicError::Panicked("boom".to_string()).is_recoverable());
    assert!(!OrganicError::Runtime("no runtime".to_string()).is_recoverable());
}
