pub mod intake_policy;
pub mod organic_queue;
pub mod scoring_strategy;
pub mod synthetic_source;

pub use intake_policy::{IntakePolicy, PermissivePolicy};
pub use organic_queue::OrganicQueue;
pub use scoring_strategy::{IterationContext, ScoringStrategy};
pub use synthetic_source::{FnSource, SyntheticSource};
