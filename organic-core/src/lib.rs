//! # organic-core
//!
//! Foundation crate for the organic scoring scheduler.
//! Defines the shared types, traits, errors, config, and constants.
//! Every other crate in the workspace depends on this.

pub mod config;
pub mod constants;
pub mod errors;
pub mod models;
pub mod traits;

// Re-export the most commonly used types at the crate root.
pub use config::{SchedulerConfig, TriggerConfig, TriggerMode};
pub use errors::{OrganicError, OrganicResult};
pub use models::IterationLog;
