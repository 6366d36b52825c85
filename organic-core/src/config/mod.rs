//! Configuration for the organic scoring scheduler.
//! TOML-based, layered resolution: env > file > defaults.

pub mod defaults;
pub mod loop_config;
pub mod queue_config;
pub mod scheduler_config;
pub mod trigger_config;

pub use loop_config::LoopConfig;
pub use queue_config::QueueConfig;
pub use scheduler_config::SchedulerConfig;
pub use trigger_config::{TriggerConfig, TriggerMode};
