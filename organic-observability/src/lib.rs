//! # organic-observability
//!
//! Tracing initialization, span macros, and the iteration metrics collector.

pub mod metrics;
pub mod tracing_setup;

pub use metrics::{IntakeMetrics, IterationMetrics};
pub use tracing_setup::{init_tracing, init_tracing_json};
