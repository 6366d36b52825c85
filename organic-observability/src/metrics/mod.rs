//! Iteration and intake metrics.
//!
//! [`IterationMetrics`] aggregates every emitted iteration log plus
//! failures and empty iterations; [`IntakeMetrics`] counts admission
//! outcomes on the producer side.

pub mod intake_metrics;
pub mod iteration_metrics;

pub use intake_metrics::IntakeMetrics;
pub use iteration_metrics::IterationMetrics;
