//! # organic-queue
//!
//! Bounded container for organic samples. Overflow evicts the oldest sample;
//! consumption pops a uniformly random one. The two policies are independent.

pub mod bounded;

pub use bounded::BoundedSampleQueue;
