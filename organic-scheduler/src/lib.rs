//! # organic-scheduler
//!
//! Background scoring loop that prefers organic samples, falls back to
//! synthetic sources, and paces itself by an annealing law over the organic
//! backlog. Triggering is either wall-clock (`seconds`) or host-driven
//! (`steps`).
//!
//! ```no_run
//! # use organic_core::config::{SchedulerConfig, TriggerConfig};
//! # use organic_core::traits::ScoringStrategy;
//! # fn demo<S: ScoringStrategy>(strategy: S) -> organic_core::OrganicResult<()> {
//! use organic_scheduler::AdaptiveScheduler;
//!
//! let config = SchedulerConfig::with_trigger(TriggerConfig::steps(100)?);
//! let scheduler = AdaptiveScheduler::new(strategy, config)?;
//! scheduler.start()?;
//! for _ in 0..1_000 {
//!     scheduler.increment_step();
//! }
//! scheduler.stop();
//! # Ok(())
//! # }
//! ```

pub mod engine;
pub mod intake;
pub mod run_loop;
pub mod scheduling;

pub use engine::{AdaptiveScheduler, SchedulerBuilder};
pub use intake::OrganicIntake;
pub use run_loop::IterationOutcome;
pub use scheduling::{annealed_steps, annealed_unit, plan, PacingPlan};
