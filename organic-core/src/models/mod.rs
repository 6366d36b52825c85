pub mod iteration_log;
pub mod sample_origin;

pub use iteration_log::{IterationLog, PhaseTimings};
pub use sample_origin::SampleOrigin;
