//! Error handling for the organic scoring scheduler.
//! One error enum per subsystem, `thiserror` only.

pub mod collaborator_error;
pub mod config_error;
pub mod intake_error;
pub mod organic_error;
pub mod source_error;

pub use collaborator_error::CollaboratorError;
pub use config_error::ConfigError;
pub use intake_error::IntakeError;
pub use organic_error::{OrganicError, OrganicResult};
pub use source_error::SourceError;
