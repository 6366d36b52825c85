use super::{CollaboratorError, ConfigError, IntakeError, SourceError};

/// Top-level error aggregating every subsystem error via `From`.
#[derive(Debug, thiserror::Error)]
pub enum OrganicError {
    #[error("configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("collaborator error: {0}")]
    Collaborator(#[from] CollaboratorError),

    #[error("synthetic source error: {0}")]
    Source(#[from] SourceError),

    #[error("intake error: {0}")]
    Intake(#[from] IntakeError),

    /// A collaborator or source panicked mid-iteration.
    #[error("iteration panicked: {0}")]
    Panicked(String),

    #[error("runtime error: {0}")]
    Runtime(String),
}

impl OrganicError {
    /// Whether the run loop may recover from this error and keep iterating.
    ///
    /// Configuration and runtime errors surface at construction/start only.
    pub fn is_recoverable(&self) -> bool {
        matches!(
            self,
            Self::Collaborator(_) | Self::Source(_) | Self::Intake(_) | Self::Panicked(_)
        )
    }
}

pub type OrganicResult<T> = Result<T, OrganicError>;
