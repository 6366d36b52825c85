/// Failures raised by the caller-supplied scoring strategy.
///
/// The run loop contains these: it logs them, backs off, and continues.
#[derive(Debug, thiserror::Error)]
pub enum CollaboratorError {
    #[error("reference generation failed: {reason}")]
    Reference { reason: String },

    #[error("miner query failed: {reason}")]
    Query { reason: String },

    #[error("reward generation failed: {reason}")]
    Rewards { reason: String },

    #[error("setting weights failed: {reason}")]
    Weights { reason: String },

    #[error("result logging failed: {reason}")]
    Logging { reason: String },
}

impl CollaboratorError {
    /// Short stage label used in structured log fields.
    pub fn stage(&self) -> &'static str {
        match self {
            Self::Reference { .. } => "reference",
            Self::Query { .. } => "query",
            Self::Rewards { .. } => "rewards",
            Self::Weights { .. } => "weights",
            Self::Logging { .. } => "logging",
        }
    }
}
