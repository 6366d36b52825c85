/// Rejections raised while admitting an organic sample into the queue.
#[derive(Debug, Clone, PartialEq, Eq, thiserror::Error)]
pub enum IntakeError {
    #[error("organic sample blacklisted: {reason}")]
    Blacklisted { reason: String },

    #[error("organic sample failed verification")]
    VerificationFailed,
}
