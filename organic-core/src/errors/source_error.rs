/// Synthetic sample source failures.
#[derive(Debug, Clone, PartialEq, thiserror::Error)]
pub enum SourceError {
    /// The upstream data could not be loaded. Returned on every `sample()`.
    #[error("synthetic source `{source_name}` is unavailable: {reason}")]
    Unavailable { source_name: String, reason: String },

    #[error("synthetic source `{source_name}` has no samples")]
    Empty { source_name: String },

    #[error("malformed record {line} in `{source_name}`: {reason}")]
    MalformedRecord {
        source_name: String,
        line: usize,
        reason: String,
    },
}
