use serde::{Deserialize, Serialize};

/// Where the sample for an iteration came from.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum SampleOrigin {
    /// Popped from the organic queue.
    Organic,
    /// Drawn from the synthetic source at `index`.
    Synthetic { index: usize, source: String },
}

impl SampleOrigin {
    pub fn is_organic(&self) -> bool {
        matches!(self, Self::Organic)
    }
}
