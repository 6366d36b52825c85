use std::fmt;

use crate::errors::OrganicResult;

/// Fallback sample provider used when the organic queue is empty.
pub trait SyntheticSource: Send + Sync {
    type Sample;

    /// Human-readable name used in logs.
    fn name(&self) -> &str;

    /// Draw one sample. Failures count as a failed iteration.
    fn sample(&self) -> OrganicResult<Self::Sample>;
}

/// Adapts a closure into a [`SyntheticSource`].
pub struct FnSource<F> {
    name: String,
    f: F,
}

impl<F> FnSource<F> {
    pub fn new(name: impl Into<String>, f: F) -> Self {
        Self {
            name: name.into(),
            f,
        }
    }
}

impl<F> fmt::Debug for FnSource<F> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("FnSource").field("name", &self.name).finish()
    }
}

impl<F, T> SyntheticSource for FnSource<F>
where
    F: Fn() -> OrganicResult<T> + Send + Sync,
{
    type Sample = T;

    fn name(&self) -> &str {
        &self.name
    }

    fn sample(&self) -> OrganicResult<T> {
        (self.f)()
    }
}
