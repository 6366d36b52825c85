/// Container for organic samples awaiting scoring.
///
/// Producers call `add` from any thread; the scheduler is the single
/// consumer calling `sample`.
pub trait OrganicQueue<T>: Send + Sync {
    /// Insert a sample. Returns the sample evicted to make room, if any.
    fn add(&self, sample: T) -> Option<T>;

    /// Remove and return one sample, or `None` when empty.
    fn sample(&self) -> Option<T>;

    fn size(&self) -> usize;

    fn is_empty(&self) -> bool {
        self.size() == 0
    }
}
