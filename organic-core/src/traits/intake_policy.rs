/// Admission hooks applied to organic samples before they reach the queue.
///
/// Every method has a permissive default, so implementors only override
/// the checks they need.
pub trait IntakePolicy<T>: Send + Sync {
    /// Return a reason to reject the sample outright.
    fn blacklist(&self, _sample: &T) -> Option<String> {
        None
    }

    /// Return `false` to reject a sample that fails verification.
    fn verify(&self, _sample: &T) -> bool {
        true
    }

    /// Priority hint for the request layer. Higher is served first.
    fn priority(&self, _sample: &T) -> f64 {
        0.0
    }
}

/// Accepts everything with zero priority.
#[derive(Debug, Clone, Copy, Default)]
pub struct PermissivePolicy;

impl<T> IntakePolicy<T> for PermissivePolicy {}
