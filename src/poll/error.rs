// ABOUTME: Failure modes of a convergence loop.
// ABOUTME: Exhausted attempt budget versus a backend error passed through untouched.

/// Why a convergence loop returned without reaching its condition.
#[derive(Debug, thiserror::Error)]
pub enum PollError<E> {
    /// The attempt budget ran out while the condition still did not hold.
    /// The last observed value is dropped.
    #[error("maximum number of attempts exceeded waiting for {condition} ({observations} observations)")]
    MaximumAttemptsExceeded { condition: String, observations: u64 },

    /// An observer, list, or delete call failed. Never retried.
    #[error(transparent)]
    Backend(E),
}

impl<E> PollError<E> {
    pub fn is_exhausted(&self) -> bool {
        matches!(self, PollError::MaximumAttemptsExceeded { .. })
    }

    /// The backend error, if this is not an exhaustion failure.
    pub fn backend(&self) -> Option<&E> {
        match self {
            PollError::Backend(e) => Some(e),
            PollError::MaximumAttemptsExceeded { .. } => None,
        }
    }
}

/// Backend errors that can signal "the resource is already gone".
///
/// Delete-until-absent treats this as success rather than a failure.
pub trait NotFound {
    fn is_not_found(&self) -> bool;
}
