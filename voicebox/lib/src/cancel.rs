//! Cooperative cancellation for long-running batch loops.

use std::sync::Arc;
use std::sync::atomic::{AtomicBool, Ordering};

/// A clonable cancellation token.
///
/// The batch synthesis loop checks the token between batches, never
/// mid-batch. Observing a cancellation via [`CancelToken::take`] clears the
/// flag so the next run starts fresh. Clones share the same flag.
///
/// ## Examples
///
/// ```
/// use voicebox_lib::cancel::CancelToken;
///
/// let token = CancelToken::new();
/// let handle = token.clone();
/// handle.cancel();
/// assert!(token.take());
/// assert!(!token.is_cancelled());
/// ```
#[derive(Debug, Clone, Default)]
pub struct CancelToken {
    flag: Arc<AtomicBool>,
}

impl CancelToken {
    /// Create a fresh, un-cancelled token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Request cancellation of the current run.
    pub fn cancel(&self) {
        self.flag.store(true, Ordering::SeqCst);
    }

    /// Whether cancellation has been requested.
    pub fn is_cancelled(&self) -> bool {
        self.flag.load(Ordering::SeqCst)
    }

    /// Observe and clear the cancellation flag.
    ///
    /// Returns `true` exactly once per cancellation request.
    pub fn take(&self) -> bool {
        self.flag.swap(false, Ordering::SeqCst)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_fresh_token_is_not_cancelled() {
        let token = CancelToken::new();
        assert!(!token.is_cancelled());
        assert!(!token.take());
    }

    #[test]
    fn test_take_clears_the_flag() {
        let token = CancelToken::new();
        token.cancel();
        assert!(token.is_cancelled());
        assert!(token.take());
        assert!(!token.is_cancelled());
        assert!(!token.take());
    }

    #[test]
    fn test_clones_share_the_flag() {
        let token = CancelToken::new();
        let handle = token.clone();
        handle.cancel();
        assert!(token.take());
        assert!(!handle.is_cancelled());
    }
}
