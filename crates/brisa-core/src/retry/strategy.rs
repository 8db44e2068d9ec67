//! The backoff abstraction consumed by retrying callers.

use std::fmt::Debug;
use std::time::Duration;

/// Computes how long to wait before a retry.
///
/// A strategy only answers "how long"; deciding *whether* to retry and
/// counting attempts belongs to the caller. This keeps the trait object safe,
/// so a client can hold an `Arc<dyn BackoffStrategy>` chosen at build time.
///
/// # Examples
///
/// ```rust
/// use brisa_core::retry::{BackoffStrategy, ExponentialBackoff};
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .initial_delay(Duration::from_millis(100))
///     .jitter(0.0)
///     .build();
///
/// assert_eq!(backoff.next_delay(0), Some(Duration::from_millis(100)));
/// assert_eq!(backoff.next_delay(1), Some(Duration::from_millis(200)));
/// ```
pub trait BackoffStrategy: Send + Sync + Debug {
    /// Delay to wait before retry number `attempt` (0-indexed).
    ///
    /// `next_delay(0)` is the pause between the initial attempt and the first
    /// retry. Returning `None` means the strategy refuses any further retry,
    /// regardless of how many attempts the caller still has.
    fn next_delay(&self, attempt: u32) -> Option<Duration>;
}

/// A strategy that never waits. Useful in tests.
#[derive(Debug, Clone, Copy, Default)]
pub struct NoBackoff;

impl BackoffStrategy for NoBackoff {
    fn next_delay(&self, _attempt: u32) -> Option<Duration> {
        Some(Duration::ZERO)
    }
}
