//! Per-call cancellation and deadline.

use crate::error::{Result, TransportError};
use std::future::Future;
use std::time::Duration;
use tokio::time::Instant;
use tokio_util::sync::CancellationToken;

/// Cancellation token and optional deadline carried by one call.
///
/// The context is threaded through every middleware link and into the raw
/// transport. Deadlines only ever tighten: combining a context with a later
/// deadline keeps the earlier one.
///
/// # Examples
///
/// ```rust
/// use brisa_transport::RequestContext;
/// use std::time::Duration;
///
/// # #[tokio::main(flavor = "current_thread")]
/// # async fn main() {
/// let ctx = RequestContext::new().with_timeout(Duration::from_secs(5));
/// assert!(ctx.remaining().unwrap() <= Duration::from_secs(5));
///
/// // A looser deadline does not override the tighter one.
/// let ctx = ctx.with_timeout(Duration::from_secs(60));
/// assert!(ctx.remaining().unwrap() <= Duration::from_secs(5));
/// # }
/// ```
#[derive(Debug, Clone, Default)]
pub struct RequestContext {
    cancel: CancellationToken,
    deadline: Option<Instant>,
}

impl RequestContext {
    /// A context with no deadline and a fresh cancellation token.
    pub fn new() -> Self {
        Self::default()
    }

    /// Tighten the deadline to at most `timeout` from now.
    pub fn with_timeout(self, timeout: Duration) -> Self {
        let deadline = Instant::now() + timeout;
        self.with_deadline(deadline)
    }

    /// Tighten the deadline to at most `deadline`.
    pub fn with_deadline(mut self, deadline: Instant) -> Self {
        self.deadline = Some(match self.deadline {
            Some(current) => current.min(deadline),
            None => deadline,
        });
        self
    }

    /// Use `token` for cancellation. Cancelling it aborts the call.
    pub fn with_cancellation(mut self, token: CancellationToken) -> Self {
        self.cancel = token;
        self
    }

    /// The effective deadline, if any.
    pub fn deadline(&self) -> Option<Instant> {
        self.deadline
    }

    /// Time left before the deadline. `Some(ZERO)` once it has passed.
    pub fn remaining(&self) -> Option<Duration> {
        self.deadline
            .map(|deadline| deadline.saturating_duration_since(Instant::now()))
    }

    /// Whether the deadline has passed.
    pub fn is_expired(&self) -> bool {
        self.deadline.is_some_and(|deadline| Instant::now() >= deadline)
    }

    /// Whether the call was cancelled.
    pub fn is_cancelled(&self) -> bool {
        self.cancel.is_cancelled()
    }

    /// The token backing this context.
    pub fn cancellation_token(&self) -> &CancellationToken {
        &self.cancel
    }

    /// Cancel the call and every clone of this context.
    pub fn cancel(&self) {
        self.cancel.cancel();
    }

    /// Fail fast if the call is already cancelled or past its deadline.
    pub fn check(&self) -> Result<()> {
        if self.is_cancelled() {
            return Err(TransportError::Cancelled);
        }
        if self.is_expired() {
            return Err(TransportError::Timeout);
        }
        Ok(())
    }

    /// Drive `future` until it completes, the call is cancelled, or the
    /// deadline passes, whichever comes first.
    pub async fn run<F, T>(&self, future: F) -> Result<T>
    where
        F: Future<Output = Result<T>>,
    {
        self.check()?;

        let deadline = async {
            match self.deadline {
                Some(deadline) => tokio::time::sleep_until(deadline).await,
                None => std::future::pending::<()>().await,
            }
        };

        tokio::select! {
            biased;
            _ = self.cancel.cancelled() => Err(TransportError::Cancelled),
            _ = deadline => Err(TransportError::Timeout),
            result = future => result,
        }
    }

    /// Sleep for `duration`, waking early with an error on cancellation or
    /// deadline.
    pub async fn sleep(&self, duration: Duration) -> Result<()> {
        self.run(async {
            tokio::time::sleep(duration).await;
            Ok(())
        })
        .await
    }
}
