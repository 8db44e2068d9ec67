//! Retry with backoff.

use super::middleware::{Middleware, Next};
use async_trait::async_trait;
use brisa_core::retry::{BackoffStrategy, ExponentialBackoff};
use brisa_transport::{Body, HttpRequest, HttpResponse, RequestContext, Result};
use http::StatusCode;
use std::collections::BTreeSet;
use std::sync::Arc;

/// Re-issues a request when the transport fails with a retryable error or
/// the response status is in the retryable set.
///
/// `max_retries` counts retries, not attempts: with 3 retries a request that
/// keeps failing is sent 4 times. The request body is read once and replayed
/// for every attempt. Sleeps between attempts end early, with an error, when
/// the call is cancelled or its deadline passes.
#[derive(Debug, Clone)]
pub struct RetryMiddleware {
    max_retries: u32,
    retry_statuses: BTreeSet<StatusCode>,
    backoff: Arc<dyn BackoffStrategy>,
}

impl RetryMiddleware {
    /// Retry up to `max_retries` times with the default exponential backoff
    /// and no retryable statuses.
    pub fn new(max_retries: u32) -> Self {
        Self {
            max_retries,
            retry_statuses: BTreeSet::new(),
            backoff: Arc::new(ExponentialBackoff::default()),
        }
    }

    /// Also retry responses with any of these statuses.
    pub fn with_statuses(mut self, statuses: impl IntoIterator<Item = StatusCode>) -> Self {
        self.retry_statuses = statuses.into_iter().collect();
        self
    }

    /// Use `backoff` to space attempts.
    pub fn with_backoff(mut self, backoff: Arc<dyn BackoffStrategy>) -> Self {
        self.backoff = backoff;
        self
    }

    /// Maximum number of retries after the first attempt.
    pub fn max_retries(&self) -> u32 {
        self.max_retries
    }

    fn should_retry(&self, result: &Result<HttpResponse>) -> bool {
        match result {
            Ok(response) => self.retry_statuses.contains(&response.status),
            Err(err) => err.is_retryable(),
        }
    }
}

#[async_trait]
impl Middleware for RetryMiddleware {
    async fn handle(
        &self,
        mut request: HttpRequest,
        ctx: &RequestContext,
        next: Next<'_>,
    ) -> Result<HttpResponse> {
        let body = ctx.run(request.body.buffer()).await?;
        let mut attempt = 0;

        loop {
            let attempt_request = HttpRequest {
                method: request.method.clone(),
                url: request.url.clone(),
                headers: request.headers.clone(),
                body: Body::from_bytes(body.clone()),
            };

            let result = next.run(attempt_request, ctx).await;
            if attempt >= self.max_retries || !self.should_retry(&result) {
                return result;
            }

            let Some(delay) = self.backoff.next_delay(attempt) else {
                return result;
            };

            match &result {
                Ok(response) => tracing::debug!(
                    attempt = attempt + 1,
                    status = %response.status,
                    ?delay,
                    "retrying after retryable status"
                ),
                Err(err) => tracing::debug!(
                    attempt = attempt + 1,
                    error = %err,
                    ?delay,
                    "retrying after transport error"
                ),
            }
            drop(result);

            ctx.sleep(delay).await?;
            attempt += 1;
        }
    }
}
