//! Exponential backoff with jitter.

use super::strategy::BackoffStrategy;
use std::time::Duration;

const DEFAULT_INITIAL_DELAY: Duration = Duration::from_millis(100);
const DEFAULT_MAX_DELAY: Duration = Duration::from_secs(10);
const DEFAULT_MULTIPLIER: f64 = 2.0;
const DEFAULT_JITTER: f64 = 0.1;

/// Exponential backoff with configurable jitter.
///
/// For retry `n` (0-indexed):
///
/// ```text
/// base   = initial_delay * multiplier^n
/// jitter = base * jitter * random(-1.0, +1.0)
/// delay  = min(base + jitter, max_delay)
/// ```
///
/// # Examples
///
/// ```rust
/// use brisa_core::retry::{BackoffStrategy, ExponentialBackoff};
/// use std::time::Duration;
///
/// let backoff = ExponentialBackoff::builder()
///     .initial_delay(Duration::from_millis(250))
///     .max_delay(Duration::from_secs(2))
///     .jitter(0.0)
///     .build();
///
/// assert_eq!(backoff.next_delay(2), Some(Duration::from_secs(1)));
/// assert_eq!(backoff.next_delay(10), Some(Duration::from_secs(2)));
/// ```
#[derive(Debug, Clone, PartialEq)]
pub struct ExponentialBackoff {
    initial_delay: Duration,
    max_delay: Duration,
    multiplier: f64,
    jitter: f64,
}

impl ExponentialBackoff {
    /// Create a new builder for configuring exponential backoff.
    pub fn builder() -> ExponentialBackoffBuilder {
        ExponentialBackoffBuilder::default()
    }

    /// Delay before the first retry, before jitter.
    pub fn initial_delay(&self) -> Duration {
        self.initial_delay
    }

    /// Ceiling applied to every computed delay.
    pub fn max_delay(&self) -> Duration {
        self.max_delay
    }

    /// Growth factor between consecutive retries.
    pub fn multiplier(&self) -> f64 {
        self.multiplier
    }

    /// Jitter fraction in `[0.0, 1.0]`.
    pub fn jitter(&self) -> f64 {
        self.jitter
    }
}

impl Default for ExponentialBackoff {
    /// 100ms initial delay, doubling, capped at 10s, 10% jitter.
    fn default() -> Self {
        Self {
            initial_delay: DEFAULT_INITIAL_DELAY,
            max_delay: DEFAULT_MAX_DELAY,
            multiplier: DEFAULT_MULTIPLIER,
            jitter: DEFAULT_JITTER,
        }
    }
}

impl BackoffStrategy for ExponentialBackoff {
    fn next_delay(&self, attempt: u32) -> Option<Duration> {
        let exponent = i32::try_from(attempt).unwrap_or(i32::MAX);
        let base = self.initial_delay.as_secs_f64() * self.multiplier.powi(exponent);
        // 0 * inf when the initial delay is zero.
        let base = if base.is_nan() { 0.0 } else { base };

        let jittered = if self.jitter > 0.0 {
            let spread = (rand::random::<f64>() - 0.5) * 2.0;
            base + base * self.jitter * spread
        } else {
            base
        };

        // powi overflows to infinity for large attempts; the cap absorbs it.
        let capped = jittered.min(self.max_delay.as_secs_f64()).max(0.0);
        // The f64 form of a huge cap can round past Duration::MAX.
        Some(Duration::try_from_secs_f64(capped).unwrap_or(self.max_delay))
    }
}

/// Builder for [`ExponentialBackoff`]. Unset fields keep their defaults.
#[derive(Debug, Default)]
pub struct ExponentialBackoffBuilder {
    initial_delay: Option<Duration>,
    max_delay: Option<Duration>,
    multiplier: Option<f64>,
    jitter: Option<f64>,
}

impl ExponentialBackoffBuilder {
    /// Set the delay before the first retry. Default: 100ms
    pub fn initial_delay(mut self, delay: Duration) -> Self {
        self.initial_delay = Some(delay);
        self
    }

    /// Set the maximum delay between retries. Default: 10s
    pub fn max_delay(mut self, delay: Duration) -> Self {
        self.max_delay = Some(delay);
        self
    }

    /// Set the growth factor. Values below 1.0 are raised to 1.0. Default: 2.0
    pub fn multiplier(mut self, multiplier: f64) -> Self {
        self.multiplier = Some(multiplier.max(1.0));
        self
    }

    /// Set the jitter fraction, clamped to `[0.0, 1.0]`. Default: 0.1
    pub fn jitter(mut self, jitter: f64) -> Self {
        self.jitter = Some(jitter.clamp(0.0, 1.0));
        self
    }

    /// Build the backoff.
    pub fn build(self) -> ExponentialBackoff {
        ExponentialBackoff {
            initial_delay: self.initial_delay.unwrap_or(DEFAULT_INITIAL_DELAY),
            max_delay: self.max_delay.unwrap_or(DEFAULT_MAX_DELAY),
            multiplier: self.multiplier.unwrap_or(DEFAULT_MULTIPLIER),
            jitter: self.jitter.unwrap_or(DEFAULT_JITTER),
        }
    }
}
