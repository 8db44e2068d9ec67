//! Retry backoff.
//!
//! - [`BackoffStrategy`] - how long to wait before a given retry
//! - [`ExponentialBackoff`] - exponential growth with jitter and a ceiling
//! - [`NoBackoff`] - retry immediately

mod exponential;
mod strategy;

pub use exponential::{ExponentialBackoff, ExponentialBackoffBuilder};
pub use strategy::{BackoffStrategy, NoBackoff};
