#![deny(unsafe_code)]
#![warn(missing_docs)]

//! Core abstractions shared by the brisa crates.
//!
//! - **Retry backoff** via the [`retry::BackoffStrategy`] trait, with
//!   [`retry::ExponentialBackoff`] as the standard implementation
//! - **Structured logging sink** via the [`logger::Logger`] trait, with a
//!   discarding default, an in-memory recorder and (behind the `tracing`
//!   feature) a bridge into `tracing`
//!
//! # Examples
//!
//! ```rust
//! use brisa_core::prelude::*;
//! use std::time::Duration;
//!
//! let backoff = ExponentialBackoff::builder()
//!     .initial_delay(Duration::from_millis(100))
//!     .build();
//! assert!(backoff.next_delay(0).is_some());
//!
//! let logger = MemoryLogger::new();
//! logger.info("started", &fields! { "attempts" => 3 });
//! assert_eq!(logger.len(), 1);
//! ```

pub mod logger;
pub mod retry;

#[doc(hidden)]
pub mod __private {
    pub use serde_json::json;
}

/// Convenient re-exports of commonly used items.
pub mod prelude {
    pub use crate::fields;
    pub use crate::logger::{Fields, Level, Logger, MemoryLogger, NoopLogger};
    pub use crate::retry::{BackoffStrategy, ExponentialBackoff, NoBackoff};
}
