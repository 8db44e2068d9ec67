//! HTTP layer: the transport chain and per-call request handling
//!
//! The client's chain is, outermost first:
//!
//! 1. [`HeadersMiddleware`]: fills in default headers
//! 2. [`RetryMiddleware`]: re-issues failed attempts with backoff
//! 3. [`LoggingMiddleware`]: records each attempt when debug is on
//!
//! followed by the terminal transport. Logging sits inside retry so every
//! executed attempt gets its own records, and headers sit outside both so
//! every attempt and every log record carries them.

pub mod headers;
pub mod logging;
pub mod middleware;
pub mod request;
pub mod retry;

pub(crate) mod resolve;

pub use headers::HeadersMiddleware;
pub use logging::LoggingMiddleware;
pub use middleware::{Chain, Middleware, Next};
pub use request::{QueryParams, RequestOptions};
pub use retry::RetryMiddleware;

// Re-export HTTP types from the http crate for convenience
pub use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
