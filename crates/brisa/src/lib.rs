//! # brisa
//!
//! Configurable HTTP client for fetching pages from invoice lookup portals:
//! - Base URL resolution for relative paths
//! - Default headers, including a browser-like User-Agent
//! - Retries with exponential backoff
//! - Debug logging of every request and response through a pluggable logger
//! - Cookie persistence across requests
//! - A typed error for every failure, keeping error responses readable
//!
//! ## Quick Start
//!
//! ```rust,no_run
//! use brisa::{Client, RequestContext, RequestOptions};
//! use std::time::Duration;
//!
//! #[tokio::main]
//! async fn main() -> brisa::Result<()> {
//!     let client = Client::builder()
//!         .base_url("https://portal.example.gov.br")
//!         .timeout(Duration::from_secs(20))
//!         .retry_attempts(2)
//!         .build_client()?;
//!
//!     let ctx = RequestContext::new();
//!     let options = RequestOptions::new().query("chave", "35240612345678000190650010000123451000123456");
//!
//!     match client.get(&ctx, "/nfce/consulta", Some(options)).await {
//!         Ok(page) => println!("{}", page.text().await?),
//!         Err(err) if err.is_not_found() => println!("no such invoice"),
//!         Err(err) => return Err(err),
//!     }
//!     Ok(())
//! }
//! ```
//!
//! One-off requests can use the process-wide default client:
//!
//! ```rust,no_run
//! # async fn example() -> brisa::Result<()> {
//! let page = brisa::get("https://example.com/").await?;
//! # Ok(())
//! # }
//! ```

#![warn(missing_docs)]
#![deny(unsafe_code)]
#![cfg_attr(docsrs, feature(doc_cfg))]

// Re-export commonly used types
pub use client::{Client, default_client, get, post};
pub use config::{
    ClientConfig, ClientConfigBuilder, ClientOption, DEFAULT_RETRY_ATTEMPTS, DEFAULT_TIMEOUT,
    DEFAULT_USER_AGENT, RejectedOption,
};
pub use error::{Error, Result};
pub use crate::http::{QueryParams, RequestOptions};

// Module declarations
pub mod client;
pub mod config;
pub mod error;
pub mod http;

#[cfg(test)]
mod test_support;

// Re-export the crates that make up the public API
pub use brisa_core::logger::{Fields, Level, Logger, MemoryLogger, NoopLogger, TracingLogger};
pub use brisa_core::retry::{BackoffStrategy, ExponentialBackoff, NoBackoff};
pub use brisa_transport::{
    Body, CancellationToken, HttpRequest, HttpResponse, HttpTransport, RequestContext, Transport,
    TransportError,
};
pub use reqwest::cookie::Jar as CookieJar;
