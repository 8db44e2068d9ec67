//! Raw transport boundary for the brisa HTTP client.
//!
//! Everything above this crate (header injection, logging, retries, error
//! classification) sees the network through one trait, [`Transport`], that
//! takes a fully formed request and returns a response or a
//! [`TransportError`].
//!
//! # Architecture
//!
//! - **Transport trait**: a single `send(request, ctx)` operation
//! - **Body**: buffered bytes or a single-use chunk stream
//! - **RequestContext**: cancellation token plus deadline for one call
//! - **HTTP transport**: the reqwest-backed default implementation
//!
//! # Usage
//!
//! ```no_run
//! use brisa_transport::{HttpRequest, HttpTransport, RequestContext, Transport};
//! use http::Method;
//! use std::time::Duration;
//! use url::Url;
//!
//! # async fn example() -> Result<(), Box<dyn std::error::Error>> {
//! let transport = HttpTransport::new()?;
//! let request = HttpRequest::new(Method::GET, Url::parse("https://example.com")?);
//! let ctx = RequestContext::new().with_timeout(Duration::from_secs(10));
//! let response = transport.send(request, &ctx).await?;
//! println!("{}", response.text().await?);
//! # Ok(())
//! # }
//! ```

#![deny(unsafe_code)]
#![warn(missing_docs)]

pub mod body;
pub mod context;
pub mod error;
pub mod http;
pub mod traits;

// Re-export commonly used types
pub use body::{Body, BodyStream};
pub use context::RequestContext;
pub use error::{Result, TransportError};
pub use crate::http::{HttpTransport, HttpTransportConfig};
pub use traits::{HttpRequest, HttpResponse, Transport};
pub use tokio_util::sync::CancellationToken;
