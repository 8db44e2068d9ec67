//! HTTP middleware for request/response processing
//!
//! A [`Chain`] wraps a terminal [`Transport`] in an ordered list of
//! [`Middleware`] links. The first link in the list is the outermost: it sees
//! the request first and the response last. Each link receives a [`Next`]
//! handle and decides whether, and how many times, to call it.
//!
//! ```rust
//! use brisa::http::{Chain, HeadersMiddleware, Middleware};
//! use brisa_transport::HttpTransport;
//! use http::{HeaderMap, HeaderValue};
//! use std::sync::Arc;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut defaults = HeaderMap::new();
//! defaults.insert("accept-language", HeaderValue::from_static("pt-BR"));
//!
//! let headers: Arc<dyn Middleware> = Arc::new(HeadersMiddleware::new(defaults));
//! let chain = Chain::new(vec![headers], Arc::new(HttpTransport::new()?));
//! assert_eq!(chain.len(), 1);
//! # Ok(())
//! # }
//! ```

use async_trait::async_trait;
use brisa_transport::{HttpRequest, HttpResponse, RequestContext, Result, Transport};
use std::fmt;
use std::sync::Arc;

/// One link in a transport chain.
#[async_trait]
pub trait Middleware: Send + Sync + fmt::Debug {
    /// Handle a request, delegating to `next` for the rest of the chain.
    async fn handle(
        &self,
        request: HttpRequest,
        ctx: &RequestContext,
        next: Next<'_>,
    ) -> Result<HttpResponse>;
}

/// The remainder of a chain, as seen from inside a link.
///
/// `Next` is `Copy`, so a link may run the rest of the chain more than once.
#[derive(Clone, Copy)]
pub struct Next<'a> {
    links: &'a [Arc<dyn Middleware>],
    transport: &'a dyn Transport,
}

impl<'a> Next<'a> {
    /// Pass the request to the following link, or to the terminal transport
    /// when no links remain.
    pub async fn run(self, request: HttpRequest, ctx: &RequestContext) -> Result<HttpResponse> {
        match self.links.split_first() {
            Some((link, rest)) => {
                let next = Next {
                    links: rest,
                    transport: self.transport,
                };
                link.handle(request, ctx, next).await
            }
            None => self.transport.send(request, ctx).await,
        }
    }

    /// Number of links still ahead of the terminal transport.
    pub fn remaining(&self) -> usize {
        self.links.len()
    }
}

impl fmt::Debug for Next<'_> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Next")
            .field("remaining", &self.links.len())
            .finish()
    }
}

/// An ordered list of middleware sharing one terminal transport.
///
/// Built once per client and shared read-only by every request.
#[derive(Clone, Debug)]
pub struct Chain {
    links: Vec<Arc<dyn Middleware>>,
    transport: Arc<dyn Transport>,
}

impl Chain {
    /// Compose `links` (outermost first) around `transport`.
    pub fn new(links: Vec<Arc<dyn Middleware>>, transport: Arc<dyn Transport>) -> Self {
        Self { links, transport }
    }

    /// Number of links.
    pub fn len(&self) -> usize {
        self.links.len()
    }

    /// Whether the chain is just the terminal transport.
    pub fn is_empty(&self) -> bool {
        self.links.is_empty()
    }
}

#[async_trait]
impl Transport for Chain {
    async fn send(&self, request: HttpRequest, ctx: &RequestContext) -> Result<HttpResponse> {
        let next = Next {
            links: &self.links,
            transport: self.transport.as_ref(),
        };
        next.run(request, ctx).await
    }
}
