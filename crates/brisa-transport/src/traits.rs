//! Transport trait and the request/response types it exchanges.

use crate::body::Body;
use crate::context::RequestContext;
use crate::error::{Result, TransportError};
use async_trait::async_trait;
use bytes::Bytes;
use http::{HeaderMap, HeaderName, HeaderValue, Method, StatusCode};
use std::fmt;
use url::Url;

/// A fully formed outgoing request.
#[derive(Debug)]
pub struct HttpRequest {
    /// HTTP method
    pub method: Method,

    /// Absolute request URL
    pub url: Url,

    /// Request headers (case-insensitive names)
    pub headers: HeaderMap,

    /// Request body
    pub body: Body,
}

impl HttpRequest {
    /// Create a request with no headers and an empty body.
    pub fn new(method: Method, url: Url) -> Self {
        Self {
            method,
            url,
            headers: HeaderMap::new(),
            body: Body::empty(),
        }
    }

    /// Set a header, replacing any previous value for the same name.
    pub fn with_header(mut self, name: HeaderName, value: HeaderValue) -> Self {
        self.headers.insert(name, value);
        self
    }

    /// Set the request body.
    pub fn with_body(mut self, body: impl Into<Body>) -> Self {
        self.body = body.into();
        self
    }

    /// Copy the request if its body is buffered.
    pub fn try_clone(&self) -> Option<Self> {
        Some(Self {
            method: self.method.clone(),
            url: self.url.clone(),
            headers: self.headers.clone(),
            body: self.body.try_clone()?,
        })
    }
}

/// A response received from the server.
#[derive(Debug)]
pub struct HttpResponse {
    /// HTTP status code
    pub status: StatusCode,

    /// Response headers
    pub headers: HeaderMap,

    /// Response body, possibly still streaming
    pub body: Body,
}

impl HttpResponse {
    /// Create a new HTTP response
    pub fn new(status: StatusCode, headers: HeaderMap, body: impl Into<Body>) -> Self {
        Self {
            status,
            headers,
            body: body.into(),
        }
    }

    /// Check if response is successful (2xx)
    pub fn is_success(&self) -> bool {
        self.status.is_success()
    }

    /// Check if response is an error (4xx or 5xx)
    pub fn is_error(&self) -> bool {
        self.status.as_u16() >= 400
    }

    /// Get a header value by name (case-insensitive)
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.get(name).and_then(|v| v.to_str().ok())
    }

    /// Consume the response, collecting the body.
    pub async fn bytes(self) -> Result<Bytes> {
        self.body.into_bytes().await
    }

    /// Consume the response, decoding the body as UTF-8.
    pub async fn text(self) -> Result<String> {
        let bytes = self.bytes().await?;
        String::from_utf8(bytes.to_vec())
            .map_err(|e| TransportError::Body(format!("response body is not UTF-8: {}", e)))
    }
}

/// The primitive that performs one exchange with the network.
///
/// Implementations must honor the context: give up with
/// [`TransportError::Cancelled`] or [`TransportError::Timeout`] when it says
/// so. Callers make no assumption about internal pooling or retries.
#[async_trait]
pub trait Transport: Send + Sync + fmt::Debug {
    /// Send a request and receive a response.
    async fn send(&self, request: HttpRequest, ctx: &RequestContext) -> Result<HttpResponse>;
}
