//! reqwest-backed raw transport.

use crate::body::Body;
use crate::context::RequestContext;
use crate::error::{Result, TransportError};
use crate::traits::{HttpRequest, HttpResponse, Transport};
use async_trait::async_trait;
use reqwest::Client as ReqwestClient;
use reqwest::cookie::Jar;
use std::sync::Arc;
use std::time::Duration;

/// Terminal transport that performs the exchange with `reqwest`.
///
/// Handles:
/// - Connection pooling
/// - Cookie persistence (when a jar is configured)
/// - Context deadlines and cancellation
///
/// It performs exactly one exchange per call. Retries belong to the
/// middleware above it.
#[derive(Clone, Debug)]
pub struct HttpTransport {
    client: ReqwestClient,
}

impl HttpTransport {
    /// Create a new HTTP transport with default configuration
    pub fn new() -> Result<Self> {
        Self::with_config(HttpTransportConfig::default())
    }

    /// Create a new HTTP transport with custom configuration
    pub fn with_config(config: HttpTransportConfig) -> Result<Self> {
        let mut builder = ReqwestClient::builder()
            .connect_timeout(config.connect_timeout)
            .pool_max_idle_per_host(config.pool_max_idle_per_host);

        if let Some(jar) = config.cookie_store {
            builder = builder.cookie_provider(jar);
        }

        let client = builder
            .build()
            .map_err(|e| TransportError::Connection(e.to_string()))?;

        Ok(Self { client })
    }

    /// Wrap an already configured reqwest client.
    pub fn from_client(client: ReqwestClient) -> Self {
        Self { client }
    }

    /// Get a reference to the underlying reqwest client
    pub fn reqwest_client(&self) -> &ReqwestClient {
        &self.client
    }

    async fn try_send(&self, request: HttpRequest, ctx: &RequestContext) -> Result<HttpResponse> {
        let HttpRequest {
            method,
            url,
            headers,
            body,
        } = request;

        let mut req = self.client.request(method, url).headers(headers);

        if let Some(remaining) = ctx.remaining() {
            // reqwest's per-request timeout also covers reading the body.
            req = req.timeout(remaining);
        }

        if !body.is_empty() {
            req = req.body(body.into_bytes().await?);
        }

        let response = req.send().await?;

        let status = response.status();
        let headers = response.headers().clone();
        let body = Body::from_stream(response.bytes_stream());

        Ok(HttpResponse {
            status,
            headers,
            body,
        })
    }
}

#[async_trait]
impl Transport for HttpTransport {
    #[tracing::instrument(skip_all, fields(method = %request.method, url = %request.url))]
    async fn send(&self, request: HttpRequest, ctx: &RequestContext) -> Result<HttpResponse> {
        let result = ctx.run(self.try_send(request, ctx)).await;
        match &result {
            Ok(response) => tracing::debug!(status = %response.status, "exchange completed"),
            Err(err) => tracing::debug!(error = %err, "exchange failed"),
        }
        result
    }
}

/// HTTP transport configuration
#[derive(Clone, Debug)]
pub struct HttpTransportConfig {
    /// Connection timeout
    pub connect_timeout: Duration,

    /// Maximum idle connections per host
    pub pool_max_idle_per_host: usize,

    /// Shared cookie store; `None` disables cookie persistence
    pub cookie_store: Option<Arc<Jar>>,
}

impl Default for HttpTransportConfig {
    fn default() -> Self {
        Self {
            connect_timeout: Duration::from_secs(10),
            pool_max_idle_per_host: 10,
            cookie_store: None,
        }
    }
}
