//! Main client implementation

use std::sync::{Arc, OnceLock};

use brisa_transport::{
    HttpRequest, HttpResponse, HttpTransport, HttpTransportConfig, RequestContext, Transport,
};
use http::Method;
use url::Url;

use crate::{
    config::{ClientConfig, ClientConfigBuilder},
    error::{Error, Result},
    http::{
        Chain, HeadersMiddleware, LoggingMiddleware, Middleware, RequestOptions, RetryMiddleware,
        resolve::{merge_query, resolve_url},
    },
};

/// HTTP client with a base URL, default headers, retries and debug logging.
///
/// Cloning is cheap: clones share the configuration, the transport chain and
/// the connection pool.
///
/// # Example
///
/// ```rust,no_run
/// use brisa::{Client, RequestContext, RequestOptions};
///
/// # async fn example() -> brisa::Result<()> {
/// let client = Client::builder()
///     .base_url("https://portal.example.gov.br/nfce")
///     .build_client()?;
///
/// let ctx = RequestContext::new();
/// let options = RequestOptions::new().query("p", "3524...|2|1|1|ABCD");
/// let page = client.get(&ctx, "/consulta", Some(options)).await?;
/// println!("{}", page.text().await?);
/// # Ok(())
/// # }
/// ```
#[derive(Clone, Debug)]
pub struct Client {
    inner: Arc<ClientInner>,
}

#[derive(Debug)]
struct ClientInner {
    config: ClientConfig,
    /// The chain, or the custom executor that replaces it.
    executor: Arc<dyn Transport>,
}

impl Client {
    /// Create a client with the default configuration.
    pub fn new() -> Result<Self> {
        Self::from_config(ClientConfig::default())
    }

    /// Create a new client builder for advanced configuration.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Create a client from a configuration object.
    ///
    /// # Errors
    ///
    /// Returns [`Error::Configuration`] if the default network transport
    /// cannot be initialized.
    pub fn from_config(config: ClientConfig) -> Result<Self> {
        let executor: Arc<dyn Transport> = match config.executor() {
            Some(executor) => executor.clone(),
            None => Arc::new(build_chain(&config)?),
        };

        tracing::debug!(
            base_url = config.base_url().map(Url::as_str),
            timeout = ?config.timeout(),
            retry_attempts = config.retry_attempts(),
            debug = config.debug(),
            custom_executor = config.executor().is_some(),
            "client created"
        );

        Ok(Self {
            inner: Arc::new(ClientInner { config, executor }),
        })
    }

    /// The configuration this client was built from.
    pub fn config(&self) -> &ClientConfig {
        &self.inner.config
    }

    /// Send a GET request.
    pub async fn get(
        &self,
        ctx: &RequestContext,
        target: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse> {
        self.execute(ctx, Method::GET, target, options).await
    }

    /// Send a POST request. The body goes in `options`.
    pub async fn post(
        &self,
        ctx: &RequestContext,
        target: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse> {
        self.execute(ctx, Method::POST, target, options).await
    }

    /// Send a PUT request.
    pub async fn put(
        &self,
        ctx: &RequestContext,
        target: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse> {
        self.execute(ctx, Method::PUT, target, options).await
    }

    /// Send a DELETE request.
    pub async fn delete(
        &self,
        ctx: &RequestContext,
        target: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse> {
        self.execute(ctx, Method::DELETE, target, options).await
    }

    /// Send a HEAD request.
    pub async fn head(
        &self,
        ctx: &RequestContext,
        target: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse> {
        self.execute(ctx, Method::HEAD, target, options).await
    }

    /// Resolve `target`, send the request through the pipeline and classify
    /// the outcome.
    ///
    /// `target` is either an absolute URL or a path appended to the base
    /// URL. The call is bounded by the earlier of the context's deadline and
    /// the client's timeout; that bound covers every retry.
    ///
    /// # Errors
    ///
    /// - [`Error::Configuration`] if the target cannot be resolved or a
    ///   per-request header is invalid
    /// - [`Error::Network`] if the exchange failed after all retries
    /// - [`Error::HttpStatus`] if the server answered with 400 or above
    #[tracing::instrument(skip(self, ctx, method, options), fields(method = %method))]
    pub async fn execute(
        &self,
        ctx: &RequestContext,
        method: Method,
        target: &str,
        options: Option<RequestOptions>,
    ) -> Result<HttpResponse> {
        let config = &self.inner.config;
        let (query, body, headers) = options.unwrap_or_default().into_parts()?;

        let mut url = resolve_url(config.base_url(), target)?;
        merge_query(&mut url, &query);

        let mut request = HttpRequest::new(method, url);
        request.headers = headers;
        if let Some(body) = body {
            request.body = body;
        }

        let ctx = ctx.clone().with_timeout(config.timeout());
        let response = self.inner.executor.send(request, &ctx).await?;
        Error::classify(response)
    }
}

fn build_chain(config: &ClientConfig) -> Result<Chain> {
    let transport: Arc<dyn Transport> = match config.transport() {
        Some(transport) => transport.clone(),
        None => {
            let transport = HttpTransport::with_config(HttpTransportConfig {
                connect_timeout: config.timeout(),
                cookie_store: config.cookie_store().cloned(),
                ..Default::default()
            })
            .map_err(|e| {
                Error::Configuration(format!("failed to initialize HTTP transport: {}", e))
            })?;
            Arc::new(transport)
        }
    };

    let links: Vec<Arc<dyn Middleware>> = vec![
        Arc::new(HeadersMiddleware::new(config.default_headers().clone())),
        Arc::new(
            RetryMiddleware::new(config.retry_attempts())
                .with_statuses(config.retry_statuses().iter().copied())
                .with_backoff(config.backoff().clone()),
        ),
        Arc::new(LoggingMiddleware::new(
            config.logger().clone(),
            config.debug(),
        )),
    ];

    Ok(Chain::new(links, transport))
}

static DEFAULT_CLIENT: OnceLock<Client> = OnceLock::new();

/// The process-wide client with default configuration, built on first use.
pub fn default_client() -> Result<&'static Client> {
    if let Some(client) = DEFAULT_CLIENT.get() {
        return Ok(client);
    }
    let client = Client::new()?;
    Ok(DEFAULT_CLIENT.get_or_init(|| client))
}

/// GET an absolute URL with the default client.
pub async fn get(url: &str) -> Result<HttpResponse> {
    default_client()?
        .get(&RequestContext::new(), url, None)
        .await
}

/// POST `body` to an absolute URL with the default client.
pub async fn post(url: &str, body: impl Into<brisa_transport::Body>) -> Result<HttpResponse> {
    let options = RequestOptions::new().body(body);
    default_client()?
        .post(&RequestContext::new(), url, Some(options))
        .await
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::test_support::{MockTransport, response};
    use brisa_core::logger::MemoryLogger;
    use brisa_core::retry::NoBackoff;
    use brisa_transport::TransportError;
    use std::time::Duration;

    fn client_with(transport: Arc<MockTransport>) -> Client {
        Client::builder()
            .base_url("https://example.com/api")
            .backoff(NoBackoff)
            .transport(transport)
            .build_client()
            .unwrap()
    }

    #[tokio::test]
    async fn test_resolves_and_sorts_query() {
        let transport = Arc::new(MockTransport::ok());
        let client = client_with(transport.clone());

        let options = RequestOptions::new().query("page", 1).query("limit", 10);
        client
            .get(&RequestContext::new(), "/users", Some(options))
            .await
            .unwrap();

        let seen = &transport.seen()[0];
        assert_eq!(seen.method, Method::GET);
        assert_eq!(
            seen.url.as_str(),
            "https://example.com/api/users?limit=10&page=1"
        );
    }

    #[tokio::test]
    async fn test_default_user_agent_is_sent() {
        let transport = Arc::new(MockTransport::ok());
        client_with(transport.clone())
            .get(&RequestContext::new(), "", None)
            .await
            .unwrap();

        assert_eq!(
            transport.seen()[0].headers["user-agent"],
            crate::DEFAULT_USER_AGENT
        );
    }

    #[tokio::test]
    async fn test_per_request_header_overrides_default() {
        let transport = Arc::new(MockTransport::ok());
        let options = RequestOptions::new().header("USER-AGENT", "curl/8");
        client_with(transport.clone())
            .get(&RequestContext::new(), "/", Some(options))
            .await
            .unwrap();

        let seen = &transport.seen()[0];
        assert_eq!(seen.headers.get_all("user-agent").iter().count(), 1);
        assert_eq!(seen.headers["user-agent"], "curl/8");
    }

    #[tokio::test]
    async fn test_malformed_target_never_reaches_transport() {
        let transport = Arc::new(MockTransport::ok());
        let err = client_with(transport.clone())
            .get(&RequestContext::new(), ":%invalid", None)
            .await
            .unwrap_err();

        assert!(err.is_configuration());
        assert!(err.to_string().contains("invalid URL or path"));
        assert_eq!(transport.calls(), 0);
    }

    #[tokio::test]
    async fn test_relative_target_without_base_url() {
        let transport = Arc::new(MockTransport::ok());
        let client = Client::builder()
            .transport(transport.clone())
            .build_client()
            .unwrap();

        let err = client
            .get(&RequestContext::new(), "/users", None)
            .await
            .unwrap_err();
        assert!(err.is_configuration());

        client
            .get(&RequestContext::new(), "https://example.com/x", None)
            .await
            .unwrap();
        assert_eq!(transport.calls(), 1);
    }

    #[tokio::test]
    async fn test_retry_exhaustion_is_network_error() {
        let transport = Arc::new(MockTransport::failing());
        let err = client_with(transport.clone())
            .get(&RequestContext::new(), "/flaky", None)
            .await
            .unwrap_err();

        assert!(err.is_network());
        assert_eq!(transport.calls(), 4);
    }

    #[tokio::test]
    async fn test_not_found_single_attempt() {
        let transport = Arc::new(MockTransport::status(404, "not found"));
        let err = client_with(transport.clone())
            .get(&RequestContext::new(), "/missing", None)
            .await
            .unwrap_err();

        assert!(err.is_not_found());
        assert_eq!(transport.calls(), 1);
        let response = err.into_response().unwrap();
        assert_eq!(response.text().await.unwrap(), "not found");
    }

    #[tokio::test]
    async fn test_redirect_status_is_not_an_error() {
        let transport = Arc::new(MockTransport::status(302, ""));
        let response = client_with(transport)
            .get(&RequestContext::new(), "/moved", None)
            .await
            .unwrap();
        assert_eq!(response.status.as_u16(), 302);
    }

    #[tokio::test]
    async fn test_custom_executor_bypasses_chain() {
        let executor = Arc::new(MockTransport::ok());
        let logger = Arc::new(MemoryLogger::new());
        let client = Client::builder()
            .base_url("https://example.com")
            .debug(true)
            .logger(logger.clone())
            .executor(executor.clone())
            .build_client()
            .unwrap();

        client
            .post(
                &RequestContext::new(),
                "/form",
                Some(RequestOptions::new().body("a=1")),
            )
            .await
            .unwrap();

        let seen = &executor.seen()[0];
        assert_eq!(seen.method, Method::POST);
        assert_eq!(seen.body, "a=1");
        // No headers link, no logging link.
        assert!(seen.headers.get("user-agent").is_none());
        assert!(logger.is_empty());
    }

    #[tokio::test]
    async fn test_debug_logs_each_attempt() {
        let transport = Arc::new(MockTransport::new(|i| match i {
            0 => Err(TransportError::Connection("reset".into())),
            _ => Ok(response(200, "ok")),
        }));
        let logger = Arc::new(MemoryLogger::new());
        let client = Client::builder()
            .base_url("https://example.com")
            .backoff(NoBackoff)
            .debug(true)
            .logger(logger.clone())
            .transport(transport.clone())
            .build_client()
            .unwrap();

        client
            .get(&RequestContext::new(), "/", None)
            .await
            .unwrap();

        assert_eq!(transport.calls(), 2);
        let requests = logger.records_with_message("HTTP Request");
        assert_eq!(requests.len(), 2);
        assert!(requests[0].fields.contains_key("error"));
        assert!(requests[0].field_str("headers").unwrap().contains("user-agent: Mozilla"));
        assert_eq!(logger.records_with_message("HTTP Response").len(), 1);
    }

    #[tokio::test(start_paused = true)]
    async fn test_client_timeout_bounds_the_call() {
        let transport = Arc::new(MockTransport::failing());
        let client = Client::builder()
            .base_url("https://example.com")
            .timeout(Duration::from_millis(500))
            .retry_attempts(10)
            .transport(transport.clone())
            .build_client()
            .unwrap();

        let err = client
            .get(&RequestContext::new(), "/", None)
            .await
            .unwrap_err();

        assert!(err.is_timeout());
        assert!(transport.calls() < 11);
    }

    #[test]
    fn test_client_clone_shares_arc() {
        let client = Client::new().unwrap();
        let clone = client.clone();
        assert!(Arc::ptr_eq(&client.inner, &clone.inner));
    }

    #[test]
    fn test_default_client_is_shared() {
        let a = default_client().unwrap();
        let b = default_client().unwrap();
        assert!(std::ptr::eq(a, b));
        assert_eq!(a.config().timeout(), crate::DEFAULT_TIMEOUT);
    }
}
