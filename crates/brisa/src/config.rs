//! Configuration for the brisa client
//!
//! Configuration is assembled from an ordered list of [`ClientOption`] steps.
//! [`ClientConfigBuilder::build`] starts from defaults and applies each step
//! in order: later steps override earlier ones for single values and merge
//! into the default headers.
//!
//! A step that cannot be honored (a zero timeout, a base URL without a host,
//! a malformed header) is skipped and the default is kept. `build` never
//! fails; it reports rejected steps at warn level through the configured
//! logger and keeps them in [`ClientConfig::rejected_options`].
//! [`ClientConfigBuilder::try_build`] turns them into an error instead.

use crate::error::{Error, Result};
use brisa_core::fields;
use brisa_core::logger::{Logger, NoopLogger};
use brisa_core::retry::{BackoffStrategy, ExponentialBackoff};
use brisa_transport::Transport;
use http::{HeaderMap, HeaderName, HeaderValue, StatusCode};
use reqwest::cookie::Jar;
use std::collections::BTreeSet;
use std::fmt;
use std::sync::Arc;
use std::time::Duration;
use url::Url;

/// Default timeout for a whole call, retries included.
pub const DEFAULT_TIMEOUT: Duration = Duration::from_secs(10);

/// Default number of retries after the first attempt.
pub const DEFAULT_RETRY_ATTEMPTS: u32 = 3;

/// User-Agent sent unless overridden.
pub const DEFAULT_USER_AGENT: &str =
    "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36";

/// One configuration step.
#[derive(Debug, Clone)]
#[non_exhaustive]
pub enum ClientOption {
    /// Timeout for a whole call. Zero is rejected.
    Timeout(Duration),
    /// Absolute base URL for relative targets. Empty strings are ignored.
    BaseUrl(String),
    /// Retries after the first attempt.
    RetryAttempts(u32),
    /// Headers merged into the defaults; same names are replaced.
    Headers(Vec<(String, String)>),
    /// Response statuses that trigger a retry.
    RetryStatuses(Vec<u16>),
    /// Delay between attempts.
    Backoff(Arc<dyn BackoffStrategy>),
    /// Sink for debug records and rejected options.
    Logger(Arc<dyn Logger>),
    /// Cookie store shared across requests.
    CookieStore(Arc<Jar>),
    /// Log every request and response.
    Debug(bool),
    /// Replaces the whole pipeline; no headers, retries or logging apply.
    Executor(Arc<dyn Transport>),
    /// Replaces the raw network transport under the chain.
    Transport(Arc<dyn Transport>),
}

impl ClientOption {
    /// Short name used when reporting the option.
    pub fn name(&self) -> &'static str {
        match self {
            ClientOption::Timeout(_) => "timeout",
            ClientOption::BaseUrl(_) => "base_url",
            ClientOption::RetryAttempts(_) => "retry_attempts",
            ClientOption::Headers(_) => "headers",
            ClientOption::RetryStatuses(_) => "retry_statuses",
            ClientOption::Backoff(_) => "backoff",
            ClientOption::Logger(_) => "logger",
            ClientOption::CookieStore(_) => "cookie_store",
            ClientOption::Debug(_) => "debug",
            ClientOption::Executor(_) => "executor",
            ClientOption::Transport(_) => "transport",
        }
    }
}

/// An option that was skipped during build.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RejectedOption {
    /// Option name, as in [`ClientOption::name`]
    pub option: &'static str,
    /// The offending input
    pub value: String,
    /// Why it was rejected
    pub reason: String,
}

impl fmt::Display for RejectedOption {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} {:?}: {}", self.option, self.value, self.reason)
    }
}

/// Finalized client configuration.
///
/// Immutable once built; every request the client issues reads from the same
/// snapshot.
#[derive(Debug, Clone)]
pub struct ClientConfig {
    base_url: Option<Url>,
    timeout: Duration,
    retry_attempts: u32,
    retry_statuses: BTreeSet<StatusCode>,
    backoff: Arc<dyn BackoffStrategy>,
    default_headers: HeaderMap,
    cookie_store: Option<Arc<Jar>>,
    logger: Arc<dyn Logger>,
    debug: bool,
    executor: Option<Arc<dyn Transport>>,
    transport: Option<Arc<dyn Transport>>,
    rejected: Vec<RejectedOption>,
}

impl Default for ClientConfig {
    fn default() -> Self {
        let mut default_headers = HeaderMap::new();
        default_headers.insert(
            http::header::USER_AGENT,
            HeaderValue::from_static(DEFAULT_USER_AGENT),
        );

        Self {
            base_url: None,
            timeout: DEFAULT_TIMEOUT,
            retry_attempts: DEFAULT_RETRY_ATTEMPTS,
            retry_statuses: BTreeSet::new(),
            backoff: Arc::new(ExponentialBackoff::default()),
            default_headers,
            cookie_store: None,
            logger: Arc::new(NoopLogger),
            debug: false,
            executor: None,
            transport: None,
            rejected: Vec::new(),
        }
    }
}

impl ClientConfig {
    /// Create a new builder.
    pub fn builder() -> ClientConfigBuilder {
        ClientConfigBuilder::new()
    }

    /// Base URL for relative targets, without a trailing path slash.
    pub fn base_url(&self) -> Option<&Url> {
        self.base_url.as_ref()
    }

    /// Timeout for a whole call.
    pub fn timeout(&self) -> Duration {
        self.timeout
    }

    /// Retries after the first attempt.
    pub fn retry_attempts(&self) -> u32 {
        self.retry_attempts
    }

    /// Response statuses that trigger a retry.
    pub fn retry_statuses(&self) -> &BTreeSet<StatusCode> {
        &self.retry_statuses
    }

    /// Delay between attempts.
    pub fn backoff(&self) -> &Arc<dyn BackoffStrategy> {
        &self.backoff
    }

    /// Headers added to every request that does not set them.
    pub fn default_headers(&self) -> &HeaderMap {
        &self.default_headers
    }

    /// Shared cookie store, if any.
    pub fn cookie_store(&self) -> Option<&Arc<Jar>> {
        self.cookie_store.as_ref()
    }

    /// Sink for debug records and rejected options.
    pub fn logger(&self) -> &Arc<dyn Logger> {
        &self.logger
    }

    /// Whether requests and responses are logged.
    pub fn debug(&self) -> bool {
        self.debug
    }

    /// Full pipeline override.
    pub fn executor(&self) -> Option<&Arc<dyn Transport>> {
        self.executor.as_ref()
    }

    /// Raw transport override.
    pub fn transport(&self) -> Option<&Arc<dyn Transport>> {
        self.transport.as_ref()
    }

    /// Options skipped during build.
    pub fn rejected_options(&self) -> &[RejectedOption] {
        &self.rejected
    }

    fn reject(&mut self, option: &'static str, value: impl Into<String>, reason: impl Into<String>) {
        self.rejected.push(RejectedOption {
            option,
            value: value.into(),
            reason: reason.into(),
        });
    }

    fn apply(&mut self, option: ClientOption) {
        let name = option.name();
        match option {
            ClientOption::Timeout(timeout) => {
                if timeout.is_zero() {
                    self.reject(name, format!("{:?}", timeout), "timeout must be positive");
                } else {
                    self.timeout = timeout;
                }
            }
            ClientOption::BaseUrl(raw) => {
                let trimmed = raw.trim();
                if trimmed.is_empty() {
                    return;
                }
                match parse_base_url(trimmed) {
                    Ok(url) => self.base_url = Some(url),
                    Err(reason) => self.reject(name, raw, reason),
                }
            }
            ClientOption::RetryAttempts(attempts) => self.retry_attempts = attempts,
            ClientOption::Headers(headers) => {
                for (key, value) in headers {
                    let Ok(header_name) = HeaderName::from_bytes(key.as_bytes()) else {
                        self.reject(name, key, "invalid header name");
                        continue;
                    };
                    let Ok(header_value) = HeaderValue::from_str(&value) else {
                        self.reject(name, key, "invalid header value");
                        continue;
                    };
                    self.default_headers.insert(header_name, header_value);
                }
            }
            ClientOption::RetryStatuses(codes) => {
                let mut statuses = BTreeSet::new();
                for code in codes {
                    match StatusCode::from_u16(code) {
                        Ok(status) => {
                            statuses.insert(status);
                        }
                        Err(_) => self.reject(name, code.to_string(), "not an HTTP status code"),
                    }
                }
                self.retry_statuses = statuses;
            }
            ClientOption::Backoff(backoff) => self.backoff = backoff,
            ClientOption::Logger(logger) => self.logger = logger,
            ClientOption::CookieStore(jar) => self.cookie_store = Some(jar),
            ClientOption::Debug(debug) => self.debug = debug,
            ClientOption::Executor(executor) => self.executor = Some(executor),
            ClientOption::Transport(transport) => self.transport = Some(transport),
        }
    }
}

/// Parse an absolute base URL and strip trailing path slashes.
fn parse_base_url(raw: &str) -> std::result::Result<Url, String> {
    let mut url = Url::parse(raw).map_err(|e| e.to_string())?;
    if !url.has_host() {
        return Err("base URL needs a scheme and a host".to_string());
    }
    let path = url.path().trim_end_matches('/').to_string();
    url.set_path(&path);
    Ok(url)
}

/// Builder for creating ClientConfig with a fluent API.
///
/// ```rust
/// use brisa::ClientConfig;
/// use std::time::Duration;
///
/// let config = ClientConfig::builder()
///     .base_url("https://portal.example.gov.br/nfce/")
///     .timeout(Duration::from_secs(30))
///     .retry_attempts(2)
///     .header("Accept-Language", "pt-BR")
///     .build();
///
/// assert_eq!(config.base_url().unwrap().as_str(), "https://portal.example.gov.br/nfce");
/// assert!(config.rejected_options().is_empty());
/// ```
#[derive(Debug, Clone, Default)]
pub struct ClientConfigBuilder {
    options: Vec<ClientOption>,
    rejected: Vec<RejectedOption>,
}

impl ClientConfigBuilder {
    /// Create a new builder.
    pub fn new() -> Self {
        Self::default()
    }

    /// Seed a builder from the environment.
    ///
    /// Loads a `.env` file first if one exists, then reads:
    /// - `BRISA_BASE_URL` for the base URL
    /// - `BRISA_TIMEOUT_SECS` for the call timeout (in seconds)
    /// - `BRISA_RETRY_ATTEMPTS` for the retry count
    /// - `BRISA_DEBUG` (`1`/`true`/`yes` or `0`/`false`/`no`) for debug logging
    ///
    /// Unparseable values are reported like any other rejected option.
    #[cfg(feature = "env")]
    pub fn from_env() -> Self {
        use std::env;

        // A missing .env file is not an error.
        let _ = dotenvy::dotenv();

        let mut builder = Self::new();

        if let Ok(base_url) = env::var("BRISA_BASE_URL") {
            builder = builder.base_url(base_url);
        }

        if let Ok(raw) = env::var("BRISA_TIMEOUT_SECS") {
            match raw.trim().parse::<u64>() {
                Ok(secs) => builder = builder.timeout(Duration::from_secs(secs)),
                Err(_) => builder.reject("timeout", raw, "BRISA_TIMEOUT_SECS is not a number of seconds"),
            }
        }

        if let Ok(raw) = env::var("BRISA_RETRY_ATTEMPTS") {
            match raw.trim().parse::<u32>() {
                Ok(attempts) => builder = builder.retry_attempts(attempts),
                Err(_) => builder.reject(
                    "retry_attempts",
                    raw,
                    "BRISA_RETRY_ATTEMPTS is not a non-negative integer",
                ),
            }
        }

        if let Ok(raw) = env::var("BRISA_DEBUG") {
            match raw.trim().to_ascii_lowercase().as_str() {
                "1" | "true" | "yes" | "on" => builder = builder.debug(true),
                "" | "0" | "false" | "no" | "off" => builder = builder.debug(false),
                _ => builder.reject("debug", raw, "BRISA_DEBUG is not a boolean"),
            }
        }

        builder
    }

    /// Append a configuration step.
    pub fn option(mut self, option: ClientOption) -> Self {
        self.options.push(option);
        self
    }

    /// Steps recorded so far, in order.
    pub fn options(&self) -> &[ClientOption] {
        &self.options
    }

    /// Set the timeout for a whole call, retries included.
    pub fn timeout(self, timeout: Duration) -> Self {
        self.option(ClientOption::Timeout(timeout))
    }

    /// Set the base URL for relative targets.
    pub fn base_url(self, base_url: impl Into<String>) -> Self {
        self.option(ClientOption::BaseUrl(base_url.into()))
    }

    /// Set the number of retries after the first attempt.
    pub fn retry_attempts(self, attempts: u32) -> Self {
        self.option(ClientOption::RetryAttempts(attempts))
    }

    /// Merge headers into the defaults.
    pub fn headers<I, K, V>(self, headers: I) -> Self
    where
        I: IntoIterator<Item = (K, V)>,
        K: Into<String>,
        V: Into<String>,
    {
        let headers = headers
            .into_iter()
            .map(|(k, v)| (k.into(), v.into()))
            .collect();
        self.option(ClientOption::Headers(headers))
    }

    /// Add one default header.
    pub fn header(self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.option(ClientOption::Headers(vec![(name.into(), value.into())]))
    }

    /// Retry responses with these statuses.
    pub fn retry_statuses(self, statuses: impl IntoIterator<Item = u16>) -> Self {
        self.option(ClientOption::RetryStatuses(statuses.into_iter().collect()))
    }

    /// Set the delay strategy between attempts.
    pub fn backoff(self, backoff: impl BackoffStrategy + 'static) -> Self {
        self.option(ClientOption::Backoff(Arc::new(backoff)))
    }

    /// Set the logger.
    pub fn logger(self, logger: Arc<dyn Logger>) -> Self {
        self.option(ClientOption::Logger(logger))
    }

    /// Share a cookie store across requests.
    pub fn cookie_store(self, jar: Arc<Jar>) -> Self {
        self.option(ClientOption::CookieStore(jar))
    }

    /// Log every request and response through the logger.
    pub fn debug(self, debug: bool) -> Self {
        self.option(ClientOption::Debug(debug))
    }

    /// Replace the whole pipeline with `executor`.
    pub fn executor(self, executor: Arc<dyn Transport>) -> Self {
        self.option(ClientOption::Executor(executor))
    }

    /// Replace the raw network transport under the chain.
    pub fn transport(self, transport: Arc<dyn Transport>) -> Self {
        self.option(ClientOption::Transport(transport))
    }

    #[cfg(feature = "env")]
    fn reject(&mut self, option: &'static str, value: String, reason: &str) {
        self.rejected.push(RejectedOption {
            option,
            value,
            reason: reason.to_string(),
        });
    }

    fn assemble(self) -> ClientConfig {
        let mut config = ClientConfig {
            rejected: self.rejected,
            ..ClientConfig::default()
        };
        for option in self.options {
            config.apply(option);
        }
        config
    }

    /// Build the configuration, skipping options that cannot be honored.
    pub fn build(self) -> ClientConfig {
        let config = self.assemble();
        for rejected in &config.rejected {
            config.logger.warn(
                "client option rejected",
                &fields! {
                    "option" => rejected.option,
                    "value" => rejected.value.as_str(),
                    "reason" => rejected.reason.as_str(),
                },
            );
        }
        config
    }

    /// Build the configuration, failing if any option was rejected.
    pub fn try_build(self) -> Result<ClientConfig> {
        let config = self.assemble();
        if config.rejected.is_empty() {
            return Ok(config);
        }
        let rejected: Vec<String> = config.rejected.iter().map(ToString::to_string).collect();
        Err(Error::Configuration(format!(
            "rejected client options: {}",
            rejected.join("; ")
        )))
    }

    /// Build the configuration and a client from it.
    pub fn build_client(self) -> Result<crate::Client> {
        crate::Client::from_config(self.build())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use brisa_core::logger::{Level, MemoryLogger};
    use brisa_core::retry::NoBackoff;

    #[test]
    fn test_default_config() {
        let config = ClientConfig::default();
        assert_eq!(config.timeout(), Duration::from_secs(10));
        assert_eq!(config.retry_attempts(), 3);
        assert!(config.base_url().is_none());
        assert!(config.retry_statuses().is_empty());
        assert!(!config.debug());
        assert!(config.cookie_store().is_none());
        assert!(config.executor().is_none());
        assert_eq!(
            config.default_headers()["user-agent"],
            "Mozilla/5.0 (Windows NT 10.0; Win64; x64) AppleWebKit/537.36"
        );
    }

    #[test]
    fn test_config_builder() {
        let config = ClientConfig::builder()
            .base_url("https://example.com/api/")
            .timeout(Duration::from_secs(30))
            .retry_attempts(5)
            .retry_statuses([502, 503])
            .backoff(NoBackoff)
            .debug(true)
            .build();

        assert_eq!(config.base_url().unwrap().as_str(), "https://example.com/api");
        assert_eq!(config.timeout(), Duration::from_secs(30));
        assert_eq!(config.retry_attempts(), 5);
        assert!(config.retry_statuses().contains(&StatusCode::BAD_GATEWAY));
        assert_eq!(config.retry_statuses().len(), 2);
        assert!(config.debug());
        assert!(config.rejected_options().is_empty());
    }

    #[test]
    fn test_later_options_win() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(5))
            .retry_attempts(1)
            .timeout(Duration::from_secs(7))
            .retry_attempts(0)
            .build();

        assert_eq!(config.timeout(), Duration::from_secs(7));
        assert_eq!(config.retry_attempts(), 0);
    }

    #[test]
    fn test_zero_timeout_is_rejected() {
        let config = ClientConfig::builder()
            .timeout(Duration::from_secs(3))
            .timeout(Duration::ZERO)
            .build();

        assert_eq!(config.timeout(), Duration::from_secs(3));
        assert_eq!(config.rejected_options().len(), 1);
        assert_eq!(config.rejected_options()[0].option, "timeout");
    }

    #[test]
    fn test_invalid_base_url_is_ignored() {
        for bad in ["not a url", "example.com/api", "mailto:someone@example.com"] {
            let config = ClientConfig::builder()
                .base_url("https://good.example.com")
                .base_url(bad)
                .build();

            assert_eq!(
                config.base_url().unwrap().as_str(),
                "https://good.example.com/",
                "{bad}"
            );
            assert_eq!(config.rejected_options()[0].option, "base_url");
        }
    }

    #[test]
    fn test_empty_base_url_is_ignored_silently() {
        let config = ClientConfig::builder().base_url("").build();
        assert!(config.base_url().is_none());
        assert!(config.rejected_options().is_empty());
    }

    #[test]
    fn test_base_url_trailing_slashes_are_trimmed() {
        let config = ClientConfig::builder()
            .base_url("http://x/api//")
            .build();
        assert_eq!(config.base_url().unwrap().path(), "/api");
    }

    #[test]
    fn test_headers_merge_and_override() {
        let config = ClientConfig::builder()
            .headers([("Accept", "text/html"), ("User-Agent", "brisa/0.1")])
            .header("accept", "application/xhtml+xml")
            .build();

        let headers = config.default_headers();
        assert_eq!(headers.len(), 2);
        assert_eq!(headers["user-agent"], "brisa/0.1");
        assert_eq!(headers["accept"], "application/xhtml+xml");
    }

    #[test]
    fn test_same_headers_twice_is_idempotent() {
        let headers = [("Accept-Language", "pt-BR"), ("X-Portal", "sefaz")];
        let once = ClientConfig::builder().headers(headers).build();
        let twice = ClientConfig::builder()
            .headers(headers)
            .headers(headers)
            .build();

        assert_eq!(once.default_headers(), twice.default_headers());
    }

    #[test]
    fn test_invalid_headers_rejected_individually() {
        let config = ClientConfig::builder()
            .headers([("bad name", "x"), ("X-Ok", "fine"), ("X-Bad-Value", "a\nb")])
            .build();

        assert_eq!(config.default_headers()["x-ok"], "fine");
        assert!(config.default_headers().get("x-bad-value").is_none());
        assert_eq!(config.rejected_options().len(), 2);
    }

    #[test]
    fn test_invalid_retry_status_is_rejected() {
        let config = ClientConfig::builder().retry_statuses([503, 42]).build();
        assert_eq!(config.retry_statuses().len(), 1);
        assert_eq!(config.rejected_options()[0].value, "42");
    }

    #[test]
    fn test_rejections_logged_through_final_logger() {
        let early = Arc::new(MemoryLogger::new());
        let late = Arc::new(MemoryLogger::new());

        let _config = ClientConfig::builder()
            .logger(early.clone())
            .base_url("nope")
            .logger(late.clone())
            .build();

        assert!(early.is_empty());
        let records = late.records();
        assert_eq!(records.len(), 1);
        assert_eq!(records[0].level, Level::Warn);
        assert_eq!(records[0].field_str("option"), Some("base_url"));
        assert_eq!(records[0].field_str("value"), Some("nope"));
    }

    #[test]
    fn test_try_build_reports_rejections() {
        let err = ClientConfig::builder()
            .timeout(Duration::ZERO)
            .base_url("nope")
            .try_build()
            .unwrap_err();

        assert!(err.is_configuration());
        let message = err.to_string();
        assert!(message.contains("timeout"));
        assert!(message.contains("base_url"));

        assert!(ClientConfig::builder().retry_attempts(1).try_build().is_ok());
    }

    #[test]
    fn test_option_list_is_recorded_in_order() {
        let builder = ClientConfig::builder()
            .debug(true)
            .option(ClientOption::RetryAttempts(2))
            .timeout(Duration::from_secs(1));

        let names: Vec<_> = builder.options().iter().map(ClientOption::name).collect();
        assert_eq!(names, vec!["debug", "retry_attempts", "timeout"]);
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_variables() {
        temp_env::with_vars(
            [
                ("BRISA_BASE_URL", Some("https://env.example.com/api/")),
                ("BRISA_TIMEOUT_SECS", Some("45")),
                ("BRISA_RETRY_ATTEMPTS", Some("1")),
                ("BRISA_DEBUG", Some("true")),
            ],
            || {
                let config = ClientConfigBuilder::from_env().build();
                assert_eq!(
                    config.base_url().unwrap().as_str(),
                    "https://env.example.com/api"
                );
                assert_eq!(config.timeout(), Duration::from_secs(45));
                assert_eq!(config.retry_attempts(), 1);
                assert!(config.debug());
                assert!(config.rejected_options().is_empty());
            },
        );
    }

    #[cfg(feature = "env")]
    #[test]
    fn test_config_from_env_rejects_garbage() {
        temp_env::with_vars(
            [
                ("BRISA_BASE_URL", None),
                ("BRISA_TIMEOUT_SECS", Some("soon")),
                ("BRISA_RETRY_ATTEMPTS", Some("-1")),
                ("BRISA_DEBUG", Some("maybe")),
            ],
            || {
                let config = ClientConfigBuilder::from_env().build();
                assert_eq!(config.timeout(), DEFAULT_TIMEOUT);
                assert_eq!(config.retry_attempts(), DEFAULT_RETRY_ATTEMPTS);
                assert!(!config.debug());

                let names: Vec<_> = config.rejected_options().iter().map(|r| r.option).collect();
                assert_eq!(names, vec!["timeout", "retry_attempts", "debug"]);
            },
        );
    }
}
