//! Common test utilities and helpers

use async_trait::async_trait;
use brisa::{HttpRequest, HttpResponse, RequestContext, Transport, TransportError};
use http::{HeaderMap, StatusCode};
use std::sync::Mutex;
use std::sync::atomic::{AtomicUsize, Ordering};

/// Route client diagnostics to the test output. Set `RUST_LOG=brisa=debug`
/// to see them.
#[allow(dead_code)]
pub fn init_tracing() {
    let _ = tracing_subscriber::fmt()
        .with_env_filter(tracing_subscriber::EnvFilter::from_default_env())
        .with_test_writer()
        .try_init();
}

/// What the fake transport does on every call.
#[allow(dead_code)]
#[derive(Debug, Clone, Copy)]
pub enum Behavior {
    /// Answer with this status and an empty body.
    Status(u16),
    /// Fail as if the connection was refused.
    Refuse,
}

/// A transport that counts calls and remembers request URLs.
#[derive(Debug)]
pub struct FakeTransport {
    behavior: Behavior,
    calls: AtomicUsize,
    urls: Mutex<Vec<String>>,
}

#[allow(dead_code)]
impl FakeTransport {
    pub fn new(behavior: Behavior) -> Self {
        Self {
            behavior,
            calls: AtomicUsize::new(0),
            urls: Mutex::new(Vec::new()),
        }
    }

    pub fn calls(&self) -> usize {
        self.calls.load(Ordering::SeqCst)
    }

    pub fn urls(&self) -> Vec<String> {
        self.urls.lock().unwrap().clone()
    }
}

#[async_trait]
impl Transport for FakeTransport {
    async fn send(
        &self,
        request: HttpRequest,
        ctx: &RequestContext,
    ) -> Result<HttpResponse, TransportError> {
        ctx.check()?;
        self.calls.fetch_add(1, Ordering::SeqCst);
        self.urls.lock().unwrap().push(request.url.to_string());
        match self.behavior {
            Behavior::Status(code) => Ok(HttpResponse::new(
                StatusCode::from_u16(code).unwrap(),
                HeaderMap::new(),
                "",
            )),
            Behavior::Refuse => Err(TransportError::Connection("connection refused".into())),
        }
    }
}
