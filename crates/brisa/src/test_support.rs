//! Scripted transport for unit tests.

use async_trait::async_trait;
use brisa_transport::{
    Body, HttpRequest, HttpResponse, RequestContext, Result, Transport, TransportError,
};
use bytes::Bytes;
use http::{HeaderMap, Method, StatusCode};
use std::fmt;
use std::sync::Mutex;
use url::Url;

type Responder = Box<dyn Fn(usize) -> Result<HttpResponse> + Send + Sync>;

/// A request as the transport saw it, body buffered.
#[derive(Debug, Clone)]
pub(crate) struct Seen {
    pub method: Method,
    pub url: Url,
    pub headers: HeaderMap,
    pub body: Bytes,
}

/// Answers each call from a closure of the call index.
pub(crate) struct MockTransport {
    responder: Responder,
    seen: Mutex<Vec<Seen>>,
}

impl MockTransport {
    pub fn new(responder: impl Fn(usize) -> Result<HttpResponse> + Send + Sync + 'static) -> Self {
        Self {
            responder: Box::new(responder),
            seen: Mutex::new(Vec::new()),
        }
    }

    pub fn ok() -> Self {
        Self::status(200, "ok")
    }

    pub fn status(status: u16, body: &'static str) -> Self {
        Self::new(move |_| Ok(response(status, body)))
    }

    pub fn failing() -> Self {
        Self::new(|_| Err(TransportError::Connection("connection refused".into())))
    }

    pub fn calls(&self) -> usize {
        self.seen.lock().unwrap().len()
    }

    pub fn seen(&self) -> Vec<Seen> {
        self.seen.lock().unwrap().clone()
    }
}

impl fmt::Debug for MockTransport {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("MockTransport")
            .field("calls", &self.calls())
            .finish()
    }
}

#[async_trait]
impl Transport for MockTransport {
    async fn send(&self, mut request: HttpRequest, ctx: &RequestContext) -> Result<HttpResponse> {
        ctx.check()?;
        let body = request.body.buffer().await?;
        let index = {
            let mut seen = self.seen.lock().unwrap();
            seen.push(Seen {
                method: request.method,
                url: request.url,
                headers: request.headers,
                body,
            });
            seen.len() - 1
        };
        (self.responder)(index)
    }
}

pub(crate) fn response(status: u16, body: &'static str) -> HttpResponse {
    HttpResponse::new(
        StatusCode::from_u16(status).unwrap(),
        HeaderMap::new(),
        Body::from(body),
    )
}

pub(crate) fn get(url: &str) -> HttpRequest {
    HttpRequest::new(Method::GET, Url::parse(url).unwrap())
}
