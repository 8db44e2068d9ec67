//! Debug logging of requests and responses.

use super::middleware::{Middleware, Next};
use async_trait::async_trait;
use brisa_core::fields;
use brisa_core::logger::{Fields, Logger};
use brisa_transport::{HttpRequest, HttpResponse, RequestContext, Result};
use bytes::Bytes;
use http::HeaderMap;
use std::fmt::Write as _;
use std::sync::Arc;
use tokio::time::Instant;

/// Message of the record emitted for every executed request.
pub const REQUEST_MESSAGE: &str = "HTTP Request";

/// Message of the record emitted for every received response.
pub const RESPONSE_MESSAGE: &str = "HTTP Response";

/// Emits one debug record per request and one per response.
///
/// When disabled the link forwards untouched. When enabled, request and
/// response bodies are buffered so they can be logged and still be read
/// downstream. Buffering is bounded by the call's deadline and cancellation.
#[derive(Debug, Clone)]
pub struct LoggingMiddleware {
    logger: Arc<dyn Logger>,
    enabled: bool,
}

impl LoggingMiddleware {
    /// Log through `logger` when `enabled`.
    pub fn new(logger: Arc<dyn Logger>, enabled: bool) -> Self {
        Self { logger, enabled }
    }

    /// Whether records are emitted.
    pub fn is_enabled(&self) -> bool {
        self.enabled
    }
}

#[async_trait]
impl Middleware for LoggingMiddleware {
    async fn handle(
        &self,
        mut request: HttpRequest,
        ctx: &RequestContext,
        next: Next<'_>,
    ) -> Result<HttpResponse> {
        if !self.enabled {
            return next.run(request, ctx).await;
        }

        let start = Instant::now();
        let request_body = ctx.run(request.body.buffer()).await;
        let mut fields = fields! {
            "method" => request.method.as_str(),
            "url" => request.url.as_str(),
            "headers" => request_head(&request),
        };

        let request_body = match request_body {
            Ok(body) => body,
            Err(err) => {
                fields.insert("error".into(), err.to_string().into());
                fields.insert("duration".into(), format!("{:?}", start.elapsed()).into());
                self.logger.debug(REQUEST_MESSAGE, &fields);
                return Err(err);
            }
        };
        insert_body(&mut fields, &request_body);

        let result = next.run(request, ctx).await;

        fields.insert("duration".into(), format!("{:?}", start.elapsed()).into());
        if let Err(err) = &result {
            fields.insert("error".into(), err.to_string().into());
        }
        self.logger.debug(REQUEST_MESSAGE, &fields);

        let mut response = result?;
        let response_body = ctx.run(response.body.buffer()).await;

        let mut fields = fields! {
            "status" => response.status.to_string(),
            "headers" => response_head(&response),
        };
        match response_body {
            Ok(body) => {
                insert_body(&mut fields, &body);
                self.logger.debug(RESPONSE_MESSAGE, &fields);
                Ok(response)
            }
            Err(err) => {
                fields.insert("error".into(), err.to_string().into());
                self.logger.debug(RESPONSE_MESSAGE, &fields);
                Err(err)
            }
        }
    }
}

fn insert_body(fields: &mut Fields, body: &Bytes) {
    if !body.is_empty() {
        fields.insert(
            "body".into(),
            String::from_utf8_lossy(body).into_owned().into(),
        );
    }
}

/// Request line plus headers, the way they go out on the wire.
fn request_head(request: &HttpRequest) -> String {
    let mut target = request.url.path().to_string();
    if let Some(query) = request.url.query() {
        target.push('?');
        target.push_str(query);
    }

    let mut head = format!("{} {} HTTP/1.1\r\n", request.method, target);
    if let Some(host) = request.url.host_str() {
        match request.url.port() {
            Some(port) => {
                let _ = write!(head, "Host: {}:{}\r\n", host, port);
            }
            None => {
                let _ = write!(head, "Host: {}\r\n", host);
            }
        }
    }
    write_headers(&mut head, &request.headers);
    head
}

/// Status line plus headers.
fn response_head(response: &HttpResponse) -> String {
    let mut head = format!("HTTP/1.1 {}\r\n", response.status);
    write_headers(&mut head, &response.headers);
    head
}

fn write_headers(out: &mut String, headers: &HeaderMap) {
    for (name, value) in headers {
        let value = String::from_utf8_lossy(value.as_bytes());
        let _ = write!(out, "{}: {}\r\n", name, value);
    }
    out.push_str("\r\n");
}
