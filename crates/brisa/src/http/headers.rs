//! Default header injection.

use super::middleware::{Middleware, Next};
use async_trait::async_trait;
use brisa_transport::{HttpRequest, HttpResponse, RequestContext, Result};
use http::HeaderMap;

/// Fills in default headers the request does not already carry.
///
/// Names compare case-insensitively, and a header set on the request always
/// wins over the default.
#[derive(Debug, Clone, Default)]
pub struct HeadersMiddleware {
    headers: HeaderMap,
}

impl HeadersMiddleware {
    /// Inject `headers` into every request.
    pub fn new(headers: HeaderMap) -> Self {
        Self { headers }
    }

    /// The headers being injected.
    pub fn headers(&self) -> &HeaderMap {
        &self.headers
    }
}

#[async_trait]
impl Middleware for HeadersMiddleware {
    async fn handle(
        &self,
        mut request: HttpRequest,
        ctx: &RequestContext,
        next: Next<'_>,
    ) -> Result<HttpResponse> {
        for name in self.headers.keys() {
            if request.headers.contains_key(name) {
                continue;
            }
            for value in self.headers.get_all(name) {
                request.headers.append(name.clone(), value.clone());
            }
        }
        next.run(request, ctx).await
    }
}
