use axum::http::HeaderMap;

use whs_core::RequestId;

/// Per-request context derived from the incoming headers.
///
/// Immutable; inserted by `middleware::request_context` for every route.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RequestContext {
    request_id: RequestId,
    origin: Option<String>,
}

impl RequestContext {
    pub fn new(request_id: RequestId, origin: Option<String>) -> Self {
        Self { request_id, origin }
    }

    /// Build from proxy headers: the origin is `{x-forwarded-proto}://{host}`
    /// and only known when both headers are present.
    pub fn from_headers(headers: &HeaderMap) -> Self {
        let header = |name: &str| {
            headers
                .get(name)
                .and_then(|v| v.to_str().ok())
                .map(str::trim)
                .filter(|v| !v.is_empty())
        };

        let origin = match (header("x-forwarded-proto"), header("host")) {
            (Some(proto), Some(host)) => Some(format!("{proto}://{host}")),
            _ => None,
        };

        Self::new(RequestId::new(), origin)
    }

    pub fn request_id(&self) -> RequestId {
        self.request_id
    }

    pub fn origin(&self) -> Option<&str> {
        self.origin.as_deref()
    }
}
