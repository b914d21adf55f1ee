//! Request ID context for log and error correlation.
//!
//! The ID itself is assigned by `tower_http`'s `SetRequestIdLayer`; this
//! middleware copies it into the tracing span and the Sentry scope.

use axum::{extract::Request, middleware::Next, response::Response};
use tracing::Span;

/// The HTTP header name for request IDs.
pub const REQUEST_ID_HEADER: &str = "x-request-id";

pub async fn request_id_middleware(request: Request, next: Next) -> Response {
    if let Some(request_id) = request
        .headers()
        .get(REQUEST_ID_HEADER)
        .and_then(|h| h.to_str().ok())
    {
        Span::current().record("request_id", request_id);
        sentry::configure_scope(|scope| {
            scope.set_tag("request_id", request_id);
        });
    }

    next.run(request).await
}
