//! HTTP middleware stack for the widget.
//!
//! # Middleware Order (outermost first)
//!
//! 1. Sentry layers (added by the binary)
//! 2. Set request ID (`x-request-id`, UUID unless supplied upstream)
//! 3. `TraceLayer` (request tracing)
//! 4. Propagate request ID to the response
//! 5. Request ID context (span field and Sentry tag)
//! 6. Security headers

pub mod request_id;
pub mod security_headers;

pub use request_id::request_id_middleware;
pub use security_headers::security_headers_middleware;
