//! HTTP route handlers for the widget.
//!
//! # Route Structure
//!
//! ```text
//! GET  /              - Widget page (menu, cart panel, FAQ)
//! GET  /health        - Health check
//!
//! # Delegated events (JSON in, DOM patches out)
//! POST /menu/events   - Category filter and add-to-cart
//! POST /cart/events   - Increment, decrement, remove, clear, open, close
//! POST /faq/events    - Accordion toggle
//!
//! GET  /static/*      - Widget script, stylesheet and images
//! ```

pub mod cart;
pub mod faq;
pub mod home;
pub mod menu;

use std::path::Path;

use axum::{
    Router,
    routing::{get, post},
};
use tower_http::{
    request_id::{MakeRequestUuid, PropagateRequestIdLayer, SetRequestIdLayer},
    services::ServeDir,
    trace::TraceLayer,
};

use crate::middleware;
use crate::state::AppState;

/// Create the widget routes router.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(home::index))
        .route("/menu/events", post(menu::events))
        .route("/cart/events", post(cart::events))
        .route("/faq/events", post(faq::events))
}

/// Build the full application router with static files and middleware.
///
/// Sentry layers are added by the binary so tests can drive this router
/// without a Sentry client.
pub fn build_router(state: AppState, static_dir: &Path) -> Router {
    Router::new()
        .route("/health", get(health))
        .merge(routes())
        .nest_service("/static", ServeDir::new(static_dir))
        .with_state(state)
        .layer(axum::middleware::from_fn(
            middleware::security_headers_middleware,
        ))
        .layer(axum::middleware::from_fn(middleware::request_id_middleware))
        .layer(PropagateRequestIdLayer::x_request_id())
        .layer(TraceLayer::new_for_http())
        .layer(SetRequestIdLayer::x_request_id(MakeRequestUuid))
}

/// Liveness health check endpoint.
async fn health() -> &'static str {
    "ok"
}
