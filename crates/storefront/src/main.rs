//! Menu cart storefront - the restaurant menu and cart widget.
//!
//! This binary serves the widget on the shopper's device (127.0.0.1:3000 by
//! default).
//!
//! # Architecture
//!
//! - Axum web framework; the page is rendered once with Askama
//! - A delegated-event script posts interactions and applies DOM patches
//! - Catalog fetched once at startup from a hosted content API or a file
//! - Catalog snapshot and cart persisted as JSON files in the data directory

#![cfg_attr(not(test), forbid(unsafe_code))]

use std::path::Path;

use menu_cart_storefront::catalog::CatalogClient;
use menu_cart_storefront::config::StorefrontConfig;
use menu_cart_storefront::content;
use menu_cart_storefront::routes;
use menu_cart_storefront::state::AppState;
use menu_cart_storefront::storage::{FileStore, Storage};
use menu_cart_storefront::widget::Shop;
use sentry::integrations::tracing as sentry_tracing;
use tracing_subscriber::{layer::SubscriberExt, util::SubscriberInitExt};

/// Initialize Sentry error tracking and return guard that must be kept alive.
fn init_sentry(config: &StorefrontConfig) -> Option<sentry::ClientInitGuard> {
    let dsn = config.sentry_dsn.as_ref()?;

    let guard = sentry::init((
        dsn.as_str(),
        sentry::ClientOptions {
            release: sentry::release_name!(),
            environment: config
                .sentry_environment
                .clone()
                .map(std::borrow::Cow::Owned),
            attach_stacktrace: true,
            ..Default::default()
        },
    ));

    tracing::info!("Sentry initialized");
    Some(guard)
}

/// Filter tracing events to Sentry event types.
fn sentry_event_filter(metadata: &tracing::Metadata<'_>) -> sentry_tracing::EventFilter {
    match *metadata.level() {
        tracing::Level::ERROR | tracing::Level::WARN => sentry_tracing::EventFilter::Event,
        tracing::Level::INFO | tracing::Level::DEBUG => sentry_tracing::EventFilter::Breadcrumb,
        _ => sentry_tracing::EventFilter::Ignore,
    }
}

#[tokio::main]
async fn main() {
    let config = StorefrontConfig::from_env().expect("Failed to load configuration");

    // Sentry must be initialized before the tracing subscriber
    let _sentry_guard = init_sentry(&config);

    let env_filter = tracing_subscriber::EnvFilter::try_from_default_env()
        .unwrap_or_else(|_| "menu_cart_storefront=info,tower_http=debug".into());

    tracing_subscriber::registry()
        .with(env_filter)
        .with(tracing_subscriber::fmt::layer())
        .with(sentry_tracing::layer().event_filter(sentry_event_filter))
        .init();

    let store = FileStore::open(&config.data_dir).expect("Failed to open data directory");
    tracing::info!(dir = %config.data_dir.display(), "Device storage opened");

    let faq = content::load_faq(&config.faq_path).unwrap_or_else(|e| {
        tracing::warn!(error = %e, "Failed to load FAQ");
        Vec::new()
    });

    let client = CatalogClient::new(&config.catalog);
    let shop = Shop::start(Storage::new(store), faq, &client).await;
    let state = AppState::new(shop);

    let app = routes::build_router(state, Path::new("crates/storefront/static"))
        // Sentry layers (outermost for full request coverage)
        .layer(sentry_tower::NewSentryLayer::new_from_top())
        .layer(sentry_tower::SentryHttpLayer::new().enable_transaction());

    let addr = config.socket_addr();
    tracing::info!("widget listening on http://{}", addr);

    let listener = tokio::net::TcpListener::bind(addr)
        .await
        .expect("Failed to bind to address");

    axum::serve(listener, app)
        .with_graceful_shutdown(shutdown_signal())
        .await
        .expect("Server error");
}

/// Wait for shutdown signal (Ctrl+C or SIGTERM).
async fn shutdown_signal() {
    let ctrl_c = async {
        tokio::signal::ctrl_c()
            .await
            .expect("Failed to install Ctrl+C handler");
    };

    #[cfg(unix)]
    let terminate = async {
        tokio::signal::unix::signal(tokio::signal::unix::SignalKind::terminate())
            .expect("Failed to install signal handler")
            .recv()
            .await;
    };

    #[cfg(not(unix))]
    let terminate = std::future::pending::<()>();

    tokio::select! {
        () = ctrl_c => {},
        () = terminate => {},
    }

    tracing::info!("Shutdown signal received, starting graceful shutdown");
}
