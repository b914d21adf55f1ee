//! Catalog fetches against an ephemeral local server.

#![allow(clippy::unwrap_used)]

use axum::Router;
use axum::http::{HeaderMap, StatusCode, header};
use axum::routing::get;
use menu_cart_core::ProductId;
use menu_cart_integration_tests::{SAMPLE_CATALOG, TestContext, sample_faq};
use menu_cart_storefront::catalog::{CatalogClient, CatalogError};
use menu_cart_storefront::config::{CatalogConfig, CatalogSource};
use menu_cart_storefront::widget::Shop;
use secrecy::SecretString;
use url::Url;

const TOKEN: &str = "preview-token";

async fn entries(headers: HeaderMap) -> (StatusCode, String) {
    let authorized = headers
        .get(header::AUTHORIZATION)
        .and_then(|v| v.to_str().ok())
        .is_some_and(|v| v == format!("Bearer {TOKEN}"));
    if authorized {
        (StatusCode::OK, SAMPLE_CATALOG.to_string())
    } else {
        (StatusCode::UNAUTHORIZED, String::new())
    }
}

/// Serve the sample catalog on `127.0.0.1:0` and return its base URL.
async fn spawn_catalog_server() -> Url {
    let app = Router::new()
        .route("/entries", get(entries))
        .route("/broken", get(|| async { "{ not json" }))
        .route("/down", get(|| async { StatusCode::SERVICE_UNAVAILABLE }));
    let listener = tokio::net::TcpListener::bind("127.0.0.1:0").await.unwrap();
    let addr = listener.local_addr().unwrap();
    tokio::spawn(async move {
        axum::serve(listener, app).await.unwrap();
    });
    Url::parse(&format!("http://{addr}/")).unwrap()
}

fn client(base: &Url, path: &str, token: Option<&str>) -> CatalogClient {
    CatalogClient::new(&CatalogConfig {
        source: CatalogSource::Http(base.join(path).unwrap()),
        access_token: token.map(SecretString::from),
    })
}

#[tokio::test]
async fn test_fetch_flattens_sample_catalog() {
    let base = spawn_catalog_server().await;
    let products = client(&base, "entries", Some(TOKEN))
        .fetch_catalog()
        .await
        .unwrap();

    assert_eq!(products.len(), 10);
    let first = &products[0];
    assert_eq!(first.id, ProductId::new("1"));
    assert_eq!(first.name, "buttermilk pancakes");
    assert_eq!(first.price.to_string(), "$15.99");
    assert_eq!(first.category.as_str(), "breakfast");
    assert_eq!(first.image_url, "/static/images/item-1.svg");
}

#[tokio::test]
async fn test_fetch_failures() {
    let base = spawn_catalog_server().await;

    let err = client(&base, "entries", None).fetch_catalog().await.unwrap_err();
    assert!(matches!(err, CatalogError::Status(s) if s == reqwest::StatusCode::UNAUTHORIZED));

    let err = client(&base, "down", None).fetch_catalog().await.unwrap_err();
    assert!(matches!(err, CatalogError::Status(_)));

    let err = client(&base, "broken", None).fetch_catalog().await.unwrap_err();
    assert!(matches!(err, CatalogError::Parse(_)));
}

#[tokio::test]
async fn test_start_caches_snapshot() {
    let base = spawn_catalog_server().await;
    let ctx = TestContext::new();

    let client = client(&base, "entries", Some(TOKEN));
    let shop = Shop::start(ctx.storage(), sample_faq(), &client).await;
    assert_eq!(shop.catalog().unwrap().len(), 10);

    let snapshot = ctx.storage().load_catalog_snapshot().unwrap().unwrap();
    assert_eq!(snapshot.len(), 10);
    assert!(ctx.storage().get_product(&ProductId::new("10")).unwrap().is_some());
}

#[tokio::test]
async fn test_start_survives_failed_fetch() {
    let base = spawn_catalog_server().await;
    let ctx = TestContext::new();

    let mut shop = Shop::start(ctx.storage(), sample_faq(), &client(&base, "down", None)).await;
    assert!(shop.catalog().is_none());
    assert!(shop.cart().is_empty());
    assert_eq!(shop.open_cart().len(), 2);
}

#[tokio::test]
async fn test_fetch_from_file_source() {
    let dir = tempfile::tempdir().unwrap();
    let path = dir.path().join("products.json");
    std::fs::write(&path, SAMPLE_CATALOG).unwrap();

    let client = CatalogClient::new(&CatalogConfig {
        source: CatalogSource::File(path),
        access_token: None,
    });
    assert_eq!(client.fetch_catalog().await.unwrap().len(), 10);
}
