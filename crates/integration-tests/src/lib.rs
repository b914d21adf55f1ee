//! Integration tests for the menu cart widget.
//!
//! # Running Tests
//!
//! ```bash
//! cargo test -p menu-cart-integration-tests
//! ```
//!
//! # Test Categories
//!
//! - `widget_flow` - The router driven end to end with `tower::ServiceExt::oneshot`
//! - `catalog_fetch` - Catalog fetches against an ephemeral local server
//!
//! Everything runs in-process; device storage lives in a temporary directory.

#![allow(clippy::unwrap_used, clippy::missing_panics_doc)]

use std::path::{Path, PathBuf};

use axum::Router;
use axum::body::Body;
use axum::http::{Request, Response, header};
use menu_cart_core::{Category, Price, Product, ProductId};
use menu_cart_storefront::content::FaqEntry;
use menu_cart_storefront::routes::build_router;
use menu_cart_storefront::state::AppState;
use menu_cart_storefront::storage::{FileStore, Storage};
use menu_cart_storefront::widget::Shop;
use tempfile::TempDir;

/// The sample catalog shipped with the storefront, in its wire shape.
pub const SAMPLE_CATALOG: &str = include_str!("../../storefront/static/products.json");

/// A widget host over device storage in a temporary directory.
pub struct TestContext {
    pub data_dir: TempDir,
}

impl TestContext {
    #[must_use]
    pub fn new() -> Self {
        Self {
            data_dir: tempfile::tempdir().unwrap(),
        }
    }

    #[must_use]
    pub fn data_path(&self) -> &Path {
        self.data_dir.path()
    }

    /// Open the device storage.
    #[must_use]
    pub fn storage(&self) -> Storage {
        Storage::new(FileStore::open(self.data_path()).unwrap())
    }

    /// Start a host the way the binary does, with `products` as the fetched
    /// catalog. Every call restores the cart persisted by earlier hosts.
    #[must_use]
    pub fn app(&self, products: Vec<Product>) -> Router {
        let mut shop = Shop::hydrate(self.storage(), sample_faq());
        shop.install_catalog(products).unwrap();
        build_router(AppState::new(shop), &static_dir())
    }

    /// A host whose catalog fetch failed.
    #[must_use]
    pub fn app_without_catalog(&self) -> Router {
        let shop = Shop::hydrate(self.storage(), sample_faq());
        build_router(AppState::new(shop), &static_dir())
    }
}

impl Default for TestContext {
    fn default() -> Self {
        Self::new()
    }
}

#[must_use]
pub fn static_dir() -> PathBuf {
    Path::new(env!("CARGO_MANIFEST_DIR")).join("../storefront/static")
}

#[must_use]
pub fn product(id: &str, name: &str, cents: i64, category: &str) -> Product {
    Product {
        id: ProductId::new(id),
        name: name.to_string(),
        description: format!("{name}, made to order."),
        price: Price::from_cents(cents).unwrap(),
        category: Category::from(category),
        image_url: format!("/static/images/item-{id}.svg"),
    }
}

/// A small diner menu.
#[must_use]
pub fn diner_menu() -> Vec<Product> {
    vec![
        product("1", "buttermilk pancakes", 1599, "breakfast"),
        product("2", "diner double", 1399, "lunch"),
        product("3", "godzilla milkshake", 699, "shakes"),
        product("4", "country delight", 2099, "breakfast"),
    ]
}

#[must_use]
pub fn sample_faq() -> Vec<FaqEntry> {
    menu_cart_storefront::content::parse_faq(
        "## Do you deliver?\nWithin five miles.\n\n## Kids menu?\nYes.\n",
    )
}

/// Send one request through `app`.
pub async fn send(app: &Router, request: Request<Body>) -> Response<Body> {
    tower::ServiceExt::oneshot(app.clone(), request).await.unwrap()
}

/// POST a JSON event.
pub async fn post_event(app: &Router, path: &str, event: &serde_json::Value) -> Response<Body> {
    let request = Request::post(path)
        .header(header::CONTENT_TYPE, "application/json")
        .body(Body::from(event.to_string()))
        .unwrap();
    send(app, request).await
}

/// GET a path.
pub async fn get(app: &Router, path: &str) -> Response<Body> {
    send(app, Request::get(path).body(Body::empty()).unwrap()).await
}

pub async fn body_string(response: Response<Body>) -> String {
    let body = axum::body::to_bytes(response.into_body(), usize::MAX)
        .await
        .unwrap();
    String::from_utf8(body.to_vec()).unwrap()
}

pub async fn body_json(response: Response<Body>) -> serde_json::Value {
    serde_json::from_str(&body_string(response).await).unwrap()
}

/// Find the first patch with operation `op` targeting `target`.
#[must_use]
pub fn find_patch<'a>(
    patches: &'a serde_json::Value,
    op: &str,
    target: &str,
) -> Option<&'a serde_json::Value> {
    patches
        .as_array()?
        .iter()
        .find(|p| p["op"] == op && p["target"] == target)
}
