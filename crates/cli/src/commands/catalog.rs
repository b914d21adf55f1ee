//! Catalog commands.
//!
//! # Usage
//!
//! ```bash
//! # Fetch the catalog and cache the snapshot
//! menu-cart catalog fetch
//!
//! # List the cached snapshot, optionally one category
//! menu-cart catalog show --category shakes
//! ```
//!
//! # Environment Variables
//!
//! - `MENU_CART_CATALOG_URL` - Catalog document URL or path
//! - `MENU_CART_CATALOG_TOKEN` - Optional bearer token
//! - `MENU_CART_DATA_DIR` - Device storage directory

use std::io::Write;
use std::path::Path;

use menu_cart_core::catalog::categories;
use menu_cart_core::{CategoryFilter, Product};
use menu_cart_storefront::catalog::{CatalogClient, CatalogError};
use menu_cart_storefront::config::{CatalogConfig, ConfigError};
use menu_cart_storefront::storage::StorageError;
use thiserror::Error;

use super::open_storage;

/// Errors that can occur during catalog commands.
#[derive(Debug, Error)]
pub enum CatalogCommandError {
    #[error("Configuration error: {0}")]
    Config(#[from] ConfigError),

    #[error("Catalog error: {0}")]
    Catalog(#[from] CatalogError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("No catalog snapshot; run `menu-cart catalog fetch` first")]
    NoSnapshot,

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// Fetch the catalog and save it as the snapshot.
///
/// # Returns
///
/// The number of products fetched.
///
/// # Errors
///
/// Returns `CatalogCommandError` if configuration, the fetch or the snapshot
/// write fails.
pub async fn fetch(data_dir: &Path) -> Result<usize, CatalogCommandError> {
    let config = CatalogConfig::from_env()?;
    let client = CatalogClient::new(&config);

    tracing::info!(source = %client.source(), "Fetching catalog");
    let products = client.fetch_catalog().await?;

    let mut storage = open_storage(data_dir)?;
    storage.save_catalog_snapshot(&products)?;
    tracing::info!(count = products.len(), "Catalog snapshot saved");
    Ok(products.len())
}

/// Print the snapshot, optionally limited to one category.
///
/// # Errors
///
/// Returns `CatalogCommandError::NoSnapshot` if no catalog was fetched yet.
pub fn show(
    data_dir: &Path,
    category: Option<&str>,
    out: &mut impl Write,
) -> Result<(), CatalogCommandError> {
    let storage = open_storage(data_dir)?;
    let products = storage
        .load_catalog_snapshot()?
        .ok_or(CatalogCommandError::NoSnapshot)?;

    let filter = category.map_or(CategoryFilter::All, |c| c.parse().unwrap_or_default());
    write_products(&products, &filter, out)?;
    Ok(())
}

fn write_products(
    products: &[Product],
    filter: &CategoryFilter,
    out: &mut impl Write,
) -> std::io::Result<()> {
    let keys: Vec<String> = categories(products)
        .iter()
        .map(ToString::to_string)
        .collect();
    writeln!(out, "categories: {}", keys.join(", "))?;
    for product in filter.apply(products) {
        writeln!(
            out,
            "{}\t{}\t{}\t{}",
            product.id, product.name, product.price, product.category
        )?;
    }
    Ok(())
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use menu_cart_core::{Category, Price, ProductId};

    use super::*;

    fn product(id: &str, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("dish {id}"),
            description: String::new(),
            price: Price::from_cents(650).unwrap(),
            category: Category::from(category),
            image_url: String::new(),
        }
    }

    #[test]
    fn test_show_without_snapshot() {
        let dir = tempfile::tempdir().unwrap();
        let mut out = Vec::new();
        assert!(matches!(
            show(dir.path(), None, &mut out),
            Err(CatalogCommandError::NoSnapshot)
        ));
    }

    #[test]
    fn test_show_filters_by_category() {
        let dir = tempfile::tempdir().unwrap();
        open_storage(dir.path())
            .unwrap()
            .save_catalog_snapshot(&[product("1", "lunch"), product("2", "shakes")])
            .unwrap();

        let mut out = Vec::new();
        show(dir.path(), Some("shakes"), &mut out).unwrap();
        let text = String::from_utf8(out).unwrap();

        assert!(text.starts_with("categories: all, lunch, shakes"));
        assert!(text.contains("dish 2"));
        assert!(!text.contains("dish 1"));
        assert!(text.contains("$6.50"));
    }
}
