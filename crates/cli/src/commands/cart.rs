//! Cart commands.
//!
//! Each mutation runs the same transition the widget runs: look the product up
//! in the snapshot, apply the change, persist the cart.
//!
//! # Usage
//!
//! ```bash
//! menu-cart cart add 3
//! menu-cart cart increment 3
//! menu-cart cart show
//! menu-cart cart clear
//! ```

use std::io::Write;
use std::path::Path;

use menu_cart_core::{Cart, ProductId};
use menu_cart_storefront::storage::StorageError;
use menu_cart_storefront::widget::cart_panel::format_total;
use menu_cart_storefront::widget::{Shop, ShopError};
use thiserror::Error;

use super::open_storage;

/// Errors that can occur during cart commands.
#[derive(Debug, Error)]
pub enum CartCommandError {
    #[error(transparent)]
    Shop(#[from] ShopError),

    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    #[error("Output error: {0}")]
    Output(#[from] std::io::Error),
}

/// A cart mutation.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CartChange {
    Add(ProductId),
    Increment(ProductId),
    Decrement(ProductId),
    Remove(ProductId),
    Clear,
}

/// Apply `change` to the persisted cart and print the result.
///
/// # Errors
///
/// Returns `CartCommandError::Shop` if the change is rejected or cannot be
/// persisted.
pub fn apply(
    data_dir: &Path,
    change: &CartChange,
    out: &mut impl Write,
) -> Result<(), CartCommandError> {
    let mut shop = Shop::hydrate(open_storage(data_dir)?, Vec::new());
    match change {
        CartChange::Add(id) => shop.add_item(id)?,
        CartChange::Increment(id) => shop.increment_amount(id)?,
        CartChange::Decrement(id) => shop.decrement_amount(id)?,
        CartChange::Remove(id) => shop.remove_item(id)?,
        CartChange::Clear => shop.clear_cart()?,
    };
    tracing::debug!(?change, "Cart updated");
    write_cart(shop.cart(), out)?;
    Ok(())
}

/// Print the persisted cart.
///
/// # Errors
///
/// Returns `CartCommandError` if storage cannot be opened or output fails.
pub fn show(data_dir: &Path, out: &mut impl Write) -> Result<(), CartCommandError> {
    let storage = open_storage(data_dir)?;
    write_cart(&storage.load_cart(), out)?;
    Ok(())
}

fn write_cart(cart: &Cart, out: &mut impl Write) -> std::io::Result<()> {
    for line in cart.lines() {
        let product = line.product();
        writeln!(
            out,
            "{}\t{}\t{} x {}",
            product.id,
            product.name,
            line.amount(),
            product.price
        )?;
    }
    let totals = cart.totals();
    writeln!(out, "items: {}", totals.item_count)?;
    writeln!(out, "total: ${}", format_total(totals.total))
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use menu_cart_core::{Category, CartError, Price, Product};

    use super::*;

    fn seed(dir: &Path) {
        open_storage(dir)
            .unwrap()
            .save_catalog_snapshot(&[Product {
                id: ProductId::new("3"),
                name: "godzilla milkshake".to_string(),
                description: String::new(),
                price: Price::from_cents(699).unwrap(),
                category: Category::from("shakes"),
                image_url: String::new(),
            }])
            .unwrap();
    }

    fn run(dir: &Path, change: CartChange) -> Result<String, CartCommandError> {
        let mut out = Vec::new();
        apply(dir, &change, &mut out)?;
        Ok(String::from_utf8(out).unwrap())
    }

    #[test]
    fn test_cart_commands_persist_between_runs() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        let id = ProductId::new("3");

        run(dir.path(), CartChange::Add(id.clone())).unwrap();
        let text = run(dir.path(), CartChange::Increment(id)).unwrap();
        assert!(text.contains("2 x $6.99"));
        assert!(text.contains("items: 2"));
        assert!(text.contains("total: $13.98"));

        let mut out = Vec::new();
        show(dir.path(), &mut out).unwrap();
        assert!(String::from_utf8(out).unwrap().contains("items: 2"));

        let text = run(dir.path(), CartChange::Clear).unwrap();
        assert!(text.contains("total: $0.00"));
    }

    #[test]
    fn test_add_twice_is_rejected() {
        let dir = tempfile::tempdir().unwrap();
        seed(dir.path());
        run(dir.path(), CartChange::Add(ProductId::new("3"))).unwrap();

        let err = run(dir.path(), CartChange::Add(ProductId::new("3"))).unwrap_err();
        assert!(matches!(
            err,
            CartCommandError::Shop(ShopError::Cart(CartError::AlreadyInCart(_)))
        ));
    }

    #[test]
    fn test_add_unknown_product() {
        let dir = tempfile::tempdir().unwrap();
        let err = run(dir.path(), CartChange::Add(ProductId::new("9"))).unwrap_err();
        assert!(matches!(
            err,
            CartCommandError::Shop(ShopError::UnknownProduct(_))
        ));
    }
}
