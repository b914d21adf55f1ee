//! The widget controller.
//!
//! [`Shop`] owns the cart, the catalog snapshot, panel visibility, the active
//! category filter and the FAQ accordion. Every cart operation follows the same
//! sequence:
//!
//! 1. apply the transition to a working copy of the cart
//! 2. persist the working copy
//! 3. commit it as the current cart
//! 4. recompute totals and build the DOM patches
//!
//! A failure in steps 1–2 discards the working copy, so the cart shown and the
//! cart persisted never diverge.

use thiserror::Error;
use tracing::{debug, info};

use menu_cart_core::{
    Accordion, AccordionError, AddControl, Cart, CartError, CategoryFilter, Decrement, Product,
    ProductId,
};

use super::cart_panel::{self, CartEvent, PanelVisibility};
use super::faq::{self, FaqEvent};
use super::menu::{self, MenuEvent};
use super::patch::DomPatch;
use crate::catalog::CatalogClient;
use crate::content::FaqEntry;
use crate::storage::{Storage, StorageError};

/// Errors from a widget interaction.
#[derive(Debug, Error)]
pub enum ShopError {
    /// A cart precondition did not hold.
    #[error(transparent)]
    Cart(#[from] CartError),

    /// The product is not in the catalog snapshot.
    #[error("product {0} is not in the catalog")]
    UnknownProduct(ProductId),

    /// The FAQ panel does not exist.
    #[error(transparent)]
    Accordion(#[from] AccordionError),

    /// Persisting or reading device storage failed.
    #[error("Storage error: {0}")]
    Storage(#[from] StorageError),

    /// A template failed to render.
    #[error("Template error: {0}")]
    Render(#[from] askama::Error),
}

/// Widget state for one device.
#[derive(Debug)]
pub struct Shop {
    storage: Storage,
    catalog: Option<Vec<Product>>,
    cart: Cart,
    panel: PanelVisibility,
    filter: CategoryFilter,
    faq: Vec<FaqEntry>,
    accordion: Accordion,
}

impl Shop {
    /// Restore the persisted cart from `storage`. No catalog is installed yet.
    #[must_use]
    pub fn hydrate(storage: Storage, faq: Vec<FaqEntry>) -> Self {
        let cart = storage.load_cart();
        let accordion = Accordion::new(faq.len());
        debug!(lines = cart.len(), "Cart hydrated");
        Self {
            storage,
            catalog: None,
            cart,
            panel: PanelVisibility::Hidden,
            filter: CategoryFilter::All,
            faq,
            accordion,
        }
    }

    /// Startup sequence: hydrate, fetch the catalog and cache its snapshot.
    ///
    /// A failed fetch is logged and leaves the shop without a catalog.
    pub async fn start(storage: Storage, faq: Vec<FaqEntry>, client: &CatalogClient) -> Self {
        let mut shop = Self::hydrate(storage, faq);
        match client.fetch_catalog().await {
            Ok(products) => {
                if let Err(e) = shop.install_catalog(products) {
                    tracing::error!(error = %e, "Failed to cache catalog snapshot");
                }
            }
            Err(e) => {
                tracing::error!(error = %e, source = %client.source(), "Catalog fetch failed");
            }
        }
        shop
    }

    /// Make `products` the current catalog and cache the snapshot.
    ///
    /// The in-memory catalog is kept even if caching fails.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be written.
    pub fn install_catalog(&mut self, products: Vec<Product>) -> Result<(), StorageError> {
        info!(count = products.len(), "Catalog installed");
        let saved = self.storage.save_catalog_snapshot(&products);
        self.catalog = Some(products);
        saved
    }

    /// The fetched catalog, if the fetch succeeded.
    #[must_use]
    pub fn catalog(&self) -> Option<&[Product]> {
        self.catalog.as_deref()
    }

    #[must_use]
    pub const fn cart(&self) -> &Cart {
        &self.cart
    }

    #[must_use]
    pub const fn panel(&self) -> PanelVisibility {
        self.panel
    }

    #[must_use]
    pub const fn filter(&self) -> &CategoryFilter {
        &self.filter
    }

    #[must_use]
    pub fn faq(&self) -> &[FaqEntry] {
        &self.faq
    }

    #[must_use]
    pub const fn accordion(&self) -> &Accordion {
        &self.accordion
    }

    // =========================================================================
    // Cart operations
    // =========================================================================

    /// Put a product from the catalog snapshot in the cart and show the panel.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::UnknownProduct` if the snapshot has no such product,
    /// `ShopError::Cart` if it is already in the cart, or a storage/render error.
    pub fn add_item(&mut self, id: &ProductId) -> Result<Vec<DomPatch>, ShopError> {
        let product = self
            .storage
            .get_product(id)?
            .ok_or_else(|| ShopError::UnknownProduct(id.clone()))?;

        let html = self.commit(|cart| {
            cart.add_item(product)?;
            let line = cart
                .get(id)
                .ok_or_else(|| CartError::NotInCart(id.clone()))?;
            Ok(cart_panel::render_line(line)?)
        })?;
        self.panel = PanelVisibility::Shown;

        let totals = self.cart.totals();
        info!(product_id = %id, item_count = totals.item_count, "Added to cart");

        let mut patches = vec![
            menu::add_control_patch(id, AddControl::InCart),
            cart_panel::append_line_patch(html),
        ];
        patches.extend(cart_panel::totals_patches(&totals));
        patches.extend(cart_panel::visibility_patches(self.panel));
        Ok(patches)
    }

    /// Raise the amount of a line by one.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Cart` if the product is not in the cart, or a storage error.
    pub fn increment_amount(&mut self, id: &ProductId) -> Result<Vec<DomPatch>, ShopError> {
        let amount = self.commit(|cart| Ok(cart.increment_amount(id)?))?;
        debug!(product_id = %id, amount, "Incremented");

        let mut patches = vec![cart_panel::amount_patch(id, amount)];
        patches.extend(cart_panel::totals_patches(&self.cart.totals()));
        Ok(patches)
    }

    /// Lower the amount of a line by one, removing it at zero.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Cart` if the product is not in the cart, or a storage error.
    pub fn decrement_amount(&mut self, id: &ProductId) -> Result<Vec<DomPatch>, ShopError> {
        let outcome = self.commit(|cart| Ok(cart.decrement_amount(id)?))?;
        debug!(product_id = %id, ?outcome, "Decremented");

        let mut patches = match outcome {
            Decrement::Remaining(amount) => vec![cart_panel::amount_patch(id, amount)],
            Decrement::Removed(_) => removal_patches(id),
        };
        patches.extend(cart_panel::totals_patches(&self.cart.totals()));
        Ok(patches)
    }

    /// Remove a line regardless of its amount.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Cart` if the product is not in the cart, or a storage error.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<Vec<DomPatch>, ShopError> {
        self.commit(|cart| Ok(cart.remove_item(id)?))?;
        info!(product_id = %id, "Removed from cart");

        let mut patches = removal_patches(id);
        patches.extend(cart_panel::totals_patches(&self.cart.totals()));
        Ok(patches)
    }

    /// Empty the cart in one pass and hide the panel.
    ///
    /// # Errors
    ///
    /// Returns a storage error if the empty cart cannot be persisted.
    pub fn clear_cart(&mut self) -> Result<Vec<DomPatch>, ShopError> {
        let removed = self.commit(|cart| Ok(cart.clear()))?;
        self.panel = PanelVisibility::Hidden;
        info!(lines = removed.len(), "Cart cleared");

        let mut patches: Vec<DomPatch> = removed
            .iter()
            .map(|line| menu::add_control_patch(line.id(), AddControl::Available))
            .collect();
        patches.push(cart_panel::clear_lines_patch());
        patches.extend(cart_panel::totals_patches(&self.cart.totals()));
        patches.extend(cart_panel::visibility_patches(self.panel));
        Ok(patches)
    }

    pub fn open_cart(&mut self) -> Vec<DomPatch> {
        self.panel = PanelVisibility::Shown;
        cart_panel::visibility_patches(self.panel)
    }

    pub fn close_cart(&mut self) -> Vec<DomPatch> {
        self.panel = PanelVisibility::Hidden;
        cart_panel::visibility_patches(self.panel)
    }

    // =========================================================================
    // Menu and FAQ
    // =========================================================================

    /// Show only `filter`'s products. Without a catalog there is nothing to
    /// render and no patches are returned.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Render` if the menu fails to render.
    pub fn select_category(&mut self, filter: CategoryFilter) -> Result<Vec<DomPatch>, ShopError> {
        let Some(products) = self.catalog.as_deref() else {
            return Ok(Vec::new());
        };
        let patches = menu::filter_patches(products, &filter, &self.cart)?;
        debug!(category = %filter, "Category selected");
        self.filter = filter;
        Ok(patches)
    }

    /// Toggle one FAQ panel.
    ///
    /// # Errors
    ///
    /// Returns `ShopError::Accordion` if there is no such panel.
    pub fn toggle_faq(&mut self, index: usize) -> Result<Vec<DomPatch>, ShopError> {
        let change = self.accordion.toggle(index)?;
        Ok(faq::toggle_patches(change))
    }

    // =========================================================================
    // Delegated event dispatch
    // =========================================================================

    /// Handle an event from the cart panel or its triggers.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub fn dispatch_cart(&mut self, event: CartEvent) -> Result<Vec<DomPatch>, ShopError> {
        match event {
            CartEvent::Increment { id } => self.increment_amount(&id),
            CartEvent::Decrement { id } => self.decrement_amount(&id),
            CartEvent::Remove { id } => self.remove_item(&id),
            CartEvent::Clear => self.clear_cart(),
            CartEvent::Open => Ok(self.open_cart()),
            CartEvent::Close => Ok(self.close_cart()),
        }
    }

    /// Handle an event from the menu or the filter bar.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub fn dispatch_menu(&mut self, event: MenuEvent) -> Result<Vec<DomPatch>, ShopError> {
        match event {
            MenuEvent::Add { id } => self.add_item(&id),
            MenuEvent::Filter { category } => {
                let filter: CategoryFilter = category.parse().unwrap_or_default();
                self.select_category(filter)
            }
        }
    }

    /// Handle an event from the FAQ section.
    ///
    /// # Errors
    ///
    /// Propagates the error of the operation the event maps to.
    pub fn dispatch_faq(&mut self, event: FaqEvent) -> Result<Vec<DomPatch>, ShopError> {
        match event {
            FaqEvent::Toggle { index } => self.toggle_faq(index),
        }
    }

    /// Apply `op` to a copy of the cart, persist the copy, then commit it.
    fn commit<T>(
        &mut self,
        op: impl FnOnce(&mut Cart) -> Result<T, ShopError>,
    ) -> Result<T, ShopError> {
        let mut next = self.cart.clone();
        let outcome = op(&mut next)?;
        self.storage.save_cart(&next)?;
        self.cart = next;
        Ok(outcome)
    }
}

/// Patches for a line leaving the cart: its block goes, its add control returns.
fn removal_patches(id: &ProductId) -> Vec<DomPatch> {
    vec![
        cart_panel::remove_line_patch(id),
        menu::add_control_patch(id, AddControl::Available),
    ]
}
