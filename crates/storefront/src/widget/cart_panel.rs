//! Cart panel rendering.
//!
//! Every control inside the panel carries `data-action` and `data-id`; one
//! listener on `.cart-content` posts them as a [`CartEvent`]. The patches built
//! here touch only the node an event affected.

use askama::Template;
use rust_decimal::Decimal;
use serde::Deserialize;

use menu_cart_core::{CartLineItem, CartTotals, Price, ProductId};

use super::patch::{DomPatch, by_attr};

/// Container the line item blocks render into.
pub const CART_CONTENT: &str = ".cart-content";
/// Item count badge.
pub const ITEM_COUNT: &str = ".cart-item-no";
/// Cart total.
pub const CART_TOTAL: &str = ".cart-total";
const PANEL: &str = ".cart";
const OVERLAY: &str = ".cart-overlay";

/// Delegated events from the cart panel and its triggers.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum CartEvent {
    Increment { id: ProductId },
    Decrement { id: ProductId },
    Remove { id: ProductId },
    Clear,
    Open,
    Close,
}

/// Whether the cart panel is on screen.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum PanelVisibility {
    #[default]
    Hidden,
    Shown,
}

impl PanelVisibility {
    #[must_use]
    pub const fn is_shown(self) -> bool {
        matches!(self, Self::Shown)
    }
}

/// Line item display data for templates.
#[derive(Debug, Clone)]
pub struct CartLineView {
    pub id: String,
    pub name: String,
    pub price: Price,
    pub image_url: String,
    pub amount: u32,
}

impl From<&CartLineItem> for CartLineView {
    fn from(line: &CartLineItem) -> Self {
        let product = line.product();
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            amount: line.amount(),
        }
    }
}

/// One line item block.
#[derive(Template)]
#[template(path = "partials/cart_item.html")]
pub struct CartItemTemplate {
    pub line: CartLineView,
}

/// Format a total the way the panel shows it (`20.00`).
///
/// `total` is already rounded to cents by [`Cart::totals`](menu_cart_core::Cart::totals).
#[must_use]
pub fn format_total(total: Decimal) -> String {
    format!("{total:.2}")
}

/// Render the block for `line`.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_line(line: &CartLineItem) -> Result<String, askama::Error> {
    CartItemTemplate {
        line: CartLineView::from(line),
    }
    .render()
}

/// Selector of the block for `id`.
#[must_use]
pub fn line_selector(id: &ProductId) -> String {
    by_attr(".cart-item", "data-id", id.as_str())
}

/// Patch appending a rendered block to the panel.
#[must_use]
pub fn append_line_patch(html: String) -> DomPatch {
    DomPatch::Append {
        target: CART_CONTENT.to_string(),
        html,
    }
}

/// Patch updating the displayed amount of `id` in place.
#[must_use]
pub fn amount_patch(id: &ProductId, amount: u32) -> DomPatch {
    DomPatch::SetText {
        target: format!("{} .amount", line_selector(id)),
        text: amount.to_string(),
    }
}

/// Patch removing the whole block for `id`.
#[must_use]
pub fn remove_line_patch(id: &ProductId) -> DomPatch {
    DomPatch::Remove {
        target: line_selector(id),
    }
}

/// Patch emptying the panel.
#[must_use]
pub fn clear_lines_patch() -> DomPatch {
    DomPatch::SetHtml {
        target: CART_CONTENT.to_string(),
        html: String::new(),
    }
}

/// Patches for the item count badge and the total.
#[must_use]
pub fn totals_patches(totals: &CartTotals) -> Vec<DomPatch> {
    vec![
        DomPatch::SetText {
            target: ITEM_COUNT.to_string(),
            text: totals.item_count.to_string(),
        },
        DomPatch::SetText {
            target: CART_TOTAL.to_string(),
            text: format_total(totals.total),
        },
    ]
}

/// Patches showing or hiding the panel and its overlay.
#[must_use]
pub fn visibility_patches(visibility: PanelVisibility) -> Vec<DomPatch> {
    let shown = visibility.is_shown();
    vec![
        DomPatch::SetClass {
            target: OVERLAY.to_string(),
            class: "transparentBcg".to_string(),
            enabled: shown,
        },
        DomPatch::SetClass {
            target: PANEL.to_string(),
            class: "showCart".to_string(),
            enabled: shown,
        },
    ]
}
