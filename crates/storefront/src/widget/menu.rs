//! Menu and category filter rendering.
//!
//! Add controls and filter buttons carry their product id / category in
//! `data-id` and are handled by listeners delegated from `.menu-container` and
//! `.btns`, so re-rendering the menu never needs to re-bind anything.

use askama::Template;
use serde::Deserialize;

use menu_cart_core::catalog::categories;
use menu_cart_core::{AddControl, Cart, CategoryFilter, Price, Product, ProductId};

use super::patch::{DomPatch, by_attr};

/// Container the menu items render into.
pub const MENU_CONTAINER: &str = ".menu-container";
/// Container the category filter buttons render into.
pub const FILTER_BAR: &str = ".btns";

/// Delegated events from the menu and the filter bar.
#[derive(Debug, Clone, PartialEq, Eq, Deserialize)]
#[serde(tag = "type", rename_all = "snake_case")]
pub enum MenuEvent {
    Filter { category: String },
    Add { id: ProductId },
}

/// Menu item display data for templates.
#[derive(Debug, Clone)]
pub struct MenuItemView {
    pub id: String,
    pub name: String,
    pub description: String,
    pub price: Price,
    pub image_url: String,
    pub control: AddControl,
}

impl MenuItemView {
    #[must_use]
    pub fn new(product: &Product, cart: &Cart) -> Self {
        Self {
            id: product.id.to_string(),
            name: product.name.clone(),
            description: product.description.clone(),
            price: product.price,
            image_url: product.image_url.clone(),
            control: cart.add_control(&product.id),
        }
    }
}

/// Category filter button display data.
#[derive(Debug, Clone)]
pub struct CategoryView {
    pub key: String,
    pub active: bool,
}

/// Menu items fragment.
#[derive(Template)]
#[template(path = "partials/menu_items.html")]
pub struct MenuItemsTemplate {
    pub items: Vec<MenuItemView>,
}

/// Category filter buttons fragment.
#[derive(Template)]
#[template(path = "partials/category_filters.html")]
pub struct CategoryFiltersTemplate {
    pub categories: Vec<CategoryView>,
}

/// Views for the products shown under `filter`, with add controls synced to `cart`.
#[must_use]
pub fn menu_views(products: &[Product], filter: &CategoryFilter, cart: &Cart) -> Vec<MenuItemView> {
    filter
        .apply(products)
        .into_iter()
        .map(|product| MenuItemView::new(product, cart))
        .collect()
}

/// Views for every category control, marking `active`.
#[must_use]
pub fn category_views(products: &[Product], active: &CategoryFilter) -> Vec<CategoryView> {
    categories(products)
        .into_iter()
        .map(|filter| CategoryView {
            active: &filter == active,
            key: filter.to_string(),
        })
        .collect()
}

/// Render the menu items shown under `filter`.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_menu(
    products: &[Product],
    filter: &CategoryFilter,
    cart: &Cart,
) -> Result<String, askama::Error> {
    MenuItemsTemplate {
        items: menu_views(products, filter, cart),
    }
    .render()
}

/// Render one control per category, "all" first.
///
/// # Errors
///
/// Returns `askama::Error` if the template fails to render.
pub fn render_category_filters(
    products: &[Product],
    active: &CategoryFilter,
) -> Result<String, askama::Error> {
    CategoryFiltersTemplate {
        categories: category_views(products, active),
    }
    .render()
}

/// Patches that re-render the menu for a newly selected category.
///
/// # Errors
///
/// Returns `askama::Error` if a template fails to render.
pub fn filter_patches(
    products: &[Product],
    filter: &CategoryFilter,
    cart: &Cart,
) -> Result<Vec<DomPatch>, askama::Error> {
    let mut patches = vec![DomPatch::SetHtml {
        target: MENU_CONTAINER.to_string(),
        html: render_menu(products, filter, cart)?,
    }];
    patches.extend(category_views(products, filter).into_iter().map(|view| {
        DomPatch::SetClass {
            target: by_attr(".menu-btn", "data-id", &view.key),
            class: "active".to_string(),
            enabled: view.active,
        }
    }));
    Ok(patches)
}

/// Patch that syncs the add control of `id` with its cart state.
#[must_use]
pub fn add_control_patch(id: &ProductId, control: AddControl) -> DomPatch {
    DomPatch::SetButton {
        target: by_attr(".cart-btn", "data-id", id.as_str()),
        label: control.label().to_string(),
        disabled: control.is_disabled(),
    }
}
