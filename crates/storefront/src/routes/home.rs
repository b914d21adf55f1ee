//! Widget page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::filters;
use crate::state::AppState;
use crate::widget::Shop;
use crate::widget::cart_panel::{CartLineView, format_total};
use crate::widget::faq::{FaqView, faq_views};
use crate::widget::menu::{CategoryView, MenuItemView, category_views, menu_views};

/// The full widget page.
///
/// Rendering reflects the shop as it is: add controls of products already in
/// the cart render disabled, and the panel renders open if it was open.
#[derive(Template, WebTemplate)]
#[template(path = "index.html")]
pub struct WidgetPageTemplate {
    pub items: Vec<MenuItemView>,
    pub categories: Vec<CategoryView>,
    pub catalog_available: bool,
    pub lines: Vec<CartLineView>,
    pub item_count: u32,
    pub total: String,
    pub panel_shown: bool,
    pub faq: Vec<FaqView>,
}

impl WidgetPageTemplate {
    #[must_use]
    pub fn new(shop: &Shop) -> Self {
        let products = shop.catalog().unwrap_or_default();
        let totals = shop.cart().totals();
        Self {
            items: menu_views(products, shop.filter(), shop.cart()),
            categories: category_views(products, shop.filter()),
            catalog_available: shop.catalog().is_some(),
            lines: shop.cart().lines().iter().map(CartLineView::from).collect(),
            item_count: totals.item_count,
            total: format_total(totals.total),
            panel_shown: shop.panel().is_shown(),
            faq: faq_views(shop.faq(), shop.accordion()),
        }
    }
}

/// Widget page handler.
#[instrument(skip(state))]
pub async fn index(State(state): State<AppState>) -> WidgetPageTemplate {
    let shop = state.shop().await;
    WidgetPageTemplate::new(&shop)
}
