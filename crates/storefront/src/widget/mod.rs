//! The menu and cart widget.
//!
//! The page is rendered once on the server; afterwards the browser posts each
//! delegated event and applies the [`patch::DomPatch`] list it gets back.

pub mod cart_panel;
pub mod faq;
pub mod menu;
pub mod patch;
pub mod shop;

pub use shop::{Shop, ShopError};
