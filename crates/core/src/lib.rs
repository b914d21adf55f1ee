//! Menu Cart Core - catalog, cart and accordion state.
//!
//! This crate holds the state layer of the Menu Cart widget:
//! - `storefront` - Local host that renders the widget and persists state
//! - `cli` - Command-line tools operating on the same device storage
//!
//! # Architecture
//!
//! The core crate contains only types and pure state transitions - no I/O, no
//! storage, no HTTP, no markup. Everything here can be unit-tested without a
//! browser or a filesystem.
//!
//! # Modules
//!
//! - [`types`] - Newtype wrappers for product IDs and prices
//! - [`catalog`] - Products, categories and category filtering
//! - [`cart`] - The cart state machine and its derived totals
//! - [`accordion`] - Mutually exclusive expand/collapse state for FAQ panels

#![cfg_attr(not(test), forbid(unsafe_code))]

pub mod accordion;
pub mod cart;
pub mod catalog;
pub mod types;

pub use accordion::{Accordion, AccordionChange, AccordionError};
pub use cart::{AddControl, Cart, CartError, CartLineItem, CartTotals, Decrement};
pub use catalog::{Category, CategoryFilter, Product};
pub use types::*;
