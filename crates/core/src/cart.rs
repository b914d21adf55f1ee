//! The cart state machine.
//!
//! Each product id is either *not in the cart* or *in the cart* with an amount
//! of at least one. [`Cart`] is the only way to move between those states:
//!
//! ```text
//! NotInCart --add_item--> InCart(1)
//! InCart(n) --increment_amount--> InCart(n + 1)
//! InCart(n) --decrement_amount--> InCart(n - 1)   (n > 1)
//! InCart(1) --decrement_amount--> NotInCart
//! InCart(n) --remove_item / clear--> NotInCart
//! ```
//!
//! Preconditions are checked: adding an id twice or touching an id that is not
//! in the cart returns a [`CartError`] and leaves the cart unchanged.
//!
//! Totals are never stored; [`Cart::totals`] derives them from the lines.

use rust_decimal::{Decimal, RoundingStrategy};
use serde::{Deserialize, Deserializer, Serialize};
use thiserror::Error;

use crate::catalog::Product;
use crate::types::ProductId;

/// A violated transition precondition.
#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum CartError {
    #[error("product {0} is already in the cart")]
    AlreadyInCart(ProductId),
    #[error("product {0} is not in the cart")]
    NotInCart(ProductId),
}

/// One product's entry in the cart.
///
/// Serializes as the product's flat record plus an `amount` field.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CartLineItem {
    #[serde(flatten)]
    product: Product,
    amount: u32,
}

impl CartLineItem {
    fn new(product: Product) -> Self {
        Self { product, amount: 1 }
    }

    #[must_use]
    pub const fn product(&self) -> &Product {
        &self.product
    }

    #[must_use]
    pub const fn id(&self) -> &ProductId {
        &self.product.id
    }

    /// Quantity of this product, always at least one.
    #[must_use]
    pub const fn amount(&self) -> u32 {
        self.amount
    }

    /// Unit price times amount, unrounded.
    #[must_use]
    pub fn line_total(&self) -> Decimal {
        self.product.price * self.amount
    }
}

impl<'de> Deserialize<'de> for CartLineItem {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        #[derive(Deserialize)]
        struct Raw {
            #[serde(flatten)]
            product: Product,
            amount: u32,
        }

        let raw = Raw::deserialize(deserializer)?;
        if raw.amount == 0 {
            return Err(serde::de::Error::custom(format!(
                "line item {} has amount 0",
                raw.product.id
            )));
        }
        Ok(Self {
            product: raw.product,
            amount: raw.amount,
        })
    }
}

/// Outcome of [`Cart::decrement_amount`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Decrement {
    /// The line is still in the cart with this amount.
    Remaining(u32),
    /// The amount reached zero and the line was removed.
    Removed(CartLineItem),
}

/// Derived cart totals.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct CartTotals {
    /// Sum of all line amounts.
    pub item_count: u32,
    /// Sum of price times amount, rounded to cents.
    pub total: Decimal,
}

/// State of a product's "Add to Cart" control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum AddControl {
    Available,
    InCart,
}

impl AddControl {
    #[must_use]
    pub const fn label(self) -> &'static str {
        match self {
            Self::Available => "Add to Cart",
            Self::InCart => "In Cart",
        }
    }

    #[must_use]
    pub const fn is_disabled(self) -> bool {
        matches!(self, Self::InCart)
    }
}

/// The shopper's cart: line items in the order they were added.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(transparent)]
pub struct Cart {
    lines: Vec<CartLineItem>,
}

impl Cart {
    #[must_use]
    pub const fn new() -> Self {
        Self { lines: Vec::new() }
    }

    /// Build a cart from previously persisted lines.
    ///
    /// Later lines repeating an id already seen are dropped so the
    /// one-line-per-id invariant holds for any input.
    #[must_use]
    pub fn from_lines(lines: impl IntoIterator<Item = CartLineItem>) -> Self {
        let mut cart = Self::new();
        for line in lines {
            if !cart.contains(line.id()) {
                cart.lines.push(line);
            }
        }
        cart
    }

    #[must_use]
    pub fn lines(&self) -> &[CartLineItem] {
        &self.lines
    }

    #[must_use]
    pub fn get(&self, id: &ProductId) -> Option<&CartLineItem> {
        self.lines.iter().find(|line| line.id() == id)
    }

    #[must_use]
    pub fn contains(&self, id: &ProductId) -> bool {
        self.get(id).is_some()
    }

    #[must_use]
    pub fn len(&self) -> usize {
        self.lines.len()
    }

    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.lines.is_empty()
    }

    /// How the "Add to Cart" control for `id` should look.
    #[must_use]
    pub fn add_control(&self, id: &ProductId) -> AddControl {
        if self.contains(id) {
            AddControl::InCart
        } else {
            AddControl::Available
        }
    }

    /// Put `product` in the cart with an amount of one.
    ///
    /// # Errors
    ///
    /// Returns `CartError::AlreadyInCart` if a line for this product exists.
    pub fn add_item(&mut self, product: Product) -> Result<(), CartError> {
        if self.contains(&product.id) {
            return Err(CartError::AlreadyInCart(product.id));
        }
        self.lines.push(CartLineItem::new(product));
        Ok(())
    }

    /// Raise the amount of `id` by one and return the new amount.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if there is no line for `id`.
    pub fn increment_amount(&mut self, id: &ProductId) -> Result<u32, CartError> {
        let line = self.line_mut(id)?;
        line.amount = line.amount.saturating_add(1);
        Ok(line.amount)
    }

    /// Lower the amount of `id` by one, removing the line when it reaches zero.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if there is no line for `id`.
    pub fn decrement_amount(&mut self, id: &ProductId) -> Result<Decrement, CartError> {
        let line = self.line_mut(id)?;
        if line.amount > 1 {
            line.amount -= 1;
            return Ok(Decrement::Remaining(line.amount));
        }
        self.remove_item(id).map(Decrement::Removed)
    }

    /// Remove the line for `id` regardless of its amount.
    ///
    /// # Errors
    ///
    /// Returns `CartError::NotInCart` if there is no line for `id`.
    pub fn remove_item(&mut self, id: &ProductId) -> Result<CartLineItem, CartError> {
        let index = self
            .lines
            .iter()
            .position(|line| line.id() == id)
            .ok_or_else(|| CartError::NotInCart(id.clone()))?;
        Ok(self.lines.remove(index))
    }

    /// Empty the cart, returning the removed lines in cart order.
    pub fn clear(&mut self) -> Vec<CartLineItem> {
        std::mem::take(&mut self.lines)
    }

    #[must_use]
    pub fn totals(&self) -> CartTotals {
        let (item_count, total) = self
            .lines
            .iter()
            .fold((0u32, Decimal::ZERO), |(count, total), line| {
                (count.saturating_add(line.amount), total + line.line_total())
            });
        CartTotals {
            item_count,
            total: total.round_dp_with_strategy(2, RoundingStrategy::MidpointAwayFromZero),
        }
    }

    fn line_mut(&mut self, id: &ProductId) -> Result<&mut CartLineItem, CartError> {
        self.lines
            .iter_mut()
            .find(|line| line.id() == id)
            .ok_or_else(|| CartError::NotInCart(id.clone()))
    }
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        Vec::<CartLineItem>::deserialize(deserializer).map(Self::from_lines)
    }
}
