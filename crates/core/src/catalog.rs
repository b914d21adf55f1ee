//! Catalog products and category filtering.

use std::collections::HashSet;
use std::convert::Infallible;
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};

use crate::types::{Price, ProductId};

/// Name of the synthetic category that matches every product.
pub const ALL_CATEGORIES: &str = "all";

/// A purchasable product as fetched from the catalog.
///
/// The serialized field names (`desc`, `img`) match the device snapshot format
/// so snapshots written by earlier widget versions stay readable.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Product {
    pub id: ProductId,
    pub name: String,
    #[serde(rename = "desc", alias = "description")]
    pub description: String,
    pub price: Price,
    pub category: Category,
    #[serde(rename = "img", alias = "imageUrl")]
    pub image_url: String,
}

/// A catalog category name.
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct Category(String);

impl Category {
    #[must_use]
    pub fn new(name: impl Into<String>) -> Self {
        Self(name.into())
    }

    #[must_use]
    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl From<&str> for Category {
    fn from(name: &str) -> Self {
        Self(name.to_owned())
    }
}

/// Which part of the catalog the menu shows.
#[derive(Debug, Clone, Default, PartialEq, Eq, Hash)]
pub enum CategoryFilter {
    /// Every product (the synthetic "all" control).
    #[default]
    All,
    /// Products of one category.
    Only(Category),
}

impl CategoryFilter {
    /// The value carried by the filter control (`data-id`).
    #[must_use]
    pub fn key(&self) -> &str {
        match self {
            Self::All => ALL_CATEGORIES,
            Self::Only(category) => category.as_str(),
        }
    }

    /// Whether `product` is shown under this filter.
    #[must_use]
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Self::All => true,
            Self::Only(category) => &product.category == category,
        }
    }

    /// The products shown under this filter, in catalog order.
    #[must_use]
    pub fn apply<'a>(&self, products: &'a [Product]) -> Vec<&'a Product> {
        products.iter().filter(|p| self.matches(p)).collect()
    }
}

impl FromStr for CategoryFilter {
    type Err = Infallible;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Ok(if s == ALL_CATEGORIES {
            Self::All
        } else {
            Self::Only(Category::from(s))
        })
    }
}

impl fmt::Display for CategoryFilter {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.key())
    }
}

/// Distinct categories of `products` in first-seen order, led by "all".
///
/// A real category literally named "all" folds into the synthetic one.
#[must_use]
pub fn categories(products: &[Product]) -> Vec<CategoryFilter> {
    let mut seen = HashSet::new();
    let mut filters = vec![CategoryFilter::All];
    for product in products {
        let filter = CategoryFilter::from_str(product.category.as_str()).unwrap_or_default();
        if filter != CategoryFilter::All && seen.insert(product.category.clone()) {
            filters.push(filter);
        }
    }
    filters
}

/// The first product id that appears more than once, if any.
#[must_use]
pub fn duplicate_id(products: &[Product]) -> Option<&ProductId> {
    let mut seen = HashSet::new();
    products.iter().map(|p| &p.id).find(|id| !seen.insert(*id))
}

#[cfg(test)]
pub(crate) mod tests {
    use super::*;

    pub(crate) fn product(id: &str, cents: i64, category: &str) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            description: format!("Description of {id}"),
            price: Price::from_cents(cents).unwrap_or(Price::ZERO),
            category: Category::from(category),
            image_url: format!("./images/{id}.jpeg"),
        }
    }

    #[test]
    fn test_categories_first_seen_deduplicated() {
        let products = vec![
            product("1", 100, "A"),
            product("2", 100, "B"),
            product("3", 100, "A"),
            product("4", 100, "C"),
        ];
        let keys: Vec<String> = categories(&products)
            .iter()
            .map(ToString::to_string)
            .collect();
        assert_eq!(keys, ["all", "A", "B", "C"]);
    }

    #[test]
    fn test_categories_of_empty_catalog_is_all_only() {
        assert_eq!(categories(&[]), vec![CategoryFilter::All]);
    }

    #[test]
    fn test_category_named_all_is_not_duplicated() {
        let products = vec![product("1", 100, "all"), product("2", 100, "B")];
        assert_eq!(categories(&products).len(), 2);
    }

    #[test]
    fn test_filter_apply() {
        let products = vec![
            product("1", 100, "breakfast"),
            product("2", 100, "lunch"),
            product("3", 100, "breakfast"),
        ];
        let breakfast: CategoryFilter = "breakfast".parse().unwrap_or_default();
        let ids: Vec<&str> = breakfast
            .apply(&products)
            .iter()
            .map(|p| p.id.as_str())
            .collect();
        assert_eq!(ids, ["1", "3"]);
        assert_eq!(CategoryFilter::All.apply(&products).len(), 3);
    }

    #[test]
    fn test_duplicate_id() {
        let products = vec![product("1", 100, "a"), product("2", 100, "a")];
        assert!(duplicate_id(&products).is_none());

        let products = vec![
            product("1", 100, "a"),
            product("2", 100, "a"),
            product("1", 200, "b"),
        ];
        assert_eq!(duplicate_id(&products), Some(&ProductId::new("1")));
    }

    #[test]
    fn test_product_snapshot_field_names() {
        let json = serde_json::to_value(product("p1", 1000, "x")).unwrap_or_default();
        assert_eq!(json["desc"], "Description of p1");
        assert_eq!(json["img"], "./images/p1.jpeg");
        assert_eq!(json["price"], "10.00");
    }
}
