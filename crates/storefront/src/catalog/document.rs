//! Wire types for the catalog document.
//!
//! The remote document nests each product's data in a `fields` group and its
//! identity in a `sys` group, with the image URL buried under an asset
//! reference:
//!
//! ```json
//! { "items": [ { "sys": { "id": "1" },
//!                "fields": { "name": "buttermilk pancakes", "desc": "…",
//!                            "price": 15.99, "category": "breakfast",
//!                            "img": { "fields": { "file": { "url": "/static/images/item-1.svg" } } } } } ] }
//! ```

use rust_decimal::Decimal;
use serde::Deserialize;

use menu_cart_core::{Category, Price, Product, ProductId};

use super::CatalogError;

#[derive(Debug, Deserialize)]
pub struct CatalogDocument {
    pub items: Vec<CatalogEntry>,
}

#[derive(Debug, Deserialize)]
pub struct CatalogEntry {
    pub sys: EntrySys,
    pub fields: EntryFields,
}

#[derive(Debug, Deserialize)]
pub struct EntrySys {
    pub id: String,
}

#[derive(Debug, Deserialize)]
pub struct EntryFields {
    pub name: String,
    #[serde(default)]
    pub desc: String,
    pub price: Decimal,
    pub category: String,
    pub img: AssetLink,
}

#[derive(Debug, Deserialize)]
pub struct AssetLink {
    pub fields: AssetFields,
}

#[derive(Debug, Deserialize)]
pub struct AssetFields {
    pub file: AssetFile,
}

#[derive(Debug, Deserialize)]
pub struct AssetFile {
    pub url: String,
}

impl TryFrom<CatalogEntry> for Product {
    type Error = CatalogError;

    fn try_from(entry: CatalogEntry) -> Result<Self, Self::Error> {
        let CatalogEntry { sys, fields } = entry;
        let price = Price::new(fields.price).map_err(|e| CatalogError::InvalidItem {
            id: sys.id.clone(),
            reason: e.to_string(),
        })?;

        Ok(Self {
            id: ProductId::new(sys.id),
            name: fields.name,
            description: fields.desc,
            price,
            category: Category::new(fields.category),
            image_url: fields.img.fields.file.url,
        })
    }
}

impl CatalogDocument {
    /// Flatten the document into products, in document order.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError::InvalidItem` for an item with a negative price
    /// or an id used by an earlier item.
    pub fn into_products(self) -> Result<Vec<Product>, CatalogError> {
        let products = self
            .items
            .into_iter()
            .map(Product::try_from)
            .collect::<Result<Vec<_>, _>>()?;

        if let Some(id) = menu_cart_core::catalog::duplicate_id(&products) {
            return Err(CatalogError::InvalidItem {
                id: id.to_string(),
                reason: "duplicate id".to_string(),
            });
        }
        Ok(products)
    }
}
