//! Newtype IDs for type-safe entity references.
//!
//! Catalog identifiers are assigned by the remote catalog, so they are opaque
//! strings rather than database integers. Use the `define_id!` macro to create
//! wrappers that prevent accidentally mixing IDs from different sources.

/// Macro to define a type-safe string ID wrapper.
///
/// Creates a newtype wrapper around `String` with:
/// - `Serialize`/`Deserialize` with `#[serde(transparent)]`
/// - `Debug`, `Clone`, `PartialEq`, `Eq`, `Hash`, `PartialOrd`, `Ord`
/// - Conversion methods: `new()`, `as_str()`, `into_inner()`
/// - `From<&str>`, `From<String>` and `AsRef<str>` implementations
///
/// # Example
///
/// ```rust
/// # use menu_cart_core::define_id;
/// define_id!(SkuId);
/// define_id!(SupplierId);
///
/// let sku = SkuId::new("a-1");
/// let supplier = SupplierId::new("a-1");
///
/// // These are different types, so this won't compile:
/// // let _: SkuId = supplier;
/// assert_eq!(sku.as_str(), supplier.as_str());
/// ```
#[macro_export]
macro_rules! define_id {
    ($name:ident) => {
        #[derive(
            Debug,
            Clone,
            PartialEq,
            Eq,
            Hash,
            PartialOrd,
            Ord,
            ::serde::Serialize,
            ::serde::Deserialize
        )]
        #[serde(transparent)]
        pub struct $name(String);

        impl $name {
            /// Create a new ID from any string-like value.
            #[must_use]
            pub fn new(id: impl Into<String>) -> Self {
                Self(id.into())
            }

            /// Borrow the underlying string.
            #[must_use]
            pub fn as_str(&self) -> &str {
                &self.0
            }

            /// Consume the ID and return the underlying string.
            #[must_use]
            pub fn into_inner(self) -> String {
                self.0
            }
        }

        impl ::core::fmt::Display for $name {
            fn fmt(&self, f: &mut ::core::fmt::Formatter<'_>) -> ::core::fmt::Result {
                f.write_str(&self.0)
            }
        }

        impl From<&str> for $name {
            fn from(id: &str) -> Self {
                Self(id.to_owned())
            }
        }

        impl From<String> for $name {
            fn from(id: String) -> Self {
                Self(id)
            }
        }

        impl AsRef<str> for $name {
            fn as_ref(&self) -> &str {
                &self.0
            }
        }
    };
}

define_id!(ProductId);

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_id_serializes_transparently() {
        let id = ProductId::new("p1");
        assert_eq!(serde_json::to_string(&id).ok().as_deref(), Some("\"p1\""));
    }

    #[test]
    fn test_product_id_display_and_conversions() {
        let id = ProductId::from("latte");
        assert_eq!(id.to_string(), "latte");
        assert_eq!(id.as_ref(), "latte");
        assert_eq!(id.clone().into_inner(), "latte".to_string());
        assert_eq!(id, ProductId::from("latte".to_string()));
    }
}
