//! Device-local persistence for the catalog snapshot and the cart.
//!
//! [`KeyValueStore`] is the synchronous string store the widget persists into
//! ([`FileStore`] on a device, [`MemoryStore`] in tests). [`Storage`] layers the
//! two JSON records on top of it:
//!
//! | key         | value                                   |
//! |-------------|-----------------------------------------|
//! | `menuItems` | array of flat product records           |
//! | `cart`      | array of flat product records + `amount`|
//!
//! Snapshots carry no schema version.

use std::collections::HashMap;
use std::fs;
use std::io::Write;
use std::path::PathBuf;

use thiserror::Error;

use menu_cart_core::{Cart, Product, ProductId};

/// Storage key of the catalog snapshot.
pub const CATALOG_KEY: &str = "menuItems";
/// Storage key of the cart snapshot.
pub const CART_KEY: &str = "cart";

/// Errors from the persistence layer.
#[derive(Debug, Error)]
pub enum StorageError {
    /// Reading or writing the underlying store failed.
    #[error("Storage I/O error on {key}: {source}")]
    Io {
        key: String,
        #[source]
        source: std::io::Error,
    },

    /// A stored record could not be decoded.
    #[error("Stored {key} record is corrupt: {source}")]
    Corrupt {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// A value could not be encoded.
    #[error("Failed to encode {key}: {source}")]
    Encode {
        key: String,
        #[source]
        source: serde_json::Error,
    },

    /// The key cannot be used as a file name.
    #[error("Invalid storage key: {0}")]
    InvalidKey(String),
}

/// A synchronous string key-value store scoped to the device.
pub trait KeyValueStore: Send {
    /// Read the value under `key`, if any.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be read.
    fn get(&self, key: &str) -> Result<Option<String>, StorageError>;

    /// Write `value` under `key`, replacing any previous value.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError>;

    /// Delete `key`. Deleting an absent key is not an error.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the store cannot be written.
    fn remove(&mut self, key: &str) -> Result<(), StorageError>;
}

/// In-memory store.
#[derive(Debug, Default, Clone)]
pub struct MemoryStore {
    entries: HashMap<String, String>,
}

impl MemoryStore {
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }
}

impl KeyValueStore for MemoryStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        Ok(self.entries.get(key).cloned())
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        self.entries.insert(key.to_string(), value.to_string());
        Ok(())
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        self.entries.remove(key);
        Ok(())
    }
}

/// One `<key>.json` file per key in a directory.
///
/// Writes go to a temporary file in the same directory and are renamed into
/// place, so a crash never leaves a half-written record.
#[derive(Debug, Clone)]
pub struct FileStore {
    dir: PathBuf,
}

impl FileStore {
    /// Open (and create if needed) a store rooted at `dir`.
    ///
    /// # Errors
    ///
    /// Returns `StorageError::Io` if the directory cannot be created.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self, StorageError> {
        let dir = dir.into();
        fs::create_dir_all(&dir).map_err(|source| StorageError::Io {
            key: dir.display().to_string(),
            source,
        })?;
        Ok(Self { dir })
    }

    fn path_for(&self, key: &str) -> Result<PathBuf, StorageError> {
        let valid = !key.is_empty()
            && key
                .chars()
                .all(|c| c.is_ascii_alphanumeric() || c == '_' || c == '-');
        if !valid {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.dir.join(format!("{key}.json")))
    }
}

impl KeyValueStore for FileStore {
    fn get(&self, key: &str) -> Result<Option<String>, StorageError> {
        let path = self.path_for(key)?;
        match fs::read_to_string(&path) {
            Ok(value) => Ok(Some(value)),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn set(&mut self, key: &str, value: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };

        let tmp = self.dir.join(format!(".{key}.json.tmp"));
        let mut file = fs::File::create(&tmp).map_err(io_err)?;
        file.write_all(value.as_bytes()).map_err(io_err)?;
        file.sync_all().map_err(io_err)?;
        fs::rename(&tmp, &path).map_err(io_err)
    }

    fn remove(&mut self, key: &str) -> Result<(), StorageError> {
        let path = self.path_for(key)?;
        match fs::remove_file(path) {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(()),
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }
}

/// The widget's two persisted records.
pub struct Storage {
    store: Box<dyn KeyValueStore>,
}

impl std::fmt::Debug for Storage {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("Storage").finish_non_exhaustive()
    }
}

impl Storage {
    pub fn new(store: impl KeyValueStore + 'static) -> Self {
        Self {
            store: Box::new(store),
        }
    }

    /// Storage backed by a [`MemoryStore`].
    #[must_use]
    pub fn in_memory() -> Self {
        Self::new(MemoryStore::new())
    }

    /// Replace the catalog snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be encoded or written.
    pub fn save_catalog_snapshot(&mut self, products: &[Product]) -> Result<(), StorageError> {
        self.write_json(CATALOG_KEY, &products)
    }

    /// The whole catalog snapshot, if one was saved.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be read or decoded.
    pub fn load_catalog_snapshot(&self) -> Result<Option<Vec<Product>>, StorageError> {
        self.read_json(CATALOG_KEY)
    }

    /// Look up one product in the catalog snapshot.
    ///
    /// A snapshot that cannot be decoded is treated as absent.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be read.
    pub fn get_product(&self, id: &ProductId) -> Result<Option<Product>, StorageError> {
        let products = match self.load_catalog_snapshot() {
            Ok(products) => products,
            Err(e @ StorageError::Corrupt { .. }) => {
                tracing::warn!(error = %e, "Ignoring unreadable catalog snapshot");
                None
            }
            Err(e) => return Err(e),
        };
        Ok(products.and_then(|products| products.into_iter().find(|p| &p.id == id)))
    }

    /// Replace the cart snapshot.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the cart cannot be encoded or written.
    pub fn save_cart(&mut self, cart: &Cart) -> Result<(), StorageError> {
        self.write_json(CART_KEY, cart)
    }

    /// The persisted cart, or an empty one if it is absent or unreadable.
    #[must_use]
    pub fn load_cart(&self) -> Cart {
        match self.try_load_cart() {
            Ok(cart) => cart.unwrap_or_default(),
            Err(e) => {
                tracing::warn!(error = %e, "Ignoring unreadable cart snapshot");
                Cart::new()
            }
        }
    }

    /// The persisted cart, distinguishing absent from unreadable.
    ///
    /// # Errors
    ///
    /// Returns `StorageError` if the snapshot cannot be read or decoded.
    pub fn try_load_cart(&self) -> Result<Option<Cart>, StorageError> {
        self.read_json(CART_KEY)
    }

    fn write_json<T: serde::Serialize + ?Sized>(
        &mut self,
        key: &str,
        value: &T,
    ) -> Result<(), StorageError> {
        let json = serde_json::to_string(value).map_err(|source| StorageError::Encode {
            key: key.to_string(),
            source,
        })?;
        self.store.set(key, &json)
    }

    fn read_json<T: serde::de::DeserializeOwned>(
        &self,
        key: &str,
    ) -> Result<Option<T>, StorageError> {
        let Some(json) = self.store.get(key)? else {
            return Ok(None);
        };
        serde_json::from_str(&json)
            .map(Some)
            .map_err(|source| StorageError::Corrupt {
                key: key.to_string(),
                source,
            })
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use menu_cart_core::{Category, Price};

    use super::*;

    fn product(id: &str, cents: i64) -> Product {
        Product {
            id: ProductId::new(id),
            name: format!("Item {id}"),
            description: String::new(),
            price: Price::from_cents(cents).unwrap(),
            category: Category::from("x"),
            image_url: format!("{id}.jpeg"),
        }
    }

    #[test]
    fn test_get_product_from_snapshot() {
        let mut storage = Storage::in_memory();
        assert_eq!(storage.get_product(&ProductId::new("p1")).unwrap(), None);

        storage
            .save_catalog_snapshot(&[product("p1", 1000), product("p2", 250)])
            .unwrap();
        let found = storage.get_product(&ProductId::new("p2")).unwrap().unwrap();
        assert_eq!(found.price, Price::from_cents(250).unwrap());
        assert_eq!(storage.get_product(&ProductId::new("p3")).unwrap(), None);
    }

    #[test]
    fn test_corrupt_catalog_snapshot_has_no_products() {
        let mut store = MemoryStore::new();
        store.set(CATALOG_KEY, "{garbage").unwrap();
        let storage = Storage::new(store);
        assert!(matches!(
            storage.load_catalog_snapshot(),
            Err(StorageError::Corrupt { .. })
        ));
        assert_eq!(storage.get_product(&ProductId::new("p1")).unwrap(), None);
    }

    #[test]
    fn test_cart_round_trip() {
        let mut storage = Storage::in_memory();
        let mut cart = Cart::new();
        cart.add_item(product("p1", 1000)).unwrap();
        cart.add_item(product("p2", 399)).unwrap();
        cart.increment_amount(&ProductId::new("p1")).unwrap();

        storage.save_cart(&cart).unwrap();
        assert_eq!(storage.load_cart(), cart);
    }

    #[test]
    fn test_absent_cart_is_empty() {
        let storage = Storage::in_memory();
        assert!(storage.try_load_cart().unwrap().is_none());
        assert!(storage.load_cart().is_empty());
    }

    #[test]
    fn test_corrupt_cart_is_empty() {
        let mut store = MemoryStore::new();
        store.set(CART_KEY, "{not json").unwrap();
        let storage = Storage::new(store);
        assert!(matches!(
            storage.try_load_cart(),
            Err(StorageError::Corrupt { .. })
        ));
        assert!(storage.load_cart().is_empty());
    }

    #[test]
    fn test_file_store_persists_across_instances() {
        let dir = tempfile::tempdir().unwrap();
        let mut cart = Cart::new();
        cart.add_item(product("p1", 1000)).unwrap();

        let mut storage = Storage::new(FileStore::open(dir.path()).unwrap());
        storage.save_cart(&cart).unwrap();
        drop(storage);

        let reopened = Storage::new(FileStore::open(dir.path()).unwrap());
        assert_eq!(reopened.load_cart(), cart);
        assert!(dir.path().join("cart.json").exists());
    }

    #[test]
    fn test_file_store_remove_and_missing_keys() {
        let dir = tempfile::tempdir().unwrap();
        let mut store = FileStore::open(dir.path().join("nested")).unwrap();
        assert_eq!(store.get("cart").unwrap(), None);

        store.set("cart", "[]").unwrap();
        assert_eq!(store.get("cart").unwrap().as_deref(), Some("[]"));

        store.remove("cart").unwrap();
        store.remove("cart").unwrap();
        assert_eq!(store.get("cart").unwrap(), None);
    }

    #[test]
    fn test_file_store_rejects_path_like_keys() {
        let dir = tempfile::tempdir().unwrap();
        let store = FileStore::open(dir.path()).unwrap();
        assert!(matches!(
            store.get("../cart"),
            Err(StorageError::InvalidKey(_))
        ));
    }
}
