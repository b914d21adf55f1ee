//! CLI command implementations.

pub mod cart;
pub mod catalog;

use std::path::Path;

use menu_cart_storefront::storage::{FileStore, Storage, StorageError};

/// Open the device storage under `dir`.
///
/// # Errors
///
/// Returns `StorageError` if the directory cannot be created.
pub fn open_storage(dir: &Path) -> Result<Storage, StorageError> {
    tracing::debug!(dir = %dir.display(), "Opening device storage");
    Ok(Storage::new(FileStore::open(dir)?))
}
