//! Application state shared across handlers.

use std::sync::Arc;

use tokio::sync::{Mutex, MutexGuard};

use crate::widget::Shop;

/// Application state shared across all handlers.
///
/// The widget serves one device, so a single [`Shop`] behind a mutex is the
/// whole of it. Holding the guard for the length of an interaction keeps the
/// persisted cart and the patches returned for it in step.
#[derive(Clone)]
pub struct AppState {
    inner: Arc<AppStateInner>,
}

struct AppStateInner {
    shop: Mutex<Shop>,
}

impl AppState {
    #[must_use]
    pub fn new(shop: Shop) -> Self {
        Self {
            inner: Arc::new(AppStateInner {
                shop: Mutex::new(shop),
            }),
        }
    }

    /// Lock the shop for one interaction.
    pub async fn shop(&self) -> MutexGuard<'_, Shop> {
        self.inner.shop.lock().await
    }
}
