//! Catalog fetching.
//!
//! # Architecture
//!
//! - One request per fetch, no retries; the caller decides what an absent
//!   catalog means (the host renders an empty menu)
//! - HTTP sources are fetched with `reqwest`, file sources with `tokio::fs`
//! - The nested document is flattened into [`Product`]s by [`document`]
//!
//! # Example
//!
//! ```rust,ignore
//! use menu_cart_storefront::catalog::CatalogClient;
//!
//! let client = CatalogClient::new(&config.catalog);
//! match client.fetch_catalog().await {
//!     Ok(products) => shop.install_catalog(products)?,
//!     Err(e) => tracing::error!(error = %e, "Catalog fetch failed"),
//! }
//! ```

pub mod document;

use std::sync::Arc;

use secrecy::{ExposeSecret, SecretString};
use thiserror::Error;
use tracing::{debug, instrument};

use menu_cart_core::Product;

use crate::config::{CatalogConfig, CatalogSource};
use document::CatalogDocument;

/// Errors that can occur while fetching the catalog.
#[derive(Debug, Error)]
pub enum CatalogError {
    /// HTTP request failed.
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The catalog host answered with a non-success status.
    #[error("Catalog responded with HTTP {0}")]
    Status(reqwest::StatusCode),

    /// Reading a local catalog file failed.
    #[error("Failed to read {path}: {source}")]
    Io {
        path: String,
        #[source]
        source: std::io::Error,
    },

    /// The document is not valid JSON or has the wrong shape.
    #[error("Malformed catalog document: {0}")]
    Parse(#[from] serde_json::Error),

    /// An item parsed but cannot become a product.
    #[error("Invalid catalog item {id}: {reason}")]
    InvalidItem { id: String, reason: String },
}

/// Client for the configured catalog source.
#[derive(Clone)]
pub struct CatalogClient {
    inner: Arc<CatalogClientInner>,
}

struct CatalogClientInner {
    client: reqwest::Client,
    source: CatalogSource,
    access_token: Option<SecretString>,
}

impl CatalogClient {
    /// Create a new catalog client.
    #[must_use]
    pub fn new(config: &CatalogConfig) -> Self {
        Self {
            inner: Arc::new(CatalogClientInner {
                client: reqwest::Client::new(),
                source: config.source.clone(),
                access_token: config.access_token.clone(),
            }),
        }
    }

    /// The source this client reads from.
    #[must_use]
    pub fn source(&self) -> &CatalogSource {
        &self.inner.source
    }

    /// Fetch and flatten the catalog.
    ///
    /// # Errors
    ///
    /// Returns `CatalogError` on transport failure, non-success status,
    /// a malformed document, or an invalid item.
    #[instrument(skip(self), fields(source = %self.inner.source))]
    pub async fn fetch_catalog(&self) -> Result<Vec<Product>, CatalogError> {
        let body = match &self.inner.source {
            CatalogSource::Http(url) => self.fetch_http(url).await?,
            CatalogSource::File(path) => {
                tokio::fs::read_to_string(path)
                    .await
                    .map_err(|source| CatalogError::Io {
                        path: path.display().to_string(),
                        source,
                    })?
            }
        };

        let document: CatalogDocument = match serde_json::from_str(&body) {
            Ok(document) => document,
            Err(e) => {
                tracing::error!(
                    error = %e,
                    body = %body.chars().take(500).collect::<String>(),
                    "Failed to parse catalog document"
                );
                return Err(CatalogError::Parse(e));
            }
        };

        let products = document.into_products()?;
        debug!(count = products.len(), "Catalog fetched");
        Ok(products)
    }

    async fn fetch_http(&self, url: &url::Url) -> Result<String, CatalogError> {
        let mut request = self
            .inner
            .client
            .get(url.as_str())
            .header("Accept", "application/json");
        if let Some(token) = &self.inner.access_token {
            request = request.bearer_auth(token.expose_secret());
        }

        let response = request.send().await?;
        let status = response.status();
        if !status.is_success() {
            return Err(CatalogError::Status(status));
        }
        Ok(response.text().await?)
    }
}
