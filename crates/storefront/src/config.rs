//! Storefront configuration loaded from environment variables.
//!
//! # Environment Variables
//!
//! All variables are optional.
//!
//! - `MENU_CART_HOST` - Bind address (default: 127.0.0.1)
//! - `MENU_CART_PORT` - Listen port (default: 3000)
//! - `MENU_CART_CATALOG_URL` - Catalog document: `http(s)://` URL, `file://` URL or
//!   a filesystem path (default: `crates/storefront/static/products.json`)
//! - `MENU_CART_CATALOG_TOKEN` - Bearer token sent with HTTP catalog requests
//! - `MENU_CART_DATA_DIR` - Device storage directory (default: `.menu-cart`)
//! - `MENU_CART_FAQ_PATH` - FAQ markdown file (default: `crates/storefront/content/faq.md`)
//! - `SENTRY_DSN` - Sentry error tracking DSN
//! - `SENTRY_ENVIRONMENT` - Sentry environment name

use std::net::{IpAddr, SocketAddr};
use std::path::PathBuf;

use secrecy::SecretString;
use thiserror::Error;
use url::Url;

const DEFAULT_CATALOG: &str = "crates/storefront/static/products.json";
const DEFAULT_DATA_DIR: &str = ".menu-cart";
const DEFAULT_FAQ_PATH: &str = "crates/storefront/content/faq.md";

/// Configuration errors that can occur during loading.
#[derive(Debug, Error)]
pub enum ConfigError {
    #[error("Invalid environment variable {0}: {1}")]
    InvalidEnvVar(String, String),
}

/// Where the catalog document lives.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum CatalogSource {
    /// Fetched with an HTTP GET.
    Http(Url),
    /// Read from the local filesystem.
    File(PathBuf),
}

impl CatalogSource {
    /// Parse a URL or path.
    ///
    /// # Errors
    ///
    /// Returns a message if the value looks like a URL but is not a usable one.
    pub fn parse(value: &str) -> Result<Self, String> {
        if value.starts_with("http://") || value.starts_with("https://") {
            return Url::parse(value)
                .map(Self::Http)
                .map_err(|e| e.to_string());
        }
        if value.starts_with("file://") {
            let url = Url::parse(value).map_err(|e| e.to_string())?;
            return url
                .to_file_path()
                .map(Self::File)
                .map_err(|()| format!("not a local file URL: {value}"));
        }
        if value.contains("://") {
            return Err(format!("unsupported catalog scheme: {value}"));
        }
        Ok(Self::File(PathBuf::from(value)))
    }
}

impl std::fmt::Display for CatalogSource {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Http(url) => write!(f, "{url}"),
            Self::File(path) => write!(f, "{}", path.display()),
        }
    }
}

/// Catalog fetch configuration.
///
/// Implements `Debug` manually to redact the token.
#[derive(Clone)]
pub struct CatalogConfig {
    pub source: CatalogSource,
    /// Bearer token for HTTP sources
    pub access_token: Option<SecretString>,
}

impl std::fmt::Debug for CatalogConfig {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("CatalogConfig")
            .field("source", &self.source)
            .field(
                "access_token",
                &self.access_token.as_ref().map(|_| "[REDACTED]"),
            )
            .finish()
    }
}

impl CatalogConfig {
    /// Load the catalog settings on their own (used by the CLI).
    ///
    /// # Errors
    ///
    /// Returns `ConfigError::InvalidEnvVar` if `MENU_CART_CATALOG_URL` is unusable.
    pub fn from_env() -> Result<Self, ConfigError> {
        let raw = get_env_or_default("MENU_CART_CATALOG_URL", DEFAULT_CATALOG);
        let source = CatalogSource::parse(&raw)
            .map_err(|e| ConfigError::InvalidEnvVar("MENU_CART_CATALOG_URL".to_string(), e))?;
        let access_token = get_optional_env("MENU_CART_CATALOG_TOKEN").map(SecretString::from);
        Ok(Self {
            source,
            access_token,
        })
    }
}

/// Storefront application configuration.
#[derive(Debug, Clone)]
pub struct StorefrontConfig {
    /// IP address to bind the server to
    pub host: IpAddr,
    /// Port to listen on
    pub port: u16,
    /// Catalog document location
    pub catalog: CatalogConfig,
    /// Device storage directory
    pub data_dir: PathBuf,
    /// FAQ markdown file
    pub faq_path: PathBuf,
    /// Sentry DSN for error tracking
    pub sentry_dsn: Option<String>,
    /// Sentry environment name
    pub sentry_environment: Option<String>,
}

impl StorefrontConfig {
    /// Load configuration from environment variables.
    ///
    /// Calls `dotenvy::dotenv()` to load from `.env` file if present.
    ///
    /// # Errors
    ///
    /// Returns `ConfigError` if a variable is set to an invalid value.
    pub fn from_env() -> Result<Self, ConfigError> {
        // Load .env file if present (ignore errors if not found)
        let _ = dotenvy::dotenv();

        let host = get_env_or_default("MENU_CART_HOST", "127.0.0.1")
            .parse::<IpAddr>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MENU_CART_HOST".to_string(), e.to_string())
            })?;
        let port = get_env_or_default("MENU_CART_PORT", "3000")
            .parse::<u16>()
            .map_err(|e| {
                ConfigError::InvalidEnvVar("MENU_CART_PORT".to_string(), e.to_string())
            })?;

        Ok(Self {
            host,
            port,
            catalog: CatalogConfig::from_env()?,
            data_dir: data_dir_from_env(),
            faq_path: PathBuf::from(get_env_or_default("MENU_CART_FAQ_PATH", DEFAULT_FAQ_PATH)),
            sentry_dsn: get_optional_env("SENTRY_DSN"),
            sentry_environment: get_optional_env("SENTRY_ENVIRONMENT"),
        })
    }

    /// Returns the socket address for binding the server.
    #[must_use]
    pub const fn socket_addr(&self) -> SocketAddr {
        SocketAddr::new(self.host, self.port)
    }
}

/// The device storage directory (`MENU_CART_DATA_DIR`).
#[must_use]
pub fn data_dir_from_env() -> PathBuf {
    PathBuf::from(get_env_or_default("MENU_CART_DATA_DIR", DEFAULT_DATA_DIR))
}

// =============================================================================
// Helper Functions
// =============================================================================

/// Get an optional environment variable, treating empty values as unset.
fn get_optional_env(key: &str) -> Option<String> {
    std::env::var(key).ok().filter(|v| !v.is_empty())
}

/// Get an environment variable with a default value.
fn get_env_or_default(key: &str, default: &str) -> String {
    get_optional_env(key).unwrap_or_else(|| default.to_string())
}
