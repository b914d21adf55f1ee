//! Unified error handling with Sentry integration.
//!
//! Route handlers return `Result<T, AppError>`. Server-side failures are
//! captured to Sentry before the response is built; rejected interactions are
//! answered with a status the widget script can act on.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Response},
};
use thiserror::Error;

use crate::widget::ShopError;

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// A widget interaction failed.
    #[error(transparent)]
    Shop(#[from] ShopError),
}

impl AppError {
    /// Whether this error is a server-side failure worth reporting.
    #[must_use]
    pub const fn is_server_error(&self) -> bool {
        matches!(self, Self::Shop(ShopError::Storage(_) | ShopError::Render(_)))
    }

    #[must_use]
    pub const fn status(&self) -> StatusCode {
        match self {
            Self::Shop(ShopError::Cart(_)) => StatusCode::CONFLICT,
            Self::Shop(ShopError::UnknownProduct(_) | ShopError::Accordion(_)) => {
                StatusCode::NOT_FOUND
            }
            Self::Shop(ShopError::Storage(_) | ShopError::Render(_)) => {
                StatusCode::INTERNAL_SERVER_ERROR
            }
        }
    }
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        if self.is_server_error() {
            let event_id = sentry::capture_error(&self);
            tracing::error!(
                error = %self,
                sentry_event_id = %event_id,
                "Request error"
            );
        } else {
            tracing::debug!(error = %self, "Interaction rejected");
        }

        // Don't expose internal error details to clients
        let message = if self.is_server_error() {
            "Internal server error".to_string()
        } else {
            self.to_string()
        };

        (self.status(), message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;
