//! Unified error handling for route handlers.
//!
//! Route handlers return `Result<T, AppError>`; the `IntoResponse` impl
//! maps domain errors onto status codes and redirects. User-facing form
//! errors (login/register) are re-rendered inline by their handlers and
//! never reach this type.

use axum::{
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use thiserror::Error;

use crate::db::RepositoryError;
use crate::services::{AuthError, CheckoutError, ReceiptError};

/// Application-level error type for the storefront.
#[derive(Debug, Error)]
pub enum AppError {
    /// Database operation failed.
    #[error("database error: {0}")]
    Database(#[from] RepositoryError),

    /// Authentication infrastructure failed (not a rejected credential).
    #[error("auth error: {0}")]
    Auth(AuthError),

    /// Checkout attempt failed.
    #[error("checkout error: {0}")]
    Checkout(#[from] CheckoutError),

    /// Receipt lookup or rendering failed.
    #[error("receipt error: {0}")]
    Receipt(#[from] ReceiptError),

    /// Session store failure.
    #[error("session error: {0}")]
    Session(#[from] tower_sessions::session::Error),

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),
}

impl IntoResponse for AppError {
    fn into_response(self) -> Response {
        // An empty cart is not a failure: the catalog is the right place
        // to send the client, and nothing was written.
        if matches!(self, Self::Checkout(CheckoutError::EmptyCart)) {
            return Redirect::to("/").into_response();
        }

        let status = match &self {
            Self::NotFound(_) | Self::Receipt(ReceiptError::NotFound(_)) => StatusCode::NOT_FOUND,
            Self::Database(_) | Self::Auth(_) | Self::Checkout(_) | Self::Receipt(_)
            | Self::Session(_) => StatusCode::INTERNAL_SERVER_ERROR,
        };

        if status == StatusCode::INTERNAL_SERVER_ERROR {
            tracing::error!(error = %self, "request error");
        }

        // Don't expose internal error details to clients
        let message = match status {
            StatusCode::NOT_FOUND => "Not found",
            _ => "Internal server error",
        };

        (status, message).into_response()
    }
}

/// Result type alias for `AppError`.
pub type Result<T> = std::result::Result<T, AppError>;

#[cfg(test)]
mod tests {
    use pixelport_core::OrderId;

    use super::*;

    fn status_of(err: AppError) -> StatusCode {
        err.into_response().status()
    }

    #[test]
    fn not_found_maps_to_404() {
        assert_eq!(
            status_of(AppError::NotFound("order 9".to_string())),
            StatusCode::NOT_FOUND
        );
        assert_eq!(
            status_of(AppError::Receipt(ReceiptError::NotFound(OrderId::new(9)))),
            StatusCode::NOT_FOUND
        );
    }

    #[test]
    fn empty_cart_redirects_to_catalog() {
        let response = AppError::Checkout(CheckoutError::EmptyCart).into_response();
        assert!(response.status().is_redirection());
        assert_eq!(
            response
                .headers()
                .get(axum::http::header::LOCATION)
                .and_then(|v| v.to_str().ok()),
            Some("/")
        );
    }

    #[test]
    fn storage_failures_map_to_500() {
        let err = AppError::Database(RepositoryError::Conflict("boom".to_string()));
        assert_eq!(status_of(err), StatusCode::INTERNAL_SERVER_ERROR);
    }
}
