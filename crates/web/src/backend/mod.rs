//! Business backend REST API client.
//!
//! # Architecture
//!
//! - The backend is the source of truth for accounts, catalog, cart,
//!   bookings, payments, and feedback; this tier never persists any of it.
//! - Plain JSON over HTTP via `reqwest`; authenticated endpoints carry the
//!   session's bearer token in an `Authorization` header.
//! - Response shapes are inconsistent across endpoints - some wrap payloads
//!   in `{ success, message, ... }` envelopes, some return bare arrays.
//!   [`types`] models each endpoint as it actually responds.
//!
//! # Example
//!
//! ```rust,ignore
//! use ride_revive_web::backend::BackendClient;
//!
//! let client = BackendClient::new(&config.backend)?;
//!
//! // Authenticate and fetch the customer's cart
//! let login = client.login(&LoginRequest { email, password }).await?;
//! let items = client.cart_items(&login.token).await?;
//! ```

mod client;
pub mod types;

pub use client::BackendClient;
pub use types::*;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur when calling the business backend.
#[derive(Debug, Error)]
pub enum ApiError {
    /// HTTP transport failed (connect, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The backend rejected the request.
    ///
    /// Carries the backend's own `message` when one was provided, so the
    /// caller can surface it as a flash notice.
    #[error("backend rejected request ({status}): {message}")]
    Rejected {
        /// HTTP status returned by the backend.
        status: StatusCode,
        /// Backend-provided message, or a generic fallback.
        message: String,
    },

    /// The response body did not match the expected shape.
    #[error("failed to decode backend response: {0}")]
    Decode(#[from] serde_json::Error),

    /// A request path could not be joined onto the configured base URL.
    #[error("invalid backend URL: {0}")]
    InvalidUrl(#[from] url::ParseError),
}

impl ApiError {
    /// The backend-provided message, if the failure carried one.
    ///
    /// Used by handlers to forward the backend's own wording into a flash
    /// notice instead of a generic error.
    #[must_use]
    pub fn backend_message(&self) -> Option<&str> {
        match self {
            Self::Rejected { message, .. } => Some(message),
            _ => None,
        }
    }
}
