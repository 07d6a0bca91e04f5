//! Voidwear commerce REST API client.
//!
//! # Architecture
//!
//! - The commerce API is the source of truth - NO local sync, direct calls
//! - Every response is parsed into an explicit serde struct at this boundary
//! - Category and color lookups are cached in-memory via `moka` (5 minute TTL)
//! - Errors carry the server's structured `detail` payload when one exists
//!
//! # Identity
//!
//! Each request carries the caller's [`Identity`]: a bearer token for
//! authenticated users, or an `X-Guest-Session-ID` header for anonymous
//! shoppers. Neither is stored in the client itself - identity always comes
//! from the request's session.
//!
//! # Example
//!
//! ```rust,ignore
//! use voidwear_storefront::api::{ApiClient, Identity};
//!
//! let client = ApiClient::new(&config.commerce_api);
//! let identity = Identity::guest("2c5ea4c0-4067-11e9-8bad-9b1deb4d3b7d");
//!
//! let cart = client.fetch_cart(&identity).await?;
//! let cart = client.add_item(&identity, variant_id, 1).await?;
//! ```

mod client;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;

pub mod account;
pub mod cart;
pub mod catalog;
pub mod checkout;
pub mod orders;
pub mod wishlist;

pub use client::ApiClient;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors that can occur when calling the commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (connection refused, timeout, TLS).
    #[error("HTTP error: {0}")]
    Http(#[from] reqwest::Error),

    /// The server answered with a non-success status and a structured detail.
    #[error("API error ({status}): {detail}")]
    Status {
        /// HTTP status code returned by the server.
        status: StatusCode,
        /// Server-provided `detail` message, or a generic fallback.
        detail: String,
    },

    /// The bearer token was rejected.
    #[error("unauthorized")]
    Unauthorized,

    /// Resource not found.
    #[error("not found: {0}")]
    NotFound(String),

    /// Response body could not be parsed into the expected schema.
    #[error("JSON parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// The user-facing message for this error.
    ///
    /// Server `detail` payloads are written for end users (the original UI
    /// shows them verbatim in toasts); transport and parse errors collapse to
    /// a generic message.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Status { detail, .. } => detail.clone(),
            Self::NotFound(what) => format!("{what} not found"),
            Self::Unauthorized => "Please log in to continue".to_string(),
            Self::Http(_) | Self::Parse(_) => "Something went wrong, try again".to_string(),
        }
    }
}

/// Caller identity attached to every outbound request.
///
/// Exactly one of the two fields is meaningful at a time once login has
/// completed; during the login transition both may be present so the guest
/// cart can be merged.
#[derive(Debug, Clone, Default)]
pub struct Identity {
    /// Bearer token of an authenticated user.
    pub token: Option<String>,
    /// Guest session id for anonymous carts.
    pub guest_session_id: Option<String>,
}

impl Identity {
    /// An anonymous identity carrying only a guest session id.
    #[must_use]
    pub fn guest(guest_session_id: impl Into<String>) -> Self {
        Self {
            token: None,
            guest_session_id: Some(guest_session_id.into()),
        }
    }

    /// An authenticated identity carrying a bearer token.
    #[must_use]
    pub fn user(token: impl Into<String>) -> Self {
        Self {
            token: Some(token.into()),
            guest_session_id: None,
        }
    }

    /// Whether this identity has neither a token nor a guest session id.
    #[must_use]
    pub const fn is_empty(&self) -> bool {
        self.token.is_none() && self.guest_session_id.is_none()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_api_error_display() {
        let err = ApiError::NotFound("product 123".to_string());
        assert_eq!(err.to_string(), "not found: product 123");

        let err = ApiError::Status {
            status: StatusCode::CONFLICT,
            detail: "Insufficient stock".to_string(),
        };
        assert_eq!(err.to_string(), "API error (409 Conflict): Insufficient stock");
    }

    #[test]
    fn test_detail_prefers_server_message() {
        let err = ApiError::Status {
            status: StatusCode::BAD_REQUEST,
            detail: "Quantity must be at least 1".to_string(),
        };
        assert_eq!(err.detail(), "Quantity must be at least 1");
    }

    #[test]
    fn test_detail_is_generic_for_parse_errors() {
        let parse_err = serde_json::from_str::<serde_json::Value>("{").unwrap_err();
        let err = ApiError::Parse(parse_err);
        assert_eq!(err.detail(), "Something went wrong, try again");
    }

    #[test]
    fn test_identity_constructors() {
        let guest = Identity::guest("abc");
        assert!(guest.token.is_none());
        assert_eq!(guest.guest_session_id.as_deref(), Some("abc"));

        let user = Identity::user("tok");
        assert_eq!(user.token.as_deref(), Some("tok"));
        assert!(user.guest_session_id.is_none());

        assert!(Identity::default().is_empty());
        assert!(!guest.is_empty());
    }
}
