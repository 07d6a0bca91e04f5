//! Commerce REST API client, admin surface.
//!
//! Same wire conventions as the storefront client: JSON bodies, bearer
//! tokens, structured `{"detail": ...}` error payloads. Admin endpoints are
//! all authenticated; only the login call goes out bare.

mod client;
pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod products;
pub mod sales;
#[cfg(test)]
pub(crate) mod test_support;
pub mod types;
pub mod users;

pub use client::AdminClient;

use axum::http::StatusCode;
use thiserror::Error;

/// Errors from the commerce API.
#[derive(Debug, Error)]
pub enum ApiError {
    /// Transport-level failure (DNS, connect, timeout).
    #[error("HTTP transport error: {0}")]
    Http(#[from] reqwest::Error),

    /// Non-success HTTP status with the server's structured detail.
    #[error("API returned {status}: {detail}")]
    Status { status: StatusCode, detail: String },

    /// The bearer token was missing, expired, or insufficient.
    #[error("Unauthorized")]
    Unauthorized,

    /// The resource does not exist.
    #[error("Not found: {0}")]
    NotFound(String),

    /// The response body did not match the expected schema.
    #[error("Response parse error: {0}")]
    Parse(#[from] serde_json::Error),
}

impl ApiError {
    /// User-facing message: the server's detail when it sent one, a generic
    /// fallback otherwise.
    #[must_use]
    pub fn detail(&self) -> String {
        match self {
            Self::Status { detail, .. } if !detail.is_empty() => detail.clone(),
            Self::Unauthorized => "Session expired".to_string(),
            Self::NotFound(what) => format!("Not found: {what}"),
            _ => "Something went wrong, try again".to_string(),
        }
    }
}
