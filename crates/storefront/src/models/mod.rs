//! Storefront view and session models.

pub mod session;

pub use session::{CurrentUser, Flash, keys as session_keys};
