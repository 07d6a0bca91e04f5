//! HTTP middleware: sessions and the admin auth extractor.

pub mod auth;
pub mod session;

pub use auth::RequireAdmin;
pub use session::create_session_layer;
