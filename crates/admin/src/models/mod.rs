//! Admin view and session models.

pub mod session;

pub use session::{CurrentAdmin, Flash, keys as session_keys};
