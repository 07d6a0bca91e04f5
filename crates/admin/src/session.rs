//! Operator session state.
//!
//! The back-office knows a single identity kind: an admin with a bearer
//! token. The token and a minimal profile live in the server-side session;
//! a 401 from any API call means the token went stale and the session is
//! cleared when the login page next renders.

use tower_sessions::Session;

use crate::error::Result;
use crate::models::session_keys;
use crate::models::{CurrentAdmin, Flash};

/// The stored bearer token, if the operator is logged in.
pub async fn token(session: &Session) -> Result<Option<String>> {
    Ok(session.get(session_keys::AUTH_TOKEN).await?)
}

/// Record a successful operator login.
pub async fn establish_login(session: &Session, token: String, admin: &CurrentAdmin) -> Result<()> {
    // Cycle the session id on privilege change.
    session.cycle_id().await?;

    session.insert(session_keys::AUTH_TOKEN, &token).await?;
    session.insert(session_keys::CURRENT_ADMIN, admin).await?;

    crate::error::set_sentry_user(&admin.id, Some(admin.email.as_str()));
    Ok(())
}

/// Clear all session state.
///
/// Called on explicit logout and by the login page, which always starts from
/// a clean session so a stale token can never shadow a fresh login.
pub async fn clear(session: &Session) -> Result<()> {
    session.flush().await?;
    crate::error::clear_sentry_user();
    Ok(())
}

/// The logged-in operator, if any.
pub async fn current_admin(session: &Session) -> Result<Option<CurrentAdmin>> {
    Ok(session.get(session_keys::CURRENT_ADMIN).await?)
}

/// Queue a flash message for the next page render.
pub async fn push_flash(session: &Session, flash: Flash) -> Result<()> {
    session.insert(session_keys::FLASH, &flash).await?;
    Ok(())
}

/// Take and clear the pending flash message, if any.
pub async fn take_flash(session: &Session) -> Result<Option<Flash>> {
    Ok(session.remove::<Flash>(session_keys::FLASH).await?)
}
