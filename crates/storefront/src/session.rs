//! Session identity resolution and the login merge flow.
//!
//! The commerce API knows two kinds of callers: authenticated users (bearer
//! token) and anonymous guests (`X-Guest-Session-ID`). This module maps the
//! storefront's server-side session onto exactly one of those identities and
//! owns the transitions between them:
//!
//! - a first-time visitor gets a guest session lazily, on the first request
//!   that actually touches the cart;
//! - logging in merges the guest cart into the user's cart and then drops the
//!   guest id, so the same shopper never presents both identities;
//! - logging out clears everything and the next visit starts fresh.

use tower_sessions::Session;
use tracing::warn;

use crate::api::{ApiClient, Identity};
use crate::error::Result;
use crate::models::session_keys;
use crate::models::{CurrentUser, Flash};

/// Resolve the caller's API identity from the session.
///
/// A stored bearer token wins over a guest session id. Both may be absent,
/// in which case the identity is empty and cart endpoints will be skipped.
pub async fn identity(session: &Session) -> Result<Identity> {
    let token: Option<String> = session.get(session_keys::AUTH_TOKEN).await?;
    if let Some(token) = token {
        return Ok(Identity::user(token));
    }

    let guest_id: Option<String> = session.get(session_keys::GUEST_SESSION_ID).await?;
    Ok(match guest_id {
        Some(id) => Identity::guest(id),
        None => Identity::default(),
    })
}

/// Resolve the identity, creating a guest session if the caller has none.
///
/// Guest creation failures are non-fatal: the shopper can still browse, the
/// cart just stays empty until a later request succeeds.
pub async fn ensure_identity(api: &ApiClient, session: &Session) -> Result<Identity> {
    let current = identity(session).await?;
    if !current.is_empty() {
        return Ok(current);
    }

    match api.create_guest_session().await {
        Ok(guest_id) => {
            let id = guest_id.to_string();
            session
                .insert(session_keys::GUEST_SESSION_ID, &id)
                .await?;
            Ok(Identity::guest(id))
        }
        Err(err) => {
            warn!(error = %err, "Failed to create guest session, continuing without one");
            Ok(current)
        }
    }
}

/// Record a successful login and reconcile the guest cart.
///
/// The guest cart is merged into the user's cart server-side; only after the
/// merge (or its failure) is the guest id dropped from the session. A failed
/// merge is non-fatal but the shopper is told their old cart did not follow
/// them.
pub async fn establish_login(
    api: &ApiClient,
    session: &Session,
    token: String,
    user: &CurrentUser,
) -> Result<()> {
    // Cycle the session id on privilege change.
    session.cycle_id().await?;

    let guest_id: Option<String> = session.get(session_keys::GUEST_SESSION_ID).await?;

    session.insert(session_keys::AUTH_TOKEN, &token).await?;
    session.insert(session_keys::CURRENT_USER, user).await?;

    if let Some(guest_id) = guest_id {
        let user_identity = Identity::user(token);
        if let Err(err) = api.merge_guest_cart(&user_identity, &guest_id).await {
            warn!(error = %err, "Guest cart merge failed after login");
            push_flash(
                session,
                Flash::notice("We could not recover your previous cart."),
            )
            .await?;
        }
        session
            .remove::<String>(session_keys::GUEST_SESSION_ID)
            .await?;
    }

    crate::error::set_sentry_user(&user.id, Some(user.email.as_str()));
    Ok(())
}

/// Clear all identity state from the session.
pub async fn logout(session: &Session) -> Result<()> {
    session.flush().await?;
    crate::error::clear_sentry_user();
    Ok(())
}

/// The logged-in user, if any.
pub async fn current_user(session: &Session) -> Result<Option<CurrentUser>> {
    Ok(session.get(session_keys::CURRENT_USER).await?)
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
