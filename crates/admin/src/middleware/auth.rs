//! Admin authentication extractor.

use axum::{
    extract::FromRequestParts,
    http::{StatusCode, request::Parts},
    response::{IntoResponse, Redirect, Response},
};
use tower_sessions::Session;

use crate::models::{CurrentAdmin, session_keys};

/// The authenticated operator together with their API bearer token.
#[derive(Debug, Clone)]
pub struct AdminSession {
    pub admin: CurrentAdmin,
    pub token: String,
}

/// Extractor that requires a logged-in admin.
///
/// Every panel handler takes this; anything without a complete session is
/// sent to the login page.
pub struct RequireAdmin(pub AdminSession);

/// Rejection when the operator is not logged in.
pub enum AuthRejection {
    /// Redirect to login page (for HTML requests).
    RedirectToLogin,
    /// Unauthorized response (for HTMX fragment requests).
    Unauthorized,
}

impl IntoResponse for AuthRejection {
    fn into_response(self) -> Response {
        match self {
            Self::RedirectToLogin => Redirect::to("/login").into_response(),
            Self::Unauthorized => StatusCode::UNAUTHORIZED.into_response(),
        }
    }
}

impl<S> FromRequestParts<S> for RequireAdmin
where
    S: Send + Sync,
{
    type Rejection = AuthRejection;

    async fn from_request_parts(parts: &mut Parts, _state: &S) -> Result<Self, Self::Rejection> {
        // Session is set into extensions by SessionManagerLayer.
        let session = parts
            .extensions
            .get::<Session>()
            .ok_or(AuthRejection::Unauthorized)?;

        let admin: Option<CurrentAdmin> = session
            .get(session_keys::CURRENT_ADMIN)
            .await
            .ok()
            .flatten();
        let token: Option<String> = session
            .get(session_keys::AUTH_TOKEN)
            .await
            .ok()
            .flatten();

        match (admin, token) {
            (Some(admin), Some(token)) => Ok(Self(AdminSession { admin, token })),
            _ => {
                // HTMX fragment requests get a bare 401; full pages redirect.
                if parts.headers.contains_key("HX-Request") {
                    Err(AuthRejection::Unauthorized)
                } else {
                    Err(AuthRejection::RedirectToLogin)
                }
            }
        }
    }
}
