//! Operator login and logout.
//!
//! Login hits the same `/auth/login` as the storefront, then checks the role
//! from `/auth/me`: non-admins are rejected without getting a session. The
//! login page always starts by clearing the session, which is also how stale
//! tokens get cleaned up after a 401 redirect.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use voidwear_core::UserRole;

use crate::api::ApiError;
use crate::error::Result;
use crate::models::CurrentAdmin;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Display the login page, clearing any stale session first.
#[instrument(skip(session))]
pub async fn login_page(session: Session) -> Result<LoginTemplate> {
    crate::session::clear(&session).await?;
    Ok(LoginTemplate {
        error: None,
        email: String::new(),
    })
}

/// Handle login: authenticate, verify the admin role, store the session.
#[instrument(skip(state, session, form))]
pub async fn login(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<LoginForm>,
) -> Result<Response> {
    let tokens = match state.api().login(&form.email, &form.password).await {
        Ok(tokens) => tokens,
        Err(e @ (ApiError::Unauthorized | ApiError::Status { .. })) => {
            return Ok(LoginTemplate {
                error: Some(login_error_message(&e)),
                email: form.email,
            }
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    let profile = state.api().me(&tokens.access_token).await?;
    if profile.role != UserRole::Admin {
        return Ok(LoginTemplate {
            error: Some("No tenés permisos de administrador".to_string()),
            email: form.email,
        }
        .into_response());
    }

    let admin = CurrentAdmin {
        id: profile.id,
        email: profile.email,
        first_name: profile.first_name,
    };
    crate::session::establish_login(&session, tokens.access_token, &admin).await?;

    Ok(Redirect::to("/").into_response())
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    crate::session::clear(&session).await?;
    Ok(Redirect::to("/login"))
}

/// Credential failures all read the same to the operator.
fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Email o contraseña incorrectos".to_string(),
        _ => error.detail(),
    }
}
