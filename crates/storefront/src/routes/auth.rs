//! Authentication route handlers.
//!
//! Login exchanges credentials for a bearer token against the commerce API,
//! then runs the guest-cart merge before the shopper sees another page. No
//! passwords or hashes are handled here; the API owns credential storage.

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

use crate::api::ApiError;
use crate::error::Result;
use crate::models::CurrentUser;
use crate::state::AppState;

/// Login form data.
#[derive(Debug, Deserialize)]
pub struct LoginForm {
    pub email: String,
    pub password: String,
}

/// Registration form data.
#[derive(Debug, Deserialize)]
pub struct RegisterForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
}

/// Login page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/login.html")]
pub struct LoginTemplate {
    pub error: Option<String>,
    pub email: String,
}

/// Registration page template.
#[derive(Template, WebTemplate)]
#[template(path = "auth/register.html")]
pub struct RegisterTemplate {
    pub error: Option<String>,
    pub email: String,
    pub first_name: String,
    pub last_name: String,
}

/// Display login page.
#[instrument]
pub async fn login_page() -> LoginTemplate {
    LoginTemplate {
        error: None,
        email: String::new(),
    }
}

/// Display registration page.
#[instrument]
pub async fn register_page() -> RegisterTemplate {
    RegisterTemplate {
        error: None,
        email: String::new(),
        first_name: String::new(),
        last_name: String::new(),
    }
}

/// Handle login: authenticate, store the token, merge the guest cart.
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

    finish_login(&state, &session, tokens.access_token).await?;
    Ok(Redirect::to("/").into_response())
}

/// Handle registration: create the account, then log straight in.
#[instrument(skip(state, session, form))]
pub async fn register(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RegisterForm>,
) -> Result<Response> {
    let result = state
        .api()
        .register(&form.email, &form.password, &form.first_name, &form.last_name)
        .await;

    let tokens = match result {
        Ok(tokens) => tokens,
        Err(e @ ApiError::Status { .. }) => {
            return Ok(RegisterTemplate {
                error: Some(e.detail()),
                email: form.email,
                first_name: form.first_name,
                last_name: form.last_name,
            }
            .into_response());
        }
        Err(e) => return Err(e.into()),
    };

    finish_login(&state, &session, tokens.access_token).await?;
    Ok(Redirect::to("/").into_response())
}

/// Handle logout.
#[instrument(skip(session))]
pub async fn logout(session: Session) -> Result<Redirect> {
    crate::session::logout(&session).await?;
    Ok(Redirect::to("/"))
}

/// Fetch the profile for a fresh token and establish the session.
async fn finish_login(state: &AppState, session: &Session, token: String) -> Result<()> {
    let identity = crate::api::Identity::user(token.clone());
    let profile = state.api().me(&identity).await?;

    let user = CurrentUser {
        id: profile.id,
        email: profile.email,
        first_name: profile.first_name,
    };
    crate::session::establish_login(state.api(), session, token, &user).await
}

/// Credential failures all read the same to the shopper.
fn login_error_message(error: &ApiError) -> String {
    match error {
        ApiError::Unauthorized => "Email o contraseña incorrectos".to_string(),
        _ => error.detail(),
    }
}
