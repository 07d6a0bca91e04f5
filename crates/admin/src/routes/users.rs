//! User management panel.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::Redirect,
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use voidwear_core::{UserId, UserRole};

use crate::api::types::AdminUser;
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

/// User table template.
#[derive(Template, WebTemplate)]
#[template(path = "users/index.html")]
pub struct UsersTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub users: Vec<AdminUser>,
}

/// New user form data.
#[derive(Debug, Deserialize)]
pub struct NewUserForm {
    pub email: String,
    pub password: String,
    pub first_name: String,
    pub last_name: String,
    pub role: String,
}

/// Role change form data.
#[derive(Debug, Deserialize)]
pub struct RoleForm {
    pub role: String,
}

fn parse_role(value: &str) -> UserRole {
    if value == "admin" {
        UserRole::Admin
    } else {
        UserRole::Client
    }
}

/// Render the user table.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
) -> Result<UsersTemplate> {
    let users = state.api().users(&auth.token).await?;
    Ok(UsersTemplate {
        admin: auth.admin,
        flash: crate::session::take_flash(&session).await?,
        users,
    })
}

/// Create a user with an explicit role.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Form(form): Form<NewUserForm>,
) -> Result<Redirect> {
    let result = state
        .api()
        .create_user(
            &auth.token,
            &form.email,
            &form.password,
            &form.first_name,
            &form.last_name,
            parse_role(&form.role),
        )
        .await;

    let flash = match result {
        Ok(_) => Flash::success("Usuario creado"),
        Err(err) => Flash::error(err.detail()),
    };
    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/users"))
}

/// Change a user's role.
#[instrument(skip(state, auth, session, form))]
pub async fn change_role(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<UserId>,
    Form(form): Form<RoleForm>,
) -> Result<Redirect> {
    let result = state
        .api()
        .update_user_role(&auth.token, id, parse_role(&form.role))
        .await;

    let flash = match result {
        Ok(user) => Flash::success(format!("Rol de {} actualizado", user.email.as_str())),
        Err(err) => Flash::error(err.detail()),
    };
    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/users"))
}

/// Soft-delete a user.
#[instrument(skip(state, auth, session))]
pub async fn deactivate(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<UserId>,
) -> Result<Redirect> {
    let flash = match state.api().deactivate_user(&auth.token, id).await {
        Ok(()) => Flash::success("Usuario desactivado"),
        Err(err) => Flash::error(err.detail()),
    };
    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/users"))
}
