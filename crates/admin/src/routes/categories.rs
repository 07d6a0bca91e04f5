//! Category management panel.

use std::collections::HashMap;

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

use voidwear_core::CategoryId;

use crate::api::types::{AdminCategory, CategoryPayload};
use crate::error::Result;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

/// Category table template, with the inline create form.
#[derive(Template, WebTemplate)]
#[template(path = "categories/index.html")]
pub struct CategoriesTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub categories: Vec<AdminCategory>,
}

/// Category create form data. Locale names are optional single fields for
/// the two locales the store actually serves.
#[derive(Debug, Deserialize)]
pub struct CategoryForm {
    pub name: String,
    pub name_es: Option<String>,
    pub name_en: Option<String>,
}

impl CategoryForm {
    fn into_payload(self) -> std::result::Result<CategoryPayload, String> {
        let name = self.name.trim().to_lowercase();
        if name.is_empty() {
            return Err("El nombre es obligatorio".to_string());
        }

        let mut name_i18n = HashMap::new();
        for (locale, value) in [("es", self.name_es), ("en", self.name_en)] {
            if let Some(value) = value {
                let value = value.trim();
                if !value.is_empty() {
                    name_i18n.insert(locale.to_string(), value.to_string());
                }
            }
        }

        Ok(CategoryPayload {
            name,
            name_i18n: if name_i18n.is_empty() {
                None
            } else {
                Some(name_i18n)
            },
        })
    }
}

/// Render the category table.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
) -> Result<CategoriesTemplate> {
    let categories = state.api().categories(&auth.token).await?;
    Ok(CategoriesTemplate {
        admin: auth.admin,
        flash: crate::session::take_flash(&session).await?,
        categories,
    })
}

/// Create a category.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Form(form): Form<CategoryForm>,
) -> Result<Redirect> {
    let flash = match form.into_payload() {
        Ok(payload) => match state.api().create_category(&auth.token, &payload).await {
            Ok(category) => Flash::success(format!("Categoría \"{}\" creada", category.name)),
            Err(err) => Flash::error(err.detail()),
        },
        Err(message) => Flash::error(message),
    };

    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/categories"))
}

/// Delete a category. The API refuses while products still reference it and
/// the server detail says so.
#[instrument(skip(state, auth, session))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<CategoryId>,
) -> Result<Redirect> {
    let flash = match state.api().delete_category(&auth.token, id).await {
        Ok(()) => Flash::success("Categoría eliminada"),
        Err(err) => Flash::error(err.detail()),
    };
    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/categories"))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_blank_locale_names_are_dropped() {
        let form = CategoryForm {
            name: "Camperas".to_string(),
            name_es: Some("  ".to_string()),
            name_en: Some("Jackets".to_string()),
        };
        let payload = form.into_payload().expect("payload");
        assert_eq!(payload.name, "camperas");
        let i18n = payload.name_i18n.expect("i18n");
        assert_eq!(i18n.len(), 1);
        assert_eq!(i18n["en"], "Jackets");
    }

    #[test]
    fn test_no_locale_names_serializes_none() {
        let form = CategoryForm {
            name: "remeras".to_string(),
            name_es: None,
            name_en: None,
        };
        assert!(form.into_payload().expect("payload").name_i18n.is_none());
    }
}
