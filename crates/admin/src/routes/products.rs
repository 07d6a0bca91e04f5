//! Product management panel.
//!
//! The edit page is the workhorse: besides the base fields it owns the
//! ordered image slots (up to three, reordered by editing the slots) and the
//! variant sub-table (size x color x stock, added and deleted against
//! variant-scoped endpoints).

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use rust_decimal::Decimal;
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;

use voidwear_core::{CategoryId, ProductId, VariantId};

use crate::api::ApiError;
use crate::api::types::{
    AdminCategory, AdminProduct, MAX_PRODUCT_IMAGES, ProductPayload, VariantPayload,
};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

/// Product table template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductsTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub products: Vec<AdminProduct>,
}

/// Create form template.
#[derive(Template, WebTemplate)]
#[template(path = "products/new.html")]
pub struct NewProductTemplate {
    pub admin: CurrentAdmin,
    pub categories: Vec<AdminCategory>,
    pub error: Option<String>,
}

/// Edit form template, with image slots and the variant table.
#[derive(Template, WebTemplate)]
#[template(path = "products/edit.html")]
pub struct EditProductTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub categories: Vec<AdminCategory>,
    pub product: AdminProduct,
}

/// Product form data. The three image slots map to the ordered image list;
/// blank slots are dropped, so deleting an image is clearing its slot and
/// reordering is swapping slot contents.
#[derive(Debug, Deserialize)]
pub struct ProductForm {
    pub name: String,
    pub description: String,
    pub price: String,
    pub category_id: String,
    pub image_url_1: Option<String>,
    pub image_url_2: Option<String>,
    pub image_url_3: Option<String>,
}

impl ProductForm {
    fn into_payload(self) -> std::result::Result<ProductPayload, String> {
        let name = self.name.trim().to_string();
        if name.is_empty() {
            return Err("El nombre es obligatorio".to_string());
        }

        let price: Decimal = self
            .price
            .trim()
            .parse()
            .map_err(|_| "El precio no es un número válido".to_string())?;

        let category_id: i32 = self
            .category_id
            .trim()
            .parse()
            .map_err(|_| "Elegí una categoría".to_string())?;

        let image_urls: Vec<String> = [self.image_url_1, self.image_url_2, self.image_url_3]
            .into_iter()
            .flatten()
            .map(|url| url.trim().to_string())
            .filter(|url| !url.is_empty())
            .take(MAX_PRODUCT_IMAGES)
            .collect();

        Ok(ProductPayload {
            name,
            description: self.description.trim().to_string(),
            price,
            category_id: CategoryId::new(category_id),
            image_urls,
        })
    }
}

/// Variant create form data.
#[derive(Debug, Deserialize)]
pub struct VariantForm {
    pub size: String,
    pub color: String,
    pub stock: String,
}

impl VariantForm {
    fn into_payload(self) -> std::result::Result<VariantPayload, String> {
        let size = self.size.trim().to_string();
        let color = self.color.trim().to_string();
        if size.is_empty() || color.is_empty() {
            return Err("Talle y color son obligatorios".to_string());
        }

        let stock: u32 = self
            .stock
            .trim()
            .parse()
            .map_err(|_| "El stock no es un número válido".to_string())?;

        Ok(VariantPayload { size, color, stock })
    }
}

/// Variant delete form data; carries the product id so the redirect can land
/// back on the right edit page.
#[derive(Debug, Deserialize)]
pub struct VariantDeleteForm {
    pub product_id: i32,
}

/// Render the product table.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
) -> Result<ProductsTemplate> {
    let products = state.api().products(&auth.token).await?;
    Ok(ProductsTemplate {
        admin: auth.admin,
        flash: crate::session::take_flash(&session).await?,
        products,
    })
}

/// Render the create form.
#[instrument(skip_all)]
pub async fn new(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
) -> Result<NewProductTemplate> {
    let categories = state.api().categories(&auth.token).await?;
    Ok(NewProductTemplate {
        admin: auth.admin,
        categories,
        error: None,
    })
}

/// Create a product.
#[instrument(skip_all)]
pub async fn create(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Form(form): Form<ProductForm>,
) -> Result<Response> {
    let payload = match form.into_payload() {
        Ok(payload) => payload,
        Err(message) => {
            let categories = state.api().categories(&auth.token).await?;
            return Ok(NewProductTemplate {
                admin: auth.admin,
                categories,
                error: Some(message),
            }
            .into_response());
        }
    };

    match state.api().create_product(&auth.token, &payload).await {
        Ok(product) => {
            crate::session::push_flash(&session, Flash::success("Producto creado")).await?;
            Ok(Redirect::to(&format!("/products/{}/edit", product.id)).into_response())
        }
        Err(err) => {
            let categories = state.api().categories(&auth.token).await?;
            Ok(NewProductTemplate {
                admin: auth.admin,
                categories,
                error: Some(err.detail()),
            }
            .into_response())
        }
    }
}

/// Render the edit form.
#[instrument(skip(state, auth, session))]
pub async fn edit(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<EditProductTemplate> {
    let product = match state.api().product(&auth.token, id).await {
        Ok(product) => product,
        Err(ApiError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("producto {id}")));
        }
        Err(err) => return Err(err.into()),
    };
    let categories = state.api().categories(&auth.token).await?;

    Ok(EditProductTemplate {
        admin: auth.admin,
        flash: crate::session::take_flash(&session).await?,
        categories,
        product,
    })
}

/// Update a product, image list included.
#[instrument(skip(state, auth, session, form))]
pub async fn update(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<ProductForm>,
) -> Result<Redirect> {
    let flash = match form.into_payload() {
        Ok(payload) => match state.api().update_product(&auth.token, id, &payload).await {
            Ok(_) => Flash::success("Producto actualizado"),
            Err(err) => Flash::error(err.detail()),
        },
        Err(message) => Flash::error(message),
    };

    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to(&format!("/products/{id}/edit")))
}

/// Delete a product.
#[instrument(skip(state, auth, session))]
pub async fn delete(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<Redirect> {
    let flash = match state.api().delete_product(&auth.token, id).await {
        Ok(()) => Flash::success("Producto eliminado"),
        Err(err) => Flash::error(err.detail()),
    };
    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to("/products"))
}

/// Add a variant to a product.
#[instrument(skip(state, auth, session, form))]
pub async fn add_variant(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<ProductId>,
    Form(form): Form<VariantForm>,
) -> Result<Redirect> {
    let flash = match form.into_payload() {
        Ok(payload) => match state.api().add_variant(&auth.token, id, &payload).await {
            Ok(_) => Flash::success("Variante agregada"),
            Err(err) => Flash::error(err.detail()),
        },
        Err(message) => Flash::error(message),
    };

    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to(&format!("/products/{id}/edit")))
}

/// Delete a variant.
#[instrument(skip(state, auth, session, form))]
pub async fn delete_variant(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
    Path(id): Path<VariantId>,
    Form(form): Form<VariantDeleteForm>,
) -> Result<Redirect> {
    let flash = match state.api().delete_variant(&auth.token, id).await {
        Ok(()) => Flash::success("Variante eliminada"),
        Err(err) => Flash::error(err.detail()),
    };
    crate::session::push_flash(&session, flash).await?;
    Ok(Redirect::to(&format!("/products/{}/edit", form.product_id)))
}

#[cfg(test)]
mod tests {
    use super::*;

    fn form() -> ProductForm {
        ProductForm {
            name: "Hoodie Negro".to_string(),
            description: "Algodón frisado".to_string(),
            price: "2500".to_string(),
            category_id: "1".to_string(),
            image_url_1: Some("https://img.example/a.jpg".to_string()),
            image_url_2: Some("".to_string()),
            image_url_3: Some("https://img.example/c.jpg".to_string()),
        }
    }

    #[test]
    fn test_blank_image_slots_are_dropped_in_order() {
        let payload = form().into_payload().expect("payload");
        assert_eq!(
            payload.image_urls,
            vec![
                "https://img.example/a.jpg".to_string(),
                "https://img.example/c.jpg".to_string()
            ]
        );
    }

    #[test]
    fn test_bad_price_is_rejected() {
        let mut f = form();
        f.price = "dos mil".to_string();
        assert!(f.into_payload().is_err());
    }

    #[test]
    fn test_variant_form_requires_size_and_color() {
        let f = VariantForm {
            size: "M".to_string(),
            color: "".to_string(),
            stock: "4".to_string(),
        };
        assert!(f.into_payload().is_err());

        let f = VariantForm {
            size: "M".to_string(),
            color: "negro".to_string(),
            stock: "4".to_string(),
        };
        assert_eq!(f.into_payload().expect("payload").stock, 4);
    }
}
