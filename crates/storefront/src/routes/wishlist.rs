//! Wishlist route handlers.
//!
//! The toggle button is an HTMX fragment swapped in place on the product
//! page, so saving never costs a full page load.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;
use voidwear_core::ProductId;

use crate::api::types::WishlistItem;
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::state::AppState;

/// Wishlist page template.
#[derive(Template, WebTemplate)]
#[template(path = "wishlist/show.html")]
pub struct WishlistTemplate {
    pub items: Vec<WishlistItem>,
}

/// Wishlist toggle button fragment (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/wishlist_button.html")]
pub struct WishlistButtonTemplate {
    pub product_id: ProductId,
    pub wishlisted: bool,
}

/// Display the wishlist page.
#[instrument(skip(state, session))]
pub async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<WishlistTemplate> {
    let identity = crate::session::identity(&session).await?;
    let items = state.api().wishlist(&identity).await?;
    Ok(WishlistTemplate { items })
}

/// Toggle a product on or off the wishlist (HTMX).
#[instrument(skip(state, session))]
pub async fn toggle(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<WishlistButtonTemplate> {
    let identity = crate::session::identity(&session).await?;

    let wishlisted = if state.api().is_wishlisted(&identity, id).await? {
        state.api().remove_from_wishlist(&identity, id).await?;
        false
    } else {
        state.api().add_to_wishlist(&identity, id).await?;
        true
    };

    Ok(WishlistButtonTemplate {
        product_id: id,
        wishlisted,
    })
}
