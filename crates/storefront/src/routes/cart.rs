//! Cart route handlers.
//!
//! Cart operations use HTMX for dynamic updates without full page reloads.
//! The server-side cart is the single source of truth: every mutation
//! replaces the rendered cart with the API's response wholesale, and the
//! count badge is always derived by summing quantities.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::State,
    response::{AppendHeaders, Html, IntoResponse, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use voidwear_core::{Money, VariantId};

use crate::api::types::Cart;
use crate::error::Result;
use crate::state::AppState;

/// Cart item display data for templates.
#[derive(Clone)]
pub struct CartItemView {
    pub variant_id: VariantId,
    pub name: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: String,
    pub line_price: String,
    pub image_url: Option<String>,
}

/// Cart display data for templates.
#[derive(Clone)]
pub struct CartView {
    pub items: Vec<CartItemView>,
    pub subtotal: String,
    pub item_count: u32,
}

impl CartView {
    /// Create an empty cart.
    #[must_use]
    pub fn empty() -> Self {
        Self {
            items: Vec::new(),
            subtotal: Money::zero().display(),
            item_count: 0,
        }
    }
}

impl From<&Cart> for CartView {
    fn from(cart: &Cart) -> Self {
        Self {
            items: cart
                .items
                .iter()
                .map(|item| CartItemView {
                    variant_id: item.variant_id,
                    name: item.product_name.clone(),
                    size: item.size.clone(),
                    color: item.color.clone(),
                    quantity: item.quantity,
                    unit_price: Money::new(item.unit_price, voidwear_core::Currency::Ars)
                        .display(),
                    line_price: Money::new(item.unit_price, voidwear_core::Currency::Ars)
                        .times(item.quantity)
                        .display(),
                    image_url: item.image_url.clone(),
                })
                .collect(),
            subtotal: cart.subtotal().display(),
            item_count: cart.item_count(),
        }
    }
}

/// Escape server-provided text before embedding it in an HTML fragment.
fn escape_html(value: &str) -> String {
    value
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
}

/// Error fragment for a failed cart mutation. Every mutation error answers
/// with the same span so the shopper always gets a notification.
fn error_fragment(detail: &str) -> Response {
    (
        axum::http::StatusCode::UNPROCESSABLE_ENTITY,
        Html(format!(
            "<span class=\"cart-error\">{}</span>",
            escape_html(detail)
        )),
    )
        .into_response()
}

/// Add to cart form data.
#[derive(Debug, Deserialize)]
pub struct AddToCartForm {
    pub variant_id: VariantId,
    pub quantity: Option<u32>,
}

/// Update cart form data.
#[derive(Debug, Deserialize)]
pub struct UpdateCartForm {
    pub variant_id: VariantId,
    pub quantity: u32,
}

/// Remove from cart form data.
#[derive(Debug, Deserialize)]
pub struct RemoveFromCartForm {
    pub variant_id: VariantId,
}

/// Cart page template.
#[derive(Template, WebTemplate)]
#[template(path = "cart/show.html")]
pub struct CartShowTemplate {
    pub cart: CartView,
    /// When set, the page shows this notice instead of a cart; a fetch
    /// failure must never pass itself off as an empty cart.
    pub error: Option<String>,
}

/// Cart items fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_items.html")]
pub struct CartItemsTemplate {
    pub cart: CartView,
}

/// Cart count badge fragment template (for HTMX).
#[derive(Template, WebTemplate)]
#[template(path = "partials/cart_count.html")]
pub struct CartCountTemplate {
    pub count: u32,
}

/// Display cart page.
///
/// A fetch failure renders an error notice, never a fabricated empty cart;
/// the shopper's server-side state is untouched and a reload retries.
#[instrument(skip(state, session))]
pub async fn show(State(state): State<AppState>, session: Session) -> Result<CartShowTemplate> {
    let identity = crate::session::identity(&session).await?;

    if identity.is_empty() {
        return Ok(CartShowTemplate {
            cart: CartView::empty(),
            error: None,
        });
    }

    match state.api().fetch_cart(&identity).await {
        Ok(cart) => Ok(CartShowTemplate {
            cart: CartView::from(&cart),
            error: None,
        }),
        Err(e) => {
            tracing::warn!("Failed to fetch cart: {e}");
            Ok(CartShowTemplate {
                cart: CartView::empty(),
                error: Some("No pudimos cargar tu carrito. Probá de nuevo en un momento.".to_string()),
            })
        }
    }
}

/// Add item to cart (HTMX).
///
/// Lazily creates a guest session for first-time visitors, then returns the
/// refreshed count badge with an HTMX trigger so other fragments refetch.
#[instrument(skip(state, session))]
pub async fn add(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<AddToCartForm>,
) -> Result<Response> {
    let identity = crate::session::ensure_identity(state.api(), &session).await?;
    let quantity = form.quantity.unwrap_or(1);

    match state.api().add_item(&identity, form.variant_id, quantity).await {
        Ok(cart) => Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartCountTemplate {
                count: cart.item_count(),
            },
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Failed to add item to cart: {e}");
            // Stock limits come back as a structured detail worth showing.
            Ok(error_fragment(&e.detail()))
        }
    }
}

/// Update cart item quantity (HTMX).
///
/// A quantity of zero removes the line entirely.
#[instrument(skip(state, session))]
pub async fn update(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<UpdateCartForm>,
) -> Result<Response> {
    let identity = crate::session::identity(&session).await?;
    if identity.is_empty() {
        return Ok(CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response());
    }

    match state
        .api()
        .update_quantity(&identity, form.variant_id, form.quantity)
        .await
    {
        Ok(cart) => Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&cart),
            },
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Failed to update cart: {e}");
            Ok(error_fragment(&e.detail()))
        }
    }
}

/// Remove item from cart (HTMX).
#[instrument(skip(state, session))]
pub async fn remove(
    State(state): State<AppState>,
    session: Session,
    Form(form): Form<RemoveFromCartForm>,
) -> Result<Response> {
    let identity = crate::session::identity(&session).await?;
    if identity.is_empty() {
        return Ok(CartItemsTemplate {
            cart: CartView::empty(),
        }
        .into_response());
    }

    match state.api().remove_item(&identity, form.variant_id).await {
        Ok(cart) => Ok((
            AppendHeaders([("HX-Trigger", "cart-updated")]),
            CartItemsTemplate {
                cart: CartView::from(&cart),
            },
        )
            .into_response()),
        Err(e) => {
            tracing::error!("Failed to remove from cart: {e}");
            Ok(error_fragment(&e.detail()))
        }
    }
}

/// Get cart count badge (HTMX).
#[instrument(skip(state, session))]
pub async fn count(State(state): State<AppState>, session: Session) -> Result<CartCountTemplate> {
    let identity = crate::session::identity(&session).await?;
    let count = if identity.is_empty() {
        0
    } else {
        state
            .api()
            .fetch_cart(&identity)
            .await
            .map(|cart| cart.item_count())
            .unwrap_or(0)
    };

    Ok(CartCountTemplate { count })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_empty_cart_renders_empty_message() {
        let html = CartItemsTemplate {
            cart: CartView::empty(),
        }
        .render()
        .expect("render");
        assert!(html.contains("Tu carrito está vacío."));
    }

    #[test]
    fn test_fetch_failure_renders_notice_not_empty_cart() {
        let html = CartShowTemplate {
            cart: CartView::empty(),
            error: Some("No pudimos cargar tu carrito.".to_string()),
        }
        .render()
        .expect("render");
        assert!(html.contains("No pudimos cargar tu carrito."));
        assert!(!html.contains("Tu carrito está vacío."));
    }

    #[tokio::test]
    async fn test_failed_mutation_returns_error_fragment() {
        let response = error_fragment("Stock insuficiente para talle <M>");
        assert_eq!(
            response.status(),
            axum::http::StatusCode::UNPROCESSABLE_ENTITY
        );

        let body = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .expect("body");
        let body = String::from_utf8_lossy(&body);
        assert!(body.contains("cart-error"));
        assert!(body.contains("&lt;M&gt;"));
    }
}
