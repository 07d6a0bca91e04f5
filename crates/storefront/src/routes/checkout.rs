//! Checkout route handlers.
//!
//! The GET page collects the shipping address (saved or new); the POST
//! validates, optionally persists a new address, creates the payment
//! preference, and redirects to the external provider. The outcome pages
//! handle the provider's return redirect via the order resolution chain.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Query, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use voidwear_core::AddressId;

use crate::api::types::{Address, AddressPayload, Order};
use crate::checkout::resolution::{CallbackParams, resolve_order};
use crate::checkout::{CheckoutForm, ShippingMethod, order_total, shipping_cost_amount};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAuth;
use crate::routes::cart::CartView;
use crate::state::AppState;

/// Raw checkout form submission.
///
/// Flat urlencoded fields; the checkbox arrives as `"on"` when ticked and is
/// absent otherwise, so it is modelled as an `Option<String>`.
#[derive(Debug, Default, Deserialize)]
pub struct CheckoutSubmission {
    /// Selected saved address; the "new address" radio submits an empty
    /// string, so this stays a raw string until parsed.
    pub address_id: Option<String>,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    #[serde(default)]
    pub street_address: String,
    #[serde(default)]
    pub comments: String,
    #[serde(default)]
    pub city: String,
    #[serde(default)]
    pub postal_code: String,
    #[serde(default)]
    pub country: String,
    #[serde(default)]
    pub state: String,
    #[serde(default)]
    pub prefix: String,
    #[serde(default)]
    pub phone: String,
    pub save_address: Option<String>,
    pub shipping_method: Option<String>,
}

impl CheckoutSubmission {
    fn saved_address_id(&self) -> Option<AddressId> {
        self.address_id
            .as_deref()
            .and_then(|v| v.parse::<i32>().ok())
            .map(AddressId::new)
    }

    fn shipping(&self) -> ShippingMethod {
        // A single method today; anything unrecognized falls back to it.
        ShippingMethod::Express
    }

    fn into_form(self) -> CheckoutForm {
        CheckoutForm {
            first_name: self.first_name,
            last_name: self.last_name,
            street_address: self.street_address,
            comments: self.comments,
            city: self.city,
            postal_code: self.postal_code,
            country: self.country,
            state: self.state,
            prefix: self.prefix,
            phone: self.phone,
            save_address: self.save_address.is_some(),
            shipping_method: ShippingMethod::Express,
        }
    }
}

/// Checkout page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/show.html")]
pub struct CheckoutTemplate {
    pub cart: CartView,
    pub saved_addresses: Vec<Address>,
    /// Pre-selected saved address; the address book arrives in creation
    /// order, so the last entry is the most recent.
    pub default_address_id: Option<AddressId>,
    pub shipping_label: &'static str,
    pub shipping_cost: String,
    pub total: String,
    pub error: Option<String>,
}

/// Payment outcome page template.
#[derive(Template, WebTemplate)]
#[template(path = "checkout/outcome.html")]
pub struct OutcomeTemplate {
    pub heading: &'static str,
    pub body: &'static str,
    pub order: Option<Order>,
}

/// Display the checkout form.
#[instrument(skip(state, session))]
pub async fn show(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<Response> {
    let identity = crate::session::identity(&session).await?;

    let cart = state.api().fetch_cart(&identity).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    // An empty address book just means the inline form starts blank.
    let saved_addresses = state.api().addresses(&identity).await.unwrap_or_default();

    let shipping = ShippingMethod::default();
    Ok(CheckoutTemplate {
        shipping_label: shipping.label(),
        shipping_cost: shipping.cost().display(),
        total: order_total(&cart, shipping).display(),
        cart: CartView::from(&cart),
        default_address_id: saved_addresses.last().map(|a| a.address_id),
        saved_addresses,
        error: None,
    }
    .into_response())
}

/// Submit checkout: validate, create the preference, redirect to the provider.
#[instrument(skip(state, session, submission))]
pub async fn submit(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(submission): Form<CheckoutSubmission>,
) -> Result<Response> {
    let identity = crate::session::identity(&session).await?;

    let cart = state.api().fetch_cart(&identity).await?;
    if cart.is_empty() {
        return Ok(Redirect::to("/cart").into_response());
    }

    let shipping = submission.shipping();

    // Saved address wins over the inline form.
    let payload = if let Some(address_id) = submission.saved_address_id() {
        let addresses = state.api().addresses(&identity).await?;
        let Some(address) = addresses.into_iter().find(|a| a.address_id == address_id) else {
            return render_error(&state, &identity, &cart, "La dirección elegida ya no existe")
                .await;
        };
        AddressPayload::from(&address)
    } else {
        let save_address = submission.save_address.is_some();
        match submission.into_form().into_payload() {
            Ok(payload) => {
                if save_address {
                    // Best effort; a failed save must not block the purchase.
                    if let Err(e) = state.api().create_address(&identity, &payload).await {
                        tracing::warn!("Failed to save checkout address: {e}");
                    }
                }
                payload
            }
            Err(missing) => {
                tracing::debug!(?missing, "Checkout form validation failed");
                return render_error(
                    &state,
                    &identity,
                    &cart,
                    "Completá todos los campos obligatorios",
                )
                .await;
            }
        }
    };

    let preference = match state
        .api()
        .create_preference(&identity, &cart, &payload, shipping_cost_amount(shipping))
        .await
    {
        Ok(preference) => preference,
        Err(e) => {
            tracing::error!("Failed to create payment preference: {e}");
            return render_error(&state, &identity, &cart, "No pudimos iniciar el pago").await;
        }
    };

    Ok(Redirect::to(&preference.init_point).into_response())
}

/// Re-render the checkout page with an inline error, leaving the form usable.
async fn render_error(
    state: &AppState,
    identity: &crate::api::Identity,
    cart: &crate::api::types::Cart,
    message: &str,
) -> Result<Response> {
    let saved_addresses = state.api().addresses(identity).await.unwrap_or_default();
    let shipping = ShippingMethod::default();
    Ok(CheckoutTemplate {
        shipping_label: shipping.label(),
        shipping_cost: shipping.cost().display(),
        total: order_total(cart, shipping).display(),
        cart: CartView::from(cart),
        default_address_id: saved_addresses.last().map(|a| a.address_id),
        saved_addresses,
        error: Some(message.to_string()),
    }
    .into_response())
}

/// Provider redirect: payment approved.
#[instrument(skip(state, session))]
pub async fn success(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<OutcomeTemplate> {
    outcome(
        &state,
        &session,
        &params,
        "¡Gracias por tu compra!",
        "Tu pago fue aprobado. Te enviamos un mail con el detalle.",
    )
    .await
}

/// Provider redirect: payment pending.
#[instrument(skip(state, session))]
pub async fn pending(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<OutcomeTemplate> {
    outcome(
        &state,
        &session,
        &params,
        "Pago pendiente",
        "Estamos esperando la confirmación del medio de pago.",
    )
    .await
}

/// Provider redirect: payment failed.
#[instrument(skip(state, session))]
pub async fn failure(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Query(params): Query<CallbackParams>,
) -> Result<OutcomeTemplate> {
    outcome(
        &state,
        &session,
        &params,
        "El pago no se completó",
        "Podés intentarlo de nuevo desde tu carrito.",
    )
    .await
}

async fn outcome(
    state: &AppState,
    session: &Session,
    params: &CallbackParams,
    heading: &'static str,
    body: &'static str,
) -> Result<OutcomeTemplate> {
    let identity = crate::session::identity(session).await?;

    // Resolution is best effort; the outcome page stands on its own even
    // when no order can be pinned down.
    let order = match resolve_order(state.api(), &identity, params).await {
        Ok(order) => order,
        Err(e) => {
            tracing::warn!("Order resolution failed on payment callback: {e}");
            None
        }
    };

    if let Some(order) = &order {
        tracing::info!(
            order_id = %order.id,
            status = order.payment_status.label(),
            "Payment callback resolved to order"
        );
    }

    Ok(OutcomeTemplate {
        heading,
        body,
        order,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn address(id: i32, street: &str) -> Address {
        Address {
            address_id: AddressId::new(id),
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street_address: street.to_string(),
            comments: String::new(),
            city: "CABA".to_string(),
            postal_code: "1414".to_string(),
            country: "Argentina".to_string(),
            state: "CABA".to_string(),
            prefix: "+54".to_string(),
            phone: "1155550000".to_string(),
        }
    }

    fn template(saved_addresses: Vec<Address>) -> CheckoutTemplate {
        let shipping = ShippingMethod::default();
        CheckoutTemplate {
            cart: CartView::empty(),
            default_address_id: saved_addresses.last().map(|a| a.address_id),
            saved_addresses,
            shipping_label: shipping.label(),
            shipping_cost: shipping.cost().display(),
            total: shipping.cost().display(),
            error: None,
        }
    }

    #[test]
    fn test_most_recent_saved_address_is_preselected() {
        let html = template(vec![
            address(3, "Av. Rivadavia 100"),
            address(9, "Av. Siempre Viva 742"),
        ])
        .render()
        .expect("render");

        assert!(html.contains(r#"value="9" checked"#));
        assert!(!html.contains(r#"value="3" checked"#));
        assert!(!html.contains(r#"value="" checked"#));
    }

    #[test]
    fn test_inline_address_fields_leave_validation_to_the_server() {
        let html = template(vec![address(3, "Av. Rivadavia 100")])
            .render()
            .expect("render");
        assert!(!html.contains("required"));
    }
}
