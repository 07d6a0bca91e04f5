//! Account route handlers: profile, order history, and the address book.

use askama::Template;
use askama_web::WebTemplate;
use axum::{
    Form,
    extract::{Path, State},
    response::{IntoResponse, Redirect, Response},
};
use serde::Deserialize;
use tower_sessions::Session;
use tracing::instrument;
use voidwear_core::{AddressId, OrderId};

use crate::api::ApiError;
use crate::api::types::{Address, AddressPayload, Order, UserProfile};
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAuth;
use crate::models::Flash;
use crate::state::AppState;

/// Account overview template.
#[derive(Template, WebTemplate)]
#[template(path = "account/index.html")]
pub struct AccountTemplate {
    pub profile: UserProfile,
}

/// Order history template.
#[derive(Template, WebTemplate)]
#[template(path = "account/orders.html")]
pub struct OrdersTemplate {
    pub orders: Vec<Order>,
}

/// Order detail template.
#[derive(Template, WebTemplate)]
#[template(path = "account/order_detail.html")]
pub struct OrderDetailTemplate {
    pub order: Order,
}

/// Address list template.
#[derive(Template, WebTemplate)]
#[template(path = "account/addresses.html")]
pub struct AddressesTemplate {
    pub addresses: Vec<Address>,
    pub flash: Option<Flash>,
}

/// Address form template, shared by create and edit.
#[derive(Template, WebTemplate)]
#[template(path = "account/address_form.html")]
pub struct AddressFormTemplate {
    /// Present when editing an existing address.
    pub address_id: Option<AddressId>,
    pub form: AddressFormValues,
    pub error: Option<String>,
}

/// Echoed field values for the address form.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct AddressFormValues {
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
}

impl AddressFormValues {
    fn into_checkout_form(self) -> crate::checkout::CheckoutForm {
        crate::checkout::CheckoutForm {
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
            save_address: false,
            shipping_method: crate::checkout::ShippingMethod::Express,
        }
    }
}

impl From<&Address> for AddressFormValues {
    fn from(address: &Address) -> Self {
        Self {
            first_name: address.first_name.clone(),
            last_name: address.last_name.clone(),
            street_address: address.street_address.clone(),
            comments: address.comments.clone(),
            city: address.city.clone(),
            postal_code: address.postal_code.clone(),
            country: address.country.clone(),
            state: address.state.clone(),
            prefix: address.prefix.clone(),
            phone: address.phone.clone(),
        }
    }
}

/// Validate the address form into a wire payload, keeping the raw values for
/// a re-render on failure.
fn validate(values: AddressFormValues) -> std::result::Result<AddressPayload, AddressFormValues> {
    match values.clone().into_checkout_form().into_payload() {
        Ok(payload) => Ok(payload),
        Err(_) => Err(values),
    }
}

/// Account overview.
#[instrument(skip(state, session))]
pub async fn index(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<AccountTemplate> {
    let identity = crate::session::identity(&session).await?;
    let profile = state.api().me(&identity).await?;
    Ok(AccountTemplate { profile })
}

/// Order history, most recent first.
#[instrument(skip(state, session))]
pub async fn orders(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<OrdersTemplate> {
    let identity = crate::session::identity(&session).await?;
    let orders = state.api().my_orders(&identity).await?;
    Ok(OrdersTemplate { orders })
}

/// Detail of a single order.
#[instrument(skip(state, session))]
pub async fn order_detail(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<OrderId>,
) -> Result<OrderDetailTemplate> {
    let identity = crate::session::identity(&session).await?;
    let order = match state.api().order_details(&identity, id).await {
        Ok(order) => order,
        Err(ApiError::NotFound(_)) => return Err(AppError::NotFound(format!("order {id}"))),
        Err(e) => return Err(e.into()),
    };
    Ok(OrderDetailTemplate { order })
}

/// Address list.
#[instrument(skip(state, session))]
pub async fn addresses(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
) -> Result<AddressesTemplate> {
    let identity = crate::session::identity(&session).await?;
    let addresses = state.api().addresses(&identity).await?;
    let flash = crate::session::take_flash(&session).await?;
    Ok(AddressesTemplate { addresses, flash })
}

/// Blank address form.
#[instrument]
pub async fn new_address(RequireAuth(_user): RequireAuth) -> AddressFormTemplate {
    AddressFormTemplate {
        address_id: None,
        form: AddressFormValues::default(),
        error: None,
    }
}

/// Pre-filled address form.
#[instrument(skip(state, session))]
pub async fn edit_address(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<AddressId>,
) -> Result<AddressFormTemplate> {
    let identity = crate::session::identity(&session).await?;
    let addresses = state.api().addresses(&identity).await?;
    let address = addresses
        .iter()
        .find(|a| a.address_id == id)
        .ok_or_else(|| AppError::NotFound(format!("address {id}")))?;

    Ok(AddressFormTemplate {
        address_id: Some(id),
        form: AddressFormValues::from(address),
        error: None,
    })
}

/// Create a new address.
#[instrument(skip(state, session, values))]
pub async fn create_address(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Form(values): Form<AddressFormValues>,
) -> Result<Response> {
    let identity = crate::session::identity(&session).await?;

    let payload = match validate(values) {
        Ok(payload) => payload,
        Err(values) => {
            return Ok(AddressFormTemplate {
                address_id: None,
                form: values,
                error: Some("Completá todos los campos obligatorios".to_string()),
            }
            .into_response());
        }
    };

    state.api().create_address(&identity, &payload).await?;
    crate::session::push_flash(&session, Flash::success("Dirección guardada")).await?;
    Ok(Redirect::to("/account/addresses").into_response())
}

/// Update an existing address.
#[instrument(skip(state, session, values))]
pub async fn update_address(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<AddressId>,
    Form(values): Form<AddressFormValues>,
) -> Result<Response> {
    let identity = crate::session::identity(&session).await?;

    let payload = match validate(values) {
        Ok(payload) => payload,
        Err(values) => {
            return Ok(AddressFormTemplate {
                address_id: Some(id),
                form: values,
                error: Some("Completá todos los campos obligatorios".to_string()),
            }
            .into_response());
        }
    };

    state.api().update_address(&identity, id, &payload).await?;
    crate::session::push_flash(&session, Flash::success("Dirección actualizada")).await?;
    Ok(Redirect::to("/account/addresses").into_response())
}

/// Delete an address.
#[instrument(skip(state, session))]
pub async fn delete_address(
    RequireAuth(_user): RequireAuth,
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<AddressId>,
) -> Result<Redirect> {
    let identity = crate::session::identity(&session).await?;
    state.api().delete_address(&identity, id).await?;
    crate::session::push_flash(&session, Flash::success("Dirección eliminada")).await?;
    Ok(Redirect::to("/account/addresses"))
}
