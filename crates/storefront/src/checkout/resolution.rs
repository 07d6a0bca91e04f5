//! Order resolution after the payment provider redirects back.
//!
//! The provider's callback parameters are not consistent across flows: some
//! carry our order id, some only the provider's payment or collection id, and
//! some nothing usable at all. Resolution therefore walks a fallback chain,
//! in order of reliability:
//!
//! 1. explicit order id,
//! 2. payment or collection id looked up via the by-payment endpoint,
//! 3. the user's most recent order.

use serde::Deserialize;
use tracing::{instrument, warn};
use voidwear_core::OrderId;

use crate::api::types::Order;
use crate::api::{ApiClient, ApiError, Identity};

/// Query parameters the payment provider appends to the return URL.
///
/// All fields are optional; different flows populate different subsets.
#[derive(Debug, Clone, Default, Deserialize)]
pub struct CallbackParams {
    /// Our order id, when the provider echoes it back.
    pub order_id: Option<OrderId>,
    /// Provider payment id.
    pub payment_id: Option<String>,
    /// Provider collection id (an alias of the payment id in some flows).
    pub collection_id: Option<String>,
    /// Provider-reported outcome hint.
    pub status: Option<String>,
    /// Provider echo of our external reference.
    pub external_reference: Option<String>,
}

impl CallbackParams {
    /// The provider payment identifier, whichever parameter carried it.
    #[must_use]
    pub fn payment_reference(&self) -> Option<&str> {
        self.payment_id
            .as_deref()
            .or(self.collection_id.as_deref())
            .filter(|id| !id.is_empty())
    }
}

/// Resolve the concrete order a payment callback refers to.
///
/// Each step of the chain falls through on `NotFound`; other API errors
/// propagate. The by-payment lookup can legitimately miss while the payment
/// webhook is still in flight, which is exactly when the most-recent-order
/// fallback earns its keep.
#[instrument(skip(api, identity))]
pub async fn resolve_order(
    api: &ApiClient,
    identity: &Identity,
    params: &CallbackParams,
) -> Result<Option<Order>, ApiError> {
    if let Some(order_id) = params.order_id {
        match api.order_details(identity, order_id).await {
            Ok(order) => return Ok(Some(order)),
            Err(ApiError::NotFound(_)) => {
                warn!(%order_id, "Callback order id did not resolve, falling back");
            }
            Err(err) => return Err(err),
        }
    }

    if let Some(payment_id) = params.payment_reference() {
        match api.order_by_payment(identity, payment_id).await {
            Ok(order) => return Ok(Some(order)),
            Err(ApiError::NotFound(_)) => {
                warn!(payment_id, "Payment id did not resolve, falling back");
            }
            Err(err) => return Err(err),
        }
    }

    let mut orders = api.my_orders(identity).await?;
    if orders.is_empty() {
        return Ok(None);
    }
    Ok(Some(orders.remove(0)))
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use crate::api::test_support::MockBackend;
    use super::*;

    fn order_json(id: i32, payment_id: Option<&str>) -> serde_json::Value {
        json!({
            "id": id,
            "payment_id": payment_id,
            "payment_status": "approved",
            "total_amount": "10500",
            "created_at": "2026-08-20T12:00:00Z",
            "items": [],
        })
    }

    #[tokio::test]
    async fn test_explicit_order_id_wins() {
        let backend = MockBackend::start().await;
        backend.stub("GET", "/orders/me/42", order_json(42, Some("p-1")));
        let client = backend.client();

        let params = CallbackParams {
            order_id: Some(OrderId::new(42)),
            payment_id: Some("p-other".to_string()),
            ..CallbackParams::default()
        };
        let order = resolve_order(&client, &Identity::user("tok"), &params)
            .await
            .expect("resolve")
            .expect("order");
        assert_eq!(order.id, OrderId::new(42));

        // Only the direct lookup went out.
        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/orders/me/42");
    }

    #[tokio::test]
    async fn test_collection_id_resolves_via_payment_lookup() {
        let backend = MockBackend::start().await;
        backend.stub("GET", "/orders/by-payment/col-9", order_json(7, Some("col-9")));
        let client = backend.client();

        let params = CallbackParams {
            collection_id: Some("col-9".to_string()),
            ..CallbackParams::default()
        };
        let order = resolve_order(&client, &Identity::user("tok"), &params)
            .await
            .expect("resolve")
            .expect("order");
        assert_eq!(order.id, OrderId::new(7));
    }

    #[tokio::test]
    async fn test_unresolved_payment_falls_back_to_most_recent() {
        let backend = MockBackend::start().await;
        backend.stub_status(
            "GET",
            "/orders/by-payment/p-ghost",
            axum::http::StatusCode::NOT_FOUND,
            json!({ "detail": "unknown payment" }),
        );
        backend.stub(
            "GET",
            "/orders/me",
            json!([order_json(12, None), order_json(11, None)]),
        );
        let client = backend.client();

        let params = CallbackParams {
            payment_id: Some("p-ghost".to_string()),
            ..CallbackParams::default()
        };
        let order = resolve_order(&client, &Identity::user("tok"), &params)
            .await
            .expect("resolve")
            .expect("order");
        assert_eq!(order.id, OrderId::new(12));
    }

    #[tokio::test]
    async fn test_no_parameters_and_no_orders_resolves_to_none() {
        let backend = MockBackend::start().await;
        backend.stub("GET", "/orders/me", json!([]));
        let client = backend.client();

        let resolved = resolve_order(&client, &Identity::user("tok"), &CallbackParams::default())
            .await
            .expect("resolve");
        assert!(resolved.is_none());
    }
}
