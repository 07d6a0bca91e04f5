//! Checkout endpoint.

use rust_decimal::Decimal;
use serde::Serialize;
use tracing::instrument;

use super::types::{AddressPayload, Cart, CheckoutPreference};
use super::{ApiClient, ApiError, Identity};

/// Request body for `POST /checkout/create-preference`.
///
/// Carries the full cart snapshot so the order's line items capture
/// price-at-purchase, decoupled from later product edits.
#[derive(Debug, Serialize)]
struct CreatePreferenceBody<'a> {
    cart: &'a Cart,
    shipping_address: &'a AddressPayload,
    shipping_cost: Decimal,
}

impl ApiClient {
    /// Create a payment preference and return the provider redirect target.
    #[instrument(skip_all)]
    pub async fn create_preference(
        &self,
        identity: &Identity,
        cart: &Cart,
        shipping_address: &AddressPayload,
        shipping_cost: Decimal,
    ) -> Result<CheckoutPreference, ApiError> {
        let body = CreatePreferenceBody {
            cart,
            shipping_address,
            shipping_cost,
        };
        self.execute(self.post("/checkout/create-preference", identity).json(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::MockBackend;
    use super::*;

    fn payload() -> AddressPayload {
        AddressPayload {
            first_name: "Ada".to_string(),
            last_name: "Lovelace".to_string(),
            street_address: "Av. Siempre Viva 742".to_string(),
            comments: String::new(),
            city: "CABA".to_string(),
            postal_code: "1414".to_string(),
            country: "Argentina".to_string(),
            state: "Buenos Aires".to_string(),
            prefix: "+54".to_string(),
            phone: "1155551234".to_string(),
            email: Some("ada@example.com".to_string()),
        }
    }

    #[tokio::test]
    async fn test_create_preference_posts_cart_and_shipping() {
        let backend = MockBackend::start().await;
        let client = backend.client();

        let preference = client
            .create_preference(
                &Identity::user("tok"),
                &Cart::default(),
                &payload(),
                Decimal::from(8000),
            )
            .await
            .expect("create preference");
        assert_eq!(preference.init_point, "https://pay.example/init");

        let requests = backend.requests();
        assert_eq!(requests[0].path, "/checkout/create-preference");
        let body = requests[0].body.as_ref().expect("body");
        assert_eq!(body["shipping_cost"], serde_json::json!("8000"));
        assert_eq!(body["shipping_address"]["firstName"], "Ada");
    }
}
