//! Order history endpoints.

use tracing::instrument;
use voidwear_core::OrderId;

use super::types::Order;
use super::{ApiClient, ApiError, Identity};

impl ApiClient {
    /// The authenticated user's orders, most recent first.
    #[instrument(skip(self, identity))]
    pub async fn my_orders(&self, identity: &Identity) -> Result<Vec<Order>, ApiError> {
        self.execute(self.get("/orders/me", identity)).await
    }

    /// Full detail of one of the user's orders.
    #[instrument(skip(self, identity))]
    pub async fn order_details(
        &self,
        identity: &Identity,
        order_id: OrderId,
    ) -> Result<Order, ApiError> {
        self.execute(self.get(&format!("/orders/me/{order_id}"), identity))
            .await
    }

    /// Look an order up by its provider payment id.
    ///
    /// Returns [`ApiError::NotFound`] until the payment webhook has been
    /// processed server-side.
    #[instrument(skip(self, identity))]
    pub async fn order_by_payment(
        &self,
        identity: &Identity,
        payment_id: &str,
    ) -> Result<Order, ApiError> {
        self.execute(self.get(&format!("/orders/by-payment/{payment_id}"), identity))
            .await
    }
}
