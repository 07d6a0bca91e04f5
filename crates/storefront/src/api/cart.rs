//! Cart endpoints.
//!
//! Every mutation returns the full server-side cart, and callers replace
//! their local view with it wholesale. The server owns price and stock truth,
//! so optimistic local patching is never attempted.

use serde::Serialize;
use tracing::instrument;
use uuid::Uuid;
use voidwear_core::VariantId;

use super::types::{Cart, GuestSession};
use super::{ApiClient, ApiError, Identity};

/// Request body for `POST /cart/items`.
#[derive(Debug, Serialize)]
struct AddItemBody {
    variant_id: VariantId,
    quantity: u32,
}

/// Request body for `PUT /cart/items/{variant_id}`.
#[derive(Debug, Serialize)]
struct UpdateQuantityBody {
    quantity: u32,
}

/// Request body for `POST /cart/merge`.
#[derive(Debug, Serialize)]
struct MergeBody {
    guest_session_id: String,
}

impl ApiClient {
    /// Request a fresh guest session id for an anonymous shopper.
    #[instrument(skip(self))]
    pub async fn create_guest_session(&self) -> Result<Uuid, ApiError> {
        let session: GuestSession = self
            .execute(self.get("/cart/session/guest", &Identity::default()))
            .await?;
        Ok(session.guest_session_id)
    }

    /// Fetch the current cart for this identity.
    #[instrument(skip(self, identity))]
    pub async fn fetch_cart(&self, identity: &Identity) -> Result<Cart, ApiError> {
        self.execute(self.get("/cart/", identity)).await
    }

    /// Append or increment a line item.
    ///
    /// The unit-price snapshot is captured server-side; stock limits are
    /// enforced there too and come back as a structured `detail`.
    #[instrument(skip(self, identity))]
    pub async fn add_item(
        &self,
        identity: &Identity,
        variant_id: VariantId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        let body = AddItemBody {
            variant_id,
            quantity,
        };
        self.execute(self.post("/cart/items", identity).json(&body))
            .await
    }

    /// Delete a line item.
    #[instrument(skip(self, identity))]
    pub async fn remove_item(
        &self,
        identity: &Identity,
        variant_id: VariantId,
    ) -> Result<Cart, ApiError> {
        self.execute(self.delete(&format!("/cart/items/{variant_id}"), identity))
            .await
    }

    /// Set a line's quantity.
    ///
    /// A quantity of zero delegates to [`Self::remove_item`] - a zero-quantity
    /// row is never persisted.
    #[instrument(skip(self, identity))]
    pub async fn update_quantity(
        &self,
        identity: &Identity,
        variant_id: VariantId,
        quantity: u32,
    ) -> Result<Cart, ApiError> {
        if quantity == 0 {
            return self.remove_item(identity, variant_id).await;
        }
        let body = UpdateQuantityBody { quantity };
        self.execute(
            self.put(&format!("/cart/items/{variant_id}"), identity)
                .json(&body),
        )
        .await
    }

    /// Merge a guest cart into the authenticated user's cart.
    ///
    /// Called once after login; the guest id is discarded by the caller on
    /// success.
    #[instrument(skip(self, identity))]
    pub async fn merge_guest_cart(
        &self,
        identity: &Identity,
        guest_session_id: &str,
    ) -> Result<Cart, ApiError> {
        let body = MergeBody {
            guest_session_id: guest_session_id.to_string(),
        };
        self.execute(self.post("/cart/merge", identity).json(&body))
            .await
    }
}

#[cfg(test)]
mod tests {
    use super::super::test_support::MockBackend;
    use super::*;

    #[tokio::test]
    async fn test_fetch_cart_sends_guest_header() {
        let backend = MockBackend::start().await;
        let client = backend.client();

        let identity = Identity::guest("guest-123");
        let cart = client.fetch_cart(&identity).await.expect("fetch cart");
        assert!(cart.is_empty());

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].path, "/cart/");
        assert_eq!(requests[0].guest_header.as_deref(), Some("guest-123"));
        assert!(requests[0].auth_header.is_none());
    }

    #[tokio::test]
    async fn test_update_quantity_zero_issues_delete() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        let identity = Identity::guest("guest-123");

        client
            .update_quantity(&identity, VariantId::new(7), 0)
            .await
            .expect("update");

        let requests = backend.requests();
        assert_eq!(requests.len(), 1);
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/cart/items/7");
    }

    #[tokio::test]
    async fn test_update_quantity_positive_issues_put() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        let identity = Identity::user("token-abc");

        client
            .update_quantity(&identity, VariantId::new(7), 3)
            .await
            .expect("update");

        let requests = backend.requests();
        assert_eq!(requests[0].method, "PUT");
        assert_eq!(requests[0].path, "/cart/items/7");
        assert_eq!(requests[0].auth_header.as_deref(), Some("Bearer token-abc"));
    }

    #[tokio::test]
    async fn test_stock_error_surfaces_server_detail() {
        let backend = MockBackend::start().await;
        backend.fail_next(409, "Insufficient stock for variant");
        let client = backend.client();

        let err = client
            .add_item(&Identity::guest("g"), VariantId::new(1), 99)
            .await
            .expect_err("should fail");
        assert_eq!(err.detail(), "Insufficient stock for variant");
    }
}
