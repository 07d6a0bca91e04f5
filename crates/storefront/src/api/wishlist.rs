//! Wishlist endpoints.

use tracing::instrument;
use voidwear_core::ProductId;

use super::types::WishlistItem;
use super::{ApiClient, ApiError, Identity};

impl ApiClient {
    /// The user's saved products.
    #[instrument(skip(self, identity))]
    pub async fn wishlist(&self, identity: &Identity) -> Result<Vec<WishlistItem>, ApiError> {
        self.execute(self.get("/wishlist", identity)).await
    }

    /// Save a product to the wishlist.
    #[instrument(skip(self, identity))]
    pub async fn add_to_wishlist(
        &self,
        identity: &Identity,
        product_id: ProductId,
    ) -> Result<Vec<WishlistItem>, ApiError> {
        self.execute(self.post(&format!("/wishlist/{product_id}"), identity))
            .await
    }

    /// Remove a product from the wishlist.
    #[instrument(skip(self, identity))]
    pub async fn remove_from_wishlist(
        &self,
        identity: &Identity,
        product_id: ProductId,
    ) -> Result<Vec<WishlistItem>, ApiError> {
        self.execute(self.delete(&format!("/wishlist/{product_id}"), identity))
            .await
    }

    /// Whether a product is currently on the wishlist.
    #[instrument(skip(self, identity))]
    pub async fn is_wishlisted(
        &self,
        identity: &Identity,
        product_id: ProductId,
    ) -> Result<bool, ApiError> {
        let items = self.wishlist(identity).await?;
        Ok(items.iter().any(|item| item.product_id == product_id))
    }
}
