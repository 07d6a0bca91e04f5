//! Product and variant management endpoints.
//!
//! Products live under the public `/products` prefix; the write operations
//! require an admin bearer token server-side.

use tracing::instrument;
use voidwear_core::{ProductId, VariantId};

use super::types::{AdminProduct, ProductPayload, ProductVariant, VariantPayload};
use super::{AdminClient, ApiError};

/// Listing page size for the back-office table. One large page; the panel has
/// no pagination controls.
const ADMIN_LIST_LIMIT: u32 = 200;

impl AdminClient {
    /// All products with images and variants.
    #[instrument(skip(self, token))]
    pub async fn products(&self, token: &str) -> Result<Vec<AdminProduct>, ApiError> {
        self.execute(
            self.get("/products/", token)
                .query(&[("skip", 0), ("limit", ADMIN_LIST_LIMIT)]),
        )
        .await
    }

    /// One product by id.
    #[instrument(skip(self, token))]
    pub async fn product(&self, token: &str, id: ProductId) -> Result<AdminProduct, ApiError> {
        self.execute(self.get(&format!("/products/{id}"), token))
            .await
    }

    /// Create a product.
    #[instrument(skip(self, token, payload))]
    pub async fn create_product(
        &self,
        token: &str,
        payload: &ProductPayload,
    ) -> Result<AdminProduct, ApiError> {
        self.execute(self.post("/products/", token).json(payload))
            .await
    }

    /// Update a product. The payload carries the full ordered image list, so
    /// image adds, deletes and reorders all go through here.
    #[instrument(skip(self, token, payload))]
    pub async fn update_product(
        &self,
        token: &str,
        id: ProductId,
        payload: &ProductPayload,
    ) -> Result<AdminProduct, ApiError> {
        self.execute(self.put(&format!("/products/{id}"), token).json(payload))
            .await
    }

    /// Delete a product.
    #[instrument(skip(self, token))]
    pub async fn delete_product(&self, token: &str, id: ProductId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .execute(self.delete(&format!("/products/{id}"), token))
            .await?;
        Ok(())
    }

    /// Add a size/color variant to a product.
    #[instrument(skip(self, token, payload))]
    pub async fn add_variant(
        &self,
        token: &str,
        product_id: ProductId,
        payload: &VariantPayload,
    ) -> Result<ProductVariant, ApiError> {
        self.execute(
            self.post(&format!("/products/{product_id}/variants"), token)
                .json(payload),
        )
        .await
    }

    /// Delete a variant. The path is variant-scoped, not product-scoped.
    #[instrument(skip(self, token))]
    pub async fn delete_variant(&self, token: &str, id: VariantId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .execute(self.delete(&format!("/products/variants/{id}"), token))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;
    use voidwear_core::CategoryId;

    use super::super::test_support::MockBackend;
    use super::*;

    fn payload(image_urls: Vec<String>) -> ProductPayload {
        ProductPayload {
            name: "Hoodie Negro".to_string(),
            description: "Algodón frisado".to_string(),
            price: Decimal::from(2500),
            category_id: CategoryId::new(1),
            image_urls,
        }
    }

    #[tokio::test]
    async fn test_update_sends_full_image_list() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        backend.stub(
            "PUT",
            "/products/8",
            serde_json::json!({
                "id": 8,
                "name": "Hoodie Negro",
                "description": "Algodón frisado",
                "price": "2500",
                "category_id": 1,
                "images": [],
                "variants": []
            }),
        );

        let urls = vec!["https://img.example/a.jpg".to_string(), "https://img.example/b.jpg".to_string()];
        client
            .update_product("token-1", ProductId::new(8), &payload(urls.clone()))
            .await
            .expect("update product");

        let requests = backend.requests();
        let body = requests[0].body.as_ref().expect("body");
        assert_eq!(body["image_urls"], serde_json::json!(urls));
    }

    #[tokio::test]
    async fn test_variant_delete_is_variant_scoped() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        backend.stub(
            "DELETE",
            "/products/variants/31",
            serde_json::json!({ "message": "ok" }),
        );

        client
            .delete_variant("token-1", VariantId::new(31))
            .await
            .expect("delete variant");

        let requests = backend.requests();
        assert_eq!(requests[0].method, "DELETE");
        assert_eq!(requests[0].path, "/products/variants/31");
    }
}
