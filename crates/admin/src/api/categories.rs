//! Category management endpoints.

use tracing::instrument;
use voidwear_core::CategoryId;

use super::types::{AdminCategory, CategoryPayload};
use super::{AdminClient, ApiError};

impl AdminClient {
    /// All categories, alphabetical.
    #[instrument(skip(self, token))]
    pub async fn categories(&self, token: &str) -> Result<Vec<AdminCategory>, ApiError> {
        self.execute(self.get("/admin/categories", token)).await
    }

    /// Create a category. The API rejects duplicate names with a 400.
    #[instrument(skip(self, token, payload))]
    pub async fn create_category(
        &self,
        token: &str,
        payload: &CategoryPayload,
    ) -> Result<AdminCategory, ApiError> {
        self.execute(self.post("/admin/categories", token).json(payload))
            .await
    }

    /// Delete a category. Fails with a 400 while products still reference it.
    #[instrument(skip(self, token))]
    pub async fn delete_category(&self, token: &str, id: CategoryId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .execute(self.delete(&format!("/admin/categories/{id}"), token))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use std::collections::HashMap;

    use super::super::test_support::MockBackend;
    use super::*;

    #[tokio::test]
    async fn test_create_category_sends_locale_names() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        backend.stub(
            "POST",
            "/admin/categories",
            serde_json::json!({
                "id": 3,
                "name": "camperas",
                "name_i18n": { "en": "Jackets" }
            }),
        );

        let mut name_i18n = HashMap::new();
        name_i18n.insert("en".to_string(), "Jackets".to_string());
        let payload = CategoryPayload {
            name: "camperas".to_string(),
            name_i18n: Some(name_i18n),
        };
        let category = client
            .create_category("token-1", &payload)
            .await
            .expect("create category");
        assert_eq!(category.id, CategoryId::new(3));

        let requests = backend.requests();
        let body = requests[0].body.as_ref().expect("body");
        assert_eq!(body["name_i18n"]["en"], "Jackets");
    }
}
