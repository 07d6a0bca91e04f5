//! Catalog endpoints.
//!
//! Category and color lookups change rarely and back every page render, so
//! they are served from the moka cache between refreshes.

use tracing::instrument;
use voidwear_core::ProductId;

use super::client::CacheValue;
use super::types::{Category, Product};
use super::{ApiClient, ApiError, Identity};
use crate::catalog::CatalogQuery;

const CATEGORIES_CACHE_KEY: &str = "categories";
const COLORS_CACHE_KEY: &str = "colors";

impl ApiClient {
    /// List products matching the composed filter state.
    ///
    /// Empty filters are omitted from the query string entirely (see
    /// [`CatalogQuery::to_params`]); the result length drives the
    /// next-page heuristic.
    #[instrument(skip(self, identity, query))]
    pub async fn list_products(
        &self,
        identity: &Identity,
        query: &CatalogQuery,
    ) -> Result<Vec<Product>, ApiError> {
        self.execute(self.get("/products/", identity).query(&query.to_params()))
            .await
    }

    /// Fetch a single product with its images and variants.
    #[instrument(skip(self, identity))]
    pub async fn get_product(
        &self,
        identity: &Identity,
        id: ProductId,
    ) -> Result<Product, ApiError> {
        self.execute(self.get(&format!("/products/{id}"), identity))
            .await
    }

    /// The full category list, cached.
    #[instrument(skip(self, identity))]
    pub async fn list_categories(&self, identity: &Identity) -> Result<Vec<Category>, ApiError> {
        if let Some(CacheValue::Categories(categories)) = self.cached(CATEGORIES_CACHE_KEY).await {
            return Ok(categories);
        }

        let categories: Vec<Category> = self.execute(self.get("/categories/", identity)).await?;
        self.store(
            CATEGORIES_CACHE_KEY,
            CacheValue::Categories(categories.clone()),
        )
        .await;
        Ok(categories)
    }

    /// All distinct variant colors, cached, for the filter panel.
    #[instrument(skip(self, identity))]
    pub async fn available_colors(&self, identity: &Identity) -> Result<Vec<String>, ApiError> {
        if let Some(CacheValue::Colors(colors)) = self.cached(COLORS_CACHE_KEY).await {
            return Ok(colors);
        }

        let colors: Vec<String> = self
            .execute(self.get("/utils/filters/colors", identity))
            .await?;
        self.store(COLORS_CACHE_KEY, CacheValue::Colors(colors.clone()))
            .await;
        Ok(colors)
    }
}

#[cfg(test)]
mod tests {
    use serde_json::json;

    use super::super::test_support::MockBackend;
    use super::*;

    #[tokio::test]
    async fn test_categories_are_cached() {
        let backend = MockBackend::start().await;
        backend.stub(
            "GET",
            "/categories/",
            json!([{ "id": 1, "name": "hoodies" }]),
        );
        let client = backend.client();
        let identity = Identity::default();

        let first = client.list_categories(&identity).await.expect("first");
        let second = client.list_categories(&identity).await.expect("second");
        assert_eq!(first.len(), 1);
        assert_eq!(second.len(), 1);

        // Second call answered from cache - only one request hit the wire.
        assert_eq!(backend.requests().len(), 1);
    }

    #[tokio::test]
    async fn test_list_products_serializes_query() {
        let backend = MockBackend::start().await;
        let client = backend.client();

        let query = CatalogQuery {
            sizes: vec!["S".to_string(), "M".to_string()],
            ..CatalogQuery::default()
        };
        client
            .list_products(&Identity::default(), &query)
            .await
            .expect("list");

        let requests = backend.requests();
        let query_string = requests[0].query.as_deref().expect("query string");
        assert!(query_string.contains("size=S%2CM"));
        assert!(query_string.contains("limit=8"));
        // Empty color filter must not appear at all.
        assert!(!query_string.contains("color="));
    }
}
