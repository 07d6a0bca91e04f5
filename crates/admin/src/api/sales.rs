//! Sales (order) endpoints, read-only.

use tracing::instrument;
use voidwear_core::OrderId;

use super::types::Sale;
use super::{AdminClient, ApiError};

impl AdminClient {
    /// All orders, newest first.
    #[instrument(skip(self, token))]
    pub async fn sales(&self, token: &str) -> Result<Vec<Sale>, ApiError> {
        self.execute(self.get("/admin/sales", token)).await
    }

    /// One order with its line items.
    #[instrument(skip(self, token))]
    pub async fn sale_details(&self, token: &str, id: OrderId) -> Result<Sale, ApiError> {
        self.execute(self.get(&format!("/admin/sales/{id}"), token))
            .await
    }
}
