//! Dashboard metrics and chart endpoints.

use tracing::instrument;

use super::types::{
    ActivityPoint, CategorySalesSlice, ChartSeries, ExpenseSlice, Kpis, SalesPoint, TopProduct,
};
use super::{AdminClient, ApiError};

impl AdminClient {
    /// Headline numbers for the dashboard.
    #[instrument(skip(self, token))]
    pub async fn kpis(&self, token: &str) -> Result<Kpis, ApiError> {
        self.execute(self.get("/admin/metrics/kpis", token)).await
    }

    /// Approved revenue per day, oldest first.
    #[instrument(skip(self, token))]
    pub async fn sales_over_time(&self, token: &str) -> Result<Vec<SalesPoint>, ApiError> {
        let series: ChartSeries<SalesPoint> = self
            .execute(self.get("/admin/charts/sales-over-time", token))
            .await?;
        Ok(series.data)
    }

    /// Expense totals per expense category, largest first.
    #[instrument(skip(self, token))]
    pub async fn expenses_by_category(&self, token: &str) -> Result<Vec<ExpenseSlice>, ApiError> {
        let series: ChartSeries<ExpenseSlice> = self
            .execute(self.get("/admin/charts/expenses-by-category", token))
            .await?;
        Ok(series.data)
    }

    /// Revenue split per product category.
    #[instrument(skip(self, token))]
    pub async fn sales_by_category(
        &self,
        token: &str,
    ) -> Result<Vec<CategorySalesSlice>, ApiError> {
        let series: ChartSeries<CategorySalesSlice> = self
            .execute(self.get("/admin/charts/sales-by-category", token))
            .await?;
        Ok(series.data)
    }

    /// Best-selling products by units.
    #[instrument(skip(self, token))]
    pub async fn top_products(&self, token: &str, limit: u32) -> Result<Vec<TopProduct>, ApiError> {
        let series: ChartSeries<TopProduct> = self
            .execute(
                self.get("/admin/charts/top-products", token)
                    .query(&[("limit", limit.to_string())]),
            )
            .await?;
        Ok(series.data)
    }

    /// New registrations per day.
    #[instrument(skip(self, token))]
    pub async fn user_activity(&self, token: &str) -> Result<Vec<ActivityPoint>, ApiError> {
        let series: ChartSeries<ActivityPoint> = self
            .execute(self.get("/admin/charts/user-activity", token))
            .await?;
        Ok(series.data)
    }
}

#[cfg(test)]
mod tests {
    use rust_decimal::Decimal;

    use super::super::test_support::MockBackend;
    use super::*;

    #[tokio::test]
    async fn test_charts_unwrap_the_data_envelope() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        backend.stub(
            "GET",
            "/admin/charts/sales-over-time",
            serde_json::json!({
                "data": [
                    { "date": "2026-02-01", "total": "10500" },
                    { "date": "2026-02-02", "total": "2500" }
                ]
            }),
        );

        let points = client
            .sales_over_time("token-1")
            .await
            .expect("sales over time");
        assert_eq!(points.len(), 2);
        assert_eq!(points[0].total, Decimal::from(10500));
    }

    #[tokio::test]
    async fn test_top_products_passes_limit() {
        let backend = MockBackend::start().await;
        let client = backend.client();

        let points = client.top_products("token-1", 5).await.expect("top products");
        assert!(points.is_empty());

        let requests = backend.requests();
        assert_eq!(requests[0].query.as_deref(), Some("limit=5"));
    }
}
