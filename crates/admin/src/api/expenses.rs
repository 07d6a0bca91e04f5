//! Expense tracking endpoints.

use tracing::instrument;
use voidwear_core::ExpenseId;

use super::types::{Expense, ExpensePayload};
use super::{AdminClient, ApiError};

impl AdminClient {
    /// All recorded expenses.
    #[instrument(skip(self, token))]
    pub async fn expenses(&self, token: &str) -> Result<Vec<Expense>, ApiError> {
        self.execute(self.get("/admin/expenses", token)).await
    }

    /// Record a new expense.
    #[instrument(skip(self, token, payload))]
    pub async fn create_expense(
        &self,
        token: &str,
        payload: &ExpensePayload,
    ) -> Result<Expense, ApiError> {
        self.execute(self.post("/admin/expenses", token).json(payload))
            .await
    }

    /// Delete an expense.
    #[instrument(skip(self, token))]
    pub async fn delete_expense(&self, token: &str, id: ExpenseId) -> Result<(), ApiError> {
        let _: serde_json::Value = self
            .execute(self.delete(&format!("/admin/expenses/{id}"), token))
            .await?;
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use chrono::NaiveDate;
    use rust_decimal::Decimal;

    use super::super::test_support::MockBackend;
    use super::*;

    #[tokio::test]
    async fn test_create_expense_posts_payload() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        backend.stub(
            "POST",
            "/admin/expenses",
            serde_json::json!({
                "id": 5,
                "description": "Envío de stock",
                "amount": "12000",
                "category": "logistica",
                "incurred_on": "2026-02-10"
            }),
        );

        let payload = ExpensePayload {
            description: "Envío de stock".to_string(),
            amount: Decimal::from(12000),
            category: "logistica".to_string(),
            incurred_on: NaiveDate::from_ymd_opt(2026, 2, 10).expect("valid date"),
        };
        let expense = client
            .create_expense("token-1", &payload)
            .await
            .expect("create expense");
        assert_eq!(expense.id, ExpenseId::new(5));

        let requests = backend.requests();
        let body = requests[0].body.as_ref().expect("body");
        assert_eq!(body["category"], "logistica");
        assert_eq!(body["incurred_on"], "2026-02-10");
    }

    #[tokio::test]
    async fn test_delete_failure_carries_server_detail() {
        let backend = MockBackend::start().await;
        let client = backend.client();
        backend.fail_next(400, "El gasto ya fue eliminado");

        let err = client
            .delete_expense("token-1", ExpenseId::new(9))
            .await
            .expect_err("should fail");
        assert_eq!(err.detail(), "El gasto ya fue eliminado");
    }
}
