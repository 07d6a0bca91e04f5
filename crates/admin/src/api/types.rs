//! Wire schemas for the admin surface of the commerce REST API.
//!
//! Same convention as the storefront: every response is parsed into an
//! explicit struct at the API boundary, never handled as raw JSON.

use std::collections::HashMap;

use chrono::{DateTime, NaiveDate, Utc};
use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use voidwear_core::{
    CategoryId, Email, ExpenseId, OrderId, PaymentStatus, ProductId, UserId, UserRole, VariantId,
};

/// Hard cap on product images, enforced by the API and mirrored in the form.
pub const MAX_PRODUCT_IMAGES: usize = 3;

// =============================================================================
// Users
// =============================================================================

/// A user row as returned by `GET /admin/users`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminUser {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: UserRole,
    /// Soft-deleted users stay listed but cannot log in.
    #[serde(default = "default_true")]
    pub is_active: bool,
}

const fn default_true() -> bool {
    true
}

/// Body of `PUT /admin/users/{id}/role`.
#[derive(Debug, Clone, Serialize)]
pub struct RoleChange {
    pub role: UserRole,
}

// =============================================================================
// Sales
// =============================================================================

/// A completed or in-flight order as the back-office sees it.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Sale {
    pub id: OrderId,
    pub user_id: UserId,
    pub payment_status: PaymentStatus,
    pub total_amount: Decimal,
    pub created_at: DateTime<Utc>,
    /// Populated on the detail endpoint, usually absent in the listing.
    #[serde(default)]
    pub items: Vec<SaleItem>,
}

/// One line of a sale, with the price captured at purchase time.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SaleItem {
    pub variant_id: VariantId,
    pub product_name: String,
    pub size: String,
    pub color: String,
    pub quantity: u32,
    pub unit_price: Decimal,
}

// =============================================================================
// Expenses
// =============================================================================

/// A business expense tracked for the dashboard.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Expense {
    pub id: ExpenseId,
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub incurred_on: NaiveDate,
}

/// Body of `POST /admin/expenses`.
#[derive(Debug, Clone, Serialize)]
pub struct ExpensePayload {
    pub description: String,
    pub amount: Decimal,
    pub category: String,
    pub incurred_on: NaiveDate,
}

// =============================================================================
// Categories
// =============================================================================

/// A category row with its optional per-locale names.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminCategory {
    pub id: CategoryId,
    pub name: String,
    #[serde(default)]
    pub name_i18n: Option<HashMap<String, String>>,
}

impl AdminCategory {
    /// The stored name for a locale, empty when there is no override.
    #[must_use]
    pub fn localized(&self, language: &str) -> &str {
        self.name_i18n
            .as_ref()
            .and_then(|names| names.get(language))
            .map_or("", String::as_str)
    }
}

/// Body of `POST /admin/categories`.
#[derive(Debug, Clone, Serialize)]
pub struct CategoryPayload {
    pub name: String,
    #[serde(skip_serializing_if = "Option::is_none")]
    pub name_i18n: Option<HashMap<String, String>>,
}

// =============================================================================
// Products
// =============================================================================

/// A product as returned by the catalog endpoints, admin view.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct AdminProduct {
    pub id: ProductId,
    pub name: String,
    #[serde(default)]
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    /// Ordered image collection, at most [`MAX_PRODUCT_IMAGES`].
    #[serde(default)]
    pub images: Vec<ProductImage>,
    #[serde(default)]
    pub variants: Vec<ProductVariant>,
}

impl AdminProduct {
    /// The image URL in a zero-based slot, empty when the slot is unused.
    /// Backs the edit form's fixed image inputs.
    #[must_use]
    pub fn image_url(&self, slot: usize) -> &str {
        self.images
            .get(slot)
            .map_or("", |image| image.url.as_str())
    }
}

/// One image in a product's ordered collection.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductImage {
    pub id: i32,
    pub url: String,
    pub position: u32,
}

/// A size/color combination with its own stock counter.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ProductVariant {
    pub id: VariantId,
    pub size: String,
    pub color: String,
    pub stock: u32,
}

/// Body of `POST /products` and `PUT /products/{id}`.
///
/// The full ordered image URL list is sent on every write; adds, deletes and
/// reorders are all expressed as list edits.
#[derive(Debug, Clone, Serialize)]
pub struct ProductPayload {
    pub name: String,
    pub description: String,
    pub price: Decimal,
    pub category_id: CategoryId,
    pub image_urls: Vec<String>,
}

/// Body of `POST /products/{id}/variants`.
#[derive(Debug, Clone, Serialize)]
pub struct VariantPayload {
    pub size: String,
    pub color: String,
    pub stock: u32,
}

// =============================================================================
// Auth
// =============================================================================

/// Response of `POST /auth/login`.
#[derive(Debug, Clone, Deserialize)]
pub struct AuthTokens {
    pub access_token: String,
    pub token_type: String,
}

/// Response of `GET /auth/me`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct UserProfile {
    pub id: UserId,
    pub email: Email,
    #[serde(default)]
    pub first_name: String,
    #[serde(default)]
    pub last_name: String,
    pub role: UserRole,
}

// =============================================================================
// Dashboard
// =============================================================================

/// KPI block for the dashboard header, `GET /admin/metrics/kpis`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Kpis {
    pub total_revenue: Decimal,
    pub average_ticket: Decimal,
    pub total_orders: u32,
    pub total_users: u32,
    pub total_expenses: Decimal,
    pub total_products_sold: u32,
}

/// Every chart endpoint wraps its points in a `data` array.
#[derive(Debug, Clone, Deserialize)]
pub struct ChartSeries<T> {
    #[serde(default = "Vec::new")]
    pub data: Vec<T>,
}

/// Approved revenue per day, `GET /admin/charts/sales-over-time`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SalesPoint {
    pub date: NaiveDate,
    pub total: Decimal,
}

/// Expense total per expense category, `GET /admin/charts/expenses-by-category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ExpenseSlice {
    pub category: String,
    pub total: Decimal,
}

/// Revenue share per product category, `GET /admin/charts/sales-by-category`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct CategorySalesSlice {
    pub category: String,
    pub total: Decimal,
    /// Share of total revenue, in percent.
    pub share: Decimal,
}

/// Best sellers, `GET /admin/charts/top-products`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct TopProduct {
    pub product_name: String,
    pub units_sold: u32,
    pub revenue: Decimal,
}

/// New account registrations per day, `GET /admin/charts/user-activity`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct ActivityPoint {
    pub date: NaiveDate,
    pub new_users: u32,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_admin_user_defaults_to_active() {
        let json = r#"{
            "id": 7,
            "email": "ana@example.com",
            "first_name": "Ana",
            "last_name": "Paz",
            "role": "client"
        }"#;
        let user: AdminUser = serde_json::from_str(json).expect("deserialize");
        assert!(user.is_active);
        assert_eq!(user.role, UserRole::Client);
    }

    #[test]
    fn test_sale_listing_row_has_no_items() {
        let json = r#"{
            "id": 42,
            "user_id": 7,
            "payment_status": "approved",
            "total_amount": "10500",
            "created_at": "2026-02-01T15:30:00Z"
        }"#;
        let sale: Sale = serde_json::from_str(json).expect("deserialize");
        assert!(sale.items.is_empty());
        assert_eq!(sale.total_amount, Decimal::from(10500));
    }

    #[test]
    fn test_role_change_serializes_lowercase() {
        let body = serde_json::to_value(RoleChange {
            role: UserRole::Admin,
        })
        .expect("serialize");
        assert_eq!(body, serde_json::json!({"role": "admin"}));
    }

    #[test]
    fn test_chart_series_tolerates_missing_data() {
        let series: ChartSeries<SalesPoint> = serde_json::from_str("{}").expect("deserialize");
        assert!(series.data.is_empty());
    }
}
