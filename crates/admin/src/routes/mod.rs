//! HTTP route handlers for the back-office.
//!
//! # Route Structure
//!
//! ```text
//! GET  /                         - Dashboard (KPIs + charts)
//! GET  /health                   - Health check
//!
//! # Auth
//! GET  /login                    - Login page (clears any stale session)
//! POST /login                    - Login action (admins only)
//! POST /logout                   - Logout action
//!
//! # Users
//! GET  /users                    - User table
//! POST /users                    - Create user
//! POST /users/{id}/role          - Change role
//! POST /users/{id}/deactivate    - Soft-delete (confirm form post)
//!
//! # Sales
//! GET  /sales                    - Order table
//! GET  /sales/{id}               - Order detail with line items
//!
//! # Expenses
//! GET  /expenses                 - Expense table + create form
//! POST /expenses                 - Record expense
//! POST /expenses/{id}/delete     - Delete (confirm form post)
//!
//! # Categories
//! GET  /categories               - Category table + create form
//! POST /categories               - Create category
//! POST /categories/{id}/delete   - Delete (confirm form post)
//!
//! # Products
//! GET  /products                 - Product table
//! GET  /products/new             - Create form
//! POST /products                 - Create product
//! GET  /products/{id}/edit       - Edit form (images + variants)
//! POST /products/{id}            - Update product
//! POST /products/{id}/delete     - Delete (confirm form post)
//! POST /products/{id}/variants   - Add variant
//! POST /products/variants/{id}/delete - Delete variant (confirm form post)
//! ```

pub mod auth;
pub mod categories;
pub mod dashboard;
pub mod expenses;
pub mod products;
pub mod sales;
pub mod users;

use axum::{
    Router,
    routing::{get, post},
};

use crate::state::AppState;

/// Create the user management router.
pub fn user_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(users::index).post(users::create))
        .route("/{id}/role", post(users::change_role))
        .route("/{id}/deactivate", post(users::deactivate))
}

/// Create the sales router.
pub fn sales_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(sales::index))
        .route("/{id}", get(sales::show))
}

/// Create the expenses router.
pub fn expense_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(expenses::index).post(expenses::create))
        .route("/{id}/delete", post(expenses::delete))
}

/// Create the categories router.
pub fn category_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(categories::index).post(categories::create))
        .route("/{id}/delete", post(categories::delete))
}

/// Create the products router.
pub fn product_routes() -> Router<AppState> {
    Router::new()
        .route("/", get(products::index).post(products::create))
        .route("/new", get(products::new))
        .route("/{id}/edit", get(products::edit))
        .route("/{id}", post(products::update))
        .route("/{id}/delete", post(products::delete))
        .route("/{id}/variants", post(products::add_variant))
        .route("/variants/{id}/delete", post(products::delete_variant))
}

/// Health check endpoint.
async fn health() -> &'static str {
    "ok"
}

/// Create all routes for the admin panel.
pub fn routes() -> Router<AppState> {
    Router::new()
        .route("/", get(dashboard::show))
        .route("/health", get(health))
        .route("/login", get(auth::login_page).post(auth::login))
        .route("/logout", post(auth::logout))
        .nest("/users", user_routes())
        .nest("/sales", sales_routes())
        .nest("/expenses", expense_routes())
        .nest("/categories", category_routes())
        .nest("/products", product_routes())
}
