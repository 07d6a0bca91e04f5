//! Dashboard: KPI block plus chart tables.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tracing::instrument;

use crate::api::types::{ActivityPoint, CategorySalesSlice, ExpenseSlice, Kpis, SalesPoint, TopProduct};
use crate::error::Result;
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

/// How many best sellers the dashboard shows.
const TOP_PRODUCTS_LIMIT: u32 = 5;

/// Dashboard page template.
#[derive(Template, WebTemplate)]
#[template(path = "dashboard.html")]
pub struct DashboardTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub kpis: Kpis,
    pub sales_over_time: Vec<SalesPoint>,
    pub expenses_by_category: Vec<ExpenseSlice>,
    pub sales_by_category: Vec<CategorySalesSlice>,
    pub top_products: Vec<TopProduct>,
    pub user_activity: Vec<ActivityPoint>,
}

/// Render the dashboard.
#[instrument(skip_all)]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: tower_sessions::Session,
) -> Result<DashboardTemplate> {
    let api = state.api();
    let token = &auth.token;

    let (kpis, sales_over_time, expenses_by_category, sales_by_category, top_products, user_activity) =
        tokio::try_join!(
            api.kpis(token),
            api.sales_over_time(token),
            api.expenses_by_category(token),
            api.sales_by_category(token),
            api.top_products(token, TOP_PRODUCTS_LIMIT),
            api.user_activity(token),
        )?;

    Ok(DashboardTemplate {
        admin: auth.admin,
        flash: crate::session::take_flash(&session).await?,
        kpis,
        sales_over_time,
        expenses_by_category,
        sales_by_category,
        top_products,
        user_activity,
    })
}
