//! Sales panel, read-only.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, State};
use tower_sessions::Session;
use tracing::instrument;

use voidwear_core::OrderId;

use crate::api::ApiError;
use crate::api::types::Sale;
use crate::error::{AppError, Result};
use crate::filters;
use crate::middleware::RequireAdmin;
use crate::models::{CurrentAdmin, Flash};
use crate::state::AppState;

/// Sales table template.
#[derive(Template, WebTemplate)]
#[template(path = "sales/index.html")]
pub struct SalesTemplate {
    pub admin: CurrentAdmin,
    pub flash: Option<Flash>,
    pub sales: Vec<Sale>,
}

/// Sale detail template.
#[derive(Template, WebTemplate)]
#[template(path = "sales/show.html")]
pub struct SaleDetailTemplate {
    pub admin: CurrentAdmin,
    pub sale: Sale,
}

/// Render the sales table.
#[instrument(skip_all)]
pub async fn index(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    session: Session,
) -> Result<SalesTemplate> {
    let sales = state.api().sales(&auth.token).await?;
    Ok(SalesTemplate {
        admin: auth.admin,
        flash: crate::session::take_flash(&session).await?,
        sales,
    })
}

/// Render one sale with its line items.
#[instrument(skip(state, auth))]
pub async fn show(
    State(state): State<AppState>,
    RequireAdmin(auth): RequireAdmin,
    Path(id): Path<OrderId>,
) -> Result<SaleDetailTemplate> {
    let sale = match state.api().sale_details(&auth.token, id).await {
        Ok(sale) => sale,
        Err(ApiError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("venta {id}")));
        }
        Err(err) => return Err(err.into()),
    };

    Ok(SaleDetailTemplate {
        admin: auth.admin,
        sale,
    })
}
