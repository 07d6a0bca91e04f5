//! Home page route handler.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::State;
use tower_sessions::Session;
use tracing::instrument;

use crate::api::types::Product;
use crate::catalog::CatalogQuery;
use crate::error::Result;
use crate::filters;
use crate::models::Flash;
use crate::state::AppState;

/// Home page template.
#[derive(Template, WebTemplate)]
#[template(path = "home.html")]
pub struct HomeTemplate {
    pub featured: Vec<Product>,
    pub flash: Option<Flash>,
}

/// Display home page with the first page of the catalog as featured items.
#[instrument(skip(state, session))]
pub async fn home(State(state): State<AppState>, session: Session) -> Result<HomeTemplate> {
    let identity = crate::session::identity(&session).await?;
    let flash = crate::session::take_flash(&session).await?;

    // Never fail the home page over a catalog hiccup.
    let featured = state
        .api()
        .list_products(&identity, &CatalogQuery::default())
        .await
        .unwrap_or_default();

    Ok(HomeTemplate { featured, flash })
}
