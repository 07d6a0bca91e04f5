//! Product listing and detail route handlers.
//!
//! The listing page is where the catalog query composer meets HTTP: incoming
//! query parameters are parsed into a [`CatalogQuery`], section slugs are
//! resolved into category ids against the cached category list, and a fetch
//! failure renders an inline error in place of the results grid.

use askama::Template;
use askama_web::WebTemplate;
use axum::extract::{Path, RawQuery, State};
use tower_sessions::Session;
use tracing::instrument;
use voidwear_core::ProductId;

use crate::api::ApiError;
use crate::api::types::Product;
use crate::catalog::{CatalogQuery, Section, SortKey};
use crate::error::{AppError, Result};
use crate::filters;
use crate::state::AppState;

/// Sizes offered across the catalog, in display order.
const SIZES: &[&str] = &["XS", "S", "M", "L", "XL", "XXL"];

/// Parsed listing query parameters.
///
/// The filter form submits multi-selects as repeated keys (`size=S&size=M`),
/// so parsing goes through `form_urlencoded` directly rather than a derived
/// deserializer that would keep only the last value.
#[derive(Debug, Default)]
pub struct ListParams {
    pub section: Option<String>,
    pub sizes: Vec<String>,
    pub colors: Vec<String>,
    pub price_min: Option<String>,
    pub price_max: Option<String>,
    pub sort_by: Option<String>,
    pub q: Option<String>,
    pub page: u32,
}

impl ListParams {
    /// Parse a raw query string, accepting both repeated keys and
    /// comma-joined values for the multi-selects.
    #[must_use]
    pub fn parse(query: &str) -> Self {
        let mut params = Self {
            page: 1,
            ..Self::default()
        };

        for (key, value) in url::form_urlencoded::parse(query.as_bytes()) {
            let value = value.trim();
            if value.is_empty() {
                continue;
            }
            match key.as_ref() {
                "section" => params.section = Some(value.to_string()),
                "size" => params
                    .sizes
                    .extend(value.split(',').map(str::trim).map(ToString::to_string)),
                "color" => params
                    .colors
                    .extend(value.split(',').map(str::trim).map(ToString::to_string)),
                "price_min" => params.price_min = Some(value.to_string()),
                "price_max" => params.price_max = Some(value.to_string()),
                "sort_by" => params.sort_by = Some(value.to_string()),
                "q" => params.q = Some(value.to_string()),
                "page" => params.page = value.parse().unwrap_or(1),
                _ => {}
            }
        }

        params
    }

    /// Build the composed query, resolving the section slug if present.
    fn to_query(&self, categories: &[crate::api::types::Category]) -> CatalogQuery {
        let category_ids = self
            .section
            .as_deref()
            .and_then(Section::parse)
            .map(|section| section.resolve(categories))
            .unwrap_or_default();

        CatalogQuery {
            sizes: self.sizes.clone(),
            colors: self.colors.clone(),
            price_min: self.price_min.as_deref().and_then(|v| v.parse().ok()),
            price_max: self.price_max.as_deref().and_then(|v| v.parse().ok()),
            sort: self.sort_by.as_deref().map(SortKey::parse).unwrap_or_default(),
            category_ids,
            search: self.q.clone(),
            page: self.page,
        }
    }

    /// Re-serialize the non-page parameters for pagination links.
    fn base_query(&self) -> String {
        let mut serializer = url::form_urlencoded::Serializer::new(String::new());
        if let Some(section) = &self.section {
            serializer.append_pair("section", section);
        }
        for size in &self.sizes {
            serializer.append_pair("size", size);
        }
        for color in &self.colors {
            serializer.append_pair("color", color);
        }
        if let Some(min) = &self.price_min {
            serializer.append_pair("price_min", min);
        }
        if let Some(max) = &self.price_max {
            serializer.append_pair("price_max", max);
        }
        if let Some(sort) = &self.sort_by {
            serializer.append_pair("sort_by", sort);
        }
        if let Some(q) = &self.q {
            serializer.append_pair("q", q);
        }
        serializer.finish()
    }
}

/// Filter panel state echoed back into the template.
pub struct FilterPanel {
    pub sizes: Vec<String>,
    pub selected_sizes: Vec<String>,
    pub colors: Vec<String>,
    pub selected_colors: Vec<String>,
    pub price_min: String,
    pub price_max: String,
    pub sort: &'static str,
    pub search: String,
}

/// Product listing template.
#[derive(Template, WebTemplate)]
#[template(path = "products/index.html")]
pub struct ProductIndexTemplate {
    pub section_title: String,
    pub products: Vec<Product>,
    pub panel: FilterPanel,
    pub page: u32,
    pub has_next_page: bool,
    /// Inline error shown in place of the results grid.
    pub error: Option<String>,
    /// Query string (minus `page`) to build pagination links from.
    pub base_query: String,
}

/// Product detail template.
#[derive(Template, WebTemplate)]
#[template(path = "products/show.html")]
pub struct ProductShowTemplate {
    pub product: Product,
    pub wishlisted: bool,
    pub logged_in: bool,
}

/// Product listing with filters and pagination.
#[instrument(skip(state, session))]
pub async fn index(
    State(state): State<AppState>,
    session: Session,
    RawQuery(raw): RawQuery,
) -> Result<ProductIndexTemplate> {
    let params = ListParams::parse(raw.as_deref().unwrap_or_default());
    let identity = crate::session::identity(&session).await?;

    // Categories and colors are cached; treat failures as empty lists so the
    // page still renders.
    let categories = state
        .api()
        .list_categories(&identity)
        .await
        .unwrap_or_default();
    let colors = state
        .api()
        .available_colors(&identity)
        .await
        .unwrap_or_default();

    let query = params.to_query(&categories);
    let (products, error) = match state.api().list_products(&identity, &query).await {
        Ok(products) => (products, None),
        Err(e) => {
            tracing::warn!("Product listing fetch failed: {e}");
            (Vec::new(), Some(e.detail()))
        }
    };

    let section_title = params
        .section
        .as_deref()
        .and_then(Section::parse)
        .map_or_else(
            || "Todos los productos".to_string(),
            |section| match section {
                Section::Menswear => "Hombre".to_string(),
                Section::Womenswear => "Mujer".to_string(),
            },
        );

    let has_next_page = error.is_none() && CatalogQuery::has_next_page(products.len());

    Ok(ProductIndexTemplate {
        section_title,
        has_next_page,
        panel: FilterPanel {
            sizes: SIZES.iter().map(ToString::to_string).collect(),
            selected_sizes: query.sizes.clone(),
            colors,
            selected_colors: query.colors.clone(),
            price_min: params.price_min.clone().unwrap_or_default(),
            price_max: params.price_max.clone().unwrap_or_default(),
            sort: query.sort.as_param(),
            search: params.q.clone().unwrap_or_default(),
        },
        page: query.page.max(1),
        products,
        error,
        base_query: params.base_query(),
    })
}

/// Product detail page.
#[instrument(skip(state, session))]
pub async fn show(
    State(state): State<AppState>,
    session: Session,
    Path(id): Path<ProductId>,
) -> Result<ProductShowTemplate> {
    let identity = crate::session::identity(&session).await?;

    let product = match state.api().get_product(&identity, id).await {
        Ok(product) => product,
        Err(ApiError::NotFound(_)) => {
            return Err(AppError::NotFound(format!("product {id}")));
        }
        Err(e) => return Err(e.into()),
    };

    // The wishlist flag is cosmetic; never fail the page over it.
    let logged_in = identity.token.is_some();
    let wishlisted = if logged_in {
        state
            .api()
            .is_wishlisted(&identity, id)
            .await
            .unwrap_or(false)
    } else {
        false
    };

    Ok(ProductShowTemplate {
        product,
        wishlisted,
        logged_in,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_repeated_and_comma_joined_multiselects() {
        let params = ListParams::parse("size=S&size=M,L&color=black");
        assert_eq!(params.sizes, vec!["S", "M", "L"]);
        assert_eq!(params.colors, vec!["black"]);
    }

    #[test]
    fn test_parse_ignores_blank_values_and_unknown_keys() {
        let params = ListParams::parse("q=&size=&mystery=1&page=3");
        assert!(params.q.is_none());
        assert!(params.sizes.is_empty());
        assert_eq!(params.page, 3);
    }

    #[test]
    fn test_base_query_round_trips_without_page() {
        let params = ListParams::parse("section=menswear&size=S&page=2");
        let base = params.base_query();
        assert!(base.contains("section=menswear"));
        assert!(base.contains("size=S"));
        assert!(!base.contains("page="));
    }
}
