//! Catalog filter state and query composition.
//!
//! The filter panel's state is composed into query parameters for
//! `GET /products/`. Two rules matter:
//!
//! - multi-select filters (size, color) are comma-joined and omitted entirely
//!   when empty - an empty string would match nothing server-side;
//! - pagination is `skip`/`limit` with a fixed page size, and "next page
//!   available" is inferred from whether a full page came back (the API has
//!   no total-count signal; an exactly-full last page misreports).

use rust_decimal::Decimal;
use serde::Deserialize;
use voidwear_core::CategoryId;

use crate::api::types::Category;

/// Products per catalog page.
pub const PAGE_SIZE: usize = 8;

/// Category names (canonical, lowercase) that make up the menswear section.
/// Every other category belongs to womenswear.
const MENSWEAR_CATEGORIES: &[&str] = &["hoodies", "camperas", "remeras", "pantalones"];

/// Sort order for the product listing.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum SortKey {
    #[default]
    NameAsc,
    NameDesc,
    PriceAsc,
    PriceDesc,
}

impl SortKey {
    /// Wire value for the `sort_by` parameter.
    #[must_use]
    pub const fn as_param(self) -> &'static str {
        match self {
            Self::NameAsc => "name_asc",
            Self::NameDesc => "name_desc",
            Self::PriceAsc => "price_asc",
            Self::PriceDesc => "price_desc",
        }
    }

    /// Parse a wire value, defaulting to name ascending.
    #[must_use]
    pub fn parse(value: &str) -> Self {
        match value {
            "name_desc" => Self::NameDesc,
            "price_asc" => Self::PriceAsc,
            "price_desc" => Self::PriceDesc,
            _ => Self::NameAsc,
        }
    }
}

/// A top-level storefront section resolved client-side into category ids.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Section {
    Menswear,
    Womenswear,
}

impl Section {
    /// Parse a path segment like `menswear`.
    #[must_use]
    pub fn parse(slug: &str) -> Option<Self> {
        match slug.to_ascii_lowercase().as_str() {
            "menswear" => Some(Self::Menswear),
            "womenswear" => Some(Self::Womenswear),
            _ => None,
        }
    }

    /// Resolve this section into concrete category ids by partitioning the
    /// full category list against the fixed membership list.
    ///
    /// The partition is disjoint and exhaustive: every category lands in
    /// exactly one section.
    #[must_use]
    pub fn resolve(self, categories: &[Category]) -> Vec<CategoryId> {
        categories
            .iter()
            .filter(|category| {
                let is_menswear = MENSWEAR_CATEGORIES
                    .contains(&category.name.to_ascii_lowercase().as_str());
                match self {
                    Self::Menswear => is_menswear,
                    Self::Womenswear => !is_menswear,
                }
            })
            .map(|category| category.id)
            .collect()
    }
}

/// Composed filter state for the product listing.
#[derive(Debug, Clone, Default)]
pub struct CatalogQuery {
    /// Selected sizes (multi-select).
    pub sizes: Vec<String>,
    /// Selected colors (multi-select).
    pub colors: Vec<String>,
    /// Inclusive lower price bound.
    pub price_min: Option<Decimal>,
    /// Inclusive upper price bound.
    pub price_max: Option<Decimal>,
    /// Sort order.
    pub sort: SortKey,
    /// Concrete category ids (already resolved from a section or slug).
    pub category_ids: Vec<CategoryId>,
    /// Free-text search query.
    pub search: Option<String>,
    /// One-based page number.
    pub page: u32,
}

impl CatalogQuery {
    /// Serialize into query parameters.
    ///
    /// Empty multi-selects and unset bounds are omitted entirely; the listing
    /// endpoint treats a missing key as "no filter".
    #[must_use]
    pub fn to_params(&self) -> Vec<(String, String)> {
        let mut params = Vec::new();

        if !self.sizes.is_empty() {
            params.push(("size".to_string(), self.sizes.join(",")));
        }
        if !self.colors.is_empty() {
            params.push(("color".to_string(), self.colors.join(",")));
        }
        if let Some(min) = self.price_min {
            params.push(("price_min".to_string(), min.to_string()));
        }
        if let Some(max) = self.price_max {
            params.push(("price_max".to_string(), max.to_string()));
        }
        params.push(("sort_by".to_string(), self.sort.as_param().to_string()));
        if !self.category_ids.is_empty() {
            let joined = self
                .category_ids
                .iter()
                .map(ToString::to_string)
                .collect::<Vec<_>>()
                .join(",");
            params.push(("category_id".to_string(), joined));
        }
        if let Some(search) = self.search.as_deref().filter(|s| !s.trim().is_empty()) {
            params.push(("q".to_string(), search.to_string()));
        }

        let page = self.page.max(1);
        let skip = (page as usize - 1) * PAGE_SIZE;
        params.push(("skip".to_string(), skip.to_string()));
        params.push(("limit".to_string(), PAGE_SIZE.to_string()));

        params
    }

    /// Next-page heuristic: a full page suggests more results exist.
    ///
    /// Known approximation - when the last page is exactly full this reports
    /// a next page that turns out empty. The API exposes no total count to do
    /// better with.
    #[must_use]
    pub const fn has_next_page(returned: usize) -> bool {
        returned == PAGE_SIZE
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use voidwear_core::CategoryId;

    fn category(id: i32, name: &str) -> Category {
        Category {
            id: CategoryId::new(id),
            name: name.to_string(),
            name_i18n: None,
        }
    }

    fn keys(params: &[(String, String)]) -> Vec<&str> {
        params.iter().map(|(key, _)| key.as_str()).collect()
    }

    #[test]
    fn test_empty_multiselects_are_omitted() {
        let query = CatalogQuery::default();
        let params = query.to_params();
        let keys = keys(&params);
        assert!(!keys.contains(&"size"));
        assert!(!keys.contains(&"color"));
        assert!(!keys.contains(&"category_id"));
        assert!(!keys.contains(&"q"));
        // Sort and paging always go out.
        assert!(keys.contains(&"sort_by"));
        assert!(keys.contains(&"skip"));
        assert!(keys.contains(&"limit"));
    }

    #[test]
    fn test_multiselects_are_comma_joined() {
        let query = CatalogQuery {
            sizes: vec!["S".to_string(), "M".to_string()],
            colors: vec!["black".to_string()],
            ..CatalogQuery::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("size".to_string(), "S,M".to_string())));
        assert!(params.contains(&("color".to_string(), "black".to_string())));
    }

    #[test]
    fn test_blank_search_is_omitted() {
        let query = CatalogQuery {
            search: Some("   ".to_string()),
            ..CatalogQuery::default()
        };
        assert!(!keys(&query.to_params()).contains(&"q"));
    }

    #[test]
    fn test_pagination_skip_limit() {
        let query = CatalogQuery {
            page: 3,
            ..CatalogQuery::default()
        };
        let params = query.to_params();
        assert!(params.contains(&("skip".to_string(), "16".to_string())));
        assert!(params.contains(&("limit".to_string(), "8".to_string())));

        // Page 0 is clamped to page 1.
        let query = CatalogQuery::default();
        assert!(query.to_params().contains(&("skip".to_string(), "0".to_string())));
    }

    #[test]
    fn test_category_ids_comma_joined() {
        let query = CatalogQuery {
            category_ids: vec![CategoryId::new(1), CategoryId::new(4)],
            ..CatalogQuery::default()
        };
        assert!(query
            .to_params()
            .contains(&("category_id".to_string(), "1,4".to_string())));
    }

    #[test]
    fn test_next_page_heuristic() {
        assert!(CatalogQuery::has_next_page(PAGE_SIZE));
        assert!(!CatalogQuery::has_next_page(PAGE_SIZE - 1));
        assert!(!CatalogQuery::has_next_page(0));
    }

    #[test]
    fn test_section_partition_is_disjoint_and_exhaustive() {
        let categories = vec![
            category(1, "hoodies"),
            category(2, "Camperas"),
            category(3, "vestidos"),
            category(4, "faldas"),
            category(5, "remeras"),
        ];

        let menswear = Section::Menswear.resolve(&categories);
        let womenswear = Section::Womenswear.resolve(&categories);

        // Disjoint.
        for id in &menswear {
            assert!(!womenswear.contains(id));
        }
        // Exhaustive: every category appears in exactly one partition.
        assert_eq!(menswear.len() + womenswear.len(), categories.len());

        assert_eq!(
            menswear,
            vec![CategoryId::new(1), CategoryId::new(2), CategoryId::new(5)]
        );
        assert_eq!(womenswear, vec![CategoryId::new(3), CategoryId::new(4)]);
    }

    #[test]
    fn test_section_parse() {
        assert_eq!(Section::parse("Menswear"), Some(Section::Menswear));
        assert_eq!(Section::parse("womenswear"), Some(Section::Womenswear));
        assert_eq!(Section::parse("hoodies"), None);
    }

    #[test]
    fn test_sort_key_roundtrip() {
        for key in [
            SortKey::NameAsc,
            SortKey::NameDesc,
            SortKey::PriceAsc,
            SortKey::PriceDesc,
        ] {
            assert_eq!(SortKey::parse(key.as_param()), key);
        }
        assert_eq!(SortKey::parse("garbage"), SortKey::NameAsc);
    }
}
