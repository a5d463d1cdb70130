//! Query specification for the catalog engine.

use crate::ids::{BrandId, CategoryId};
use crate::money::Money;
use crate::search::Filter;
use serde::{Deserialize, Serialize};

/// Default page size for product listings.
pub const DEFAULT_PER_PAGE: u32 = 24;

/// Sort options for product listings.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "kebab-case")]
pub enum SortOption {
    /// Keep catalog order.
    #[default]
    Relevance,
    /// Sort by price, low to high.
    PriceLow,
    /// Sort by price, high to low.
    PriceHigh,
    /// Sort by highest rated.
    Rating,
    /// Only products tagged "new", catalog order.
    Newest,
}

impl SortOption {
    /// Parse the URL form; unknown values fall back to relevance.
    pub fn from_str(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            "newest" => Self::Newest,
            _ => Self::Relevance,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Relevance => "relevance",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
            Self::Newest => "newest",
        }
    }

    pub fn display_name(&self) -> &'static str {
        match self {
            Self::Relevance => "Relevance",
            Self::PriceLow => "Price: Low to High",
            Self::PriceHigh => "Price: High to Low",
            Self::Rating => "Customer Rating",
            Self::Newest => "Newest Arrivals",
        }
    }
}

/// A catalog query: filters, sort and page.
///
/// Built fresh for every listing request. `page` is 1-based; the engine
/// rejects `page == 0` and `per_page == 0` before running any stage.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct QuerySpec {
    /// Category slug.
    pub category: Option<CategoryId>,
    /// Single brand slug.
    pub brand: Option<BrandId>,
    /// Inclusive lower price bound.
    pub min_price: Money,
    /// Inclusive upper price bound, unbounded when `None`.
    pub max_price: Option<Money>,
    /// Free-text search.
    pub search: Option<String>,
    #[serde(rename = "sortBy")]
    pub sort: SortOption,
    pub page: u32,
    pub per_page: u32,
}

impl Default for QuerySpec {
    fn default() -> Self {
        Self::new()
    }
}

impl QuerySpec {
    /// Create an unfiltered first-page query.
    pub fn new() -> Self {
        Self {
            category: None,
            brand: None,
            min_price: Money::zero(),
            max_price: None,
            search: None,
            sort: SortOption::Relevance,
            page: 1,
            per_page: DEFAULT_PER_PAGE,
        }
    }

    /// Filter by category slug.
    pub fn with_category(mut self, category: impl Into<CategoryId>) -> Self {
        self.category = Some(category.into());
        self
    }

    /// Filter by brand slug.
    pub fn with_brand(mut self, brand: impl Into<BrandId>) -> Self {
        self.brand = Some(brand.into());
        self
    }

    /// Restrict to an inclusive price range.
    pub fn with_price_range(mut self, min: Money, max: Option<Money>) -> Self {
        self.min_price = min;
        self.max_price = max;
        self
    }

    /// Set the search text.
    pub fn with_search(mut self, search: impl Into<String>) -> Self {
        self.search = Some(search.into());
        self
    }

    /// Set sort option.
    pub fn with_sort(mut self, sort: SortOption) -> Self {
        self.sort = sort;
        self
    }

    /// Set pagination. Values are taken as given and validated by the engine.
    pub fn with_pagination(mut self, page: u32, per_page: u32) -> Self {
        self.page = page;
        self.per_page = per_page;
        self
    }

    /// Trimmed search text, `None` when empty.
    pub fn search_term(&self) -> Option<&str> {
        self.search
            .as_deref()
            .map(str::trim)
            .filter(|s| !s.is_empty())
    }

    /// Filter stages for this query, in pipeline order.
    ///
    /// Absent criteria produce no stage; the price range is always present.
    pub fn filters(&self) -> Vec<Filter> {
        let mut filters = Vec::with_capacity(4);

        if let Some(category) = self.category.as_ref().filter(|c| !c.is_blank()) {
            filters.push(Filter::Category(category.clone()));
        }
        if let Some(brand) = self.brand.as_ref().filter(|b| !b.is_blank()) {
            filters.push(Filter::Brand(brand.clone()));
        }
        filters.push(Filter::PriceRange {
            min: self.min_price,
            max: self.max_price,
        });
        if let Some(term) = self.search_term() {
            filters.push(Filter::Text(term.to_string()));
        }

        filters
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_query_builder() {
        let query = QuerySpec::new()
            .with_search("lamp")
            .with_sort(SortOption::PriceLow)
            .with_pagination(2, 10);

        assert_eq!(query.page, 2);
        assert_eq!(query.per_page, 10);
        assert_eq!(query.sort, SortOption::PriceLow);
    }

    #[test]
    fn test_filters_skip_absent_criteria() {
        let filters = QuerySpec::new().with_search("   ").filters();
        assert_eq!(filters.len(), 1);
        assert!(matches!(filters[0], Filter::PriceRange { .. }));
    }

    #[test]
    fn test_filters_in_pipeline_order() {
        let filters = QuerySpec::new()
            .with_search("desk")
            .with_brand("acme")
            .with_category("office")
            .filters();
        let names: Vec<&str> = filters.iter().map(Filter::name).collect();
        assert_eq!(names, vec!["category", "brand", "price", "search"]);
    }

    #[test]
    fn test_blank_category_is_skipped() {
        let filters = QuerySpec::new().with_category("").filters();
        assert_eq!(filters.len(), 1);
    }

    #[test]
    fn test_sort_option_round_trip_names() {
        for sort in [
            SortOption::Relevance,
            SortOption::PriceLow,
            SortOption::PriceHigh,
            SortOption::Rating,
            SortOption::Newest,
        ] {
            assert_eq!(SortOption::from_str(sort.as_str()), sort);
        }
        assert_eq!(SortOption::from_str("bogus"), SortOption::Relevance);
    }

    #[test]
    fn test_sort_serializes_kebab_case() {
        let json = serde_json::to_string(&SortOption::PriceHigh).unwrap();
        assert_eq!(json, "\"price-high\"");
    }
}
