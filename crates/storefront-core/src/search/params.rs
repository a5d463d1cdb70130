//! URL query-parameter form of a listing request.
//!
//! The listing page keeps its state in the URL: `category`, `brands`
//! (comma-joined), `minPrice`, `maxPrice`, `search`, `sort` and `page`.
//! [`CatalogParams`] parses and renders that form and converts it into the
//! engine's [`QuerySpec`].

use crate::ids::{BrandId, CategoryId};
use crate::money::Money;
use crate::search::{QuerySpec, SortOption};
use serde::{Deserialize, Serialize};

/// Listing state as carried in the URL.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct CatalogParams {
    pub category: Option<CategoryId>,
    /// Selected brands, in selection order.
    pub brands: Vec<BrandId>,
    pub min_price: Option<Money>,
    pub max_price: Option<Money>,
    pub search: Option<String>,
    pub sort: SortOption,
    pub page: u32,
}

impl Default for CatalogParams {
    fn default() -> Self {
        Self {
            category: None,
            brands: Vec::new(),
            min_price: None,
            max_price: None,
            search: None,
            sort: SortOption::Relevance,
            page: 1,
        }
    }
}

impl CatalogParams {
    /// Parse from a URL query string (with or without the leading `?`).
    ///
    /// Unknown keys are ignored and malformed numbers fall back to defaults.
    pub fn from_query_string(qs: &str) -> Self {
        let mut params = Self::default();

        for pair in qs.trim_start_matches('?').split('&').filter(|p| !p.is_empty()) {
            let mut parts = pair.splitn(2, '=');
            let key = parts.next().unwrap_or("");
            let value = decode(parts.next().unwrap_or(""));
            if value.is_empty() {
                continue;
            }

            match key {
                "category" => params.category = Some(CategoryId::new(value)),
                "brands" => {
                    params.brands = value
                        .split(',')
                        .map(str::trim)
                        .filter(|b| !b.is_empty())
                        .map(BrandId::from)
                        .collect()
                }
                "minPrice" => params.min_price = parse_price(&value),
                "maxPrice" => params.max_price = parse_price(&value),
                "search" => params.search = Some(value),
                "sort" => params.sort = SortOption::from_str(&value),
                "page" => params.page = value.parse().ok().filter(|&p| p >= 1).unwrap_or(1),
                _ => {}
            }
        }

        params
    }

    /// Render as a query string without the leading `?`.
    ///
    /// Defaults are omitted, so an unfiltered first page renders as "".
    pub fn to_query_string(&self) -> String {
        let mut pairs: Vec<(&str, String)> = Vec::new();

        if let Some(category) = &self.category {
            pairs.push(("category", category.to_string()));
        }
        if !self.brands.is_empty() {
            let joined: Vec<&str> = self.brands.iter().map(BrandId::as_str).collect();
            pairs.push(("brands", joined.join(",")));
        }
        if let Some(min) = self.min_price {
            pairs.push(("minPrice", min.display_amount()));
        }
        if let Some(max) = self.max_price {
            pairs.push(("maxPrice", max.display_amount()));
        }
        if let Some(search) = &self.search {
            pairs.push(("search", search.clone()));
        }
        if self.sort != SortOption::Relevance {
            pairs.push(("sort", self.sort.as_str().to_string()));
        }
        if self.page > 1 {
            pairs.push(("page", self.page.to_string()));
        }

        pairs
            .into_iter()
            .map(|(k, v)| format!("{}={}", k, urlencoding::encode(&v)))
            .collect::<Vec<_>>()
            .join("&")
    }

    /// Number of active filter groups (category, brands, price, search).
    pub fn active_filter_count(&self) -> usize {
        [
            self.category.is_some(),
            !self.brands.is_empty(),
            self.min_price.is_some_and(|m| !m.is_zero()) || self.max_price.is_some(),
            self.search.as_deref().is_some_and(|s| !s.trim().is_empty()),
        ]
        .iter()
        .filter(|active| **active)
        .count()
    }

    /// Add or remove a brand selection; resets to the first page.
    pub fn toggle_brand(&mut self, brand: BrandId) {
        if let Some(pos) = self.brands.iter().position(|b| b == &brand) {
            self.brands.remove(pos);
        } else {
            self.brands.push(brand);
        }
        self.page = 1;
    }

    /// Convert to an engine query.
    ///
    /// The engine filters on a single brand, so only the first selected
    /// brand is forwarded.
    pub fn to_query_spec(&self, per_page: u32) -> QuerySpec {
        QuerySpec {
            category: self.category.clone(),
            brand: self.brands.first().cloned(),
            min_price: self.min_price.unwrap_or_else(Money::zero),
            max_price: self.max_price,
            search: self.search.clone(),
            sort: self.sort,
            page: self.page,
            per_page,
        }
    }
}

fn decode(raw: &str) -> String {
    let spaced = raw.replace('+', " ");
    match urlencoding::decode(&spaced) {
        Ok(decoded) => decoded.into_owned(),
        Err(_) => spaced,
    }
}

fn parse_price(value: &str) -> Option<Money> {
    value
        .trim()
        .parse::<f64>()
        .ok()
        .filter(|v| v.is_finite() && *v >= 0.0)
        .map(Money::from_decimal)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_full_query_string() {
        let params = CatalogParams::from_query_string(
            "?category=office&brands=acme,lumen&minPrice=10&maxPrice=99.5&search=desk+lamp&sort=price-high&page=3",
        );
        assert_eq!(params.category, Some(CategoryId::new("office")));
        assert_eq!(params.brands, vec![BrandId::new("acme"), BrandId::new("lumen")]);
        assert_eq!(params.min_price, Some(Money::new(1000)));
        assert_eq!(params.max_price, Some(Money::new(9950)));
        assert_eq!(params.search.as_deref(), Some("desk lamp"));
        assert_eq!(params.sort, SortOption::PriceHigh);
        assert_eq!(params.page, 3);
    }

    #[test]
    fn test_parse_malformed_values_fall_back() {
        let params = CatalogParams::from_query_string("page=zero&minPrice=-4&sort=weird&brands=,,");
        assert_eq!(params, CatalogParams::default());
    }

    #[test]
    fn test_render_omits_defaults() {
        assert_eq!(CatalogParams::default().to_query_string(), "");

        let params = CatalogParams {
            search: Some("usb c".into()),
            sort: SortOption::Rating,
            page: 2,
            ..Default::default()
        };
        assert_eq!(params.to_query_string(), "search=usb%20c&sort=rating&page=2");
    }

    #[test]
    fn test_render_then_parse_preserves_params() {
        let params = CatalogParams {
            category: Some(CategoryId::new("home & garden")),
            brands: vec![BrandId::new("acme")],
            max_price: Some(Money::new(5000)),
            ..Default::default()
        };
        assert_eq!(CatalogParams::from_query_string(&params.to_query_string()), params);
    }

    #[test]
    fn test_spec_uses_first_brand() {
        let params = CatalogParams::from_query_string("brands=lumen,acme");
        let spec = params.to_query_spec(24);
        assert_eq!(spec.brand, Some(BrandId::new("lumen")));
        assert_eq!(spec.min_price, Money::zero());
        assert_eq!(spec.max_price, None);
    }

    #[test]
    fn test_toggle_brand_resets_page() {
        let mut params = CatalogParams::from_query_string("brands=acme&page=4");
        params.toggle_brand(BrandId::new("lumen"));
        assert_eq!(params.brands.len(), 2);
        assert_eq!(params.page, 1);
        params.toggle_brand(BrandId::new("acme"));
        assert_eq!(params.brands, vec![BrandId::new("lumen")]);
    }

    #[test]
    fn test_active_filter_count() {
        let params = CatalogParams::from_query_string("category=office&minPrice=0&search=%20");
        assert_eq!(params.active_filter_count(), 1);
        let params = CatalogParams::from_query_string("brands=a&maxPrice=50&search=lamp");
        assert_eq!(params.active_filter_count(), 3);
    }
}
