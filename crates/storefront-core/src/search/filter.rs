//! Filter stages of the query pipeline.

use crate::catalog::Product;
use crate::ids::{BrandId, CategoryId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// A single product predicate.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub enum Filter {
    /// Product category equals the slug.
    Category(CategoryId),
    /// Product brand equals the slug.
    Brand(BrandId),
    /// Inclusive price range; `max: None` is unbounded.
    PriceRange { min: Money, max: Option<Money> },
    /// Case-insensitive title substring or whole-tag match.
    Text(String),
}

impl Filter {
    /// Create a category filter.
    pub fn category(id: impl Into<CategoryId>) -> Self {
        Filter::Category(id.into())
    }

    /// Create a price range filter.
    pub fn price_range(min: Money, max: Option<Money>) -> Self {
        Filter::PriceRange { min, max }
    }

    /// Create a text search filter.
    pub fn text(query: impl Into<String>) -> Self {
        Filter::Text(query.into())
    }

    /// Stage name used in logs.
    pub fn name(&self) -> &'static str {
        match self {
            Filter::Category(_) => "category",
            Filter::Brand(_) => "brand",
            Filter::PriceRange { .. } => "price",
            Filter::Text(_) => "search",
        }
    }

    /// Whether the product passes this filter.
    pub fn matches(&self, product: &Product) -> bool {
        match self {
            Filter::Category(id) => &product.category_id == id,
            Filter::Brand(id) => product.brand_id.as_ref() == Some(id),
            Filter::PriceRange { min, max } => {
                product.price >= *min && max.map_or(true, |max| product.price <= max)
            }
            Filter::Text(query) => {
                let needle = query.trim().to_lowercase();
                product.title.to_lowercase().contains(&needle)
                    || product.tags.iter().any(|t| t.to_lowercase() == needle)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn lamp() -> Product {
        Product::new(1, "desk-lamp", "LED Desk Lamp", Money::new(2500), "home")
            .with_brand("lumen")
            .with_tags(["bestseller", "office"])
    }

    #[test]
    fn test_price_range_is_inclusive() {
        assert!(Filter::price_range(Money::new(2500), Some(Money::new(2500))).matches(&lamp()));
        assert!(!Filter::price_range(Money::new(2501), None).matches(&lamp()));
        assert!(!Filter::price_range(Money::zero(), Some(Money::new(2499))).matches(&lamp()));
    }

    #[test]
    fn test_text_matches_title_substring_case_insensitive() {
        assert!(Filter::text("desk").matches(&lamp()));
        assert!(Filter::text("LAMP").matches(&lamp()));
        assert!(!Filter::text("chair").matches(&lamp()));
    }

    #[test]
    fn test_text_matches_whole_tag_only() {
        assert!(Filter::text("Office").matches(&lamp()));
        assert!(!Filter::text("offi").matches(&lamp()));
    }

    #[test]
    fn test_brand_filter_skips_unbranded() {
        let unbranded = Product::new(2, "x", "X", Money::new(100), "home");
        assert!(Filter::Brand(BrandId::new("lumen")).matches(&lamp()));
        assert!(!Filter::Brand(BrandId::new("lumen")).matches(&unbranded));
    }

    #[test]
    fn test_category() {
        assert!(Filter::category("home").matches(&lamp()));
        assert!(!Filter::category("garden").matches(&lamp()));
    }
}
