//! Category types for product organization.

use crate::ids::CategoryId;
use serde::{Deserialize, Serialize};

/// Upper bound on categories shown in the featured grid.
pub const MAX_FEATURED_CATEGORIES: usize = 12;

/// A product category.
///
/// Products reference their category by slug, so `slug` doubles as the
/// [`CategoryId`] used in queries.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Category {
    /// Numeric fixture identifier.
    #[serde(rename = "Id")]
    pub id: u64,
    /// Category name.
    pub name: String,
    /// URL-friendly slug, referenced by `Product::category_id`.
    pub slug: CategoryId,
    /// Category description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Category image URL.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub image: Option<String>,
    /// Shown on the homepage grid.
    #[serde(default)]
    pub featured: bool,
    /// Number of products advertised for this category.
    #[serde(default)]
    pub product_count: u32,
}

impl Category {
    /// Create a new category.
    pub fn new(id: u64, name: impl Into<String>, slug: impl Into<CategoryId>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            description: None,
            image: None,
            featured: false,
            product_count: 0,
        }
    }

    /// Featured categories in fixture order, capped at [`MAX_FEATURED_CATEGORIES`].
    pub fn featured(categories: &[Category]) -> Vec<Category> {
        categories
            .iter()
            .filter(|c| c.featured)
            .take(MAX_FEATURED_CATEGORIES)
            .cloned()
            .collect()
    }
}

/// A homepage hero banner.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct HeroBanner {
    #[serde(rename = "Id")]
    pub id: crate::ids::BannerId,
    pub title: String,
    #[serde(default)]
    pub subtitle: Option<String>,
    #[serde(default)]
    pub image: Option<String>,
    #[serde(default)]
    pub link: Option<String>,
    /// Display position, ascending.
    pub order: i32,
}
