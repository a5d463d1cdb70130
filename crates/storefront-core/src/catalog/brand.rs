//! Brand types.

use crate::catalog::Product;
use crate::ids::BrandId;
use serde::{Deserialize, Serialize};

/// A product brand.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Brand {
    /// Numeric fixture identifier.
    #[serde(rename = "Id")]
    pub id: u64,
    pub name: String,
    /// URL-friendly slug, referenced by `Product::brand_id`.
    pub slug: BrandId,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub logo: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    #[serde(default)]
    pub featured: bool,
}

impl Brand {
    /// Create a new brand.
    pub fn new(id: u64, name: impl Into<String>, slug: impl Into<BrandId>) -> Self {
        Self {
            id,
            name: name.into(),
            slug: slug.into(),
            logo: None,
            description: None,
            featured: false,
        }
    }

    /// Whether the product belongs to this brand.
    pub fn owns(&self, product: &Product) -> bool {
        product.brand_id.as_ref() == Some(&self.slug)
    }
}
