//! Product types.

use crate::error::CommerceError;
use crate::ids::{BrandId, CategoryId, ProductId};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Stock level assumed when a fixture omits `stockQuantity`.
pub const DEFAULT_STOCK_QUANTITY: u32 = 10;

/// Tag marking a product as a new arrival.
pub const TAG_NEW: &str = "new";
/// Tag marking a product as a best seller.
pub const TAG_BESTSELLER: &str = "bestseller";
/// Tag marking a product as part of a deal.
pub const TAG_DEAL: &str = "deal";

fn default_stock_quantity() -> u32 {
    DEFAULT_STOCK_QUANTITY
}

/// A product in the catalog.
///
/// Products are read-only to the engine and reconciler; carts and wishlists
/// hold their own snapshot copies.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    /// Unique product identifier.
    #[serde(rename = "Id")]
    pub id: ProductId,
    /// URL-friendly slug (unique).
    pub slug: String,
    /// Display title.
    pub title: String,
    /// Long description.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub description: Option<String>,
    /// Current selling price.
    pub price: Money,
    /// Price before discount, when the product is on sale.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub original_price: Option<Money>,
    /// Discount off the original price, 0-100.
    #[serde(default)]
    pub discount_percentage: u8,
    /// Slug of the owning category.
    pub category_id: CategoryId,
    /// Slug of the brand, if any.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub brand_id: Option<BrandId>,
    /// Average rating, 0-5.
    #[serde(default)]
    pub rating: f64,
    /// Number of reviews behind the rating.
    #[serde(default)]
    pub review_count: u32,
    /// Whether the product can be purchased at all.
    pub in_stock: bool,
    /// Units available.
    #[serde(default = "default_stock_quantity")]
    pub stock_quantity: u32,
    /// Merchandising tags ("bestseller", "deal", "new", ...).
    #[serde(default)]
    pub tags: Vec<String>,
    /// Image URLs, first one is the primary image.
    #[serde(default)]
    pub images: Vec<String>,
}

/// Highest rating a product can carry.
const MAX_RATING: f64 = 5.0;

impl Product {
    /// Create an in-stock product with default merchandising fields.
    pub fn new(
        id: u64,
        slug: impl Into<String>,
        title: impl Into<String>,
        price: Money,
        category_id: impl Into<CategoryId>,
    ) -> Self {
        Self {
            id: ProductId::new(id),
            slug: slug.into(),
            title: title.into(),
            description: None,
            price,
            original_price: None,
            discount_percentage: 0,
            category_id: category_id.into(),
            brand_id: None,
            rating: 0.0,
            review_count: 0,
            in_stock: true,
            stock_quantity: DEFAULT_STOCK_QUANTITY,
            tags: Vec::new(),
            images: Vec::new(),
        }
    }

    /// Set the brand.
    pub fn with_brand(mut self, brand_id: impl Into<BrandId>) -> Self {
        self.brand_id = Some(brand_id.into());
        self
    }

    /// Set the rating.
    pub fn with_rating(mut self, rating: f64) -> Self {
        self.rating = rating;
        self
    }

    /// Check ranges that deserialization alone does not enforce: a non-zero
    /// ID, non-negative prices, a discount of at most 100 and a rating
    /// between 0 and 5.
    pub fn validate(&self) -> Result<(), CommerceError> {
        let invalid = |reason: String| CommerceError::InvalidProduct {
            product_id: self.id,
            reason,
        };

        if self.id.get() == 0 {
            return Err(invalid("Id must be greater than 0".to_string()));
        }
        if self.price.is_negative() {
            return Err(invalid(format!("price {} is negative", self.price)));
        }
        if let Some(original) = self.original_price.filter(Money::is_negative) {
            return Err(invalid(format!("originalPrice {} is negative", original)));
        }
        if self.discount_percentage > 100 {
            return Err(invalid(format!(
                "discountPercentage {} is above 100",
                self.discount_percentage
            )));
        }
        if !(0.0..=MAX_RATING).contains(&self.rating) {
            return Err(invalid(format!("rating {} is outside 0-5", self.rating)));
        }
        Ok(())
    }

    /// Add tags.
    pub fn with_tags<I, S>(mut self, tags: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: Into<String>,
    {
        for tag in tags {
            self.add_tag(tag);
        }
        self
    }

    /// Set stock level and availability flag.
    pub fn with_stock(mut self, in_stock: bool, quantity: u32) -> Self {
        self.in_stock = in_stock;
        self.stock_quantity = quantity;
        self
    }

    /// Mark the product as discounted from `original_price`.
    pub fn with_discount(mut self, original_price: Money, percentage: u8) -> Self {
        self.original_price = Some(original_price);
        self.discount_percentage = percentage.min(100);
        self
    }

    /// Add a tag, ignoring duplicates.
    pub fn add_tag(&mut self, tag: impl Into<String>) {
        let tag = tag.into();
        if !self.tags.contains(&tag) {
            self.tags.push(tag);
        }
    }

    /// Whether the product carries the exact tag.
    pub fn has_tag(&self, tag: &str) -> bool {
        self.tags.iter().any(|t| t == tag)
    }

    /// Whether the product is discounted.
    pub fn is_on_sale(&self) -> bool {
        self.discount_percentage > 0
            || self
                .original_price
                .map(|original| original > self.price)
                .unwrap_or(false)
    }

    /// Amount saved against the original price.
    pub fn savings(&self) -> Money {
        match self.original_price {
            Some(original) if original > self.price => original - self.price,
            _ => Money::zero(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_product_creation() {
        let product = Product::new(1, "wireless-mouse", "Wireless Mouse", Money::new(2999), "electronics");
        assert_eq!(product.id, ProductId::new(1));
        assert!(product.in_stock);
        assert_eq!(product.stock_quantity, DEFAULT_STOCK_QUANTITY);
        assert!(!product.is_on_sale());
    }

    #[test]
    fn test_tags_deduplicate() {
        let product = Product::new(1, "p", "P", Money::new(100), "c").with_tags(["new", "deal", "new"]);
        assert_eq!(product.tags, vec!["new", "deal"]);
        assert!(product.has_tag(TAG_NEW));
        assert!(!product.has_tag("New"));
    }

    #[test]
    fn test_savings() {
        let product = Product::new(1, "p", "P", Money::new(7500), "c").with_discount(Money::new(10000), 25);
        assert!(product.is_on_sale());
        assert_eq!(product.savings().cents(), 2500);
    }

    #[test]
    fn test_fixture_shape_deserializes() {
        let json = r#"{
            "Id": 12,
            "slug": "trail-runner",
            "title": "Trail Runner Shoes",
            "price": 89.99,
            "originalPrice": 119.99,
            "discountPercentage": 25,
            "categoryId": "footwear",
            "brandId": "stride",
            "rating": 4.6,
            "reviewCount": 214,
            "inStock": true,
            "tags": ["bestseller", "deal"],
            "images": ["https://img.example/trail-1.jpg"]
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert_eq!(product.id, ProductId::new(12));
        assert_eq!(product.price.cents(), 8999);
        assert_eq!(product.brand_id, Some(BrandId::new("stride")));
        assert_eq!(product.stock_quantity, DEFAULT_STOCK_QUANTITY);
        assert_eq!(product.images, vec!["https://img.example/trail-1.jpg".to_string()]);
    }

    #[test]
    fn test_validate_accepts_builder_products() {
        let product = Product::new(1, "p", "P", Money::new(7500), "c")
            .with_discount(Money::new(10000), 25)
            .with_rating(5.0);
        assert_eq!(product.validate(), Ok(()));
    }

    #[test]
    fn test_validate_rejects_out_of_range_fixture() {
        let json = r#"{
            "Id": 0, "slug": "bad", "title": "Bad", "price": -5.0,
            "discountPercentage": 250, "rating": 9.5,
            "categoryId": "misc", "inStock": true
        }"#;
        let product: Product = serde_json::from_str(json).unwrap();
        assert!(matches!(
            product.validate(),
            Err(CommerceError::InvalidProduct { .. })
        ));

        let base = Product::new(3, "p", "P", Money::new(100), "c");
        let cases = [
            Product { price: Money::new(-1), ..base.clone() },
            Product { discount_percentage: 101, ..base.clone() },
            Product { rating: 5.1, ..base.clone() },
            Product { rating: -0.5, ..base.clone() },
            Product { rating: f64::NAN, ..base.clone() },
            Product { original_price: Some(Money::new(-100)), ..base.clone() },
        ];
        for product in cases {
            let err = product.validate().unwrap_err();
            assert_eq!(err.kind(), "invalid_product");
        }
    }
}
