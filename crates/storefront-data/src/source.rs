//! The catalog service seam.

use crate::DataError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use storefront_core::catalog::{
    Brand, Category, DealTimer, HeroBanner, Product, RatingSummary, Review, ReviewFilter,
    ReviewSort,
};
use storefront_core::{BannerId, BrandId, CategoryId, DealTimerId, ProductId, ReviewId};

/// Category and brand lists for the listing page's filter sidebar.
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct FilterOptions {
    pub categories: Vec<Category>,
    pub brands: Vec<Brand>,
}

/// Acknowledgement of a helpful vote.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct HelpfulVote {
    pub review_id: ReviewId,
    pub success: bool,
    /// Helpful count after the vote.
    pub helpful_count: u32,
}

/// Async access to catalog data.
///
/// Lookups by id or slug fail with [`DataError::NotFound`]; list operations
/// return an empty list when nothing matches.
#[async_trait]
pub trait CatalogSource: Send + Sync {
    // Products
    async fn load_products(&self) -> Result<Vec<Product>, DataError>;
    async fn product_by_id(&self, id: ProductId) -> Result<Product, DataError>;
    async fn product_by_slug(&self, slug: &str) -> Result<Product, DataError>;
    async fn products_by_category(&self, category: &CategoryId) -> Result<Vec<Product>, DataError>;
    /// Best sellers, optionally within one category ("overall" means all).
    async fn best_sellers(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, DataError>;
    async fn deals(&self) -> Result<Vec<Product>, DataError>;
    async fn new_arrivals(&self) -> Result<Vec<Product>, DataError>;
    async fn recommended(&self) -> Result<Vec<Product>, DataError>;
    async fn search(&self, term: &str) -> Result<Vec<Product>, DataError>;

    // Categories
    async fn load_categories(&self) -> Result<Vec<Category>, DataError>;
    async fn featured_categories(&self) -> Result<Vec<Category>, DataError>;
    async fn category_by_id(&self, id: u64) -> Result<Category, DataError>;
    async fn category_by_slug(&self, slug: &str) -> Result<Category, DataError>;

    // Brands
    async fn load_brands(&self) -> Result<Vec<Brand>, DataError>;
    async fn featured_brands(&self) -> Result<Vec<Brand>, DataError>;
    async fn brand_by_id(&self, id: u64) -> Result<Brand, DataError>;
    async fn brand_by_slug(&self, slug: &str) -> Result<Brand, DataError>;
    async fn products_for_brand(&self, brand: &BrandId) -> Result<Vec<Product>, DataError>;

    // Reviews
    async fn reviews_for(
        &self,
        product: ProductId,
        filter: ReviewFilter,
        sort: ReviewSort,
    ) -> Result<Vec<Review>, DataError>;
    async fn rating_summary(&self, product: ProductId) -> Result<RatingSummary, DataError>;
    async fn mark_helpful(&self, review: ReviewId) -> Result<HelpfulVote, DataError>;

    // Deal timers
    async fn deal_timers(&self) -> Result<Vec<DealTimer>, DataError>;
    async fn active_deal_timers(&self, now: DateTime<Utc>) -> Result<Vec<DealTimer>, DataError>;
    async fn deal_timer_by_id(&self, id: DealTimerId) -> Result<DealTimer, DataError>;

    // Hero banners
    /// Banners in display order.
    async fn hero_banners(&self) -> Result<Vec<HeroBanner>, DataError>;
    async fn hero_banner_by_id(&self, id: BannerId) -> Result<HeroBanner, DataError>;

    /// Categories and brands, fetched concurrently.
    async fn load_filter_options(&self) -> Result<FilterOptions, DataError> {
        let (categories, brands) =
            futures::try_join!(self.load_categories(), self.load_brands())?;
        Ok(FilterOptions { categories, brands })
    }
}
