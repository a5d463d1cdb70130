//! Fixture-backed catalog with simulated latency.

use crate::fixtures::CatalogFixtures;
use crate::latency::{Latency, ServiceCall};
use crate::source::{CatalogSource, HelpfulVote};
use crate::DataError;
use async_trait::async_trait;
use chrono::{DateTime, Utc};
use rand::rngs::StdRng;
use rand::seq::SliceRandom;
use rand::SeedableRng;
use std::collections::HashMap;
use std::path::Path;
use std::sync::Mutex;
use storefront_core::catalog::{
    merchandising, Brand, Category, DealTimer, HeroBanner, Product, RatingSummary, Review,
    ReviewFilter, ReviewSort,
};
use storefront_core::{BannerId, BrandId, CategoryId, DealTimerId, ProductId, ReviewId};
use tokio::sync::RwLock;

/// Number of products returned by [`CatalogSource::recommended`].
pub const RECOMMENDED_LIMIT: usize = 6;

/// In-memory catalog backed by [`CatalogFixtures`].
///
/// Every call sleeps for its simulated latency first, then answers from the
/// fixture data. Returned values are copies. Helpful votes are kept in memory
/// for the lifetime of the catalog.
pub struct MockCatalog {
    data: CatalogFixtures,
    latency: Latency,
    helpful_votes: RwLock<HashMap<ReviewId, u32>>,
    rng: Mutex<StdRng>,
}

impl MockCatalog {
    pub fn new(data: CatalogFixtures) -> Self {
        Self {
            data,
            latency: Latency::None,
            helpful_votes: RwLock::new(HashMap::new()),
            rng: Mutex::new(StdRng::from_entropy()),
        }
    }

    /// Catalog over the embedded fixtures.
    pub fn embedded() -> Result<Self, DataError> {
        Ok(Self::new(CatalogFixtures::embedded()?))
    }

    /// Catalog over a fixture directory, falling back to embedded files.
    pub async fn from_dir(dir: impl AsRef<Path>) -> Result<Self, DataError> {
        Ok(Self::new(CatalogFixtures::load_dir(dir).await?))
    }

    pub fn with_latency(mut self, latency: Latency) -> Self {
        self.latency = latency;
        self
    }

    /// Make recommendations reproducible.
    pub fn with_seed(mut self, seed: u64) -> Self {
        self.rng = Mutex::new(StdRng::seed_from_u64(seed));
        self
    }

    pub fn fixtures(&self) -> &CatalogFixtures {
        &self.data
    }

    async fn call(&self, call: ServiceCall) {
        self.latency.simulate(call).await;
    }

    fn find_product(&self, pred: impl Fn(&Product) -> bool) -> Option<Product> {
        self.data.products.iter().find(|p| pred(p)).cloned()
    }

    fn filter_products(&self, pred: impl Fn(&Product) -> bool) -> Vec<Product> {
        self.data.products.iter().filter(|p| pred(p)).cloned().collect()
    }

    /// Reviews with in-memory helpful votes applied.
    async fn reviews_with_votes(&self) -> Vec<Review> {
        let votes = self.helpful_votes.read().await;
        self.data
            .reviews
            .iter()
            .cloned()
            .map(|mut review| {
                if let Some(extra) = votes.get(&review.id) {
                    review.helpful_count = review.helpful_count.saturating_add(*extra);
                }
                review
            })
            .collect()
    }
}

#[async_trait]
impl CatalogSource for MockCatalog {
    async fn load_products(&self) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::AllProducts).await;
        Ok(self.data.products.clone())
    }

    async fn product_by_id(&self, id: ProductId) -> Result<Product, DataError> {
        self.call(ServiceCall::ProductLookup).await;
        self.find_product(|p| p.id == id)
            .ok_or_else(|| DataError::not_found("Product", format!("id {id}")))
    }

    async fn product_by_slug(&self, slug: &str) -> Result<Product, DataError> {
        self.call(ServiceCall::ProductLookup).await;
        self.find_product(|p| p.slug == slug)
            .ok_or_else(|| DataError::not_found("Product", format!("slug {slug}")))
    }

    async fn products_by_category(&self, category: &CategoryId) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::ProductsByCategory).await;
        Ok(self.filter_products(|p| &p.category_id == category))
    }

    async fn best_sellers(&self, category: Option<&CategoryId>) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::Merchandising).await;
        Ok(merchandising::best_sellers(&self.data.products, category))
    }

    async fn deals(&self) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::Merchandising).await;
        Ok(merchandising::deals(&self.data.products))
    }

    async fn new_arrivals(&self) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::Merchandising).await;
        Ok(merchandising::new_arrivals(&self.data.products))
    }

    async fn recommended(&self) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::Recommended).await;
        let mut products = self.data.products.clone();
        {
            let mut rng = self.rng.lock().unwrap_or_else(|poisoned| poisoned.into_inner());
            products.shuffle(&mut *rng);
        }
        products.truncate(RECOMMENDED_LIMIT);
        Ok(products)
    }

    async fn search(&self, term: &str) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::Search).await;
        Ok(merchandising::quick_search(&self.data.products, term))
    }

    async fn load_categories(&self) -> Result<Vec<Category>, DataError> {
        self.call(ServiceCall::AllCategories).await;
        Ok(self.data.categories.clone())
    }

    async fn featured_categories(&self) -> Result<Vec<Category>, DataError> {
        self.call(ServiceCall::FeaturedCategories).await;
        Ok(Category::featured(&self.data.categories))
    }

    async fn category_by_id(&self, id: u64) -> Result<Category, DataError> {
        self.call(ServiceCall::CategoryLookup).await;
        self.data
            .categories
            .iter()
            .find(|c| c.id == id)
            .cloned()
            .ok_or_else(|| DataError::not_found("Category", format!("id {id}")))
    }

    async fn category_by_slug(&self, slug: &str) -> Result<Category, DataError> {
        self.call(ServiceCall::CategoryLookup).await;
        self.data
            .categories
            .iter()
            .find(|c| c.slug.as_str() == slug)
            .cloned()
            .ok_or_else(|| DataError::not_found("Category", format!("slug {slug}")))
    }

    async fn load_brands(&self) -> Result<Vec<Brand>, DataError> {
        self.call(ServiceCall::AllBrands).await;
        Ok(self.data.brands.clone())
    }

    async fn featured_brands(&self) -> Result<Vec<Brand>, DataError> {
        self.call(ServiceCall::FeaturedBrands).await;
        Ok(self.data.brands.iter().filter(|b| b.featured).cloned().collect())
    }

    async fn brand_by_id(&self, id: u64) -> Result<Brand, DataError> {
        self.call(ServiceCall::BrandLookup).await;
        self.data
            .brands
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| DataError::not_found("Brand", format!("id {id}")))
    }

    async fn brand_by_slug(&self, slug: &str) -> Result<Brand, DataError> {
        self.call(ServiceCall::BrandLookup).await;
        self.data
            .brands
            .iter()
            .find(|b| b.slug.as_str() == slug)
            .cloned()
            .ok_or_else(|| DataError::not_found("Brand", format!("slug {slug}")))
    }

    async fn products_for_brand(&self, brand: &BrandId) -> Result<Vec<Product>, DataError> {
        self.call(ServiceCall::ProductsByCategory).await;
        Ok(self.filter_products(|p| p.brand_id.as_ref() == Some(brand)))
    }

    async fn reviews_for(
        &self,
        product: ProductId,
        filter: ReviewFilter,
        sort: ReviewSort,
    ) -> Result<Vec<Review>, DataError> {
        self.call(ServiceCall::Reviews).await;
        let reviews = self.reviews_with_votes().await;
        Ok(storefront_core::catalog::reviews_for(&reviews, product, filter, sort))
    }

    async fn rating_summary(&self, product: ProductId) -> Result<RatingSummary, DataError> {
        self.call(ServiceCall::RatingSummary).await;
        Ok(RatingSummary::for_product(&self.data.reviews, product))
    }

    async fn mark_helpful(&self, review: ReviewId) -> Result<HelpfulVote, DataError> {
        self.call(ServiceCall::MarkHelpful).await;
        let base = self
            .data
            .reviews
            .iter()
            .find(|r| r.id == review)
            .map(|r| r.helpful_count)
            .ok_or_else(|| DataError::not_found("Review", format!("id {review}")))?;

        let mut votes = self.helpful_votes.write().await;
        let extra = votes.entry(review).or_insert(0);
        *extra = extra.saturating_add(1);

        Ok(HelpfulVote {
            review_id: review,
            success: true,
            helpful_count: base.saturating_add(*extra),
        })
    }

    async fn deal_timers(&self) -> Result<Vec<DealTimer>, DataError> {
        self.call(ServiceCall::DealTimers).await;
        Ok(self.data.deal_timers.clone())
    }

    async fn active_deal_timers(&self, now: DateTime<Utc>) -> Result<Vec<DealTimer>, DataError> {
        self.call(ServiceCall::DealTimers).await;
        Ok(self
            .data
            .deal_timers
            .iter()
            .filter(|t| t.is_active(now))
            .cloned()
            .collect())
    }

    async fn deal_timer_by_id(&self, id: DealTimerId) -> Result<DealTimer, DataError> {
        self.call(ServiceCall::DealTimerLookup).await;
        self.data
            .deal_timers
            .iter()
            .find(|t| t.id == id)
            .cloned()
            .ok_or_else(|| DataError::not_found("Deal timer", format!("id {id}")))
    }

    async fn hero_banners(&self) -> Result<Vec<HeroBanner>, DataError> {
        self.call(ServiceCall::HeroBanners).await;
        let mut banners = self.data.hero_banners.clone();
        banners.sort_by_key(|b| b.order);
        Ok(banners)
    }

    async fn hero_banner_by_id(&self, id: BannerId) -> Result<HeroBanner, DataError> {
        self.call(ServiceCall::HeroBannerLookup).await;
        self.data
            .hero_banners
            .iter()
            .find(|b| b.id == id)
            .cloned()
            .ok_or_else(|| DataError::not_found("Hero banner", format!("id {id}")))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn catalog() -> MockCatalog {
        MockCatalog::embedded().unwrap()
    }

    #[tokio::test]
    async fn test_product_lookups() {
        let catalog = catalog();
        let by_slug = catalog.product_by_slug("cast-iron-skillet").await.unwrap();
        let by_id = catalog.product_by_id(by_slug.id).await.unwrap();
        assert_eq!(by_slug, by_id);

        let err = catalog.product_by_slug("nope").await.unwrap_err();
        assert!(err.is_not_found());
        assert_eq!(err.to_string(), "Product not found: slug nope");
    }

    #[tokio::test]
    async fn test_best_sellers_sorted_and_scoped() {
        let catalog = catalog();
        let overall = catalog.best_sellers(None).await.unwrap();
        assert!(overall.iter().all(|p| p.has_tag("bestseller")));
        assert!(overall.windows(2).all(|w| w[0].rating >= w[1].rating));
        assert_eq!(
            catalog.best_sellers(Some(&CategoryId::new("overall"))).await.unwrap(),
            overall
        );

        let electronics = CategoryId::new("electronics");
        let scoped = catalog.best_sellers(Some(&electronics)).await.unwrap();
        assert!(!scoped.is_empty());
        assert!(scoped.iter().all(|p| p.category_id == electronics));
    }

    #[tokio::test]
    async fn test_deals_by_discount() {
        let deals = catalog().deals().await.unwrap();
        assert!(deals.len() <= merchandising::DEALS_LIMIT);
        assert!(deals
            .windows(2)
            .all(|w| w[0].discount_percentage >= w[1].discount_percentage));
    }

    #[tokio::test]
    async fn test_recommended_is_seeded_sample() {
        let a = catalog().with_seed(7).recommended().await.unwrap();
        let b = catalog().with_seed(7).recommended().await.unwrap();
        assert_eq!(a.len(), RECOMMENDED_LIMIT);
        assert_eq!(a, b);
    }

    #[tokio::test]
    async fn test_search_matches_tag_substring() {
        let results = catalog().search("AUDI").await.unwrap();
        assert!(results.iter().any(|p| p.slug == "noise-cancelling-headphones"));
    }

    #[tokio::test]
    async fn test_mark_helpful_accumulates() {
        let catalog = catalog();
        let product = ProductId::new(1);
        let before = catalog
            .reviews_for(product, ReviewFilter::All, ReviewSort::Helpful)
            .await
            .unwrap();
        let last = before.last().unwrap().clone();

        let mut vote = catalog.mark_helpful(last.id).await.unwrap();
        for _ in 0..100 {
            vote = catalog.mark_helpful(last.id).await.unwrap();
        }
        assert!(vote.success);
        assert_eq!(vote.helpful_count, last.helpful_count + 101);

        let after = catalog
            .reviews_for(product, ReviewFilter::All, ReviewSort::Helpful)
            .await
            .unwrap();
        assert_eq!(after[0].id, last.id);

        assert!(catalog.mark_helpful(ReviewId::new(9999)).await.unwrap_err().is_not_found());
    }

    #[tokio::test]
    async fn test_active_deal_timers() {
        let catalog = catalog();
        let now = Utc.with_ymd_and_hms(2026, 1, 1, 0, 0, 0).unwrap();
        let all = catalog.deal_timers().await.unwrap();
        let active = catalog.active_deal_timers(now).await.unwrap();
        assert!(active.len() < all.len());
        assert!(active.iter().all(|t| t.end_date > now));
    }

    #[tokio::test]
    async fn test_banners_in_order() {
        let banners = catalog().hero_banners().await.unwrap();
        assert!(banners.windows(2).all(|w| w[0].order <= w[1].order));
    }

    #[tokio::test]
    async fn test_filter_options_loads_both() {
        let options = catalog().load_filter_options().await.unwrap();
        assert!(!options.categories.is_empty());
        assert!(!options.brands.is_empty());
    }

    #[tokio::test]
    async fn test_featured_categories_capped() {
        let featured = catalog().featured_categories().await.unwrap();
        assert!(featured.iter().all(|c| c.featured));
        assert!(featured.len() <= storefront_core::catalog::MAX_FEATURED_CATEGORIES);
    }
}
