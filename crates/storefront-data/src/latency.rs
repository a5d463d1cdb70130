//! Simulated service latency.

use serde::{Deserialize, Serialize};
use std::time::Duration;

/// Catalog service calls, each with its own typical response time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ServiceCall {
    AllProducts,
    ProductLookup,
    ProductsByCategory,
    Merchandising,
    Recommended,
    Search,
    AllCategories,
    FeaturedCategories,
    CategoryLookup,
    AllBrands,
    FeaturedBrands,
    BrandLookup,
    Reviews,
    RatingSummary,
    MarkHelpful,
    DealTimers,
    DealTimerLookup,
    HeroBanners,
    HeroBannerLookup,
}

impl ServiceCall {
    /// Typical latency of the call against the mock backend.
    pub fn typical_latency(&self) -> Duration {
        let ms = match self {
            Self::AllProducts | Self::Search | Self::Reviews => 400,
            Self::ProductsByCategory | Self::Recommended => 350,
            Self::Merchandising
            | Self::AllCategories
            | Self::AllBrands
            | Self::RatingSummary
            | Self::HeroBanners => 300,
            Self::FeaturedCategories | Self::FeaturedBrands => 250,
            Self::ProductLookup
            | Self::CategoryLookup
            | Self::BrandLookup
            | Self::MarkHelpful
            | Self::DealTimers
            | Self::HeroBannerLookup => 200,
            Self::DealTimerLookup => 150,
        };
        Duration::from_millis(ms)
    }

    pub fn name(&self) -> &'static str {
        match self {
            Self::AllProducts => "products.all",
            Self::ProductLookup => "products.lookup",
            Self::ProductsByCategory => "products.by_category",
            Self::Merchandising => "products.merchandising",
            Self::Recommended => "products.recommended",
            Self::Search => "products.search",
            Self::AllCategories => "categories.all",
            Self::FeaturedCategories => "categories.featured",
            Self::CategoryLookup => "categories.lookup",
            Self::AllBrands => "brands.all",
            Self::FeaturedBrands => "brands.featured",
            Self::BrandLookup => "brands.lookup",
            Self::Reviews => "reviews.list",
            Self::RatingSummary => "reviews.summary",
            Self::MarkHelpful => "reviews.helpful",
            Self::DealTimers => "deals.timers",
            Self::DealTimerLookup => "deals.lookup",
            Self::HeroBanners => "banners.all",
            Self::HeroBannerLookup => "banners.lookup",
        }
    }
}

/// How much latency the mock services add.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize, Default)]
#[serde(rename_all = "lowercase", tag = "mode", content = "value")]
pub enum Latency {
    /// No delay.
    #[default]
    None,
    /// Each call's typical latency.
    Realistic,
    /// Typical latency multiplied by a factor.
    Scaled(f64),
    /// Same delay for every call, in milliseconds.
    Fixed(u64),
}

impl Latency {
    pub fn delay_for(&self, call: ServiceCall) -> Duration {
        match *self {
            Latency::None => Duration::ZERO,
            Latency::Realistic => call.typical_latency(),
            Latency::Scaled(factor) if factor.is_finite() && factor > 0.0 => {
                call.typical_latency().mul_f64(factor)
            }
            Latency::Scaled(_) => Duration::ZERO,
            Latency::Fixed(ms) => Duration::from_millis(ms),
        }
    }

    /// Sleep for the call's delay.
    pub async fn simulate(&self, call: ServiceCall) {
        let delay = self.delay_for(call);
        tracing::trace!(call = call.name(), delay_ms = delay.as_millis() as u64, "simulated latency");
        if !delay.is_zero() {
            tokio::time::sleep(delay).await;
        }
    }
}
