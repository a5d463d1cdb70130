//! Product catalog module.
//!
//! Contains types for products, categories, brands, reviews and deals.

mod brand;
mod category;
mod deal;
pub mod merchandising;
mod product;
mod review;

pub use brand::Brand;
pub use category::{Category, HeroBanner, MAX_FEATURED_CATEGORIES};
pub use deal::{Countdown, DealSort, DealTimer};
pub use product::{Product, DEFAULT_STOCK_QUANTITY, TAG_BESTSELLER, TAG_DEAL, TAG_NEW};
pub use review::{reviews_for, RatingSummary, Review, ReviewFilter, ReviewSort};
