//! Product reviews and rating summaries.

use crate::ids::{ProductId, ReviewId};
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::collections::BTreeMap;

/// A customer review.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct Review {
    #[serde(rename = "Id")]
    pub id: ReviewId,
    pub product_id: ProductId,
    /// Star rating, 1-5.
    pub rating: u8,
    #[serde(default)]
    pub title: Option<String>,
    #[serde(default)]
    pub comment: String,
    pub author: String,
    pub date: DateTime<Utc>,
    #[serde(default)]
    pub verified_purchase: bool,
    #[serde(default)]
    pub helpful_count: u32,
    #[serde(default)]
    pub images: Vec<String>,
}

/// Which reviews to show.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ReviewFilter {
    #[default]
    All,
    WithPhotos,
    Verified,
}

impl ReviewFilter {
    pub fn from_str(s: &str) -> Self {
        match s {
            "withPhotos" => Self::WithPhotos,
            "verified" => Self::Verified,
            _ => Self::All,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::All => "all",
            Self::WithPhotos => "withPhotos",
            Self::Verified => "verified",
        }
    }

    fn matches(&self, review: &Review) -> bool {
        match self {
            Self::All => true,
            Self::WithPhotos => !review.images.is_empty(),
            Self::Verified => review.verified_purchase,
        }
    }
}

/// Review ordering.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
#[serde(rename_all = "camelCase")]
pub enum ReviewSort {
    /// Most helpful votes first.
    #[default]
    Helpful,
    /// Newest first.
    Recent,
    HighestRating,
    LowestRating,
}

impl ReviewSort {
    pub fn from_str(s: &str) -> Self {
        match s {
            "recent" => Self::Recent,
            "highestRating" => Self::HighestRating,
            "lowestRating" => Self::LowestRating,
            _ => Self::Helpful,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Helpful => "helpful",
            Self::Recent => "recent",
            Self::HighestRating => "highestRating",
            Self::LowestRating => "lowestRating",
        }
    }

    fn apply(&self, reviews: &mut [Review]) {
        match self {
            Self::Helpful => reviews.sort_by(|a, b| b.helpful_count.cmp(&a.helpful_count)),
            Self::Recent => reviews.sort_by(|a, b| b.date.cmp(&a.date)),
            Self::HighestRating => reviews.sort_by(|a, b| b.rating.cmp(&a.rating)),
            Self::LowestRating => reviews.sort_by(|a, b| a.rating.cmp(&b.rating)),
        }
    }
}

/// Reviews for one product, filtered then sorted (stable).
pub fn reviews_for(
    reviews: &[Review],
    product_id: ProductId,
    filter: ReviewFilter,
    sort: ReviewSort,
) -> Vec<Review> {
    let mut selected: Vec<Review> = reviews
        .iter()
        .filter(|r| r.product_id == product_id && filter.matches(r))
        .cloned()
        .collect();
    sort.apply(&mut selected);
    selected
}

/// Aggregate rating for a product.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct RatingSummary {
    /// Mean rating rounded to one decimal place, 0 with no reviews.
    pub average_rating: f64,
    pub total_reviews: u32,
    /// Review count per star value, always holding keys 1 through 5.
    pub distribution: BTreeMap<u8, u32>,
}

impl RatingSummary {
    /// Summarize the reviews belonging to `product_id`.
    pub fn for_product(reviews: &[Review], product_id: ProductId) -> Self {
        let mut distribution: BTreeMap<u8, u32> = (1..=5).map(|star| (star, 0)).collect();
        let mut total_rating: u64 = 0;
        let mut total_reviews: u32 = 0;

        for review in reviews.iter().filter(|r| r.product_id == product_id) {
            *distribution.entry(review.rating).or_insert(0) += 1;
            total_rating += u64::from(review.rating);
            total_reviews += 1;
        }

        let average_rating = if total_reviews == 0 {
            0.0
        } else {
            let mean = total_rating as f64 / f64::from(total_reviews);
            (mean * 10.0).round() / 10.0
        };

        Self {
            average_rating,
            total_reviews,
            distribution,
        }
    }

    /// Share of reviews with the given star value, 0-100.
    pub fn percentage(&self, star: u8) -> f64 {
        if self.total_reviews == 0 {
            return 0.0;
        }
        let count = self.distribution.get(&star).copied().unwrap_or(0);
        f64::from(count) / f64::from(self.total_reviews) * 100.0
    }
}
