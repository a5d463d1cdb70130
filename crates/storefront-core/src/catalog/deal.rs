//! Deal timers, countdowns and deal ordering.

use crate::catalog::Product;
use crate::ids::DealTimerId;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

/// A time-limited promotion.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct DealTimer {
    #[serde(rename = "Id")]
    pub id: DealTimerId,
    pub title: String,
    #[serde(default)]
    pub description: Option<String>,
    pub end_date: DateTime<Utc>,
}

impl DealTimer {
    /// Whether the deal is still running at `now`.
    pub fn is_active(&self, now: DateTime<Utc>) -> bool {
        self.end_date > now
    }

    /// Time left until the deal ends.
    pub fn countdown(&self, now: DateTime<Utc>) -> Countdown {
        Countdown::until(self.end_date, now)
    }
}

/// Remaining time broken into display units.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Default)]
pub struct Countdown {
    pub days: i64,
    pub hours: i64,
    pub minutes: i64,
    pub seconds: i64,
    /// Remaining milliseconds, 0 once expired.
    pub total_ms: i64,
}

impl Countdown {
    /// Countdown from `now` to `target`; all zero when the target has passed.
    pub fn until(target: DateTime<Utc>, now: DateTime<Utc>) -> Self {
        let remaining = target.signed_duration_since(now);
        if remaining.num_milliseconds() <= 0 {
            return Self::default();
        }

        let total_seconds = remaining.num_seconds();
        Self {
            days: total_seconds / 86_400,
            hours: (total_seconds / 3_600) % 24,
            minutes: (total_seconds / 60) % 60,
            seconds: total_seconds % 60,
            total_ms: remaining.num_milliseconds(),
        }
    }

    pub fn is_expired(&self) -> bool {
        self.total_ms == 0
    }

    /// Format as `1d 02:03:04`.
    pub fn display(&self) -> String {
        format!(
            "{}d {:02}:{:02}:{:02}",
            self.days, self.hours, self.minutes, self.seconds
        )
    }
}

/// Ordering offered on the deals page.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize, Default)]
pub enum DealSort {
    /// Biggest discount first.
    #[default]
    Discount,
    PriceLow,
    PriceHigh,
    Rating,
}

impl DealSort {
    pub fn from_str(s: &str) -> Self {
        match s {
            "price-low" => Self::PriceLow,
            "price-high" => Self::PriceHigh,
            "rating" => Self::Rating,
            _ => Self::Discount,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Self::Discount => "discount",
            Self::PriceLow => "price-low",
            Self::PriceHigh => "price-high",
            Self::Rating => "rating",
        }
    }

    /// Stable in-place sort.
    pub fn apply(&self, products: &mut [Product]) {
        match self {
            Self::Discount => {
                products.sort_by(|a, b| b.discount_percentage.cmp(&a.discount_percentage))
            }
            Self::PriceLow => products.sort_by(|a, b| a.price.cmp(&b.price)),
            Self::PriceHigh => products.sort_by(|a, b| b.price.cmp(&a.price)),
            Self::Rating => products.sort_by(|a, b| b.rating.total_cmp(&a.rating)),
        }
    }
}
