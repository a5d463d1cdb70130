//! Shopping cart module.
//!
//! Cart and wishlist reconciliation plus cart pricing.

mod cart;
mod pricing;
mod wishlist;

pub use cart::{
    Cart, CartLineItem, CartUpdate, QuantityClamp, Variant, BADGE_LIMIT, MAX_QUANTITY_PER_LINE,
};
pub use pricing::{
    compute_totals, compute_totals_with, CartTotals, OrderSummary, PricingPolicy,
    DEFAULT_FLAT_SHIPPING, DEFAULT_FREE_SHIPPING_THRESHOLD, DEFAULT_TAX_RATE,
};
pub use wishlist::{Wishlist, WishlistChange};
