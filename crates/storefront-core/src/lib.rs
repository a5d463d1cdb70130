//! Storefront domain types and logic.
//!
//! This crate holds the pure core of the storefront:
//!
//! - **Catalog**: Products, categories, brands, reviews, deal timers
//! - **Search**: Query specification, staged filter/sort pipeline, pagination
//! - **Cart**: Cart and wishlist reconciliation, pricing, checkout summary
//!
//! Nothing here performs I/O. Callers load products and stored collections
//! first, then call into the core and persist whatever comes back.
//!
//! # Example
//!
//! ```rust
//! use storefront_core::prelude::*;
//!
//! let products = vec![
//!     Product::new(1, "desk-lamp", "Desk Lamp", Money::new(2999), "office"),
//!     Product::new(2, "wall-clock", "Wall Clock", Money::new(1999), "home")
//!         .with_tags(["new"]),
//! ];
//!
//! let result = query(&products, &QuerySpec::new().with_category("office")).unwrap();
//! assert_eq!(result.total(), 1);
//!
//! let cart = Cart::new().add_to_cart(&products[0], 2, None).unwrap().cart;
//! let totals = compute_totals(&cart);
//! assert_eq!(totals.subtotal.display(), "$59.98");
//! ```

pub mod error;
pub mod ids;
pub mod money;

pub mod cart;
pub mod catalog;
pub mod search;

pub use error::CommerceError;
pub use ids::*;
pub use money::Money;

/// Prelude for convenient imports.
pub mod prelude {
    pub use crate::error::CommerceError;
    pub use crate::ids::*;
    pub use crate::money::Money;

    // Catalog
    pub use crate::catalog::{
        Brand, Category, Countdown, DealSort, DealTimer, HeroBanner, Product, RatingSummary,
        Review, ReviewFilter, ReviewSort,
    };

    // Cart
    pub use crate::cart::{
        compute_totals, compute_totals_with, Cart, CartLineItem, CartTotals, CartUpdate,
        OrderSummary, PricingPolicy, Variant, Wishlist, WishlistChange,
    };

    // Search
    pub use crate::search::{
        query, CatalogParams, Filter, PageLink, Pagination, QueryResult, QuerySpec, SortOption,
    };
}
