//! Commerce error types.

use crate::ids::ProductId;
use thiserror::Error;

/// Errors raised by the query engine and the cart reconciler.
///
/// Every operation is all-or-nothing: when one of these is returned the
/// caller's collection is unchanged.
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum CommerceError {
    /// Page or page size outside the accepted range.
    #[error("Invalid query: {0}")]
    InvalidQuery(String),

    /// Product is flagged as not in stock.
    #[error("Product {0} is out of stock")]
    OutOfStock(ProductId),

    /// Requested quantity exceeds the available stock.
    #[error("Insufficient stock for product {product_id}: requested {requested}, available {available}")]
    InsufficientStock {
        product_id: ProductId,
        requested: u32,
        available: u32,
    },

    /// Quantity must be at least one.
    #[error("Invalid quantity: {0}")]
    InvalidQuantity(u32),

    /// Checkout attempted with nothing in the cart.
    #[error("Cart is empty")]
    EmptyCart,

    /// A catalog record with a field outside its allowed range.
    #[error("Invalid product {product_id}: {reason}")]
    InvalidProduct {
        product_id: ProductId,
        reason: String,
    },
}

impl CommerceError {
    /// Short machine-readable kind, used in structured logs.
    pub fn kind(&self) -> &'static str {
        match self {
            CommerceError::InvalidQuery(_) => "invalid_query",
            CommerceError::OutOfStock(_) => "out_of_stock",
            CommerceError::InsufficientStock { .. } => "insufficient_stock",
            CommerceError::InvalidQuantity(_) => "invalid_quantity",
            CommerceError::EmptyCart => "empty_cart",
            CommerceError::InvalidProduct { .. } => "invalid_product",
        }
    }
}
