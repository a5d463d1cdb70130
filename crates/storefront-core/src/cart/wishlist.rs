//! Wishlist: a set of product snapshots keyed by product ID.

use crate::catalog::Product;
use crate::ids::ProductId;
use serde::{Deserialize, Deserializer, Serialize};

/// What a toggle did.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum WishlistChange {
    Added,
    Removed,
}

/// Saved products, in the order they were added.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Wishlist {
    products: Vec<Product>,
}

impl<'de> Deserialize<'de> for Wishlist {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<Product>::deserialize(deserializer).map(Wishlist::from_products)
    }
}

impl Wishlist {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a wishlist from stored products, keeping the first entry per ID.
    pub fn from_products(products: Vec<Product>) -> Self {
        let mut unique: Vec<Product> = Vec::with_capacity(products.len());
        for product in products {
            if !unique.iter().any(|p| p.id == product.id) {
                unique.push(product);
            }
        }
        Self { products: unique }
    }

    pub fn products(&self) -> &[Product] {
        &self.products
    }

    pub fn len(&self) -> usize {
        self.products.len()
    }

    pub fn is_empty(&self) -> bool {
        self.products.is_empty()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.products.iter().any(|p| p.id == product_id)
    }

    /// Remove the product if present, otherwise append it.
    ///
    /// Toggling the same product twice restores the original wishlist.
    pub fn toggle(&self, product: &Product) -> (Self, WishlistChange) {
        if self.contains(product.id) {
            let products = self
                .products
                .iter()
                .filter(|p| p.id != product.id)
                .cloned()
                .collect();
            (Self { products }, WishlistChange::Removed)
        } else {
            let mut products = self.products.clone();
            products.push(product.clone());
            (Self { products }, WishlistChange::Added)
        }
    }
}
