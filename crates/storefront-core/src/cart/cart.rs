//! Cart and line item types.
//!
//! Carts have value semantics: every mutation borrows the current cart and
//! returns a new one, leaving the input untouched. On error nothing changes.

use crate::cart::{compute_totals_with, OrderSummary, PricingPolicy};
use crate::catalog::Product;
use crate::error::CommerceError;
use crate::ids::ProductId;
use crate::money::Money;
use serde::{Deserialize, Deserializer, Serialize};
use std::collections::BTreeMap;

/// Maximum quantity allowed per line item.
pub const MAX_QUANTITY_PER_LINE: u32 = 10;

/// Item count above which the badge collapses to "99+".
pub const BADGE_LIMIT: u32 = 99;

/// Chosen option per variant axis, e.g. `{"size": "M", "color": "red"}`.
pub type Variant = BTreeMap<String, String>;

/// An empty selection means the same as no selection.
fn normalize_variant(variant: Option<Variant>) -> Option<Variant> {
    variant.filter(|v| !v.is_empty())
}

/// One cart entry: a product snapshot plus quantity and variant.
///
/// Serializes as the product's fields with `quantity` and
/// `selectedVariant` alongside.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct CartLineItem {
    #[serde(flatten)]
    pub product: Product,
    pub quantity: u32,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub selected_variant: Option<Variant>,
}

impl CartLineItem {
    fn new(product: Product, quantity: u32, selected_variant: Option<Variant>) -> Self {
        Self {
            product,
            quantity,
            selected_variant: normalize_variant(selected_variant),
        }
    }

    pub fn product_id(&self) -> ProductId {
        self.product.id
    }

    /// Unit price times quantity.
    pub fn line_total(&self) -> Money {
        self.product.price * i64::from(self.quantity)
    }

    /// Line identity: same product and equal variant selection.
    pub fn is_same_line(&self, product_id: ProductId, variant: Option<&Variant>) -> bool {
        self.product.id == product_id
            && normalize_variant(self.selected_variant.clone()).as_ref() == variant
    }
}

/// Record of a requested quantity that was capped at the per-line maximum.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct QuantityClamp {
    pub product_id: ProductId,
    /// Quantity the line would have had without the cap.
    pub requested: u32,
    /// Quantity actually stored.
    pub applied: u32,
}

impl std::fmt::Display for QuantityClamp {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(
            f,
            "Maximum {} per item: product {} limited to {} (requested {})",
            MAX_QUANTITY_PER_LINE, self.product_id, self.applied, self.requested
        )
    }
}

/// Outcome of a successful add-to-cart.
#[derive(Debug, Clone, PartialEq)]
pub struct CartUpdate {
    /// The new cart.
    pub cart: Cart,
    /// Set when the resulting quantity was capped.
    pub clamped: Option<QuantityClamp>,
}

/// A shopping cart: an ordered list of line items.
///
/// Stored carts go through [`Cart::from_items`] when deserialized, so a
/// loaded cart holds the same invariants as one built by `add_to_cart`.
#[derive(Debug, Clone, Default, Serialize, PartialEq)]
#[serde(transparent)]
pub struct Cart {
    items: Vec<CartLineItem>,
}

impl<'de> Deserialize<'de> for Cart {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        Vec::<CartLineItem>::deserialize(deserializer).map(Cart::from_items)
    }
}

impl Cart {
    /// Create an empty cart.
    pub fn new() -> Self {
        Self::default()
    }

    /// Build a cart from stored lines.
    ///
    /// Lines with quantity 0 are dropped, lines sharing product and variant
    /// are merged, and every quantity is capped at
    /// [`MAX_QUANTITY_PER_LINE`]. Order of first appearance is kept.
    pub fn from_items(items: Vec<CartLineItem>) -> Self {
        let mut merged: Vec<CartLineItem> = Vec::with_capacity(items.len());
        for line in items {
            if line.quantity == 0 {
                continue;
            }
            let line = CartLineItem::new(line.product, line.quantity, line.selected_variant);
            match merged
                .iter_mut()
                .find(|m| m.is_same_line(line.product.id, line.selected_variant.as_ref()))
            {
                Some(existing) => {
                    existing.quantity = existing
                        .quantity
                        .saturating_add(line.quantity)
                        .min(MAX_QUANTITY_PER_LINE);
                }
                None => merged.push(CartLineItem {
                    quantity: line.quantity.min(MAX_QUANTITY_PER_LINE),
                    ..line
                }),
            }
        }
        Self { items: merged }
    }

    pub fn items(&self) -> &[CartLineItem] {
        &self.items
    }

    pub fn iter(&self) -> std::slice::Iter<'_, CartLineItem> {
        self.items.iter()
    }

    pub fn into_items(self) -> Vec<CartLineItem> {
        self.items
    }

    /// Add `quantity` units of `product` with an optional variant.
    ///
    /// Returns an error if:
    /// - quantity is zero
    /// - the product is not in stock
    /// - quantity exceeds the product's stock level
    ///
    /// Lines merge when product and variant match. The merged quantity is
    /// capped at [`MAX_QUANTITY_PER_LINE`]; the cap is reported on the
    /// returned update rather than as an error.
    pub fn add_to_cart(
        &self,
        product: &Product,
        quantity: u32,
        variant: Option<Variant>,
    ) -> Result<CartUpdate, CommerceError> {
        if quantity == 0 {
            return Err(CommerceError::InvalidQuantity(quantity));
        }
        if !product.in_stock {
            return Err(CommerceError::OutOfStock(product.id));
        }
        if quantity > product.stock_quantity {
            return Err(CommerceError::InsufficientStock {
                product_id: product.id,
                requested: quantity,
                available: product.stock_quantity,
            });
        }

        let variant = normalize_variant(variant);
        let mut items = self.items.clone();

        let requested = match items
            .iter_mut()
            .find(|line| line.is_same_line(product.id, variant.as_ref()))
        {
            Some(line) => {
                let requested = line.quantity.saturating_add(quantity);
                line.quantity = requested.min(MAX_QUANTITY_PER_LINE);
                requested
            }
            None => {
                items.push(CartLineItem::new(
                    product.clone(),
                    quantity.min(MAX_QUANTITY_PER_LINE),
                    variant,
                ));
                quantity
            }
        };

        let clamped = (requested > MAX_QUANTITY_PER_LINE).then(|| QuantityClamp {
            product_id: product.id,
            requested,
            applied: MAX_QUANTITY_PER_LINE,
        });
        if let Some(clamp) = &clamped {
            tracing::warn!(
                product_id = %clamp.product_id,
                requested = clamp.requested,
                applied = clamp.applied,
                "cart quantity clamped"
            );
        }

        Ok(CartUpdate {
            cart: Self { items },
            clamped,
        })
    }

    /// Set the quantity of every line for `product_id`, ignoring variants.
    ///
    /// Quantities below 1 leave the cart unchanged; larger ones are capped
    /// at [`MAX_QUANTITY_PER_LINE`].
    pub fn update_quantity(&self, product_id: ProductId, quantity: u32) -> Self {
        if quantity < 1 {
            return self.clone();
        }
        let quantity = quantity.min(MAX_QUANTITY_PER_LINE);

        let items = self
            .items
            .iter()
            .cloned()
            .map(|mut line| {
                if line.product.id == product_id {
                    line.quantity = quantity;
                }
                line
            })
            .collect();
        Self { items }
    }

    /// Remove every line for `product_id`, ignoring variants.
    pub fn remove_item(&self, product_id: ProductId) -> Self {
        let items = self
            .items
            .iter()
            .filter(|line| line.product.id != product_id)
            .cloned()
            .collect();
        Self { items }
    }

    /// An empty cart.
    pub fn clear(&self) -> Self {
        Self::new()
    }

    /// Total units (sum of quantities).
    pub fn item_count(&self) -> u32 {
        self.items
            .iter()
            .fold(0u32, |acc, line| acc.saturating_add(line.quantity))
    }

    /// Number of distinct lines.
    pub fn unique_item_count(&self) -> usize {
        self.items.len()
    }

    /// Header badge text, `None` for an empty cart.
    pub fn badge(&self) -> Option<String> {
        match self.item_count() {
            0 => None,
            n if n > BADGE_LIMIT => Some(format!("{}+", BADGE_LIMIT)),
            n => Some(n.to_string()),
        }
    }

    pub fn is_empty(&self) -> bool {
        self.items.is_empty()
    }

    pub fn contains(&self, product_id: ProductId) -> bool {
        self.items.iter().any(|line| line.product.id == product_id)
    }

    /// Summarize the cart for checkout.
    ///
    /// The cart itself is not cleared; callers replace the stored cart once
    /// the order is accepted.
    pub fn checkout(&self, policy: &PricingPolicy) -> Result<OrderSummary, CommerceError> {
        if self.is_empty() {
            return Err(CommerceError::EmptyCart);
        }

        Ok(OrderSummary {
            items: self.items.clone(),
            item_count: self.item_count(),
            totals: compute_totals_with(self, policy),
        })
    }
}

impl<'a> IntoIterator for &'a Cart {
    type Item = &'a CartLineItem;
    type IntoIter = std::slice::Iter<'a, CartLineItem>;

    fn into_iter(self) -> Self::IntoIter {
        self.items.iter()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn product(id: u64) -> Product {
        Product::new(id, format!("p-{id}"), format!("Product {id}"), Money::new(1999), "misc")
    }

    fn variant(pairs: &[(&str, &str)]) -> Option<Variant> {
        Some(
            pairs
                .iter()
                .map(|(k, v)| (k.to_string(), v.to_string()))
                .collect(),
        )
    }

    #[test]
    fn test_add_new_line() {
        let cart = Cart::new();
        let update = cart.add_to_cart(&product(1), 2, None).unwrap();
        assert!(cart.is_empty());
        assert_eq!(update.cart.unique_item_count(), 1);
        assert_eq!(update.cart.items()[0].quantity, 2);
        assert!(update.clamped.is_none());
    }

    #[test]
    fn test_add_merges_same_line() {
        let p = product(1);
        let cart = Cart::new().add_to_cart(&p, 3, None).unwrap().cart;
        let cart = cart.add_to_cart(&p, 4, None).unwrap().cart;
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.item_count(), 7);
    }

    #[test]
    fn test_merge_is_clamped_and_reported() {
        let p = product(1);
        let cart = Cart::new().add_to_cart(&p, 8, None).unwrap().cart;
        let update = cart.add_to_cart(&p, 5, None).unwrap();
        assert_eq!(update.cart.items()[0].quantity, MAX_QUANTITY_PER_LINE);
        let clamp = update.clamped.unwrap();
        assert_eq!(clamp.requested, 13);
        assert_eq!(clamp.applied, 10);
    }

    #[test]
    fn test_new_line_above_limit_is_clamped() {
        let p = product(1).with_stock(true, 50);
        let update = Cart::new().add_to_cart(&p, 25, None).unwrap();
        assert_eq!(update.cart.items()[0].quantity, 10);
        assert_eq!(update.clamped.map(|c| c.requested), Some(25));
    }

    #[test]
    fn test_variants_make_distinct_lines() {
        let p = product(1);
        let cart = Cart::new()
            .add_to_cart(&p, 1, variant(&[("size", "M")]))
            .unwrap()
            .cart
            .add_to_cart(&p, 1, variant(&[("size", "L")]))
            .unwrap()
            .cart;
        assert_eq!(cart.unique_item_count(), 2);
    }

    #[test]
    fn test_empty_variant_equals_none() {
        let p = product(1);
        let cart = Cart::new()
            .add_to_cart(&p, 1, Some(Variant::new()))
            .unwrap()
            .cart
            .add_to_cart(&p, 1, None)
            .unwrap()
            .cart;
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items()[0].selected_variant, None);
    }

    #[test]
    fn test_add_errors_leave_cart_unchanged() {
        let cart = Cart::new().add_to_cart(&product(1), 1, None).unwrap().cart;
        let before = cart.clone();

        assert_eq!(
            cart.add_to_cart(&product(2), 0, None),
            Err(CommerceError::InvalidQuantity(0))
        );
        assert_eq!(
            cart.add_to_cart(&product(2).with_stock(false, 5), 1, None),
            Err(CommerceError::OutOfStock(ProductId::new(2)))
        );
        assert_eq!(
            cart.add_to_cart(&product(2).with_stock(true, 3), 4, None),
            Err(CommerceError::InsufficientStock {
                product_id: ProductId::new(2),
                requested: 4,
                available: 3,
            })
        );
        assert_eq!(cart, before);
    }

    #[test]
    fn test_update_quantity_matches_id_only() {
        let p = product(1);
        let cart = Cart::new()
            .add_to_cart(&p, 1, variant(&[("color", "red")]))
            .unwrap()
            .cart
            .add_to_cart(&p, 2, variant(&[("color", "blue")]))
            .unwrap()
            .cart
            .add_to_cart(&product(2), 1, None)
            .unwrap()
            .cart;

        let updated = cart.update_quantity(ProductId::new(1), 4);
        assert_eq!(
            updated.iter().map(|l| l.quantity).collect::<Vec<_>>(),
            vec![4, 4, 1]
        );
        assert_eq!(updated.update_quantity(ProductId::new(2), 40).items()[2].quantity, 10);
    }

    #[test]
    fn test_update_quantity_below_one_is_noop() {
        let cart = Cart::new().add_to_cart(&product(1), 3, None).unwrap().cart;
        assert_eq!(cart.update_quantity(ProductId::new(1), 0), cart);
    }

    #[test]
    fn test_remove_item_removes_all_variants() {
        let p = product(1);
        let cart = Cart::new()
            .add_to_cart(&p, 1, variant(&[("size", "S")]))
            .unwrap()
            .cart
            .add_to_cart(&p, 1, variant(&[("size", "XL")]))
            .unwrap()
            .cart
            .add_to_cart(&product(2), 1, None)
            .unwrap()
            .cart;

        let cart = cart.remove_item(ProductId::new(1));
        assert_eq!(cart.unique_item_count(), 1);
        assert!(!cart.contains(ProductId::new(1)));
        assert!(cart.clear().is_empty());
    }

    #[test]
    fn test_badge() {
        assert_eq!(Cart::new().badge(), None);

        let mut cart = Cart::new();
        for id in 1..=11 {
            cart = cart.add_to_cart(&product(id), 10, None).unwrap().cart;
        }
        assert_eq!(cart.item_count(), 110);
        assert_eq!(cart.badge().as_deref(), Some("99+"));
        assert_eq!(cart.remove_item(ProductId::new(1)).badge().as_deref(), Some("99+"));
        assert_eq!(
            cart.update_quantity(ProductId::new(1), 1).remove_item(ProductId::new(2)).badge().as_deref(),
            Some("91")
        );
    }

    #[test]
    fn test_checkout() {
        assert_eq!(
            Cart::new().checkout(&PricingPolicy::default()),
            Err(CommerceError::EmptyCart)
        );

        let cart = Cart::new().add_to_cart(&product(1), 3, None).unwrap().cart;
        let order = cart.checkout(&PricingPolicy::default()).unwrap();
        assert_eq!(order.item_count, 3);
        assert_eq!(order.totals.subtotal, Money::new(5997));
        assert_eq!(order.totals.shipping, Money::zero());
    }

    #[test]
    fn test_line_serializes_flat() {
        let cart = Cart::new()
            .add_to_cart(&product(7), 2, variant(&[("size", "M")]))
            .unwrap()
            .cart;
        let json = serde_json::to_value(&cart).unwrap();
        assert_eq!(json[0]["Id"], 7);
        assert_eq!(json[0]["quantity"], 2);
        assert_eq!(json[0]["selectedVariant"]["size"], "M");

        let back: Cart = serde_json::from_value(json).unwrap();
        assert_eq!(back, cart);
    }

    fn stored_line(id: u64, quantity: u32, size: Option<&str>) -> serde_json::Value {
        let mut line = serde_json::to_value(product(id)).unwrap();
        line["quantity"] = serde_json::json!(quantity);
        if let Some(size) = size {
            line["selectedVariant"] = serde_json::json!({ "size": size });
        }
        line
    }

    #[test]
    fn test_loading_corrupt_cart_restores_invariants() {
        let stored = serde_json::json!([
            stored_line(1, 0, None),
            stored_line(1, 25, None),
            stored_line(2, 4, Some("M")),
            stored_line(2, 9, Some("M")),
            stored_line(2, 1, Some("L")),
        ]);
        let cart: Cart = serde_json::from_value(stored).unwrap();

        let lines: Vec<(u64, u32)> = cart
            .iter()
            .map(|line| (line.product_id().get(), line.quantity))
            .collect();
        assert_eq!(lines, vec![(1, 10), (2, 10), (2, 1)]);

        let next = cart.add_to_cart(&product(1), 1, None).unwrap();
        assert_eq!(next.cart.items()[0].quantity, 10);
        assert!(next.clamped.is_some());
    }

    #[test]
    fn test_from_items_treats_empty_variant_as_none() {
        let line = |variant: Option<Variant>| CartLineItem {
            product: product(3),
            quantity: 2,
            selected_variant: variant,
        };
        let cart = Cart::from_items(vec![line(Some(Variant::new())), line(None)]);
        assert_eq!(cart.unique_item_count(), 1);
        assert_eq!(cart.items()[0].quantity, 4);
        assert!(cart.items()[0].selected_variant.is_none());
    }
}
