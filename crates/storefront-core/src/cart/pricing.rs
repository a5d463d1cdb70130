//! Cart pricing calculations.

use crate::cart::{Cart, CartLineItem};
use crate::money::Money;
use serde::{Deserialize, Serialize};

/// Default sales tax rate (8%).
pub const DEFAULT_TAX_RATE: f64 = 0.08;
/// Subtotal at or above which shipping is free ($50.00).
pub const DEFAULT_FREE_SHIPPING_THRESHOLD: Money = Money::new(5000);
/// Flat shipping charged below the threshold ($9.99).
pub const DEFAULT_FLAT_SHIPPING: Money = Money::new(999);

fn default_tax_rate() -> f64 {
    DEFAULT_TAX_RATE
}

fn default_free_shipping_threshold() -> Money {
    DEFAULT_FREE_SHIPPING_THRESHOLD
}

fn default_flat_shipping() -> Money {
    DEFAULT_FLAT_SHIPPING
}

/// Tax and shipping rates applied when totalling a cart.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub struct PricingPolicy {
    /// Fraction of the subtotal charged as tax.
    #[serde(default = "default_tax_rate")]
    pub tax_rate: f64,
    /// Subtotal that qualifies for free shipping.
    #[serde(default = "default_free_shipping_threshold")]
    pub free_shipping_threshold: Money,
    /// Shipping charged below the threshold, including on an empty cart.
    #[serde(default = "default_flat_shipping")]
    pub flat_shipping: Money,
}

impl Default for PricingPolicy {
    fn default() -> Self {
        Self {
            tax_rate: DEFAULT_TAX_RATE,
            free_shipping_threshold: DEFAULT_FREE_SHIPPING_THRESHOLD,
            flat_shipping: DEFAULT_FLAT_SHIPPING,
        }
    }
}

impl PricingPolicy {
    /// Shipping owed for a given subtotal.
    pub fn shipping_for(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_shipping_threshold {
            Money::zero()
        } else {
            self.flat_shipping
        }
    }

    /// Amount still needed to reach free shipping, zero once qualified.
    pub fn remaining_for_free_shipping(&self, subtotal: Money) -> Money {
        if subtotal >= self.free_shipping_threshold {
            Money::zero()
        } else {
            self.free_shipping_threshold - subtotal
        }
    }
}

/// Pricing breakdown for a cart.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "camelCase")]
pub struct CartTotals {
    /// Sum of price times quantity over all lines.
    pub subtotal: Money,
    /// Tax on the subtotal, rounded to the cent.
    pub tax: Money,
    /// Shipping charge.
    pub shipping: Money,
    /// subtotal + tax + shipping.
    pub total: Money,
}

/// Totals under the default policy.
pub fn compute_totals(cart: &Cart) -> CartTotals {
    compute_totals_with(cart, &PricingPolicy::default())
}

/// Totals under an explicit policy.
///
/// Money arithmetic saturates, so this never fails.
pub fn compute_totals_with(cart: &Cart, policy: &PricingPolicy) -> CartTotals {
    let subtotal: Money = cart.iter().map(CartLineItem::line_total).sum();
    let tax = subtotal.multiply_rate(policy.tax_rate);
    let shipping = policy.shipping_for(subtotal);

    CartTotals {
        subtotal,
        tax,
        shipping,
        total: subtotal + tax + shipping,
    }
}

/// Result of checking out a non-empty cart.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
#[serde(rename_all = "camelCase")]
pub struct OrderSummary {
    /// Lines as they were at checkout.
    pub items: Vec<CartLineItem>,
    /// Sum of quantities.
    pub item_count: u32,
    /// Totals at checkout.
    #[serde(flatten)]
    pub totals: CartTotals,
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::catalog::Product;

    fn cart_with(price_cents: i64, quantity: u32) -> Cart {
        let product = Product::new(1, "p", "P", Money::new(price_cents), "misc");
        Cart::new()
            .add_to_cart(&product, quantity, None)
            .map(|update| update.cart)
            .unwrap()
    }

    #[test]
    fn test_free_shipping_at_threshold() {
        let totals = compute_totals(&cart_with(2500, 2));
        assert_eq!(totals.subtotal, Money::new(5000));
        assert_eq!(totals.shipping, Money::zero());
        assert_eq!(totals.tax, Money::new(400));
        assert_eq!(totals.total, Money::new(5400));
    }

    #[test]
    fn test_flat_shipping_just_below_threshold() {
        let totals = compute_totals(&cart_with(4999, 1));
        assert_eq!(totals.shipping, Money::new(999));
        // 49.99 * 0.08 = 3.9992
        assert_eq!(totals.tax, Money::new(400));
        assert_eq!(totals.total, Money::new(4999 + 400 + 999));
    }

    #[test]
    fn test_empty_cart_still_charged_shipping() {
        let totals = compute_totals(&Cart::new());
        assert_eq!(totals.subtotal, Money::zero());
        assert_eq!(totals.tax, Money::zero());
        assert_eq!(totals.shipping, Money::new(999));
        assert_eq!(totals.total, Money::new(999));
    }

    #[test]
    fn test_custom_policy() {
        let policy = PricingPolicy {
            tax_rate: 0.1,
            free_shipping_threshold: Money::new(10_000),
            flat_shipping: Money::new(500),
        };
        let totals = compute_totals_with(&cart_with(2000, 3), &policy);
        assert_eq!(totals.tax, Money::new(600));
        assert_eq!(totals.shipping, Money::new(500));
        assert_eq!(policy.remaining_for_free_shipping(totals.subtotal), Money::new(4000));
    }

    #[test]
    fn test_policy_defaults_from_partial_config() {
        let policy: PricingPolicy = serde_json::from_str(r#"{"tax_rate": 0.05}"#).unwrap();
        assert_eq!(policy.tax_rate, 0.05);
        assert_eq!(policy.flat_shipping, DEFAULT_FLAT_SHIPPING);
        assert_eq!(policy.free_shipping_threshold, DEFAULT_FREE_SHIPPING_THRESHOLD);
    }
}
