//! Cart and wishlist reconciliation across sequences of edits.

use std::collections::BTreeMap;

use storefront_core::cart::MAX_QUANTITY_PER_LINE;
use storefront_core::prelude::*;

fn product(id: u64, cents: i64, stock: u32) -> Product {
    Product::new(id, format!("p-{id}"), format!("Product {id}"), Money::new(cents), "misc")
        .with_stock(true, stock)
}

fn variant(pairs: &[(&str, &str)]) -> Variant {
    pairs
        .iter()
        .map(|(k, v)| (k.to_string(), v.to_string()))
        .collect::<BTreeMap<_, _>>()
}

fn add(cart: &Cart, product: &Product, quantity: u32, variant: Option<Variant>) -> Cart {
    cart.add_to_cart(product, quantity, variant).unwrap().cart
}

#[test]
fn test_repeated_adds_merge_up_to_the_cap() {
    let shirt = product(1, 1500, 50);
    for (first, second) in [(1, 1), (3, 7), (4, 9), (9, 9), (10, 1)] {
        let cart = add(&Cart::new(), &shirt, first, None);
        let update = cart.add_to_cart(&shirt, second, None).unwrap();

        assert_eq!(update.cart.unique_item_count(), 1);
        let expected = (first + second).min(MAX_QUANTITY_PER_LINE);
        assert_eq!(update.cart.items()[0].quantity, expected);
        assert_eq!(update.clamped.is_some(), first + second > MAX_QUANTITY_PER_LINE);
    }
}

#[test]
fn test_variants_make_distinct_lines() {
    let shirt = product(1, 1500, 50);
    let medium = variant(&[("size", "M")]);
    let large = variant(&[("size", "L")]);

    let cart = add(&Cart::new(), &shirt, 1, Some(medium.clone()));
    let cart = add(&cart, &shirt, 2, Some(large));
    let cart = add(&cart, &shirt, 1, None);
    let cart = add(&cart, &shirt, 3, Some(medium));

    let quantities: Vec<u32> = cart.iter().map(|line| line.quantity).collect();
    assert_eq!(quantities, vec![4, 2, 1]);
    assert_eq!(cart.item_count(), 7);
}

#[test]
fn test_variant_key_order_does_not_matter() {
    let shirt = product(1, 1500, 50);
    let a = variant(&[("size", "M"), ("color", "Blue")]);
    let b = variant(&[("color", "Blue"), ("size", "M")]);

    let cart = add(&Cart::new(), &shirt, 1, Some(a));
    let cart = add(&cart, &shirt, 1, Some(b));
    assert_eq!(cart.unique_item_count(), 1);
    assert_eq!(cart.items()[0].quantity, 2);
}

#[test]
fn test_update_and_remove_ignore_variants() {
    let shirt = product(1, 1500, 50);
    let mug = product(2, 800, 50);
    let cart = add(&Cart::new(), &shirt, 1, Some(variant(&[("size", "M")])));
    let cart = add(&cart, &shirt, 1, Some(variant(&[("size", "L")])));
    let cart = add(&cart, &mug, 2, None);

    let updated = cart.update_quantity(shirt.id, 4);
    let quantities: Vec<u32> = updated.iter().map(|line| line.quantity).collect();
    assert_eq!(quantities, vec![4, 4, 2]);

    let removed = updated.remove_item(shirt.id);
    assert_eq!(removed.unique_item_count(), 1);
    assert!(removed.contains(mug.id));
}

#[test]
fn test_quantity_stays_in_bounds_under_any_edit() {
    let item = product(3, 250, 100);
    let mut cart = Cart::new();
    for step in 0..40u32 {
        cart = match step % 4 {
            0 => add(&cart, &item, (step % 9) + 1, None),
            1 => cart.update_quantity(item.id, step),
            2 => cart.update_quantity(item.id, 0),
            _ => add(&cart, &item, 10, None),
        };
        for line in &cart {
            assert!((1..=MAX_QUANTITY_PER_LINE).contains(&line.quantity));
        }
    }
}

#[test]
fn test_edits_never_touch_the_original() {
    let item = product(4, 1000, 20);
    let original = add(&Cart::new(), &item, 2, None);
    let snapshot = original.clone();

    let _ = add(&original, &item, 3, None);
    let _ = original.update_quantity(item.id, 9);
    let _ = original.remove_item(item.id);
    let _ = original.clear();

    assert_eq!(original, snapshot);
}

#[test]
fn test_shipping_threshold_boundary() {
    let at_threshold = add(&Cart::new(), &product(1, 2500, 10), 2, None);
    let just_below = add(&Cart::new(), &product(2, 4999, 10), 1, None);

    let free = compute_totals(&at_threshold);
    assert_eq!(free.subtotal, Money::new(5000));
    assert_eq!(free.tax, Money::new(400));
    assert!(free.shipping.is_zero());
    assert_eq!(free.total, Money::new(5400));

    let charged = compute_totals(&just_below);
    assert_eq!(charged.shipping, Money::new(999));
    assert_eq!(charged.tax, Money::new(400));
    assert_eq!(charged.total, Money::new(4999 + 400 + 999));
}

#[test]
fn test_totals_add_up() {
    let cart = add(&Cart::new(), &product(1, 1999, 10), 3, None);
    let cart = add(&cart, &product(2, 349, 10), 2, None);
    let totals = compute_totals(&cart);
    assert_eq!(totals.subtotal, Money::new(1999 * 3 + 349 * 2));
    assert_eq!(totals.total, totals.subtotal + totals.tax + totals.shipping);
}

#[test]
fn test_wishlist_toggle_twice_is_identity() {
    let lamp = product(8, 4500, 0);
    let desk = product(9, 19900, 2);
    let start = Wishlist::new().toggle(&desk).0;

    let (added, change) = start.toggle(&lamp);
    assert_eq!(change, WishlistChange::Added);
    assert!(added.contains(lamp.id));

    let (back, change) = added.toggle(&lamp);
    assert_eq!(change, WishlistChange::Removed);
    assert_eq!(back, start);
}

#[test]
fn test_stock_checks_scenario() {
    let item = Product::new(5, "five", "Five", Money::new(999), "misc").with_stock(true, 3);

    let cart = Cart::new().add_to_cart(&item, 2, None).unwrap().cart;
    assert_eq!(cart.unique_item_count(), 1);
    assert_eq!(cart.items()[0].quantity, 2);

    let err = cart.add_to_cart(&item, 5, None).unwrap_err();
    assert!(matches!(
        err,
        CommerceError::InsufficientStock {
            requested: 5,
            available: 3,
            ..
        }
    ));

    let sold_out = item.clone().with_stock(false, 0);
    assert!(matches!(
        Cart::new().add_to_cart(&sold_out, 1, None),
        Err(CommerceError::OutOfStock(_))
    ));
}

#[test]
fn test_checkout_then_clear() {
    let cart = add(&Cart::new(), &product(1, 6000, 5), 1, None);
    let order = cart.checkout(&PricingPolicy::default()).unwrap();
    assert_eq!(order.item_count, 1);
    assert!(order.totals.shipping.is_zero());

    let cleared = cart.clear();
    assert!(matches!(
        cleared.checkout(&PricingPolicy::default()),
        Err(CommerceError::EmptyCart)
    ));
}
