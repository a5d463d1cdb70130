//! Cart commands.

use anyhow::{bail, Result};
use dialoguer::Confirm;
use storefront_cache::{CollectionStore, KeyValueStore};
use storefront_core::cart::{compute_totals_with, Cart, OrderSummary, PricingPolicy, Variant};

use super::catalog::resolve_product;
use super::{CartArgs, CartCommand};
use crate::context::Context;

/// Run the cart command.
pub async fn run(args: CartArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(CartCommand::Show) {
        CartCommand::Show => show(ctx),
        CartCommand::Add {
            product,
            quantity,
            variants,
        } => add(ctx, &product, quantity, &variants).await,
        CartCommand::Update { product, quantity } => update(ctx, &product, quantity).await,
        CartCommand::Remove { product } => remove(ctx, &product).await,
        CartCommand::Clear { yes } => clear(ctx, yes),
        CartCommand::Checkout { yes } => checkout(ctx, yes),
    }
}

fn show(ctx: &Context) -> Result<()> {
    let cart = ctx.collections()?.load_cart()?;
    let totals = compute_totals_with(&cart, &ctx.config.pricing);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": cart,
            "itemCount": cart.item_count(),
            "totals": totals,
        }));
        return Ok(());
    }

    print_lines(ctx, &cart);
    if cart.is_empty() {
        return Ok(());
    }

    println!();
    ctx.output.totals(&totals);
    let remaining = ctx.config.pricing.remaining_for_free_shipping(totals.subtotal);
    if !remaining.is_zero() {
        ctx.output.info(&format!(
            "Add {} more for free shipping",
            remaining.display()
        ));
    }
    Ok(())
}

fn print_lines(ctx: &Context, cart: &Cart) {
    let badge = cart.badge().unwrap_or_else(|| "0".to_string());
    ctx.output.header(&format!("Cart ({})", badge));

    if cart.is_empty() {
        ctx.output.info("Your cart is empty.");
        return;
    }

    let widths = [4, 34, 12, 5, 12];
    ctx.output
        .table_row(&["ID", "PRODUCT", "PRICE", "QTY", "LINE"], &widths);
    for line in cart {
        let id = line.product_id().to_string();
        let mut title = line.product.title.clone();
        if let Some(variant) = &line.selected_variant {
            let options: Vec<String> = variant.iter().map(|(k, v)| format!("{}: {}", k, v)).collect();
            title = format!("{} ({})", title, options.join(", "));
        }
        ctx.output.table_row(
            &[
                &id,
                &title,
                &line.product.price.display(),
                &line.quantity.to_string(),
                &line.line_total().display(),
            ],
            &widths,
        );
    }
}

/// Parse `axis=value` pairs; none means no variant.
fn parse_variants(raw: &[String]) -> Result<Option<Variant>> {
    let mut variant = Variant::new();
    for pair in raw {
        let Some((axis, value)) = pair.split_once('=') else {
            bail!("Invalid variant '{}': expected AXIS=VALUE", pair);
        };
        let (axis, value) = (axis.trim(), value.trim());
        if axis.is_empty() || value.is_empty() {
            bail!("Invalid variant '{}': expected AXIS=VALUE", pair);
        }
        variant.insert(axis.to_string(), value.to_string());
    }
    Ok((!variant.is_empty()).then_some(variant))
}

async fn add(ctx: &Context, reference: &str, quantity: u32, variants: &[String]) -> Result<()> {
    let variant = parse_variants(variants)?;
    let catalog = ctx.catalog().await?;
    let product = resolve_product(&catalog, reference).await?;
    let store = ctx.collections()?;

    let (already, update) = store.mutate_cart(|cart| {
        let already = cart.contains(product.id);
        let update = cart.add_to_cart(&product, quantity, variant.clone())?;
        Ok::<_, anyhow::Error>((update.cart.clone(), (already, update)))
    })?;

    ctx.logger
        .info_builder("added to cart")
        .field("product", product.slug.clone())
        .field_u64("quantity", u64::from(quantity))
        .field_u64("item_count", u64::from(update.cart.item_count()))
        .emit();

    if let Some(clamp) = &update.clamped {
        ctx.output.warn(&clamp.to_string());
        ctx.logger
            .warn_builder("quantity clamped")
            .field("product", product.slug.clone())
            .field_u64("requested", u64::from(clamp.requested))
            .field_u64("applied", u64::from(clamp.applied))
            .emit();
    }

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "items": update.cart,
            "itemCount": update.cart.item_count(),
            "clamped": update.clamped,
        }));
        return Ok(());
    }

    if already {
        ctx.output
            .success(&format!("Updated {} quantity in cart", product.title));
    } else {
        ctx.output.success(&format!("{} added to cart", product.title));
    }
    Ok(())
}

async fn update(ctx: &Context, reference: &str, quantity: u32) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let product = resolve_product(&catalog, reference).await?;
    let store = ctx.collections()?;

    let cart = store.mutate_cart(|cart| {
        let next = cart.update_quantity(product.id, quantity);
        Ok::<_, anyhow::Error>((next.clone(), next))
    })?;

    if quantity == 0 {
        ctx.output
            .warn("Quantity must be at least 1; cart left unchanged");
    } else if !cart.contains(product.id) {
        ctx.output
            .warn(&format!("{} is not in your cart", product.title));
    } else {
        ctx.logger
            .info_builder("cart quantity updated")
            .field("product", product.slug.clone())
            .field_u64("quantity", u64::from(quantity))
            .emit();
        ctx.output
            .success(&format!("Updated {} quantity in cart", product.title));
    }

    if ctx.output.is_json() {
        ctx.output.json(&cart);
    }
    Ok(())
}

async fn remove(ctx: &Context, reference: &str) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let product = resolve_product(&catalog, reference).await?;
    let store = ctx.collections()?;

    let removed = store.mutate_cart(|cart| {
        let next = cart.remove_item(product.id);
        let removed = next.unique_item_count() != cart.unique_item_count();
        Ok::<_, anyhow::Error>((next, removed))
    })?;

    if removed {
        ctx.logger
            .info_builder("removed from cart")
            .field("product", product.slug.clone())
            .emit();
        ctx.output
            .success(&format!("Removed {} from cart", product.title));
    } else {
        ctx.output
            .warn(&format!("{} is not in your cart", product.title));
    }
    Ok(())
}

fn clear(ctx: &Context, yes: bool) -> Result<()> {
    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt("Remove every item from your cart?")
            .default(false)
            .interact()?;
        if !confirmed {
            ctx.output.info("Cart left unchanged.");
            return Ok(());
        }
    }

    let store = ctx.collections()?;
    store.mutate_cart(|cart| Ok::<_, anyhow::Error>((cart.clear(), ())))?;
    ctx.logger.info("cart cleared");
    ctx.output.success("Cart cleared");
    Ok(())
}

fn checkout(ctx: &Context, yes: bool) -> Result<()> {
    let store = ctx.collections()?;
    let cart = store.load_cart()?;
    let order = cart.checkout(&ctx.config.pricing)?;

    if !ctx.output.is_json() {
        print_lines(ctx, &cart);
        println!();
        ctx.output.totals(&order.totals);
    }

    if !yes && !ctx.output.is_json() {
        let confirmed = Confirm::new()
            .with_prompt(format!("Place order for {}?", order.totals.total.display()))
            .default(true)
            .interact()?;
        if !confirmed {
            ctx.output.info("Checkout cancelled.");
            return Ok(());
        }
    }

    let order = place_order(&store, &cart, &ctx.config.pricing)?;
    ctx.logger
        .info_builder("order placed")
        .field_u64("item_count", u64::from(order.item_count))
        .field("total", order.totals.total.display())
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&order);
        return Ok(());
    }
    ctx.output.success("Order placed successfully!");
    Ok(())
}

/// Check out the stored cart and empty it in one locked step.
///
/// Fails without touching the store if the cart no longer matches the one
/// the customer confirmed.
fn place_order<S: KeyValueStore>(
    store: &CollectionStore<S>,
    confirmed: &Cart,
    policy: &PricingPolicy,
) -> Result<OrderSummary> {
    store.mutate_cart(|current| {
        if current != confirmed {
            bail!("Cart changed since it was shown; run checkout again");
        }
        let order = current.checkout(policy)?;
        Ok((current.clear(), order))
    })
}

#[cfg(test)]
mod tests {
    use super::*;
    use storefront_cache::MemoryStore;
    use storefront_core::catalog::Product;
    use storefront_core::Money;

    fn store_with_cart() -> (CollectionStore<MemoryStore>, Cart) {
        let store = CollectionStore::new(MemoryStore::new());
        let lamp = Product::new(1, "lamp", "Lamp", Money::new(2500), "home");
        let cart = Cart::new().add_to_cart(&lamp, 2, None).unwrap().cart;
        store.save_cart(&cart).unwrap();
        (store, cart)
    }

    #[test]
    fn test_place_order_empties_stored_cart() {
        let (store, cart) = store_with_cart();
        let order = place_order(&store, &cart, &PricingPolicy::default()).unwrap();
        assert_eq!(order.item_count, 2);
        assert!(store.load_cart().unwrap().is_empty());
    }

    #[test]
    fn test_place_order_refuses_changed_cart() {
        let (store, cart) = store_with_cart();
        let mug = Product::new(2, "mug", "Mug", Money::new(900), "home");
        store
            .mutate_cart(|current| {
                let next = current.add_to_cart(&mug, 1, None)?.cart;
                Ok::<_, anyhow::Error>((next, ()))
            })
            .unwrap();

        assert!(place_order(&store, &cart, &PricingPolicy::default()).is_err());
        assert_eq!(store.load_cart().unwrap().unique_item_count(), 2);
    }

    #[test]
    fn test_place_order_on_empty_cart_fails() {
        let store = CollectionStore::new(MemoryStore::new());
        let err = place_order(&store, &Cart::new(), &PricingPolicy::default()).unwrap_err();
        assert!(err.to_string().contains("empty"));
    }

    #[test]
    fn test_parse_variants() {
        let variant = parse_variants(&["size=M".into(), " color = Blue ".into()])
            .unwrap()
            .unwrap();
        assert_eq!(variant.get("size").map(String::as_str), Some("M"));
        assert_eq!(variant.get("color").map(String::as_str), Some("Blue"));
    }

    #[test]
    fn test_no_variants_is_none() {
        assert!(parse_variants(&[]).unwrap().is_none());
    }

    #[test]
    fn test_malformed_variant_rejected() {
        assert!(parse_variants(&["size".into()]).is_err());
        assert!(parse_variants(&["=M".into()]).is_err());
    }
}
