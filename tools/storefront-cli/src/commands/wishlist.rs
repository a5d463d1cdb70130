//! Wishlist commands.

use anyhow::Result;
use storefront_core::cart::WishlistChange;

use super::catalog::resolve_product;
use super::{WishlistArgs, WishlistCommand};
use crate::context::Context;
use crate::output::{price_label, stock_label};

/// Run the wishlist command.
pub async fn run(args: WishlistArgs, ctx: &Context) -> Result<()> {
    match args.command.unwrap_or(WishlistCommand::Show) {
        WishlistCommand::Show => show(ctx),
        WishlistCommand::Toggle { product } => toggle(ctx, &product).await,
    }
}

fn show(ctx: &Context) -> Result<()> {
    let wishlist = ctx.collections()?.load_wishlist()?;

    if ctx.output.is_json() {
        ctx.output.json(&wishlist);
        return Ok(());
    }

    ctx.output.header(&format!("Wishlist ({})", wishlist.len()));
    if wishlist.is_empty() {
        ctx.output.info("Your wishlist is empty.");
        return Ok(());
    }
    for product in wishlist.products() {
        ctx.output.list_item(&format!(
            "{} ({}) {} {}",
            product.title,
            product.slug,
            price_label(product),
            stock_label(product)
        ));
    }
    Ok(())
}

async fn toggle(ctx: &Context, reference: &str) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let product = resolve_product(&catalog, reference).await?;
    let store = ctx.collections()?;

    let (change, len) = store.mutate_wishlist(|wishlist| {
        let (next, change) = wishlist.toggle(&product);
        let len = next.len();
        Ok::<_, anyhow::Error>((next, (change, len)))
    })?;

    let message = match change {
        WishlistChange::Added => "Added to wishlist",
        WishlistChange::Removed => "Removed from wishlist",
    };
    ctx.logger
        .info_builder(message)
        .field("product", product.slug.clone())
        .field_u64("wishlist_size", len as u64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "productId": product.id,
            "change": change,
            "size": len,
        }));
        return Ok(());
    }
    ctx.output.success(&format!("{}: {}", message, product.title));
    Ok(())
}
