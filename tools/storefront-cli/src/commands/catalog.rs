//! Home page, quick search and shared product lookup.

use anyhow::{Context as _, Result};
use chrono::Utc;
use serde::Serialize;
use storefront_core::catalog::{Brand, Category, DealTimer, HeroBanner, Product};
use storefront_core::{CategoryId, ProductId};
use storefront_data::{CatalogSource, MockCatalog};

use super::{HomeArgs, SearchArgs};
use crate::context::Context;
use crate::output::price_label;

/// Look up a product by numeric ID or slug.
pub async fn resolve_product(catalog: &MockCatalog, reference: &str) -> Result<Product> {
    let reference = reference.trim();
    let product = match reference.parse::<ProductId>() {
        Ok(id) => catalog.product_by_id(id).await,
        Err(_) => catalog.product_by_slug(reference).await,
    };
    product.with_context(|| format!("No product matches '{}'", reference))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct HomePage {
    hero_banners: Vec<HeroBanner>,
    featured_categories: Vec<Category>,
    deal_timers: Vec<DealTimer>,
    deals: Vec<Product>,
    best_sellers: Vec<Product>,
    new_arrivals: Vec<Product>,
    featured_brands: Vec<Brand>,
    recommended: Vec<Product>,
}

/// Run the home command.
pub async fn home(args: HomeArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let category = args.category.map(CategoryId::new);

    let spinner = ctx.output.spinner("Loading storefront...");
    let sections = futures::try_join!(
        catalog.hero_banners(),
        catalog.featured_categories(),
        catalog.active_deal_timers(Utc::now()),
        catalog.deals(),
        catalog.best_sellers(category.as_ref()),
        catalog.new_arrivals(),
        catalog.featured_brands(),
        catalog.recommended(),
    );
    spinner.finish_and_clear();
    let (
        hero_banners,
        featured_categories,
        deal_timers,
        deals,
        best_sellers,
        new_arrivals,
        featured_brands,
        recommended,
    ) = sections?;

    let page = HomePage {
        hero_banners,
        featured_categories,
        deal_timers,
        deals,
        best_sellers,
        new_arrivals,
        featured_brands,
        recommended,
    };

    if ctx.output.is_json() {
        ctx.output.json(&page);
        return Ok(());
    }

    ctx.output.header("Featured");
    for banner in &page.hero_banners {
        let subtitle = banner.subtitle.as_deref().unwrap_or("");
        ctx.output.list_item(&format!("{} {}", banner.title, subtitle));
    }

    ctx.output.header("Shop by Category");
    for category in &page.featured_categories {
        ctx.output
            .list_item(&format!("{} ({} products)", category.name, category.product_count));
    }

    if !page.deal_timers.is_empty() {
        ctx.output.header("Deals Ending Soon");
        let now = Utc::now();
        for timer in &page.deal_timers {
            ctx.output.kv(&timer.title, &timer.countdown(now).display());
        }
    }

    for (title, products) in [
        ("Today's Deals", &page.deals),
        ("Best Sellers", &page.best_sellers),
        ("New Arrivals", &page.new_arrivals),
        ("Recommended for You", &page.recommended),
    ] {
        ctx.output.header(title);
        ctx.output.product_table(products);
    }

    ctx.output.header("Featured Brands");
    for brand in &page.featured_brands {
        ctx.output.list_item(&brand.name);
    }

    Ok(())
}

/// Run the search command.
pub async fn search(args: SearchArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let results = catalog.search(&args.term).await?;

    ctx.logger
        .info_builder("quick search")
        .field("term", args.term.clone())
        .field_u64("results", results.len() as u64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&results);
        return Ok(());
    }

    ctx.output.header(&format!("Results for \"{}\"", args.term));
    if results.is_empty() {
        ctx.output.info("No products found.");
        return Ok(());
    }
    for product in &results {
        ctx.output
            .list_item(&format!("{} ({}) {}", product.title, product.slug, price_label(product)));
    }
    Ok(())
}
