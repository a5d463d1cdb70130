//! Product listing and detail commands.

use anyhow::{bail, Result};
use serde::Serialize;
use storefront_core::catalog::{Product, RatingSummary};
use storefront_core::search::{query, CatalogParams, SortOption, DEFAULT_VISIBLE_PAGES};
use storefront_core::{BrandId, CategoryId, Money};
use storefront_data::CatalogSource;

use super::catalog::resolve_product;
use super::{ProductArgs, ProductsArgs};
use crate::context::Context;
use crate::output::{pager, price_label, stars, stock_label};

/// Run the products command.
pub async fn run(args: ProductsArgs, ctx: &Context) -> Result<()> {
    let per_page = args.per_page.unwrap_or(ctx.config.catalog.per_page);
    let mut params = build_params(&args)?;
    let catalog = ctx.catalog().await?;
    params.brands = resolve_brands(&catalog, params.brands).await?;
    let spec = params.to_query_spec(per_page);

    if params.brands.len() > 1 {
        ctx.output.warn(&format!(
            "Filtering by the first selected brand only ({})",
            params.brands[0]
        ));
    }

    let spinner = ctx.output.spinner("Loading products...");
    let products = catalog.load_products().await;
    spinner.finish_and_clear();
    let products = products?;

    let result = query(&products, &spec)?;
    ctx.logger
        .info_builder("catalog query")
        .field("params", params.to_query_string())
        .field_u64("total", result.total() as u64)
        .emit();

    if ctx.output.is_json() {
        ctx.output.json(&result);
        return Ok(());
    }

    ctx.output.header(&format!(
        "Products ({} matching, sorted by {})",
        result.total(),
        spec.sort.display_name()
    ));

    if result.is_empty() {
        if result.pagination.is_out_of_range() {
            ctx.output.info(&format!(
                "Page {} is past the last page ({}).",
                result.pagination.page,
                result.total_pages()
            ));
        } else {
            ctx.output.info("No products match these filters.");
        }
        return Ok(());
    }

    ctx.output.product_table(&result.products);
    println!();
    ctx.output.kv(
        "Showing",
        &format!(
            "{}-{} of {}",
            result.pagination.start_item(),
            result.pagination.end_item(),
            result.total()
        ),
    );
    if result.total_pages() > 1 {
        let links = result.pagination.page_links(DEFAULT_VISIBLE_PAGES);
        ctx.output.kv("Pages", &pager(&links, result.pagination.page));
    }
    let qs = params.to_query_string();
    if !qs.is_empty() {
        ctx.output.kv("Params", &qs);
    }

    Ok(())
}

/// Merge `--params` with individual flags; flags win.
fn build_params(args: &ProductsArgs) -> Result<CatalogParams> {
    let mut params = CatalogParams::from_query_string(args.params.as_deref().unwrap_or(""));

    if let Some(category) = &args.category {
        params.category = Some(CategoryId::new(category.as_str()));
    }
    if !args.brand.is_empty() {
        params.brands = args
            .brand
            .iter()
            .map(|b| b.trim())
            .filter(|b| !b.is_empty())
            .map(BrandId::from)
            .collect();
    }
    if let Some(min) = args.min_price {
        params.min_price = Some(dollars("--min-price", min)?);
    }
    if let Some(max) = args.max_price {
        params.max_price = Some(dollars("--max-price", max)?);
    }
    if let Some(search) = &args.search {
        params.search = Some(search.clone());
    }
    if let Some(sort) = &args.sort {
        params.sort = SortOption::from_str(sort);
    }
    if let Some(page) = args.page {
        params.page = page;
    }

    Ok(params)
}

/// Brands may be given by slug or by numeric ID; IDs are looked up and
/// replaced by their slug.
async fn resolve_brands<C: CatalogSource>(catalog: &C, brands: Vec<BrandId>) -> Result<Vec<BrandId>> {
    let mut resolved = Vec::with_capacity(brands.len());
    for brand in brands {
        match brand.as_str().parse::<u64>() {
            Ok(id) => resolved.push(catalog.brand_by_id(id).await?.slug),
            Err(_) => resolved.push(brand),
        }
    }
    Ok(resolved)
}

fn dollars(flag: &str, amount: f64) -> Result<Money> {
    if !amount.is_finite() || amount < 0.0 {
        bail!("{} must be a non-negative amount", flag);
    }
    Ok(Money::from_decimal(amount))
}

#[derive(Serialize)]
#[serde(rename_all = "camelCase")]
struct ProductDetail {
    #[serde(flatten)]
    product: Product,
    rating_summary: RatingSummary,
    in_cart: u32,
    in_wishlist: bool,
}

/// Run the product command.
pub async fn show(args: ProductArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let product = resolve_product(&catalog, &args.product).await?;
    let summary = catalog.rating_summary(product.id).await?;

    let collections = ctx.collections()?;
    let in_cart: u32 = collections
        .load_cart()?
        .iter()
        .filter(|line| line.product_id() == product.id)
        .map(|line| line.quantity)
        .sum();
    let in_wishlist = collections.load_wishlist()?.contains(product.id);

    if ctx.output.is_json() {
        ctx.output.json(&ProductDetail {
            product,
            rating_summary: summary,
            in_cart,
            in_wishlist,
        });
        return Ok(());
    }

    ctx.output.header(&product.title);
    ctx.output.kv("ID", &product.id.to_string());
    ctx.output.kv("Slug", &product.slug);
    ctx.output.kv("Price", &price_label(&product));
    if product.is_on_sale() {
        ctx.output.kv(
            "You save",
            &format!("{} ({}%)", product.savings().display(), product.discount_percentage),
        );
    }
    ctx.output.kv("Category", product.category_id.as_str());
    if let Some(brand) = &product.brand_id {
        ctx.output.kv("Brand", brand.as_str());
    }
    ctx.output.kv(
        "Rating",
        &format!(
            "{} {:.1} ({} reviews)",
            stars(product.rating),
            product.rating,
            product.review_count
        ),
    );
    ctx.output.kv("Availability", &stock_label(&product));
    if !product.tags.is_empty() {
        ctx.output.kv("Tags", &product.tags.join(", "));
    }
    if let Some(description) = &product.description {
        ctx.output.kv("Description", description);
    }

    if summary.total_reviews > 0 {
        ctx.output.header("Rating breakdown");
        for star in (1..=5u8).rev() {
            let count = summary.distribution.get(&star).copied().unwrap_or(0);
            ctx.output.kv(
                &format!("{} star", star),
                &format!("{:>3} ({:.0}%)", count, summary.percentage(star)),
            );
        }
    }

    if in_cart > 0 {
        ctx.output.info(&format!("{} in your cart", in_cart));
    }
    if in_wishlist {
        ctx.output.info("Saved to your wishlist");
    }

    Ok(())
}
