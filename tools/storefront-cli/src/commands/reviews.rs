//! Review listing and helpful votes.

use anyhow::Result;
use storefront_core::catalog::{ReviewFilter, ReviewSort};
use storefront_core::ReviewId;
use storefront_data::CatalogSource;

use super::catalog::resolve_product;
use super::ReviewsArgs;
use crate::context::Context;
use crate::output::stars;

/// Run the reviews command.
pub async fn run(args: ReviewsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let product = resolve_product(&catalog, &args.product).await?;

    if let Some(id) = args.helpful {
        let vote = catalog.mark_helpful(ReviewId::new(id)).await?;
        ctx.logger
            .info_builder("review marked helpful")
            .field_u64("review_id", id)
            .field_u64("helpful_count", u64::from(vote.helpful_count))
            .emit();
        ctx.output.success(&format!(
            "Marked review {} helpful ({} people found it helpful)",
            id, vote.helpful_count
        ));
    }

    let filter = ReviewFilter::from_str(&args.filter);
    let sort = ReviewSort::from_str(&args.sort);
    let (reviews, summary) = futures::try_join!(
        catalog.reviews_for(product.id, filter, sort),
        catalog.rating_summary(product.id),
    )?;

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "productId": product.id,
            "summary": summary,
            "reviews": reviews,
        }));
        return Ok(());
    }

    ctx.output.header(&format!("Reviews for {}", product.title));
    ctx.output.kv(
        "Average",
        &format!(
            "{} {:.1} out of 5 ({} reviews)",
            stars(summary.average_rating),
            summary.average_rating,
            summary.total_reviews
        ),
    );
    for star in (1..=5u8).rev() {
        let count = summary.distribution.get(&star).copied().unwrap_or(0);
        ctx.output.kv(
            &format!("{} star", star),
            &format!("{:>3} ({:.0}%)", count, summary.percentage(star)),
        );
    }

    ctx.output.header(&format!(
        "{} reviews ({}, {})",
        reviews.len(),
        filter.as_str(),
        sort.as_str()
    ));
    if reviews.is_empty() {
        ctx.output.info("No reviews match this filter.");
        return Ok(());
    }

    for review in &reviews {
        let mut heading = format!("#{} {}", review.id, stars(f64::from(review.rating)));
        if let Some(title) = &review.title {
            heading = format!("{} {}", heading, title);
        }
        println!();
        ctx.output.list_item(&heading);
        let mut byline = format!("{} on {}", review.author, review.date.format("%Y-%m-%d"));
        if review.verified_purchase {
            byline.push_str(" (verified purchase)");
        }
        ctx.output.kv("By", &byline);
        ctx.output.kv("Review", &review.comment);
        if !review.images.is_empty() {
            ctx.output.kv("Photos", &review.images.len().to_string());
        }
        ctx.output.kv("Helpful", &review.helpful_count.to_string());
    }
    Ok(())
}
