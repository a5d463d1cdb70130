//! Deals page.

use anyhow::Result;
use chrono::Utc;
use storefront_core::catalog::DealSort;
use storefront_data::CatalogSource;

use super::DealsArgs;
use crate::context::Context;

/// Run the deals command.
pub async fn run(args: DealsArgs, ctx: &Context) -> Result<()> {
    let catalog = ctx.catalog().await?;
    let now = Utc::now();
    let sort = DealSort::from_str(&args.sort);

    let (mut deals, timers) =
        futures::try_join!(catalog.deals(), catalog.active_deal_timers(now))?;
    sort.apply(&mut deals);

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "sort": sort.as_str(),
            "dealTimers": timers,
            "deals": deals,
        }));
        return Ok(());
    }

    if !timers.is_empty() {
        ctx.output.header("Ending Soon");
        for timer in &timers {
            ctx.output
                .kv(&timer.title, &format!("ends in {}", timer.countdown(now).display()));
        }
    }

    ctx.output
        .header(&format!("Today's Deals ({}, by {})", deals.len(), sort.as_str()));
    if deals.is_empty() {
        ctx.output.info("No deals right now.");
        return Ok(());
    }
    ctx.output.product_table(&deals);
    Ok(())
}
