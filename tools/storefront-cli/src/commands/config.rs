//! Configuration management commands.

use std::fs;

use anyhow::{anyhow, bail, Result};
use serde_json::Value;

use super::{ConfigArgs, ConfigCommand};
use crate::config::{generate_default_config, StorefrontConfig};
use crate::context::Context;

/// Run the config command.
pub async fn run(args: ConfigArgs, ctx: &Context) -> Result<()> {
    match args.command {
        ConfigCommand::Show => show_config(ctx),
        ConfigCommand::Get { key } => get_config(&key, ctx),
        ConfigCommand::Init { force } => init_config(force, ctx),
        ConfigCommand::Validate => validate_config(ctx),
    }
}

fn show_config(ctx: &Context) -> Result<()> {
    if ctx.output.is_json() {
        ctx.output.json(&ctx.config);
        return Ok(());
    }

    ctx.output.header("Current Configuration");
    match &ctx.config_path {
        Some(path) => ctx.output.kv("file", &path.display().to_string()),
        None => ctx.output.kv("file", "(defaults)"),
    }

    let config = &ctx.config;

    ctx.output.info("[catalog]");
    ctx.output.kv(
        "fixtures_dir",
        config.catalog.fixtures_dir.as_deref().unwrap_or("(embedded)"),
    );
    ctx.output.kv("per_page", &config.catalog.per_page.to_string());
    ctx.output
        .kv("latency", &serde_json::to_string(&config.catalog.latency)?);

    ctx.output.info("[store]");
    ctx.output.kv("path", &config.store.path);
    if let Some(profile) = &config.store.profile {
        ctx.output.kv("profile", profile);
    }

    ctx.output.info("[pricing]");
    ctx.output.kv("tax_rate", &config.pricing.tax_rate.to_string());
    ctx.output.kv(
        "free_shipping_threshold",
        &config.pricing.free_shipping_threshold.display(),
    );
    ctx.output
        .kv("flat_shipping", &config.pricing.flat_shipping.display());

    ctx.output.info("[logging]");
    ctx.output
        .kv("format", &serde_json::to_string(&config.logging.format)?);
    ctx.output.kv("level", &config.logging.level.to_string());

    Ok(())
}

fn get_config(key: &str, ctx: &Context) -> Result<()> {
    let value = get_config_value(&ctx.config, key)?;

    if ctx.output.is_json() {
        ctx.output
            .json(&serde_json::json!({ "key": key, "value": value }));
    } else {
        match value {
            Value::String(s) => println!("{}", s),
            other => println!("{}", other),
        }
    }

    Ok(())
}

/// Look up a dotted key such as `pricing.tax_rate`.
fn get_config_value(config: &StorefrontConfig, key: &str) -> Result<Value> {
    let root = serde_json::to_value(config)?;
    key.split('.')
        .try_fold(&root, |node, part| {
            node.get(part)
                .ok_or_else(|| anyhow!("Unknown config key: {}", key))
        })
        .cloned()
}

fn init_config(force: bool, ctx: &Context) -> Result<()> {
    let config_path = ctx.cwd.join("storefront.toml");

    if config_path.exists() && !force {
        bail!(
            "Config file already exists: {}. Use --force to overwrite.",
            config_path.display()
        );
    }

    fs::write(&config_path, generate_default_config())?;
    ctx.logger
        .info_builder("config written")
        .field("path", config_path.display().to_string())
        .emit();
    ctx.output
        .success(&format!("Created {}", config_path.display()));
    Ok(())
}

fn validate_config(ctx: &Context) -> Result<()> {
    let (errors, warnings) = ctx.config.validate();

    if ctx.output.is_json() {
        ctx.output.json(&serde_json::json!({
            "valid": errors.is_empty(),
            "errors": errors,
            "warnings": warnings,
        }));
    } else {
        for warning in &warnings {
            ctx.output.warn(warning);
        }
        for error in &errors {
            ctx.output.error(error);
        }
        if errors.is_empty() {
            ctx.output.success("Configuration is valid");
        }
    }

    if !errors.is_empty() {
        bail!("Configuration has {} error(s)", errors.len());
    }
    Ok(())
}
