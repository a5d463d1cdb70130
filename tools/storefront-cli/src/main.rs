//! Storefront CLI: browse the mock catalog and manage a persistent cart.
//!
//! Commands:
//! - `storefront home` - Home page sections
//! - `storefront products` - Filtered, sorted, paginated listing
//! - `storefront product` - Product detail
//! - `storefront search` - Quick search
//! - `storefront cart` - Show and edit the cart, check out
//! - `storefront wishlist` - Show and toggle saved products
//! - `storefront reviews` - Product reviews and helpful votes
//! - `storefront deals` - Discounted products and deal timers
//! - `storefront config` - Manage configuration

mod commands;
mod config;
mod context;
mod output;

use anyhow::Result;
use clap::{Parser, Subcommand};
use storefront_observability::{init_tracing, LogLevel, TracingOptions};

use commands::{
    CartArgs, ConfigArgs, DealsArgs, HomeArgs, ProductArgs, ProductsArgs, ReviewsArgs, SearchArgs,
    WishlistArgs,
};

/// Storefront CLI - Browse the catalog and manage your cart
#[derive(Parser)]
#[command(name = "storefront")]
#[command(author, version, about, long_about = None)]
#[command(propagate_version = true)]
struct Cli {
    /// Enable verbose output
    #[arg(short, long, global = true)]
    verbose: bool,

    /// Use JSON output format
    #[arg(long, global = true)]
    json: bool,

    /// Config file path
    #[arg(short, long, global = true)]
    config: Option<String>,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Show the home page sections
    Home(HomeArgs),

    /// List products with filters, sorting and pagination
    Products(ProductsArgs),

    /// Show one product
    Product(ProductArgs),

    /// Quick search by title or tag
    Search(SearchArgs),

    /// Show or change the cart
    Cart(CartArgs),

    /// Show or change the wishlist
    Wishlist(WishlistArgs),

    /// List reviews for a product
    Reviews(ReviewsArgs),

    /// List current deals
    Deals(DealsArgs),

    /// Manage configuration
    Config(ConfigArgs),
}

impl Commands {
    fn name(&self) -> &'static str {
        match self {
            Commands::Home(_) => "home",
            Commands::Products(_) => "products",
            Commands::Product(_) => "product",
            Commands::Search(_) => "search",
            Commands::Cart(_) => "cart",
            Commands::Wishlist(_) => "wishlist",
            Commands::Reviews(_) => "reviews",
            Commands::Deals(_) => "deals",
            Commands::Config(_) => "config",
        }
    }
}

#[tokio::main]
async fn main() -> Result<()> {
    let cli = Cli::parse();

    let mut tracing_options = TracingOptions::default();
    if cli.verbose {
        tracing_options.level = LogLevel::Debug;
    }
    init_tracing(tracing_options);

    let output = output::Output::new(cli.verbose, cli.json);

    let config_path = cli.config.as_deref();
    let ctx = context::Context::load(config_path, output, cli.verbose)?
        .for_command(cli.command.name());
    ctx.output.debug(&format!("session {}", ctx.logger.session_id()));

    let result = match cli.command {
        Commands::Home(args) => commands::catalog::home(args, &ctx).await,
        Commands::Products(args) => commands::products::run(args, &ctx).await,
        Commands::Product(args) => commands::products::show(args, &ctx).await,
        Commands::Search(args) => commands::catalog::search(args, &ctx).await,
        Commands::Cart(args) => commands::cart::run(args, &ctx).await,
        Commands::Wishlist(args) => commands::wishlist::run(args, &ctx).await,
        Commands::Reviews(args) => commands::reviews::run(args, &ctx).await,
        Commands::Deals(args) => commands::deals::run(args, &ctx).await,
        Commands::Config(args) => commands::config::run(args, &ctx).await,
    };

    if let Err(e) = result {
        ctx.logger
            .error_builder("command failed")
            .field("error", format!("{:#}", e))
            .emit();
        ctx.output.error(&format!("{:#}", e));
        std::process::exit(1);
    }

    Ok(())
}
