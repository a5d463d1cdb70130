//! CLI command implementations.

pub mod cart;
pub mod catalog;
pub mod config;
pub mod deals;
pub mod products;
pub mod reviews;
pub mod wishlist;

use clap::{Args, Subcommand};

/// Arguments for the products command.
#[derive(Args)]
pub struct ProductsArgs {
    /// Category slug.
    #[arg(long)]
    pub category: Option<String>,

    /// Brand slug; repeat or comma-separate to select several.
    #[arg(long, value_delimiter = ',')]
    pub brand: Vec<String>,

    /// Minimum price in dollars.
    #[arg(long)]
    pub min_price: Option<f64>,

    /// Maximum price in dollars.
    #[arg(long)]
    pub max_price: Option<f64>,

    /// Search text (title substring or exact tag).
    #[arg(short, long)]
    pub search: Option<String>,

    /// relevance, price-low, price-high, rating or newest.
    #[arg(long)]
    pub sort: Option<String>,

    /// Page number, starting at 1.
    #[arg(short, long)]
    pub page: Option<u32>,

    /// Products per page (default from config).
    #[arg(long)]
    pub per_page: Option<u32>,

    /// URL query string, e.g. "category=electronics&sort=rating&page=2".
    /// Individual flags override values from it.
    #[arg(long)]
    pub params: Option<String>,
}

/// Arguments for the product command.
#[derive(Args)]
pub struct ProductArgs {
    /// Product slug or numeric ID.
    pub product: String,
}

/// Arguments for the search command.
#[derive(Args)]
pub struct SearchArgs {
    /// Text matched against titles and tags.
    pub term: String,
}

/// Arguments for the home command.
#[derive(Args)]
pub struct HomeArgs {
    /// Limit best sellers to one category.
    #[arg(long)]
    pub category: Option<String>,
}

/// Arguments for the cart command.
#[derive(Args)]
pub struct CartArgs {
    #[command(subcommand)]
    pub command: Option<CartCommand>,
}

#[derive(Subcommand)]
pub enum CartCommand {
    /// Show cart contents and totals.
    Show,
    /// Add a product.
    Add {
        /// Product slug or numeric ID.
        product: String,

        /// Quantity to add.
        #[arg(short, long, default_value = "1")]
        quantity: u32,

        /// Variant option as axis=value, e.g. --variant size=M.
        #[arg(long = "variant", value_name = "AXIS=VALUE")]
        variants: Vec<String>,
    },
    /// Set the quantity of a product's lines.
    Update {
        /// Product slug or numeric ID.
        product: String,

        /// New quantity; below 1 leaves the cart unchanged.
        quantity: u32,
    },
    /// Remove a product's lines.
    Remove {
        /// Product slug or numeric ID.
        product: String,
    },
    /// Empty the cart.
    Clear {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
    /// Place the order and empty the cart.
    Checkout {
        /// Skip confirmation.
        #[arg(short, long)]
        yes: bool,
    },
}

/// Arguments for the wishlist command.
#[derive(Args)]
pub struct WishlistArgs {
    #[command(subcommand)]
    pub command: Option<WishlistCommand>,
}

#[derive(Subcommand)]
pub enum WishlistCommand {
    /// List saved products.
    Show,
    /// Save a product, or unsave it if already saved.
    Toggle {
        /// Product slug or numeric ID.
        product: String,
    },
}

/// Arguments for the reviews command.
#[derive(Args)]
pub struct ReviewsArgs {
    /// Product slug or numeric ID.
    pub product: String,

    /// all, withPhotos or verified.
    #[arg(long, default_value = "all")]
    pub filter: String,

    /// helpful, recent, highestRating or lowestRating.
    #[arg(long, default_value = "helpful")]
    pub sort: String,

    /// Mark a review as helpful before listing.
    #[arg(long, value_name = "REVIEW_ID")]
    pub helpful: Option<u64>,
}

/// Arguments for the deals command.
#[derive(Args)]
pub struct DealsArgs {
    /// discount, price-low, price-high or rating.
    #[arg(long, default_value = "discount")]
    pub sort: String,
}

/// Arguments for the config command.
#[derive(Args)]
pub struct ConfigArgs {
    #[command(subcommand)]
    pub command: ConfigCommand,
}

#[derive(Subcommand)]
pub enum ConfigCommand {
    /// Show current configuration.
    Show,
    /// Get a configuration value.
    Get {
        /// Config key (e.g., pricing.tax_rate).
        key: String,
    },
    /// Create a storefront.toml in the current directory.
    Init {
        /// Overwrite existing config.
        #[arg(short, long)]
        force: bool,
    },
    /// Validate configuration.
    Validate,
}
