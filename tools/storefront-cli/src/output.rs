//! Output formatting for the CLI.

use console::style;
use indicatif::{ProgressBar, ProgressStyle};
use storefront_core::cart::CartTotals;
use storefront_core::catalog::Product;
use storefront_core::search::PageLink;

/// Output handler for CLI messages.
#[derive(Clone)]
pub struct Output {
    verbose: bool,
    json: bool,
}

impl Output {
    /// Create a new output handler.
    pub fn new(verbose: bool, json: bool) -> Self {
        Self { verbose, json }
    }

    /// Print an info message.
    pub fn info(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("ℹ").blue(), msg);
    }

    /// Print a success message.
    pub fn success(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("{} {}", style("✓").green(), msg);
    }

    /// Print a warning message.
    pub fn warn(&self, msg: &str) {
        if self.json {
            return;
        }
        eprintln!("{} {}", style("⚠").yellow(), msg);
    }

    /// Print an error message.
    pub fn error(&self, msg: &str) {
        if self.json {
            eprintln!("{}", serde_json::json!({ "error": msg }));
            return;
        }
        eprintln!("{} {}", style("✗").red(), style(msg).red());
    }

    /// Print a debug message (only in verbose mode).
    pub fn debug(&self, msg: &str) {
        if !self.verbose || self.json {
            return;
        }
        eprintln!("{} {}", style("→").dim(), style(msg).dim());
    }

    /// Print a header/title.
    pub fn header(&self, msg: &str) {
        if self.json {
            return;
        }
        println!("\n{}", style(msg).bold().underlined());
    }

    /// Print JSON output.
    pub fn json<T: serde::Serialize>(&self, value: &T) {
        if let Ok(json) = serde_json::to_string_pretty(value) {
            println!("{}", json);
        }
    }

    /// Print a key-value pair.
    pub fn kv(&self, key: &str, value: &str) {
        if self.json {
            return;
        }
        println!("  {}: {}", style(key).dim(), value);
    }

    /// Print a list item.
    pub fn list_item(&self, item: &str) {
        if self.json {
            return;
        }
        println!("  {} {}", style("•").dim(), item);
    }

    /// Print a table row.
    pub fn table_row(&self, cols: &[&str], widths: &[usize]) {
        if self.json {
            return;
        }
        let formatted: Vec<String> = cols
            .iter()
            .zip(widths.iter())
            .map(|(col, width)| format!("{:width$}", col, width = width))
            .collect();
        println!("  {}", formatted.join("  "));
    }

    /// One product per row: id, title, price, rating, stock.
    pub fn product_table(&self, products: &[Product]) {
        if self.json {
            return;
        }
        let widths = [4, 34, 18, 8, 12];
        self.table_row(&["ID", "TITLE", "PRICE", "RATING", "STOCK"], &widths);
        for product in products {
            let id = product.id.to_string();
            let rating = format!("{:.1}", product.rating);
            self.table_row(
                &[
                    &id,
                    &truncate(&product.title, widths[1]),
                    &price_label(product),
                    &rating,
                    &stock_label(product),
                ],
                &widths,
            );
        }
    }

    /// Subtotal, tax, shipping and total lines.
    pub fn totals(&self, totals: &CartTotals) {
        self.kv("Subtotal", &totals.subtotal.display());
        self.kv("Tax", &totals.tax.display());
        let shipping = if totals.shipping.is_zero() {
            style("FREE").green().to_string()
        } else {
            totals.shipping.display()
        };
        self.kv("Shipping", &shipping);
        self.kv("Total", &style(totals.total.display()).bold().to_string());
    }

    /// Create a spinner for indeterminate progress.
    pub fn spinner(&self, msg: &str) -> ProgressBar {
        if self.json {
            return ProgressBar::hidden();
        }

        let pb = ProgressBar::new_spinner();
        if let Ok(spinner_style) = ProgressStyle::default_spinner().template("{spinner:.green} {msg}") {
            pb.set_style(spinner_style);
        }
        pb.set_message(msg.to_string());
        pb.enable_steady_tick(std::time::Duration::from_millis(100));
        pb
    }

    /// Check if JSON mode is enabled.
    pub fn is_json(&self) -> bool {
        self.json
    }
}

/// Price with the pre-discount price struck through when on sale.
pub fn price_label(product: &Product) -> String {
    match product.original_price {
        Some(original) if product.is_on_sale() => format!(
            "{} {}",
            product.price.display(),
            style(original.display()).dim().strikethrough()
        ),
        _ => product.price.display(),
    }
}

/// Stock status for a product.
pub fn stock_label(product: &Product) -> String {
    if !product.in_stock || product.stock_quantity == 0 {
        style("out of stock").red().to_string()
    } else if product.stock_quantity <= 5 {
        style(format!("only {} left", product.stock_quantity))
            .yellow()
            .to_string()
    } else {
        style("in stock").green().to_string()
    }
}

/// Five-star rating bar, e.g. "★★★★☆".
pub fn stars(rating: f64) -> String {
    let filled = rating.round().clamp(0.0, 5.0) as usize;
    format!("{}{}", "★".repeat(filled), "☆".repeat(5 - filled))
}

/// Pager line such as "1 … 4 [5] 6 … 10".
pub fn pager(links: &[PageLink], current: u32) -> String {
    links
        .iter()
        .map(|link| match link {
            PageLink::Page(n) if *n == i64::from(current) => format!("[{}]", n),
            PageLink::Page(n) => n.to_string(),
            PageLink::Ellipsis => "…".to_string(),
        })
        .collect::<Vec<_>>()
        .join(" ")
}

fn truncate(text: &str, max: usize) -> String {
    if text.chars().count() <= max {
        return text.to_string();
    }
    let mut cut: String = text.chars().take(max.saturating_sub(1)).collect();
    cut.push('…');
    cut
}
