//! CLI configuration.

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use storefront_core::cart::PricingPolicy;
use storefront_core::search::DEFAULT_PER_PAGE;
use storefront_data::Latency;
use storefront_observability::{LogFormat, LogLevel};

/// Config file names searched for, in order.
pub const CONFIG_FILE_NAMES: [&str; 3] = ["storefront.toml", ".storefront.toml", "storefront.json"];

/// CLI configuration file.
#[derive(Debug, Clone, Default, Serialize, Deserialize, PartialEq)]
pub struct StorefrontConfig {
    #[serde(default)]
    pub catalog: CatalogConfig,

    #[serde(default)]
    pub store: StoreConfig,

    /// Tax and shipping rates.
    #[serde(default)]
    pub pricing: PricingPolicy,

    #[serde(default)]
    pub logging: LoggingConfig,
}

impl StorefrontConfig {
    /// Load config from a file.
    pub fn load(path: &Path) -> Result<Self> {
        let content = std::fs::read_to_string(path)
            .with_context(|| format!("Failed to read config file: {}", path.display()))?;

        if is_json(path) {
            serde_json::from_str(&content)
                .with_context(|| format!("Failed to parse JSON config: {}", path.display()))
        } else {
            toml::from_str(&content)
                .with_context(|| format!("Failed to parse TOML config: {}", path.display()))
        }
    }

    /// Save config to a file.
    pub fn save(&self, path: &Path) -> Result<()> {
        let content = if is_json(path) {
            serde_json::to_string_pretty(self)?
        } else {
            toml::to_string_pretty(self)?
        };

        std::fs::write(path, content)
            .with_context(|| format!("Failed to write config file: {}", path.display()))
    }

    /// Problems that make the config unusable, then ones worth a warning.
    pub fn validate(&self) -> (Vec<String>, Vec<String>) {
        let mut errors = Vec::new();
        let mut warnings = Vec::new();

        if self.catalog.per_page == 0 {
            errors.push("catalog.per_page must be at least 1".to_string());
        } else if self.catalog.per_page > 100 {
            warnings.push(format!("catalog.per_page {} is unusually large", self.catalog.per_page));
        }

        if let Latency::Scaled(factor) = self.catalog.latency {
            if !factor.is_finite() || factor < 0.0 {
                errors.push("catalog.latency scale must be a non-negative number".to_string());
            }
        }

        let rate = self.pricing.tax_rate;
        if !rate.is_finite() || !(0.0..=1.0).contains(&rate) {
            errors.push("pricing.tax_rate must be between 0 and 1".to_string());
        }
        if self.pricing.flat_shipping.is_negative() {
            errors.push("pricing.flat_shipping must not be negative".to_string());
        }
        if self.pricing.free_shipping_threshold.is_negative() {
            errors.push("pricing.free_shipping_threshold must not be negative".to_string());
        }

        if self.store.path.trim().is_empty() {
            errors.push("store.path is required".to_string());
        }
        if let Some(profile) = &self.store.profile {
            if profile.trim().is_empty() || profile.contains(':') {
                errors.push("store.profile must be non-empty and must not contain ':'".to_string());
            }
        }

        if let Some(dir) = &self.catalog.fixtures_dir {
            if !Path::new(dir).is_dir() {
                warnings.push(format!(
                    "catalog.fixtures_dir '{}' does not exist; embedded fixtures will be used",
                    dir
                ));
            }
        }

        (errors, warnings)
    }
}

fn is_json(path: &Path) -> bool {
    path.extension().map_or(false, |e| e == "json")
}

/// Catalog data source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct CatalogConfig {
    /// Directory with fixture JSON files; embedded fixtures when unset.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub fixtures_dir: Option<String>,

    /// Default page size for `products`.
    #[serde(default = "default_per_page")]
    pub per_page: u32,

    /// Simulated service latency.
    #[serde(default)]
    pub latency: Latency,
}

fn default_per_page() -> u32 {
    DEFAULT_PER_PAGE
}

impl Default for CatalogConfig {
    fn default() -> Self {
        Self {
            fixtures_dir: None,
            per_page: default_per_page(),
            latency: Latency::None,
        }
    }
}

/// Persisted cart and wishlist.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct StoreConfig {
    /// JSON document holding the collections.
    #[serde(default = "default_store_path")]
    pub path: String,

    /// Namespace for the collection keys.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub profile: Option<String>,
}

fn default_store_path() -> String {
    ".storefront/store.json".to_string()
}

impl Default for StoreConfig {
    fn default() -> Self {
        Self {
            path: default_store_path(),
            profile: None,
        }
    }
}

/// Structured log output.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct LoggingConfig {
    #[serde(default)]
    pub format: LogFormat,

    #[serde(default = "default_log_level")]
    pub level: LogLevel,
}

fn default_log_level() -> LogLevel {
    LogLevel::Warn
}

impl Default for LoggingConfig {
    fn default() -> Self {
        Self {
            format: LogFormat::default(),
            level: default_log_level(),
        }
    }
}

/// Generate a default storefront.toml config file.
pub fn generate_default_config() -> String {
    format!(
        r#"# Storefront configuration

[catalog]
# fixtures_dir = "fixtures"
per_page = {per_page}
# none | realistic | scaled (value = factor) | fixed (value = milliseconds)
latency = {{ mode = "none" }}

[store]
path = "{store_path}"
# profile = "default"

[pricing]
tax_rate = 0.08
free_shipping_threshold = 50.0
flat_shipping = 9.99

[logging]
format = "human"
level = "warn"
"#,
        per_page = DEFAULT_PER_PAGE,
        store_path = default_store_path(),
    )
}
