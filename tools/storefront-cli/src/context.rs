//! CLI execution context.

use std::path::{Path, PathBuf};

use anyhow::{Context as _, Result};
use storefront_cache::{CollectionStore, FileStore};
use storefront_data::MockCatalog;
use storefront_observability::{SessionId, StructuredLogger};

use crate::config::{StorefrontConfig, CONFIG_FILE_NAMES};
use crate::output::Output;

/// Execution context for CLI commands.
pub struct Context {
    pub config: StorefrontConfig,
    /// Where the config was loaded from, if anywhere.
    pub config_path: Option<PathBuf>,
    pub output: Output,
    pub logger: StructuredLogger,
    pub cwd: PathBuf,
}

impl Context {
    /// Load context from config file.
    pub fn load(config_path: Option<&str>, output: Output, verbose: bool) -> Result<Self> {
        let cwd = std::env::current_dir().context("Failed to get current directory")?;

        let (config, config_path) = if let Some(path) = config_path {
            let path = resolve(&cwd, path);
            (StorefrontConfig::load(&path)?, Some(path))
        } else {
            // Try to find config in current directory or parent directories
            match Self::find_config(&cwd) {
                Some((config, path)) => (config, Some(path)),
                None => (StorefrontConfig::default(), None),
            }
        };

        let level = if verbose {
            storefront_observability::LogLevel::Debug
        } else {
            config.logging.level
        };
        let logger = StructuredLogger::new(SessionId::generate())
            .with_format(config.logging.format)
            .with_min_level(level);

        Ok(Self {
            config,
            config_path,
            output,
            logger,
            cwd,
        })
    }

    /// Find config file in directory tree.
    fn find_config(start: &Path) -> Option<(StorefrontConfig, PathBuf)> {
        let mut current = start.to_path_buf();
        loop {
            for name in &CONFIG_FILE_NAMES {
                let config_path = current.join(name);
                if config_path.exists() {
                    match StorefrontConfig::load(&config_path) {
                        Ok(config) => {
                            tracing::debug!(path = %config_path.display(), "config found");
                            return Some((config, config_path));
                        }
                        Err(e) => {
                            tracing::warn!(path = %config_path.display(), error = %format!("{:#}", e), "skipping unreadable config");
                        }
                    }
                }
            }

            if !current.pop() {
                break;
            }
        }

        None
    }

    /// Tag structured log lines with the running subcommand.
    pub fn for_command(mut self, command: &str) -> Self {
        self.logger = self.logger.with_command(command);
        self
    }

    /// Catalog service per the `[catalog]` section.
    pub async fn catalog(&self) -> Result<MockCatalog> {
        let catalog = match &self.config.catalog.fixtures_dir {
            Some(dir) => {
                let dir = self.resolve_path(dir);
                self.output
                    .debug(&format!("Loading fixtures from {}", dir.display()));
                MockCatalog::from_dir(&dir)
                    .await
                    .with_context(|| format!("Failed to load fixtures from {}", dir.display()))?
            }
            None => MockCatalog::embedded().context("Failed to load embedded fixtures")?,
        };
        Ok(catalog.with_latency(self.config.catalog.latency))
    }

    /// Cart and wishlist store per the `[store]` section.
    pub fn collections(&self) -> Result<CollectionStore<FileStore>> {
        let path = self.resolve_path(&self.config.store.path);
        let store = FileStore::open(&path)
            .with_context(|| format!("Failed to open store at {}", path.display()))?;
        self.output.debug(&format!("Using store {}", path.display()));

        Ok(match &self.config.store.profile {
            Some(profile) => CollectionStore::for_profile(store, profile.clone()),
            None => CollectionStore::new(store),
        })
    }

    /// Resolve a path relative to the config file's directory, or the
    /// working directory when no config file was found.
    pub fn resolve_path(&self, path: &str) -> PathBuf {
        let base = self
            .config_path
            .as_deref()
            .and_then(Path::parent)
            .unwrap_or(self.cwd.as_path());
        resolve(base, path)
    }
}

fn resolve(base: &Path, path: &str) -> PathBuf {
    let path = PathBuf::from(path);
    if path.is_absolute() {
        path
    } else {
        base.join(path)
    }
}
