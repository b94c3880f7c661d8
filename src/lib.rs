#![allow(clippy::too_many_arguments)]

// Re-export modules
pub mod config;
pub mod crawlers;
pub mod error;
pub mod filter;
pub mod ordered;
pub mod parsers;
pub mod profile;
pub mod results;
pub mod server;
pub mod store;
pub mod utils;
pub mod viewer;
pub mod views;
#[cfg(feature = "window")]
pub mod window;

#[cfg(test)]
mod fixtures;

// Re-export commonly used types for convenience
pub use config::CrawlerConfig;
pub use error::{CrawlError, Result};
pub use results::{ProfileRecord, Snapshot};

use crawlers::{CrawlEngine, PageSource, Source};
use error::StoreError;
use std::path::Path;
use store::SnapshotStore;

/// Main builder for crawling profiles and caching the snapshot
#[derive(Debug, Clone, Default)]
pub struct Crawl {
    config: CrawlerConfig,
}

impl Crawl {
    /// Create a new Crawl with the given configuration
    pub fn new(config: CrawlerConfig) -> Self {
        Self { config }
    }

    /// Load configuration from a file
    pub fn from_config_file(path: impl AsRef<Path>) -> Result<Self> {
        Ok(Self::new(CrawlerConfig::from_file(path)?))
    }

    /// Load configuration from a string
    pub fn from_config_str(config_str: &str) -> Result<Self> {
        Ok(Self::new(CrawlerConfig::from_json(config_str)?))
    }

    /// Set the name the crawl starts from
    pub fn with_seed(mut self, seed: &str) -> Self {
        self.config.seed = seed.to_string();
        self
    }

    /// Set where the snapshot is stored
    pub fn with_snapshot_path(mut self, path: &str) -> Self {
        self.config.snapshot_path = path.to_string();
        self
    }

    /// Stop after this many profiles
    pub fn with_max_profiles(mut self, max_profiles: usize) -> Self {
        self.config.max_profiles = Some(max_profiles);
        self
    }

    pub fn config(&self) -> &CrawlerConfig {
        &self.config
    }

    pub fn store(&self) -> SnapshotStore {
        SnapshotStore::new(&self.config.snapshot_path)
    }

    /// Crawl from the seed with the configured backend and save the snapshot
    pub async fn run(&self) -> Result<Snapshot> {
        let source = Source::from_config(&self.config);
        let result = self.run_with(&source).await;
        source.close().await;
        result
    }

    /// Crawl using the given source and save the snapshot.
    ///
    /// Nothing is written if the crawl fails.
    pub async fn run_with<S: PageSource>(&self, source: &S) -> Result<Snapshot> {
        let engine = CrawlEngine::new(source, &self.config)?;
        let snapshot = engine.crawl(&self.config.seed).await?;
        self.store().save(&snapshot)?;
        Ok(snapshot)
    }

    /// Load the saved snapshot, crawling first if there is none
    pub async fn load_or_run(&self) -> Result<Snapshot> {
        match self.store().load() {
            Ok(snapshot) => Ok(snapshot),
            Err(StoreError::NotFound(path)) => {
                ::log::info!("No snapshot at {}, crawling from {}", path, self.config.seed);
                self.run().await
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Same as [`Crawl::load_or_run`] with an explicit source
    pub async fn load_or_run_with<S: PageSource>(&self, source: &S) -> Result<Snapshot> {
        match self.store().load() {
            Ok(snapshot) => Ok(snapshot),
            Err(StoreError::NotFound(path)) => {
                ::log::info!("No snapshot at {}, crawling from {}", path, self.config.seed);
                self.run_with(source).await
            }
            Err(e) => Err(e.into()),
        }
    }
}
