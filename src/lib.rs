//! ghost-blog: a personal blog front-end for the Ghost Content API
//!
//! Posts live in Ghost; this crate fetches them per request, works out
//! whether a post belongs to a series (and where), and renders pages with
//! embedded Tera templates.

pub mod commands;
pub mod config;
pub mod content;
pub mod ghost;
pub mod helpers;
pub mod series;
pub mod server;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use ghost::{ContentSource, GhostClient, MemorySource};
use series::SeriesResolver;

/// The blog application
#[derive(Clone)]
pub struct Blog {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
}

impl Blog {
    /// Create a new Blog instance from a directory
    ///
    /// Reads `_config.yml` when present and applies `GHOST_URL` /
    /// `GHOST_API_KEY` from the environment on top.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("_config.yml");

        let mut config = if config_path.exists() {
            tracing::debug!("Loading config from {:?}", config_path);
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };
        config.apply_env();

        Ok(Self { config, base_dir })
    }

    /// Directory served under `/assets`, if configured
    pub fn static_dir(&self) -> Option<PathBuf> {
        self.config
            .static_dir
            .as_ref()
            .map(|dir| self.base_dir.join(dir))
    }

    /// Series resolver built from the `series` config section
    pub fn resolver(&self) -> Result<SeriesResolver> {
        Ok(SeriesResolver::new(&self.config.series)?)
    }

    /// Content source: a fixture file when given, the Ghost API otherwise
    pub fn content_source(&self, fixture: Option<&Path>) -> Result<Arc<dyn ContentSource>> {
        match fixture {
            Some(path) => {
                let path = if path.is_absolute() {
                    path.to_path_buf()
                } else {
                    self.base_dir.join(path)
                };
                tracing::info!("Serving content from fixture {:?}", path);
                Ok(Arc::new(MemorySource::load(&path)?))
            }
            None => {
                let client = GhostClient::new(&self.config.ghost)?;
                tracing::info!("Using Ghost Content API at {}", client.base_url());
                Ok(Arc::new(client))
            }
        }
    }
}
