//! advent-rs: content access for Advent-style daily challenge sites
//!
//! This crate loads a directory of `day-<N>.md` markdown articles with YAML
//! front matter, caches them in memory, and serves lookups, neighbor
//! queries and a calendar progress summary to a consuming site generator.

pub mod commands;
pub mod config;
pub mod content;

use anyhow::Result;
use chrono_tz::Tz;
use std::path::{Path, PathBuf};

use content::{ContentStore, StaticImageResolver};

/// The main Advent application
#[derive(Clone)]
pub struct Advent {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content directory
    pub content_dir: PathBuf,
}

impl Advent {
    /// Create a new Advent instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join("advent.yml");

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        let content_dir = base_dir.join(&config.content_dir);

        Ok(Self {
            config,
            base_dir,
            content_dir,
        })
    }

    /// Build a content store over the configured content directory
    pub fn store(&self) -> ContentStore {
        let resolver =
            StaticImageResolver::new(&self.config.images.dir, &self.config.images.extension);
        ContentStore::with_resolver(&self.content_dir, self.config.cache.ttl, Box::new(resolver))
    }

    /// Configured timezone for calendar arithmetic
    pub fn timezone(&self) -> Tz {
        self.config.timezone()
    }
}
