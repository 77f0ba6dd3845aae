//! folio-rs: a static site generator for a personal blog and portfolio
//!
//! Posts are Markdown files with a front-matter header; photos and projects
//! are static YAML lists. A build loads everything once, composes the home
//! feed, gallery, project listing, post, blog and tag pages, and renders them
//! with embedded Tera templates into a static output tree.

pub mod commands;
pub mod config;
pub mod content;
pub mod data;
pub mod error;
pub mod generator;
pub mod helpers;
pub mod pages;
pub mod server;
pub mod templates;

use anyhow::Result;
use chrono_tz::Tz;
use std::path::{Path, PathBuf};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// A site rooted at a base directory
#[derive(Debug, Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Time zone for dates written without an offset
    pub tz: Tz,
    /// Base directory
    pub base_dir: PathBuf,
    /// Content (posts) directory
    pub source_dir: PathBuf,
    /// Static record lists directory
    pub data_dir: PathBuf,
    /// Assets copied verbatim into the output
    pub static_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
}

impl Folio {
    /// Open a site from a directory. A missing `_config.yml` means defaults.
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Self::with_config(base_dir, config)
    }

    /// Open a site with an explicit configuration
    pub fn with_config(base_dir: PathBuf, config: config::SiteConfig) -> Result<Self> {
        let tz = config.tz()?;
        Ok(Self {
            source_dir: base_dir.join(&config.source_dir),
            data_dir: base_dir.join(&config.data_dir),
            static_dir: base_dir.join(&config.static_dir),
            public_dir: base_dir.join(&config.public_dir),
            tz,
            config,
            base_dir,
        })
    }

    /// Generate the static site
    pub fn generate(&self) -> Result<generator::BuildReport> {
        commands::generate::run(self)
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }

    /// Create a new post
    pub fn new_post(&self, title: &str) -> Result<PathBuf> {
        commands::new::create_post(self, title, None, false)
    }
}
