//! Site configuration (_config.yml)

use anyhow::{anyhow, Context, Result};
use chrono_tz::Tz;
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    #[serde(flatten)]
    pub metadata: SiteMetadata,
    pub timezone: String,

    // Directory
    pub source_dir: String,
    pub data_dir: String,
    pub static_dir: String,
    pub public_dir: String,

    // Writing
    pub collection: String,
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Home page
    #[serde(default)]
    pub home: HomeConfig,

    // Feed
    #[serde(default)]
    pub feed: FeedConfig,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            metadata: SiteMetadata::default(),
            timezone: "UTC".to_string(),

            source_dir: "content".to_string(),
            data_dir: "data".to_string(),
            static_dir: "static".to_string(),
            public_dir: "public".to_string(),

            collection: "blog".to_string(),
            render_drafts: false,
            highlight: HighlightConfig::default(),

            home: HomeConfig::default(),
            feed: FeedConfig::default(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let path = path.as_ref();
        let content =
            fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
        let config: SiteConfig = serde_yaml::from_str(&content)
            .with_context(|| format!("Failed to parse {:?}", path))?;
        config.tz()?;
        Ok(config)
    }

    /// Resolve the configured IANA time zone
    pub fn tz(&self) -> Result<Tz> {
        let name = if self.timezone.trim().is_empty() {
            "UTC"
        } else {
            self.timezone.trim()
        };
        name.parse::<Tz>()
            .map_err(|e| anyhow!("Unknown timezone `{}`: {}", name, e))
    }
}

/// Site-wide metadata shared by every page
///
/// Loaded once per build and handed to each page composer by reference.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteMetadata {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    #[serde(default)]
    pub social: SocialLinks,
}

impl Default for SiteMetadata {
    fn default() -> Self {
        Self {
            title: "Folio".to_string(),
            description: String::new(),
            author: "Jane Doe".to_string(),
            language: "en".to_string(),
            url: "http://example.com".to_string(),
            social: SocialLinks::default(),
        }
    }
}

/// Social profile links shown in the header and footer
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
#[serde(default)]
pub struct SocialLinks {
    pub twitter: Option<String>,
    pub github: Option<String>,
    pub linkedin: Option<String>,
    pub devto: Option<String>,
    pub email: Option<String>,
}

impl SocialLinks {
    /// Twitter handle derived from the profile URL (e.g. `@emsesc`)
    pub fn twitter_handle(&self) -> Option<String> {
        let url = self.twitter.as_deref()?;
        let handle = url.trim_end_matches('/').rsplit('/').next()?;
        if handle.is_empty() {
            None
        } else {
            Some(format!("@{}", handle.trim_start_matches('@')))
        }
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    pub enable: bool,
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            enable: true,
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// Home page configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HomeConfig {
    pub max_display: usize,
}

impl Default for HomeConfig {
    fn default() -> Self {
        Self {
            max_display: crate::pages::MAX_DISPLAY,
        }
    }
}

/// Atom feed configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FeedConfig {
    pub enable: bool,
    pub limit: usize,
}

impl Default for FeedConfig {
    fn default() -> Self {
        Self {
            enable: true,
            limit: 20,
        }
    }
}
