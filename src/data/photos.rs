//! Photo gallery records

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

/// One photo collection shown as a gallery tile
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct PhotoRecord {
    pub title: String,
    #[serde(alias = "img_src")]
    pub img_src: String,
    pub slug: String,
}

impl PhotoRecord {
    /// Load the photo list in declaration order.
    ///
    /// Slugs should be unique; duplicates are reported but kept.
    pub fn load_all(path: &Path) -> Result<Vec<PhotoRecord>> {
        let photos: Vec<PhotoRecord> = super::load_records(path)?;
        let mut seen = HashSet::new();
        for photo in &photos {
            if !seen.insert(photo.slug.as_str()) {
                tracing::warn!("Duplicate photo slug `{}` in {:?}", photo.slug, path);
            }
        }
        Ok(photos)
    }
}
