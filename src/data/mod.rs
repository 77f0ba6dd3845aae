//! Static record lists (photos, projects) kept under the data directory

mod photos;
mod projects;

pub use photos::PhotoRecord;
pub use projects::ProjectRecord;

use anyhow::{Context, Result};
use serde::de::DeserializeOwned;
use std::fs;
use std::path::Path;

/// Load a YAML list of records. A missing file is an empty list.
pub fn load_records<T: DeserializeOwned>(path: &Path) -> Result<Vec<T>> {
    if !path.exists() {
        tracing::debug!("No data file at {:?}", path);
        return Ok(Vec::new());
    }
    let content =
        fs::read_to_string(path).with_context(|| format!("Failed to read {:?}", path))?;
    if content.trim().is_empty() {
        return Ok(Vec::new());
    }
    serde_yaml::from_str(&content).with_context(|| format!("Failed to parse {:?}", path))
}
