//! Create a new post

use anyhow::{Context, Result};
use std::fs;
use std::path::PathBuf;

use crate::Folio;

/// Create a new post in the configured collection.
///
/// The file name is `path` when given, otherwise the slugified title.
/// Existing files are never overwritten.
pub fn create_post(folio: &Folio, title: &str, path: Option<&str>, draft: bool) -> Result<PathBuf> {
    let name = match path {
        Some(p) => p.trim_matches('/').trim_end_matches(".md").to_string(),
        None => slug::slugify(title),
    };
    if name.is_empty() {
        anyhow::bail!("Cannot derive a file name from title {:?}", title);
    }

    let file_path = folio
        .source_dir
        .join(&folio.config.collection)
        .join(format!("{}.md", name));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }
    if let Some(parent) = file_path.parent() {
        fs::create_dir_all(parent)
            .with_context(|| format!("Failed to create dir {:?}", parent))?;
    }

    let now = chrono::Utc::now().with_timezone(&folio.tz);
    fs::write(&file_path, scaffold(title, &now.format("%Y-%m-%d %H:%M:%S").to_string(), draft))
        .with_context(|| format!("Failed to write {:?}", file_path))?;

    tracing::info!("Created: {:?}", file_path);
    Ok(file_path)
}

fn scaffold(title: &str, date: &str, draft: bool) -> String {
    // A JSON string is also a valid YAML scalar, which keeps quotes and
    // colons in titles intact
    let title = serde_json::to_string(title).unwrap_or_else(|_| format!("'{}'", title));
    let mut header = format!("---\ntitle: {}\ndate: {}\ntags: []\nsummary: ''\n", title, date);
    if draft {
        header.push_str("draft: true\n");
    }
    header.push_str("---\n\n");
    header
}
