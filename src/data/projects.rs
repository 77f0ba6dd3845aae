//! Project listing records

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::path::Path;

/// A project shown on the projects page
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ProjectRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub href: Option<String>,
    #[serde(default, alias = "img_src")]
    pub img_src: Option<String>,
}

impl ProjectRecord {
    pub fn load_all(path: &Path) -> Result<Vec<ProjectRecord>> {
        super::load_records(path)
    }
}
