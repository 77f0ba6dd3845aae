//! Projects page

use serde::Serialize;

use crate::data::ProjectRecord;
use crate::helpers::is_external;

#[derive(Debug, Clone, Serialize)]
pub struct ProjectCard {
    pub title: String,
    pub description: String,
    pub href: Option<String>,
    pub external: bool,
    pub img_src: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct ProjectsPage {
    pub projects: Vec<ProjectCard>,
}

impl ProjectsPage {
    pub fn compose(projects: &[ProjectRecord]) -> Self {
        Self {
            projects: projects
                .iter()
                .map(|p| ProjectCard {
                    title: p.title.clone(),
                    description: p.description.clone(),
                    external: p.href.as_deref().map(is_external).unwrap_or(false),
                    href: p.href.clone(),
                    img_src: p.img_src.clone(),
                })
                .collect(),
        }
    }
}
