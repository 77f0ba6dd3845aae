//! Page composers
//!
//! Each composer is a pure function from build-time data (posts, static
//! records, site metadata) to a serializable view that a template renders.

pub mod blog;
pub mod feed;
pub mod home;
pub mod photos;
pub mod post;
pub mod projects;

use serde::Serialize;

use crate::config::SiteMetadata;
use crate::content::{tag_slug, PostFrontMatter};
use crate::helpers::{date_xml, display_date, is_external};

pub use blog::{BlogIndex, TagIndex, TagPage};
pub use home::{gradient_for, HomePage, GRADIENTS, MAX_DISPLAY};
pub use photos::PhotoGallery;
pub use post::PostPage;
pub use projects::ProjectsPage;

/// Shown wherever a post list would be empty
pub const EMPTY_POSTS: &str = "No posts found.";

/// A tag rendered as a link to its tag page
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct TagLink {
    pub text: String,
    pub href: String,
}

impl TagLink {
    /// `None` for tags with no URL-safe characters, which get no tag page
    pub fn new(text: &str) -> Option<Self> {
        let slug = tag_slug(text);
        if slug.is_empty() {
            return None;
        }
        Some(Self {
            text: text.to_string(),
            href: format!("/tags/{}/", slug),
        })
    }
}

/// A post as listed on the blog index and tag pages
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub slug: String,
    pub href: String,
    pub title: String,
    pub summary: String,
    pub date: String,
    pub datetime: String,
    pub tags: Vec<TagLink>,
    pub read_time: String,
}

impl From<&PostFrontMatter> for PostSummary {
    fn from(post: &PostFrontMatter) -> Self {
        Self {
            slug: post.slug.clone(),
            href: post.path(),
            title: post.title.clone(),
            summary: post.summary.clone(),
            date: display_date(&post.date),
            datetime: date_xml(&post.date),
            tags: post.tags.iter().filter_map(|t| TagLink::new(t)).collect(),
            read_time: post.read_time.to_string(),
        }
    }
}

/// A link in the header or footer
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct NavLink {
    pub name: String,
    pub href: String,
    pub external: bool,
}

impl NavLink {
    fn new(name: &str, href: &str) -> Self {
        Self {
            name: name.to_string(),
            href: href.to_string(),
            external: is_external(href),
        }
    }
}

/// Site-wide values every layout needs
#[derive(Debug, Clone, Serialize)]
pub struct SiteView {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
    pub url: String,
    pub twitter_handle: Option<String>,
    pub nav: Vec<NavLink>,
    pub social: Vec<NavLink>,
}

impl SiteView {
    pub fn new(metadata: &SiteMetadata) -> Self {
        let nav = vec![
            NavLink::new("Blog", "/blog/"),
            NavLink::new("Projects", "/projects/"),
            NavLink::new("Photos", "/photos/"),
            NavLink::new("Tags", "/tags/"),
        ];

        let social_links = &metadata.social;
        let social = [
            ("Twitter", social_links.twitter.as_deref()),
            ("GitHub", social_links.github.as_deref()),
            ("LinkedIn", social_links.linkedin.as_deref()),
            ("DEV", social_links.devto.as_deref()),
        ]
        .into_iter()
        .filter_map(|(name, href)| href.map(|h| NavLink::new(name, h)))
        .chain(
            social_links
                .email
                .as_deref()
                .map(|e| NavLink::new("Email", &format!("mailto:{}", e))),
        )
        .collect();

        Self {
            title: metadata.title.clone(),
            description: metadata.description.clone(),
            author: metadata.author.clone(),
            language: metadata.language.clone(),
            url: metadata.url.clone(),
            twitter_handle: social_links.twitter_handle(),
            nav,
            social,
        }
    }
}
