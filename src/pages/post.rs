//! Post detail page

use serde::Serialize;

use super::{PostSummary, TagLink};
use crate::content::Post;
use crate::helpers::{display_date, excerpt};

/// Length of the meta description generated for posts without a summary
const DESCRIPTION_LENGTH: usize = 160;

#[derive(Debug, Clone, Serialize)]
pub struct PostLink {
    pub title: String,
    pub href: String,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostPage {
    pub slug: String,
    pub title: String,
    pub summary: String,
    /// Summary, or an excerpt of the body when the summary is empty
    pub description: String,
    pub date: String,
    pub datetime: String,
    pub lastmod: Option<String>,
    pub read_time: String,
    pub tags: Vec<TagLink>,
    /// Rendered HTML body
    pub content: String,
    /// The next older post
    pub prev: Option<PostLink>,
    /// The next newer post
    pub next: Option<PostLink>,
}

impl PostPage {
    /// Compose the page for `posts[index]`; `posts` is sorted newest first
    pub fn compose(posts: &[Post], index: usize) -> Option<Self> {
        let post = posts.get(index)?;
        let fm = &post.front_matter;
        let summary = PostSummary::from(fm);
        let link = |p: &Post| PostLink {
            title: p.front_matter.title.clone(),
            href: p.front_matter.path(),
        };

        Some(Self {
            slug: summary.slug,
            title: summary.title,
            description: if summary.summary.is_empty() {
                excerpt(&post.content, DESCRIPTION_LENGTH)
            } else {
                summary.summary.clone()
            },
            summary: summary.summary,
            date: summary.date,
            datetime: summary.datetime,
            lastmod: fm.lastmod.as_ref().map(|d| display_date(d)),
            read_time: summary.read_time,
            tags: summary.tags,
            content: post.content.clone(),
            prev: posts.get(index + 1).map(link),
            next: index.checked_sub(1).and_then(|i| posts.get(i)).map(link),
        })
    }
}
