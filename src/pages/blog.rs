//! Blog index and tag pages

use serde::Serialize;

use super::{PostSummary, TagLink, EMPTY_POSTS};
use crate::content::{PostFrontMatter, PostIndex, TagGroup};

/// Every post, newest first
#[derive(Debug, Clone, Serialize)]
pub struct BlogIndex {
    pub title: String,
    pub posts: Vec<PostSummary>,
    pub empty_message: Option<&'static str>,
}

impl BlogIndex {
    pub fn compose(posts: &[PostFrontMatter]) -> Self {
        Self {
            title: "All Posts".to_string(),
            posts: posts.iter().map(PostSummary::from).collect(),
            empty_message: posts.is_empty().then_some(EMPTY_POSTS),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TagCount {
    #[serde(flatten)]
    pub tag: TagLink,
    pub count: usize,
}

/// All tags with their post counts, alphabetical by slug
#[derive(Debug, Clone, Serialize)]
pub struct TagIndex {
    pub tags: Vec<TagCount>,
}

impl TagIndex {
    pub fn compose(index: &PostIndex) -> Self {
        Self {
            tags: index
                .tags()
                .values()
                .filter_map(|group| {
                    Some(TagCount {
                        tag: TagLink::new(&group.name)?,
                        count: group.posts.len(),
                    })
                })
                .collect(),
        }
    }
}

/// Posts carrying one tag
#[derive(Debug, Clone, Serialize)]
pub struct TagPage {
    pub slug: String,
    pub name: String,
    pub posts: Vec<PostSummary>,
}

impl TagPage {
    pub fn compose(slug: &str, group: &TagGroup<'_>) -> Self {
        Self {
            slug: slug.to_string(),
            name: group.name.clone(),
            posts: group.posts.iter().map(|p| PostSummary::from(*p)).collect(),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ReadTime;
    use chrono::{FixedOffset, TimeZone};
    use std::path::PathBuf;

    fn post(slug: &str, day: u32, tags: &[&str]) -> PostFrontMatter {
        PostFrontMatter {
            slug: slug.to_string(),
            date: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2022, 5, day, 0, 0, 0)
                .unwrap(),
            lastmod: None,
            title: slug.to_string(),
            summary: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            read_time: ReadTime::from_words(10),
            draft: false,
            source: PathBuf::from(format!("{}.md", slug)),
        }
    }

    #[test]
    fn test_blog_index_lists_everything() {
        let index = PostIndex::new((1..=5).map(|d| post(&format!("p{}", d), d, &[])).collect());
        let page = BlogIndex::compose(index.as_slice());
        assert_eq!(page.posts.len(), 5);
        assert_eq!(page.posts[0].slug, "p5");
        assert!(page.empty_message.is_none());
        assert_eq!(BlogIndex::compose(&[]).empty_message, Some("No posts found."));
    }

    #[test]
    fn test_tag_index_and_pages() {
        let index = PostIndex::new(vec![
            post("a", 1, &["rust", "Web Dev", "!!!"]),
            post("b", 2, &["rust"]),
        ]);
        let tags = TagIndex::compose(&index);
        let counts: Vec<_> = tags.tags.iter().map(|t| (t.tag.text.as_str(), t.count)).collect();
        assert_eq!(counts, vec![("rust", 2), ("Web Dev", 1)]);

        let groups = index.tags();
        let page = TagPage::compose("web-dev", &groups["web-dev"]);
        assert_eq!(page.name, "Web Dev");
        assert_eq!(page.posts.len(), 1);
        assert_eq!(page.posts[0].slug, "a");
    }
}
