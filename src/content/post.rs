//! Post models

use chrono::{DateTime, FixedOffset};
use serde::Serialize;
use std::collections::BTreeMap;
use std::path::PathBuf;

use super::ReadTime;

/// Metadata of a blog post, resolved at build time
#[derive(Debug, Clone, Serialize)]
pub struct PostFrontMatter {
    /// URL-safe identifier, derived from the file path
    pub slug: String,

    /// Publication date
    pub date: DateTime<FixedOffset>,

    /// Last modification date, if the author recorded one
    pub lastmod: Option<DateTime<FixedOffset>>,

    pub title: String,

    pub summary: String,

    /// Tags in the order the author wrote them
    pub tags: Vec<String>,

    /// Estimated reading time of the body
    pub read_time: ReadTime,

    pub draft: bool,

    /// Source file the record was parsed from
    #[serde(skip)]
    pub source: PathBuf,
}

impl PostFrontMatter {
    /// Route of the post detail page
    pub fn path(&self) -> String {
        format!("/blog/{}/", self.slug)
    }
}

/// A post with its body, used by the detail page
#[derive(Debug, Clone, Serialize)]
pub struct Post {
    #[serde(flatten)]
    pub front_matter: PostFrontMatter,

    /// Raw markdown body
    pub raw: String,

    /// Rendered HTML body
    pub content: String,
}

/// Sorted posts of one collection.
///
/// Newest first; posts with identical dates keep file-name order. The index
/// can be iterated any number of times.
#[derive(Debug, Clone, Default)]
pub struct PostIndex {
    posts: Vec<PostFrontMatter>,
}

impl PostIndex {
    /// Build an index, sorting by date descending
    pub fn new(mut posts: Vec<PostFrontMatter>) -> Self {
        // sort_by is stable, so ties keep insertion order
        posts.sort_by(|a, b| b.date.cmp(&a.date));
        Self { posts }
    }

    pub fn iter(&self) -> std::slice::Iter<'_, PostFrontMatter> {
        self.posts.iter()
    }

    pub fn len(&self) -> usize {
        self.posts.len()
    }

    pub fn is_empty(&self) -> bool {
        self.posts.is_empty()
    }

    pub fn as_slice(&self) -> &[PostFrontMatter] {
        &self.posts
    }

    pub fn get(&self, slug: &str) -> Option<&PostFrontMatter> {
        self.posts.iter().find(|p| p.slug == slug)
    }

    /// Tags with the posts carrying them, keyed by tag slug
    pub fn tags(&self) -> BTreeMap<String, TagGroup<'_>> {
        let mut groups: BTreeMap<String, TagGroup<'_>> = BTreeMap::new();
        for post in &self.posts {
            for tag in &post.tags {
                let group = groups
                    .entry(tag_slug(tag))
                    .or_insert_with(|| TagGroup {
                        name: tag.clone(),
                        posts: Vec::new(),
                    });
                // A post listing the same tag twice appears once
                if !group.posts.iter().any(|p| p.slug == post.slug) {
                    group.posts.push(post);
                }
            }
        }
        groups
    }
}

impl<'a> IntoIterator for &'a PostIndex {
    type Item = &'a PostFrontMatter;
    type IntoIter = std::slice::Iter<'a, PostFrontMatter>;

    fn into_iter(self) -> Self::IntoIter {
        self.posts.iter()
    }
}

/// Posts sharing one tag, newest first
#[derive(Debug, Clone)]
pub struct TagGroup<'a> {
    /// Tag text as first written
    pub name: String,
    pub posts: Vec<&'a PostFrontMatter>,
}

/// URL segment for a tag
pub fn tag_slug(tag: &str) -> String {
    slug::slugify(tag)
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::TimeZone;

    fn post(slug: &str, day: u32, tags: &[&str]) -> PostFrontMatter {
        PostFrontMatter {
            slug: slug.to_string(),
            date: FixedOffset::east_opt(0)
                .unwrap()
                .with_ymd_and_hms(2024, 1, day, 0, 0, 0)
                .unwrap(),
            lastmod: None,
            title: slug.to_uppercase(),
            summary: String::new(),
            tags: tags.iter().map(|t| t.to_string()).collect(),
            read_time: ReadTime::from_words(100),
            draft: false,
            source: PathBuf::from(format!("{}.md", slug)),
        }
    }

    #[test]
    fn test_index_sorted_newest_first() {
        let index = PostIndex::new(vec![post("a", 1, &[]), post("b", 3, &[]), post("c", 2, &[])]);
        let slugs: Vec<_> = index.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["b", "c", "a"]);
        for pair in index.as_slice().windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_ties_keep_insertion_order() {
        let index = PostIndex::new(vec![post("x", 5, &[]), post("y", 5, &[]), post("z", 5, &[])]);
        let slugs: Vec<_> = index.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["x", "y", "z"]);
    }

    #[test]
    fn test_index_is_restartable() {
        let index = PostIndex::new(vec![post("a", 1, &[]), post("b", 2, &[])]);
        let first: Vec<_> = index.iter().map(|p| p.slug.clone()).collect();
        let second: Vec<_> = (&index).into_iter().map(|p| p.slug.clone()).collect();
        assert_eq!(first, second);
    }

    #[test]
    fn test_tag_groups() {
        let index = PostIndex::new(vec![
            post("a", 1, &["Next JS", "art"]),
            post("b", 2, &["art", "art"]),
        ]);
        let tags = index.tags();
        assert_eq!(tags.len(), 2);
        let art = &tags["art"];
        assert_eq!(art.posts.len(), 2);
        assert_eq!(art.posts[0].slug, "b");
        assert_eq!(tags["next-js"].name, "Next JS");
        assert_eq!(index.get("a").map(|p| p.path()), Some("/blog/a/".to_string()));
    }
}
