//! Home page: intro and the most recent posts

use serde::Serialize;

use super::{PostSummary, EMPTY_POSTS};
use crate::config::SiteMetadata;
use crate::content::PostFrontMatter;

/// Posts shown on the home page before the "All Posts" link takes over
pub const MAX_DISPLAY: usize = 3;

/// Card backgrounds, as CSS color stops, cycled by card position
pub const GRADIENTS: [&str; 3] = [
    "#FDE68A, #FCA5A5, #FECACA",
    "#D8B4FE, #818CF8",
    "#6EE7F9, #6EE7B7",
];

/// Gradient for the card at `index`
pub fn gradient_for(index: usize) -> &'static str {
    GRADIENTS[index % GRADIENTS.len()]
}

#[derive(Debug, Clone, Serialize)]
pub struct Hero {
    pub title: String,
    pub description: String,
    pub twitter_handle: Option<String>,
    pub twitter_url: Option<String>,
}

#[derive(Debug, Clone, Serialize)]
pub struct PostCard {
    #[serde(flatten)]
    pub post: PostSummary,
    pub gradient: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct HomePage {
    pub hero: Hero,
    pub cards: Vec<PostCard>,
    /// Set when more posts exist than cards shown
    pub show_view_all: bool,
    pub empty_message: Option<&'static str>,
}

impl HomePage {
    /// Compose the home page from posts sorted newest first
    pub fn compose(posts: &[PostFrontMatter], metadata: &SiteMetadata, max_display: usize) -> Self {
        let cards = posts
            .iter()
            .take(max_display)
            .enumerate()
            .map(|(index, post)| PostCard {
                post: PostSummary::from(post),
                gradient: gradient_for(index),
            })
            .collect();

        Self {
            hero: Hero {
                title: metadata.title.clone(),
                description: metadata.description.clone(),
                twitter_handle: metadata.social.twitter_handle(),
                twitter_url: metadata.social.twitter.clone(),
            },
            cards,
            show_view_all: posts.len() > max_display,
            empty_message: posts.is_empty().then_some(EMPTY_POSTS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ReadTime;
    use chrono::{FixedOffset, TimeZone};
    use std::path::PathBuf;

    fn posts(n: usize) -> Vec<PostFrontMatter> {
        (0..n)
            .map(|i| PostFrontMatter {
                slug: format!("post-{}", i),
                date: FixedOffset::east_opt(0)
                    .unwrap()
                    .with_ymd_and_hms(2024, 1, 28 - i as u32, 0, 0, 0)
                    .unwrap(),
                lastmod: None,
                title: format!("Post {}", i),
                summary: String::new(),
                tags: vec!["art".to_string()],
                read_time: ReadTime::from_words(250),
                draft: false,
                source: PathBuf::from(format!("post-{}.md", i)),
            })
            .collect()
    }

    #[test]
    fn test_few_posts_all_shown() {
        for n in 1..=MAX_DISPLAY {
            let page = HomePage::compose(&posts(n), &SiteMetadata::default(), MAX_DISPLAY);
            assert_eq!(page.cards.len(), n);
            assert!(!page.show_view_all);
            assert!(page.empty_message.is_none());
        }
    }

    #[test]
    fn test_many_posts_truncated() {
        let page = HomePage::compose(&posts(7), &SiteMetadata::default(), MAX_DISPLAY);
        assert_eq!(page.cards.len(), 3);
        assert!(page.show_view_all);
        let slugs: Vec<_> = page.cards.iter().map(|c| c.post.slug.as_str()).collect();
        assert_eq!(slugs, vec!["post-0", "post-1", "post-2"]);
    }

    #[test]
    fn test_empty() {
        let page = HomePage::compose(&[], &SiteMetadata::default(), MAX_DISPLAY);
        assert!(page.cards.is_empty());
        assert!(!page.show_view_all);
        assert_eq!(page.empty_message, Some("No posts found."));
    }

    #[test]
    fn test_gradients_cycle() {
        for i in 0..10 {
            assert_eq!(gradient_for(i), GRADIENTS[i % 3]);
        }
        let page = HomePage::compose(&posts(5), &SiteMetadata::default(), 5);
        for (i, card) in page.cards.iter().enumerate() {
            assert_eq!(card.gradient, GRADIENTS[i % 3]);
        }
    }

    #[test]
    fn test_card_fields() {
        let page = HomePage::compose(&posts(1), &SiteMetadata::default(), MAX_DISPLAY);
        let card = &page.cards[0].post;
        assert_eq!(card.href, "/blog/post-0/");
        assert_eq!(card.read_time, "2 min read");
        assert_eq!(card.tags[0].href, "/tags/art/");
    }
}
