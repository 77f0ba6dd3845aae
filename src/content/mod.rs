//! Content module - posts, front-matter and reading-time estimates

mod frontmatter;
pub mod loader;
mod markdown;
mod post;
mod reading;

pub use frontmatter::{parse_date, FrontMatter};
pub use markdown::MarkdownRenderer;
pub use post::{tag_slug, Post, PostFrontMatter, PostIndex, TagGroup};
pub use reading::{count_words, ReadTime, WORDS_PER_MINUTE};
