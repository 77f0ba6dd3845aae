//! Content loader - reads a post collection from the source directory

use chrono_tz::Tz;
use std::collections::HashMap;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use super::{FrontMatter, MarkdownRenderer, Post, PostFrontMatter, PostIndex, ReadTime};
use crate::error::ContentError;
use crate::Folio;

const MARKDOWN_EXTENSIONS: [&str; 3] = ["md", "markdown", "mdx"];

/// Loads post collections from `<source_dir>/<collection>/`
pub struct ContentLoader<'a> {
    folio: &'a Folio,
    tz: Tz,
}

impl<'a> ContentLoader<'a> {
    pub fn new(folio: &'a Folio) -> Self {
        Self {
            folio,
            tz: folio.tz,
        }
    }

    /// Directory holding a collection's content files
    pub fn collection_dir(&self, collection: &str) -> PathBuf {
        self.folio.source_dir.join(collection)
    }

    /// Load the front-matter of every post in a collection, newest first.
    ///
    /// Any file with a missing or malformed required field fails the whole
    /// load. A missing collection directory is an empty collection.
    pub fn load_front_matter(&self, collection: &str) -> Result<PostIndex, ContentError> {
        let posts = self
            .read_collection(collection)?
            .into_iter()
            .map(|(fm, _)| fm)
            .collect();
        Ok(PostIndex::new(posts))
    }

    /// Load every post with its rendered body, in the same order as
    /// [`ContentLoader::load_front_matter`].
    pub fn load_posts(&self, collection: &str) -> Result<Vec<Post>, ContentError> {
        let renderer = MarkdownRenderer::with_config(&self.folio.config.highlight);
        let mut bodies: HashMap<String, String> = HashMap::new();
        let mut records = Vec::new();
        for (fm, body) in self.read_collection(collection)? {
            bodies.insert(fm.slug.clone(), body);
            records.push(fm);
        }

        let index = PostIndex::new(records);
        let posts = index
            .iter()
            .map(|fm| {
                let raw = bodies.remove(&fm.slug).unwrap_or_default();
                let content = renderer.render(&raw);
                Post {
                    front_matter: fm.clone(),
                    raw,
                    content,
                }
            })
            .collect();
        Ok(posts)
    }

    fn read_collection(
        &self,
        collection: &str,
    ) -> Result<Vec<(PostFrontMatter, String)>, ContentError> {
        let dir = self.collection_dir(collection);
        if !dir.is_dir() {
            tracing::info!("Collection `{}` has no directory at {:?}", collection, dir);
            return Ok(Vec::new());
        }

        let mut seen: HashMap<String, PathBuf> = HashMap::new();
        let mut records = Vec::new();

        for path in content_files(&dir)? {
            let (fm, body) = self.read_post(&dir, &path)?;

            if fm.draft && !self.folio.config.render_drafts {
                tracing::debug!("Skipping draft {:?}", path);
                continue;
            }
            if let Some(first) = seen.insert(fm.slug.clone(), path.clone()) {
                return Err(ContentError::DuplicateSlug {
                    slug: fm.slug,
                    first,
                    second: path,
                });
            }

            tracing::debug!("Loaded post `{}` from {:?}", fm.slug, path);
            records.push((fm, body));
        }

        tracing::info!("Loaded {} posts from `{}`", records.len(), collection);
        Ok(records)
    }

    fn read_post(&self, dir: &Path, path: &Path) -> Result<(PostFrontMatter, String), ContentError> {
        let content = fs::read_to_string(path).map_err(|source| ContentError::Io {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(path, &content)?;

        let title = fm.require_title(path)?;
        let date = fm.require_date(path, self.tz)?;
        let lastmod = fm.lastmod(path, self.tz)?;

        let record = PostFrontMatter {
            slug: slug_for(dir, path),
            date,
            lastmod,
            title,
            summary: fm.summary.unwrap_or_default().trim().to_string(),
            tags: fm
                .tags
                .into_iter()
                .map(|t| t.trim().to_string())
                .filter(|t| !t.is_empty())
                .collect(),
            read_time: ReadTime::from_markdown(body),
            draft: fm.draft,
            source: path.to_path_buf(),
        };
        Ok((record, body.to_string()))
    }
}

/// Markdown files under `dir`, in file-name order so that ties sort stably
fn content_files(dir: &Path) -> Result<Vec<PathBuf>, ContentError> {
    let mut files = Vec::new();
    for entry in WalkDir::new(dir).follow_links(true).sort_by_file_name() {
        let entry = entry.map_err(|e| ContentError::Io {
            path: e.path().map(Path::to_path_buf).unwrap_or_else(|| dir.to_path_buf()),
            source: e.into(),
        })?;
        let path = entry.path();
        let hidden = entry.file_name().to_string_lossy().starts_with('.');
        if entry.file_type().is_file() && !hidden && is_markdown_file(path) {
            files.push(path.to_path_buf());
        }
    }
    Ok(files)
}

/// Check if a file is a markdown file
fn is_markdown_file(path: &Path) -> bool {
    path.extension()
        .and_then(|e| e.to_str())
        .map(|e| MARKDOWN_EXTENSIONS.contains(&e))
        .unwrap_or(false)
}

/// Slug from the path relative to the collection, without extension
fn slug_for(dir: &Path, path: &Path) -> String {
    let relative = path.strip_prefix(dir).unwrap_or(path).with_extension("");
    relative
        .components()
        .map(|c| c.as_os_str().to_string_lossy())
        .collect::<Vec<_>>()
        .join("/")
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    fn site_with_posts(posts: &[(&str, String)]) -> (tempfile::TempDir, Folio) {
        let dir = tempfile::tempdir().unwrap();
        let blog = dir.path().join("content/blog");
        for (name, content) in posts {
            let path = blog.join(name);
            fs::create_dir_all(path.parent().unwrap()).unwrap();
            fs::write(path, content).unwrap();
        }
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    fn post(title: &str, date: &str) -> String {
        format!(
            "---\ntitle: {}\ndate: '{}'\ntags: [art, code]\nsummary: About {}\n---\n\nSome body text here.\n",
            title, date, title
        )
    }

    #[test]
    fn test_sorted_by_date_descending() {
        let (_dir, folio) = site_with_posts(&[
            ("old.md", post("Old", "2020-01-01")),
            ("new.md", post("New", "2023-06-01")),
            ("mid.mdx", post("Mid", "2021-03-15")),
        ]);
        let index = ContentLoader::new(&folio).load_front_matter("blog").unwrap();
        let slugs: Vec<_> = index.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["new", "mid", "old"]);
        for pair in index.as_slice().windows(2) {
            assert!(pair[0].date >= pair[1].date);
        }
    }

    #[test]
    fn test_fields_and_read_time() {
        let (_dir, folio) = site_with_posts(&[("hello.md", post("Hello", "2021-08-07"))]);
        let index = ContentLoader::new(&folio).load_front_matter("blog").unwrap();
        let hello = index.get("hello").unwrap();
        assert_eq!(hello.title, "Hello");
        assert_eq!(hello.summary, "About Hello");
        assert_eq!(hello.tags, vec!["art", "code"]);
        assert_eq!(hello.read_time.words, 4);
        assert_eq!(hello.read_time.to_string(), "1 min read");
    }

    #[test]
    fn test_nested_slugs_are_unique_and_non_empty() {
        let (_dir, folio) = site_with_posts(&[
            ("2021/intro.md", post("Intro 2021", "2021-01-01")),
            ("2022/intro.md", post("Intro 2022", "2022-01-01")),
        ]);
        let index = ContentLoader::new(&folio).load_front_matter("blog").unwrap();
        let slugs: Vec<_> = index.iter().map(|p| p.slug.clone()).collect();
        assert_eq!(slugs, vec!["2022/intro", "2021/intro"]);
        assert!(slugs.iter().all(|s| !s.is_empty()));
    }

    #[test]
    fn test_missing_title_fails_with_file() {
        let (_dir, folio) = site_with_posts(&[
            ("good.md", post("Good", "2021-01-01")),
            ("bad.md", "---\ndate: 2021-01-01\n---\nbody".to_string()),
        ]);
        let err = ContentLoader::new(&folio).load_front_matter("blog").unwrap_err();
        assert!(matches!(err, ContentError::MissingField { field: "title", .. }));
        assert!(err.path().ends_with("bad.md"));
    }

    #[test]
    fn test_duplicate_slug_fails() {
        let (_dir, folio) = site_with_posts(&[
            ("same.md", post("One", "2021-01-01")),
            ("same.mdx", post("Two", "2021-01-02")),
        ]);
        let err = ContentLoader::new(&folio).load_front_matter("blog").unwrap_err();
        assert!(matches!(err, ContentError::DuplicateSlug { .. }));
    }

    #[test]
    fn test_drafts_are_skipped() {
        let draft = "---\ntitle: WIP\ndate: 2021-01-01\ndraft: true\n---\nbody";
        let (_dir, folio) = site_with_posts(&[
            ("wip.md", draft.to_string()),
            ("done.md", post("Done", "2020-01-01")),
        ]);
        let index = ContentLoader::new(&folio).load_front_matter("blog").unwrap();
        assert_eq!(index.len(), 1);
        assert!(index.get("wip").is_none());
    }

    #[test]
    fn test_ties_keep_file_name_order() {
        let (_dir, folio) = site_with_posts(&[
            ("b.md", post("B", "2021-01-01")),
            ("a.md", post("A", "2021-01-01")),
            ("c.md", post("C", "2021-01-01")),
        ]);
        let index = ContentLoader::new(&folio).load_front_matter("blog").unwrap();
        let slugs: Vec<_> = index.iter().map(|p| p.slug.as_str()).collect();
        assert_eq!(slugs, vec!["a", "b", "c"]);
    }

    #[test]
    fn test_missing_collection_is_empty() {
        let (_dir, folio) = site_with_posts(&[]);
        let index = ContentLoader::new(&folio).load_front_matter("blog").unwrap();
        assert!(index.is_empty());
    }

    #[test]
    fn test_load_posts_renders_bodies() {
        let (_dir, folio) = site_with_posts(&[
            ("a.md", post("A", "2021-01-01")),
            ("b.md", post("B", "2022-01-01")),
        ]);
        let posts = ContentLoader::new(&folio).load_posts("blog").unwrap();
        assert_eq!(posts.len(), 2);
        assert_eq!(posts[0].front_matter.slug, "b");
        assert!(posts[0].content.contains("<p>Some body text here.</p>"));
    }
}
