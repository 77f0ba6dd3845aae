//! Generator module - composes every route and writes the static output tree

use anyhow::{Context, Result};
use serde::Serialize;
use std::fs;
use std::path::Path;
use walkdir::WalkDir;

use crate::content::loader::ContentLoader;
use crate::content::{Post, PostIndex};
use crate::data::{PhotoRecord, ProjectRecord};
use crate::helpers::{output_file, route};
use crate::pages::feed::{atom_feed, FEED_PATH};
use crate::pages::{
    BlogIndex, HomePage, PhotoGallery, PostPage, ProjectsPage, SiteView, TagIndex, TagPage,
};
use crate::templates::{TemplateRenderer, STYLESHEET};
use crate::Folio;

/// What a build produced
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BuildReport {
    pub posts: usize,
    pub photos: usize,
    pub projects: usize,
    pub tags: usize,
    /// Documents written, including the feed
    pub documents: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    folio: Folio,
    renderer: TemplateRenderer,
    site: SiteView,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            folio: folio.clone(),
            renderer: TemplateRenderer::new()?,
            site: SiteView::new(&folio.config.metadata),
        })
    }

    /// Load all content and generate the entire site.
    ///
    /// Content is fully loaded before anything is written, so a malformed
    /// post leaves the previous output untouched.
    pub fn generate(&self) -> Result<BuildReport> {
        let collection = &self.folio.config.collection;
        let posts = ContentLoader::new(&self.folio)
            .load_posts(collection)
            .context("Failed to load posts")?;
        let photos = PhotoRecord::load_all(&self.folio.data_dir.join("photos.yml"))?;
        let projects = ProjectRecord::load_all(&self.folio.data_dir.join("projects.yml"))?;

        self.generate_from(&posts, &photos, &projects)
    }

    /// Generate the site from already loaded content
    pub fn generate_from(
        &self,
        posts: &[Post],
        photos: &[PhotoRecord],
        projects: &[ProjectRecord],
    ) -> Result<BuildReport> {
        fs::create_dir_all(&self.folio.public_dir)
            .with_context(|| format!("Failed to create {:?}", self.folio.public_dir))?;

        let index = PostIndex::new(posts.iter().map(|p| p.front_matter.clone()).collect());
        let mut report = BuildReport {
            posts: posts.len(),
            photos: photos.len(),
            projects: projects.len(),
            ..Default::default()
        };

        self.write_file("css/style.css", STYLESHEET)?;
        report.assets = self.copy_static_assets()?;

        let config = &self.folio.config;
        let home = HomePage::compose(index.as_slice(), &config.metadata, config.home.max_display);
        self.write_page("/", "home.html", &home)?;
        self.write_page("/photos/", "photos.html", &PhotoGallery::compose(photos))?;
        self.write_page("/projects/", "projects.html", &ProjectsPage::compose(projects))?;
        self.write_page("/blog/", "blog.html", &BlogIndex::compose(index.as_slice()))?;
        report.documents += 4;

        for (i, post) in posts.iter().enumerate() {
            if let Some(page) = PostPage::compose(posts, i) {
                self.write_page(&post.front_matter.path(), "post.html", &page)?;
                report.documents += 1;
            }
        }

        report.tags = self.generate_tag_pages(&index)?;
        report.documents += report.tags + 1;

        if config.feed.enable {
            let feed = atom_feed(posts, &config.metadata, config.feed.limit);
            self.write_file(&output_file(FEED_PATH), &feed)?;
            report.documents += 1;
        }

        tracing::info!(
            "Generated {} documents ({} posts, {} photos, {} projects, {} tags)",
            report.documents,
            report.posts,
            report.photos,
            report.projects,
            report.tags
        );
        Ok(report)
    }

    /// Generate the tag index and one page per tag; returns the tag count
    fn generate_tag_pages(&self, index: &PostIndex) -> Result<usize> {
        self.write_page("/tags/", "tags.html", &TagIndex::compose(index))?;

        let groups = index.tags();
        for (slug, group) in &groups {
            if slug.is_empty() {
                tracing::warn!("Skipping tag `{}` with an empty slug", group.name);
                continue;
            }
            let page = TagPage::compose(slug, group);
            self.write_page(&route(&format!("tags/{}", slug)), "tag.html", &page)?;
        }
        Ok(groups.keys().filter(|s| !s.is_empty()).count())
    }

    fn write_page<T: Serialize>(&self, path: &str, template: &str, page: &T) -> Result<()> {
        let html = self.renderer.render_page(
            template,
            &self.site,
            path,
            self.folio.config.feed.enable,
            page,
        )?;
        self.write_file(&output_file(path), &html)
    }

    fn write_file(&self, relative: &str, content: &str) -> Result<()> {
        let output_path = self.folio.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .with_context(|| format!("Failed to create dir {:?}", parent))?;
        }
        fs::write(&output_path, content)
            .with_context(|| format!("Failed to write {:?}", output_path))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }

    /// Copy static assets (images, etc.) to the public directory
    fn copy_static_assets(&self) -> Result<usize> {
        let static_dir = &self.folio.static_dir;
        if !static_dir.is_dir() {
            return Ok(0);
        }

        let mut copied = 0;
        for entry in WalkDir::new(static_dir).follow_links(true) {
            let entry = entry?;
            let path = entry.path();
            if !entry.file_type().is_file() || is_ignored(path) {
                continue;
            }

            let relative = path.strip_prefix(static_dir)?;
            let dest = self.folio.public_dir.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest).with_context(|| format!("Failed to copy {:?}", path))?;
            copied += 1;
        }

        tracing::debug!("Copied {} static assets", copied);
        Ok(copied)
    }
}

fn is_ignored(path: &Path) -> bool {
    path.file_name()
        .and_then(|n| n.to_str())
        .map(|n| n == ".DS_Store" || n.ends_with('~'))
        .unwrap_or(false)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::{PostFrontMatter, ReadTime};
    use chrono::{FixedOffset, TimeZone};
    use std::path::PathBuf;

    fn post(slug: &str, day: u32, tags: &[&str]) -> Post {
        Post {
            front_matter: PostFrontMatter {
                slug: slug.to_string(),
                date: FixedOffset::east_opt(0)
                    .unwrap()
                    .with_ymd_and_hms(2022, 2, day, 0, 0, 0)
                    .unwrap(),
                lastmod: None,
                title: format!("Title {}", slug),
                summary: format!("Summary {}", slug),
                tags: tags.iter().map(|t| t.to_string()).collect(),
                read_time: ReadTime::from_words(600),
                draft: false,
                source: PathBuf::from(format!("{}.md", slug)),
            },
            raw: String::new(),
            content: format!("<p>Body of {}</p>", slug),
        }
    }

    fn generator() -> (tempfile::TempDir, Generator) {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        let generator = Generator::new(&folio).unwrap();
        (dir, generator)
    }

    fn read(dir: &tempfile::TempDir, relative: &str) -> String {
        fs::read_to_string(dir.path().join("public").join(relative)).unwrap()
    }

    #[test]
    fn test_home_with_few_posts() {
        let (dir, generator) = generator();
        let posts = vec![post("b", 2, &[]), post("a", 1, &[])];
        generator.generate_from(&posts, &[], &[]).unwrap();

        let home = read(&dir, "index.html");
        assert_eq!(home.matches(r#"class="post-card""#).count(), 2);
        assert!(!home.contains("All Posts &rarr;"));
        assert!(!home.contains("No posts found."));
        assert!(home.contains("3 min read"));
    }

    #[test]
    fn test_home_with_many_posts() {
        let (dir, generator) = generator();
        let posts: Vec<_> = (1..=5).rev().map(|d| post(&format!("p{}", d), d, &["art"])).collect();
        let report = generator.generate_from(&posts, &[], &[]).unwrap();

        let home = read(&dir, "index.html");
        assert_eq!(home.matches(r#"class="post-card""#).count(), 3);
        assert!(home.contains(r#"<a href="/blog/" aria-label="all posts">All Posts &rarr;</a>"#));
        assert!(home.contains(r#"data-slug="p5""#));
        assert!(!home.contains(r#"data-slug="p2""#));

        let blog = read(&dir, "blog/index.html");
        assert_eq!(blog.matches(r#"class="post-item""#).count(), 5);

        assert!(read(&dir, "blog/p3/index.html").contains("<p>Body of p3</p>"));
        assert!(read(&dir, "tags/art/index.html").contains("Title p1"));
        assert_eq!(report.posts, 5);
        assert_eq!(report.tags, 1);
    }

    #[test]
    fn test_tags_without_slug_are_not_linked() {
        let (dir, generator) = generator();
        let posts = vec![post("a", 1, &["!!!", "art"])];
        let report = generator.generate_from(&posts, &[], &[]).unwrap();

        for page in ["index.html", "blog/index.html", "blog/a/index.html", "tags/index.html"] {
            let html = read(&dir, page);
            assert!(!html.contains("/tags//"), "{}", page);
            assert!(html.contains(r#"href="/tags/art/""#), "{}", page);
        }
        assert_eq!(report.tags, 1);
    }

    #[test]
    fn test_gradients_follow_card_position() {
        let (dir, generator) = generator();
        let posts: Vec<_> = (1..=3).rev().map(|d| post(&format!("p{}", d), d, &[])).collect();
        generator.generate_from(&posts, &[], &[]).unwrap();

        let home = read(&dir, "index.html");
        let positions: Vec<_> = crate::pages::GRADIENTS
            .iter()
            .map(|g| home.find(g).unwrap())
            .collect();
        assert!(positions.windows(2).all(|w| w[0] < w[1]));
    }

    #[test]
    fn test_empty_site() {
        let (dir, generator) = generator();
        generator.generate_from(&[], &[], &[]).unwrap();

        let home = read(&dir, "index.html");
        assert!(home.contains("No posts found."));
        assert!(!home.contains(r#"class="post-card""#));
        assert!(read(&dir, "blog/index.html").contains("No posts found."));
        assert!(read(&dir, "feed.xml").contains("<feed"));
        assert!(read(&dir, "css/style.css").contains(".post-card"));
    }

    #[test]
    fn test_static_assets_copied() {
        let (dir, generator) = generator();
        let images = dir.path().join("static/images");
        fs::create_dir_all(&images).unwrap();
        fs::write(images.join("avatar.png"), b"png").unwrap();
        fs::write(images.join(".DS_Store"), b"junk").unwrap();

        let report = generator.generate_from(&[], &[], &[]).unwrap();
        assert_eq!(report.assets, 1);
        assert!(dir.path().join("public/images/avatar.png").exists());
        assert!(!dir.path().join("public/images/.DS_Store").exists());
    }
}
