//! List site content

use anyhow::{Context, Result};

use crate::content::loader::ContentLoader;
use crate::data::{PhotoRecord, ProjectRecord};
use crate::Folio;

/// List site content by type
pub fn run(folio: &Folio, content_type: &str) -> Result<()> {
    for line in lines(folio, content_type)? {
        println!("{}", line);
    }
    Ok(())
}

/// Listing output, one entry per line
pub fn lines(folio: &Folio, content_type: &str) -> Result<Vec<String>> {
    let mut out = Vec::new();

    match content_type {
        "post" | "posts" => {
            let index = ContentLoader::new(folio)
                .load_front_matter(&folio.config.collection)
                .context("Failed to load posts")?;
            out.push(format!("Posts ({}):", index.len()));
            for post in &index {
                out.push(format!(
                    "  {} - {} [{}] ({})",
                    post.date.format("%Y-%m-%d"),
                    post.title,
                    post.slug,
                    post.read_time
                ));
            }
        }
        "tag" | "tags" => {
            let index = ContentLoader::new(folio)
                .load_front_matter(&folio.config.collection)
                .context("Failed to load posts")?;
            let mut tags: Vec<_> = index.tags().into_values().collect();
            tags.sort_by(|a, b| b.posts.len().cmp(&a.posts.len()));
            out.push(format!("Tags ({}):", tags.len()));
            for tag in tags {
                out.push(format!("  {} ({})", tag.name, tag.posts.len()));
            }
        }
        "photo" | "photos" => {
            let photos = PhotoRecord::load_all(&folio.data_dir.join("photos.yml"))?;
            out.push(format!("Photos ({}):", photos.len()));
            for photo in photos {
                out.push(format!("  {} [{}]", photo.title, photo.slug));
            }
        }
        "project" | "projects" => {
            let projects = ProjectRecord::load_all(&folio.data_dir.join("projects.yml"))?;
            out.push(format!("Projects ({}):", projects.len()));
            for project in projects {
                match project.href {
                    Some(href) => out.push(format!("  {} <{}>", project.title, href)),
                    None => out.push(format!("  {}", project.title)),
                }
            }
        }
        _ => {
            anyhow::bail!(
                "Unknown type: {}. Available: post, tag, photo, project",
                content_type
            );
        }
    }

    Ok(out)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::commands::init::init_site;

    #[test]
    fn test_list_scaffolded_site() {
        let dir = tempfile::tempdir().unwrap();
        init_site(dir.path()).unwrap();
        let folio = Folio::new(dir.path()).unwrap();

        let posts = lines(&folio, "post").unwrap();
        assert_eq!(posts[0], "Posts (1):");
        assert!(posts[1].contains("Hello World [hello-world]"));

        let photos = lines(&folio, "photos").unwrap();
        assert_eq!(photos[0], "Photos (7):");
        assert_eq!(photos[1], "  Storytellers [storytellers]");

        assert_eq!(lines(&folio, "tag").unwrap(), vec!["Tags (1):", "  meta (1)"]);
        assert_eq!(lines(&folio, "project").unwrap()[0], "Projects (1):");
    }

    #[test]
    fn test_unknown_type() {
        let dir = tempfile::tempdir().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert!(lines(&folio, "category").is_err());
    }
}
