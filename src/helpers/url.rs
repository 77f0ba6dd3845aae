//! URL helper functions

use crate::config::SiteMetadata;

/// Normalise a site path to `/segment/.../` form
///
/// # Examples
/// ```ignore
/// route("blog/hello") // -> "/blog/hello/"
/// ```
pub fn route(path: &str) -> String {
    let trimmed = path.trim_matches('/');
    if trimmed.is_empty() {
        "/".to_string()
    } else {
        format!("/{}/", trimmed)
    }
}

/// Generate a full URL including the domain
///
/// # Examples
/// ```ignore
/// full_url_for(&metadata, "/blog/hello/") // -> "https://example.com/blog/hello/"
/// ```
pub fn full_url_for(metadata: &SiteMetadata, path: &str) -> String {
    format!(
        "{}/{}",
        metadata.url.trim_end_matches('/'),
        path.trim_start_matches('/')
    )
}

/// Output file for a route, relative to the public directory
pub fn output_file(route: &str) -> String {
    let trimmed = route.trim_matches('/');
    if trimmed.is_empty() {
        "index.html".to_string()
    } else if trimmed.ends_with(".xml") || trimmed.ends_with(".html") {
        trimmed.to_string()
    } else {
        format!("{}/index.html", trimmed)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_route() {
        assert_eq!(route(""), "/");
        assert_eq!(route("blog/hello"), "/blog/hello/");
        assert_eq!(route("/photos/"), "/photos/");
    }

    #[test]
    fn test_full_url_for() {
        let metadata = SiteMetadata {
            url: "https://example.com/".to_string(),
            ..Default::default()
        };
        assert_eq!(
            full_url_for(&metadata, "/blog/hello/"),
            "https://example.com/blog/hello/"
        );
    }

    #[test]
    fn test_output_file() {
        assert_eq!(output_file("/"), "index.html");
        assert_eq!(output_file("/blog/a/b/"), "blog/a/b/index.html");
        assert_eq!(output_file("/feed.xml"), "feed.xml");
    }
}
