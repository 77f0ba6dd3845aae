//! Atom feed of recent posts

use crate::config::SiteMetadata;
use crate::content::Post;
use crate::helpers::{escape_xml, excerpt, full_url_for};

/// Length of generated entry summaries, in characters
const SUMMARY_LENGTH: usize = 200;

/// Route of the feed document
pub const FEED_PATH: &str = "/feed.xml";

/// Build an Atom feed from posts sorted newest first
pub fn atom_feed(posts: &[Post], metadata: &SiteMetadata, limit: usize) -> String {
    let site_url = full_url_for(metadata, "/");
    // Latest change to any post, so rebuilds of unchanged content are stable
    let updated = posts
        .iter()
        .map(|p| p.front_matter.lastmod.unwrap_or(p.front_matter.date))
        .max()
        .map(|d| d.to_rfc3339())
        .unwrap_or_else(|| "1970-01-01T00:00:00+00:00".to_string());

    let mut feed = String::new();
    feed.push_str("<?xml version=\"1.0\" encoding=\"utf-8\"?>\n");
    feed.push_str("<feed xmlns=\"http://www.w3.org/2005/Atom\">\n");
    feed.push_str(&format!("  <title>{}</title>\n", escape_xml(&metadata.title)));
    if !metadata.description.is_empty() {
        feed.push_str(&format!(
            "  <subtitle>{}</subtitle>\n",
            escape_xml(&metadata.description)
        ));
    }
    feed.push_str(&format!(
        "  <link href=\"{}\" rel=\"self\"/>\n",
        escape_xml(&full_url_for(metadata, FEED_PATH))
    ));
    feed.push_str(&format!("  <link href=\"{}\"/>\n", escape_xml(&site_url)));
    feed.push_str(&format!("  <updated>{}</updated>\n", updated));
    feed.push_str(&format!("  <id>{}</id>\n", escape_xml(&site_url)));
    feed.push_str(&format!(
        "  <author><name>{}</name></author>\n",
        escape_xml(&metadata.author)
    ));

    for post in posts.iter().take(limit) {
        let fm = &post.front_matter;
        let url = escape_xml(&full_url_for(metadata, &fm.path()));
        feed.push_str("  <entry>\n");
        feed.push_str(&format!("    <title>{}</title>\n", escape_xml(&fm.title)));
        feed.push_str(&format!("    <link href=\"{}\"/>\n", url));
        feed.push_str(&format!("    <id>{}</id>\n", url));
        feed.push_str(&format!("    <published>{}</published>\n", fm.date.to_rfc3339()));
        feed.push_str(&format!(
            "    <updated>{}</updated>\n",
            fm.lastmod.unwrap_or(fm.date).to_rfc3339()
        ));
        let summary = if fm.summary.is_empty() {
            excerpt(&post.content, SUMMARY_LENGTH)
        } else {
            fm.summary.clone()
        };
        if !summary.is_empty() {
            feed.push_str(&format!("    <summary>{}</summary>\n", escape_xml(&summary)));
        }
        for tag in &fm.tags {
            feed.push_str(&format!("    <category term=\"{}\"/>\n", escape_xml(tag)));
        }
        feed.push_str(&format!(
            "    <content type=\"html\">{}</content>\n",
            escape_xml(&absolute_links(&post.content, &metadata.url))
        ));
        feed.push_str("  </entry>\n");
    }

    feed.push_str("</feed>\n");
    feed
}

/// Root-relative `href`/`src` attributes become absolute for feed readers
fn absolute_links(content: &str, base_url: &str) -> String {
    let base = base_url.trim_end_matches('/');
    content
        .replace("href=\"/", &format!("href=\"{}/", base))
        .replace("src=\"/", &format!("src=\"{}/", base))
}
