//! HTML and XML text helpers

use lazy_static::lazy_static;
use regex::Regex;

lazy_static! {
    static ref TAG: Regex = Regex::new(r"<[^>]*>").unwrap();
    static ref WHITESPACE: Regex = Regex::new(r"\s+").unwrap();
}

/// Escape HTML special characters
pub fn escape_html(s: &str) -> String {
    s.replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#39;")
}

/// Escape XML special characters, dropping characters XML 1.0 forbids
pub fn escape_xml(s: &str) -> String {
    s.chars()
        .filter(|&c| {
            matches!(c, '\t' | '\n' | '\r')
                || ('\u{0020}'..='\u{D7FF}').contains(&c)
                || ('\u{E000}'..='\u{FFFD}').contains(&c)
                || ('\u{10000}'..='\u{10FFFF}').contains(&c)
        })
        .collect::<String>()
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&apos;")
}

/// Strip HTML tags and collapse whitespace
pub fn strip_html(s: &str) -> String {
    let text = TAG.replace_all(s, " ");
    WHITESPACE.replace_all(&text, " ").trim().to_string()
}

/// Truncate to `length` characters, appending an ellipsis when cut
pub fn truncate(s: &str, length: usize) -> String {
    if s.chars().count() <= length {
        s.to_string()
    } else {
        let truncated: String = s.chars().take(length).collect();
        format!("{}…", truncated.trim_end())
    }
}

/// Plain-text excerpt of rendered HTML, used where a post has no summary
pub fn excerpt(html: &str, length: usize) -> String {
    truncate(&strip_html(html), length)
}

/// Whether a link points off-site
pub fn is_external(href: &str) -> bool {
    href.starts_with("http://")
        || href.starts_with("https://")
        || href.starts_with("//")
        || href.starts_with("mailto:")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_html() {
        assert_eq!(
            escape_html(r#"<a href="x">Tom & Jerry's</a>"#),
            "&lt;a href=&quot;x&quot;&gt;Tom &amp; Jerry&#39;s&lt;/a&gt;"
        );
    }

    #[test]
    fn test_escape_xml_drops_control_chars() {
        assert_eq!(escape_xml("a\u{0008}b & c"), "ab &amp; c");
    }

    #[test]
    fn test_strip_html() {
        assert_eq!(strip_html("<p>Hello <b>World</b></p>\n<p>again</p>"), "Hello World again");
    }

    #[test]
    fn test_truncate() {
        assert_eq!(truncate("Hello World", 5), "Hello…");
        assert_eq!(truncate("Hi", 10), "Hi");
    }

    #[test]
    fn test_excerpt() {
        let html = "<h2 id=\"intro\">Intro</h2>\n<p>A <em>short</em> walk by the river.</p>";
        assert_eq!(excerpt(html, 13), "Intro A short…");
        assert_eq!(excerpt(html, 100), "Intro A short walk by the river.");
    }

    #[test]
    fn test_is_external() {
        assert!(is_external("https://twitter.com/emsesc"));
        assert!(is_external("mailto:me@example.com"));
        assert!(!is_external("/blog"));
    }
}
