//! Markdown rendering with syntax highlighting and heading anchors

use pulldown_cmark::{html, CodeBlockKind, CowStr, Event, Options, Parser, Tag, TagEnd};
use std::collections::HashMap;
use syntect::highlighting::{Theme, ThemeSet};
use syntect::html::highlighted_html_for_string;
use syntect::parsing::SyntaxSet;

use crate::config::HighlightConfig;
use crate::helpers::escape_html;

const FALLBACK_THEME: &str = "base16-ocean.dark";

/// Markdown renderer for post bodies
pub struct MarkdownRenderer {
    syntax_set: SyntaxSet,
    /// `None` disables highlighting
    theme: Option<Theme>,
    line_numbers: bool,
}

impl MarkdownRenderer {
    pub fn new() -> Self {
        Self::with_config(&HighlightConfig::default())
    }

    pub fn with_config(config: &HighlightConfig) -> Self {
        let theme = if config.enable {
            let mut themes = ThemeSet::load_defaults().themes;
            themes
                .remove(&config.theme)
                .or_else(|| {
                    tracing::warn!(
                        "Unknown highlight theme `{}`, using {}",
                        config.theme,
                        FALLBACK_THEME
                    );
                    themes.remove(FALLBACK_THEME)
                })
        } else {
            None
        };

        Self {
            syntax_set: SyntaxSet::load_defaults_newlines(),
            theme,
            line_numbers: config.line_number,
        }
    }

    /// Render markdown to HTML
    pub fn render(&self, markdown: &str) -> String {
        let options = Options::ENABLE_TABLES
            | Options::ENABLE_FOOTNOTES
            | Options::ENABLE_STRIKETHROUGH
            | Options::ENABLE_TASKLISTS
            | Options::ENABLE_SMART_PUNCTUATION
            | Options::ENABLE_HEADING_ATTRIBUTES
            | Options::ENABLE_GFM;

        let mut events: Vec<Event> = Vec::new();
        let mut code: Option<(Option<String>, String)> = None;
        let mut heading: Option<(usize, Option<String>, Vec<Event>)> = None;
        let mut heading_ids: HashMap<String, usize> = HashMap::new();

        for event in Parser::new_ext(markdown, options) {
            match event {
                Event::Start(Tag::CodeBlock(kind)) => {
                    let lang = match kind {
                        CodeBlockKind::Fenced(info) => info
                            .split_whitespace()
                            .next()
                            .map(|l| l.to_string()),
                        CodeBlockKind::Indented => None,
                    };
                    code = Some((lang, String::new()));
                }
                Event::End(TagEnd::CodeBlock) => {
                    if let Some((lang, body)) = code.take() {
                        let block = self.highlight_code(&body, lang.as_deref());
                        events.push(Event::Html(CowStr::from(block)));
                    }
                }
                Event::Text(text) if code.is_some() => {
                    if let Some((_, body)) = code.as_mut() {
                        body.push_str(&text);
                    }
                }
                Event::Start(Tag::Heading { level, id, .. }) => {
                    heading = Some((level as usize, id.map(|i| i.to_string()), Vec::new()));
                }
                Event::End(TagEnd::Heading(_)) => {
                    if let Some((level, id, inner)) = heading.take() {
                        let id = id.unwrap_or_else(|| {
                            unique_id(&mut heading_ids, &slug::slugify(heading_text(&inner)))
                        });
                        events.push(Event::Html(CowStr::from(format!(
                            r#"<h{} id="{}">"#,
                            level,
                            escape_html(&id)
                        ))));
                        events.extend(inner);
                        events.push(Event::Html(CowStr::from(format!("</h{}>\n", level))));
                    }
                }
                other => match heading.as_mut() {
                    Some((_, _, inner)) => inner.push(other),
                    None => events.push(other),
                },
            }
        }

        let mut html_output = String::new();
        html::push_html(&mut html_output, events.into_iter());
        html_output
    }

    fn highlight_code(&self, code: &str, lang: Option<&str>) -> String {
        let lang = lang.unwrap_or("text");
        let class = escape_html(lang);

        let highlighted = self.theme.as_ref().and_then(|theme| {
            let syntax = self
                .syntax_set
                .find_syntax_by_token(lang)
                .unwrap_or_else(|| self.syntax_set.find_syntax_plain_text());
            highlighted_html_for_string(code, &self.syntax_set, syntax, theme).ok()
        });

        match highlighted {
            Some(html) if self.line_numbers => with_line_numbers(&html, &class),
            Some(html) => format!(r#"<figure class="highlight {}">{}</figure>"#, class, html),
            None => format!(
                r#"<pre><code class="language-{}">{}</code></pre>"#,
                class,
                escape_html(code)
            ),
        }
    }
}

impl Default for MarkdownRenderer {
    fn default() -> Self {
        Self::new()
    }
}

fn heading_text(events: &[Event]) -> String {
    events
        .iter()
        .filter_map(|e| match e {
            Event::Text(t) | Event::Code(t) => Some(t.as_ref()),
            _ => None,
        })
        .collect::<Vec<_>>()
        .concat()
}

/// Repeated headings get `-1`, `-2`, ... suffixes
fn unique_id(seen: &mut HashMap<String, usize>, base: &str) -> String {
    let base = if base.is_empty() { "section" } else { base };
    let count = seen.entry(base.to_string()).or_insert(0);
    let id = if *count == 0 {
        base.to_string()
    } else {
        format!("{}-{}", base, count)
    };
    *count += 1;
    id
}

fn with_line_numbers(highlighted: &str, class: &str) -> String {
    let gutter: Vec<String> = (1..=highlighted.lines().count())
        .map(|n| format!(r#"<span class="line-number">{}</span>"#, n))
        .collect();
    format!(
        r#"<figure class="highlight {}"><table><tr><td class="gutter"><pre>{}</pre></td><td class="code">{}</td></tr></table></figure>"#,
        class,
        gutter.join("\n"),
        highlighted
    )
}
