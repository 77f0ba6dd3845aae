//! Built-in site templates using the Tera template engine
//!
//! Templates and the stylesheet are embedded in the binary, so a site only
//! needs content and data files.

use anyhow::{Context as _, Result};
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::helpers::escape_html;
use crate::pages::SiteView;

/// Stylesheet written to `/css/style.css`
pub const STYLESHEET: &str = include_str!("site/style.css");

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Text is escaped explicitly with `esc`; rendered post bodies and
        // CSS gradients go out verbatim
        tera.autoescape_on(vec![]);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("macros.html", include_str!("site/macros.html")),
            ("home.html", include_str!("site/home.html")),
            ("photos.html", include_str!("site/photos.html")),
            ("post.html", include_str!("site/post.html")),
            ("blog.html", include_str!("site/blog.html")),
            ("tags.html", include_str!("site/tags.html")),
            ("tag.html", include_str!("site/tag.html")),
            ("projects.html", include_str!("site/projects.html")),
        ])
        .context("Failed to load built-in templates")?;

        tera.register_filter("esc", esc_filter);

        Ok(Self { tera })
    }

    /// Render a page view inside the site layout
    pub fn render_page<T: Serialize>(
        &self,
        template_name: &str,
        site: &SiteView,
        current_path: &str,
        feed_enabled: bool,
        page: &T,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", site);
        context.insert("current_path", current_path);
        context.insert("feed_enabled", &feed_enabled);
        context.insert("page", page);
        self.render(template_name, &context)
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        self.tera
            .render(template_name, context)
            .with_context(|| format!("Failed to render template {}", template_name))
    }
}

/// Tera filter: escape HTML text and attribute values
fn esc_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    match value {
        tera::Value::Null => Ok(tera::Value::String(String::new())),
        tera::Value::String(s) => Ok(tera::Value::String(escape_html(s))),
        other => Ok(tera::Value::String(escape_html(&other.to_string()))),
    }
}
