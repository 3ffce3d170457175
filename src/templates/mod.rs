//! Built-in site templates using the Tera template engine
//!
//! All templates are embedded in the binary, so a site needs nothing beyond
//! its config, records file, content directory and assets.

use anyhow::Result;
use serde::Serialize;
use std::collections::HashMap;
use tera::{Context, Tera};

use crate::config::SiteConfig;
use crate::helpers::{html_escape, strip_html, truncate, url_for};

/// Template renderer with the embedded site theme
pub struct TemplateRenderer {
    tera: Tera,
}

impl TemplateRenderer {
    /// Create a new renderer with all templates loaded
    pub fn new() -> Result<Self> {
        let mut tera = Tera::default();

        // Escape markup in record fields, but leave URL slashes readable
        tera.set_escape_fn(html_escape);

        tera.add_raw_templates(vec![
            ("layout.html", include_str!("site/layout.html")),
            ("post.html", include_str!("site/post.html")),
            ("atom.xml", include_str!("site/atom.xml")),
            ("partials/nav.html", include_str!("site/partials/nav.html")),
            (
                "partials/state.html",
                include_str!("site/partials/state.html"),
            ),
            ("sections/hero.html", include_str!("site/sections/hero.html")),
            (
                "sections/contact.html",
                include_str!("site/sections/contact.html"),
            ),
            ("sections/work.html", include_str!("site/sections/work.html")),
            (
                "sections/education.html",
                include_str!("site/sections/education.html"),
            ),
            (
                "sections/projects.html",
                include_str!("site/sections/projects.html"),
            ),
            (
                "sections/posts.html",
                include_str!("site/sections/posts.html"),
            ),
        ])?;

        tera.register_filter("strip_html", strip_html_filter);
        tera.register_filter("truncate_chars", truncate_chars_filter);

        Ok(Self { tera })
    }

    /// Render a template with given context
    pub fn render(&self, template_name: &str, context: &Context) -> Result<String> {
        Ok(self.tera.render(template_name, context)?)
    }
}

/// Tera filter: strip HTML tags
fn strip_html_filter(
    value: &tera::Value,
    _args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("strip_html", "value", String, value);
    Ok(tera::Value::String(strip_html(&s)))
}

/// Tera filter: truncate by character count
fn truncate_chars_filter(
    value: &tera::Value,
    args: &HashMap<String, tera::Value>,
) -> tera::Result<tera::Value> {
    let s = tera::try_get_value!("truncate_chars", "value", String, value);
    let length = match args.get("length") {
        Some(val) => tera::try_get_value!("truncate_chars", "length", usize, val),
        None => 150,
    };
    let omission = match args.get("omission") {
        Some(val) => tera::try_get_value!("truncate_chars", "omission", String, val),
        None => "…".to_string(),
    };
    Ok(tera::Value::String(truncate(&s, length, &omission)))
}

/// Data structures for template context

#[derive(Debug, Clone, Serialize)]
pub struct SiteData {
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,
}

impl SiteData {
    pub fn from_config(config: &SiteConfig) -> Self {
        Self {
            title: config.title.clone(),
            description: config.description.clone(),
            author: config.author.clone(),
            language: config.language.clone(),
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct MenuLink {
    pub name: String,
    pub url: String,
    pub active: bool,
}

impl MenuLink {
    /// Navigation links with the entry for `current` marked active
    pub fn build(config: &SiteConfig, current: &str) -> Vec<Self> {
        config
            .menu
            .iter()
            .map(|item| MenuLink {
                name: item.name.clone(),
                url: url_for(config, &item.path),
                active: item.path.trim_matches('/') == current.trim_matches('/'),
            })
            .collect()
    }
}

/// One row of the blog listing
#[derive(Debug, Clone, Serialize)]
pub struct PostSummary {
    pub title: String,
    pub url: String,
    pub date: Option<String>,
    pub summary: String,
}

/// A post ready to be placed in `post.html`
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct RenderedPost {
    pub title: String,
    pub author: String,
    pub date: Option<String>,
    pub datetime: Option<String>,
    pub html: String,
}

/// One entry of the Atom feed
#[derive(Debug, Clone, Serialize)]
pub struct FeedEntry {
    pub title: String,
    pub permalink: String,
    pub author: String,
    pub summary: String,
    pub published: Option<String>,
    pub updated: String,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_templates_load() {
        assert!(TemplateRenderer::new().is_ok());
    }

    #[test]
    fn test_escape_keeps_slashes() {
        let renderer = TemplateRenderer::new().unwrap();
        let mut context = Context::new();
        context.insert("post", &Option::<RenderedPost>::None);
        context.insert("message", "<b>Post</b> not found at /blog/x");
        let html = renderer.render("post.html", &context).unwrap();
        assert!(html.contains("&lt;b&gt;Post&lt;/b&gt;"));
        assert!(html.contains("/blog/x"));
    }

    #[test]
    fn test_truncate_filter() {
        let mut args = HashMap::new();
        args.insert("length".to_string(), tera::Value::from(4));
        let out = truncate_chars_filter(&tera::Value::from("abcdefgh"), &args).unwrap();
        assert_eq!(out, tera::Value::from("abcd…"));
    }

    #[test]
    fn test_menu_marks_active() {
        let config = SiteConfig::default();
        let links = MenuLink::build(&config, "/blog");
        let active: Vec<_> = links.iter().filter(|l| l.active).map(|l| &l.name).collect();
        assert_eq!(active, vec!["Blog"]);
        assert_eq!(links[0].url, "/about");
    }
}
