//! Site configuration (_config.yml)

use anyhow::Result;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use std::fs;
use std::path::Path;

/// Main site configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct SiteConfig {
    // Site
    pub title: String,
    pub description: String,
    pub author: String,
    pub language: String,

    // URL
    pub url: String,
    pub root: String,

    // Directory
    pub public_dir: String,
    /// Directory holding file-backed posts, relative to the site root
    pub content_dir: String,
    /// Extension of file-backed posts, without the dot
    pub post_extension: String,
    /// Records file backing the record store
    pub records: String,
    /// Directory that attachment storage ids resolve against
    pub assets_dir: String,
    /// Public URL prefix for resolved attachments
    pub assets_url: String,

    // Writing
    pub date_format: String,
    pub render_drafts: bool,
    #[serde(default)]
    pub highlight: HighlightConfig,

    // Navigation
    #[serde(default = "default_menu")]
    pub menu: Vec<MenuItem>,

    // Store any additional fields
    #[serde(flatten)]
    pub extra: HashMap<String, serde_yaml::Value>,
}

impl Default for SiteConfig {
    fn default() -> Self {
        Self {
            title: "Portfolio".to_string(),
            description: String::new(),
            author: "John Doe".to_string(),
            language: "en".to_string(),

            url: "http://example.com".to_string(),
            root: "/".to_string(),

            public_dir: "public".to_string(),
            content_dir: "content/blog".to_string(),
            post_extension: "mdx".to_string(),
            records: "records.yml".to_string(),
            assets_dir: "assets".to_string(),
            assets_url: "/assets".to_string(),

            date_format: "MMMM DD, YYYY".to_string(),
            render_drafts: false,
            highlight: HighlightConfig::default(),

            menu: default_menu(),
            extra: HashMap::new(),
        }
    }
}

impl SiteConfig {
    /// Load configuration from a file
    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let content = fs::read_to_string(path.as_ref())?;
        let config: SiteConfig = serde_yaml::from_str(&content)?;
        Ok(config)
    }
}

/// Code highlighting configuration
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct HighlightConfig {
    /// syntect theme name
    pub theme: String,
    pub line_number: bool,
}

impl Default for HighlightConfig {
    fn default() -> Self {
        Self {
            theme: "base16-ocean.dark".to_string(),
            line_number: false,
        }
    }
}

/// A navigation entry
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct MenuItem {
    pub name: String,
    pub path: String,
}

fn default_menu() -> Vec<MenuItem> {
    [("About", "/about"), ("Work", "/work"), ("Blog", "/blog")]
        .into_iter()
        .map(|(name, path)| MenuItem {
            name: name.to_string(),
            path: path.to_string(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_default_config() {
        let config = SiteConfig::default();
        assert_eq!(config.post_extension, "mdx");
        assert_eq!(config.content_dir, "content/blog");
        assert_eq!(config.menu.len(), 3);
        assert!(!config.render_drafts);
    }

    #[test]
    fn test_parse_config() {
        let yaml = r#"
title: Jane's Corner
author: Jane
records: data/site.json
highlight:
  theme: InspiredGitHub
menu:
  - name: Writing
    path: /blog
github: jane
"#;
        let config: SiteConfig = serde_yaml::from_str(yaml).unwrap();
        assert_eq!(config.title, "Jane's Corner");
        assert_eq!(config.records, "data/site.json");
        assert_eq!(config.highlight.theme, "InspiredGitHub");
        assert!(!config.highlight.line_number);
        assert_eq!(
            config.menu,
            vec![MenuItem {
                name: "Writing".to_string(),
                path: "/blog".to_string()
            }]
        );
        assert_eq!(config.assets_url, "/assets");
        assert!(config.extra.contains_key("github"));
    }
}
