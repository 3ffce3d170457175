//! folio-rs: a portfolio and blog site rendered from a record store
//!
//! Profile, work history, education, projects and posts are read from a
//! [`store::RecordStore`], normalized by [`fetcher::ContentFetcher`] and
//! rendered into independently loading page sections. Sites can be served
//! with streamed sections or generated as static files.

pub mod commands;
pub mod config;
pub mod content;
pub mod fetcher;
pub mod generator;
pub mod helpers;
pub mod render;
pub mod server;
pub mod store;
pub mod templates;

use anyhow::Result;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use content::{ContentDir, MarkdownRenderer};
use fetcher::ContentFetcher;
use render::{ContentDispatcher, PageRenderer};
use store::{FileStore, LocalAssets};

/// Name of the site configuration file
pub const CONFIG_FILE: &str = "_config.yml";

/// The main Folio application
#[derive(Clone)]
pub struct Folio {
    /// Site configuration
    pub config: config::SiteConfig,
    /// Base directory
    pub base_dir: PathBuf,
    /// Public (output) directory
    pub public_dir: PathBuf,
    /// Directory of file-backed posts
    pub content_dir: PathBuf,
    /// Records file backing the store
    pub records_path: PathBuf,
    /// Attachment storage directory
    pub assets_dir: PathBuf,
}

impl Folio {
    /// Create a new Folio instance from a directory
    pub fn new<P: AsRef<Path>>(base_dir: P) -> Result<Self> {
        let base_dir = base_dir.as_ref().to_path_buf();
        let config_path = base_dir.join(CONFIG_FILE);

        let config = if config_path.exists() {
            config::SiteConfig::load(&config_path)?
        } else {
            config::SiteConfig::default()
        };

        Ok(Self {
            public_dir: base_dir.join(&config.public_dir),
            content_dir: base_dir.join(&config.content_dir),
            records_path: base_dir.join(&config.records),
            assets_dir: base_dir.join(&config.assets_dir),
            config,
            base_dir,
        })
    }

    /// Fetcher over the records file and the local attachment directory
    pub fn fetcher(&self) -> ContentFetcher {
        ContentFetcher::new(
            Arc::new(FileStore::new(&self.records_path)),
            Arc::new(LocalAssets::new(&self.assets_dir, &self.config.assets_url)),
        )
    }

    pub fn dispatcher(&self) -> ContentDispatcher {
        ContentDispatcher::new(
            Arc::new(ContentDir::new(&self.content_dir, &self.config.post_extension)),
            Arc::new(MarkdownRenderer::with_options(&self.config.highlight)),
            &self.config.date_format,
        )
    }

    pub fn renderer(&self) -> Result<PageRenderer> {
        PageRenderer::new(self.config.clone())
    }

    /// Generate the static site
    pub async fn generate(&self) -> Result<()> {
        commands::generate::run(self).await
    }

    /// Clean the public directory
    pub fn clean(&self) -> Result<()> {
        commands::clean::run(self)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[test]
    fn test_new_without_config_uses_defaults() {
        let dir = TempDir::new().unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.public_dir, dir.path().join("public"));
        assert_eq!(folio.content_dir, dir.path().join("content/blog"));
        assert_eq!(folio.records_path, dir.path().join("records.yml"));
    }

    #[test]
    fn test_new_reads_config() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join(CONFIG_FILE),
            "title: Mine\npublic_dir: out\nrecords: data.json\n",
        )
        .unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        assert_eq!(folio.config.title, "Mine");
        assert_eq!(folio.public_dir, dir.path().join("out"));
        assert_eq!(folio.records_path, dir.path().join("data.json"));
    }
}
