//! Generator module - writes the site as static HTML files
//!
//! Static pages are rendered with every section settled, so they need no
//! script to display. Output layout mirrors the server's routes:
//! `about/index.html`, `work/index.html`, `blog/index.html`,
//! `blog/{slug}/index.html`, `blog/atom.xml` and the attachment directory.

use anyhow::{anyhow, Result};
use futures::future::join_all;
use std::fs;
use std::path::{Path, PathBuf};
use walkdir::WalkDir;

use crate::fetcher::ContentFetcher;
use crate::helpers::url_for;
use crate::render::{ContentDispatcher, PageKind, PageRenderer, PostStatus};
use crate::Folio;

/// Summary of one generation run
#[derive(Debug, Default, Clone, PartialEq, Eq)]
pub struct GenerateReport {
    pub pages: usize,
    pub posts: usize,
    pub failed_posts: usize,
    pub assets: usize,
}

/// Static site generator
pub struct Generator {
    public_dir: PathBuf,
    assets_dir: PathBuf,
    renderer: PageRenderer,
    fetcher: ContentFetcher,
    dispatcher: ContentDispatcher,
}

impl Generator {
    /// Create a new generator
    pub fn new(folio: &Folio) -> Result<Self> {
        Ok(Self {
            public_dir: folio.public_dir.clone(),
            assets_dir: folio.assets_dir.clone(),
            renderer: folio.renderer()?,
            fetcher: folio.fetcher(),
            dispatcher: folio.dispatcher(),
        })
    }

    /// Generate the entire site
    pub async fn generate(&self) -> Result<GenerateReport> {
        fs::create_dir_all(&self.public_dir)?;
        let mut report = GenerateReport::default();

        for page in PageKind::ALL {
            let html = self.renderer.render_page(page, &self.fetcher).await?;
            self.write(&Path::new(page.path()).join("index.html"), &html)?;
            report.pages += 1;
        }

        self.write(Path::new("index.html"), &self.redirect_page())?;
        self.write(Path::new("404.html"), &self.renderer.render_not_found()?)?;

        let (posts, failed) = self.generate_post_pages().await?;
        report.posts = posts;
        report.failed_posts = failed;

        let feed = self.renderer.render_feed(&self.fetcher).await?;
        self.write(Path::new("blog/atom.xml"), &feed)?;

        report.assets = self.copy_assets()?;

        Ok(report)
    }

    /// Write one page per published post; returns (written, failed)
    ///
    /// Drafts are never written, even when the server is set to show them.
    async fn generate_post_pages(&self) -> Result<(usize, usize)> {
        let posts = self.fetcher.list_published_posts().await?;
        let pages = join_all(posts.iter().map(|post| {
            self.renderer
                .render_post(&post.slug, &self.fetcher, &self.dispatcher, false)
        }))
        .await;

        let mut failed = 0;
        for (post, page) in posts.iter().zip(pages) {
            let page = page?;
            if page.status != PostStatus::Found {
                tracing::warn!("Post {} rendered with status {:?}", post.slug, page.status);
                failed += 1;
            }
            let relative = Path::new("blog").join(&post.slug).join("index.html");
            self.write(&relative, &page.html)?;
        }

        Ok((posts.len(), failed))
    }

    /// Root page pointing at the about page
    fn redirect_page(&self) -> String {
        let target = url_for(self.renderer.config(), PageKind::About.path());
        format!(
            "<!DOCTYPE html>\n<html><head><meta charset=\"utf-8\">\
             <meta http-equiv=\"refresh\" content=\"0; url={0}\">\
             <link rel=\"canonical\" href=\"{0}\"></head>\
             <body><a href=\"{0}\">{0}</a></body></html>\n",
            target
        )
    }

    /// Copy the attachment directory under the public assets URL
    fn copy_assets(&self) -> Result<usize> {
        let assets_url = &self.renderer.config().assets_url;
        if !assets_url.starts_with('/') || !self.assets_dir.exists() {
            return Ok(0);
        }
        let target = self.public_dir.join(assets_url.trim_matches('/'));

        let mut copied = 0;
        for entry in WalkDir::new(&self.assets_dir)
            .follow_links(true)
            .into_iter()
            .filter_map(|e| e.ok())
        {
            let path = entry.path();
            if !path.is_file() {
                continue;
            }

            let relative = path.strip_prefix(&self.assets_dir)?;
            let dest = target.join(relative);
            if let Some(parent) = dest.parent() {
                fs::create_dir_all(parent)?;
            }
            fs::copy(path, &dest)?;
            copied += 1;
        }

        Ok(copied)
    }

    fn write(&self, relative: &Path, content: &str) -> Result<()> {
        let output_path = self.public_dir.join(relative);
        if let Some(parent) = output_path.parent() {
            fs::create_dir_all(parent)
                .map_err(|e| anyhow!("Failed to create dir {:?}: {}", parent, e))?;
        }
        fs::write(&output_path, content)
            .map_err(|e| anyhow!("Failed to write {:?}: {}", output_path, e))?;
        tracing::debug!("Generated: {:?}", output_path);
        Ok(())
    }
}
