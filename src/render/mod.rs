//! Page rendering
//!
//! A page is a fixed set of sections that load independently. Each section
//! is rendered from a [`SectionState`]; a failed fetch only affects its own
//! section. Pages can be rendered whole (for static output) or streamed: the
//! shell goes out first with a placeholder in every slot, then each section's
//! markup follows as soon as its data is ready, in completion order.

mod dispatch;
mod sections;
mod state;

pub use dispatch::ContentDispatcher;
pub use sections::{SectionKind, FAILED_MESSAGE};
pub use state::{Bar, SectionState, Shape};

use anyhow::{anyhow, Result};
use chrono::Utc;
use futures::future::{join_all, ready, BoxFuture, FutureExt};
use futures::stream::{self, FuturesUnordered, Stream, StreamExt};
use serde::Serialize;
use std::collections::HashMap;
use std::sync::Arc;
use tera::Context;

use crate::config::SiteConfig;
use crate::content::Post;
use crate::fetcher::ContentFetcher;
use crate::helpers::{date_xml, encode_url, format_date, full_url_for, html_escape, post_url};
use crate::templates::{
    FeedEntry, MenuLink, PostSummary, RenderedPost, SiteData, TemplateRenderer,
};

/// Marks where streamed section chunks go in the document
const BODY_MARKER: &str = "<!--folio:sections-->";

pub const POST_NOT_FOUND: &str = "Post not found.";
pub const POST_ERROR: &str = "Error loading post.";
pub const PAGE_NOT_FOUND: &str = "Page not found.";

/// The top-level pages of the site
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PageKind {
    About,
    Work,
    Blog,
}

impl PageKind {
    pub const ALL: [PageKind; 3] = [PageKind::About, PageKind::Work, PageKind::Blog];

    /// Route path, without slashes
    pub fn path(self) -> &'static str {
        match self {
            PageKind::About => "about",
            PageKind::Work => "work",
            PageKind::Blog => "blog",
        }
    }

    pub fn title(self) -> &'static str {
        match self {
            PageKind::About => "About",
            PageKind::Work => "Work",
            PageKind::Blog => "Blog",
        }
    }

    /// Sections grouped into layout columns
    fn columns(self) -> Vec<Vec<SectionKind>> {
        match self {
            PageKind::About => vec![
                vec![SectionKind::Contact],
                vec![
                    SectionKind::Hero,
                    SectionKind::Work,
                    SectionKind::Education,
                    SectionKind::Projects,
                ],
            ],
            PageKind::Work => vec![vec![SectionKind::Work, SectionKind::Projects]],
            PageKind::Blog => vec![vec![SectionKind::Posts]],
        }
    }

    pub fn sections(self) -> Vec<SectionKind> {
        self.columns().into_iter().flatten().collect()
    }

    /// Arrange section markup into the page body
    fn arrange(self, mut html_for: impl FnMut(SectionKind) -> String) -> String {
        let columns = self.columns();
        if columns.len() == 1 {
            return columns[0].iter().map(|k| html_for(*k)).collect();
        }

        let mut body = String::from(r#"<div class="page-columns">"#);
        for (i, column) in columns.iter().enumerate() {
            let tag = if i == 0 { "aside" } else { "div" };
            body.push_str(&format!(r#"<{} class="page-column">"#, tag));
            for kind in column {
                body.push_str(&html_for(*kind));
            }
            body.push_str(&format!("</{}>", tag));
        }
        body.push_str("</div>");
        body
    }
}

/// Outcome of rendering a single post page
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PostStatus {
    Found,
    NotFound,
    Error,
}

#[derive(Debug, Clone)]
pub struct PostPage {
    pub status: PostStatus,
    pub html: String,
}

/// Renders pages, posts and the feed from fetched content
pub struct PageRenderer {
    templates: TemplateRenderer,
    config: SiteConfig,
}

impl PageRenderer {
    pub fn new(config: SiteConfig) -> Result<Self> {
        Ok(Self {
            templates: TemplateRenderer::new()?,
            config,
        })
    }

    pub fn config(&self) -> &SiteConfig {
        &self.config
    }

    /// Render one section in the given state, wrapped in its slot
    pub fn section<T: Serialize>(&self, kind: SectionKind, state: &SectionState<T>) -> String {
        let inner = match state {
            SectionState::Populated(data) => {
                let mut context = Context::new();
                context.insert("data", data);
                self.templates.render(&kind.template(), &context)
            }
            SectionState::Loading(shape) => {
                let mut context = Context::new();
                context.insert("state", "loading");
                context.insert("shape", shape);
                self.templates.render("partials/state.html", &context)
            }
            SectionState::Empty => self.notice(kind, "empty", kind.empty_message()),
            SectionState::Failed => self.notice(kind, "failed", FAILED_MESSAGE),
        };

        let (state_name, inner) = match inner {
            Ok(html) => (state.name(), html),
            Err(e) => {
                tracing::error!("Failed to render section {}: {}", kind.name(), e);
                (
                    "failed",
                    format!(
                        r#"<p class="section-notice section-failed">{}</p>"#,
                        html_escape(FAILED_MESSAGE)
                    ),
                )
            }
        };

        format!(
            r#"<section id="{}" class="section section-{}" data-state="{}">{}</section>"#,
            kind.id(),
            kind.name(),
            state_name,
            inner
        )
    }

    fn notice(&self, kind: SectionKind, state: &str, message: &str) -> Result<String> {
        let mut context = Context::new();
        context.insert("state", state);
        context.insert("title", &kind.title());
        context.insert("message", message);
        self.templates.render("partials/state.html", &context)
    }

    /// Section markup as shown before its data arrives
    pub fn placeholder(&self, kind: SectionKind) -> String {
        self.section(kind, &SectionState::<()>::Loading(kind.placeholder()))
    }

    /// Fetch one section's data and render the settled state
    pub async fn resolve_section(&self, kind: SectionKind, fetcher: &ContentFetcher) -> String {
        match kind {
            SectionKind::Hero | SectionKind::Contact => {
                self.section(kind, &SectionState::from_optional(fetcher.get_profile().await))
            }
            SectionKind::Work => self.section(
                kind,
                &SectionState::from_list(fetcher.list_work_experience().await),
            ),
            SectionKind::Education => {
                self.section(kind, &SectionState::from_list(fetcher.list_education().await))
            }
            SectionKind::Projects => {
                self.section(kind, &SectionState::from_list(fetcher.list_projects().await))
            }
            SectionKind::Posts => {
                let state = SectionState::from_list(fetcher.list_published_posts().await)
                    .map(|posts| self.summaries(&posts));
                self.section(kind, &state)
            }
        }
    }

    fn summaries(&self, posts: &[Post]) -> Vec<PostSummary> {
        posts
            .iter()
            .map(|post| PostSummary {
                title: post.title.clone(),
                url: post_url(&self.config, &post.slug),
                date: post
                    .published_at
                    .map(|d| format_date(&d, &self.config.date_format)),
                summary: post.summary.clone(),
            })
            .collect()
    }

    /// Render a page with every section settled
    pub async fn render_page(&self, page: PageKind, fetcher: &ContentFetcher) -> Result<String> {
        let kinds = page.sections();
        let rendered = join_all(kinds.iter().map(|k| self.resolve_section(*k, fetcher))).await;
        let mut by_kind: HashMap<SectionKind, String> = kinds.into_iter().zip(rendered).collect();

        let body = page.arrange(|kind| by_kind.remove(&kind).unwrap_or_default());
        self.layout(Some(page.title()), page.path(), "page", &body, false)
    }

    /// Stream a page: shell with placeholders, then sections as they settle
    ///
    /// Every chunk after the shell carries a `<template>` with the settled
    /// section and a call that swaps it into its slot.
    pub fn stream_page(
        self: Arc<Self>,
        page: PageKind,
        fetcher: ContentFetcher,
    ) -> Result<impl Stream<Item = String> + Send + 'static> {
        let shell = page.arrange(|kind| self.placeholder(kind));
        let document = self.layout(
            Some(page.title()),
            page.path(),
            "page",
            &format!("{}{}", shell, BODY_MARKER),
            true,
        )?;
        let (head, tail) = document
            .split_once(BODY_MARKER)
            .map(|(h, t)| (h.to_string(), t.to_string()))
            .ok_or_else(|| anyhow!("layout dropped the section marker"))?;

        let pending: FuturesUnordered<BoxFuture<'static, String>> = page
            .sections()
            .into_iter()
            .map(|kind| {
                let renderer = Arc::clone(&self);
                let fetcher = fetcher.clone();
                async move {
                    let html = renderer.resolve_section(kind, &fetcher).await;
                    swap_chunk(kind, &html)
                }
                .boxed()
            })
            .collect();

        Ok(stream::once(ready(head))
            .chain(pending)
            .chain(stream::once(ready(tail))))
    }

    /// Render the page for a single post
    ///
    /// Unpublished posts are served only when `include_drafts` is set.
    pub async fn render_post(
        &self,
        slug: &str,
        fetcher: &ContentFetcher,
        dispatcher: &ContentDispatcher,
        include_drafts: bool,
    ) -> Result<PostPage> {
        let (status, post, title) = match fetcher.get_post_by_slug(slug).await {
            Ok(Some(post)) if post.is_published || include_drafts => {
                match dispatcher.render(&post).await {
                    Ok(rendered) => {
                        let title = rendered.title.clone();
                        (PostStatus::Found, Some(rendered), title)
                    }
                    Err(e) => {
                        tracing::error!("Error loading post {}: {}", slug, e);
                        (PostStatus::Error, None, "Error".to_string())
                    }
                }
            }
            Ok(_) => (PostStatus::NotFound, None, "Not Found".to_string()),
            Err(e) => {
                tracing::error!("Error loading post {}: {}", slug, e);
                (PostStatus::Error, None, "Error".to_string())
            }
        };

        let message = match status {
            PostStatus::Found => "",
            PostStatus::NotFound => POST_NOT_FOUND,
            PostStatus::Error => POST_ERROR,
        };

        let mut context = Context::new();
        context.insert("post", &post);
        context.insert("message", message);
        let body = self.templates.render("post.html", &context)?;
        let html = self.layout(Some(&title), PageKind::Blog.path(), "post", &body, false)?;

        Ok(PostPage { status, html })
    }

    /// Render the page shown for unknown routes
    pub fn render_not_found(&self) -> Result<String> {
        let mut context = Context::new();
        context.insert("post", &Option::<RenderedPost>::None);
        context.insert("message", PAGE_NOT_FOUND);
        let body = self.templates.render("post.html", &context)?;
        self.layout(Some("Not Found"), "", "not-found", &body, false)
    }

    /// Render the Atom feed of published posts
    pub async fn render_feed(&self, fetcher: &ContentFetcher) -> Result<String> {
        let posts = fetcher.list_published_posts().await?;
        let updated = posts
            .iter()
            .filter_map(|p| p.published_at)
            .max()
            .unwrap_or_else(Utc::now);

        let entries: Vec<FeedEntry> = posts
            .iter()
            .map(|post| FeedEntry {
                title: post.title.clone(),
                permalink: full_url_for(
                    &self.config,
                    &format!("blog/{}", encode_url(&post.slug)),
                ),
                author: post.author.clone(),
                summary: post.summary.clone(),
                published: post.published_at.map(|d| date_xml(&d)),
                updated: date_xml(&post.published_at.unwrap_or(updated)),
            })
            .collect();

        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.config));
        context.insert("feed_url", &full_url_for(&self.config, "blog/atom.xml"));
        context.insert("blog_url", &full_url_for(&self.config, "blog"));
        context.insert("updated", &date_xml(&updated));
        context.insert("posts", &entries);
        self.templates.render("atom.xml", &context)
    }

    fn layout(
        &self,
        page_title: Option<&str>,
        current: &str,
        main_class: &str,
        body: &str,
        streaming: bool,
    ) -> Result<String> {
        let mut context = Context::new();
        context.insert("site", &SiteData::from_config(&self.config));
        context.insert("page_title", &page_title);
        context.insert("version", env!("CARGO_PKG_VERSION"));
        context.insert("feed_url", &full_url_for(&self.config, "blog/atom.xml"));
        context.insert("menu", &MenuLink::build(&self.config, current));
        context.insert("root", &crate::helpers::url_for(&self.config, "/"));
        context.insert("main_class", main_class);
        context.insert("streaming", &streaming);
        context.insert("body", body);
        self.templates.render("layout.html", &context)
    }
}

/// Out-of-order chunk that replaces a section's placeholder
fn swap_chunk(kind: SectionKind, html: &str) -> String {
    format!(
        r#"<template data-section="{id}">{html}</template><script>folioSwap("{id}")</script>"#,
        id = kind.id(),
        html = html
    )
}
