//! Content-format dispatch for single posts
//!
//! A post is either database-backed (its Markdown body came with the record)
//! or file-backed (its body lives in `{slug}.{ext}` in the content directory).
//! The variant was fixed by the fetcher; this module only renders it.

use std::sync::Arc;

use crate::content::{MarkdownRenderer, Post, PostContent, PostFileError, PostFiles};
use crate::helpers::{date_xml, format_date};
use crate::templates::RenderedPost;

/// Renders a resolved post by its content strategy
pub struct ContentDispatcher {
    files: Arc<dyn PostFiles>,
    markdown: Arc<MarkdownRenderer>,
    date_format: String,
}

impl ContentDispatcher {
    pub fn new(
        files: Arc<dyn PostFiles>,
        markdown: Arc<MarkdownRenderer>,
        date_format: &str,
    ) -> Self {
        Self {
            files,
            markdown,
            date_format: date_format.to_string(),
        }
    }

    /// Produce the article for `post`
    ///
    /// File-backed posts take their title from the file's front-matter;
    /// database-backed posts use the record's title.
    pub async fn render(&self, post: &Post) -> Result<RenderedPost, PostFileError> {
        match &post.content {
            PostContent::DatabaseBacked { body } => Ok(RenderedPost {
                title: post.title.clone(),
                author: post.author.clone(),
                date: post.published_at.map(|d| format_date(&d, &self.date_format)),
                datetime: post.published_at.map(|d| date_xml(&d)),
                html: self.markdown.render(body),
            }),
            PostContent::FileBacked => {
                let file = self.files.read_post(&post.slug).await?;
                let published = post.published_at.or_else(|| file.metadata.parse_date());
                Ok(RenderedPost {
                    title: file
                        .metadata
                        .title
                        .clone()
                        .unwrap_or_else(|| post.slug.clone()),
                    author: file
                        .metadata
                        .author
                        .clone()
                        .unwrap_or_else(|| post.author.clone()),
                    date: published.map(|d| format_date(&d, &self.date_format)),
                    datetime: published.map(|d| date_xml(&d)),
                    html: self.markdown.render(&file.body),
                })
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::content::ContentDir;
    use chrono::{TimeZone, Utc};
    use tempfile::TempDir;

    fn post(slug: &str, content: PostContent) -> Post {
        Post {
            title: "Record Title".to_string(),
            slug: slug.to_string(),
            author: "Record Author".to_string(),
            published_at: Some(Utc.with_ymd_and_hms(2024, 3, 9, 12, 0, 0).unwrap()),
            is_published: true,
            summary: String::new(),
            content,
        }
    }

    fn dispatcher(dir: &TempDir) -> ContentDispatcher {
        ContentDispatcher::new(
            Arc::new(ContentDir::new(dir.path(), "mdx")),
            Arc::new(MarkdownRenderer::new()),
            "YYYY-MM-DD",
        )
    }

    #[tokio::test]
    async fn test_database_backed_uses_record_title() {
        let dir = TempDir::new().unwrap();
        let rendered = dispatcher(&dir)
            .render(&post(
                "db-post",
                PostContent::DatabaseBacked {
                    body: "Some *emphasis*.".to_string(),
                },
            ))
            .await
            .unwrap();

        assert_eq!(rendered.title, "Record Title");
        assert_eq!(rendered.date.as_deref(), Some("2024-03-09"));
        assert!(rendered.html.contains("<em>emphasis</em>"));
    }

    #[tokio::test]
    async fn test_file_backed_uses_front_matter_title() {
        let dir = TempDir::new().unwrap();
        std::fs::write(
            dir.path().join("hello-world.mdx"),
            "---\ntitle: Title From File\nauthor: File Author\n---\nHello **there**.\n",
        )
        .unwrap();

        let rendered = dispatcher(&dir)
            .render(&post("hello-world", PostContent::FileBacked))
            .await
            .unwrap();

        assert_eq!(rendered.title, "Title From File");
        assert_eq!(rendered.author, "File Author");
        assert!(rendered.html.contains("<strong>there</strong>"));
        assert!(!rendered.html.contains("title:"));
    }

    #[tokio::test]
    async fn test_file_backed_without_title_falls_back_to_slug() {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("untitled.mdx"), "Just a body.\n").unwrap();

        let mut p = post("untitled", PostContent::FileBacked);
        p.published_at = None;
        let rendered = dispatcher(&dir).render(&p).await.unwrap();
        assert_eq!(rendered.title, "untitled");
        assert_eq!(rendered.author, "Record Author");
        assert_eq!(rendered.date, None);
    }

    #[tokio::test]
    async fn test_file_backed_missing_file() {
        let dir = TempDir::new().unwrap();
        let err = dispatcher(&dir)
            .render(&post("hello-world", PostContent::FileBacked))
            .await
            .unwrap_err();
        assert!(matches!(err, PostFileError::NotFound { .. }));
    }
}
