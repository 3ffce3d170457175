//! Externally authored post files

use async_trait::async_trait;
use std::path::{Path, PathBuf};
use thiserror::Error;

use super::{FrontMatter, FrontMatterError};

/// A post file split into metadata and renderable body
#[derive(Debug, Clone, PartialEq)]
pub struct PostFile {
    pub metadata: FrontMatter,
    pub body: String,
}

#[derive(Debug, Error)]
pub enum PostFileError {
    #[error("no post file for `{slug}` at {path:?}")]
    NotFound { slug: String, path: PathBuf },

    #[error("`{0}` is not a valid post slug")]
    InvalidSlug(String),

    #[error("failed to read {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("failed to parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// Source of file-backed post content, keyed by slug
#[async_trait]
pub trait PostFiles: Send + Sync {
    async fn read_post(&self, slug: &str) -> Result<PostFile, PostFileError>;
}

/// Post files stored as `{dir}/{slug}.{extension}`
#[derive(Debug, Clone)]
pub struct ContentDir {
    dir: PathBuf,
    extension: String,
}

impl ContentDir {
    pub fn new<P: AsRef<Path>>(dir: P, extension: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }

    /// Path of the file for `slug`
    pub fn path_for(&self, slug: &str) -> Result<PathBuf, PostFileError> {
        if !is_valid_slug(slug) {
            return Err(PostFileError::InvalidSlug(slug.to_string()));
        }
        Ok(self.dir.join(format!("{}.{}", slug, self.extension)))
    }
}

/// Slugs are URL-safe: exactly what `slug::slugify` would produce
pub fn is_valid_slug(slug: &str) -> bool {
    !slug.is_empty() && slug::slugify(slug) == slug
}

#[async_trait]
impl PostFiles for ContentDir {
    async fn read_post(&self, slug: &str) -> Result<PostFile, PostFileError> {
        let path = self.path_for(slug)?;

        let content = match tokio::fs::read_to_string(&path).await {
            Ok(content) => content,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                return Err(PostFileError::NotFound {
                    slug: slug.to_string(),
                    path,
                })
            }
            Err(source) => return Err(PostFileError::Io { path, source }),
        };

        let (metadata, body) = match FrontMatter::parse(&content) {
            Ok((metadata, body)) => (metadata, body.to_string()),
            Err(source) => return Err(PostFileError::Parse { path, source }),
        };

        tracing::debug!("Read post file {:?}", path);
        Ok(PostFile { metadata, body })
    }
}
