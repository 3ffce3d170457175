//! Record store and attachment resolver abstractions
//!
//! The site never writes content. It reads five collections through
//! [`RecordStore`] and turns attachment storage ids into URLs through
//! [`AttachmentResolver`]. Both are passed around as trait objects so the
//! fetcher can run against the bundled file backend or a test fake.

mod assets;
mod file;
mod memory;
mod records;

pub use assets::LocalAssets;
pub use file::FileStore;
pub use memory::{MemoryStore, Records};
pub use records::{
    EducationRecord, PostRecord, ProfileRecord, ProjectRecord, SocialRecord, StorageId,
    WorkExperienceRecord,
};

use async_trait::async_trait;
use std::path::PathBuf;
use thiserror::Error;

/// Errors raised by store and resolver backends
#[derive(Debug, Error)]
pub enum StoreError {
    #[error("failed to read records from {path:?}: {source}")]
    Io {
        path: PathBuf,
        #[source]
        source: std::io::Error,
    },

    #[error("malformed records file {path:?}: {message}")]
    Decode { path: PathBuf, message: String },

    #[error("duplicate post slug `{0}`")]
    DuplicateSlug(String),

    #[error("post slug `{0}` is not a canonical slug")]
    InvalidSlug(String),

    #[error("attachment `{reference}` is not resolvable: {reason}")]
    Attachment {
        reference: StorageId,
        reason: String,
    },

    #[error("record store unavailable: {0}")]
    Unavailable(String),
}

/// Read-only query interface over the site's content collections
///
/// Collections come back in insertion order; ordering by `order` or
/// `published_at` is the fetcher's job.
#[async_trait]
pub trait RecordStore: Send + Sync {
    /// First profile row, if any
    async fn profile(&self) -> Result<Option<ProfileRecord>, StoreError>;

    async fn work_experience(&self) -> Result<Vec<WorkExperienceRecord>, StoreError>;

    async fn education(&self) -> Result<Vec<EducationRecord>, StoreError>;

    async fn projects(&self) -> Result<Vec<ProjectRecord>, StoreError>;

    /// Posts whose `is_published` flag is set
    async fn published_posts(&self) -> Result<Vec<PostRecord>, StoreError>;

    /// The post with this slug, published or not
    async fn post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, StoreError>;
}

/// Maps a stored attachment reference to a URL a browser can fetch
#[async_trait]
pub trait AttachmentResolver: Send + Sync {
    /// `Ok(None)` means the reference is known to be dangling
    async fn resolve_url(&self, reference: &StorageId) -> Result<Option<String>, StoreError>;
}
