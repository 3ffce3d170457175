//! Records-file backed store

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{
    EducationRecord, MemoryStore, PostRecord, ProfileRecord, ProjectRecord, RecordStore, Records,
    StoreError, WorkExperienceRecord,
};

/// Record store that re-reads its file on every query
///
/// Each query sees the file as it is at that moment, so a running server picks
/// up content edits without a restart.
#[derive(Debug, Clone)]
pub struct FileStore {
    path: PathBuf,
}

impl FileStore {
    pub fn new<P: AsRef<Path>>(path: P) -> Self {
        Self {
            path: path.as_ref().to_path_buf(),
        }
    }

    async fn snapshot(&self) -> Result<MemoryStore, StoreError> {
        let content = match tokio::fs::read_to_string(&self.path).await {
            Ok(content) => content,
            // No records file is an empty site
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => {
                tracing::debug!("Records file {:?} not found, serving empty site", self.path);
                return Ok(MemoryStore::default());
            }
            Err(source) => {
                return Err(StoreError::Io {
                    path: self.path.clone(),
                    source,
                })
            }
        };
        MemoryStore::new(Records::parse(&self.path, &content)?)
    }
}

#[async_trait]
impl RecordStore for FileStore {
    async fn profile(&self) -> Result<Option<ProfileRecord>, StoreError> {
        self.snapshot().await?.profile().await
    }

    async fn work_experience(&self) -> Result<Vec<WorkExperienceRecord>, StoreError> {
        self.snapshot().await?.work_experience().await
    }

    async fn education(&self) -> Result<Vec<EducationRecord>, StoreError> {
        self.snapshot().await?.education().await
    }

    async fn projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        self.snapshot().await?.projects().await
    }

    async fn published_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        self.snapshot().await?.published_posts().await
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, StoreError> {
        self.snapshot().await?.post_by_slug(slug).await
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    #[tokio::test]
    async fn test_missing_file_is_empty_site() {
        let dir = TempDir::new().unwrap();
        let store = FileStore::new(dir.path().join("records.yml"));
        assert!(store.profile().await.unwrap().is_none());
        assert!(store.projects().await.unwrap().is_empty());
    }

    #[tokio::test]
    async fn test_sees_edits_between_queries() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.yml");
        std::fs::write(
            &path,
            "education:\n  - {institution: A, degree: X, order: 1}\n",
        )
        .unwrap();
        let store = FileStore::new(&path);
        assert_eq!(store.education().await.unwrap().len(), 1);

        std::fs::write(
            &path,
            "education:\n  - {institution: A, degree: X, order: 1}\n  - {institution: B, degree: Y, order: 2}\n",
        )
        .unwrap();
        assert_eq!(store.education().await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_malformed_file_is_an_error() {
        let dir = TempDir::new().unwrap();
        let path = dir.path().join("records.yml");
        std::fs::write(&path, "projects: {").unwrap();
        let store = FileStore::new(&path);
        assert!(matches!(
            store.projects().await,
            Err(StoreError::Decode { .. })
        ));
    }
}
