//! Attachment resolution against a local asset directory

use async_trait::async_trait;
use std::path::{Path, PathBuf};

use super::{AttachmentResolver, StoreError, StorageId};
use crate::helpers::encode_url;

/// Resolves storage ids to files under `dir`, served at `base_url`
#[derive(Debug, Clone)]
pub struct LocalAssets {
    dir: PathBuf,
    base_url: String,
}

impl LocalAssets {
    pub fn new<P: AsRef<Path>>(dir: P, base_url: &str) -> Self {
        Self {
            dir: dir.as_ref().to_path_buf(),
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }
}

/// A storage id must name a single file inside the asset directory
fn is_plain_file_name(id: &str) -> bool {
    !id.is_empty()
        && id != "."
        && id != ".."
        && !id.contains(['/', '\\'])
        && !id.starts_with('.')
}

#[async_trait]
impl AttachmentResolver for LocalAssets {
    async fn resolve_url(&self, reference: &StorageId) -> Result<Option<String>, StoreError> {
        if !is_plain_file_name(reference.as_str()) {
            return Err(StoreError::Attachment {
                reference: reference.clone(),
                reason: "storage id is not a plain file name".to_string(),
            });
        }

        let path = self.dir.join(reference.as_str());
        match tokio::fs::metadata(&path).await {
            Ok(meta) if meta.is_file() => Ok(Some(format!(
                "{}/{}",
                self.base_url,
                encode_url(reference.as_str())
            ))),
            Ok(_) => Ok(None),
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(StoreError::Attachment {
                reference: reference.clone(),
                reason: e.to_string(),
            }),
        }
    }
}
