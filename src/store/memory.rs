//! In-process record store

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::collections::HashSet;
use std::path::Path;

use crate::content::is_valid_slug;

use super::{
    EducationRecord, PostRecord, ProfileRecord, ProjectRecord, RecordStore, StoreError,
    WorkExperienceRecord,
};

/// Every collection of the site, as laid out in a records file
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Records {
    pub profile: Vec<ProfileRecord>,
    pub work_experience: Vec<WorkExperienceRecord>,
    pub education: Vec<EducationRecord>,
    pub projects: Vec<ProjectRecord>,
    pub posts: Vec<PostRecord>,
}

impl Records {
    /// Decode a records document. JSON when the path ends in `.json`, YAML otherwise.
    pub fn parse(path: &Path, content: &str) -> Result<Self, StoreError> {
        let is_json = path
            .extension()
            .and_then(|e| e.to_str())
            .map(|e| e.eq_ignore_ascii_case("json"))
            .unwrap_or(false);

        let decoded = if is_json {
            serde_json::from_str(content).map_err(|e| e.to_string())
        } else {
            serde_yaml::from_str(content).map_err(|e| e.to_string())
        };

        decoded.map_err(|message| StoreError::Decode {
            path: path.to_path_buf(),
            message,
        })
    }
}

/// Record store holding all rows in memory
#[derive(Debug, Clone, Default)]
pub struct MemoryStore {
    records: Records,
}

impl MemoryStore {
    /// Wrap a set of records, rejecting malformed and duplicate post slugs
    ///
    /// Slugs become URL segments and output paths, so only canonical
    /// slugs are accepted.
    pub fn new(records: Records) -> Result<Self, StoreError> {
        let mut seen = HashSet::new();
        for post in &records.posts {
            if !is_valid_slug(&post.slug) {
                return Err(StoreError::InvalidSlug(post.slug.clone()));
            }
            if !seen.insert(post.slug.as_str()) {
                return Err(StoreError::DuplicateSlug(post.slug.clone()));
            }
        }
        Ok(Self { records })
    }

    pub fn records(&self) -> &Records {
        &self.records
    }
}

#[async_trait]
impl RecordStore for MemoryStore {
    async fn profile(&self) -> Result<Option<ProfileRecord>, StoreError> {
        Ok(self.records.profile.first().cloned())
    }

    async fn work_experience(&self) -> Result<Vec<WorkExperienceRecord>, StoreError> {
        Ok(self.records.work_experience.clone())
    }

    async fn education(&self) -> Result<Vec<EducationRecord>, StoreError> {
        Ok(self.records.education.clone())
    }

    async fn projects(&self) -> Result<Vec<ProjectRecord>, StoreError> {
        Ok(self.records.projects.clone())
    }

    async fn published_posts(&self) -> Result<Vec<PostRecord>, StoreError> {
        Ok(self
            .records
            .posts
            .iter()
            .filter(|p| p.is_published)
            .cloned()
            .collect())
    }

    async fn post_by_slug(&self, slug: &str) -> Result<Option<PostRecord>, StoreError> {
        Ok(self.records.posts.iter().find(|p| p.slug == slug).cloned())
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::path::PathBuf;

    fn post(slug: &str, published: bool) -> PostRecord {
        PostRecord {
            title: slug.to_string(),
            slug: slug.to_string(),
            author: "me".to_string(),
            published_at: None,
            is_published: published,
            summary: String::new(),
            body: None,
            source: "database".to_string(),
        }
    }

    #[test]
    fn test_rejects_duplicate_slugs() {
        let records = Records {
            posts: vec![post("a", true), post("b", false), post("a", false)],
            ..Default::default()
        };
        let err = MemoryStore::new(records).unwrap_err();
        assert!(matches!(err, StoreError::DuplicateSlug(slug) if slug == "a"));
    }

    #[test]
    fn test_rejects_non_canonical_slugs() {
        for slug in ["../../outside", "/abs/path", "Hello World", ""] {
            let records = Records {
                posts: vec![post("fine", true), post(slug, true)],
                ..Default::default()
            };
            let err = MemoryStore::new(records).unwrap_err();
            assert!(matches!(err, StoreError::InvalidSlug(ref s) if s == slug));
        }
    }

    #[test]
    fn test_parse_yaml_records() {
        let yaml = r#"
profile:
  - name: Ada
    subtitle: Engineer
    contact:
      email: ada@example.com
    profile_image: kg2abc
    socials:
      - platform: GitHub
        url: https://github.com/ada
        icon: kg2icon
projects:
  - title: Engine
    image: kg2img
    url: https://example.com
    order: 1
posts:
  - title: Hello
    slug: hello
    published_at: 1700000000000
    is_published: true
    source: mdx
"#;
        let records = Records::parse(&PathBuf::from("records.yml"), yaml).unwrap();
        assert_eq!(records.profile[0].contact.email, "ada@example.com");
        assert_eq!(records.profile[0].contact.phone, "");
        assert_eq!(
            records.profile[0].socials[0].icon.as_ref().map(|s| s.as_str()),
            Some("kg2icon")
        );
        assert_eq!(records.projects[0].order, 1.0);
        assert_eq!(records.posts[0].source, "mdx");
        assert!(records.work_experience.is_empty());
    }

    #[test]
    fn test_parse_json_records() {
        let json = r#"{"education": [{"institution": "MIT", "degree": "BSc", "order": 2}]}"#;
        let records = Records::parse(&PathBuf::from("site.JSON"), json).unwrap();
        assert_eq!(records.education[0].institution, "MIT");
    }

    #[test]
    fn test_parse_reports_path() {
        let err = Records::parse(&PathBuf::from("broken.yml"), "posts: [").unwrap_err();
        assert!(err.to_string().contains("broken.yml"));
    }

    #[tokio::test]
    async fn test_queries() {
        let records = Records {
            posts: vec![post("draft", false), post("live", true)],
            ..Default::default()
        };
        let store = MemoryStore::new(records).unwrap();

        assert!(store.profile().await.unwrap().is_none());
        let published = store.published_posts().await.unwrap();
        assert_eq!(published.len(), 1);
        assert_eq!(published[0].slug, "live");
        assert!(store.post_by_slug("draft").await.unwrap().is_some());
        assert!(store.post_by_slug("missing").await.unwrap().is_none());
    }
}
