//! Raw rows as the record store holds them

use serde::{Deserialize, Serialize};
use std::fmt;

use crate::content::Contact;

/// Opaque reference to an uploaded file in attachment storage
#[derive(Debug, Clone, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(transparent)]
pub struct StorageId(String);

impl StorageId {
    pub fn new(id: impl Into<String>) -> Self {
        Self(id.into())
    }

    pub fn as_str(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for StorageId {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProfileRecord {
    pub name: String,
    #[serde(default)]
    pub subtitle: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub contact: Contact,
    #[serde(default)]
    pub profile_image: Option<StorageId>,
    #[serde(default)]
    pub socials: Vec<SocialRecord>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct SocialRecord {
    pub platform: String,
    #[serde(default)]
    pub url: String,
    #[serde(default)]
    pub icon: Option<StorageId>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WorkExperienceRecord {
    pub company: String,
    pub title: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    #[serde(default)]
    pub duties: Vec<String>,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct EducationRecord {
    pub institution: String,
    pub degree: String,
    #[serde(default)]
    pub start_date: String,
    #[serde(default)]
    pub end_date: String,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProjectRecord {
    pub title: String,
    #[serde(default)]
    pub description: String,
    #[serde(default)]
    pub image: Option<StorageId>,
    #[serde(default)]
    pub url: String,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct PostRecord {
    pub title: String,
    pub slug: String,
    #[serde(default)]
    pub author: String,
    /// Milliseconds since the Unix epoch
    #[serde(default)]
    pub published_at: Option<i64>,
    #[serde(default)]
    pub is_published: bool,
    #[serde(default)]
    pub summary: String,
    #[serde(default)]
    pub body: Option<String>,
    /// Kept as text so an unknown discriminator surfaces per post, not per load
    pub source: String,
}
