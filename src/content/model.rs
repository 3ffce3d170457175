//! Normalized content entities
//!
//! These are the shapes the rendering layer sees. Every attachment field is
//! already a fetchable URL (or absent); storage ids stay in [`crate::store`].

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;

/// Contact details shown beside the profile
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct Contact {
    pub email: String,
    pub phone: String,
    pub location: String,
}

/// The site owner's profile
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Profile {
    pub name: String,
    pub subtitle: String,
    pub description: String,
    pub contact: Contact,
    pub profile_image: Option<String>,
    pub socials: Vec<Social>,
}

/// A social link with its resolved icon
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Social {
    pub platform: String,
    pub url: String,
    pub icon_url: Option<String>,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct WorkExperience {
    pub company: String,
    pub title: String,
    pub start_date: String,
    pub end_date: String,
    pub duties: Vec<String>,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Education {
    pub institution: String,
    pub degree: String,
    pub start_date: String,
    pub end_date: String,
    pub order: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Project {
    pub title: String,
    pub description: String,
    pub image: Option<String>,
    pub url: String,
    pub order: f64,
}

/// A blog post with its content strategy already decided
#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct Post {
    pub title: String,
    pub slug: String,
    pub author: String,
    pub published_at: Option<DateTime<Utc>>,
    pub is_published: bool,
    pub summary: String,
    pub content: PostContent,
}

impl Post {
    pub fn source(&self) -> ContentSource {
        match self.content {
            PostContent::DatabaseBacked { .. } => ContentSource::Database,
            PostContent::FileBacked => ContentSource::File,
        }
    }
}

/// Where a post's renderable body lives
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(tag = "kind", rename_all = "snake_case")]
pub enum PostContent {
    /// Markdown stored alongside the record
    DatabaseBacked { body: String },
    /// Markdown file named after the slug in the content directory
    FileBacked,
}

/// The `source` discriminator as written in the record store
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ContentSource {
    Database,
    File,
}

impl ContentSource {
    pub fn as_str(&self) -> &'static str {
        match self {
            ContentSource::Database => "database",
            ContentSource::File => "mdx",
        }
    }
}

impl fmt::Display for ContentSource {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

/// Error for a `source` value outside the known discriminators
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct UnknownSource(pub String);

impl FromStr for ContentSource {
    type Err = UnknownSource;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "database" | "database-stored" => Ok(ContentSource::Database),
            "mdx" | "externally-authored-file" => Ok(ContentSource::File),
            other => Err(UnknownSource(other.to_string())),
        }
    }
}
