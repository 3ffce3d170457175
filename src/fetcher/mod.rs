//! Content fetcher
//!
//! Reads collections from a [`RecordStore`] and normalizes them for rendering:
//! lists are sorted, unpublished posts are dropped from the listing, the post
//! source discriminator becomes a [`PostContent`] variant, and every attachment
//! reference is swapped for a URL.
//!
//! Attachment lookups for one entity or one list are issued together, so a
//! fetch waits for the slowest lookup rather than the sum of them. A lookup
//! that fails leaves its field empty; it never fails the fetch.

use chrono::{DateTime, Utc};
use futures::future::join_all;
use std::sync::Arc;
use thiserror::Error;

use crate::content::{
    ContentSource, Education, Post, PostContent, Profile, Project, Social, WorkExperience,
};
use crate::store::{AttachmentResolver, PostRecord, RecordStore, StorageId, StoreError};

#[derive(Debug, Error)]
pub enum FetchError {
    #[error(transparent)]
    Store(#[from] StoreError),

    #[error("post `{slug}` has unknown content source `{value}`")]
    UnknownSource { slug: String, value: String },
}

/// Normalizing reader over a record store and an attachment resolver
#[derive(Clone)]
pub struct ContentFetcher {
    store: Arc<dyn RecordStore>,
    resolver: Arc<dyn AttachmentResolver>,
}

impl ContentFetcher {
    pub fn new(store: Arc<dyn RecordStore>, resolver: Arc<dyn AttachmentResolver>) -> Self {
        Self { store, resolver }
    }

    /// The site profile, or `None` when no profile row exists
    pub async fn get_profile(&self) -> Result<Option<Profile>, FetchError> {
        let Some(record) = self.store.profile().await? else {
            return Ok(None);
        };

        let icons = join_all(record.socials.iter().map(|s| self.resolve(s.icon.as_ref())));
        let (profile_image, icons) =
            tokio::join!(self.resolve(record.profile_image.as_ref()), icons);

        let socials = record
            .socials
            .into_iter()
            .zip(icons)
            .map(|(social, icon_url)| Social {
                platform: social.platform,
                url: social.url,
                icon_url,
            })
            .collect();

        Ok(Some(Profile {
            name: record.name,
            subtitle: record.subtitle,
            description: record.description,
            contact: record.contact,
            profile_image,
            socials,
        }))
    }

    /// Work history in ascending `order`
    pub async fn list_work_experience(&self) -> Result<Vec<WorkExperience>, FetchError> {
        let mut entries: Vec<WorkExperience> = self
            .store
            .work_experience()
            .await?
            .into_iter()
            .map(|r| WorkExperience {
                company: r.company,
                title: r.title,
                start_date: r.start_date,
                end_date: r.end_date,
                duties: r.duties,
                order: r.order,
            })
            .collect();
        entries.sort_by(|a, b| a.order.total_cmp(&b.order));
        Ok(entries)
    }

    /// Education in ascending `order`
    pub async fn list_education(&self) -> Result<Vec<Education>, FetchError> {
        let mut entries: Vec<Education> = self
            .store
            .education()
            .await?
            .into_iter()
            .map(|r| Education {
                institution: r.institution,
                degree: r.degree,
                start_date: r.start_date,
                end_date: r.end_date,
                order: r.order,
            })
            .collect();
        entries.sort_by(|a, b| a.order.total_cmp(&b.order));
        Ok(entries)
    }

    /// Projects in ascending `order`, images resolved
    pub async fn list_projects(&self) -> Result<Vec<Project>, FetchError> {
        let records = self.store.projects().await?;
        let images = join_all(records.iter().map(|r| self.resolve(r.image.as_ref()))).await;

        let mut projects: Vec<Project> = records
            .into_iter()
            .zip(images)
            .map(|(r, image)| Project {
                title: r.title,
                description: r.description,
                image,
                url: r.url,
                order: r.order,
            })
            .collect();
        projects.sort_by(|a, b| a.order.total_cmp(&b.order));
        Ok(projects)
    }

    /// Published posts, most recent first; undated posts sort last
    ///
    /// A post with an unknown source is left out of the listing and logged.
    pub async fn list_published_posts(&self) -> Result<Vec<Post>, FetchError> {
        let mut posts: Vec<Post> = self
            .store
            .published_posts()
            .await?
            .into_iter()
            .filter(|r| r.is_published)
            .filter_map(|r| match normalize_post(r) {
                Ok(post) => Some(post),
                Err(e) => {
                    tracing::warn!("Skipping post in listing: {}", e);
                    None
                }
            })
            .collect();
        posts.sort_by(|a, b| b.published_at.cmp(&a.published_at));
        Ok(posts)
    }

    /// The post with `slug`, or `None` when no such post exists
    pub async fn get_post_by_slug(&self, slug: &str) -> Result<Option<Post>, FetchError> {
        match self.store.post_by_slug(slug).await? {
            Some(record) if record.slug == slug => Ok(Some(normalize_post(record)?)),
            _ => Ok(None),
        }
    }

    /// Resolve an optional reference, folding any failure into `None`
    async fn resolve(&self, reference: Option<&StorageId>) -> Option<String> {
        let reference = reference?;
        match self.resolver.resolve_url(reference).await {
            Ok(Some(url)) => Some(url),
            Ok(None) => {
                tracing::warn!("Attachment {} has no URL, rendering without it", reference);
                None
            }
            Err(e) => {
                tracing::warn!("{}, rendering without it", e);
                None
            }
        }
    }
}

/// Decide a post's content strategy from its source discriminator
fn normalize_post(record: PostRecord) -> Result<Post, FetchError> {
    let source: ContentSource =
        record
            .source
            .parse()
            .map_err(|_| FetchError::UnknownSource {
                slug: record.slug.clone(),
                value: record.source.clone(),
            })?;

    let content = match source {
        ContentSource::Database => PostContent::DatabaseBacked {
            body: record.body.unwrap_or_default(),
        },
        ContentSource::File => PostContent::FileBacked,
    };

    Ok(Post {
        title: record.title,
        slug: record.slug,
        author: record.author,
        published_at: record
            .published_at
            .and_then(DateTime::<Utc>::from_timestamp_millis),
        is_published: record.is_published,
        summary: record.summary,
        content,
    })
}
