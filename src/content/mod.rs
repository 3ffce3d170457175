//! Content module - entities, post files and markdown processing

mod files;
mod frontmatter;
mod markdown;
mod model;

pub use files::{is_valid_slug, ContentDir, PostFile, PostFileError, PostFiles};
pub use frontmatter::{FrontMatter, FrontMatterError};
pub use markdown::MarkdownRenderer;
pub use model::{
    Contact, ContentSource, Education, Post, PostContent, Profile, Project, Social,
    UnknownSource, WorkExperience,
};
