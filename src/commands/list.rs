//! List site content

use anyhow::{bail, Result};

use crate::Folio;

/// List site content by type
pub async fn run(folio: &Folio, content_type: &str) -> Result<()> {
    for line in describe(folio, content_type).await? {
        println!("{}", line);
    }
    Ok(())
}

/// Lines describing one collection, in render order
pub async fn describe(folio: &Folio, content_type: &str) -> Result<Vec<String>> {
    let fetcher = folio.fetcher();
    let mut lines = Vec::new();

    match content_type {
        "profile" => match fetcher.get_profile().await? {
            Some(profile) => {
                lines.push(format!("Profile: {}", profile.name));
                if !profile.subtitle.is_empty() {
                    lines.push(format!("  {}", profile.subtitle));
                }
                for social in profile.socials {
                    lines.push(format!("  {} - {}", social.platform, social.url));
                }
            }
            None => lines.push("Profile: none".to_string()),
        },
        "work" => {
            let jobs = fetcher.list_work_experience().await?;
            lines.push(format!("Work experience ({}):", jobs.len()));
            for job in jobs {
                lines.push(format!(
                    "  {} - {} [{} - {}]",
                    job.company, job.title, job.start_date, job.end_date
                ));
            }
        }
        "education" => {
            let entries = fetcher.list_education().await?;
            lines.push(format!("Education ({}):", entries.len()));
            for edu in entries {
                lines.push(format!("  {} - {}", edu.institution, edu.degree));
            }
        }
        "project" | "projects" => {
            let projects = fetcher.list_projects().await?;
            lines.push(format!("Projects ({}):", projects.len()));
            for project in projects {
                lines.push(format!("  {}", project.title));
            }
        }
        "post" | "posts" => {
            let posts = fetcher.list_published_posts().await?;
            lines.push(format!("Posts ({}):", posts.len()));
            for post in posts {
                let date = post
                    .published_at
                    .map(|d| d.format("%Y-%m-%d").to_string())
                    .unwrap_or_else(|| "undated".to_string());
                lines.push(format!(
                    "  {} - {} [{}]",
                    date,
                    post.title,
                    post.source()
                ));
            }
        }
        _ => {
            bail!(
                "Unknown type: {}. Available: profile, work, education, project, post",
                content_type
            );
        }
    }

    Ok(lines)
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn site(records: &str) -> (TempDir, Folio) {
        let dir = TempDir::new().unwrap();
        std::fs::write(dir.path().join("records.yml"), records).unwrap();
        let folio = Folio::new(dir.path()).unwrap();
        (dir, folio)
    }

    #[tokio::test]
    async fn test_list_posts() {
        let (_dir, folio) = site(
            r#"
posts:
  - title: Old
    slug: old
    published_at: 1600000000000
    is_published: true
    source: mdx
  - title: New
    slug: new
    published_at: 1700000000000
    is_published: true
    body: text
    source: database
  - title: Hidden
    slug: hidden
    is_published: false
    source: database
"#,
        );
        let lines = describe(&folio, "post").await.unwrap();
        assert_eq!(
            lines,
            vec![
                "Posts (2):",
                "  2023-11-14 - New [database]",
                "  2020-09-13 - Old [mdx]",
            ]
        );
    }

    #[tokio::test]
    async fn test_list_profile_missing() {
        let (_dir, folio) = site("profile: []\n");
        let lines = describe(&folio, "profile").await.unwrap();
        assert_eq!(lines, vec!["Profile: none"]);
    }

    #[tokio::test]
    async fn test_list_unknown_type() {
        let (_dir, folio) = site("{}\n");
        assert!(describe(&folio, "tags").await.is_err());
    }
}
