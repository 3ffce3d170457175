//! Initialize a new Folio site

use anyhow::{bail, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG_TEMPLATE: &str = r#"# Folio Configuration

# Site
title: My Portfolio
description: ''
author: John Doe
language: en

# URL
url: http://example.com
root: /

# Directory
public_dir: public
content_dir: content/blog
post_extension: mdx
records: records.yml
assets_dir: assets
assets_url: /assets

# Writing
date_format: MMMM DD, YYYY
render_drafts: false
highlight:
  theme: base16-ocean.dark
  line_number: false

# Navigation
menu:
  - name: About
    path: /about
  - name: Work
    path: /work
  - name: Blog
    path: /blog
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    if target_dir.join(CONFIG_FILE).exists() {
        bail!("{:?} already contains a site", target_dir);
    }

    fs::create_dir_all(target_dir.join("content/blog"))?;
    fs::create_dir_all(target_dir.join("assets"))?;

    fs::write(target_dir.join(CONFIG_FILE), CONFIG_TEMPLATE)?;

    let now = chrono::Utc::now().timestamp_millis();
    let records = format!(
        r#"profile:
  - name: John Doe
    subtitle: Software Engineer
    description: Write a few sentences about yourself here.
    contact:
      email: john@example.com
      location: Earth
    socials:
      - platform: GitHub
        url: https://github.com/

work_experience:
  - company: Example Corp
    title: Engineer
    start_date: '2020'
    end_date: Present
    duties:
      - Built things
    order: 1

education: []

projects:
  - title: This Site
    description: A portfolio served by folio.
    order: 1

posts:
  - title: Hello World
    slug: hello-world
    author: John Doe
    published_at: {now}
    is_published: true
    summary: Your very first post.
    source: mdx
  - title: Stored Post
    slug: stored-post
    author: John Doe
    published_at: {now}
    is_published: false
    summary: A draft kept in the records file.
    body: |
      This post lives in `records.yml`. Set `is_published` to publish it.
    source: database
"#,
        now = now
    );
    fs::write(target_dir.join("records.yml"), records)?;

    let sample_post = r#"---
title: Hello World
---

Welcome to your new site! This post is a file in `content/blog`; its
record in `records.yml` points here with `source: mdx`.

## Quick Start

```bash
$ folio server
```

```bash
$ folio generate
```
"#;
    fs::write(target_dir.join("content/blog/hello-world.mdx"), sample_post)?;

    Ok(())
}
