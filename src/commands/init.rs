//! Initialize a new site

use anyhow::{Context, Result};
use std::fs;
use std::path::Path;

use crate::CONFIG_FILE;

const CONFIG: &str = r#"# Site
title: Emily's Folio
description: Photography, projects and writing
author: Emily Chen
language: en
url: http://example.com
timezone: UTC

social:
  twitter: https://twitter.com/emsesc
  github: https://github.com/emsesc

# Directory
source_dir: content
data_dir: data
static_dir: static
public_dir: public

# Writing
collection: blog
render_drafts: false
highlight:
  enable: true
  theme: base16-ocean.dark
  line_number: false

# Home page
home:
  max_display: 3

# Feed
feed:
  enable: true
  limit: 20
"#;

const PHOTOS: &str = r#"# Gallery tiles, shown in this order
- title: Storytellers
  imgSrc: https://github.com/bitprj/art-heist/assets/69332964/b3593058-362c-4440-bf37-5937d86ca85f
  slug: storytellers
- title: Scenes of the Delta
  imgSrc: https://github.com/bitprj/art-heist/assets/69332964/912d3ad0-7eb9-45f2-b452-de4e0c3eba7c
  slug: delta-scenes
- title: Perceiving Mississippi
  imgSrc: https://github.com/bitprj/art-heist/assets/69332964/174a45f6-c2f3-4ebf-b849-4ddae75af2f7
  slug: perceiving-ms
- title: A Delta Summer
  imgSrc: https://github.com/bitprj/art-heist/assets/69332964/674e1300-bb48-484e-8c32-28e064c7c8b3
  slug: ms-summer
- title: Childhood Suburbia
  imgSrc: https://github.com/bitprj/art-heist/assets/69332964/c635e023-4b93-43e4-a3d0-a35c9d1ec3da
  slug: childhood-suburb
- title: NC Wildlife
  imgSrc: https://github.com/bitprj/art-heist/assets/69332964/90d6e9c1-cced-4d93-958f-c49c17e0eb1d
  slug: nc-wildlife
- title: NC Scenes
  imgSrc: https://github.com/bitprj/art-heist/assets/69332964/92b1eb94-f17b-4dce-8cd7-97c19fceeb83
  slug: greenways
"#;

const PROJECTS: &str = r#"- title: Art Heist
  description: An interactive art gallery built for a workshop.
  href: https://github.com/bitprj/art-heist
"#;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    let config_path = target_dir.join(CONFIG_FILE);
    if config_path.exists() {
        anyhow::bail!("A site already exists in {:?}", target_dir);
    }

    for dir in ["content/blog", "data", "static"] {
        let dir = target_dir.join(dir);
        fs::create_dir_all(&dir).with_context(|| format!("Failed to create {:?}", dir))?;
    }

    let now = chrono::Utc::now();
    let sample_post = format!(
        r#"---
title: Hello World
date: {}
tags: [meta]
summary: The first post on this site.
---

Welcome! This post was created by `folio init`.

## Writing posts

```bash
$ folio new "My New Post"
```

## Previewing

```bash
$ folio server
```
"#,
        now.format("%Y-%m-%d %H:%M:%S")
    );

    write(&config_path, CONFIG)?;
    write(&target_dir.join("content/blog/hello-world.md"), &sample_post)?;
    write(&target_dir.join("data/photos.yml"), PHOTOS)?;
    write(&target_dir.join("data/projects.yml"), PROJECTS)?;

    Ok(())
}

fn write(path: &Path, content: &str) -> Result<()> {
    fs::write(path, content).with_context(|| format!("Failed to write {:?}", path))
}
