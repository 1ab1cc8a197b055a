//! Initialize a new Advent site

use anyhow::Result;
use std::fs;
use std::path::Path;

/// Initialize a new site in the given directory
pub fn init_site(target_dir: &Path) -> Result<()> {
    // Create directory structure
    fs::create_dir_all(target_dir)?;
    fs::create_dir_all(target_dir.join("content"))?;

    // Create default advent.yml
    let config_content = r#"# Advent Configuration

# Site
title: Advent of DevOps
description: ''
author: ''
language: en
timezone: UTC

# URL
url: http://example.com
root: /

# Directory
content_dir: content

# Default entry images, resolved as <dir>/<slug>.<extension>
images:
  dir: /images/days
  extension: svg

# Content cache: seconds, or `infinite` to read content once per process.
# Use a short ttl during local writing so edits show up without a restart.
cache:
  ttl: infinite
"#;

    fs::write(target_dir.join("advent.yml"), config_content)?;

    // Create the overview entry
    let index_content = r#"---
title: Advent of DevOps
excerpt: One DevOps challenge per day, December 1st through 25th.
tags:
  - devops
---

Welcome to the Advent of DevOps! Every day in December up to the 25th a
new challenge unlocks: containers, CI/CD, infrastructure as code,
observability and more.

Pick a day from the calendar to get started.
"#;

    fs::write(target_dir.join("content/index.md"), index_content)?;

    // Create a sample first day
    let sample_day = r#"---
title: Hello Containers
day: 1
category: containers
difficulty: beginner
excerpt: Run your first container and poke around inside it.
tags:
  - docker
---

Welcome to day 1! Today we run a container and look around.

```bash
docker run -it --rm alpine sh
```

Explore the filesystem, check `ps aux`, and compare what you see with
the host. Tomorrow we build our own image.
"#;

    fs::write(target_dir.join("content/day-1.md"), sample_day)?;

    Ok(())
}
