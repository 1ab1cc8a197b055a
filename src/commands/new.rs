//! Create a new day file

use anyhow::Result;
use chrono::Utc;
use std::fs;

use crate::content::TOTAL_DAYS;
use crate::Advent;

/// Create `day-<N>.md` in the content directory with scaffold front matter
pub fn create_day(
    advent: &Advent,
    day: u32,
    title: Option<&str>,
    category: Option<&str>,
    difficulty: Option<&str>,
) -> Result<()> {
    if day < 1 || day > TOTAL_DAYS {
        anyhow::bail!("Day must be between 1 and {}, got {}", TOTAL_DAYS, day);
    }

    fs::create_dir_all(&advent.content_dir)?;

    let file_path = advent.content_dir.join(format!("day-{}.md", day));
    if file_path.exists() {
        anyhow::bail!("File already exists: {:?}", file_path);
    }

    let title = title
        .map(|t| t.to_string())
        .unwrap_or_else(|| format!("Day {}", day));
    let now = Utc::now().format("%Y-%m-%dT%H:%M:%SZ");

    let mut content = format!("---\ntitle: {}\nday: {}\n", title, day);
    if let Some(category) = category {
        content.push_str(&format!("category: {}\n", category));
    }
    if let Some(difficulty) = difficulty {
        content.push_str(&format!("difficulty: {}\n", difficulty));
    }
    content.push_str(&format!("publishedAt: {}\ntags:\n---\n\n", now));
    content.push_str(&format!("Write the day {} challenge here.\n", day));

    fs::write(&file_path, content)?;

    println!("Created: {:?}", file_path);

    Ok(())
}
