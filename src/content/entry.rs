//! Day and index entry models

use chrono::{DateTime, Datelike, NaiveDate, Utc};
use indexmap::IndexMap;
use serde::{Deserialize, Serialize};

use super::frontmatter::{parse_timestamp, FrontMatter};
use super::markdown;

/// Number of days in the calendar
pub const TOTAL_DAYS: u32 = 25;

// `slug` and `content` are not recognized front-matter fields, so authored
// values land in the passthrough map. The flatten would re-emit them after
// the struct fields and shadow the computed ones on the serialized surface,
// so the constructors drop them: computed fields always win.
fn strip_reserved(
    mut extra: IndexMap<String, serde_yaml::Value>,
) -> IndexMap<String, serde_yaml::Value> {
    for key in ["slug", "content"] {
        extra.shift_remove(key);
    }
    extra
}

/// Slug under which the overview entry is published
pub const INDEX_SLUG: &str = "advent-of-devops";

/// A single day challenge
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DayEntry {
    /// URL-friendly identifier, `day-<number>`
    pub slug: String,

    /// Day number within the calendar (1 to 25)
    pub day: u32,

    /// Entry title
    pub title: Option<String>,

    /// Short teaser for listings
    pub excerpt: Option<String>,

    /// Longer description for meta tags
    pub description: Option<String>,

    /// Topic category, e.g. `containers` or `ci-cd`
    pub category: Option<String>,

    /// Difficulty label, e.g. `beginner` or `advanced`
    pub difficulty: Option<String>,

    /// Raw markdown body, front matter stripped
    pub content: String,

    /// Display image path
    pub image: String,

    /// Publication timestamp as authored
    pub published_at: Option<String>,

    /// Last-update timestamp as authored
    pub updated_at: Option<String>,

    /// Entry tags
    pub tags: Vec<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl DayEntry {
    /// Build an entry from parsed front matter and the fields the loader
    /// derives itself. Derived values win: the slug and day always come
    /// from the loader, and `default_image` fills in only when the front
    /// matter names no image.
    pub fn from_front_matter(
        slug: String,
        day: u32,
        body: &str,
        default_image: String,
        fm: FrontMatter,
    ) -> Self {
        Self {
            slug,
            day,
            extra: strip_reserved(fm.extra),
            title: fm.title,
            excerpt: fm.excerpt,
            description: fm.description,
            category: fm.category,
            difficulty: fm.difficulty,
            content: body.to_string(),
            image: fm.image.unwrap_or(default_image),
            published_at: fm.published_at,
            updated_at: fm.updated_at,
            tags: fm.tags,
        }
    }

    /// Title for display, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }

    /// Teaser text: the authored excerpt, or one derived from the body
    pub fn summary(&self) -> String {
        match &self.excerpt {
            Some(excerpt) => excerpt.clone(),
            None => markdown::auto_excerpt(&self.content, markdown::EXCERPT_CHARS),
        }
    }

    /// Estimated reading time of the body in minutes
    pub fn reading_time(&self) -> u32 {
        markdown::reading_time(&self.content)
    }

    /// Publication timestamp parsed to UTC, if present and well-formed
    pub fn published(&self) -> Option<DateTime<Utc>> {
        self.published_at.as_deref().and_then(parse_timestamp)
    }

    /// Last-update timestamp parsed to UTC, if present and well-formed
    pub fn updated(&self) -> Option<DateTime<Utc>> {
        self.updated_at.as_deref().and_then(parse_timestamp)
    }
}

/// The calendar overview entry, backed by `index.md`
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct IndexEntry {
    /// Fixed slug, [`INDEX_SLUG`]
    pub slug: String,

    /// Overview title
    pub title: Option<String>,

    /// Short teaser for listings
    pub excerpt: Option<String>,

    /// Longer description for meta tags
    pub description: Option<String>,

    /// Raw markdown body, front matter stripped
    pub content: String,

    /// Publication timestamp as authored
    pub published_at: Option<String>,

    /// Last-update timestamp as authored
    pub updated_at: Option<String>,

    /// Entry tags
    pub tags: Vec<String>,

    /// Custom front-matter fields
    #[serde(flatten)]
    pub extra: IndexMap<String, serde_yaml::Value>,
}

impl IndexEntry {
    /// Build the overview entry from parsed front matter
    pub fn from_front_matter(body: &str, fm: FrontMatter) -> Self {
        Self {
            slug: INDEX_SLUG.to_string(),
            title: fm.title,
            excerpt: fm.excerpt,
            description: fm.description,
            content: body.to_string(),
            published_at: fm.published_at,
            updated_at: fm.updated_at,
            tags: fm.tags,
            extra: strip_reserved(fm.extra),
        }
    }

    /// Title for display, falling back to the slug
    pub fn display_title(&self) -> &str {
        self.title.as_deref().unwrap_or(&self.slug)
    }
}

/// How far the calendar has unlocked
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Progress {
    /// Total days in the calendar
    pub total_days: u32,

    /// Days unlocked so far
    pub completed_days: u32,

    /// `completed_days` over `total_days`, as a percentage
    pub percent_complete: f64,
}

impl Progress {
    /// Progress as of the given calendar date.
    ///
    /// During December the calendar unlocks one day at a time, capped at
    /// [`TOTAL_DAYS`]. In any other month the whole calendar counts as
    /// unlocked, so archived years read as complete.
    pub fn for_date(date: NaiveDate) -> Self {
        let completed_days = if date.month() == 12 {
            date.day().min(TOTAL_DAYS)
        } else {
            TOTAL_DAYS
        };

        Self {
            total_days: TOTAL_DAYS,
            completed_days,
            percent_complete: f64::from(completed_days) / f64::from(TOTAL_DAYS) * 100.0,
        }
    }
}
