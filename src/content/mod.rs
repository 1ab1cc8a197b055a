//! Content module - day entries, front matter, and the cached store

mod entry;
mod frontmatter;
mod images;
mod markdown;
mod store;

pub use entry::{DayEntry, IndexEntry, Progress, INDEX_SLUG, TOTAL_DAYS};
pub use frontmatter::{parse_timestamp, FrontMatter, FrontMatterError};
pub use images::{ImageResolver, StaticImageResolver};
pub use store::{day_file_number, CacheTtl, ContentError, ContentStore};
