//! Cached read access to the content directory

use chrono::Utc;
use chrono_tz::Tz;
use lazy_static::lazy_static;
use parking_lot::RwLock;
use regex::Regex;
use serde::{Deserialize, Deserializer, Serialize, Serializer};
use std::fs;
use std::io;
use std::path::{Path, PathBuf};
use std::time::{Duration, Instant};
use thiserror::Error;
use walkdir::WalkDir;

use super::entry::{DayEntry, IndexEntry, Progress, TOTAL_DAYS};
use super::frontmatter::{FrontMatter, FrontMatterError};
use super::images::{ImageResolver, StaticImageResolver};

lazy_static! {
    static ref DAY_FILE: Regex = Regex::new(r"^day-([0-9]+)\.md$").unwrap();
}

/// Day number encoded in a `day-<N>.md` file name, if it is one
pub fn day_file_number(file_name: &str) -> Option<u32> {
    let caps = DAY_FILE.captures(file_name)?;
    caps[1].parse().ok()
}

/// Errors raised while reading the content directory
#[derive(Error, Debug)]
pub enum ContentError {
    #[error("cannot read {path:?}: {source}")]
    Filesystem {
        path: PathBuf,
        #[source]
        source: io::Error,
    },

    #[error("cannot parse {path:?}: {source}")]
    Parse {
        path: PathBuf,
        #[source]
        source: FrontMatterError,
    },
}

/// How long a computed content view stays valid.
///
/// Production sites read the content once and serve it for the process
/// lifetime (`Infinite`); development setups use a short duration so
/// edits show up without a restart.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum CacheTtl {
    Infinite,
    After(Duration),
}

impl CacheTtl {
    pub fn from_secs(secs: u64) -> Self {
        Self::After(Duration::from_secs(secs))
    }

    fn expired(&self, age: Duration) -> bool {
        match self {
            Self::Infinite => false,
            Self::After(ttl) => age >= *ttl,
        }
    }
}

// In advent.yml the ttl is either a number of seconds or the word
// `infinite`.
impl<'de> Deserialize<'de> for CacheTtl {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        #[derive(Deserialize)]
        #[serde(untagged)]
        enum Raw {
            Seconds(u64),
            Word(String),
        }

        match Raw::deserialize(deserializer)? {
            Raw::Seconds(secs) => Ok(CacheTtl::from_secs(secs)),
            Raw::Word(word) if word.eq_ignore_ascii_case("infinite") => Ok(CacheTtl::Infinite),
            Raw::Word(word) => Err(serde::de::Error::custom(format!(
                "invalid cache ttl {:?}: expected seconds or \"infinite\"",
                word
            ))),
        }
    }
}

impl Serialize for CacheTtl {
    fn serialize<S>(&self, serializer: S) -> Result<S::Ok, S::Error>
    where
        S: Serializer,
    {
        match self {
            CacheTtl::Infinite => serializer.serialize_str("infinite"),
            CacheTtl::After(ttl) => serializer.serialize_u64(ttl.as_secs()),
        }
    }
}

/// One computed view of the content directory.
///
/// The day list and the index entry always come from the same scan and
/// share one timestamp.
#[derive(Clone)]
struct ContentCache {
    days: Vec<DayEntry>,
    index: Option<IndexEntry>,
    refreshed_at: Instant,
}

/// Read-only, time-boxed cached view over a directory of `day-<N>.md`
/// files plus an `index.md` overview.
///
/// Each store owns its cache; tests construct a fresh store per case.
/// The cache is replaced wholesale under the write lock, so concurrent
/// readers see either the old view or the fully new one, never a partial
/// mix.
pub struct ContentStore {
    content_dir: PathBuf,
    ttl: CacheTtl,
    resolver: Box<dyn ImageResolver>,
    cache: RwLock<Option<ContentCache>>,
}

impl ContentStore {
    /// Create a store over `content_dir` with the default image resolver
    pub fn new<P: AsRef<Path>>(content_dir: P, ttl: CacheTtl) -> Self {
        Self::with_resolver(content_dir, ttl, Box::new(StaticImageResolver::default()))
    }

    /// Create a store with a custom image resolver
    pub fn with_resolver<P: AsRef<Path>>(
        content_dir: P,
        ttl: CacheTtl,
        resolver: Box<dyn ImageResolver>,
    ) -> Self {
        Self {
            content_dir: content_dir.as_ref().to_path_buf(),
            ttl,
            resolver,
            cache: RwLock::new(None),
        }
    }

    /// All day entries, sorted ascending by day number.
    ///
    /// Within the cache window repeated calls return the same collection
    /// in the same order. An unreadable content directory or a file with
    /// malformed front matter fails the whole listing.
    pub fn all_days(&self) -> Result<Vec<DayEntry>, ContentError> {
        if let Some(cache) = self.fresh() {
            return Ok(cache.days);
        }
        let (days, _) = self.refresh()?;
        Ok(days)
    }

    /// Look up a single day entry by slug.
    ///
    /// Consults the cached list first. On a miss the store reads
    /// `<slug>.md` directly, so a file added after the last scan is still
    /// found without waiting out the cache window. Absence is a normal
    /// outcome, not an error.
    pub fn day_by_slug(&self, slug: &str) -> Result<Option<DayEntry>, ContentError> {
        let days = self.all_days()?;
        if let Some(entry) = days.into_iter().find(|e| e.slug == slug) {
            return Ok(Some(entry));
        }

        // The cache may predate the file; try the disk directly. Only
        // day-file slugs get the fallback, so lookups like "index" or
        // path-traversal strings never touch the filesystem.
        let file_name = format!("{}.md", slug);
        let Some(filename_day) = day_file_number(&file_name) else {
            return Ok(None);
        };

        let path = self.content_dir.join(file_name);
        match self.load_day_file(&path, filename_day) {
            Ok(entry) => Ok(Some(entry)),
            Err(ContentError::Filesystem { .. }) => Ok(None),
            Err(err) => Err(err),
        }
    }

    /// Look up a day entry by its number.
    ///
    /// Out-of-range numbers are not rejected; they simply find nothing.
    pub fn day_by_number(&self, number: u32) -> Result<Option<DayEntry>, ContentError> {
        self.day_by_slug(&format!("day-{}", number))
    }

    /// The overview entry, backed by `index.md`.
    ///
    /// Shares the cache and its timestamp with the day list. A missing or
    /// unparsable index file yields `None` rather than an error.
    pub fn index_entry(&self) -> Result<Option<IndexEntry>, ContentError> {
        if let Some(cache) = self.fresh() {
            return Ok(cache.index);
        }
        let (_, index) = self.refresh()?;
        Ok(index)
    }

    /// The entry after day `number`, or `None` at the calendar boundary
    pub fn next_day(&self, number: u32) -> Result<Option<DayEntry>, ContentError> {
        if number >= TOTAL_DAYS {
            return Ok(None);
        }
        self.day_by_number(number + 1)
    }

    /// The entry before day `number`, or `None` at the calendar boundary
    pub fn previous_day(&self, number: u32) -> Result<Option<DayEntry>, ContentError> {
        if number <= 1 {
            return Ok(None);
        }
        self.day_by_number(number - 1)
    }

    /// Calendar progress as of now in the given timezone.
    ///
    /// Derived purely from the calendar date; which files actually exist
    /// is the business of `check`, not of the progress summary.
    pub fn progress(&self, tz: Tz) -> Progress {
        Progress::for_date(Utc::now().with_timezone(&tz).date_naive())
    }

    /// Current cache contents if they are still within the window
    fn fresh(&self) -> Option<ContentCache> {
        let guard = self.cache.read();
        guard
            .as_ref()
            .filter(|cache| !self.ttl.expired(cache.refreshed_at.elapsed()))
            .cloned()
    }

    /// Rescan the content directory and replace the cache wholesale
    fn refresh(&self) -> Result<(Vec<DayEntry>, Option<IndexEntry>), ContentError> {
        let days = self.scan_days()?;
        let index = self.load_index();

        let mut guard = self.cache.write();
        *guard = Some(ContentCache {
            days: days.clone(),
            index: index.clone(),
            refreshed_at: Instant::now(),
        });

        tracing::debug!(
            "refreshed content cache: {} day entries, index {}",
            days.len(),
            if index.is_some() { "present" } else { "absent" }
        );

        Ok((days, index))
    }

    fn scan_days(&self) -> Result<Vec<DayEntry>, ContentError> {
        let mut days = Vec::new();

        for entry in WalkDir::new(&self.content_dir).max_depth(1) {
            let entry = entry.map_err(|e| ContentError::Filesystem {
                path: self.content_dir.clone(),
                source: e.into(),
            })?;
            if !entry.file_type().is_file() {
                continue;
            }

            let Some(file_name) = entry.file_name().to_str() else {
                continue;
            };
            let Some(filename_day) = day_file_number(file_name) else {
                continue;
            };

            days.push(self.load_day_file(entry.path(), filename_day)?);
        }

        days.sort_by_key(|entry| entry.day);
        Ok(days)
    }

    fn load_day_file(&self, path: &Path, filename_day: u32) -> Result<DayEntry, ContentError> {
        let raw = fs::read_to_string(path).map_err(|source| ContentError::Filesystem {
            path: path.to_path_buf(),
            source,
        })?;
        let (fm, body) = FrontMatter::parse(&raw).map_err(|source| ContentError::Parse {
            path: path.to_path_buf(),
            source,
        })?;

        let slug = path
            .file_stem()
            .and_then(|s| s.to_str())
            .unwrap_or_default()
            .to_string();

        // An explicit front-matter day wins over the filename; a mismatch
        // is worth a warning but not a failure (check reports it).
        let day = match fm.day {
            Some(day) => {
                if day != filename_day {
                    tracing::warn!(
                        "{:?}: front matter says day {}, filename says day {}",
                        path,
                        day,
                        filename_day
                    );
                }
                day
            }
            None => filename_day,
        };

        let default_image = self.resolver.image_for(&slug);
        Ok(DayEntry::from_front_matter(slug, day, body, default_image, fm))
    }

    fn load_index(&self) -> Option<IndexEntry> {
        let path = self.content_dir.join("index.md");
        let raw = match fs::read_to_string(&path) {
            Ok(raw) => raw,
            Err(err) => {
                if err.kind() == io::ErrorKind::NotFound {
                    tracing::debug!("no index.md in {:?}", self.content_dir);
                } else {
                    tracing::warn!("cannot read {:?}: {}", path, err);
                }
                return None;
            }
        };

        match FrontMatter::parse(&raw) {
            Ok((fm, body)) => Some(IndexEntry::from_front_matter(body, fm)),
            Err(err) => {
                tracing::warn!("cannot parse {:?}: {}", path, err);
                None
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use tempfile::TempDir;

    fn write_day(dir: &Path, file_name: &str, yaml: &str, body: &str) {
        fs::write(dir.join(file_name), format!("---\n{}---\n\n{}", yaml, body)).unwrap();
    }

    fn sample_site() -> TempDir {
        let dir = TempDir::new().unwrap();
        write_day(dir.path(), "day-2.md", "title: B\nday: 2\n", "Second day.");
        write_day(dir.path(), "day-1.md", "title: A\nday: 1\n", "First day.");
        write_day(dir.path(), "day-3.md", "title: C\nday: 3\n", "Third day.");
        fs::write(
            dir.path().join("index.md"),
            "---\ntitle: Advent of DevOps\n---\n\nWelcome.\n",
        )
        .unwrap();
        dir
    }

    #[test]
    fn test_all_days_sorted_with_unique_slugs() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let days = store.all_days().unwrap();
        assert_eq!(days.len(), 3);
        assert_eq!(
            days.iter().map(|d| d.day).collect::<Vec<_>>(),
            vec![1, 2, 3]
        );
        let mut slugs: Vec<_> = days.iter().map(|d| d.slug.clone()).collect();
        slugs.dedup();
        assert_eq!(slugs, vec!["day-1", "day-2", "day-3"]);
    }

    #[test]
    fn test_non_day_files_are_ignored() {
        let site = sample_site();
        fs::write(site.path().join("notes.md"), "scratch").unwrap();
        fs::write(site.path().join("day-four.md"), "not numbered").unwrap();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        assert_eq!(store.all_days().unwrap().len(), 3);
    }

    #[test]
    fn test_lookup_by_number_matches_lookup_by_slug() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let by_number = store.day_by_number(2).unwrap().unwrap();
        let by_slug = store.day_by_slug("day-2").unwrap().unwrap();
        assert_eq!(by_number, by_slug);
        assert_eq!(by_number.title.as_deref(), Some("B"));
    }

    #[test]
    fn test_missing_day_is_absent_not_an_error() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        assert!(store.day_by_slug("day-19").unwrap().is_none());
        assert!(store.day_by_number(99).unwrap().is_none());
    }

    #[test]
    fn test_non_day_slugs_skip_the_disk_fallback() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        // index.md exists on disk but is not a day entry
        assert!(store.day_by_slug("index").unwrap().is_none());
        assert!(store.day_by_slug("../day-1").unwrap().is_none());
        assert!(store.day_by_slug("").unwrap().is_none());
    }

    #[test]
    fn test_day_number_falls_back_to_filename() {
        let site = TempDir::new().unwrap();
        write_day(site.path(), "day-7.md", "title: Seventh\n", "body");
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let entry = store.day_by_slug("day-7").unwrap().unwrap();
        assert_eq!(entry.day, 7);
    }

    #[test]
    fn test_front_matter_day_wins_over_filename() {
        let site = TempDir::new().unwrap();
        write_day(site.path(), "day-7.md", "title: T\nday: 8\n", "body");
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let entry = store.day_by_slug("day-7").unwrap().unwrap();
        assert_eq!(entry.day, 8);
    }

    #[test]
    fn test_next_and_previous_boundaries() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        assert_eq!(store.next_day(1).unwrap().unwrap().day, 2);
        assert_eq!(store.previous_day(2).unwrap().unwrap().day, 1);
        assert!(store.next_day(25).unwrap().is_none());
        assert!(store.next_day(30).unwrap().is_none());
        assert!(store.previous_day(1).unwrap().is_none());
        assert!(store.previous_day(0).unwrap().is_none());

        // In-range neighbors that have no file are absent, not errors
        assert!(store.next_day(3).unwrap().is_none());
    }

    #[test]
    fn test_index_entry_loaded_from_index_md() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let index = store.index_entry().unwrap().unwrap();
        assert_eq!(index.slug, "advent-of-devops");
        assert_eq!(index.title.as_deref(), Some("Advent of DevOps"));
        assert!(index.content.starts_with("Welcome."));
    }

    #[test]
    fn test_missing_or_malformed_index_is_absent() {
        let site = TempDir::new().unwrap();
        write_day(site.path(), "day-1.md", "title: A\n", "body");
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);
        assert!(store.index_entry().unwrap().is_none());

        fs::write(site.path().join("index.md"), "---\ntitle: broken\n").unwrap();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);
        assert!(store.index_entry().unwrap().is_none());
        // a broken index never poisons the day list
        assert_eq!(store.all_days().unwrap().len(), 1);
    }

    #[test]
    fn test_malformed_day_file_fails_the_listing() {
        let site = sample_site();
        fs::write(site.path().join("day-4.md"), "---\ntitle: [unclosed\n---\n").unwrap();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let err = store.all_days().unwrap_err();
        match err {
            ContentError::Parse { path, .. } => {
                assert!(path.ends_with("day-4.md"));
            }
            other => panic!("expected parse error, got {:?}", other),
        }
    }

    #[test]
    fn test_unreadable_directory_is_a_filesystem_error() {
        let store = ContentStore::new("/definitely/not/a/content/dir", CacheTtl::Infinite);

        assert!(matches!(
            store.all_days().unwrap_err(),
            ContentError::Filesystem { .. }
        ));
    }

    #[test]
    fn test_cache_window_preserves_the_listing() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let first = store.all_days().unwrap();
        write_day(site.path(), "day-9.md", "title: Late\nday: 9\n", "body");
        let second = store.all_days().unwrap();

        assert_eq!(first, second);
    }

    #[test]
    fn test_expired_cache_observes_edits() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::After(Duration::ZERO));

        assert_eq!(store.all_days().unwrap().len(), 3);
        write_day(site.path(), "day-9.md", "title: Late\nday: 9\n", "body");
        assert_eq!(store.all_days().unwrap().len(), 4);
    }

    #[test]
    fn test_slug_lookup_finds_files_newer_than_the_cache() {
        let site = sample_site();
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        store.all_days().unwrap();
        write_day(site.path(), "day-4.md", "title: Fresh\nday: 4\n", "body");

        // The listing still serves the cached view, but the direct lookup
        // reaches the new file.
        assert_eq!(store.all_days().unwrap().len(), 3);
        let entry = store.day_by_slug("day-4").unwrap().unwrap();
        assert_eq!(entry.title.as_deref(), Some("Fresh"));
    }

    #[test]
    fn test_image_resolution() {
        let site = TempDir::new().unwrap();
        write_day(site.path(), "day-1.md", "title: A\n", "body");
        write_day(
            site.path(),
            "day-2.md",
            "title: B\nimage: /custom/cover.png\n",
            "body",
        );
        let store = ContentStore::new(site.path(), CacheTtl::Infinite);

        let days = store.all_days().unwrap();
        assert_eq!(days[0].image, "/images/days/day-1.svg");
        assert_eq!(days[1].image, "/custom/cover.png");
    }

    #[test]
    fn test_day_file_number() {
        assert_eq!(day_file_number("day-7.md"), Some(7));
        assert_eq!(day_file_number("day-25.md"), Some(25));
        assert_eq!(day_file_number("day-07.md"), Some(7));
        assert_eq!(day_file_number("index.md"), None);
        assert_eq!(day_file_number("day-.md"), None);
        assert_eq!(day_file_number("day-7.markdown"), None);
    }

    #[test]
    fn test_cache_ttl_from_yaml() {
        assert_eq!(
            serde_yaml::from_str::<CacheTtl>("300").unwrap(),
            CacheTtl::from_secs(300)
        );
        assert_eq!(
            serde_yaml::from_str::<CacheTtl>("infinite").unwrap(),
            CacheTtl::Infinite
        );
        assert!(serde_yaml::from_str::<CacheTtl>("sometimes").is_err());
    }
}
