//! Default display-image resolution for entries

/// Maps an entry slug to its default display image.
///
/// The store consults the resolver only when the front matter does not
/// name an `image` itself. Implementations must be pure: the same slug
/// always resolves to the same path.
pub trait ImageResolver: Send + Sync {
    /// Default image path for the entry with the given slug
    fn image_for(&self, slug: &str) -> String;
}

/// Pattern-based resolver mapping a slug to `<dir>/<slug>.<extension>`
#[derive(Debug, Clone)]
pub struct StaticImageResolver {
    dir: String,
    extension: String,
}

impl StaticImageResolver {
    /// Create a resolver rooted at `dir` with the given file extension
    pub fn new(dir: impl Into<String>, extension: impl Into<String>) -> Self {
        let dir = dir.into();
        let extension = extension.into();
        Self {
            dir: dir.trim_end_matches('/').to_string(),
            extension: extension.trim_start_matches('.').to_string(),
        }
    }
}

impl Default for StaticImageResolver {
    fn default() -> Self {
        Self::new("/images/days", "svg")
    }
}

impl ImageResolver for StaticImageResolver {
    fn image_for(&self, slug: &str) -> String {
        format!("{}/{}.{}", self.dir, slug, self.extension)
    }
}
