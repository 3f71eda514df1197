//! Asset manifest: the fixed list of URLs pre-cached at install time.

use url::Url;

/// Cache bucket name. Bumping the version suffix makes the next install
/// populate a fresh, empty bucket; the old one is left in place.
pub const DEFAULT_CACHE_NAME: &str = "isbn-app-cache-v1";

/// Assets pre-fetched on install, in order.
pub const DEFAULT_ASSETS: [&str; 3] = [
    "/",
    "/static/ISBNbookscanner.png",
    "/static/ISBNbookscanner2.png",
];

/// Ordered, immutable list of asset URLs (absolute or origin-relative).
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AssetManifest {
    entries: Vec<String>,
}

impl Default for AssetManifest {
    fn default() -> Self {
        Self::new(DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect())
    }
}

impl AssetManifest {
    pub fn new(entries: Vec<String>) -> Self {
        Self { entries }
    }

    pub fn entries(&self) -> &[String] {
        &self.entries
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// Resolve every entry against `origin`, preserving order.
    pub fn resolve(&self, origin: &Url) -> Result<Vec<Url>, url::ParseError> {
        self.entries.iter().map(|e| origin.join(e)).collect()
    }
}
