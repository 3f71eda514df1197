//! Types used by the cache storage.

use crate::http::FetchError;

/// Row id of a bucket.
pub type BucketId = i64;

/// Summary of one stored entry, used by `oac status`.
#[derive(Debug, Clone)]
pub struct EntrySummary {
    /// Cache key (request URL without fragment).
    pub url: String,
    pub status: u32,
    pub size: u64,
    pub sha256: String,
    pub stored_at: i64,
}

/// Errors from opening, matching or populating buckets.
#[derive(Debug, thiserror::Error)]
pub enum CacheError {
    #[error("cache storage: {0}")]
    Storage(#[from] sqlx::Error),
    #[error("stored headers: {0}")]
    Headers(#[from] serde_json::Error),
    #[error("only GET requests can be cached, got {method} {url}")]
    UnsupportedMethod { method: String, url: String },
    #[error("only http(s) requests can be cached: {0}")]
    UnsupportedScheme(String),
    #[error("duplicate request in batch: {0}")]
    DuplicateRequest(String),
    #[error("fetching {url} failed: {source}")]
    Fetch {
        url: String,
        #[source]
        source: FetchError,
    },
    #[error("{url} returned HTTP {status}")]
    BadResponse { url: String, status: u32 },
    #[error("{url} cannot be cached: {reason}")]
    UnacceptableResponse { url: String, reason: &'static str },
    #[error("cache task failed: {0}")]
    Task(String),
}
