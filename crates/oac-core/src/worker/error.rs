//! Errors surfaced by the worker handlers and the host.

use std::time::Duration;

use crate::cache_storage::CacheError;
use crate::http::FetchError;

#[derive(Debug, thiserror::Error)]
pub enum WorkerError {
    #[error("invalid origin or manifest URL: {0}")]
    Url(#[from] url::ParseError),
    /// Opening or populating the bucket failed; the worker is not installed.
    #[error("install failed: {0}")]
    Install(#[source] CacheError),
    #[error("install did not finish within {0:?}")]
    InstallTimedOut(Duration),
    #[error("cache lookup failed: {0}")]
    Cache(#[source] CacheError),
    /// Cache miss and the network produced no response.
    #[error("fetch failed: {0}")]
    Fetch(#[from] FetchError),
}
