//! Network-side fetch errors.

/// A fetch that produced no response at all. HTTP error statuses are not
/// errors here; they come back as a `Response` with that status.
#[derive(Debug, thiserror::Error)]
pub enum FetchError {
    #[error("unsupported URL scheme: {0}")]
    UnsupportedScheme(String),
    #[error("network error: {0}")]
    Network(#[from] curl::Error),
    #[error("fetch task failed: {0}")]
    Join(String),
}
