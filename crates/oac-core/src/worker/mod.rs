//! The offline asset cache worker.
//!
//! Two handlers, both invoked by the host:
//! - install: open the bucket and pre-populate it with the manifest, all or nothing.
//! - fetch: answer from the cache if possible, else from the network.
//!
//! Neither handler retries, logs failures away, or substitutes content;
//! every error reaches the host unchanged.

mod error;
mod events;
mod host;

pub use error::WorkerError;
pub use events::{FetchEvent, FetchOutcome, InstallEvent, InstallReport, ResponseSource};
pub use host::{WorkerHost, WorkerState};

use std::collections::HashSet;
use std::sync::Arc;
use url::Url;

use crate::cache_storage::CacheStorage;
use crate::config::OacConfig;
use crate::http::{fetch_async, Fetcher, Request};
use crate::manifest::AssetManifest;

/// Stateless worker: everything it keeps is configuration and handles.
#[derive(Clone)]
pub struct OfflineAssetCache {
    storage: CacheStorage,
    fetcher: Arc<dyn Fetcher>,
    cache_name: String,
    manifest: AssetManifest,
    origin: Url,
}

impl OfflineAssetCache {
    pub fn new(
        storage: CacheStorage,
        fetcher: Arc<dyn Fetcher>,
        cache_name: impl Into<String>,
        manifest: AssetManifest,
        origin: Url,
    ) -> Self {
        Self {
            storage,
            fetcher,
            cache_name: cache_name.into(),
            manifest,
            origin,
        }
    }

    pub fn from_config(
        cfg: &OacConfig,
        storage: CacheStorage,
        fetcher: Arc<dyn Fetcher>,
    ) -> Result<Self, WorkerError> {
        let origin = Url::parse(&cfg.origin)?;
        Ok(Self::new(
            storage,
            fetcher,
            cfg.cache_name.clone(),
            cfg.manifest(),
            origin,
        ))
    }

    pub fn cache_name(&self) -> &str {
        &self.cache_name
    }

    pub fn origin(&self) -> &Url {
        &self.origin
    }

    pub fn storage(&self) -> &CacheStorage {
        &self.storage
    }

    pub(crate) fn fetcher(&self) -> Arc<dyn Fetcher> {
        Arc::clone(&self.fetcher)
    }

    /// Open (creating if absent) the bucket and store every manifest asset.
    pub async fn on_install(&self, event: &InstallEvent) -> Result<InstallReport, WorkerError> {
        let urls = self.manifest.resolve(&self.origin)?;
        tracing::debug!(
            cache = %self.cache_name,
            attempt = event.attempt,
            assets = urls.len(),
            "install: populating cache"
        );

        let bucket = self
            .storage
            .open(&self.cache_name)
            .await
            .map_err(WorkerError::Install)?;
        let requests = urls.into_iter().map(Request::get).collect();
        let stored = bucket
            .add_all(self.fetcher(), requests)
            .await
            .map_err(WorkerError::Install)?;

        Ok(InstallReport {
            cache_name: self.cache_name.clone(),
            stored,
        })
    }

    /// True when the bucket holds a response for every manifest URL, which
    /// only a completed install leaves behind. A failed install leaves the
    /// bucket empty.
    pub async fn is_installed(&self) -> Result<bool, WorkerError> {
        let Some(bucket) = self
            .storage
            .bucket(&self.cache_name)
            .await
            .map_err(WorkerError::Cache)?
        else {
            return Ok(false);
        };
        let keys: HashSet<String> = bucket
            .keys()
            .await
            .map_err(WorkerError::Cache)?
            .into_iter()
            .collect();
        let urls = self.manifest.resolve(&self.origin)?;
        Ok(urls
            .into_iter()
            .all(|url| keys.contains(&Request::get(url).cache_key())))
    }

    /// Respond with the cached response for the request, or with whatever
    /// the network returns. Network responses are not written back.
    pub async fn on_fetch(&self, event: FetchEvent) -> Result<FetchOutcome, WorkerError> {
        let request = event.request;
        if let Some(response) = self
            .storage
            .match_any(&request)
            .await
            .map_err(WorkerError::Cache)?
        {
            tracing::debug!(url = %request.url, "fetch: cache hit");
            return Ok(FetchOutcome {
                response,
                source: ResponseSource::Cache,
            });
        }

        tracing::debug!(url = %request.url, "fetch: cache miss, going to network");
        let response = fetch_async(self.fetcher(), request).await?;
        Ok(FetchOutcome {
            response,
            source: ResponseSource::Network,
        })
    }
}
