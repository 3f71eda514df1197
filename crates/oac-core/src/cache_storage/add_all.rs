//! Fetch-and-store of a batch of requests, all or nothing.

use std::collections::HashSet;
use std::sync::Arc;
use tokio::task::JoinSet;

use super::db::CacheBucket;
use super::types::CacheError;
use crate::http::{fetch_async, Fetcher, Request, Response};

impl CacheBucket {
    /// Fetch every request from the network and store all responses.
    ///
    /// Fetches run concurrently. If any of them fails, or comes back with a
    /// status outside 2xx, a 206, or `Vary: *`, nothing is written and the
    /// first error observed is returned. Returns the number of writes.
    pub async fn add_all(
        &self,
        fetcher: Arc<dyn Fetcher>,
        requests: Vec<Request>,
    ) -> Result<usize, CacheError> {
        validate_batch(&requests)?;

        let total = requests.len();
        let mut set = JoinSet::new();
        for (index, request) in requests.into_iter().enumerate() {
            let fetcher = Arc::clone(&fetcher);
            set.spawn(async move {
                let key = request.cache_key();
                let result = fetch_async(fetcher, request).await;
                (index, key, result)
            });
        }

        let mut slots: Vec<Option<(String, Response)>> = vec![None; total];
        while let Some(joined) = set.join_next().await {
            let (index, key, result) = joined.map_err(|e| CacheError::Task(e.to_string()))?;
            let response = result.map_err(|source| CacheError::Fetch {
                url: key.clone(),
                source,
            })?;
            check_cacheable(&key, &response)?;
            slots[index] = Some((key, response));
        }

        // Store in manifest order regardless of completion order.
        let entries: Vec<(String, Response)> = slots.into_iter().flatten().collect();
        self.put_all(&entries).await
    }
}

fn validate_batch(requests: &[Request]) -> Result<(), CacheError> {
    let mut seen = HashSet::with_capacity(requests.len());
    for request in requests {
        if !request.is_get() {
            return Err(CacheError::UnsupportedMethod {
                method: request.method.clone(),
                url: request.url.to_string(),
            });
        }
        if !request.is_http() {
            return Err(CacheError::UnsupportedScheme(request.url.to_string()));
        }
        let key = request.cache_key();
        if !seen.insert(key.clone()) {
            return Err(CacheError::DuplicateRequest(key));
        }
    }
    Ok(())
}

fn check_cacheable(key: &str, response: &Response) -> Result<(), CacheError> {
    if !response.ok() {
        return Err(CacheError::BadResponse {
            url: key.to_string(),
            status: response.status,
        });
    }
    if response.status == 206 {
        return Err(CacheError::UnacceptableResponse {
            url: key.to_string(),
            reason: "partial content",
        });
    }
    let vary_any = response
        .headers
        .iter()
        .filter(|(name, _)| name.eq_ignore_ascii_case("vary"))
        .flat_map(|(_, value)| value.split(','))
        .any(|v| v.trim() == "*");
    if vary_any {
        return Err(CacheError::UnacceptableResponse {
            url: key.to_string(),
            reason: "Vary: *",
        });
    }
    Ok(())
}
