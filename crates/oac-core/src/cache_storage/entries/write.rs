//! Entry write operations.

use super::super::db::{unix_timestamp, CacheBucket};
use super::super::types::CacheError;
use crate::http::{Request, Response};

impl CacheBucket {
    /// Store `response` under `request`, replacing any previous entry.
    pub async fn put(&self, request: &Request, response: &Response) -> Result<(), CacheError> {
        if !request.is_get() {
            return Err(CacheError::UnsupportedMethod {
                method: request.method.clone(),
                url: request.url.to_string(),
            });
        }
        self.put_all(&[(request.cache_key(), response.clone())])
            .await?;
        Ok(())
    }

    /// Write every `(key, response)` pair in one transaction: either all are
    /// stored or none are. Returns the number of writes.
    pub async fn put_all(&self, entries: &[(String, Response)]) -> Result<usize, CacheError> {
        let stored_at = unix_timestamp();
        let mut tx = self.pool.begin().await?;
        let mut written = 0usize;
        for (key, response) in entries {
            sqlx::query(
                r#"
                INSERT OR REPLACE INTO entries (
                    bucket_id, url, response_url, status, status_text,
                    headers_json, body, stored_at
                ) VALUES (?, ?, ?, ?, ?, ?, ?, ?)
                "#,
            )
            .bind(self.id)
            .bind(key)
            .bind(&response.url)
            .bind(response.status as i64)
            .bind(&response.status_text)
            .bind(serde_json::to_string(&response.headers)?)
            .bind(&response.body)
            .bind(stored_at)
            .execute(&mut *tx)
            .await?;
            written += 1;
        }
        tx.commit().await?;
        tracing::debug!(bucket = %self.name, written, "stored cache entries");
        Ok(written)
    }
}
