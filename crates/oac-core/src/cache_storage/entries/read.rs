//! Entry read operations: match, keys, summaries.

use sqlx::Row;

use super::super::db::CacheBucket;
use super::super::types::{CacheError, EntrySummary};
use super::response_from_row;
use crate::checksum;
use crate::http::{Request, Response};

impl CacheBucket {
    /// Stored response for `request`, if any. Non-GET requests never match.
    pub async fn match_request(&self, request: &Request) -> Result<Option<Response>, CacheError> {
        if !request.is_get() {
            return Ok(None);
        }
        let row = sqlx::query(
            r#"
            SELECT response_url, status, status_text, headers_json, body
            FROM entries
            WHERE bucket_id = ? AND url = ?
            "#,
        )
        .bind(self.id)
        .bind(request.cache_key())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| response_from_row(&r)).transpose()
    }

    /// Cache keys in insertion order.
    pub async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let rows = sqlx::query("SELECT url FROM entries WHERE bucket_id = ? ORDER BY id")
            .bind(self.id)
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|r| r.get("url")).collect())
    }

    /// Per-entry status, size and body digest, in insertion order.
    pub async fn entries(&self) -> Result<Vec<EntrySummary>, CacheError> {
        let rows = sqlx::query(
            r#"
            SELECT url, status, body, stored_at
            FROM entries
            WHERE bucket_id = ?
            ORDER BY id
            "#,
        )
        .bind(self.id)
        .fetch_all(&self.pool)
        .await?;

        let mut out = Vec::with_capacity(rows.len());
        for row in rows {
            let status: i64 = row.get("status");
            let body: Vec<u8> = row.get("body");
            out.push(EntrySummary {
                url: row.get("url"),
                status: status as u32,
                size: body.len() as u64,
                sha256: checksum::sha256_hex(&body),
                stored_at: row.get("stored_at"),
            });
        }
        Ok(out)
    }
}
