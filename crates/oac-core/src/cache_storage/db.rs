//! SQLite-backed cache storage implementation.
//!
//! Handles connection, migrations and the bucket namespace. Entry reads and
//! writes live in `entries`.

use sqlx::sqlite::SqlitePoolOptions;
use sqlx::{Pool, Row, Sqlite};
use std::path::Path;
use std::time::{SystemTime, UNIX_EPOCH};

use super::types::{BucketId, CacheError};
use crate::http::{Request, Response};

/// Percent-encode a path for use in a sqlite:// URI so spaces and special chars don't break parsing.
fn path_to_sqlite_uri(path: &Path) -> String {
    let s = path.to_string_lossy();
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '%' => out.push_str("%25"),
            ' ' => out.push_str("%20"),
            '#' => out.push_str("%23"),
            '?' => out.push_str("%3F"),
            '&' => out.push_str("%26"),
            c => out.push(c),
        }
    }
    format!("sqlite://{}?mode=rwc", out)
}

/// Handle to the bucket store.
///
/// The database file lives under the XDG state directory:
/// `~/.local/state/oac/cache.db`.
#[derive(Clone)]
pub struct CacheStorage {
    pub(crate) pool: Pool<Sqlite>,
}

/// One named bucket. Cheap to clone; all clones see the same entries.
#[derive(Clone)]
pub struct CacheBucket {
    pub(crate) pool: Pool<Sqlite>,
    pub(crate) id: BucketId,
    pub(crate) name: String,
}

impl CacheBucket {
    pub fn name(&self) -> &str {
        &self.name
    }
}

impl CacheStorage {
    /// Open (or create) the default store and run migrations.
    pub async fn open_default() -> anyhow::Result<Self> {
        let xdg_dirs = xdg::BaseDirectories::with_prefix("oac")?;
        let db_path = xdg_dirs.get_state_home().join("oac").join("cache.db");
        Ok(Self::open_at(&db_path).await?)
    }

    /// Open (or create) the store at a specific path. Creates parent dirs if needed.
    pub async fn open_at(path: impl AsRef<Path>) -> Result<Self, CacheError> {
        let path = path.as_ref();
        if let Some(parent) = path.parent() {
            tokio::fs::create_dir_all(parent)
                .await
                .map_err(|e| CacheError::Storage(sqlx::Error::Io(e)))?;
        }
        let pool = SqlitePoolOptions::new()
            .max_connections(8)
            .connect(&path_to_sqlite_uri(path))
            .await?;
        let storage = CacheStorage { pool };
        storage.migrate().await?;
        Ok(storage)
    }

    async fn migrate(&self) -> Result<(), CacheError> {
        // Bucket order is creation order (AUTOINCREMENT id). Entry order is
        // insertion order; INSERT OR REPLACE gives a replaced entry a new id,
        // moving it to the end.
        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS buckets (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                name TEXT NOT NULL UNIQUE,
                created_at INTEGER NOT NULL
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        sqlx::query(
            r#"
            CREATE TABLE IF NOT EXISTS entries (
                id INTEGER PRIMARY KEY AUTOINCREMENT,
                bucket_id INTEGER NOT NULL,
                url TEXT NOT NULL,
                response_url TEXT NOT NULL,
                status INTEGER NOT NULL,
                status_text TEXT NOT NULL,
                headers_json TEXT NOT NULL,
                body BLOB NOT NULL,
                stored_at INTEGER NOT NULL,
                UNIQUE (bucket_id, url)
            );
            "#,
        )
        .execute(&self.pool)
        .await?;

        Ok(())
    }

    /// Open the bucket called `name`, creating it if absent.
    pub async fn open(&self, name: &str) -> Result<CacheBucket, CacheError> {
        sqlx::query("INSERT OR IGNORE INTO buckets (name, created_at) VALUES (?, ?)")
            .bind(name)
            .bind(unix_timestamp())
            .execute(&self.pool)
            .await?;
        let id: i64 = sqlx::query("SELECT id FROM buckets WHERE name = ?")
            .bind(name)
            .fetch_one(&self.pool)
            .await?
            .get("id");
        Ok(CacheBucket {
            pool: self.pool.clone(),
            id,
            name: name.to_string(),
        })
    }

    pub async fn has(&self, name: &str) -> Result<bool, CacheError> {
        let row = sqlx::query("SELECT 1 FROM buckets WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.is_some())
    }

    /// The bucket called `name`, if it exists. Never creates one.
    pub async fn bucket(&self, name: &str) -> Result<Option<CacheBucket>, CacheError> {
        let row = sqlx::query("SELECT id FROM buckets WHERE name = ?")
            .bind(name)
            .fetch_optional(&self.pool)
            .await?;
        Ok(row.map(|r| CacheBucket {
            pool: self.pool.clone(),
            id: r.get("id"),
            name: name.to_string(),
        }))
    }

    /// Remove a bucket and all its entries. Returns false if it did not exist.
    pub async fn delete(&self, name: &str) -> Result<bool, CacheError> {
        let mut tx = self.pool.begin().await?;
        let row = sqlx::query("SELECT id FROM buckets WHERE name = ?")
            .bind(name)
            .fetch_optional(&mut *tx)
            .await?;
        let Some(row) = row else {
            return Ok(false);
        };
        let id: i64 = row.get("id");
        sqlx::query("DELETE FROM entries WHERE bucket_id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        sqlx::query("DELETE FROM buckets WHERE id = ?")
            .bind(id)
            .execute(&mut *tx)
            .await?;
        tx.commit().await?;
        tracing::info!(bucket = name, "deleted cache bucket");
        Ok(true)
    }

    /// Bucket names in creation order.
    pub async fn keys(&self) -> Result<Vec<String>, CacheError> {
        let rows = sqlx::query("SELECT name FROM buckets ORDER BY id")
            .fetch_all(&self.pool)
            .await?;
        Ok(rows.iter().map(|r| r.get("name")).collect())
    }

    /// Look `request` up in every bucket, oldest first; the first hit wins.
    pub async fn match_any(&self, request: &Request) -> Result<Option<Response>, CacheError> {
        if !request.is_get() {
            return Ok(None);
        }
        let row = sqlx::query(
            r#"
            SELECT e.response_url, e.status, e.status_text, e.headers_json, e.body
            FROM entries e
            JOIN buckets b ON b.id = e.bucket_id
            WHERE e.url = ?
            ORDER BY b.id
            LIMIT 1
            "#,
        )
        .bind(request.cache_key())
        .fetch_optional(&self.pool)
        .await?;
        row.map(|r| super::entries::response_from_row(&r)).transpose()
    }
}

/// Current time as Unix seconds (for stored-at timestamps).
pub(crate) fn unix_timestamp() -> i64 {
    SystemTime::now()
        .duration_since(UNIX_EPOCH)
        .unwrap_or_default()
        .as_secs() as i64
}

#[cfg(test)]
/// Open an in-memory store for tests (no disk I/O).
pub(crate) async fn open_memory() -> Result<CacheStorage, CacheError> {
    let pool = SqlitePoolOptions::new()
        .max_connections(1)
        .connect("sqlite::memory:")
        .await?;
    let storage = CacheStorage { pool };
    storage.migrate().await?;
    Ok(storage)
}
