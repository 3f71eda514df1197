//! Entry reads and writes for a single bucket.

mod read;
mod write;

use sqlx::sqlite::SqliteRow;
use sqlx::Row;

use super::types::CacheError;
use crate::http::Response;

/// Rebuild a response from a row carrying the stored response columns.
pub(crate) fn response_from_row(row: &SqliteRow) -> Result<Response, CacheError> {
    let status: i64 = row.get("status");
    let headers_json: String = row.get("headers_json");
    Ok(Response {
        url: row.get("response_url"),
        status: status as u32,
        status_text: row.get("status_text"),
        headers: serde_json::from_str(&headers_json)?,
        body: row.get("body"),
    })
}
