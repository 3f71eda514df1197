//! `oac buckets` – list bucket names.

use anyhow::Result;
use oac_core::cache_storage::CacheStorage;

pub async fn run_buckets(storage: &CacheStorage) -> Result<()> {
    for name in storage.keys().await? {
        println!("{name}");
    }
    Ok(())
}
