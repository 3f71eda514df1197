//! `oac delete-bucket <name>` – remove a bucket. The worker itself never does this.

use anyhow::Result;
use oac_core::cache_storage::CacheStorage;

pub async fn run_delete_bucket(storage: &CacheStorage, name: &str) -> Result<()> {
    if storage.delete(name).await? {
        println!("Deleted bucket {name}");
    } else {
        println!("No bucket named {name}");
    }
    Ok(())
}
