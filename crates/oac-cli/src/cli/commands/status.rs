//! `oac status` – show buckets and their entries.

use anyhow::Result;
use oac_core::cache_storage::CacheStorage;

pub async fn run_status(storage: &CacheStorage) -> Result<()> {
    let names = storage.keys().await?;
    if names.is_empty() {
        println!("No cache buckets.");
        return Ok(());
    }
    for name in names {
        // Deleted since `keys` ran.
        let Some(bucket) = storage.bucket(&name).await? else {
            continue;
        };
        let entries = bucket.entries().await?;
        println!("{} ({} entries)", name, entries.len());
        println!("  {:<6} {:<10} {:<16} {}", "STATUS", "SIZE", "SHA256", "URL");
        for e in entries {
            println!(
                "  {:<6} {:<10} {:<16} {}",
                e.status,
                e.size,
                &e.sha256[..16],
                e.url
            );
        }
    }
    Ok(())
}
