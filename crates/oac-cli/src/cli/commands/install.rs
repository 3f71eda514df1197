//! `oac install` – dispatch the install event and report the outcome.

use anyhow::Result;
use oac_core::worker::WorkerHost;

pub async fn run_install(host: &mut WorkerHost) -> Result<()> {
    let report = host.install().await?;
    println!(
        "Installed: cached {} asset(s) in bucket {}",
        report.stored, report.cache_name
    );
    Ok(())
}
