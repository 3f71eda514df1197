//! CLI host for the OAC offline asset cache.

mod commands;

use anyhow::Result;
use clap::{Args, Parser, Subcommand};
use oac_core::cache_storage::CacheStorage;
use oac_core::config::{self, OacConfig};
use oac_core::http::CurlFetcher;
use oac_core::worker::{OfflineAssetCache, WorkerHost};
use std::path::PathBuf;
use std::sync::Arc;

use commands::{run_buckets, run_delete_bucket, run_fetch, run_install, run_status};

/// Top-level CLI for the OAC offline asset cache.
#[derive(Debug, Parser)]
#[command(name = "oac")]
#[command(about = "OAC: offline asset cache for the ISBN scanner app", long_about = None)]
pub struct Cli {
    #[command(flatten)]
    pub overrides: Overrides,

    #[command(subcommand)]
    pub command: CliCommand,
}

/// Settings that override config.toml for a single invocation.
#[derive(Debug, Args)]
pub struct Overrides {
    /// Use this config file instead of ~/.config/oac/config.toml.
    #[arg(long, global = true, value_name = "PATH")]
    pub config: Option<PathBuf>,

    /// Origin the asset manifest is resolved against.
    #[arg(long, global = true, value_name = "URL")]
    pub origin: Option<String>,

    /// Cache bucket name to install into.
    #[arg(long, global = true, value_name = "NAME")]
    pub cache_name: Option<String>,
}

impl Overrides {
    fn load(&self) -> Result<OacConfig> {
        let mut cfg = match &self.config {
            Some(path) => config::load_or_init_at(path)?,
            None => config::load_or_init()?,
        };
        if let Some(origin) = &self.origin {
            cfg.origin = origin.clone();
        }
        if let Some(name) = &self.cache_name {
            cfg.cache_name = name.clone();
        }
        Ok(cfg)
    }
}

#[derive(Debug, Subcommand)]
pub enum CliCommand {
    /// Install the worker: pre-cache every asset in the manifest.
    Install,

    /// Fetch a URL (or origin-relative path) through the worker.
    Fetch {
        /// Absolute URL or path such as /static/ISBNbookscanner.png.
        target: String,

        /// Write the response body to this file.
        #[arg(long, short, value_name = "FILE")]
        output: Option<PathBuf>,
    },

    /// Show every bucket with its entries, sizes and digests.
    Status,

    /// List bucket names in creation order.
    Buckets,

    /// Delete a cache bucket and its entries.
    DeleteBucket {
        /// Bucket name, e.g. isbn-app-cache-v1.
        name: String,
    },
}

/// Worker host over the given store, wired to the curl network.
fn build_host(cfg: &OacConfig, storage: &CacheStorage) -> Result<WorkerHost> {
    let fetcher = Arc::new(CurlFetcher::new(cfg.network()));
    let worker = OfflineAssetCache::from_config(cfg, storage.clone(), fetcher)?;
    Ok(WorkerHost::new(worker, cfg.install_timeout()))
}

impl CliCommand {
    pub async fn run_from_args() -> Result<()> {
        let cli = Cli::parse();
        let cfg = cli.overrides.load()?;
        tracing::debug!("loaded config: {:?}", cfg);
        let storage = CacheStorage::open_default().await?;

        match cli.command {
            CliCommand::Install => {
                let mut host = build_host(&cfg, &storage)?;
                run_install(&mut host).await?;
            }
            CliCommand::Fetch { target, output } => {
                let mut host = build_host(&cfg, &storage)?;
                run_fetch(&mut host, &target, output.as_deref()).await?;
            }
            CliCommand::Status => run_status(&storage).await?,
            CliCommand::Buckets => run_buckets(&storage).await?,
            CliCommand::DeleteBucket { name } => run_delete_bucket(&storage, &name).await?,
        }

        Ok(())
    }
}

#[cfg(test)]
mod tests;
