use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::manifest::{AssetManifest, DEFAULT_ASSETS, DEFAULT_CACHE_NAME};

/// Network parameters for the curl fetcher (optional section in config.toml).
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct NetworkConfig {
    /// Connect timeout in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-transfer timeout in seconds.
    pub timeout_secs: u64,
    /// Maximum redirects followed per request.
    pub max_redirects: u32,
}

impl Default for NetworkConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 60,
            max_redirects: 20,
        }
    }
}

impl NetworkConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }
}

/// Global configuration loaded from `~/.config/oac/config.toml`.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OacConfig {
    /// Origin the manifest paths are resolved against (the app's base URL).
    pub origin: String,
    /// Name of the cache bucket the worker installs into.
    pub cache_name: String,
    /// Asset manifest, pre-fetched at install time in this order.
    pub assets: Vec<String>,
    /// Seconds the host waits for install before cancelling it.
    pub install_timeout_secs: u64,
    /// Optional network section; if missing, built-in defaults are used.
    #[serde(default)]
    pub network: Option<NetworkConfig>,
}

impl Default for OacConfig {
    fn default() -> Self {
        Self {
            origin: "http://127.0.0.1:8000/".to_string(),
            cache_name: DEFAULT_CACHE_NAME.to_string(),
            assets: DEFAULT_ASSETS.iter().map(|s| s.to_string()).collect(),
            install_timeout_secs: 300,
            network: None,
        }
    }
}

impl OacConfig {
    pub fn manifest(&self) -> AssetManifest {
        AssetManifest::new(self.assets.clone())
    }

    pub fn network(&self) -> NetworkConfig {
        self.network.clone().unwrap_or_default()
    }

    pub fn install_timeout(&self) -> Duration {
        Duration::from_secs(self.install_timeout_secs)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("oac")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<OacConfig> {
    load_or_init_at(&config_path()?)
}

/// Like `load_or_init` but at an explicit path (tests, `--config`).
pub fn load_or_init_at(path: &Path) -> Result<OacConfig> {
    if !path.exists() {
        let default_cfg = OacConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path)
        .with_context(|| format!("read config {}", path.display()))?;
    let cfg: OacConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
