use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;
use url::Url;

/// Default file server for the Census API.
pub const DEFAULT_ENDPOINT: &str = "https://census.daybreakgames.com/";

/// Global configuration loaded from `~/.config/imgdump/config.toml`.
///
/// Every field has a default, so a partial file (or an empty one) is valid.
#[derive(Debug, Clone, Serialize, Deserialize)]
#[serde(default)]
pub struct FetchConfig {
    /// Base URL of the file server.
    pub endpoint: String,
    /// Game segment of the file path (`/files/<game>/images/static/<id>.png`).
    pub game: String,
    /// Output directory used when none is given on the command line.
    pub output_dir: PathBuf,
    /// Maximum number of concurrent downloads (one batch).
    pub batch_size: usize,
    /// Download attempts per ID in verified dumps (including the first).
    pub verify_attempts: u32,
    /// Number of IDs past the current maximum probed by an incremental run.
    pub incremental_count: i64,
    /// Connect timeout per request, in seconds.
    pub connect_timeout_secs: u64,
    /// Whole-request timeout, in seconds.
    pub request_timeout_secs: u64,
    /// Delay before process exit so pooled connections can close.
    pub shutdown_grace_ms: u64,
}

impl Default for FetchConfig {
    fn default() -> Self {
        Self {
            endpoint: DEFAULT_ENDPOINT.to_string(),
            game: "ps2".to_string(),
            output_dir: PathBuf::from("./api-files"),
            batch_size: 20,
            verify_attempts: 5,
            incremental_count: 1000,
            connect_timeout_secs: 15,
            request_timeout_secs: 60,
            shutdown_grace_ms: 1000,
        }
    }
}

impl FetchConfig {
    /// Parsed endpoint URL.
    pub fn endpoint_url(&self) -> Result<Url, url::ParseError> {
        Url::parse(&self.endpoint)
    }

    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn request_timeout(&self) -> Duration {
        Duration::from_secs(self.request_timeout_secs)
    }

    pub fn shutdown_grace(&self) -> Duration {
        Duration::from_millis(self.shutdown_grace_ms)
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("imgdump")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<FetchConfig> {
    let path = config_path()?;
    if !path.exists() {
        let default_cfg = FetchConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(&path, toml)?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }
    load_from_path(&path)
}

/// Load configuration from an explicit file.
pub fn load_from_path(path: &Path) -> Result<FetchConfig> {
    let data =
        fs::read_to_string(path).with_context(|| format!("read config {}", path.display()))?;
    let cfg: FetchConfig =
        toml::from_str(&data).with_context(|| format!("parse config {}", path.display()))?;
    Ok(cfg)
}
