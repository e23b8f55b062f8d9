use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use std::fs;
use std::path::{Path, PathBuf};
use std::time::Duration;

use crate::source::WallpaperSource;

/// Configuration captured by value at the start of every resolution.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ResolverConfig {
    /// Where remote wallpapers are written. Not needed for local sources.
    pub directory: Option<PathBuf>,
}

impl ResolverConfig {
    pub fn with_directory(directory: impl Into<PathBuf>) -> Self {
        Self {
            directory: Some(directory.into()),
        }
    }
}

/// libcurl limits for the HEAD probe and the GET (optional `[http]` section).
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct HttpConfig {
    pub connect_timeout_secs: u64,
    /// Upper bound for the whole GET transfer.
    pub timeout_secs: u64,
    /// Upper bound for the HEAD reachability probe.
    pub probe_timeout_secs: u64,
    pub max_redirections: u32,
    /// Sent as `User-Agent`; some image CDNs reject curl's default.
    pub user_agent: Option<String>,
}

impl Default for HttpConfig {
    fn default() -> Self {
        Self {
            connect_timeout_secs: 15,
            timeout_secs: 300,
            probe_timeout_secs: 30,
            max_redirections: 10,
            user_agent: Some(concat!("daily-wallpaper/", env!("CARGO_PKG_VERSION")).to_string()),
        }
    }
}

impl HttpConfig {
    pub fn connect_timeout(&self) -> Duration {
        Duration::from_secs(self.connect_timeout_secs)
    }

    pub fn timeout(&self) -> Duration {
        Duration::from_secs(self.timeout_secs)
    }

    pub fn probe_timeout(&self) -> Duration {
        Duration::from_secs(self.probe_timeout_secs)
    }
}

/// How the wallpaper is applied (optional `[setter]` section).
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SetterConfig {
    /// Program and leading arguments; the image path is appended.
    /// When empty or missing the native OS integration is used.
    #[serde(default)]
    pub command: Vec<String>,
}

/// Global configuration loaded from `~/.config/daily-wallpaper/config.toml`.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct DailyWallpaperConfig {
    /// Download directory for remote sources.
    #[serde(default)]
    pub directory: Option<PathBuf>,
    /// Optional fixed source, served through `StaticSource`.
    #[serde(default)]
    pub source: Option<WallpaperSource>,
    #[serde(default)]
    pub http: HttpConfig,
    #[serde(default)]
    pub setter: SetterConfig,
}

impl DailyWallpaperConfig {
    pub fn resolver_config(&self) -> ResolverConfig {
        ResolverConfig {
            directory: self.directory.clone(),
        }
    }
}

pub fn config_path() -> Result<PathBuf> {
    let xdg_dirs = xdg::BaseDirectories::with_prefix("daily-wallpaper")?;
    Ok(xdg_dirs.place_config_file("config.toml")?)
}

/// Load configuration from disk, creating a default file if none exists.
pub fn load_or_init() -> Result<DailyWallpaperConfig> {
    load_or_init_at(&config_path()?)
}

/// Same as [`load_or_init`] for an explicit path.
pub fn load_or_init_at(path: &Path) -> Result<DailyWallpaperConfig> {
    if !path.exists() {
        let default_cfg = DailyWallpaperConfig::default();
        let toml = toml::to_string_pretty(&default_cfg)?;
        if let Some(parent) = path.parent() {
            fs::create_dir_all(parent)?;
        }
        fs::write(path, toml).with_context(|| format!("write {}", path.display()))?;
        tracing::info!("created default config at {}", path.display());
        return Ok(default_cfg);
    }

    let data = fs::read_to_string(path).with_context(|| format!("read {}", path.display()))?;
    let cfg: DailyWallpaperConfig =
        toml::from_str(&data).with_context(|| format!("parse {}", path.display()))?;
    Ok(cfg)
}
