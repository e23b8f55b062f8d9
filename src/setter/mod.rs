//! Desktop wallpaper backends.
//!
//! [`SystemWallpaper`] goes through the `wallpaper` crate (GNOME, KDE, XFCE,
//! macOS, Windows, ...). [`CommandSetter`] runs a user-supplied program for
//! setups the crate does not know (swww, feh, hyprpaper, ...).

mod command;

use anyhow::{anyhow, Context, Result};
use async_trait::async_trait;
use std::path::{Path, PathBuf};
use std::sync::Arc;

use crate::config::SetterConfig;

pub use command::CommandSetter;

/// Applies an image file as the desktop wallpaper.
#[async_trait]
pub trait WallpaperSetter: Send + Sync {
    async fn set_wallpaper(&self, path: &Path) -> Result<()>;
}

/// Native OS integration through the `wallpaper` crate.
#[derive(Debug, Clone, Copy, Default)]
pub struct SystemWallpaper;

fn path_str(path: &Path) -> Result<&str> {
    path.to_str()
        .ok_or_else(|| anyhow!("path is not valid UTF-8: {}", path.display()))
}

#[async_trait]
impl WallpaperSetter for SystemWallpaper {
    async fn set_wallpaper(&self, path: &Path) -> Result<()> {
        let path: PathBuf = path.to_path_buf();
        tokio::task::spawn_blocking(move || -> Result<()> {
            let s = path_str(&path)?;
            // The crate's error is not Send; flatten it before leaving the closure.
            wallpaper::set_from_path(s).map_err(|e| anyhow!("wallpaper: {}", e))
        })
        .await
        .context("wallpaper task panicked")?
    }
}

/// Pick the backend described by `[setter]` in the config file.
pub fn from_config(cfg: &SetterConfig) -> Arc<dyn WallpaperSetter> {
    match CommandSetter::from_argv(&cfg.command) {
        Some(cmd) => Arc::new(cmd),
        None => Arc::new(SystemWallpaper),
    }
}
