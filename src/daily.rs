//! `DailyWallpaper`: resolve today's source, then apply it.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::{DailyWallpaperConfig, ResolverConfig};
use crate::downloader::{CurlDownloader, Downloader};
use crate::error::WallpaperError;
use crate::resolver::WallpaperSourceResolver;
use crate::setter::{self, SystemWallpaper, WallpaperSetter};
use crate::source::{SourceProvider, StaticSource};

/// Composes a source provider, the resolver and a wallpaper setter.
///
/// The provider is optional so a half-configured instance still reports
/// [`WallpaperError::NotImplemented`] instead of failing to build.
pub struct DailyWallpaper {
    provider: Option<Arc<dyn SourceProvider>>,
    resolver: WallpaperSourceResolver,
    setter: Arc<dyn WallpaperSetter>,
    config: ResolverConfig,
}

impl Default for DailyWallpaper {
    fn default() -> Self {
        Self {
            provider: None,
            resolver: WallpaperSourceResolver::default(),
            setter: Arc::new(SystemWallpaper),
            config: ResolverConfig::default(),
        }
    }
}

impl DailyWallpaper {
    pub fn new() -> Self {
        Self::default()
    }

    /// Build from `config.toml`: HTTP limits, setter backend, directory and,
    /// if present, the static `[source]`.
    pub fn from_config(cfg: &DailyWallpaperConfig) -> Self {
        Self {
            provider: cfg
                .source
                .clone()
                .map(|s| Arc::new(StaticSource(s)) as Arc<dyn SourceProvider>),
            resolver: WallpaperSourceResolver::new(Arc::new(CurlDownloader::new(cfg.http.clone()))),
            setter: setter::from_config(&cfg.setter),
            config: cfg.resolver_config(),
        }
    }

    pub fn with_provider(mut self, provider: Arc<dyn SourceProvider>) -> Self {
        self.provider = Some(provider);
        self
    }

    pub fn with_downloader(mut self, downloader: Arc<dyn Downloader>) -> Self {
        self.resolver = WallpaperSourceResolver::new(downloader);
        self
    }

    pub fn with_setter(mut self, setter: Arc<dyn WallpaperSetter>) -> Self {
        self.setter = setter;
        self
    }

    pub fn with_directory(mut self, directory: impl Into<PathBuf>) -> Self {
        self.set_directory(directory);
        self
    }

    pub fn set_directory(&mut self, directory: impl Into<PathBuf>) {
        self.config.directory = Some(directory.into());
    }

    pub fn directory(&self) -> Option<&std::path::Path> {
        self.config.directory.as_deref()
    }

    /// Resolve today's wallpaper to a local file without applying it.
    pub async fn resolve(&self) -> Result<PathBuf, WallpaperError> {
        self.resolver
            .resolve(self.provider.as_deref(), &self.config)
            .await
    }

    /// Resolve today's wallpaper and set it as the desktop background.
    /// Returns the applied file path.
    pub async fn set_daily_wallpaper(&self) -> Result<PathBuf, WallpaperError> {
        let path = self.resolve().await?;

        if let Err(e) = self.setter.set_wallpaper(&path).await {
            tracing::error!(
                "Error while setting the wallpaper from {}: {:#}",
                path.display(),
                e
            );
            return Err(WallpaperError::wallpaper_set_failed(path, e));
        }

        tracing::info!("wallpaper set to {}", path.display());
        Ok(path)
    }
}
