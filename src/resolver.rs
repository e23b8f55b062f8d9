//! Turns a wallpaper source into a local file path.
//!
//! Remote sources are downloaded into the configured directory; local sources
//! are checked for existence and passed through untouched.

use std::path::PathBuf;
use std::sync::Arc;

use crate::config::ResolverConfig;
use crate::downloader::{CurlDownloader, Downloader};
use crate::error::WallpaperError;
use crate::source::{SourceKind, SourceProvider};

pub struct WallpaperSourceResolver {
    downloader: Arc<dyn Downloader>,
}

impl Default for WallpaperSourceResolver {
    fn default() -> Self {
        Self::new(Arc::new(CurlDownloader::default()))
    }
}

impl WallpaperSourceResolver {
    pub fn new(downloader: Arc<dyn Downloader>) -> Self {
        Self { downloader }
    }

    /// Resolve today's wallpaper to a file on disk.
    ///
    /// `config` is read once, up front; nothing the caller changes afterwards
    /// affects this call. Every failure is logged at error level before it is
    /// returned.
    pub async fn resolve(
        &self,
        provider: Option<&dyn SourceProvider>,
        config: &ResolverConfig,
    ) -> Result<PathBuf, WallpaperError> {
        let config = config.clone();
        let result = self.resolve_with(provider, config).await;
        if let Err(err) = &result {
            log_failure(err);
        }
        result
    }

    async fn resolve_with(
        &self,
        provider: Option<&dyn SourceProvider>,
        config: ResolverConfig,
    ) -> Result<PathBuf, WallpaperError> {
        let provider = provider.ok_or(WallpaperError::NotImplemented)?;

        let source = provider
            .wallpaper_source()
            .await
            .map_err(WallpaperError::source_fetch_failed)?
            .unwrap_or_default();

        match source.kind() {
            SourceKind::Unset => Err(WallpaperError::SourceNotSet),
            SourceKind::Remote { url, extension } => {
                if source.path.is_some() {
                    tracing::debug!(url, "source has both url and path, using url");
                }
                let directory = config.directory.ok_or(WallpaperError::DirectoryNotSet)?;
                if !directory.is_dir() {
                    return Err(WallpaperError::DirectoryNotFound { directory });
                }
                self.downloader
                    .download(url, &directory, extension)
                    .await
                    .map_err(|e| WallpaperError::download_failed(url, e))
            }
            SourceKind::Local { path } => {
                if !path.exists() {
                    return Err(WallpaperError::SourceFileNotFound {
                        path: path.to_path_buf(),
                    });
                }
                Ok(path.to_path_buf())
            }
        }
    }
}

/// `<message>: <cause>: <cause>...`
fn log_failure(err: &WallpaperError) {
    let mut line = err.to_string();
    let mut cause = std::error::Error::source(err);
    while let Some(c) = cause {
        line.push_str(": ");
        line.push_str(&c.to_string());
        cause = c.source();
    }
    tracing::error!("{}", line);
}
