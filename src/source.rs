//! Wallpaper source descriptor and the provider capability that yields it.
//!
//! Concrete "daily wallpaper" backends (photo-of-the-day APIs, local
//! rotations, ...) implement [`SourceProvider`]; the resolver only sees the
//! returned [`WallpaperSource`].

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use std::path::{Path, PathBuf};

use crate::naming;

/// Extension used for remote sources that do not name one.
pub const DEFAULT_EXTENSION: &str = "jpg";

/// Where today's wallpaper comes from: a remote URL or a local file.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct WallpaperSource {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub url: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub path: Option<PathBuf>,
    /// File extension for the downloaded image. Only used with `url`.
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub extension: Option<String>,
}

/// Which resolution branch a source takes.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SourceKind<'a> {
    Remote { url: &'a str, extension: &'a str },
    Local { path: &'a Path },
    Unset,
}

impl WallpaperSource {
    pub fn remote(url: impl Into<String>) -> Self {
        Self {
            url: Some(url.into()),
            ..Self::default()
        }
    }

    pub fn local(path: impl Into<PathBuf>) -> Self {
        Self {
            path: Some(path.into()),
            ..Self::default()
        }
    }

    pub fn with_extension(mut self, extension: impl Into<String>) -> Self {
        self.extension = Some(extension.into());
        self
    }

    /// Classifies the source. A URL wins over a path when both are present;
    /// empty strings count as unset.
    pub fn kind(&self) -> SourceKind<'_> {
        let url = self.url.as_deref().map(str::trim).filter(|u| !u.is_empty());
        let path = self
            .path
            .as_deref()
            .filter(|p| !p.as_os_str().is_empty());
        match (url, path) {
            (Some(url), _) => SourceKind::Remote {
                url,
                extension: self.effective_extension(),
            },
            (None, Some(path)) => SourceKind::Local { path },
            (None, None) => SourceKind::Unset,
        }
    }

    /// Extension without leading dots, falling back to [`DEFAULT_EXTENSION`]
    /// when unset or not a plain alphanumeric name.
    pub fn effective_extension(&self) -> &str {
        match self.extension.as_deref() {
            None => DEFAULT_EXTENSION,
            Some(raw) => naming::safe_extension(raw).unwrap_or_else(|| {
                if !raw.trim().is_empty() {
                    tracing::warn!("ignoring unusable wallpaper extension {:?}", raw);
                }
                DEFAULT_EXTENSION
            }),
        }
    }
}

/// Capability that yields today's wallpaper source.
///
/// `Ok(None)` means the provider ran but has nothing to offer; the resolver
/// reports it the same way as a source with neither URL nor path.
#[async_trait]
pub trait SourceProvider: Send + Sync {
    async fn wallpaper_source(&self) -> anyhow::Result<Option<WallpaperSource>>;
}

/// Provider that always returns the same source (e.g. from `config.toml`).
#[derive(Debug, Clone)]
pub struct StaticSource(pub WallpaperSource);

#[async_trait]
impl SourceProvider for StaticSource {
    async fn wallpaper_source(&self) -> anyhow::Result<Option<WallpaperSource>> {
        Ok(Some(self.0.clone()))
    }
}
