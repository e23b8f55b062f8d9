//! Error taxonomy reported to callers of the resolver and orchestrator.
//!
//! Every failure is wrapped into one of these kinds where it originates. The
//! low-level cause (curl, I/O, provider error) is kept as `source()` but never
//! leaks into the message.

use std::path::PathBuf;
use thiserror::Error;

/// Boxed low-level cause carried by the wrapping variants.
pub type Cause = Box<dyn std::error::Error + Send + Sync + 'static>;

#[derive(Debug, Error)]
pub enum WallpaperError {
    /// No source provider was supplied.
    #[error("DailyWallpaper source provider must be implemented")]
    NotImplemented,

    /// The provider itself returned an error.
    #[error("Error while getting the wallpaper of the day")]
    SourceFetchFailed {
        #[source]
        source: Cause,
    },

    /// The provider returned nothing usable (no URL and no path).
    #[error("Wallpaper source is not set")]
    SourceNotSet,

    #[error("Directory is not set")]
    DirectoryNotSet,

    #[error("Directory \"{}\" doesn't exist", .directory.display())]
    DirectoryNotFound { directory: PathBuf },

    #[error("Wallpaper file \"{}\" doesn't exist", .path.display())]
    SourceFileNotFound { path: PathBuf },

    /// Probe, transfer or write failure while fetching a remote source.
    #[error("Error while downloading the wallpaper at {url}")]
    DownloadFailed {
        url: String,
        #[source]
        source: Cause,
    },

    #[error("Error while setting the wallpaper from {}", .path.display())]
    WallpaperSetFailed {
        path: PathBuf,
        #[source]
        source: Cause,
    },
}

impl WallpaperError {
    pub(crate) fn source_fetch_failed(err: anyhow::Error) -> Self {
        WallpaperError::SourceFetchFailed { source: err.into() }
    }

    pub(crate) fn download_failed(url: &str, err: anyhow::Error) -> Self {
        WallpaperError::DownloadFailed {
            url: url.to_string(),
            source: err.into(),
        }
    }

    pub(crate) fn wallpaper_set_failed(path: PathBuf, err: anyhow::Error) -> Self {
        WallpaperError::WallpaperSetFailed {
            path,
            source: err.into(),
        }
    }
}
