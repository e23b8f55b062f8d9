//! Download today's image from a wallpaper source and set it as the desktop
//! background.
//!
//! Concrete sources implement [`SourceProvider`]; [`DailyWallpaper`] resolves
//! the source (downloading it into a dated file when it is remote) and hands
//! the file to a [`WallpaperSetter`].

pub mod config;
pub mod daily;
pub mod downloader;
pub mod error;
pub mod fetch_head;
pub mod logging;
pub mod naming;
pub mod resolver;
pub mod setter;
pub mod source;
pub mod storage;

pub use config::{DailyWallpaperConfig, ResolverConfig};
pub use daily::DailyWallpaper;
pub use downloader::{CurlDownloader, Downloader};
pub use error::WallpaperError;
pub use resolver::WallpaperSourceResolver;
pub use setter::{CommandSetter, SystemWallpaper, WallpaperSetter};
pub use source::{SourceProvider, StaticSource, WallpaperSource, DEFAULT_EXTENSION};
