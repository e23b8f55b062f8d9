//! Fetch a remote wallpaper into the download directory.
//!
//! The destination is always `<directory>/<YYYY-MM-DD>.<extension>`. A HEAD
//! probe runs first; if it fails nothing is written. The body then streams
//! into a `.part` file private to this transfer, which is renamed over the
//! destination on success.

mod single;

use anyhow::{Context, Result};
use async_trait::async_trait;
use chrono::NaiveDate;
use std::path::{Path, PathBuf};

use crate::config::HttpConfig;
use crate::fetch_head;
use crate::naming;
use crate::storage::TempDownload;

pub use single::download_single;

/// Fetches `url` into `directory`, returning the written file path.
#[async_trait]
pub trait Downloader: Send + Sync {
    async fn download(&self, url: &str, directory: &Path, extension: &str) -> Result<PathBuf>;
}

/// libcurl-backed downloader. Blocking transfers run on tokio's blocking pool.
#[derive(Debug, Clone)]
pub struct CurlDownloader {
    http: HttpConfig,
    clock: fn() -> NaiveDate,
}

impl Default for CurlDownloader {
    fn default() -> Self {
        Self::new(HttpConfig::default())
    }
}

impl CurlDownloader {
    pub fn new(http: HttpConfig) -> Self {
        Self {
            http,
            clock: naming::today,
        }
    }

    /// Override the date used for filenames.
    pub fn with_clock(mut self, clock: fn() -> NaiveDate) -> Self {
        self.clock = clock;
        self
    }

    pub fn destination(&self, directory: &Path, extension: &str) -> PathBuf {
        naming::destination_path(directory, (self.clock)(), extension)
    }
}

/// Only absolute http(s) URLs are handed to curl.
fn validate_url(raw: &str) -> Result<()> {
    let parsed = url::Url::parse(raw).with_context(|| format!("invalid URL: {}", raw))?;
    match parsed.scheme() {
        "http" | "https" => Ok(()),
        other => anyhow::bail!("unsupported URL scheme: {}", other),
    }
}

/// Probe, stream to a private temp file, then move it over `destination`.
///
/// The HEAD answer only gates the transfer; its `Content-Length` is not
/// compared with the GET body, which libcurl checks against its own headers.
fn fetch_to_path(url: &str, destination: &Path, http: &HttpConfig) -> Result<u64> {
    let head = fetch_head::probe(url, http)?;
    tracing::debug!(
        url,
        status = head.status,
        content_length = ?head.content_length,
        content_type = ?head.content_type,
        "probe ok"
    );

    let tmp = TempDownload::create_for(destination)?;
    let result = download_single(url, &tmp.writer(), http).and_then(|written| {
        tmp.sync()?;
        Ok(written)
    });
    match result {
        Ok(written) => {
            tmp.persist(destination)?;
            Ok(written)
        }
        Err(e) => {
            tmp.discard();
            Err(e)
        }
    }
}

#[async_trait]
impl Downloader for CurlDownloader {
    async fn download(&self, url: &str, directory: &Path, extension: &str) -> Result<PathBuf> {
        validate_url(url)?;
        let extension = naming::safe_extension(extension)
            .with_context(|| format!("invalid wallpaper extension: {:?}", extension))?;
        let destination = self.destination(directory, extension);

        let url_owned = url.to_string();
        let dest = destination.clone();
        let http = self.http.clone();
        let written = tokio::task::spawn_blocking(move || fetch_to_path(&url_owned, &dest, &http))
            .await
            .context("download task panicked")??;

        tracing::info!(
            "downloaded {} ({} bytes) to {}",
            url,
            written,
            destination.display()
        );
        Ok(destination)
    }
}
