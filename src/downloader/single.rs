//! Single-stream HTTP GET into a temp file.
//!
//! Writes the response body sequentially to storage starting at offset 0.

use anyhow::{Context, Result};
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use crate::config::HttpConfig;
use crate::storage::StorageWriter;

/// Downloads a URL with a single GET, writing sequentially to `storage`.
/// Returns the number of bytes written. A body shorter than the response's
/// own `Content-Length` fails inside libcurl (partial file).
pub fn download_single(url: &str, storage: &StorageWriter, http: &HttpConfig) -> Result<u64> {
    let offset = Arc::new(AtomicU64::new(0));
    let offset_cb = Arc::clone(&offset);
    let storage = storage.clone();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.follow_location(true)?;
    easy.max_redirections(http.max_redirections)?;
    easy.connect_timeout(http.connect_timeout())?;
    easy.timeout(http.timeout())?;
    if let Some(ua) = &http.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.write_function(move |data| {
            let off = offset_cb.fetch_add(data.len() as u64, Ordering::Relaxed);
            match storage.write_at(off, data) {
                Ok(()) => Ok(data.len()),
                Err(e) => {
                    tracing::warn!("wallpaper write failed: {:#}", e);
                    Ok(0) // abort transfer
                }
            }
        })?;
        transfer.perform().context("GET request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if !(200..300).contains(&code) {
        anyhow::bail!("GET {} returned HTTP {}", url, code);
    }

    Ok(offset.load(Ordering::Relaxed))
}
