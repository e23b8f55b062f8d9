//! HTTP HEAD reachability probe.
//!
//! Uses the curl crate (libcurl) to confirm the wallpaper URL answers before
//! anything is written, and captures `Content-Length` / `Content-Type` so the
//! GET can detect truncated bodies.

mod parse;

use anyhow::{Context, Result};
use std::str;

use crate::config::HttpConfig;

/// Result of a HEAD request: metadata used by the downloader.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct HeadResult {
    /// Final HTTP status code (after redirects).
    pub status: u32,
    /// Total size in bytes, if `Content-Length` is present.
    pub content_length: Option<u64>,
    /// `Content-Type` value if present (e.g. `image/jpeg`).
    pub content_type: Option<String>,
}

/// Servers that refuse the HEAD method itself still serve the GET.
fn head_not_supported(code: u32) -> bool {
    code == 405 || code == 501
}

/// Performs a HEAD request and returns parsed metadata.
///
/// Follows redirects. Fails on transport errors and on non-2xx answers, except
/// 405/501 which only mean the server does not implement HEAD; in that case an
/// empty `HeadResult` is returned and the GET decides.
/// Runs in the current thread; call from `spawn_blocking` if used from async code.
pub fn probe(url: &str, http: &HttpConfig) -> Result<HeadResult> {
    let mut headers: Vec<String> = Vec::new();

    let mut easy = curl::easy::Easy::new();
    easy.url(url).context("invalid URL")?;
    easy.nobody(true)?; // HEAD request
    easy.follow_location(true)?;
    easy.max_redirections(http.max_redirections)?;
    easy.connect_timeout(http.connect_timeout())?;
    easy.timeout(http.probe_timeout())?;
    if let Some(ua) = &http.user_agent {
        easy.useragent(ua)?;
    }

    {
        let mut transfer = easy.transfer();
        transfer.header_function(|data| {
            if let Ok(s) = str::from_utf8(data) {
                headers.push(s.trim_end().to_string());
            }
            true
        })?;
        transfer.perform().context("HEAD request failed")?;
    }

    let code = easy.response_code().context("no response code")?;
    if head_not_supported(code) {
        tracing::debug!(url, code, "HEAD not supported, continuing with GET");
        return Ok(HeadResult {
            status: code,
            ..HeadResult::default()
        });
    }
    if !(200..300).contains(&code) {
        anyhow::bail!("HEAD {} returned HTTP {}", url, code);
    }

    let mut result = parse::parse_headers(&headers);
    result.status = code;
    Ok(result)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn head_not_supported_codes() {
        assert!(head_not_supported(405));
        assert!(head_not_supported(501));
        assert!(!head_not_supported(404));
        assert!(!head_not_supported(200));
    }

    #[test]
    fn probe_rejects_unreachable_host() {
        // Port 1 on loopback is closed on any sane test host.
        let http = HttpConfig {
            connect_timeout_secs: 2,
            probe_timeout_secs: 2,
            ..HttpConfig::default()
        };
        assert!(probe("http://127.0.0.1:1/wallpaper.jpg", &http).is_err());
    }
}
