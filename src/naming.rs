//! Dated destination filenames: `<dir>/<YYYY-MM-DD>.<extension>`.
//!
//! Only the calendar date is used, so a second download on the same day with
//! the same extension lands on the same path and replaces the first.

use chrono::{NaiveDate, Utc};
use std::path::{Path, PathBuf};

/// Today's calendar date in UTC.
pub fn today() -> NaiveDate {
    Utc::now().date_naive()
}

/// Normalize a configured extension: surrounding whitespace and leading dots
/// are dropped, and anything left must be non-empty ASCII alphanumerics so it
/// cannot name another directory.
pub fn safe_extension(raw: &str) -> Option<&str> {
    let ext = raw.trim().trim_start_matches('.');
    if !ext.is_empty() && ext.bytes().all(|b| b.is_ascii_alphanumeric()) {
        Some(ext)
    } else {
        None
    }
}

/// `2024-05-21.jpeg`
pub fn dated_file_name(date: NaiveDate, extension: &str) -> String {
    format!("{}.{}", date.format("%Y-%m-%d"), extension)
}

pub fn destination_path(directory: &Path, date: NaiveDate, extension: &str) -> PathBuf {
    directory.join(dated_file_name(date, extension))
}
