//! Disk I/O for downloaded wallpapers.
//!
//! Each transfer writes to its own temp file in the destination directory and
//! renames it into place once the body is complete, so a failed or concurrent
//! download never leaves a truncated or interleaved wallpaper behind.

mod writer;

pub use writer::{StorageWriter, TempDownload};

/// Temporary file suffix used before atomic rename.
pub const TEMP_SUFFIX: &str = ".part";
