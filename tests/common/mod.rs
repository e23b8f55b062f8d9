#![allow(dead_code)]

pub mod image_server;

use async_trait::async_trait;
use daily_wallpaper::WallpaperSetter;
use std::path::{Path, PathBuf};
use std::sync::Mutex;

/// Setter that records paths instead of touching the real desktop.
#[derive(Default)]
pub struct RecordingSetter {
    pub applied: Mutex<Vec<PathBuf>>,
}

#[async_trait]
impl WallpaperSetter for RecordingSetter {
    async fn set_wallpaper(&self, path: &Path) -> anyhow::Result<()> {
        self.applied.lock().unwrap().push(path.to_path_buf());
        Ok(())
    }
}

/// Deterministic image-ish payload.
pub fn image_bytes(len: usize, seed: u8) -> Vec<u8> {
    (0..len).map(|i| (i as u8).wrapping_mul(31).wrapping_add(seed)).collect()
}
