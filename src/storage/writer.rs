//! Offset writer for temp download files.

use anyhow::{Context, Result};
use std::fs::File;
use std::path::Path;
use std::sync::Arc;
#[cfg(unix)]
use std::os::unix::fs::FileExt;
use tempfile::TempPath;

use super::TEMP_SUFFIX;

/// Handle to the open temp file. Cheap to clone so the curl write callback
/// can own one; each `write_at` is independent (pwrite-style).
#[derive(Clone)]
pub struct StorageWriter {
    file: Arc<File>,
}

impl StorageWriter {
    /// Write `data` at `offset`. Does not change the file's logical cursor.
    #[cfg(unix)]
    pub fn write_at(&self, offset: u64, data: &[u8]) -> Result<()> {
        self.file
            .write_all_at(data, offset)
            .context("storage write_at failed")?;
        Ok(())
    }

    #[cfg(not(unix))]
    pub fn write_at(&self, offset: u64, data: &[u8]) -> Result<()> {
        use std::io::{Seek, SeekFrom, Write};
        let mut f = (*self.file).try_clone()?;
        f.seek(SeekFrom::Start(offset))?;
        f.write_all(data).context("storage write_at failed")?;
        Ok(())
    }
}

/// A uniquely named temp file next to the destination, owned by one transfer.
///
/// Dropping it (or calling `discard`) removes the file; `persist` renames it
/// over the destination.
pub struct TempDownload {
    file: Arc<File>,
    path: TempPath,
}

impl TempDownload {
    /// Create `.<final name>.XXXXXX.part` in the destination's directory so the
    /// final rename never crosses filesystems.
    pub fn create_for(final_path: &Path) -> Result<Self> {
        let dir = match final_path.parent() {
            Some(p) if !p.as_os_str().is_empty() => p,
            _ => Path::new("."),
        };
        let name = final_path
            .file_name()
            .map(|n| n.to_string_lossy().into_owned())
            .unwrap_or_default();
        let tmp = tempfile::Builder::new()
            .prefix(&format!(".{}.", name))
            .suffix(TEMP_SUFFIX)
            .tempfile_in(dir)
            .with_context(|| format!("failed to create temp file in {}", dir.display()))?;
        let (file, path) = tmp.into_parts();
        Ok(TempDownload {
            file: Arc::new(file),
            path,
        })
    }

    pub fn writer(&self) -> StorageWriter {
        StorageWriter {
            file: Arc::clone(&self.file),
        }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Sync file data to disk. Call before `persist` for durability.
    pub fn sync(&self) -> Result<()> {
        self.file.sync_all().context("storage sync failed")?;
        Ok(())
    }

    /// Atomically rename the temp file over `final_path`, replacing any file
    /// already there. On failure the temp file is removed.
    pub fn persist(self, final_path: &Path) -> Result<()> {
        let TempDownload { file, path } = self;
        drop(file);
        let temp_display = path.display().to_string();
        path.persist(final_path).map_err(|e| {
            anyhow::Error::new(e.error).context(format!(
                "failed to rename {} to {}",
                temp_display,
                final_path.display()
            ))
        })?;
        Ok(())
    }

    /// Drop the temp file after a failed transfer.
    pub fn discard(self) {
        let TempDownload { file, path } = self;
        drop(file);
        if let Err(e) = path.close() {
            tracing::debug!("could not remove temp file: {}", e);
        }
    }
}
