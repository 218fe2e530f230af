//! On-disk store for uploaded photos.
//!
//! Files live flat in one directory, named by
//! [`storage_filename`](cityguide_core::photo::storage_filename). Writes go to
//! a temporary `.part` file first and are renamed into place, so a reader
//! never sees a half-written photo.

use std::io;
use std::path::{Path, PathBuf};

use cityguide_core::photo::is_safe_filename;

#[derive(Debug, Clone)]
pub struct PhotoStore {
    root: PathBuf,
}

impl PhotoStore {
    pub fn new(root: impl Into<PathBuf>) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// Create the upload directory if it does not exist.
    pub async fn ensure_dir(&self) -> io::Result<()> {
        tokio::fs::create_dir_all(&self.root).await
    }

    /// Resolve a stored filename to its path. `None` for names that could
    /// escape the upload directory.
    pub fn path_for(&self, filename: &str) -> Option<PathBuf> {
        is_safe_filename(filename).then(|| self.root.join(filename))
    }

    fn resolve(&self, filename: &str) -> io::Result<PathBuf> {
        self.path_for(filename).ok_or_else(|| {
            io::Error::new(io::ErrorKind::InvalidInput, format!("unsafe filename '{filename}'"))
        })
    }

    pub async fn save(&self, filename: &str, bytes: &[u8]) -> io::Result<()> {
        let dest = self.resolve(filename)?;
        self.ensure_dir().await?;
        let partial = self.root.join(format!("{filename}.part"));
        if let Err(e) = tokio::fs::write(&partial, bytes).await {
            let _ = tokio::fs::remove_file(&partial).await;
            return Err(e);
        }
        tokio::fs::rename(&partial, &dest).await
    }

    /// Read a stored photo. `Ok(None)` when it does not exist.
    pub async fn read(&self, filename: &str) -> io::Result<Option<Vec<u8>>> {
        let Some(path) = self.path_for(filename) else {
            return Ok(None);
        };
        match tokio::fs::read(path).await {
            Ok(bytes) => Ok(Some(bytes)),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(None),
            Err(e) => Err(e),
        }
    }

    /// Remove a stored photo. A missing file is not an error.
    pub async fn remove(&self, filename: &str) -> io::Result<()> {
        let path = self.resolve(filename)?;
        match tokio::fs::remove_file(path).await {
            Ok(()) => Ok(()),
            Err(e) if e.kind() == io::ErrorKind::NotFound => Ok(()),
            Err(e) => Err(e),
        }
    }

    /// Remove several photos, logging failures instead of returning them.
    ///
    /// Used after the owning rows are already gone, when a leftover file
    /// is the only possible damage.
    pub async fn remove_all_logged(&self, filenames: &[String]) {
        for filename in filenames {
            if let Err(e) = self.remove(filename).await {
                tracing::warn!(filename = %filename, error = %e, "Failed to remove photo file");
            }
        }
    }
}
