// ABOUTME: File-backed store for the shared integration configuration document
// ABOUTME: Loads, merges one entry at a time, and persists atomically under a writer lock

use fs2::FileExt;
use std::fs::{self, File, OpenOptions};
use std::io::{ErrorKind, Write};
use std::path::{Path, PathBuf};
use tempfile::NamedTempFile;
use tracing::{debug, info, warn};

use crate::{
    document::{ConfigDocument, IntegrationConfig},
    error::{StorageError, StorageResult},
};

/// Owner of the on-disk configuration document
#[derive(Debug, Clone)]
pub struct ConfigStore {
    path: PathBuf,
}

impl ConfigStore {
    pub fn new(path: impl Into<PathBuf>) -> Self {
        Self { path: path.into() }
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// Read the current document. A missing file is an empty document.
    pub fn load(&self) -> StorageResult<ConfigDocument> {
        match fs::read(&self.path) {
            Ok(bytes) => {
                debug!("Loaded config document from {}", self.path.display());
                ConfigDocument::from_slice(&bytes)
            }
            Err(e) if e.kind() == ErrorKind::NotFound => {
                debug!(
                    "No config document at {}, starting empty",
                    self.path.display()
                );
                Ok(ConfigDocument::new())
            }
            Err(e) => Err(e.into()),
        }
    }

    /// Apply `patch` to the entry for `T`, leaving every other entry untouched.
    /// Nothing is written until [`ConfigStore::persist`] is called.
    pub fn merge<T, F>(&self, document: ConfigDocument, patch: F) -> StorageResult<ConfigDocument>
    where
        T: IntegrationConfig,
        F: FnOnce(&mut T),
    {
        debug!("Merging '{}' entry into config document", T::ID);
        document.merged::<T, F>(patch)
    }

    /// Write the whole document atomically.
    ///
    /// Returns `false` when the file already holds identical content.
    pub fn persist(&self, document: &ConfigDocument) -> StorageResult<bool> {
        let bytes = document.to_vec_pretty()?;
        let parent = self.parent_dir();
        fs::create_dir_all(&parent)?;

        let _lock = WriterLock::acquire(&self.lock_path())?;

        if let Ok(existing) = fs::read(&self.path) {
            if existing == bytes {
                debug!("Config document unchanged, skipping write");
                return Ok(false);
            }
        }

        // Temp file lives in the target directory so the rename stays on one filesystem
        let mut temp = NamedTempFile::new_in(&parent)?;
        temp.write_all(&bytes)?;
        temp.flush()?;
        temp.as_file().sync_all()?;

        temp.persist(&self.path).map_err(|e| StorageError::Io(e.error))?;
        sync_dir(&parent);

        info!("Saved config document to {}", self.path.display());
        Ok(true)
    }

    /// Load, merge the entry for `T`, and persist in one step
    pub fn update<T, F>(&self, patch: F) -> StorageResult<ConfigDocument>
    where
        T: IntegrationConfig,
        F: FnOnce(&mut T),
    {
        let document = self.merge::<T, F>(self.load()?, patch)?;
        self.persist(&document)?;
        Ok(document)
    }

    fn parent_dir(&self) -> PathBuf {
        match self.path.parent() {
            Some(parent) if !parent.as_os_str().is_empty() => parent.to_path_buf(),
            _ => PathBuf::from("."),
        }
    }

    fn lock_path(&self) -> PathBuf {
        let file_name = self
            .path
            .file_name()
            .map(|name| name.to_string_lossy().into_owned())
            .unwrap_or_else(|| "config".to_string());
        self.path.with_file_name(format!("{}.lock", file_name))
    }
}

/// Exclusive advisory lock on the sidecar lock file, released on drop
struct WriterLock {
    file: File,
    path: PathBuf,
}

impl WriterLock {
    fn acquire(path: &Path) -> StorageResult<Self> {
        let file = OpenOptions::new()
            .create(true)
            .truncate(false)
            .read(true)
            .write(true)
            .open(path)?;

        FileExt::try_lock_exclusive(&file).map_err(|e| {
            warn!("Could not lock {}: {}", path.display(), e);
            StorageError::Lock(path.to_path_buf())
        })?;

        Ok(Self {
            file,
            path: path.to_path_buf(),
        })
    }
}

impl Drop for WriterLock {
    fn drop(&mut self) {
        if let Err(e) = FileExt::unlock(&self.file) {
            warn!("Failed to release lock {}: {}", self.path.display(), e);
        }
    }
}

#[cfg(unix)]
fn sync_dir(dir: &Path) {
    // Makes the rename itself durable
    if let Err(e) = File::open(dir).and_then(|d| d.sync_all()) {
        debug!("Could not fsync {}: {}", dir.display(), e);
    }
}

#[cfg(not(unix))]
fn sync_dir(_dir: &Path) {}
