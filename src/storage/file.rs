//! Directory-backed storage backend.
//!
//! Each record lives in `<dir>/<id>.json`. Writes go to a temporary file in
//! the same directory and are renamed into place, so readers never observe a
//! partially written record.

use std::fs;
use std::io::ErrorKind;
use std::path::{Path, PathBuf};
use std::sync::atomic::{AtomicU64, Ordering};

use tracing::debug;

use crate::error::{CacheError, Result};
use crate::storage::StorageBackend;

const RECORD_EXTENSION: &str = "json";

/// Persists records as files under one directory.
#[derive(Debug)]
pub struct FileStorage {
    dir: PathBuf,
    tmp_counter: AtomicU64,
}

impl FileStorage {
    /// Opens (creating if needed) a store rooted at `dir`.
    pub fn open(dir: impl Into<PathBuf>) -> Result<Self> {
        let dir = dir.into();
        fs::create_dir_all(&dir)?;
        debug!(dir = %dir.display(), "Opened file storage");

        Ok(Self {
            dir,
            tmp_counter: AtomicU64::new(0),
        })
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    fn record_path(&self, id: &str) -> Result<PathBuf> {
        validate_id(id)?;
        Ok(self.dir.join(format!("{}.{}", id, RECORD_EXTENSION)))
    }

    fn tmp_path(&self, id: &str) -> PathBuf {
        let seq = self.tmp_counter.fetch_add(1, Ordering::Relaxed);
        self.dir
            .join(format!(".{}.{}.{}.tmp", id, std::process::id(), seq))
    }
}

/// Rejects ids that would escape the storage directory.
fn validate_id(id: &str) -> Result<()> {
    if id.is_empty() || id.starts_with('.') || id.contains(['/', '\\', '\0']) {
        return Err(CacheError::Storage(format!("invalid storage id: {:?}", id)));
    }
    Ok(())
}

impl StorageBackend for FileStorage {
    fn read(&self, id: &str) -> Result<Option<String>> {
        let path = self.record_path(id)?;
        match fs::read_to_string(&path) {
            Ok(raw) => Ok(Some(raw)),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(None),
            Err(err) => Err(err.into()),
        }
    }

    fn write(&self, id: &str, serialized: &str) -> Result<()> {
        let path = self.record_path(id)?;
        let tmp = self.tmp_path(id);

        let written = fs::write(&tmp, serialized).and_then(|()| fs::rename(&tmp, &path));
        if let Err(err) = written {
            let _ = fs::remove_file(&tmp);
            return Err(err.into());
        }
        Ok(())
    }

    fn delete(&self, id: &str) -> Result<()> {
        let path = self.record_path(id)?;
        match fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => Ok(()),
            Err(err) => Err(err.into()),
        }
    }

    fn keys(&self) -> Result<Vec<String>> {
        let mut keys = Vec::new();
        for dir_entry in fs::read_dir(&self.dir)? {
            let path = dir_entry?.path();
            if path.extension().and_then(|ext| ext.to_str()) != Some(RECORD_EXTENSION) {
                continue;
            }
            if let Some(stem) = path.file_stem().and_then(|stem| stem.to_str()) {
                if !stem.starts_with('.') {
                    keys.push(stem.to_string());
                }
            }
        }
        keys.sort();
        Ok(keys)
    }
}
