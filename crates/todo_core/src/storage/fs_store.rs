//! Directory-backed object store.
//!
//! # Invariants
//! - Every object path stays inside the store root.
//! - Returned urls are absolute, percent-encoded `file://` urls.

use super::{ObjectStore, StorageError, StorageResult};
use log::debug;
use std::io::ErrorKind;
use std::path::{Component, Path, PathBuf};
use url::Url;

/// Object store keeping each object as one file below `root`.
#[derive(Debug, Clone)]
pub struct FsObjectStore {
    root: PathBuf,
}

impl FsObjectStore {
    /// Opens a store rooted at `root`, creating the directory when missing.
    pub fn open(root: impl AsRef<Path>) -> StorageResult<Self> {
        let root = root.as_ref();
        let io_err = |source| StorageError::Io {
            key: root.display().to_string(),
            source,
        };
        std::fs::create_dir_all(root).map_err(io_err)?;
        let root = root.canonicalize().map_err(io_err)?;
        Ok(Self { root })
    }

    /// Resolves `key` to its on-disk location.
    pub fn path_for(&self, key: &str) -> StorageResult<PathBuf> {
        let relative = Path::new(key);
        let is_plain = !key.is_empty()
            && relative
                .components()
                .all(|component| matches!(component, Component::Normal(_)));
        if !is_plain {
            return Err(StorageError::InvalidKey(key.to_string()));
        }
        Ok(self.root.join(relative))
    }
}

impl ObjectStore for FsObjectStore {
    fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<String> {
        let path = self.path_for(key)?;
        let io_err = |source| StorageError::Io {
            key: key.to_string(),
            source,
        };
        if let Some(parent) = path.parent() {
            std::fs::create_dir_all(parent).map_err(io_err)?;
        }
        std::fs::write(&path, bytes).map_err(io_err)?;

        debug!(
            "event=object_put module=storage status=ok key={key} bytes={}",
            bytes.len()
        );
        let url = Url::from_file_path(&path)
            .map_err(|()| StorageError::InvalidKey(key.to_string()))?;
        Ok(url.into())
    }

    fn delete(&self, key: &str) -> StorageResult<()> {
        let path = self.path_for(key)?;
        match std::fs::remove_file(&path) {
            Ok(()) => Ok(()),
            Err(err) if err.kind() == ErrorKind::NotFound => {
                debug!("event=object_delete module=storage status=missing key={key}");
                Err(StorageError::NotFound(key.to_string()))
            }
            Err(source) => Err(StorageError::Io {
                key: key.to_string(),
                source,
            }),
        }
    }

    fn is_reachable(&self) -> bool {
        self.root.is_dir()
    }
}
