//! Object storage for task attachments.
//!
//! # Responsibility
//! - Hold attachment bytes outside the task store.
//! - Hand out retrieval addresses for stored objects.
//!
//! # Invariants
//! - Attachment objects live under the `files/` key prefix.
//! - Upload and delete derive the key from the same `(uid, name)` pair.

pub mod fs_store;
pub mod object_key;

pub use fs_store::FsObjectStore;
pub use object_key::object_key;

use std::error::Error;
use std::fmt::{Display, Formatter};

pub type StorageResult<T> = Result<T, StorageError>;

#[derive(Debug)]
pub enum StorageError {
    Io { key: String, source: std::io::Error },
    InvalidKey(String),
    NotFound(String),
}

impl Display for StorageError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Io { key, source } => write!(f, "storage i/o failed for `{key}`: {source}"),
            Self::InvalidKey(key) => write!(f, "invalid object key `{key}`"),
            Self::NotFound(key) => write!(f, "object not found: `{key}`"),
        }
    }
}

impl Error for StorageError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Io { source, .. } => Some(source),
            Self::InvalidKey(_) | Self::NotFound(_) => None,
        }
    }
}

/// Blob storage used for attachments.
///
/// Implementations must be shareable across upload threads.
pub trait ObjectStore: Send + Sync {
    /// Stores `bytes` under `key` and returns the retrieval address.
    fn put(&self, key: &str, bytes: &[u8]) -> StorageResult<String>;
    /// Removes the object stored under `key`.
    fn delete(&self, key: &str) -> StorageResult<()>;
    /// Returns whether the backing service can currently be reached.
    fn is_reachable(&self) -> bool;
}
