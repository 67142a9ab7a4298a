//! Attachment model.
//!
//! # Responsibility
//! - Describe files already held by object storage (`FileRef`).
//! - Describe files staged by a form but not yet uploaded (`Attachment`).

use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Reference to one object held by object storage.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FileRef {
    /// Upload-time identifier, part of the object key.
    pub uid: String,
    /// Display name shown next to the task.
    pub name: String,
    /// Retrieval address returned by storage after upload.
    pub url: String,
}

/// One entry in a form's attachment list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Attachment {
    /// Already uploaded; submitting it again keeps the reference unchanged.
    Stored(FileRef),
    /// Picked locally and waiting for upload.
    Pending {
        uid: String,
        name: String,
        bytes: Vec<u8>,
    },
}

impl Attachment {
    /// Stages local file content under a freshly generated uid.
    pub fn pending(name: impl Into<String>, bytes: Vec<u8>) -> Self {
        Self::Pending {
            uid: Uuid::new_v4().to_string(),
            name: name.into(),
            bytes,
        }
    }

    pub fn uid(&self) -> &str {
        match self {
            Self::Stored(file) => file.uid.as_str(),
            Self::Pending { uid, .. } => uid.as_str(),
        }
    }

    pub fn name(&self) -> &str {
        match self {
            Self::Stored(file) => file.name.as_str(),
            Self::Pending { name, .. } => name.as_str(),
        }
    }

    pub fn is_pending(&self) -> bool {
        matches!(self, Self::Pending { .. })
    }
}

impl From<FileRef> for Attachment {
    fn from(value: FileRef) -> Self {
        Self::Stored(value)
    }
}
