//! Core logic of the to-do client.
//!
//! Tasks live in a SQLite-backed store, attachment bytes in an object store,
//! and clients follow the collection through snapshots published after every
//! write.

pub mod client;
pub mod config;
pub mod db;
pub mod feed;
pub mod logging;
pub mod model;
pub mod repo;
pub mod service;
pub mod storage;

pub use client::board::TodoBoard;
pub use client::card::CardView;
pub use client::form::{is_date_disabled, FormError, FormField, SubmitOutcome, TaskForm};
pub use client::notify::Notification;
pub use client::{Connectivity, StaticConnectivity};
pub use config::{load_config, AppConfig, ConfigError};
pub use feed::{Snapshot, SnapshotReceiver, TaskCounts, TaskFeed};
pub use logging::{default_log_level, init_logging, logging_status, LoggingError};
pub use model::file::{Attachment, FileRef};
pub use model::task::{NewTask, Task, TaskId, TaskPatch, TaskValidationError};
pub use repo::task_repo::{RepoError, RepoResult, SqliteTaskRepository, TaskRepository};
pub use service::todo_service::{ServiceError, ServiceResult, TodoService};
pub use storage::{object_key, FsObjectStore, ObjectStore, StorageError, StorageResult};

/// Returns the core crate version.
pub fn core_version() -> &'static str {
    env!("CARGO_PKG_VERSION")
}

#[cfg(test)]
mod tests {
    use super::core_version;

    #[test]
    fn version_is_not_empty() {
        assert!(!core_version().is_empty());
    }
}
