//! To-do use-case service.
//!
//! # Responsibility
//! - Provide create/read/update/delete entry points over the task store.
//! - Move attachment bytes to and from object storage.
//! - Publish a fresh snapshot to subscribers after every successful write.
//!
//! # Invariants
//! - Calls are pass-through: no retry, batching or conflict resolution.
//! - Task deletion and file deletion are not transactional; the task row is
//!   removed first and its files afterwards.
//! - Stored attachments are never uploaded twice.

use crate::feed::{Snapshot, SnapshotReceiver, TaskFeed};
use crate::model::file::{Attachment, FileRef};
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::repo::task_repo::{RepoError, TaskRepository};
use crate::storage::{object_key, ObjectStore, StorageError};
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};
use std::thread;
use std::time::Instant;

pub type ServiceResult<T> = Result<T, ServiceError>;

/// Service error for to-do use-cases.
#[derive(Debug)]
pub enum ServiceError {
    /// Target task does not exist.
    TaskNotFound(TaskId),
    /// Task store failure.
    Repo(RepoError),
    /// Object storage failure.
    Storage(StorageError),
}

impl Display for ServiceError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::TaskNotFound(id) => write!(f, "task not found: {id}"),
            Self::Repo(err) => write!(f, "{err}"),
            Self::Storage(err) => write!(f, "{err}"),
        }
    }
}

impl Error for ServiceError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::TaskNotFound(_) => None,
            Self::Repo(err) => Some(err),
            Self::Storage(err) => Some(err),
        }
    }
}

impl From<RepoError> for ServiceError {
    fn from(value: RepoError) -> Self {
        match value {
            RepoError::NotFound(id) => Self::TaskNotFound(id),
            other => Self::Repo(other),
        }
    }
}

impl From<StorageError> for ServiceError {
    fn from(value: StorageError) -> Self {
        Self::Storage(value)
    }
}

/// To-do service facade over a task repository and an object store.
pub struct TodoService<R: TaskRepository, S: ObjectStore> {
    repo: R,
    store: S,
    feed: TaskFeed,
}

impl<R: TaskRepository, S: ObjectStore> TodoService<R, S> {
    pub fn new(repo: R, store: S) -> Self {
        Self {
            repo,
            store,
            feed: TaskFeed::new(),
        }
    }

    pub fn store(&self) -> &S {
        &self.store
    }

    /// Creates an open task and returns its id.
    pub fn add_todo(&self, task: NewTask) -> ServiceResult<TaskId> {
        let id = self.repo.add_task(&task)?;
        info!(
            "event=task_add module=service status=ok task_id={id} files={}",
            task.files.len()
        );
        self.publish_current();
        Ok(id)
    }

    /// Merges `patch` into the task `id`.
    pub fn update_todo(&self, id: TaskId, patch: TaskPatch) -> ServiceResult<()> {
        self.repo.update_task(id, &patch)?;
        info!("event=task_update module=service status=ok task_id={id}");
        self.publish_current();
        Ok(())
    }

    /// Flips the completion flag and returns the new value.
    pub fn toggle_done(&self, id: TaskId) -> ServiceResult<bool> {
        let task = self.get_todo(id)?.ok_or(ServiceError::TaskNotFound(id))?;
        let patch = TaskPatch::toggle_done(&task);
        let is_done = !task.is_done;
        self.update_todo(id, patch)?;
        Ok(is_done)
    }

    /// Deletes the task, then every file attached to it.
    ///
    /// The task stays deleted when file cleanup fails; the first storage
    /// error is returned after all deletions were attempted. Objects that are
    /// already gone count as deleted.
    pub fn delete_todo(&self, id: TaskId) -> ServiceResult<Task> {
        let task = self.repo.delete_task(id)?;
        info!(
            "event=task_delete module=service status=ok task_id={id} files={}",
            task.files.len()
        );
        self.publish_current();

        self.delete_files(&task.files)?;
        Ok(task)
    }

    pub fn get_todo(&self, id: TaskId) -> ServiceResult<Option<Task>> {
        Ok(self.repo.get_task(id)?)
    }

    /// Lists tasks ordered by due date.
    pub fn list_todos(&self) -> ServiceResult<Vec<Task>> {
        Ok(self.repo.list_tasks()?)
    }

    /// Returns the current state of the collection.
    pub fn snapshot(&self) -> ServiceResult<Snapshot> {
        Ok(Snapshot::new(self.list_todos()?))
    }

    /// Subscribes to the live task list.
    ///
    /// The current snapshot is delivered first, followed by one snapshot per
    /// successful write.
    pub fn subscribe(&self) -> ServiceResult<SnapshotReceiver> {
        let initial = self.snapshot()?;
        Ok(self.feed.subscribe_with(initial))
    }

    /// Uploads pending attachments and returns refs for every attachment.
    ///
    /// Uploads run in parallel and the call waits for all of them. Output
    /// order matches input order; stored attachments pass through unchanged.
    pub fn upload_files(&self, attachments: &[Attachment]) -> ServiceResult<Vec<FileRef>> {
        let started_at = Instant::now();
        let store = &self.store;

        let results = thread::scope(|scope| {
            let handles = attachments
                .iter()
                .map(|attachment| scope.spawn(move || upload_one(store, attachment)))
                .collect::<Vec<_>>();
            handles
                .into_iter()
                .map(|handle| {
                    handle
                        .join()
                        .unwrap_or_else(|_| Err(upload_panicked()))
                })
                .collect::<Vec<_>>()
        });

        let files = results.into_iter().collect::<Result<Vec<_>, _>>();
        match &files {
            Ok(files) => info!(
                "event=file_upload module=service status=ok files={} duration_ms={}",
                files.len(),
                started_at.elapsed().as_millis()
            ),
            Err(err) => error!(
                "event=file_upload module=service status=error duration_ms={} error={err}",
                started_at.elapsed().as_millis()
            ),
        }
        Ok(files?)
    }

    /// Deletes stored objects for `files`, attempting every one. Missing
    /// objects are logged and skipped.
    pub fn delete_files(&self, files: &[FileRef]) -> ServiceResult<()> {
        let mut first_error = None;
        for file in files {
            let key = object_key(&file.uid, &file.name);
            match self.store.delete(&key) {
                Ok(()) => {}
                // Several tasks may reference the same object.
                Err(StorageError::NotFound(_)) => {
                    warn!("event=file_delete module=service status=missing key={key}");
                }
                Err(err) => {
                    warn!("event=file_delete module=service status=error key={key} error={err}");
                    first_error.get_or_insert(err);
                }
            }
        }
        match first_error {
            Some(err) => Err(err.into()),
            None => Ok(()),
        }
    }

    fn publish_current(&self) {
        match self.snapshot() {
            Ok(snapshot) => self.feed.publish(&snapshot),
            Err(err) => {
                error!("event=feed_publish module=service status=error error={err}");
            }
        }
    }
}

fn upload_one<S: ObjectStore>(store: &S, attachment: &Attachment) -> Result<FileRef, StorageError> {
    match attachment {
        Attachment::Stored(file) => Ok(file.clone()),
        Attachment::Pending { uid, name, bytes } => {
            let key = object_key(uid, name);
            let url = store.put(&key, bytes)?;
            Ok(FileRef {
                uid: uid.clone(),
                name: name.clone(),
                url,
            })
        }
    }
}

fn upload_panicked() -> StorageError {
    StorageError::Io {
        key: "<upload>".to_string(),
        source: std::io::Error::other("upload worker panicked"),
    }
}
