//! Task domain model.
//!
//! # Responsibility
//! - Define the canonical to-do record and its create/update payloads.
//! - Provide the derived "overdue" predicate used by list and card views.
//!
//! # Invariants
//! - `title` and `text` are never blank once persisted.
//! - `is_done` is `false` for every newly created task.
//! - Attached files keep the order in which they were attached.

use crate::model::file::FileRef;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

/// Stable identifier for a task, assigned by the store on create.
pub type TaskId = Uuid;

/// Wire/storage format of due dates.
pub const DUE_DATE_FORMAT: &str = "%Y-%m-%d";

/// Validation failure for task payloads.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum TaskValidationError {
    BlankTitle,
    BlankText,
    InvalidFile { index: usize, reason: &'static str },
}

impl Display for TaskValidationError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::BlankTitle => write!(f, "task title must not be blank"),
            Self::BlankText => write!(f, "task description must not be blank"),
            Self::InvalidFile { index, reason } => {
                write!(f, "attached file #{index} is invalid: {reason}")
            }
        }
    }
}

impl Error for TaskValidationError {}

/// To-do item as held by the store and cached by clients.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct Task {
    pub id: TaskId,
    pub title: String,
    /// Free-text description.
    pub text: String,
    /// Completion date; day granularity.
    pub due_date: NaiveDate,
    pub is_done: bool,
    pub files: Vec<FileRef>,
}

impl Task {
    /// Returns whether the task is still open after its due day has passed.
    ///
    /// A task due `today` is not overdue yet.
    pub fn is_overdue(&self, today: NaiveDate) -> bool {
        !self.is_done && today > self.due_date
    }

    /// Formats the due date the way it is stored and displayed.
    pub fn due_label(&self) -> String {
        self.due_date.format(DUE_DATE_FORMAT).to_string()
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.title, &self.text, &self.files)
    }
}

/// Payload for creating a task. Completion always starts as `false`.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct NewTask {
    pub title: String,
    pub text: String,
    pub due_date: NaiveDate,
    pub files: Vec<FileRef>,
}

impl NewTask {
    pub fn new(title: impl Into<String>, text: impl Into<String>, due_date: NaiveDate) -> Self {
        Self {
            title: title.into(),
            text: text.into(),
            due_date,
            files: Vec::new(),
        }
    }

    pub fn with_files(mut self, files: Vec<FileRef>) -> Self {
        self.files = files;
        self
    }

    pub fn validate(&self) -> Result<(), TaskValidationError> {
        validate_fields(&self.title, &self.text, &self.files)
    }

    /// Materializes the record under the given id.
    pub fn into_task(self, id: TaskId) -> Task {
        Task {
            id,
            title: self.title,
            text: self.text,
            due_date: self.due_date,
            is_done: false,
            files: self.files,
        }
    }
}

/// Partial update. `None` fields keep their stored value.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskPatch {
    pub title: Option<String>,
    pub text: Option<String>,
    pub due_date: Option<NaiveDate>,
    pub is_done: Option<bool>,
    /// Replaces the whole attachment list when set.
    pub files: Option<Vec<FileRef>>,
}

impl TaskPatch {
    /// Builds the patch that flips the completion flag of `task`.
    pub fn toggle_done(task: &Task) -> Self {
        Self {
            is_done: Some(!task.is_done),
            ..Self::default()
        }
    }

    pub fn is_empty(&self) -> bool {
        self.title.is_none()
            && self.text.is_none()
            && self.due_date.is_none()
            && self.is_done.is_none()
            && self.files.is_none()
    }

    /// Applies this patch on top of `task`.
    pub fn apply_to(&self, task: &mut Task) {
        if let Some(title) = &self.title {
            task.title = title.clone();
        }
        if let Some(text) = &self.text {
            task.text = text.clone();
        }
        if let Some(due_date) = self.due_date {
            task.due_date = due_date;
        }
        if let Some(is_done) = self.is_done {
            task.is_done = is_done;
        }
        if let Some(files) = &self.files {
            task.files = files.clone();
        }
    }
}

fn validate_fields(title: &str, text: &str, files: &[FileRef]) -> Result<(), TaskValidationError> {
    if title.trim().is_empty() {
        return Err(TaskValidationError::BlankTitle);
    }
    if text.trim().is_empty() {
        return Err(TaskValidationError::BlankText);
    }
    for (index, file) in files.iter().enumerate() {
        if file.name.trim().is_empty() {
            return Err(TaskValidationError::InvalidFile {
                index,
                reason: "empty name",
            });
        }
        if file.url.trim().is_empty() {
            return Err(TaskValidationError::InvalidFile {
                index,
                reason: "empty url",
            });
        }
    }
    Ok(())
}
