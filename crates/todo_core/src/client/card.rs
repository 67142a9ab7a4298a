//! Per-task display state.

use crate::model::file::FileRef;
use crate::model::task::{Task, TaskId};
use chrono::NaiveDate;
use serde::Serialize;

/// Display projection of one task on a given day.
#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct CardView {
    pub id: TaskId,
    pub title: String,
    pub text: String,
    /// `YYYY-MM-DD`.
    pub due_label: String,
    pub is_done: bool,
    /// Open and past its due day; rendered with the "outdated" style.
    pub is_overdue: bool,
    pub files: Vec<FileRef>,
}

impl CardView {
    pub fn from_task(task: &Task, today: NaiveDate) -> Self {
        Self {
            id: task.id,
            title: task.title.clone(),
            text: task.text.clone(),
            due_label: task.due_label(),
            is_done: task.is_done,
            is_overdue: task.is_overdue(today),
            files: task.files.clone(),
        }
    }

    pub fn has_files(&self) -> bool {
        !self.files.is_empty()
    }
}
