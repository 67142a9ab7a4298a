//! Create/edit form state.
//!
//! # Responsibility
//! - Hold field values and staged attachments between user edits.
//! - Enforce required fields and the "no past due date" picker rule.
//! - Submit through `TodoService`, uploading attachments first.
//!
//! # Invariants
//! - Nothing is sent while required fields are blank or the backend is
//!   unreachable.
//! - A successful submit clears every field, attachment and edit target.

use super::notify::Notification;
use super::Connectivity;
use crate::model::file::Attachment;
use crate::model::task::{NewTask, Task, TaskId, TaskPatch};
use crate::repo::task_repo::TaskRepository;
use crate::service::todo_service::TodoService;
use crate::storage::ObjectStore;
use chrono::NaiveDate;
use log::{error, info, warn};
use std::error::Error;
use std::fmt::{Display, Formatter};

/// Form fields that carry a required rule.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FormField {
    Title,
    Text,
    DueDate,
}

impl FormField {
    pub fn label(self) -> &'static str {
        match self {
            Self::Title => "title",
            Self::Text => "description",
            Self::DueDate => "completion date",
        }
    }
}

/// Rejected form interaction.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum FormError {
    /// Required fields that are blank, in field order.
    Required(Vec<FormField>),
    /// The picked due date lies before today.
    DateDisabled(NaiveDate),
    /// No staged attachment at this index.
    NoSuchAttachment(usize),
}

impl Display for FormError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Required(fields) => {
                let labels = fields
                    .iter()
                    .map(|field| field.label())
                    .collect::<Vec<_>>()
                    .join(", ");
                write!(f, "required field is missing: {labels}")
            }
            Self::DateDisabled(date) => write!(f, "due date {date} is in the past"),
            Self::NoSuchAttachment(index) => write!(f, "no attached file at position {index}"),
        }
    }
}

impl Error for FormError {}

/// Terminal result of one submit attempt.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum SubmitOutcome {
    /// Created or updated task id; the form has been reset.
    Saved(TaskId),
    /// Validation failed; nothing was sent.
    Invalid(FormError),
    /// Backend unreachable or a call failed; fields are kept for retry.
    Failed(Notification),
}

/// Returns whether the date picker greys out `date`.
pub fn is_date_disabled(date: NaiveDate, today: NaiveDate) -> bool {
    date < today
}

/// State of the create/edit form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct TaskForm {
    title: String,
    text: String,
    due_date: Option<NaiveDate>,
    attachments: Vec<Attachment>,
    editing: Option<TaskId>,
}

impl TaskForm {
    /// Empty form in "add" mode.
    pub fn new() -> Self {
        Self::default()
    }

    /// Form pre-filled from an existing task, in "edit" mode.
    pub fn for_edit(task: &Task) -> Self {
        let mut form = Self::new();
        form.load_for_edit(task);
        form
    }

    /// Copies `task` into the form. Its due date is kept even when already
    /// past; only newly picked dates go through the picker rule.
    pub fn load_for_edit(&mut self, task: &Task) {
        self.title = task.title.clone();
        self.text = task.text.clone();
        self.due_date = Some(task.due_date);
        self.attachments = task.files.iter().cloned().map(Attachment::from).collect();
        self.editing = Some(task.id);
    }

    pub fn set_title(&mut self, title: impl Into<String>) {
        self.title = title.into();
    }

    pub fn set_text(&mut self, text: impl Into<String>) {
        self.text = text.into();
    }

    /// Picks a due date through the date picker.
    pub fn choose_due_date(&mut self, date: NaiveDate, today: NaiveDate) -> Result<(), FormError> {
        if is_date_disabled(date, today) {
            return Err(FormError::DateDisabled(date));
        }
        self.due_date = Some(date);
        Ok(())
    }

    pub fn stage_file(&mut self, attachment: Attachment) {
        self.attachments.push(attachment);
    }

    pub fn remove_file(&mut self, index: usize) -> Result<Attachment, FormError> {
        if index >= self.attachments.len() {
            return Err(FormError::NoSuchAttachment(index));
        }
        Ok(self.attachments.remove(index))
    }

    pub fn title(&self) -> &str {
        &self.title
    }

    pub fn text(&self) -> &str {
        &self.text
    }

    pub fn due_date(&self) -> Option<NaiveDate> {
        self.due_date
    }

    pub fn attachments(&self) -> &[Attachment] {
        &self.attachments
    }

    pub fn editing(&self) -> Option<TaskId> {
        self.editing
    }

    pub fn is_edit_mode(&self) -> bool {
        self.editing.is_some()
    }

    /// Checks required fields and returns the due date on success.
    pub fn validate(&self) -> Result<NaiveDate, FormError> {
        let mut missing = Vec::new();
        if self.title.trim().is_empty() {
            missing.push(FormField::Title);
        }
        if self.text.trim().is_empty() {
            missing.push(FormField::Text);
        }
        match self.due_date {
            Some(date) if missing.is_empty() => Ok(date),
            Some(_) => Err(FormError::Required(missing)),
            None => {
                missing.push(FormField::DueDate);
                Err(FormError::Required(missing))
            }
        }
    }

    /// Uploads staged files, then creates or updates the task.
    pub fn submit<R, S>(
        &mut self,
        service: &TodoService<R, S>,
        connectivity: &impl Connectivity,
    ) -> SubmitOutcome
    where
        R: TaskRepository,
        S: ObjectStore,
    {
        let due_date = match self.validate() {
            Ok(date) => date,
            Err(err) => return SubmitOutcome::Invalid(err),
        };

        if !connectivity.is_online() {
            warn!("event=form_submit module=client status=offline");
            return SubmitOutcome::Failed(Notification::offline());
        }

        let files = match service.upload_files(&self.attachments) {
            Ok(files) => files,
            Err(err) => {
                error!("event=form_submit module=client status=error stage=upload error={err}");
                return SubmitOutcome::Failed(Notification::upload_failed());
            }
        };

        let saved = match self.editing {
            Some(id) => service
                .update_todo(
                    id,
                    TaskPatch {
                        title: Some(self.title.clone()),
                        text: Some(self.text.clone()),
                        due_date: Some(due_date),
                        is_done: None,
                        files: Some(files),
                    },
                )
                .map(|()| id),
            None => service.add_todo(
                NewTask::new(self.title.clone(), self.text.clone(), due_date).with_files(files),
            ),
        };

        match saved {
            Ok(id) => {
                info!(
                    "event=form_submit module=client status=ok task_id={id} mode={}",
                    if self.is_edit_mode() { "edit" } else { "add" }
                );
                self.reset();
                SubmitOutcome::Saved(id)
            }
            Err(err) => {
                error!("event=form_submit module=client status=error stage=save error={err}");
                SubmitOutcome::Failed(Notification::save_failed())
            }
        }
    }

    /// Clears fields, attachments and the edit target.
    pub fn reset(&mut self) {
        *self = Self::new();
    }
}
