//! Task repository contract and SQLite implementation.
//!
//! # Responsibility
//! - Provide the create/read/update/delete surface over the `tasks`
//!   collection and its attachment references.
//! - Keep SQL details inside the persistence boundary.
//!
//! # Invariants
//! - Write paths validate the resulting record before SQL mutations.
//! - Read paths reject invalid persisted state instead of masking it.
//! - Listing order is `due_date ASC`, then insertion order.
//! - Due dates are stored as day numbers counted from 0001-01-01, so SQL
//!   ordering matches calendar ordering for every representable year.

use crate::db::DbError;
use crate::model::file::FileRef;
use crate::model::task::{NewTask, Task, TaskId, TaskPatch, TaskValidationError};
use chrono::{Datelike, NaiveDate};
use log::debug;
use rusqlite::{params, Connection, Row};
use std::error::Error;
use std::fmt::{Display, Formatter};
use uuid::Uuid;

const TASK_SELECT_SQL: &str = "SELECT
    uuid,
    title,
    text,
    due_day,
    is_done
FROM tasks";

pub type RepoResult<T> = Result<T, RepoError>;

/// Repository error for task persistence and query operations.
#[derive(Debug)]
pub enum RepoError {
    Validation(TaskValidationError),
    Db(DbError),
    NotFound(TaskId),
    InvalidData(String),
}

impl Display for RepoError {
    fn fmt(&self, f: &mut Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Validation(err) => write!(f, "{err}"),
            Self::Db(err) => write!(f, "{err}"),
            Self::NotFound(id) => write!(f, "task not found: {id}"),
            Self::InvalidData(message) => write!(f, "invalid persisted task data: {message}"),
        }
    }
}

impl Error for RepoError {
    fn source(&self) -> Option<&(dyn Error + 'static)> {
        match self {
            Self::Validation(err) => Some(err),
            Self::Db(err) => Some(err),
            Self::NotFound(_) | Self::InvalidData(_) => None,
        }
    }
}

impl From<TaskValidationError> for RepoError {
    fn from(value: TaskValidationError) -> Self {
        Self::Validation(value)
    }
}

impl From<DbError> for RepoError {
    fn from(value: DbError) -> Self {
        Self::Db(value)
    }
}

impl From<rusqlite::Error> for RepoError {
    fn from(value: rusqlite::Error) -> Self {
        Self::Db(DbError::Sqlite(value))
    }
}

/// Repository interface for the task collection.
pub trait TaskRepository {
    /// Inserts a new open task and returns its generated id.
    fn add_task(&self, task: &NewTask) -> RepoResult<TaskId>;
    /// Merges `patch` into the stored task.
    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()>;
    /// Removes the task and returns the record as it was before deletion.
    fn delete_task(&self, id: TaskId) -> RepoResult<Task>;
    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>>;
    /// Returns every task ordered by due date.
    fn list_tasks(&self) -> RepoResult<Vec<Task>>;
}

/// SQLite-backed task repository.
pub struct SqliteTaskRepository<'conn> {
    conn: &'conn Connection,
}

impl<'conn> SqliteTaskRepository<'conn> {
    pub fn new(conn: &'conn Connection) -> Self {
        Self { conn }
    }
}

impl TaskRepository for SqliteTaskRepository<'_> {
    fn add_task(&self, task: &NewTask) -> RepoResult<TaskId> {
        task.validate()?;

        let id = Uuid::new_v4();
        let tx = self.conn.unchecked_transaction()?;
        tx.execute(
            "INSERT INTO tasks (uuid, title, text, due_day, is_done)
             VALUES (?1, ?2, ?3, ?4, 0);",
            params![
                id.to_string(),
                task.title.as_str(),
                task.text.as_str(),
                date_to_day(task.due_date),
            ],
        )?;
        insert_files(&tx, id, &task.files)?;
        tx.commit()?;

        debug!(
            "event=task_insert module=repo status=ok task_id={id} files={}",
            task.files.len()
        );
        Ok(id)
    }

    fn update_task(&self, id: TaskId, patch: &TaskPatch) -> RepoResult<()> {
        let mut task = self.get_task(id)?.ok_or(RepoError::NotFound(id))?;
        patch.apply_to(&mut task);
        task.validate()?;

        let tx = self.conn.unchecked_transaction()?;
        let changed = tx.execute(
            "UPDATE tasks
             SET
                title = ?1,
                text = ?2,
                due_day = ?3,
                is_done = ?4,
                updated_at = (strftime('%s', 'now') * 1000)
             WHERE uuid = ?5;",
            params![
                task.title.as_str(),
                task.text.as_str(),
                date_to_day(task.due_date),
                bool_to_int(task.is_done),
                id.to_string(),
            ],
        )?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        if patch.files.is_some() {
            tx.execute(
                "DELETE FROM task_files WHERE task_uuid = ?1;",
                [id.to_string()],
            )?;
            insert_files(&tx, id, &task.files)?;
        }
        tx.commit()?;

        Ok(())
    }

    fn delete_task(&self, id: TaskId) -> RepoResult<Task> {
        let task = self.get_task(id)?.ok_or(RepoError::NotFound(id))?;

        let changed = self
            .conn
            .execute("DELETE FROM tasks WHERE uuid = ?1;", [id.to_string()])?;
        if changed == 0 {
            return Err(RepoError::NotFound(id));
        }

        Ok(task)
    }

    fn get_task(&self, id: TaskId) -> RepoResult<Option<Task>> {
        let mut stmt = self
            .conn
            .prepare(&format!("{TASK_SELECT_SQL} WHERE uuid = ?1;"))?;

        let mut rows = stmt.query([id.to_string()])?;
        let Some(row) = rows.next()? else {
            return Ok(None);
        };

        let mut task = parse_task_row(row)?;
        task.files = load_files(self.conn, id)?;
        task.validate()?;
        Ok(Some(task))
    }

    fn list_tasks(&self) -> RepoResult<Vec<Task>> {
        let mut stmt = self.conn.prepare(&format!(
            "{TASK_SELECT_SQL} ORDER BY due_day ASC, rowid ASC;"
        ))?;
        let mut rows = stmt.query([])?;
        let mut tasks = Vec::new();

        while let Some(row) = rows.next()? {
            tasks.push(parse_task_row(row)?);
        }

        for task in &mut tasks {
            task.files = load_files(self.conn, task.id)?;
            task.validate()?;
        }

        Ok(tasks)
    }
}

fn insert_files(conn: &Connection, task_id: TaskId, files: &[FileRef]) -> RepoResult<()> {
    let mut stmt = conn.prepare(
        "INSERT INTO task_files (task_uuid, position, uid, name, url)
         VALUES (?1, ?2, ?3, ?4, ?5);",
    )?;
    for (position, file) in files.iter().enumerate() {
        stmt.execute(params![
            task_id.to_string(),
            position as i64,
            file.uid.as_str(),
            file.name.as_str(),
            file.url.as_str(),
        ])?;
    }
    Ok(())
}

fn load_files(conn: &Connection, task_id: TaskId) -> RepoResult<Vec<FileRef>> {
    let mut stmt = conn.prepare(
        "SELECT uid, name, url
         FROM task_files
         WHERE task_uuid = ?1
         ORDER BY position ASC;",
    )?;
    let files = stmt
        .query_map([task_id.to_string()], |row| {
            Ok(FileRef {
                uid: row.get("uid")?,
                name: row.get("name")?,
                url: row.get("url")?,
            })
        })?
        .collect::<Result<Vec<_>, _>>()?;
    Ok(files)
}

fn parse_task_row(row: &Row<'_>) -> RepoResult<Task> {
    let uuid_text: String = row.get("uuid")?;
    let id = Uuid::parse_str(&uuid_text).map_err(|_| {
        RepoError::InvalidData(format!("invalid uuid value `{uuid_text}` in tasks.uuid"))
    })?;

    let due_day: i64 = row.get("due_day")?;
    let due_date = day_to_date(due_day).ok_or_else(|| {
        RepoError::InvalidData(format!("invalid due day `{due_day}` in tasks.due_day"))
    })?;

    let is_done = match row.get::<_, i64>("is_done")? {
        0 => false,
        1 => true,
        other => {
            return Err(RepoError::InvalidData(format!(
                "invalid is_done value `{other}` in tasks.is_done"
            )));
        }
    };

    Ok(Task {
        id,
        title: row.get("title")?,
        text: row.get("text")?,
        due_date,
        is_done,
        files: Vec::new(),
    })
}

fn date_to_day(date: NaiveDate) -> i64 {
    i64::from(date.num_days_from_ce())
}

fn day_to_date(day: i64) -> Option<NaiveDate> {
    i32::try_from(day)
        .ok()
        .and_then(NaiveDate::from_num_days_from_ce_opt)
}

fn bool_to_int(value: bool) -> i64 {
    i64::from(value)
}
