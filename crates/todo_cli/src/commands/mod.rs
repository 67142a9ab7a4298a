use crate::context::Context;
use clap::Subcommand;
use std::path::Path;
use todo_core::{Attachment, SubmitOutcome, TaskId};

pub mod add;
pub mod delete;
pub mod done;
pub mod edit;
pub mod list;
pub mod show;

#[derive(Subcommand, Debug)]
pub enum Command {
    /// Create a new task
    Add(add::Command),
    /// Change title, description, due date or attachments of a task
    Edit(edit::Command),
    /// Toggle the completion flag of a task
    Done(done::Command),
    /// Remove a task and its attached files
    #[command(alias = "delete")]
    Rm(delete::Command),
    /// Display one task
    Show(show::Command),
    /// Display every task with done/left counters
    List(list::Command),
}

impl Command {
    pub fn execute(self, context: &Context) -> eyre::Result<()> {
        match self {
            Command::Add(command) => add::handle(command, context),
            Command::Edit(command) => edit::handle(command, context),
            Command::Done(command) => done::handle(command, context),
            Command::Rm(command) => delete::handle(command, context),
            Command::Show(command) => show::handle(command, context),
            Command::List(command) => list::handle(command, context),
        }
    }
}

/// Reads a local file into a pending attachment named after the file.
pub(crate) fn read_attachment(path: &Path) -> eyre::Result<Attachment> {
    let bytes = std::fs::read(path)
        .map_err(|err| eyre::eyre!("cannot read `{}`: {err}", path.display()))?;
    let name = path
        .file_name()
        .map(|name| name.to_string_lossy().into_owned())
        .ok_or_else(|| eyre::eyre!("`{}` has no file name", path.display()))?;
    Ok(Attachment::pending(name, bytes))
}

pub(crate) fn finish_submit(outcome: SubmitOutcome) -> eyre::Result<TaskId> {
    match outcome {
        SubmitOutcome::Saved(id) => Ok(id),
        SubmitOutcome::Invalid(err) => Err(eyre::eyre!("{err}")),
        SubmitOutcome::Failed(notification) => Err(eyre::eyre!("{notification}")),
    }
}
