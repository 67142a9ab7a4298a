use super::{finish_submit, read_attachment};
use crate::context::Context;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use todo_core::{TaskForm, TaskId};

#[derive(Args, Debug)]
pub struct Command {
    task_id: TaskId,
    #[arg(long, short)]
    title: Option<String>,
    #[arg(long = "text", short = 'd')]
    text: Option<String>,
    /// New completion date (YYYY-MM-DD), today or later
    #[arg(long)]
    due: Option<NaiveDate>,
    /// File to attach; repeat for several files
    #[arg(long = "file", short = 'f')]
    files: Vec<PathBuf>,
    /// Position (as shown by `show`) of an attached file to detach
    #[arg(long = "remove-file")]
    remove_files: Vec<usize>,
}

pub fn handle(command: Command, context: &Context) -> eyre::Result<()> {
    let service = context.service();
    let task = service
        .get_todo(command.task_id)?
        .ok_or_else(|| eyre::eyre!("task not found: {}", command.task_id))?;

    let mut form = TaskForm::for_edit(&task);
    if let Some(title) = command.title {
        form.set_title(title);
    }
    if let Some(text) = command.text {
        form.set_text(text);
    }
    if let Some(due) = command.due {
        form.choose_due_date(due, context.today())?;
    }

    let mut remove_files = command.remove_files;
    remove_files.sort_unstable_by(|a, b| b.cmp(a));
    remove_files.dedup();
    for index in remove_files {
        form.remove_file(index)?;
    }
    for path in &command.files {
        form.stage_file(read_attachment(path)?);
    }

    let id = finish_submit(form.submit(&service, context.store()))?;
    println!("{id}");
    Ok(())
}
