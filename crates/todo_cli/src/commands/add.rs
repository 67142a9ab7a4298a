use super::{finish_submit, read_attachment};
use crate::context::Context;
use chrono::NaiveDate;
use clap::Args;
use std::path::PathBuf;
use todo_core::TaskForm;

#[derive(Args, Debug)]
pub struct Command {
    /// Task title
    #[arg(long, short)]
    title: String,
    /// Free-text description
    #[arg(long = "text", short = 'd')]
    text: String,
    /// Completion date (YYYY-MM-DD), today or later
    #[arg(long)]
    due: NaiveDate,
    /// File to attach; repeat for several files
    #[arg(long = "file", short = 'f')]
    files: Vec<PathBuf>,
}

pub fn handle(command: Command, context: &Context) -> eyre::Result<()> {
    let mut form = TaskForm::new();
    form.set_title(command.title);
    form.set_text(command.text);
    form.choose_due_date(command.due, context.today())?;
    for path in &command.files {
        form.stage_file(read_attachment(path)?);
    }

    let service = context.service();
    let id = finish_submit(form.submit(&service, context.store()))?;
    println!("{id}");
    Ok(())
}
