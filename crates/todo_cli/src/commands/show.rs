use crate::context::Context;
use crate::render;
use clap::Args;
use todo_core::{CardView, TaskId};

#[derive(Args, Debug)]
pub struct Command {
    task_id: TaskId,
}

pub fn handle(command: Command, context: &Context) -> eyre::Result<()> {
    let task = context
        .service()
        .get_todo(command.task_id)?
        .ok_or_else(|| eyre::eyre!("task not found: {}", command.task_id))?;
    print!("{}", render::card(&CardView::from_task(&task, context.today())));
    Ok(())
}
