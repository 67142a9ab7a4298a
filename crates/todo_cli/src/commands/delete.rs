use crate::context::Context;
use clap::Args;
use todo_core::TaskId;

#[derive(Args, Debug)]
pub struct Command {
    task_id: TaskId,
}

pub fn handle(command: Command, context: &Context) -> eyre::Result<()> {
    let task = context.service().delete_todo(command.task_id)?;
    println!("removed {} ({})", task.id, task.title);
    Ok(())
}
