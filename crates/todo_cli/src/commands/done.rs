use crate::context::Context;
use clap::Args;
use todo_core::TaskId;

#[derive(Args, Debug)]
pub struct Command {
    task_id: TaskId,
}

pub fn handle(command: Command, context: &Context) -> eyre::Result<()> {
    let is_done = context.service().toggle_done(command.task_id)?;
    println!(
        "{} {}",
        command.task_id,
        if is_done { "done" } else { "open" }
    );
    Ok(())
}
