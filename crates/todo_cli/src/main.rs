//! Command-line front end for the to-do store.

use clap::Parser;
use std::path::PathBuf;

mod commands;
mod context;
mod render;

#[derive(Parser, Debug)]
#[command(name = "todo", version, about = "Personal to-do list with attachments")]
struct Args {
    /// Path to `todo.toml`; defaults apply when the file does not exist
    #[arg(long, short, default_value = "todo.toml")]
    config: PathBuf,

    #[command(subcommand)]
    command: commands::Command,
}

fn main() -> eyre::Result<()> {
    let args = Args::parse();
    let context = context::Context::open(&args.config)?;
    args.command.execute(&context)
}
