use crate::context::Context;
use crate::render;
use clap::Args;
use todo_core::TodoBoard;

#[derive(Args, Debug)]
pub struct Command {
    /// Print the cards as JSON instead of text
    #[arg(long)]
    json: bool,
}

pub fn handle(command: Command, context: &Context) -> eyre::Result<()> {
    let service = context.service();
    let receiver = service.subscribe()?;
    let mut board = TodoBoard::new();
    board.drain(&receiver);

    let cards = board.cards(context.today());
    if command.json {
        println!("{}", serde_json::to_string_pretty(&cards)?);
        return Ok(());
    }

    print!("{}", render::header(board.counts()));
    for card in &cards {
        println!();
        print!("{}", render::card(card));
    }
    Ok(())
}
