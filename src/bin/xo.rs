//! xo - train a tabular Q-learning tic-tac-toe agent, then play it
//!
//! With no arguments this loads `q_table.msgpack` (or starts empty), trains
//! for 15,000 episodes against a random opponent, saves the table and opens
//! an interactive game.

use anyhow::Result;
use clap::Parser;

#[derive(Parser)]
#[command(name = "xo")]
#[command(version, about = "Tabular Q-learning tic-tac-toe agent", long_about = None)]
struct Cli {
    #[command(flatten)]
    run: xo_qlearn::cli::commands::run::RunArgs,
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    xo_qlearn::cli::commands::run::execute(cli.run)
}
