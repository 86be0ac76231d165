//! States command - enumerate the reachable board space

use anyhow::Result;
use clap::Parser;

use crate::{
    cli::output::{format_number, print_kv, print_section},
    tictactoe::{Board, STATE_COUNT, all_states},
};

#[derive(Parser, Debug)]
#[command(about = "Count reachable and terminal boards")]
pub struct StatesArgs {
    /// Also break terminal boards down by outcome
    #[arg(long, default_value_t = false)]
    pub outcomes: bool,
}

/// Terminal boards by outcome: (first player wins, second player wins, draws)
pub fn terminal_breakdown(terminal: impl IntoIterator<Item = usize>) -> Result<(usize, usize, usize)> {
    let mut counts = (0, 0, 0);
    for hash in terminal {
        match Board::from_hash(hash)?.winner() {
            Some(crate::tictactoe::Side::First) => counts.0 += 1,
            Some(crate::tictactoe::Side::Second) => counts.1 += 1,
            None => counts.2 += 1,
        }
    }
    Ok(counts)
}

pub fn execute(args: StatesArgs) -> Result<()> {
    let space = all_states();

    print_section("State space");
    print_kv("Table size", &format_number(STATE_COUNT));
    print_kv("Reachable", &format_number(space.states.len()));
    print_kv("Terminal", &format_number(space.terminal_states.len()));

    if args.outcomes {
        let (first, second, draws) = terminal_breakdown(space.terminal_states.iter().copied())?;
        print_kv("X wins", &format_number(first));
        print_kv("O wins", &format_number(second));
        print_kv("Draws", &format_number(draws));
    }
    Ok(())
}
