//! Play command - train an agent by self-play, then play it on the console

use std::io::{self, BufRead, Write};

use anyhow::{Context, Result};
use clap::Parser;
use tracing::info;

use super::{AgentArg, AgentOptions};
use crate::{
    learning::{Agent, AgentKind},
    pipeline::{battle, play_game},
    players::HumanPlayer,
    ports::Player,
    tictactoe::{Action, Board, GameResult, TicTacToe},
};

#[derive(Parser, Debug)]
#[command(about = "Play against a self-trained agent")]
pub struct PlayArgs {
    /// Learning algorithm of the opponent
    #[arg(value_enum)]
    pub agent: AgentArg,

    /// Self-play games before the first interactive game
    #[arg(long, short = 't', default_value_t = 20_000)]
    pub training_games: usize,

    /// Take the first move (X)
    #[arg(long, default_value_t = false)]
    pub human_first: bool,

    /// Number of interactive games
    #[arg(long, default_value_t = 1)]
    pub games: usize,

    /// Show the agent's estimates for its opening position
    #[arg(long, default_value_t = false)]
    pub hints: bool,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    #[command(flatten)]
    pub agent_options: AgentOptions,
}

/// Train a first-player and a second-player agent against each other and
/// return the one that will face the human, frozen.
pub fn train_opponent(args: &PlayArgs) -> Result<Agent> {
    let kind = AgentKind::from(args.agent);
    let config = args.agent_options.resolve(kind, args.seed)?;
    let mut first = Agent::new(kind, config)?.with_name(format!("{kind} (X)"));
    let second_config = match args.seed {
        Some(seed) => config.with_seed(seed.wrapping_add(1)),
        None => config,
    };
    let mut second = Agent::new(kind, second_config)?.with_name(format!("{kind} (O)"));

    let stats = battle(&mut first, &mut second, args.training_games)?;
    info!(
        games = stats.games(),
        first_wins = stats.player1_wins,
        second_wins = stats.player2_wins,
        draws = stats.draws,
        "self-play training finished"
    );

    let mut agent = if args.human_first { second } else { first };
    agent.set_training(false);
    Ok(agent)
}

/// The agent's estimate for each empty cell as a 3x3 grid
pub fn format_hints(agent: &Agent, board: &Board) -> String {
    agent
        .move_values(board)
        .chunks(3)
        .map(|row| {
            row.iter()
                .map(|value| match value {
                    Some(value) => format!("{value:6.3}"),
                    None => format!("{:>6}", "-"),
                })
                .collect::<Vec<_>>()
                .join(" ")
        })
        .collect::<Vec<_>>()
        .join("\n")
}

/// Interactive session over arbitrary input and output streams
pub fn run_session<R: BufRead, W: Write>(
    args: &PlayArgs,
    agent: &mut Agent,
    input: R,
    mut output: W,
) -> Result<Vec<GameResult>> {
    if args.hints {
        let mut opening = Board::new();
        let position = if args.human_first {
            // the agent answers the centre opening
            opening.take_turn(Action::new(1, 1))?;
            "the reply to a centre opening"
        } else {
            "its opening move"
        };
        writeln!(
            output,
            "Agent estimates for {position}:\n{}",
            format_hints(agent, &opening)
        )
        .context("writing hints")?;
    }

    let mut human = HumanPlayer::new(input, output);
    let mut env = TicTacToe::new();
    let mut results = Vec::with_capacity(args.games);

    for _ in 0..args.games {
        let result = if args.human_first {
            play_game(&mut env, &mut human, agent)
        } else {
            play_game(&mut env, agent, &mut human)
        }?;
        writeln!(human.writer_mut(), "\n{}\n", env.board()).context("writing final board")?;
        results.push(result);
    }
    Ok(results)
}

pub fn execute(args: PlayArgs) -> Result<()> {
    println!(
        "Training {} by self-play for {} games...",
        AgentKind::from(args.agent),
        args.training_games
    );
    let mut agent = train_opponent(&args)?;
    println!("Cells are numbered 0-8, left to right, top to bottom.");

    let stdin = io::stdin();
    run_session(&args, &mut agent, stdin.lock(), io::stdout())?;
    Ok(())
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;

    #[test]
    fn test_session_against_trained_agent() {
        let args = PlayArgs::parse_from([
            "play",
            "q-learning",
            "--training-games",
            "200",
            "--human-first",
            "--seed",
            "3",
            "--hints",
        ]);
        let mut agent = train_opponent(&args).unwrap();

        // Enough candidate moves to finish any game; occupied cells are re-asked.
        let moves = "0\n1\n2\n3\n4\n5\n6\n7\n8\n";
        let mut output = Vec::new();
        let results = run_session(&args, &mut agent, Cursor::new(moves), &mut output).unwrap();

        assert_eq!(results.len(), 1);
        let transcript = String::from_utf8(output).unwrap();
        assert!(transcript.contains("You are X."));
        assert!(transcript.starts_with("Agent estimates"));
    }

    #[test]
    fn test_hints_mark_taken_cells() {
        let args = PlayArgs::parse_from(["play", "td", "--training-games", "0"]);
        let agent = train_opponent(&args).unwrap();
        let board = Board::from_string("X...O....").unwrap();
        let hints = format_hints(&agent, &board);
        let rows: Vec<&str> = hints.lines().collect();
        assert_eq!(rows.len(), 3);
        assert!(rows[0].trim_start().starts_with('-'));
        assert!(rows[0].contains("0.050"));
    }
}
