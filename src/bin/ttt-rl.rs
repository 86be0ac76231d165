//! ttt-rl - tabular reinforcement learning for Tic-Tac-Toe
//!
//! This CLI provides:
//! - Training Q-learning, SARSA and TD(0) agents against baselines or themselves
//! - Evaluating frozen agents and exporting learning curves
//! - Playing against a self-trained agent on the console

use anyhow::Result;
use clap::{Parser, Subcommand};

#[derive(Parser)]
#[command(name = "ttt-rl")]
#[command(version, about = "Tabular reinforcement learning for Tic-Tac-Toe", long_about = None)]
struct Cli {
    /// Log level used when RUST_LOG is not set
    #[arg(long, global = true, default_value = "warn")]
    log_level: String,

    #[command(subcommand)]
    command: Commands,
}

#[derive(Subcommand)]
enum Commands {
    /// Train a learning agent and optionally evaluate it
    Train(Box<ttt_rl::cli::commands::train::TrainArgs>),

    /// Play against a self-trained agent
    Play(ttt_rl::cli::commands::play::PlayArgs),

    /// Count reachable board states
    States(ttt_rl::cli::commands::states::StatesArgs),
}

fn init_tracing(level: &str) {
    use tracing_subscriber::{EnvFilter, fmt, prelude::*};

    let filter = EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new(level));

    tracing_subscriber::registry()
        .with(fmt::layer().with_writer(std::io::stderr))
        .with(filter)
        .init();
}

fn main() -> Result<()> {
    let cli = Cli::parse();
    init_tracing(&cli.log_level);

    match cli.command {
        Commands::Train(args) => ttt_rl::cli::commands::train::execute(*args),
        Commands::Play(args) => ttt_rl::cli::commands::play::execute(args),
        Commands::States(args) => ttt_rl::cli::commands::states::execute(args),
    }
}
