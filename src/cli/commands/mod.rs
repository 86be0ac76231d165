//! Subcommands of the `ttt-rl` binary and the argument types they share

pub mod play;
pub mod states;
pub mod train;

use std::path::PathBuf;

use anyhow::{Context, Result};
use clap::{Args, ValueEnum};

use crate::{
    config::AgentConfig,
    learning::{Agent, AgentKind},
    players::{BenchmarkPlayer, RandomPlayer},
    ports::Player,
};

/// Learning algorithm selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum AgentArg {
    /// Q-learning (off-policy TD control)
    QLearning,
    /// SARSA (on-policy TD control)
    Sarsa,
    /// TD(0) state-value learning
    Td,
}

impl From<AgentArg> for AgentKind {
    fn from(arg: AgentArg) -> Self {
        match arg {
            AgentArg::QLearning => AgentKind::QLearning,
            AgentArg::Sarsa => AgentKind::Sarsa,
            AgentArg::Td => AgentKind::Td,
        }
    }
}

/// Opponent selectable on the command line
#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OpponentArg {
    /// Uniform random legal moves
    Random,
    /// Wins when it can, blocks when it must, random otherwise
    Benchmark,
    /// A fresh Q-learning agent
    QLearning,
    /// A fresh SARSA agent
    Sarsa,
    /// A fresh TD(0) agent
    Td,
    /// A second agent of the trained agent's own kind and configuration
    #[value(name = "self")]
    SelfPlay,
}

/// Hyper-parameter flags shared by the commands that build agents
#[derive(Args, Debug, Clone, Default)]
pub struct AgentOptions {
    /// JSON file with agent hyper-parameters (missing fields use the algorithm's defaults)
    #[arg(long)]
    pub config: Option<PathBuf>,

    /// Learning rate α (0.0-1.0)
    #[arg(long)]
    pub alpha: Option<f64>,

    /// Discount factor γ (0.0-1.0)
    #[arg(long)]
    pub gamma: Option<f64>,

    /// Exploration rate ε (0.0-1.0)
    #[arg(long)]
    pub epsilon: Option<f64>,

    /// Initial table value
    #[arg(long)]
    pub initial_value: Option<f64>,
}

impl AgentOptions {
    /// Resolve the agent configuration: the algorithm's defaults, overlaid
    /// with the config file's fields if given, then with individual flags.
    pub fn resolve(&self, kind: AgentKind, seed: Option<u64>) -> Result<AgentConfig> {
        let mut config = match &self.config {
            Some(path) => AgentConfig::load_with_defaults(path, kind.default_config())
                .with_context(|| format!("loading agent config from {}", path.display()))?,
            None => kind.default_config(),
        };
        if let Some(alpha) = self.alpha {
            config = config.with_alpha(alpha);
        }
        if let Some(gamma) = self.gamma {
            config = config.with_gamma(gamma);
        }
        if let Some(epsilon) = self.epsilon {
            config = config.with_epsilon(epsilon);
        }
        if let Some(value) = self.initial_value {
            config = config.with_initial_value(value);
        }
        if let Some(seed) = seed {
            config = config.with_seed(seed);
        }
        config.validate()?;
        Ok(config)
    }
}

/// Build an opponent. `SelfPlay` mirrors `agent_kind` and `agent_config`.
pub fn build_opponent(
    opponent: OpponentArg,
    agent_kind: AgentKind,
    agent_config: AgentConfig,
    seed: Option<u64>,
) -> Result<Box<dyn Player>> {
    let learner = |kind: AgentKind, config: AgentConfig| -> Result<Box<dyn Player>> {
        let config = match seed {
            Some(seed) => config.with_seed(seed),
            None => config,
        };
        let name = format!("{kind} opponent");
        Ok(Box::new(Agent::new(kind, config)?.with_name(name)))
    };

    match opponent {
        OpponentArg::Random => Ok(Box::new(match seed {
            Some(seed) => RandomPlayer::with_seed(seed),
            None => RandomPlayer::new(),
        })),
        OpponentArg::Benchmark => Ok(Box::new(match seed {
            Some(seed) => BenchmarkPlayer::with_seed(seed),
            None => BenchmarkPlayer::new(),
        })),
        OpponentArg::QLearning => learner(AgentKind::QLearning, AgentKind::QLearning.default_config()),
        OpponentArg::Sarsa => learner(AgentKind::Sarsa, AgentKind::Sarsa.default_config()),
        OpponentArg::Td => learner(AgentKind::Td, AgentKind::Td.default_config()),
        OpponentArg::SelfPlay => learner(agent_kind, agent_config),
    }
}
