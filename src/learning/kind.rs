//! Algorithm selector and the enum-dispatched agent

use std::fmt;

use serde::{Deserialize, Serialize};

use super::{QLearningAgent, SarsaAgent, TdAgent};
use crate::{
    Result,
    config::AgentConfig,
    ports::Player,
    tictactoe::{Board, GameResult, Side, Transition},
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum AgentKind {
    QLearning,
    Sarsa,
    Td,
}

impl AgentKind {
    /// Hyper-parameters the algorithm starts from when none are given
    pub fn default_config(self) -> AgentConfig {
        match self {
            AgentKind::QLearning => AgentConfig::q_learning(),
            AgentKind::Sarsa => AgentConfig::sarsa(),
            AgentKind::Td => AgentConfig::td(),
        }
    }
}

impl fmt::Display for AgentKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        let name = match self {
            AgentKind::QLearning => "q-learning",
            AgentKind::Sarsa => "sarsa",
            AgentKind::Td => "td",
        };
        f.write_str(name)
    }
}

/// Any of the learning agents behind one concrete type
#[derive(Debug, Clone)]
pub enum Agent {
    QLearning(QLearningAgent),
    Sarsa(SarsaAgent),
    Td(TdAgent),
}

impl Agent {
    pub fn new(kind: AgentKind, config: AgentConfig) -> Result<Self> {
        Ok(match kind {
            AgentKind::QLearning => Agent::QLearning(QLearningAgent::new(config)?),
            AgentKind::Sarsa => Agent::Sarsa(SarsaAgent::new(config)?),
            AgentKind::Td => Agent::Td(TdAgent::new(config)?),
        })
    }

    /// Agent of `kind` with that algorithm's default hyper-parameters
    pub fn with_defaults(kind: AgentKind) -> Result<Self> {
        Self::new(kind, kind.default_config())
    }

    pub fn kind(&self) -> AgentKind {
        match self {
            Agent::QLearning(_) => AgentKind::QLearning,
            Agent::Sarsa(_) => AgentKind::Sarsa,
            Agent::Td(_) => AgentKind::Td,
        }
    }

    pub fn with_name(self, name: impl Into<String>) -> Self {
        match self {
            Agent::QLearning(agent) => Agent::QLearning(agent.with_name(name)),
            Agent::Sarsa(agent) => Agent::Sarsa(agent.with_name(name)),
            Agent::Td(agent) => Agent::Td(agent.with_name(name)),
        }
    }

    pub fn epsilon(&self) -> f64 {
        match self {
            Agent::QLearning(agent) => agent.epsilon(),
            Agent::Sarsa(agent) => agent.epsilon(),
            Agent::Td(agent) => agent.epsilon(),
        }
    }

    /// Per-cell estimates for `board`, `None` where the cell is taken.
    ///
    /// Q agents report `Q(s, a)`; the TD agent reports the value of the
    /// board each move would produce.
    pub fn move_values(&self, board: &Board) -> [Option<f64>; 9] {
        let mut values = [None; 9];
        for action in board.possible_actions() {
            let index = action.index();
            values[index] = match self {
                Agent::QLearning(agent) => Some(agent.q_values(board)[index]),
                Agent::Sarsa(agent) => Some(agent.q_values(board)[index]),
                Agent::Td(agent) => {
                    let mut next = *board;
                    next.take_turn(action).ok().map(|()| agent.value(next.hash()))
                }
            };
        }
        values
    }

    fn player(&self) -> &dyn Player {
        match self {
            Agent::QLearning(agent) => agent,
            Agent::Sarsa(agent) => agent,
            Agent::Td(agent) => agent,
        }
    }

    fn player_mut(&mut self) -> &mut dyn Player {
        match self {
            Agent::QLearning(agent) => agent,
            Agent::Sarsa(agent) => agent,
            Agent::Td(agent) => agent,
        }
    }
}

impl Player for Agent {
    fn new_game(&mut self, side: Side) {
        self.player_mut().new_game(side);
    }

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        self.player_mut().make_move(board)
    }

    fn final_result(&mut self, result: GameResult) -> Result<()> {
        self.player_mut().final_result(result)
    }

    fn name(&self) -> &str {
        self.player().name()
    }

    fn set_training(&mut self, training: bool) {
        self.player_mut().set_training(training);
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.player_mut().set_rng_seed(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_kind_round_trip() {
        for kind in [AgentKind::QLearning, AgentKind::Sarsa, AgentKind::Td] {
            let agent = Agent::with_defaults(kind).unwrap();
            assert_eq!(agent.kind(), kind);
        }
    }

    #[test]
    fn test_invalid_config_rejected() {
        let config = AgentConfig::q_learning().with_alpha(1.5);
        assert!(Agent::new(AgentKind::Sarsa, config).is_err());
    }

    #[test]
    fn test_move_values_skip_occupied_cells() {
        let agent = Agent::with_defaults(AgentKind::Td).unwrap();
        let board = Board::from_string("X...O....").unwrap();
        let values = agent.move_values(&board);
        assert_eq!(values[0], None);
        assert_eq!(values[4], None);
        assert_eq!(values[1], Some(0.05));
    }

    #[test]
    fn test_display_names() {
        assert_eq!(AgentKind::QLearning.to_string(), "q-learning");
        assert_eq!(
            serde_json::to_string(&AgentKind::Td).unwrap(),
            "\"td\""
        );
    }
}
