//! TD(0) state-value agent

use tracing::debug;

use super::{
    episode::{Episode, terminal_value},
    exploration::Exploration,
    q_table::first_max_by,
    value_table::ValueTable,
};
use crate::{
    Error, Result,
    config::AgentConfig,
    ports::{Player, apply_action, ensure_playable},
    tictactoe::{Action, Board, GameResult, Side, Transition},
};

/// State-value learner
///
/// Each move is scored by the value of the board it produces. The history
/// records the board the agent faced before each of its moves, and credit
/// flows backwards through those boards via `V(s) ← V(s) + α(γ·V(s') - V(s))`.
#[derive(Debug, Clone)]
pub struct TdAgent {
    name: String,
    values: ValueTable,
    exploration: Exploration,
    episode: Episode<usize>,
}

impl TdAgent {
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AgentConfig) -> Self {
        Self {
            name: "TD(0)".to_string(),
            values: ValueTable::new(config.alpha, config.gamma, config.initial_value),
            exploration: Exploration::from_config(&config),
            episode: Episode::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn values(&self) -> &ValueTable {
        &self.values
    }

    /// Estimated value of the board with the given hash
    pub fn value(&self, hash: usize) -> f64 {
        self.values.get(hash)
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    /// Hashes of the boards faced before each move of the current episode
    pub fn history(&self) -> &[usize] {
        self.episode.steps()
    }

    fn afterstate(board: &Board, action: Action) -> Result<usize> {
        let mut next = *board;
        next.take_turn(action)?;
        Ok(next.hash())
    }

    fn select_action(&mut self, board: &Board) -> Result<Action> {
        let legal = board.possible_actions();
        if let Some(action) = self.exploration.explore(&legal) {
            return Ok(action);
        }
        let scored = legal
            .iter()
            .map(|&action| Ok((action, self.values.get(Self::afterstate(board, action)?))))
            .collect::<Result<Vec<_>>>()?;
        first_max_by(&scored, |&(_, value)| value)
            .map(|(action, _)| action)
            .ok_or(Error::NoValidMoves)
    }
}

impl Default for TdAgent {
    fn default() -> Self {
        Self::build(AgentConfig::td())
    }
}

impl Player for TdAgent {
    fn new_game(&mut self, side: Side) {
        self.episode.begin(side);
    }

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        self.episode.side(&self.name)?;
        ensure_playable(board)?;

        let state = board.hash();
        let action = self.select_action(board)?;
        let transition = apply_action(board, action)?;
        self.episode.record(state);
        Ok(transition)
    }

    fn final_result(&mut self, result: GameResult) -> Result<()> {
        let (side, history) = self.episode.finish(&self.name)?;
        if !self.exploration.is_training() {
            return Ok(());
        }
        let final_value = terminal_value(side, result);

        let mut next_value: Option<f64> = None;
        for &state in history.iter().rev() {
            match next_value {
                None => self.values.set(state, final_value),
                Some(next) => self.values.td_update(state, next),
            }
            next_value = Some(self.values.get(state));
        }

        self.exploration.decay();
        debug!(
            agent = %self.name,
            ?result,
            moves = history.len(),
            final_value,
            "td(0) terminal update"
        );
        Ok(())
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_training(&mut self, training: bool) {
        self.exploration.set_training(training);
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.exploration.reseed(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn greedy() -> TdAgent {
        TdAgent::new(AgentConfig::td().with_epsilon(0.0)).unwrap()
    }

    #[test]
    fn test_prefers_highest_valued_afterstate() {
        let mut agent = greedy();
        let board = Board::from_string("X...O....").unwrap();
        let mut preferred = board;
        preferred.take_turn(Action::from_index(6).unwrap()).unwrap();
        agent.values.set(preferred.hash(), 0.9);

        agent.new_game(Side::First);
        let mut live = board;
        let transition = agent.make_move(&mut live).unwrap();

        assert_eq!(transition.board, preferred);
        assert_eq!(agent.history(), &[board.hash()]);
    }

    #[test]
    fn test_history_records_board_before_move() {
        let mut agent = greedy();
        agent.new_game(Side::First);
        let mut board = Board::new();
        let before = board.hash();

        let transition = agent.make_move(&mut board).unwrap();

        assert_eq!(agent.history(), &[before]);
        assert_ne!(transition.board.hash(), before);
    }

    #[test]
    fn test_ties_take_first_empty_cell() {
        let mut agent = greedy();
        agent.new_game(Side::First);
        let mut board = Board::new();
        agent.make_move(&mut board).unwrap();
        assert_eq!(board.get(Action::new(0, 0)).unwrap(), crate::tictactoe::Cell::X);
    }

    #[test]
    fn test_terminal_update_walks_back() {
        let mut agent = greedy();
        agent.new_game(Side::First);
        let mut board = Board::new();

        // X 0, O 3, X 1, O 4, X 2
        let s0 = board.hash();
        agent.make_move(&mut board).unwrap();
        board.take_turn(Action::new(1, 0)).unwrap();
        let s1 = board.hash();
        agent.make_move(&mut board).unwrap();
        board.take_turn(Action::new(1, 1)).unwrap();
        let s2 = board.hash();
        agent.make_move(&mut board).unwrap();
        assert_eq!(agent.history(), &[s0, s1, s2]);

        agent.final_result(GameResult::FirstPlayerWin).unwrap();

        assert_eq!(agent.value(s2), 1.0);
        // 0.05 + 0.1 * (0.9 * 1.0 - 0.05)
        assert!((agent.value(s1) - 0.135).abs() < 1e-12);
        // 0.05 + 0.1 * (0.9 * 0.135 - 0.05)
        assert!((agent.value(s0) - 0.05715).abs() < 1e-12);
        // the winning board itself is never written
        assert_eq!(agent.value(board.hash()), 0.05);
    }

    #[test]
    fn test_frozen_agent_keeps_values() {
        let mut agent = greedy();
        agent.set_training(false);
        agent.new_game(Side::First);
        let mut board = Board::from_string("XX.OO....").unwrap();
        let transition = agent.make_move(&mut board).unwrap();
        assert!(transition.terminated);

        let before = agent.values().clone();
        agent.final_result(GameResult::FirstPlayerWin).unwrap();
        assert_eq!(agent.values(), &before);
        assert!(agent.history().is_empty());
    }
}
