//! Q-learning and SARSA agents
//!
//! Both agents keep a 3^9 x 9 Q-table, pick moves ε-greedily from it and
//! assign credit backwards through the episode once the result is known.

use tracing::debug;

use super::{
    episode::{Episode, terminal_value},
    exploration::Exploration,
    q_table::QTable,
};
use crate::{
    Error, Result,
    config::AgentConfig,
    ports::{Player, apply_action, ensure_playable},
    tictactoe::{Action, Board, GameResult, Side, Transition},
};

/// `(state hash, action index)` recorded on each move
pub type StateAction = (usize, usize);

/// Indices of the empty cells of the board encoded by `state`.
pub(crate) fn legal_indices(state: usize) -> Result<Vec<usize>> {
    Ok(Board::from_hash(state)?
        .possible_actions()
        .into_iter()
        .map(Action::index)
        .collect())
}

fn select_epsilon_greedy(
    exploration: &mut Exploration,
    q_table: &QTable,
    board: &Board,
) -> Result<Action> {
    let legal = board.possible_actions();
    if let Some(action) = exploration.explore(&legal) {
        return Ok(action);
    }
    let indices: Vec<usize> = legal.iter().map(|action| action.index()).collect();
    let best = q_table
        .greedy_action(board.hash(), &indices)
        .ok_or(Error::NoValidMoves)?;
    Action::from_index(best)
}

/// Q-learning agent (off-policy TD control)
///
/// Earlier moves are bootstrapped from the best action value of the state
/// the agent faced next, regardless of the action it actually took there.
#[derive(Debug, Clone)]
pub struct QLearningAgent {
    name: String,
    q_table: QTable,
    exploration: Exploration,
    episode: Episode<StateAction>,
}

impl QLearningAgent {
    /// Create a new Q-learning agent
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidConfiguration`] if the hyper-parameters are
    /// out of range.
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AgentConfig) -> Self {
        Self {
            name: "Q-Learning".to_string(),
            q_table: QTable::new(config.alpha, config.gamma, config.initial_value),
            exploration: Exploration::from_config(&config),
            episode: Episode::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    /// Action values of the given board
    pub fn q_values(&self, board: &Board) -> &[f64; 9] {
        self.q_table.row(board.hash())
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    pub fn is_training(&self) -> bool {
        self.exploration.is_training()
    }

    /// Moves recorded in the current episode
    pub fn history(&self) -> &[StateAction] {
        self.episode.steps()
    }
}

impl Default for QLearningAgent {
    fn default() -> Self {
        Self::build(AgentConfig::q_learning())
    }
}

impl Player for QLearningAgent {
    fn new_game(&mut self, side: Side) {
        self.episode.begin(side);
    }

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        self.episode.side(&self.name)?;
        ensure_playable(board)?;

        let state = board.hash();
        let action = select_epsilon_greedy(&mut self.exploration, &self.q_table, board)?;
        let transition = apply_action(board, action)?;
        self.episode.record((state, action.index()));
        Ok(transition)
    }

    fn final_result(&mut self, result: GameResult) -> Result<()> {
        let (side, history) = self.episode.finish(&self.name)?;
        let final_value = terminal_value(side, result);

        // Walk backwards: the last move takes the terminal value directly.
        let mut next_max: Option<f64> = None;
        for &(state, action) in history.iter().rev() {
            match next_max {
                None => self.q_table.set(state, action, final_value),
                Some(max_next) => self.q_table.q_learning_update(state, action, max_next),
            }
            next_max = Some(self.q_table.max_q(state, &legal_indices(state)?));
        }

        if self.exploration.is_training() {
            self.exploration.decay();
        }
        debug!(
            agent = %self.name,
            ?result,
            moves = history.len(),
            final_value,
            "q-learning terminal update"
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

/// SARSA agent (on-policy TD control)
///
/// Earlier moves are bootstrapped from the value of the action the agent
/// actually took next. With training switched off the table is frozen.
#[derive(Debug, Clone)]
pub struct SarsaAgent {
    name: String,
    q_table: QTable,
    exploration: Exploration,
    episode: Episode<StateAction>,
}

impl SarsaAgent {
    /// Create a new SARSA agent
    pub fn new(config: AgentConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: AgentConfig) -> Self {
        Self {
            name: "SARSA".to_string(),
            q_table: QTable::new(config.alpha, config.gamma, config.initial_value),
            exploration: Exploration::from_config(&config),
            episode: Episode::new(),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn q_table(&self) -> &QTable {
        &self.q_table
    }

    pub fn q_values(&self, board: &Board) -> &[f64; 9] {
        self.q_table.row(board.hash())
    }

    pub fn epsilon(&self) -> f64 {
        self.exploration.epsilon()
    }

    pub fn is_training(&self) -> bool {
        self.exploration.is_training()
    }

    pub fn history(&self) -> &[StateAction] {
        self.episode.steps()
    }
}

impl Default for SarsaAgent {
    fn default() -> Self {
        Self::build(AgentConfig::sarsa())
    }
}

impl Player for SarsaAgent {
    fn new_game(&mut self, side: Side) {
        self.episode.begin(side);
    }

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        self.episode.side(&self.name)?;
        ensure_playable(board)?;

        let state = board.hash();
        let action = select_epsilon_greedy(&mut self.exploration, &self.q_table, board)?;
        let transition = apply_action(board, action)?;
        self.episode.record((state, action.index()));
        Ok(transition)
    }

    fn final_result(&mut self, result: GameResult) -> Result<()> {
        let (side, history) = self.episode.finish(&self.name)?;
        if !self.exploration.is_training() {
            return Ok(());
        }
        let final_value = terminal_value(side, result);

        let mut next_q: Option<f64> = None;
        for &(state, action) in history.iter().rev() {
            match next_q {
                None => self.q_table.set(state, action, final_value),
                Some(next) => self.q_table.sarsa_update(state, action, next),
            }
            next_q = Some(self.q_table.get(state, action));
        }

        self.exploration.decay();
        debug!(
            agent = %self.name,
            ?result,
            moves = history.len(),
            final_value,
            "sarsa terminal update"
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
