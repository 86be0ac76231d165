//! Uniform random baseline

use rand::{Rng, SeedableRng, rngs::StdRng};

use crate::{
    Result,
    learning::exploration::build_rng,
    ports::{Player, apply_action, ensure_playable},
    tictactoe::{Board, Side, Transition},
};

/// Plays a uniformly random legal move
#[derive(Debug, Clone)]
pub struct RandomPlayer {
    name: String,
    rng: StdRng,
}

impl RandomPlayer {
    pub fn new() -> Self {
        Self {
            name: "Random".to_string(),
            rng: build_rng(None),
        }
    }

    /// Create a random player with a deterministic seed
    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: "Random".to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }
}

impl Default for RandomPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for RandomPlayer {
    fn new_game(&mut self, _side: Side) {}

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        ensure_playable(board)?;
        let moves = board.possible_actions();
        let index = self.rng.random_range(0..moves.len());
        apply_action(board, moves[index])
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}
