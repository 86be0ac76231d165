//! One-ply heuristic opponent
//!
//! The benchmark player:
//! 1. Completes one of its own lines if it can win this turn
//! 2. Otherwise blocks a line the opponent could complete next turn
//! 3. Otherwise plays a random legal move

use rand::{SeedableRng, rngs::StdRng, seq::IndexedRandom};

use crate::{
    Error, Result,
    learning::exploration::build_rng,
    ports::{Player, apply_action, ensure_playable},
    tictactoe::{Action, Board, LineAnalyzer, Side, Transition},
};

#[derive(Debug, Clone)]
pub struct BenchmarkPlayer {
    name: String,
    rng: StdRng,
}

impl BenchmarkPlayer {
    pub fn new() -> Self {
        Self {
            name: "Benchmark".to_string(),
            rng: build_rng(None),
        }
    }

    pub fn with_seed(seed: u64) -> Self {
        Self {
            name: "Benchmark".to_string(),
            rng: StdRng::seed_from_u64(seed),
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    fn choose(&mut self, board: &Board) -> Result<Action> {
        let side = board.current_side();
        let cells = board.cells();

        if let Some(&position) = LineAnalyzer::winning_moves(cells, side).first() {
            return Action::from_index(position);
        }
        if let Some(&position) = LineAnalyzer::winning_moves(cells, side.opponent()).first() {
            return Action::from_index(position);
        }
        board
            .possible_actions()
            .choose(&mut self.rng)
            .copied()
            .ok_or(Error::NoValidMoves)
    }
}

impl Default for BenchmarkPlayer {
    fn default() -> Self {
        Self::new()
    }
}

impl Player for BenchmarkPlayer {
    fn new_game(&mut self, _side: Side) {}

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        ensure_playable(board)?;
        let action = self.choose(board)?;
        apply_action(board, action)
    }

    fn name(&self) -> &str {
        &self.name
    }

    fn set_rng_seed(&mut self, seed: u64) {
        self.rng = StdRng::seed_from_u64(seed);
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::tictactoe::Cell;

    #[test]
    fn test_takes_the_win() {
        // O to move; O can win at 5, X threatens 2
        let mut board = Board::from_string("XX.OO.X..").unwrap();
        let mut player = BenchmarkPlayer::with_seed(1);
        let transition = player.make_move(&mut board).unwrap();
        assert_eq!(board.get(Action::new(1, 2)).unwrap(), Cell::O);
        assert_eq!(transition.winner, Some(Side::Second));
    }

    #[test]
    fn test_blocks_the_opponent() {
        // O to move; X threatens 2
        let mut board = Board::from_string("XX..O....").unwrap();
        let mut player = BenchmarkPlayer::with_seed(1);
        player.make_move(&mut board).unwrap();
        assert_eq!(board.get(Action::new(0, 2)).unwrap(), Cell::O);
    }

    #[test]
    fn test_random_move_without_threats() {
        let mut board = Board::new();
        let mut player = BenchmarkPlayer::with_seed(9);
        player.make_move(&mut board).unwrap();
        assert_eq!(board.mark_count(), 1);
    }
}
