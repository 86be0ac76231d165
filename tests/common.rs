//! Shared helpers for the integration tests.

use std::collections::VecDeque;

use ttt_rl::{
    Result,
    ports::{Player, apply_action, ensure_playable},
    tictactoe::{Action, Board, Side, Transition},
};

/// Plays a fixed sequence of cells, one per turn.
pub struct ScriptedPlayer {
    moves: VecDeque<usize>,
}

impl ScriptedPlayer {
    pub fn new(moves: &[usize]) -> Self {
        Self {
            moves: moves.iter().copied().collect(),
        }
    }
}

impl Player for ScriptedPlayer {
    fn new_game(&mut self, _side: Side) {}

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        ensure_playable(board)?;
        let cell = self
            .moves
            .pop_front()
            .ok_or(ttt_rl::Error::NoValidMoves)?;
        apply_action(board, Action::from_index(cell)?)
    }

    fn name(&self) -> &str {
        "scripted"
    }
}
