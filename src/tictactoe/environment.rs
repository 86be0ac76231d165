//! Episodic environment over a single board

use std::fmt;

use super::{Action, Board, Transition};
use crate::{Error, Result};

/// Reacts to moves, keeps the board, and reports the winner after each step.
#[derive(Debug, Clone, Default)]
pub struct TicTacToe {
    board: Board,
}

impl TicTacToe {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn board(&self) -> &Board {
        &self.board
    }

    pub fn board_mut(&mut self) -> &mut Board {
        &mut self.board
    }

    /// Apply a legal move for the side to play.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] once the game has terminated, otherwise whatever
    /// [`Board::take_turn`] rejects.
    pub fn step(&mut self, action: Action) -> Result<Transition> {
        if self.board.is_over().0 {
            return Err(Error::GameOver);
        }
        self.board.take_turn(action)?;
        Ok(Transition::observe(&self.board))
    }

    /// Empty the board and start a new game
    pub fn reset(&mut self) {
        self.board = Board::new();
    }
}

impl fmt::Display for TicTacToe {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        fmt::Display::fmt(&self.board, f)
    }
}
