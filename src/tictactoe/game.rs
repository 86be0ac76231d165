//! Game results and per-move transitions

use serde::{Deserialize, Serialize};

use super::board::{Board, Side};
use crate::{Error, Result};

/// Outcome of a finished game, from the board's point of view
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum GameResult {
    FirstPlayerWin,
    SecondPlayerWin,
    Draw,
}

impl GameResult {
    pub fn from_winner(winner: Option<Side>) -> Self {
        match winner {
            Some(Side::First) => GameResult::FirstPlayerWin,
            Some(Side::Second) => GameResult::SecondPlayerWin,
            None => GameResult::Draw,
        }
    }

    pub fn winner(self) -> Option<Side> {
        match self {
            GameResult::FirstPlayerWin => Some(Side::First),
            GameResult::SecondPlayerWin => Some(Side::Second),
            GameResult::Draw => None,
        }
    }

    /// Integer result code: 1 first player, -1 second player, 0 draw.
    pub fn code(self) -> i8 {
        self.winner().map_or(0, Side::code)
    }
}

impl TryFrom<i64> for GameResult {
    type Error = Error;

    fn try_from(code: i64) -> Result<Self> {
        match code {
            1 => Ok(GameResult::FirstPlayerWin),
            -1 => Ok(GameResult::SecondPlayerWin),
            0 => Ok(GameResult::Draw),
            code => Err(Error::InvalidResult { code }),
        }
    }
}

/// What a single move produced: `(winner, board, terminated)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Transition {
    pub winner: Option<Side>,
    pub board: Board,
    pub terminated: bool,
}

impl Transition {
    pub fn observe(board: &Board) -> Self {
        let (terminated, winner) = board.is_over();
        Self {
            winner,
            board: *board,
            terminated,
        }
    }

    /// Result of the game if this transition ended it
    pub fn result(&self) -> Option<GameResult> {
        self.terminated
            .then(|| GameResult::from_winner(self.winner))
    }
}
