//! Tic-Tac-Toe game implementation

pub mod board;
pub mod environment;
pub mod game;
pub mod lines;
pub mod state_space;

pub use board::{Action, Board, Cell, STATE_COUNT, Side};
pub use environment::TicTacToe;
pub use game::{GameResult, Transition};
pub use lines::{LineAnalyzer, WINNING_LINES};
pub use state_space::{StateSpace, all_states};
