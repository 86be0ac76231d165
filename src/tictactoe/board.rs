//! Board state representation and basic operations

use std::fmt;

use serde::{Deserialize, Serialize};

use super::lines::LineAnalyzer;
use crate::{Error, Result};

/// Number of distinct base-3 board encodings (3^9).
pub const STATE_COUNT: usize = 19_683;

/// A cell on the Tic-Tac-Toe board
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Cell {
    Empty,
    X,
    O,
}

impl Cell {
    pub fn to_char(self) -> char {
        match self {
            Cell::Empty => '.',
            Cell::X => 'X',
            Cell::O => 'O',
        }
    }

    pub fn from_char(c: char) -> Option<Cell> {
        match c {
            '.' | '_' => Some(Cell::Empty),
            'X' | 'x' => Some(Cell::X),
            'O' | 'o' | '0' => Some(Cell::O),
            _ => None,
        }
    }

    /// Base-3 digit used by [`Board::hash`].
    pub fn digit(self) -> usize {
        match self {
            Cell::Empty => 0,
            Cell::X => 1,
            Cell::O => 2,
        }
    }

    fn from_digit(digit: usize) -> Cell {
        match digit {
            1 => Cell::X,
            2 => Cell::O,
            _ => Cell::Empty,
        }
    }

    pub fn side(self) -> Option<Side> {
        match self {
            Cell::X => Some(Side::First),
            Cell::O => Some(Side::Second),
            Cell::Empty => None,
        }
    }
}

/// Which participant a mark belongs to: the first mover places `X`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Side {
    First,
    Second,
}

impl Side {
    /// Get the opposing side
    pub fn opponent(self) -> Side {
        match self {
            Side::First => Side::Second,
            Side::Second => Side::First,
        }
    }

    /// Convert side to its mark
    pub fn to_cell(self) -> Cell {
        match self {
            Side::First => Cell::X,
            Side::Second => Cell::O,
        }
    }

    /// Integer code used by result reporting (1 for first, -1 for second).
    pub fn code(self) -> i8 {
        match self {
            Side::First => 1,
            Side::Second => -1,
        }
    }
}

impl fmt::Display for Side {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Side::First => write!(f, "first (X)"),
            Side::Second => write!(f, "second (O)"),
        }
    }
}

/// A cell coordinate. Top left is `(0, 0)`, bottom right `(2, 2)`.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Action {
    pub row: usize,
    pub col: usize,
}

impl Action {
    pub fn new(row: usize, col: usize) -> Self {
        Self { row, col }
    }

    /// Row-major index in `0..9`.
    pub fn index(self) -> usize {
        self.row * 3 + self.col
    }

    pub fn from_index(index: usize) -> Result<Self> {
        if index >= 9 {
            return Err(Error::InvalidPosition { position: index });
        }
        Ok(Self {
            row: index / 3,
            col: index % 3,
        })
    }

    fn checked_index(self) -> Result<usize> {
        if self.row >= 3 || self.col >= 3 {
            return Err(Error::InvalidPosition {
                position: self.row.saturating_mul(3).saturating_add(self.col),
            });
        }
        Ok(self.index())
    }
}

impl TryFrom<usize> for Action {
    type Error = Error;

    fn try_from(index: usize) -> Result<Self> {
        Action::from_index(index)
    }
}

impl From<(usize, usize)> for Action {
    fn from((row, col): (usize, usize)) -> Self {
        Action::new(row, col)
    }
}

impl fmt::Display for Action {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "({}, {})", self.row, self.col)
    }
}

/// The 3x3 board, mutated in place as turns are taken.
///
/// `Board` is `Copy` so agents can cheaply probe candidate moves on a
/// scratch copy.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct Board {
    cells: [Cell; 9],
    first_player_turn: bool,
}

impl Board {
    /// Create a new empty board with the first player to move
    pub fn new() -> Self {
        Self {
            cells: [Cell::Empty; 9],
            first_player_turn: true,
        }
    }

    /// Build a board from raw cells, inferring whose turn it is.
    ///
    /// # Errors
    ///
    /// Returns [`Error::InvalidPieceCounts`] unless the first player has the
    /// same number of marks as the second or exactly one more.
    pub fn from_cells(cells: [Cell; 9]) -> Result<Self> {
        let first = cells.iter().filter(|&&c| c == Cell::X).count();
        let second = cells.iter().filter(|&&c| c == Cell::O).count();
        if first != second && first != second + 1 {
            return Err(Error::InvalidPieceCounts { first, second });
        }
        Ok(Self {
            cells,
            first_player_turn: first == second,
        })
    }

    /// Parse a board from exactly 9 cell characters (`X`, `O`, `.`);
    /// whitespace is ignored.
    ///
    /// ```
    /// use ttt_rl::tictactoe::{Board, Side};
    ///
    /// let board = Board::from_string("XXX OO. ...").unwrap();
    /// assert_eq!(board.is_over(), (true, Some(Side::First)));
    /// ```
    pub fn from_string(s: &str) -> Result<Self> {
        let chars: Vec<char> = s.chars().filter(|c| !c.is_whitespace()).collect();
        if chars.len() != 9 {
            return Err(Error::InvalidBoardLength {
                expected: 9,
                got: chars.len(),
                context: s.to_string(),
            });
        }

        let mut cells = [Cell::Empty; 9];
        for (i, &c) in chars.iter().enumerate() {
            cells[i] = Cell::from_char(c).ok_or_else(|| Error::InvalidCellCharacter {
                character: c,
                position: i,
                context: s.to_string(),
            })?;
        }
        Self::from_cells(cells)
    }

    /// Reconstruct a board from its base-3 hash.
    pub fn from_hash(hash: usize) -> Result<Self> {
        if hash >= STATE_COUNT {
            return Err(Error::InvalidHash { hash });
        }
        let mut cells = [Cell::Empty; 9];
        let mut rest = hash;
        for cell in cells.iter_mut().rev() {
            *cell = Cell::from_digit(rest % 3);
            rest /= 3;
        }
        Self::from_cells(cells)
    }

    pub fn cells(&self) -> &[Cell; 9] {
        &self.cells
    }

    /// Mark at `action`, or [`Error::InvalidPosition`] off the board
    pub fn get(&self, action: Action) -> Result<Cell> {
        Ok(self.cells[action.checked_index()?])
    }

    pub fn first_player_turn(&self) -> bool {
        self.first_player_turn
    }

    /// Side whose mark the next `take_turn` writes
    pub fn current_side(&self) -> Side {
        if self.first_player_turn {
            Side::First
        } else {
            Side::Second
        }
    }

    /// Number of marks placed so far
    pub fn mark_count(&self) -> usize {
        self.cells.iter().filter(|&&c| c != Cell::Empty).count()
    }

    /// Write the current player's mark and pass the turn.
    ///
    /// # Errors
    ///
    /// [`Error::InvalidPosition`] for coordinates off the board,
    /// [`Error::InvalidMove`] if the cell is occupied. The board is left
    /// untouched on error.
    pub fn take_turn(&mut self, action: Action) -> Result<()> {
        let position = action.checked_index()?;
        if self.cells[position] != Cell::Empty {
            return Err(Error::InvalidMove { position });
        }
        self.cells[position] = self.current_side().to_cell();
        self.first_player_turn = !self.first_player_turn;
        Ok(())
    }

    pub fn is_possible(&self, action: Action) -> bool {
        action
            .checked_index()
            .is_ok_and(|position| self.cells[position] == Cell::Empty)
    }

    /// All empty cells in row-major order
    pub fn possible_actions(&self) -> Vec<Action> {
        self.cells
            .iter()
            .enumerate()
            .filter(|&(_, &cell)| cell == Cell::Empty)
            .map(|(i, _)| Action::new(i / 3, i % 3))
            .collect()
    }

    pub fn winner(&self) -> Option<Side> {
        if LineAnalyzer::has_won(&self.cells, Side::First) {
            Some(Side::First)
        } else if LineAnalyzer::has_won(&self.cells, Side::Second) {
            Some(Side::Second)
        } else {
            None
        }
    }

    /// Whether the game has ended, and who won it.
    ///
    /// A full board without a line is a draw: `(true, None)`.
    pub fn is_over(&self) -> (bool, Option<Side>) {
        if let Some(winner) = self.winner() {
            return (true, Some(winner));
        }
        (!self.cells.contains(&Cell::Empty), None)
    }

    /// Bijective base-3 encoding of the cells, most significant digit first.
    pub fn hash(&self) -> usize {
        self.cells
            .iter()
            .fold(0, |acc, cell| acc * 3 + cell.digit())
    }
}

impl Default for Board {
    fn default() -> Self {
        Self::new()
    }
}

impl fmt::Display for Board {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        for row in 0..3 {
            for col in 0..3 {
                let mark = match self.cells[row * 3 + col] {
                    Cell::Empty => ' ',
                    cell => cell.to_char(),
                };
                write!(f, " {mark} ")?;
                if col < 2 {
                    write!(f, "|")?;
                }
            }
            writeln!(f)?;
            if row < 2 {
                writeln!(f, "{}", "-".repeat(11))?;
            }
        }
        Ok(())
    }
}
