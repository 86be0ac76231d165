//! Console player reading cell indices from a line-oriented input

use std::io::{BufRead, Write};

use crate::{
    Error, Result,
    ports::{Player, apply_action, ensure_playable},
    tictactoe::{Action, Board, GameResult, Side, Transition},
};

/// Human participant behind any reader/writer pair.
///
/// Cells are numbered 0-8 in row-major order. Unparsable, out-of-range and
/// occupied choices are reported and asked for again.
pub struct HumanPlayer<R, W> {
    name: String,
    input: R,
    output: W,
    side: Option<Side>,
}

impl<R: BufRead, W: Write> HumanPlayer<R, W> {
    pub fn new(input: R, output: W) -> Self {
        Self {
            name: "Human".to_string(),
            input,
            output,
            side: None,
        }
    }

    pub fn with_name(mut self, name: impl Into<String>) -> Self {
        self.name = name.into();
        self
    }

    pub fn writer_mut(&mut self) -> &mut W {
        &mut self.output
    }

    pub fn into_output(self) -> W {
        self.output
    }

    fn write_io(&mut self, text: &str) -> Result<()> {
        self.output
            .write_all(text.as_bytes())
            .and_then(|()| self.output.flush())
            .map_err(|source| Error::Io {
                operation: "write to console".to_string(),
                source,
            })
    }

    fn read_choice(&mut self, board: &Board) -> Result<Action> {
        loop {
            self.write_io("Your move (0-8): ")?;
            let mut line = String::new();
            let read = self
                .input
                .read_line(&mut line)
                .map_err(|source| Error::Io {
                    operation: "read move".to_string(),
                    source,
                })?;
            if read == 0 {
                return Err(Error::Io {
                    operation: "read move".to_string(),
                    source: std::io::ErrorKind::UnexpectedEof.into(),
                });
            }

            let Ok(index) = line.trim().parse::<usize>() else {
                self.write_io("Please enter a number between 0 and 8.\n")?;
                continue;
            };
            match Action::from_index(index) {
                Ok(action) if board.is_possible(action) => return Ok(action),
                Ok(_) => self.write_io(&format!("Cell {index} is already taken.\n"))?,
                Err(_) => self.write_io(&format!("Cell {index} is off the board.\n"))?,
            }
        }
    }
}

impl<R: BufRead, W: Write> Player for HumanPlayer<R, W> {
    fn new_game(&mut self, side: Side) {
        self.side = Some(side);
    }

    fn make_move(&mut self, board: &mut Board) -> Result<Transition> {
        ensure_playable(board)?;
        let mark = board.current_side().to_cell().to_char();
        self.write_io(&format!("\n{board}\nYou are {mark}.\n"))?;
        let action = self.read_choice(board)?;
        apply_action(board, action)
    }

    fn final_result(&mut self, result: GameResult) -> Result<()> {
        let message = match (result.winner(), self.side) {
            (None, _) => "It's a draw.",
            (Some(winner), Some(side)) if winner == side => "You win!",
            (Some(_), Some(_)) => "You lose.",
            (Some(_), None) => "Game over.",
        };
        self.side = None;
        self.write_io(&format!("{message}\n"))
    }

    fn name(&self) -> &str {
        &self.name
    }
}

#[cfg(test)]
mod tests {
    use std::io::Cursor;

    use super::*;
    use crate::tictactoe::Cell;

    #[test]
    fn test_reprompts_until_valid() {
        let input = Cursor::new("abc\n12\n0\n4\n");
        let mut player = HumanPlayer::new(input, Vec::new());
        player.new_game(Side::Second);
        let mut board = Board::from_string("X........").unwrap();

        player.make_move(&mut board).unwrap();

        assert_eq!(board.get(Action::new(1, 1)).unwrap(), Cell::O);
        let output = String::from_utf8(player.into_output()).unwrap();
        assert!(output.contains("between 0 and 8"));
        assert!(output.contains("off the board"));
        assert!(output.contains("already taken"));
    }

    #[test]
    fn test_end_of_input_is_an_error() {
        let mut player = HumanPlayer::new(Cursor::new(""), Vec::new());
        player.new_game(Side::First);
        let mut board = Board::new();
        assert!(matches!(player.make_move(&mut board), Err(Error::Io { .. })));
        assert_eq!(board, Board::new());
    }

    #[test]
    fn test_reports_result() {
        let mut player = HumanPlayer::new(Cursor::new(""), Vec::new());
        player.new_game(Side::First);
        player.final_result(GameResult::FirstPlayerWin).unwrap();
        let output = String::from_utf8(player.into_output()).unwrap();
        assert_eq!(output, "You win!\n");
    }
}
