//! Player port - the capability set every participant implements
//!
//! Learning agents, the benchmark heuristic, the random baseline and the
//! console human all plug into the battle driver through this trait, so the
//! driver never needs to know which kind of participant it is running.

use crate::{
    Error, Result,
    tictactoe::{Action, Board, GameResult, Side, Transition},
};

/// Participant in a game of Tic-Tac-Toe.
///
/// # Lifecycle
///
/// 1. `new_game(side)` - assigns the side and clears per-episode state
/// 2. `make_move(board)` - called on each of this player's turns
/// 3. `final_result(result)` - once, after the game terminated
///
/// Calling `make_move` or `final_result` without a preceding `new_game` is a
/// contract violation and yields [`Error::NoActiveGame`] for players that
/// keep episode state.
pub trait Player {
    /// Start a new game playing `side`.
    fn new_game(&mut self, side: Side);

    /// Choose a legal action, apply it to `board`, and report the transition.
    ///
    /// # Errors
    ///
    /// [`Error::GameOver`] if the game has already terminated and
    /// [`Error::NoValidMoves`] if no empty cell remains.
    fn make_move(&mut self, board: &mut Board) -> Result<Transition>;

    /// Receive the outcome of the game that just ended.
    ///
    /// Learning players run their credit assignment here. The default
    /// implementation ignores the result.
    fn final_result(&mut self, _result: GameResult) -> Result<()> {
        Ok(())
    }

    /// Display name used in reports and logs
    fn name(&self) -> &str;

    /// Toggle training mode. Players that do not learn ignore it.
    fn set_training(&mut self, _training: bool) {}

    /// Reseed the player's random number generator, if it has one.
    fn set_rng_seed(&mut self, _seed: u64) {}
}

/// Check the preconditions shared by every `make_move` implementation.
pub fn ensure_playable(board: &Board) -> Result<()> {
    if board.is_over().0 {
        return Err(Error::GameOver);
    }
    if board.possible_actions().is_empty() {
        return Err(Error::NoValidMoves);
    }
    Ok(())
}

/// Apply `action` and observe the resulting board.
pub fn apply_action(board: &mut Board, action: Action) -> Result<Transition> {
    board.take_turn(action)?;
    Ok(Transition::observe(board))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_ensure_playable_rejects_finished_game() {
        let won = Board::from_string("XXXOO....").unwrap();
        assert!(matches!(ensure_playable(&won), Err(Error::GameOver)));
        assert!(ensure_playable(&Board::new()).is_ok());
    }

    #[test]
    fn test_apply_action_reports_transition() {
        let mut board = Board::from_string("XX.OO....").unwrap();
        let transition = apply_action(&mut board, Action::new(0, 2)).unwrap();
        assert!(transition.terminated);
        assert_eq!(transition.winner, Some(Side::First));
    }
}
