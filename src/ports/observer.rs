//! Observer port - abstraction for evaluation progress and data collection
//!
//! Observers receive events from the battle driver, so progress bars,
//! running metrics and log output stay decoupled from the game loop.

use crate::{Result, pipeline::BattlePoint, tictactoe::GameResult};

/// Observer trait for monitoring a series of battles
///
/// # Event Sequence
///
/// 1. `on_evaluation_start(total_games)` - once
/// 2. For each battle, for each game: `on_game_end(game_num, result)`,
///    then `on_battle_end(point)`
/// 3. `on_evaluation_end()` - once
///
/// # Examples
///
/// ```no_run
/// use ttt_rl::{ports::Observer, tictactoe::GameResult};
///
/// struct DrawCounter {
///     draws: usize,
/// }
///
/// impl Observer for DrawCounter {
///     fn on_game_end(&mut self, _game_num: usize, result: GameResult) -> ttt_rl::Result<()> {
///         if result == GameResult::Draw {
///             self.draws += 1;
///         }
///         Ok(())
///     }
/// }
/// ```
pub trait Observer {
    /// Called before the first game with the number of games to be played.
    fn on_evaluation_start(&mut self, _total_games: usize) -> Result<()> {
        Ok(())
    }

    /// Called after each game. `game_num` counts across battles (0-based).
    fn on_game_end(&mut self, _game_num: usize, _result: GameResult) -> Result<()> {
        Ok(())
    }

    /// Called with the aggregate of each completed battle.
    fn on_battle_end(&mut self, _point: &BattlePoint) -> Result<()> {
        Ok(())
    }

    /// Called once after the last battle.
    fn on_evaluation_end(&mut self) -> Result<()> {
        Ok(())
    }
}
