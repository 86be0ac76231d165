//! Game driver: one episode, and a batch of episodes

use serde::{Deserialize, Serialize};
use tracing::warn;

use crate::{
    Result,
    ports::Player,
    tictactoe::{GameResult, Side, TicTacToe},
};

/// Win/draw tally of a batch of games, counted from the board's view
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct BattleStats {
    pub player1_wins: usize,
    pub player2_wins: usize,
    pub draws: usize,
}

impl BattleStats {
    pub fn record(&mut self, result: GameResult) {
        match result {
            GameResult::FirstPlayerWin => self.player1_wins += 1,
            GameResult::SecondPlayerWin => self.player2_wins += 1,
            GameResult::Draw => self.draws += 1,
        }
    }

    pub fn games(&self) -> usize {
        self.player1_wins + self.player2_wins + self.draws
    }

    pub fn merge(&mut self, other: &BattleStats) {
        self.player1_wins += other.player1_wins;
        self.player2_wins += other.player2_wins;
        self.draws += other.draws;
    }

    fn pct(&self, count: usize) -> f64 {
        match self.games() {
            0 => 0.0,
            games => count as f64 * 100.0 / games as f64,
        }
    }

    pub fn player1_win_pct(&self) -> f64 {
        self.pct(self.player1_wins)
    }

    pub fn player2_win_pct(&self) -> f64 {
        self.pct(self.player2_wins)
    }

    pub fn draw_pct(&self) -> f64 {
        self.pct(self.draws)
    }
}

/// Play one game: `player1` moves first.
///
/// Both players are told their side up front and the result at the end. If
/// a move fails the episode is abandoned and the error returned; neither
/// player receives a result for it.
pub fn play_game(
    env: &mut TicTacToe,
    player1: &mut dyn Player,
    player2: &mut dyn Player,
) -> Result<GameResult> {
    env.reset();
    player1.new_game(Side::First);
    player2.new_game(Side::Second);

    loop {
        let mover: &mut dyn Player = if env.board().first_player_turn() {
            &mut *player1
        } else {
            &mut *player2
        };
        let transition = mover.make_move(env.board_mut()).inspect_err(|err| {
            warn!(player = mover.name(), error = %err, board = %env.board(), "episode aborted");
        })?;

        if let Some(result) = transition.result() {
            player1.final_result(result)?;
            player2.final_result(result)?;
            return Ok(result);
        }
    }
}

/// Play `games` games between the same pair, `player1` always opening.
pub fn battle(
    player1: &mut dyn Player,
    player2: &mut dyn Player,
    games: usize,
) -> Result<BattleStats> {
    let mut env = TicTacToe::new();
    let mut stats = BattleStats::default();
    for _ in 0..games {
        stats.record(play_game(&mut env, player1, player2)?);
    }
    Ok(stats)
}
