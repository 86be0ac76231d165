//! Per-episode history and the terminal reward mapping

use crate::{
    Error, Result,
    tictactoe::{GameResult, Side},
};

pub const RES_WIN: f64 = 1.0;
pub const RES_DRAW: f64 = 0.5;
pub const RES_LOSS: f64 = 0.0;

/// Terminal value of `result` from the point of view of `side`.
pub fn terminal_value(side: Side, result: GameResult) -> f64 {
    match result.winner() {
        Some(winner) if winner == side => RES_WIN,
        Some(_) => RES_LOSS,
        None => RES_DRAW,
    }
}

/// Side and recorded steps of the game in progress.
///
/// `side` is `None` while idle: before the first `new_game` and after each
/// terminal update.
#[derive(Debug, Clone)]
pub struct Episode<T> {
    side: Option<Side>,
    steps: Vec<T>,
}

impl<T> Episode<T> {
    pub fn new() -> Self {
        Self {
            side: None,
            steps: Vec::new(),
        }
    }

    pub fn begin(&mut self, side: Side) {
        self.side = Some(side);
        self.steps.clear();
    }

    /// Side being played, or [`Error::NoActiveGame`] while idle.
    pub fn side(&self, player: &str) -> Result<Side> {
        self.side.ok_or_else(|| Error::NoActiveGame {
            player: player.to_string(),
        })
    }

    pub fn record(&mut self, step: T) {
        self.steps.push(step);
    }

    pub fn steps(&self) -> &[T] {
        &self.steps
    }

    /// End the episode, handing back its side and history.
    pub fn finish(&mut self, player: &str) -> Result<(Side, Vec<T>)> {
        let side = self.side(player)?;
        self.side = None;
        Ok((side, std::mem::take(&mut self.steps)))
    }
}

impl<T> Default for Episode<T> {
    fn default() -> Self {
        Self::new()
    }
}
