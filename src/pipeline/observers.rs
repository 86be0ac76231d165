//! Observers for battle series
//!
//! Observers collect data while an evaluation runs without coupling the
//! game loop to progress display, metrics or log output.

use indicatif::{ProgressBar, ProgressStyle};
use serde::{Deserialize, Serialize};
use tracing::info;

use super::evaluation::BattlePoint;
use crate::{Error, Result, ports::Observer, tictactoe::GameResult};

/// Progress bar observer - shows games played and the running tally
pub struct ProgressObserver {
    progress_bar: Option<ProgressBar>,
    player1_wins: usize,
    player2_wins: usize,
    draws: usize,
}

impl ProgressObserver {
    pub fn new() -> Self {
        Self {
            progress_bar: None,
            player1_wins: 0,
            player2_wins: 0,
            draws: 0,
        }
    }

    fn tally(&self) -> String {
        format!(
            "{} P2:{} D:{}",
            self.player1_wins, self.player2_wins, self.draws
        )
    }
}

impl Default for ProgressObserver {
    fn default() -> Self {
        Self::new()
    }
}

impl Observer for ProgressObserver {
    fn on_evaluation_start(&mut self, total_games: usize) -> Result<()> {
        let pb = ProgressBar::new(total_games as u64);
        pb.set_style(
            ProgressStyle::default_bar()
                .template("[{elapsed_precise}] {bar:40.cyan/blue} {pos}/{len} games (P1:{msg})")
                .map_err(|e| Error::ProgressBarTemplate {
                    message: e.to_string(),
                })?
                .progress_chars("=>-"),
        );
        self.progress_bar = Some(pb);
        Ok(())
    }

    fn on_game_end(&mut self, game_num: usize, result: GameResult) -> Result<()> {
        match result {
            GameResult::FirstPlayerWin => self.player1_wins += 1,
            GameResult::SecondPlayerWin => self.player2_wins += 1,
            GameResult::Draw => self.draws += 1,
        }

        if let Some(pb) = &self.progress_bar {
            pb.set_position(game_num as u64 + 1);
            pb.set_message(self.tally());
        }
        Ok(())
    }

    fn on_evaluation_end(&mut self) -> Result<()> {
        if let Some(pb) = &self.progress_bar {
            pb.finish_with_message(self.tally());
        }
        Ok(())
    }
}

/// Metrics observer - running totals over every game seen
#[derive(Debug, Default)]
pub struct MetricsObserver {
    player1_wins: usize,
    player2_wins: usize,
    draws: usize,
    battles: usize,
    best_player1_win_pct: Option<f64>,
}

impl MetricsObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn total_games(&self) -> usize {
        self.player1_wins + self.player2_wins + self.draws
    }

    fn rate(&self, count: usize) -> f64 {
        match self.total_games() {
            0 => 0.0,
            total => count as f64 / total as f64,
        }
    }

    pub fn summary(&self) -> MetricsSummary {
        MetricsSummary {
            total_games: self.total_games(),
            battles: self.battles,
            player1_wins: self.player1_wins,
            player2_wins: self.player2_wins,
            draws: self.draws,
            player1_win_rate: self.rate(self.player1_wins),
            player2_win_rate: self.rate(self.player2_wins),
            draw_rate: self.rate(self.draws),
            best_player1_win_pct: self.best_player1_win_pct,
        }
    }
}

/// Summary of evaluation metrics
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MetricsSummary {
    pub total_games: usize,
    pub battles: usize,
    pub player1_wins: usize,
    pub player2_wins: usize,
    pub draws: usize,
    pub player1_win_rate: f64,
    pub player2_win_rate: f64,
    pub draw_rate: f64,
    /// Highest single-battle win percentage of player 1
    pub best_player1_win_pct: Option<f64>,
}

impl Observer for MetricsObserver {
    fn on_game_end(&mut self, _game_num: usize, result: GameResult) -> Result<()> {
        match result {
            GameResult::FirstPlayerWin => self.player1_wins += 1,
            GameResult::SecondPlayerWin => self.player2_wins += 1,
            GameResult::Draw => self.draws += 1,
        }
        Ok(())
    }

    fn on_battle_end(&mut self, point: &BattlePoint) -> Result<()> {
        self.battles += 1;
        self.best_player1_win_pct = Some(
            self.best_player1_win_pct
                .map_or(point.player1_win_pct, |best| best.max(point.player1_win_pct)),
        );
        Ok(())
    }
}

/// Logs each battle's percentages at `info`
#[derive(Debug, Default)]
pub struct LoggingObserver {
    label: String,
}

impl LoggingObserver {
    pub fn new(label: impl Into<String>) -> Self {
        Self {
            label: label.into(),
        }
    }
}

impl Observer for LoggingObserver {
    fn on_battle_end(&mut self, point: &BattlePoint) -> Result<()> {
        info!(
            label = %self.label,
            battle = point.battle,
            games = point.games_played,
            player1_win_pct = format_args!("{:.1}", point.player1_win_pct),
            player2_win_pct = format_args!("{:.1}", point.player2_win_pct),
            draw_pct = format_args!("{:.1}", point.draw_pct),
            "battle finished"
        );
        Ok(())
    }
}

/// Milestone observer - first draw and last loss of player 1
///
/// Against a competent opponent a learner that has converged stops losing;
/// a last loss earlier than the first draw means it never lost once it
/// started drawing.
#[derive(Debug, Default)]
pub struct MilestoneObserver {
    first_draw: Option<usize>,
    last_loss: Option<usize>,
    games: usize,
}

impl MilestoneObserver {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn first_draw(&self) -> Option<usize> {
        self.first_draw
    }

    pub fn last_loss(&self) -> Option<usize> {
        self.last_loss
    }

    /// Games played after the last loss, or all of them if none was lost
    pub fn games_since_last_loss(&self) -> usize {
        match self.last_loss {
            Some(game) => self.games - game - 1,
            None => self.games,
        }
    }
}

impl Observer for MilestoneObserver {
    fn on_game_end(&mut self, game_num: usize, result: GameResult) -> Result<()> {
        self.games = game_num + 1;
        match result {
            GameResult::Draw if self.first_draw.is_none() => self.first_draw = Some(game_num),
            GameResult::SecondPlayerWin => self.last_loss = Some(game_num),
            _ => {}
        }
        Ok(())
    }

    fn on_evaluation_end(&mut self) -> Result<()> {
        info!(
            first_draw = ?self.first_draw,
            last_loss = ?self.last_loss,
            games_since_last_loss = self.games_since_last_loss(),
            "milestones"
        );
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_metrics_rates() {
        let mut metrics = MetricsObserver::new();
        metrics.on_game_end(0, GameResult::FirstPlayerWin).unwrap();
        metrics.on_game_end(1, GameResult::Draw).unwrap();
        metrics.on_game_end(2, GameResult::Draw).unwrap();
        metrics.on_game_end(3, GameResult::SecondPlayerWin).unwrap();

        let summary = metrics.summary();
        assert_eq!(summary.total_games, 4);
        assert_eq!(summary.player1_win_rate, 0.25);
        assert_eq!(summary.draw_rate, 0.5);
        assert_eq!(summary.best_player1_win_pct, None);
    }

    #[test]
    fn test_metrics_tracks_best_battle() {
        let mut metrics = MetricsObserver::new();
        for (battle, pct) in [(1, 40.0), (2, 70.0), (3, 55.0)] {
            let point = BattlePoint {
                battle,
                games_played: (battle - 1) * 10,
                player1_win_pct: pct,
                player2_win_pct: 100.0 - pct,
                draw_pct: 0.0,
            };
            metrics.on_battle_end(&point).unwrap();
        }
        assert_eq!(metrics.summary().best_player1_win_pct, Some(70.0));
        assert_eq!(metrics.summary().battles, 3);
    }

    #[test]
    fn test_milestones() {
        let mut milestones = MilestoneObserver::new();
        let results = [
            GameResult::SecondPlayerWin,
            GameResult::Draw,
            GameResult::SecondPlayerWin,
            GameResult::Draw,
            GameResult::FirstPlayerWin,
        ];
        for (game, result) in results.into_iter().enumerate() {
            milestones.on_game_end(game, result).unwrap();
        }
        assert_eq!(milestones.first_draw(), Some(1));
        assert_eq!(milestones.last_loss(), Some(2));
        assert_eq!(milestones.games_since_last_loss(), 2);
    }
}
