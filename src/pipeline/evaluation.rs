//! Battle series: repeated batches of games and the resulting time series

use std::{fs::File, io::BufWriter, path::Path};

use serde::{Deserialize, Serialize};
use tracing::info;

use super::battle::{BattleStats, play_game};
use crate::{
    Error, Result,
    config::EvaluationConfig,
    ports::{Observer, Player},
    tictactoe::TicTacToe,
};

/// One row of the time series: percentages within a single battle
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct BattlePoint {
    /// 1-based battle index
    pub battle: usize,
    /// Games played before this battle started (the curve's x-axis)
    pub games_played: usize,
    pub player1_win_pct: f64,
    pub player2_win_pct: f64,
    pub draw_pct: f64,
}

impl BattlePoint {
    pub fn new(battle: usize, games_played: usize, stats: &BattleStats) -> Self {
        Self {
            battle,
            games_played,
            player1_win_pct: stats.player1_win_pct(),
            player2_win_pct: stats.player2_win_pct(),
            draw_pct: stats.draw_pct(),
        }
    }
}

/// Result of an evaluation run
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EvaluationReport {
    pub player1: String,
    pub player2: String,
    pub games_per_battle: usize,
    pub points: Vec<BattlePoint>,
    /// Tally over every game of every battle
    pub totals: BattleStats,
}

impl EvaluationReport {
    pub fn last_point(&self) -> Option<&BattlePoint> {
        self.points.last()
    }

    /// Write the time series as CSV, one row per battle
    pub fn write_csv<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let mut writer = csv::Writer::from_path(path.as_ref())?;
        for point in &self.points {
            writer.serialize(point)?;
        }
        writer.flush().map_err(|source| Error::Io {
            operation: format!("flush {}", path.as_ref().display()),
            source,
        })?;
        Ok(())
    }

    /// Save the whole report as pretty JSON
    pub fn save<P: AsRef<Path>>(&self, path: P) -> Result<()> {
        let file = File::create(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("create {}", path.as_ref().display()),
            source,
        })?;
        serde_json::to_writer_pretty(BufWriter::new(file), self)?;
        Ok(())
    }

    pub fn load<P: AsRef<Path>>(path: P) -> Result<Self> {
        let file = File::open(path.as_ref()).map_err(|source| Error::Io {
            operation: format!("open {}", path.as_ref().display()),
            source,
        })?;
        Ok(serde_json::from_reader(std::io::BufReader::new(file))?)
    }
}

/// Runs `num_battles` battles of `games_per_battle` games between two
/// players and reports each battle's outcome percentages.
pub struct EvaluationPipeline {
    config: EvaluationConfig,
    observers: Vec<Box<dyn Observer>>,
}

impl EvaluationPipeline {
    pub fn new(config: EvaluationConfig) -> Self {
        Self {
            config,
            observers: Vec::new(),
        }
    }

    /// Add an observer to the pipeline
    pub fn with_observer(mut self, observer: Box<dyn Observer>) -> Self {
        self.observers.push(observer);
        self
    }

    pub fn config(&self) -> &EvaluationConfig {
        &self.config
    }

    pub fn run(
        &mut self,
        player1: &mut dyn Player,
        player2: &mut dyn Player,
    ) -> Result<EvaluationReport> {
        if let Some(seed) = self.config.seed {
            player1.set_rng_seed(seed);
            player2.set_rng_seed(seed.wrapping_add(1));
        }

        for observer in &mut self.observers {
            observer.on_evaluation_start(self.config.total_games())?;
        }

        let mut env = TicTacToe::new();
        let mut totals = BattleStats::default();
        let mut points = Vec::with_capacity(self.config.num_battles);
        let mut game_num = 0;

        for battle in 1..=self.config.num_battles {
            let games_before = game_num;
            let mut stats = BattleStats::default();
            for _ in 0..self.config.games_per_battle {
                let result = play_game(&mut env, player1, player2)?;
                stats.record(result);
                for observer in &mut self.observers {
                    observer.on_game_end(game_num, result)?;
                }
                game_num += 1;
            }
            totals.merge(&stats);

            let point = BattlePoint::new(battle, games_before, &stats);
            for observer in &mut self.observers {
                observer.on_battle_end(&point)?;
            }
            points.push(point);
        }

        for observer in &mut self.observers {
            observer.on_evaluation_end()?;
        }

        info!(
            player1 = player1.name(),
            player2 = player2.name(),
            games = totals.games(),
            player1_win_pct = totals.player1_win_pct(),
            player2_win_pct = totals.player2_win_pct(),
            draw_pct = totals.draw_pct(),
            "evaluation finished"
        );

        Ok(EvaluationReport {
            player1: player1.name().to_string(),
            player2: player2.name().to_string(),
            games_per_battle: self.config.games_per_battle,
            points,
            totals,
        })
    }
}

/// Run `num_battles` battles of `games_per_battle` games without observers.
pub fn eval_players(
    player1: &mut dyn Player,
    player2: &mut dyn Player,
    games_per_battle: usize,
    num_battles: usize,
) -> Result<EvaluationReport> {
    EvaluationPipeline::new(EvaluationConfig::new(games_per_battle, num_battles))
        .run(player1, player2)
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::players::RandomPlayer;

    #[test]
    fn test_one_point_per_battle() {
        let mut p1 = RandomPlayer::with_seed(1);
        let mut p2 = RandomPlayer::with_seed(2);
        let report = eval_players(&mut p1, &mut p2, 10, 4).unwrap();

        assert_eq!(report.points.len(), 4);
        assert_eq!(report.totals.games(), 40);
        for (i, point) in report.points.iter().enumerate() {
            assert_eq!(point.battle, i + 1);
            assert_eq!(point.games_played, i * 10);
            let sum = point.player1_win_pct + point.player2_win_pct + point.draw_pct;
            assert!((sum - 100.0).abs() < 1e-9);
        }
    }

    #[test]
    fn test_seeded_runs_repeat() {
        let config = EvaluationConfig::new(20, 2).with_seed(42);
        let run = || {
            let mut p1 = RandomPlayer::new();
            let mut p2 = RandomPlayer::new();
            EvaluationPipeline::new(config)
                .run(&mut p1, &mut p2)
                .unwrap()
        };
        assert_eq!(run().points, run().points);
    }

    #[test]
    fn test_no_battles_yields_empty_series() {
        let mut p1 = RandomPlayer::with_seed(1);
        let mut p2 = RandomPlayer::with_seed(2);
        let report = eval_players(&mut p1, &mut p2, 10, 0).unwrap();
        assert!(report.points.is_empty());
        assert!(report.last_point().is_none());
    }
}
