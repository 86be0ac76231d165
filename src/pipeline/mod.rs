//! Game driving and evaluation pipeline
//!
//! This module provides:
//! - The single-episode driver and batch tally (`battle`)
//! - Battle series with a per-battle time series (`evaluation`)
//! - Observers for progress, metrics and logging (`observers`)

pub mod battle;
pub mod evaluation;
pub mod observers;

pub use battle::{BattleStats, battle, play_game};
pub use evaluation::{BattlePoint, EvaluationPipeline, EvaluationReport, eval_players};
pub use observers::{
    LoggingObserver, MetricsObserver, MetricsSummary, MilestoneObserver, ProgressObserver,
};

pub use crate::ports::{Observer, Player};
