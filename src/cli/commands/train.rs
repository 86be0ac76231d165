//! Train command - train a learning agent, then optionally evaluate it frozen

use std::{fs::File, io::BufWriter, path::PathBuf};

use anyhow::{Context, Result};
use clap::Parser;
use serde::Serialize;
use tracing::info;

use super::{AgentArg, AgentOptions, OpponentArg, build_opponent};
use crate::{
    cli::output::print_report,
    config::{AgentConfig, EvaluationConfig},
    learning::{Agent, AgentKind},
    pipeline::{
        EvaluationPipeline, EvaluationReport, LoggingObserver, MilestoneObserver,
        ProgressObserver,
    },
    ports::Player,
};

#[derive(Parser, Debug)]
#[command(about = "Train a learning agent against an opponent")]
pub struct TrainArgs {
    /// Learning algorithm to train
    #[arg(value_enum)]
    pub agent: AgentArg,

    /// Opponent to train against
    #[arg(long, short = 'o', value_enum, default_value = "random")]
    pub opponent: OpponentArg,

    /// Games per battle (one point of the learning curve)
    #[arg(long, short = 'g', default_value_t = 100)]
    pub games_per_battle: usize,

    /// Number of training battles
    #[arg(long, short = 'b', default_value_t = 100)]
    pub battles: usize,

    /// Write the training curve as CSV
    #[arg(long)]
    pub csv: Option<PathBuf>,

    /// Write a JSON summary of the run
    #[arg(long)]
    pub summary: Option<PathBuf>,

    /// After training, freeze the agent and evaluate it against this opponent
    #[arg(long, value_enum)]
    pub evaluate_against: Option<OpponentArg>,

    /// Number of evaluation battles
    #[arg(long, default_value_t = 10)]
    pub evaluation_battles: usize,

    /// Write the evaluation curve as CSV
    #[arg(long)]
    pub evaluation_csv: Option<PathBuf>,

    /// Random seed for reproducibility
    #[arg(long)]
    pub seed: Option<u64>,

    /// Hide the progress bar
    #[arg(long, default_value_t = false)]
    pub no_progress: bool,

    #[command(flatten)]
    pub agent_options: AgentOptions,
}

/// Everything a training run produced
#[derive(Debug, Clone, Serialize)]
pub struct TrainingSummary {
    pub agent: AgentKind,
    pub config: AgentConfig,
    pub seed: Option<u64>,
    pub final_epsilon: f64,
    pub training: EvaluationReport,
    pub evaluation: Option<EvaluationReport>,
}

fn pipeline(config: EvaluationConfig, label: &str, progress: bool) -> EvaluationPipeline {
    let mut pipeline =
        EvaluationPipeline::new(config).with_observer(Box::new(LoggingObserver::new(label)));
    if progress {
        pipeline = pipeline.with_observer(Box::new(ProgressObserver::new()));
    }
    pipeline
}

fn with_seed(config: EvaluationConfig, seed: Option<u64>) -> EvaluationConfig {
    match seed {
        Some(seed) => config.with_seed(seed),
        None => config,
    }
}

/// Run training (and evaluation, if requested) without printing.
pub fn run(args: &TrainArgs) -> Result<TrainingSummary> {
    let kind = AgentKind::from(args.agent);
    let config = args.agent_options.resolve(kind, args.seed)?;
    let progress = !args.no_progress;

    let mut agent = Agent::new(kind, config)?;
    let mut opponent = build_opponent(
        args.opponent,
        kind,
        config,
        args.seed.map(|seed| seed.wrapping_add(1)),
    )?;

    info!(
        agent = %kind,
        opponent = opponent.name(),
        battles = args.battles,
        games_per_battle = args.games_per_battle,
        "training"
    );
    agent.set_training(true);
    let training = pipeline(
        with_seed(EvaluationConfig::new(args.games_per_battle, args.battles), args.seed),
        "training",
        progress,
    )
    .run(&mut agent, opponent.as_mut())?;

    if let Some(path) = &args.csv {
        training
            .write_csv(path)
            .with_context(|| format!("writing training curve to {}", path.display()))?;
    }

    let evaluation = match args.evaluate_against {
        Some(against) => {
            agent.set_training(false);
            let mut evaluator = build_opponent(
                against,
                kind,
                config,
                args.seed.map(|seed| seed.wrapping_add(2)),
            )?;
            let eval_config = with_seed(
                EvaluationConfig::new(args.games_per_battle, args.evaluation_battles),
                args.seed.map(|seed| seed.wrapping_add(3)),
            );
            let report = pipeline(eval_config, "evaluation", progress)
                .with_observer(Box::new(MilestoneObserver::new()))
                .run(&mut agent, evaluator.as_mut())?;
            if let Some(path) = &args.evaluation_csv {
                report
                    .write_csv(path)
                    .with_context(|| format!("writing evaluation curve to {}", path.display()))?;
            }
            Some(report)
        }
        None => None,
    };

    let summary = TrainingSummary {
        agent: kind,
        config,
        seed: args.seed,
        final_epsilon: agent.epsilon(),
        training,
        evaluation,
    };

    if let Some(path) = &args.summary {
        let file = File::create(path)
            .with_context(|| format!("creating summary file {}", path.display()))?;
        serde_json::to_writer_pretty(BufWriter::new(file), &summary)
            .with_context(|| format!("writing summary to {}", path.display()))?;
    }

    Ok(summary)
}

pub fn execute(args: TrainArgs) -> Result<()> {
    let summary = run(&args)?;

    print_report("Training", &summary.training);
    if let Some(evaluation) = &summary.evaluation {
        print_report("Evaluation (frozen agent)", evaluation);
    }
    if let Some(path) = &args.csv {
        println!("\nTraining curve written to {}", path.display());
    }
    if let Some(path) = &args.summary {
        println!("Summary written to {}", path.display());
    }
    Ok(())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_defaults() {
        let args = TrainArgs::parse_from(["train", "sarsa"]);
        assert_eq!(args.agent, AgentArg::Sarsa);
        assert_eq!(args.opponent, OpponentArg::Random);
        assert_eq!(args.games_per_battle, 100);
        assert_eq!(args.battles, 100);
        assert!(args.evaluate_against.is_none());
    }

    #[test]
    fn test_parse_self_opponent() {
        let args = TrainArgs::parse_from(["train", "td", "--opponent", "self", "--alpha", "0.2"]);
        assert_eq!(args.opponent, OpponentArg::SelfPlay);
        assert_eq!(args.agent_options.alpha, Some(0.2));
    }
}
