//! Battle series, observers and report export

use ttt_rl::{
    config::{AgentConfig, EvaluationConfig},
    learning::{Agent, AgentKind, QLearningAgent},
    pipeline::{
        EvaluationPipeline, EvaluationReport, MetricsObserver, ProgressObserver, battle,
        eval_players,
    },
    players::{BenchmarkPlayer, RandomPlayer},
    ports::Player,
};
use tempfile::tempdir;

#[test]
fn random_vs_random_series() {
    let mut p1 = RandomPlayer::with_seed(1);
    let mut p2 = RandomPlayer::with_seed(2);
    let report = eval_players(&mut p1, &mut p2, 25, 8).unwrap();

    assert_eq!(report.points.len(), 8);
    assert_eq!(report.totals.games(), 200);
    assert_eq!(report.player1, "Random");
    let last = report.last_point().unwrap();
    assert_eq!(last.battle, 8);
    assert_eq!(last.games_played, 175);
    assert_eq!(report.points[0].games_played, 0);
}

#[test]
fn observers_do_not_change_results() {
    let config = EvaluationConfig::new(10, 3).with_seed(99);

    let mut a1 = RandomPlayer::new();
    let mut a2 = BenchmarkPlayer::new();
    let plain = EvaluationPipeline::new(config).run(&mut a1, &mut a2).unwrap();

    let mut b1 = RandomPlayer::new();
    let mut b2 = BenchmarkPlayer::new();
    let observed = EvaluationPipeline::new(config)
        .with_observer(Box::new(MetricsObserver::new()))
        .with_observer(Box::new(ProgressObserver::new()))
        .run(&mut b1, &mut b2)
        .unwrap();

    assert_eq!(plain.points, observed.points);
}

#[test]
fn csv_has_header_and_one_row_per_battle() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("curve.csv");

    let mut p1 = BenchmarkPlayer::with_seed(3);
    let mut p2 = RandomPlayer::with_seed(4);
    let report = eval_players(&mut p1, &mut p2, 10, 5).unwrap();
    report.write_csv(&path).unwrap();

    let mut reader = csv::Reader::from_path(&path).unwrap();
    let headers = reader.headers().unwrap().clone();
    assert_eq!(
        headers.iter().collect::<Vec<_>>(),
        vec![
            "battle",
            "games_played",
            "player1_win_pct",
            "player2_win_pct",
            "draw_pct"
        ]
    );
    assert_eq!(reader.records().count(), 5);
}

#[test]
fn report_json_round_trip() {
    let tmp = tempdir().unwrap();
    let path = tmp.path().join("report.json");

    let mut p1 = RandomPlayer::with_seed(5);
    let mut p2 = RandomPlayer::with_seed(6);
    let report = eval_players(&mut p1, &mut p2, 4, 2).unwrap();
    report.save(&path).unwrap();

    let loaded = EvaluationReport::load(&path).unwrap();
    assert_eq!(loaded.points, report.points);
    assert_eq!(loaded.totals, report.totals);
}

#[test]
fn benchmark_beats_random_as_first_player() {
    let mut p1 = BenchmarkPlayer::with_seed(7);
    let mut p2 = RandomPlayer::with_seed(8);
    let stats = battle(&mut p1, &mut p2, 500).unwrap();
    assert!(stats.player1_wins > stats.player2_wins * 3);
}

#[test]
fn trained_q_agent_outplays_random() {
    let mut agent = QLearningAgent::new(AgentConfig::q_learning().with_seed(10)).unwrap();
    let mut random = RandomPlayer::with_seed(11);
    battle(&mut agent, &mut random, 5000).unwrap();

    agent.set_training(false);
    let stats = battle(&mut agent, &mut random, 500).unwrap();
    assert!(stats.player1_win_pct() > 60.0, "{stats:?}");
}

#[test]
fn enum_agents_play_each_other() {
    let mut td = Agent::with_defaults(AgentKind::Td).unwrap();
    let mut sarsa = Agent::with_defaults(AgentKind::Sarsa).unwrap();
    td.set_rng_seed(1);
    sarsa.set_rng_seed(2);
    let stats = battle(&mut td, &mut sarsa, 100).unwrap();
    assert_eq!(stats.games(), 100);
}
