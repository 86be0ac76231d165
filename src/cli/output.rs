//! Console formatting helpers for CLI reports

use crate::pipeline::{BattleStats, EvaluationReport};

/// Print a section header
pub fn print_section(title: &str) {
    println!("\n{}", "=".repeat(60));
    println!("{title}");
    println!("{}", "=".repeat(60));
}

/// Print a key-value pair
pub fn print_kv(key: &str, value: &str) {
    println!("  {:20} {}", format!("{}:", key), value);
}

/// Format a number with thousands separators
pub fn format_number(n: usize) -> String {
    let s = n.to_string();
    let mut result = String::new();
    for (i, c) in s.chars().rev().enumerate() {
        if i > 0 && i.is_multiple_of(3) {
            result.insert(0, ',');
        }
        result.insert(0, c);
    }
    result
}

pub fn format_pct(pct: f64) -> String {
    format!("{pct:.1}%")
}

/// Print the totals and final battle of an evaluation report
pub fn print_report(title: &str, report: &EvaluationReport) {
    print_section(title);
    print_kv("Player 1", &report.player1);
    print_kv("Player 2", &report.player2);
    print_stats(&report.totals);
    if let Some(last) = report.last_point() {
        print_kv(
            "Last battle",
            &format!(
                "P1 {} / P2 {} / draw {}",
                format_pct(last.player1_win_pct),
                format_pct(last.player2_win_pct),
                format_pct(last.draw_pct)
            ),
        );
    }
}

fn print_stats(stats: &BattleStats) {
    print_kv("Games", &format_number(stats.games()));
    print_kv(
        "Player 1 wins",
        &format!("{} ({})", stats.player1_wins, format_pct(stats.player1_win_pct())),
    );
    print_kv(
        "Player 2 wins",
        &format!("{} ({})", stats.player2_wins, format_pct(stats.player2_win_pct())),
    );
    print_kv(
        "Draws",
        &format!("{} ({})", stats.draws, format_pct(stats.draw_pct())),
    );
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(0), "0");
        assert_eq!(format_number(999), "999");
        assert_eq!(format_number(19_683), "19,683");
        assert_eq!(format_number(1_000_000), "1,000,000");
    }

    #[test]
    fn test_format_pct() {
        assert_eq!(format_pct(33.333), "33.3%");
    }
}
