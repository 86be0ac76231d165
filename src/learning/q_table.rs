//! Q-table indexed by board hash

use crate::tictactoe::STATE_COUNT;

/// Action values for every board encoding: `3^9` rows of 9 entries.
///
/// Entries for occupied cells are never selected or updated; they keep
/// their initial value.
#[derive(Debug, Clone, PartialEq)]
pub struct QTable {
    q_values: Vec<[f64; 9]>,
    /// Learning rate α
    learning_rate: f64,
    /// Discount factor γ
    discount_factor: f64,
}

impl QTable {
    pub fn new(learning_rate: f64, discount_factor: f64, q_init: f64) -> Self {
        Self {
            q_values: vec![[q_init; 9]; STATE_COUNT],
            learning_rate,
            discount_factor,
        }
    }

    pub fn get(&self, state: usize, action: usize) -> f64 {
        self.q_values[state][action]
    }

    pub fn set(&mut self, state: usize, action: usize, value: f64) {
        self.q_values[state][action] = value;
    }

    /// All nine action values of a state
    pub fn row(&self, state: usize) -> &[f64; 9] {
        &self.q_values[state]
    }

    /// Maximum Q-value over the given actions
    pub fn max_q(&self, state: usize, legal_actions: &[usize]) -> f64 {
        legal_actions
            .iter()
            .map(|&action| self.get(state, action))
            .fold(f64::NEG_INFINITY, f64::max)
    }

    /// Greedy action; ties go to the earliest entry of `legal_actions`.
    pub fn greedy_action(&self, state: usize, legal_actions: &[usize]) -> Option<usize> {
        first_max_by(legal_actions, |&action| self.get(state, action))
    }

    /// Q(s,a) ← Q(s,a)(1-α) + αγ·max_next
    pub fn q_learning_update(&mut self, state: usize, action: usize, max_next: f64) {
        let current = self.get(state, action);
        let updated = current * (1.0 - self.learning_rate)
            + self.learning_rate * self.discount_factor * max_next;
        self.set(state, action, updated);
    }

    /// Q(s,a) ← Q(s,a) + α(γ·Q(s',a') - Q(s,a))
    pub fn sarsa_update(&mut self, state: usize, action: usize, next_q: f64) {
        let current = self.get(state, action);
        let updated =
            current + self.learning_rate * (self.discount_factor * next_q - current);
        self.set(state, action, updated);
    }
}

/// First element with the maximal score. `Iterator::max_by` would return
/// the last one on ties.
pub(crate) fn first_max_by<T: Copy>(items: &[T], score: impl Fn(&T) -> f64) -> Option<T> {
    let mut best: Option<(T, f64)> = None;
    for item in items {
        let value = score(item);
        match best {
            Some((_, best_value)) if value <= best_value => {}
            _ => best = Some((*item, value)),
        }
    }
    best.map(|(item, _)| item)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_qtable_initialization() {
        let qtable = QTable::new(0.5, 0.9, 0.6);
        assert_eq!(qtable.get(0, 0), 0.6);
        assert_eq!(qtable.get(STATE_COUNT - 1, 8), 0.6);
    }

    #[test]
    fn test_max_q_only_considers_given_actions() {
        let mut qtable = QTable::new(0.5, 0.9, 0.0);
        qtable.set(7, 0, 5.0);
        qtable.set(7, 1, 1.5);
        qtable.set(7, 2, 0.8);

        assert_eq!(qtable.max_q(7, &[1, 2]), 1.5);
    }

    #[test]
    fn test_greedy_action_prefers_first_on_ties() {
        let mut qtable = QTable::new(0.5, 0.9, 0.0);
        qtable.set(3, 2, 1.0);
        qtable.set(3, 6, 1.0);

        assert_eq!(qtable.greedy_action(3, &[0, 2, 4, 6]), Some(2));
        assert_eq!(qtable.greedy_action(3, &[0, 4]), Some(0));
        assert_eq!(qtable.greedy_action(3, &[]), None);
    }

    #[test]
    fn test_q_learning_update() {
        let mut qtable = QTable::new(0.5, 0.9, 0.6);
        qtable.q_learning_update(0, 4, 1.0);
        // 0.6 * 0.5 + 0.5 * 0.9 * 1.0
        assert!((qtable.get(0, 4) - 0.75).abs() < 1e-12);
    }

    #[test]
    fn test_sarsa_update() {
        let mut qtable = QTable::new(0.5, 0.9, 0.6);
        qtable.sarsa_update(0, 4, 0.0);
        // 0.6 + 0.5 * (0.9 * 0.0 - 0.6)
        assert!((qtable.get(0, 4) - 0.3).abs() < 1e-12);
    }
}
