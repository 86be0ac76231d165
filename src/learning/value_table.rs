//! State-value table for TD(0)

use crate::tictactoe::STATE_COUNT;

/// One value per board encoding.
#[derive(Debug, Clone, PartialEq)]
pub struct ValueTable {
    values: Vec<f64>,
    learning_rate: f64,
    discount_factor: f64,
}

impl ValueTable {
    pub fn new(learning_rate: f64, discount_factor: f64, v_init: f64) -> Self {
        Self {
            values: vec![v_init; STATE_COUNT],
            learning_rate,
            discount_factor,
        }
    }

    pub fn get(&self, state: usize) -> f64 {
        self.values[state]
    }

    pub fn set(&mut self, state: usize, value: f64) {
        self.values[state] = value;
    }

    /// V(s) ← V(s) + α(γ·V(s') - V(s))
    pub fn td_update(&mut self, state: usize, next_value: f64) {
        let current = self.get(state);
        let updated =
            current + self.learning_rate * (self.discount_factor * next_value - current);
        self.set(state, updated);
    }
}
